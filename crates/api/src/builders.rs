//! Builders for synthetic users, posts and todos
//!
//! Every builder starts out populated with random but realistic values so a
//! test only sets the fields it cares about. Pass a seeded RNG through
//! `with_rng` when the data has to be reproducible.

use rand::rngs::ThreadRng;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::*;

/// Random value generators shared by the builders
pub mod fake {
    use super::*;

    const FIRST_NAMES: &[&str] = &[
        "Leanne", "Ervin", "Clementine", "Patricia", "Chelsey", "Dennis", "Kurtis", "Nicholas",
        "Glenna", "Clementina", "Amelia", "Oliver", "Isla", "Harry", "Freya", "Jack",
    ];
    const LAST_NAMES: &[&str] = &[
        "Graham", "Howell", "Bauch", "Lebsack", "Dietrich", "Schulist", "Weissnat", "Runolfsdottir",
        "Reichert", "DuBuque", "Smith", "Jones", "Taylor", "Brown", "Wilson", "Evans",
    ];
    const STREETS: &[&str] = &[
        "Kulas Light", "Victor Plains", "Douglas Extension", "Hoeger Mall", "Skiles Walks",
        "Norberto Crossing", "Rex Trail", "Ellsworth Summit", "Dayna Park", "Kattie Turnpike",
    ];
    const CITIES: &[&str] = &[
        "Gwenborough", "Wisokyburgh", "McKenziehaven", "South Elvis", "Roscoeview",
        "South Christy", "Howemouth", "Aliyaview", "Bartholomebury", "Lebsackbury",
    ];
    const COMPANY_SUFFIXES: &[&str] = &["Group", "LLC", "Inc", "and Sons", "Ltd"];
    const ADJECTIVES: &[&str] = &[
        "Multi-layered", "Proactive", "Face to face", "Multi-tiered", "User-centric",
        "Synchronised", "Configurable", "Implemented", "Switchable", "Centralized",
    ];
    const NOUNS: &[&str] = &[
        "client-server neural-net", "didactic contingency", "bi-directional attitude",
        "heuristic protocol", "encompassing access", "zero tolerance moratorium",
        "multimedia framework", "real-time system engine",
    ];
    const BUZZ_VERBS: &[&str] = &["harness", "synergize", "e-enable", "transition", "generate"];
    const BUZZ_NOUNS: &[&str] = &["real-time markets", "e-markets", "web-enabled models", "ROI", "channels"];
    const TLDS: &[&str] = &["com", "net", "org", "info", "biz", "io"];
    const LOREM: &[&str] = &[
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
        "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua",
        "enim", "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris",
        "nisi", "aliquip", "ex", "ea", "commodo", "consequat",
    ];

    fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
        pool.choose(rng).copied().unwrap_or_default()
    }

    fn capitalize(word: &str) -> String {
        let mut chars = word.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    pub fn first_name<R: Rng + ?Sized>(rng: &mut R) -> String {
        pick(rng, FIRST_NAMES).to_string()
    }

    pub fn full_name<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{} {}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
    }

    pub fn username<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{}.{}{}", pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES), rng.gen_range(1..100))
    }

    pub fn email<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!(
            "{}.{}{}@example.{}",
            pick(rng, FIRST_NAMES).to_lowercase(),
            pick(rng, LAST_NAMES).to_lowercase(),
            rng.gen_range(1..1000),
            pick(rng, TLDS)
        )
    }

    pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!(
            "1-{:03}-{:03}-{:04}",
            rng.gen_range(200..1000),
            rng.gen_range(0..1000),
            rng.gen_range(0..10000)
        )
    }

    pub fn url<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("https://{}.{}", pick(rng, LAST_NAMES).to_lowercase(), pick(rng, TLDS))
    }

    pub fn street<R: Rng + ?Sized>(rng: &mut R) -> String {
        pick(rng, STREETS).to_string()
    }

    pub fn secondary_address<R: Rng + ?Sized>(rng: &mut R) -> String {
        if rng.gen_bool(0.5) {
            format!("Apt. {}", rng.gen_range(1..1000))
        } else {
            format!("Suite {}", rng.gen_range(1..1000))
        }
    }

    pub fn city<R: Rng + ?Sized>(rng: &mut R) -> String {
        pick(rng, CITIES).to_string()
    }

    pub fn zip_code<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{:05}-{:04}", rng.gen_range(0..100_000), rng.gen_range(0..10_000))
    }

    pub fn latitude<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{:.4}", rng.gen_range(-90.0..=90.0))
    }

    pub fn longitude<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{:.4}", rng.gen_range(-180.0..=180.0))
    }

    pub fn company_name<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{} {}", pick(rng, LAST_NAMES), pick(rng, COMPANY_SUFFIXES))
    }

    pub fn catch_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{} {}", pick(rng, ADJECTIVES), pick(rng, NOUNS))
    }

    pub fn buzz_phrase<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{} {}", pick(rng, BUZZ_VERBS), pick(rng, BUZZ_NOUNS))
    }

    /// Sentence of `min..=max` lorem words, capitalised and terminated
    pub fn sentence<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> String {
        let count = rng.gen_range(min.max(1)..=max.max(min).max(1));
        let words: Vec<&str> = (0..count).map(|_| pick(&mut *rng, LOREM)).collect();
        format!("{}.", capitalize(&words.join(" ")))
    }

    pub fn paragraphs<R: Rng + ?Sized>(rng: &mut R, count: usize) -> String {
        (0..count)
            .map(|_| {
                let sentences = rng.gen_range(3..=6);
                (0..sentences)
                    .map(|_| sentence(&mut *rng, 4, 12))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn random_id<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(1..=10_000)
}

fn random_user_id<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    rng.gen_range(1..=10)
}

// ==================== Users ====================

/// Builder for [`UserDraft`] / [`User`]
#[derive(Debug, Clone)]
pub struct UserBuilder<R: Rng = ThreadRng> {
    rng: R,
    user: UserDraft,
}

impl UserBuilder<ThreadRng> {
    pub fn create() -> Self {
        Self::with_rng(rand::thread_rng())
    }

    /// A user with only the required fields
    pub fn create_minimal() -> UserDraft {
        Self::create().minimal().build()
    }

    pub fn create_many(count: usize) -> Vec<UserDraft> {
        (0..count).map(|_| Self::create().build()).collect()
    }
}

impl<R: Rng> UserBuilder<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let user = UserDraft {
            id: None,
            name: Some(fake::full_name(&mut rng)),
            username: Some(fake::username(&mut rng)),
            email: Some(fake::email(&mut rng)),
            phone: Some(fake::phone(&mut rng)),
            website: Some(fake::url(&mut rng)),
            address: Some(Address {
                street: fake::street(&mut rng),
                suite: fake::secondary_address(&mut rng),
                city: fake::city(&mut rng),
                zipcode: fake::zip_code(&mut rng),
                geo: Geo {
                    lat: fake::latitude(&mut rng),
                    lng: fake::longitude(&mut rng),
                },
            }),
            company: Some(Company {
                name: fake::company_name(&mut rng),
                catch_phrase: fake::catch_phrase(&mut rng),
                bs: fake::buzz_phrase(&mut rng),
            }),
        };
        Self { rng, user }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.user.id = Some(id);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.user.name = Some(name.into());
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.user.username = Some(username.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.user.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.user.phone = Some(phone.into());
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.user.website = Some(website.into());
        self
    }

    /// Set the address. Coordinates are random when not given.
    pub fn with_address(
        mut self,
        street: impl Into<String>,
        suite: impl Into<String>,
        city: impl Into<String>,
        zipcode: impl Into<String>,
        geo: Option<Geo>,
    ) -> Self {
        let geo = match geo {
            Some(geo) => geo,
            None => Geo {
                lat: fake::latitude(&mut self.rng),
                lng: fake::longitude(&mut self.rng),
            },
        };
        self.user.address = Some(Address {
            street: street.into(),
            suite: suite.into(),
            city: city.into(),
            zipcode: zipcode.into(),
            geo,
        });
        self
    }

    pub fn with_company(
        mut self,
        name: impl Into<String>,
        catch_phrase: impl Into<String>,
        bs: impl Into<String>,
    ) -> Self {
        self.user.company = Some(Company {
            name: name.into(),
            catch_phrase: catch_phrase.into(),
            bs: bs.into(),
        });
        self
    }

    /// Drop phone, website, address and company
    pub fn minimal(mut self) -> Self {
        self.user.phone = None;
        self.user.website = None;
        self.user.address = None;
        self.user.company = None;
        self
    }

    pub fn build(&self) -> UserDraft {
        self.user.clone()
    }

    /// Build a complete user, filling required fields that were cleared
    pub fn build_full(mut self) -> User {
        let user = self.user;
        User {
            id: user.id.unwrap_or_else(|| random_id(&mut self.rng)),
            name: user.name.unwrap_or_else(|| fake::full_name(&mut self.rng)),
            username: user.username.unwrap_or_else(|| fake::username(&mut self.rng)),
            email: user.email.unwrap_or_else(|| fake::email(&mut self.rng)),
            address: user.address,
            phone: user.phone,
            website: user.website,
            company: user.company,
        }
    }
}

// ==================== Posts ====================

/// Builder for [`PostDraft`] / [`Post`]
#[derive(Debug, Clone)]
pub struct PostBuilder<R: Rng = ThreadRng> {
    rng: R,
    post: PostDraft,
}

impl PostBuilder<ThreadRng> {
    pub fn create() -> Self {
        Self::with_rng(rand::thread_rng())
    }

    /// `count` posts, all owned by `user_id` when given
    pub fn create_many(count: usize, user_id: Option<u64>) -> Vec<PostDraft> {
        (0..count)
            .map(|_| {
                let builder = Self::create();
                match user_id {
                    Some(id) => builder.with_user_id(id).build(),
                    None => builder.build(),
                }
            })
            .collect()
    }
}

impl<R: Rng> PostBuilder<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let post = PostDraft {
            id: None,
            user_id: Some(random_user_id(&mut rng)),
            title: Some(fake::sentence(&mut rng, 3, 10)),
            body: Some(fake::paragraphs(&mut rng, 2)),
        };
        Self { rng, post }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.post.id = Some(id);
        self
    }

    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.post.user_id = Some(user_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.post.title = Some(title.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.post.body = Some(body.into());
        self
    }

    pub fn build(&self) -> PostDraft {
        self.post.clone()
    }

    pub fn build_full(mut self) -> Post {
        let post = self.post;
        Post {
            id: post.id.unwrap_or_else(|| random_id(&mut self.rng)),
            user_id: post.user_id.unwrap_or_else(|| random_user_id(&mut self.rng)),
            title: post.title.unwrap_or_else(|| fake::sentence(&mut self.rng, 3, 10)),
            body: post.body.unwrap_or_else(|| fake::paragraphs(&mut self.rng, 2)),
        }
    }
}

// ==================== Todos ====================

/// Builder for [`TodoDraft`] / [`Todo`]
#[derive(Debug, Clone)]
pub struct TodoBuilder<R: Rng = ThreadRng> {
    rng: R,
    todo: TodoDraft,
}

impl TodoBuilder<ThreadRng> {
    pub fn create() -> Self {
        Self::with_rng(rand::thread_rng())
    }

    pub fn create_many(count: usize, user_id: Option<u64>) -> Vec<TodoDraft> {
        (0..count)
            .map(|_| {
                let builder = Self::create();
                match user_id {
                    Some(id) => builder.with_user_id(id).build(),
                    None => builder.build(),
                }
            })
            .collect()
    }
}

impl<R: Rng> TodoBuilder<R> {
    pub fn with_rng(mut rng: R) -> Self {
        let todo = TodoDraft {
            id: None,
            user_id: Some(random_user_id(&mut rng)),
            title: Some(fake::sentence(&mut rng, 3, 8)),
            completed: Some(rng.gen_bool(0.5)),
        };
        Self { rng, todo }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.todo.id = Some(id);
        self
    }

    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.todo.user_id = Some(user_id);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.todo.title = Some(title.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.todo.completed = Some(completed);
        self
    }

    pub fn completed(self) -> Self {
        self.with_completed(true)
    }

    pub fn not_completed(self) -> Self {
        self.with_completed(false)
    }

    pub fn build(&self) -> TodoDraft {
        self.todo.clone()
    }

    /// Complete todo; an unset `completed` means not done
    pub fn build_full(mut self) -> Todo {
        let todo = self.todo;
        Todo {
            id: todo.id.unwrap_or_else(|| random_id(&mut self.rng)),
            user_id: todo.user_id.unwrap_or_else(|| random_user_id(&mut self.rng)),
            title: todo.title.unwrap_or_else(|| fake::sentence(&mut self.rng, 3, 8)),
            completed: todo.completed.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_user_builder_defaults_are_populated() {
        let user = UserBuilder::create().build();
        assert!(user.name.as_deref().is_some_and(|n| !n.is_empty()));
        assert!(user.email.as_deref().is_some_and(|e| e.contains('@')));
        assert!(user.address.is_some());
        assert!(user.company.is_some());
        assert!(user.id.is_none());
    }

    #[test]
    fn test_user_builder_minimal() {
        let user = UserBuilder::create_minimal();
        assert!(user.phone.is_none());
        assert!(user.website.is_none());
        assert!(user.address.is_none());
        assert!(user.company.is_none());
        assert!(user.name.is_some());
    }

    #[test]
    fn test_user_overrides_and_full_build() {
        let user = UserBuilder::with_rng(StdRng::seed_from_u64(7))
            .with_id(42)
            .with_name("Jane Doe")
            .with_address("1 High St", "Apt. 1", "Bristol", "BS1 1AA", None)
            .build_full();
        assert_eq!(user.id, 42);
        assert_eq!(user.name, "Jane Doe");
        assert_eq!(user.address.as_ref().unwrap().city, "Bristol");
        assert!(!user.address.unwrap().geo.lat.is_empty());
    }

    #[test]
    fn test_seeded_builders_are_reproducible() {
        let a = PostBuilder::with_rng(StdRng::seed_from_u64(1)).build();
        let b = PostBuilder::with_rng(StdRng::seed_from_u64(1)).build();
        assert_eq!(a, b);
    }

    #[test]
    fn test_post_defaults_within_ranges() {
        for _ in 0..20 {
            let post = PostBuilder::create().build_full();
            assert!((1..=10).contains(&post.user_id));
            assert!((1..=10_000).contains(&post.id));
            assert!(post.title.ends_with('.'));
            assert!(!post.body.is_empty());
        }
    }

    #[test]
    fn test_create_many_assigns_user() {
        let posts = PostBuilder::create_many(3, Some(1));
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| p.user_id == Some(1)));

        let todos = TodoBuilder::create_many(4, None);
        assert_eq!(todos.len(), 4);
        assert!(todos.iter().all(|t| t.user_id.is_some()));
    }

    #[test]
    fn test_todo_completion_flags() {
        assert_eq!(TodoBuilder::create().completed().build().completed, Some(true));
        assert_eq!(TodoBuilder::create().not_completed().build().completed, Some(false));

        let todo = TodoBuilder::create().with_title("Buy milk").with_user_id(3).build_full();
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.user_id, 3);
    }
}
