//! Basket and checkout scenarios for the storefront

use serde::{Deserialize, Serialize};

use crate::error::{E2eError, E2eResult};
use crate::fixtures::Fixtures;
use crate::spec::{TestSpec, TestStep};

use super::{CheckoutDetails, CheckoutPage, SweetshopPage};

pub const STOREFRONT_SUITE: &str = "SweetShop Basket and Checkout Tests";

const CURRENCY: &str = "GBP";

/// A basket line as listed in the products fixture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub quantity: String,
    /// Price with currency sign, e.g. `£0.75`
    pub price: String,
}

impl Product {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }
}

/// Products listed in the `products` fixture
pub fn load_products(fixtures: &Fixtures) -> E2eResult<Vec<Product>> {
    fixtures.load("products")
}

/// Sum of price × quantity over `items`, as pounds with two decimals
pub fn calculate_total_price(items: &[Product]) -> E2eResult<String> {
    let mut total_pence: u64 = 0;
    for item in items {
        let quantity: u64 = item.quantity.trim().parse().map_err(|_| {
            E2eError::InvalidPrice(format!("bad quantity {:?} for {}", item.quantity, item.name))
        })?;
        total_pence += parse_pence(&item.price)? * quantity;
    }
    Ok(format!("{}.{:02}", total_pence / 100, total_pence % 100))
}

fn parse_pence(price: &str) -> E2eResult<u64> {
    let invalid = || E2eError::InvalidPrice(price.to_string());

    let amount = price.trim().trim_start_matches('£').trim();
    if amount.is_empty() {
        return Err(invalid());
    }
    let (pounds, pence) = match amount.split_once('.') {
        Some((pounds, pence)) => (pounds, pence),
        None => (amount, ""),
    };
    if pence.len() > 2 || !pence.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let pounds: u64 = if pounds.is_empty() {
        0
    } else {
        pounds.parse().map_err(|_| invalid())?
    };
    let pence: u64 = match pence.len() {
        0 => 0,
        1 => pence.parse::<u64>().map_err(|_| invalid())? * 10,
        _ => pence.parse().map_err(|_| invalid())?,
    };
    Ok(pounds * 100 + pence)
}

/// The two storefront scenarios: add every product, verify the basket, then
/// either switch to standard shipping or fill in the checkout form
pub fn basket_and_checkout_specs(products: &[Product]) -> E2eResult<Vec<TestSpec>> {
    let total = format!("£{}", calculate_total_price(products)?);
    let shop = SweetshopPage;
    let checkout = CheckoutPage;

    let verified_basket = || -> Vec<TestStep> {
        let mut steps = shop.launch_application();
        for index in 1..=products.len() {
            steps.extend(shop.add_to_basket(index));
        }
        steps.extend(shop.click_on_basket());
        for product in products {
            steps.extend(checkout.validate_product_title_price_and_quantity(
                &product.name,
                &product.price,
                &product.quantity,
            ));
        }
        steps.extend(checkout.validate_basket_count(products.len()));
        steps.extend(checkout.validate_checkout_currency(CURRENCY));
        steps.extend(checkout.validate_total_price(&total));
        steps
    };

    let mut shipping = verified_basket();
    shipping.extend(checkout.click_on_standard_shipping_and_verify_total_price(&total));

    let mut details = verified_basket();
    details.extend(checkout.fill_checkout_form(&CheckoutDetails::default()));
    details.extend(checkout.click_on_checkout_button());

    Ok(vec![
        storefront_spec(
            "Add different products to basket and verify them on the checkout page, switch delivery to standard shipping",
            shipping,
        ),
        storefront_spec(
            "Add different products to basket, verify them on the checkout page, and fill in checkout details",
            details,
        ),
    ])
}

fn storefront_spec(name: &str, steps: Vec<TestStep>) -> TestSpec {
    TestSpec {
        name: name.to_string(),
        suite: STOREFRONT_SUITE.to_string(),
        description: String::new(),
        tags: vec!["storefront".to_string(), "checkout".to_string()],
        viewport: None,
        steps,
        mocks: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SoftCheck;
    use test_case::test_case;

    fn products() -> Vec<Product> {
        vec![
            Product::new("Chocolate Cups", "1", "£1.00"),
            Product::new("Sherbert Straws", "1", "£0.75"),
            Product::new("Sherbet Discs", "1", "£0.95"),
        ]
    }

    #[test]
    fn test_total_price() {
        assert_eq!(calculate_total_price(&products()).unwrap(), "2.70");
        assert_eq!(calculate_total_price(&[]).unwrap(), "0.00");
    }

    #[test]
    fn test_total_price_uses_quantity() {
        let items = vec![
            Product::new("Sherbert Straws", "3", "£0.75"),
            Product::new("Wham Bars", "2", "£0.15"),
        ];
        assert_eq!(calculate_total_price(&items).unwrap(), "2.55");
    }

    #[test_case("£1.00", 100 ; "pounds and pence")]
    #[test_case("0.75", 75 ; "no currency sign")]
    #[test_case("£2", 200 ; "whole pounds")]
    #[test_case("£.5", 50 ; "single pence digit")]
    fn test_parse_pence(price: &str, expected: u64) {
        assert_eq!(parse_pence(price).unwrap(), expected);
    }

    #[test_case("£" ; "sign only")]
    #[test_case("£1.005" ; "too many decimals")]
    #[test_case("£one" ; "not a number")]
    #[test_case("£1.-5" ; "negative pence")]
    fn test_parse_pence_rejects(price: &str) {
        assert!(matches!(parse_pence(price), Err(E2eError::InvalidPrice(_))));
    }

    #[test]
    fn test_bad_quantity() {
        let err = calculate_total_price(&[Product::new("Chocolate Cups", "one", "£1.00")]).unwrap_err();
        assert!(err.to_string().contains("bad quantity"));
    }

    #[test]
    fn test_bundled_products_fixture() {
        let products = load_products(&Fixtures::bundled()).unwrap();
        assert!(!products.is_empty());
        assert!(calculate_total_price(&products).is_ok());
    }

    #[test]
    fn test_storefront_specs() {
        let specs = basket_and_checkout_specs(&products()).unwrap();
        assert_eq!(specs.len(), 2);
        assert!(specs.iter().all(|s| s.suite == STOREFRONT_SUITE));
        assert!(specs.iter().all(|s| s.validate().is_ok()));

        let adds = specs[0]
            .steps
            .iter()
            .filter(|s| matches!(s, TestStep::Click { selector, .. } if selector.starts_with("[data-id=")))
            .count();
        assert_eq!(adds, 3);

        let total_checks = specs[0]
            .steps
            .iter()
            .filter(|s| matches!(s, TestStep::SoftAssert { check: SoftCheck::Text { expected }, .. } if expected == "£2.70"))
            .count();
        assert_eq!(total_checks, 2);

        assert!(matches!(
            specs[1].steps.last(),
            Some(TestStep::Click { nth: Some(0), .. })
        ));
    }
}
