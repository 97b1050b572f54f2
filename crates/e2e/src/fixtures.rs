//! JSON fixtures
//!
//! Fixtures are addressed by a slash-separated name relative to the fixture
//! directory, without the `.json` extension, e.g. `mocks/success/users`.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{E2eError, E2eResult};

#[derive(Debug, Clone)]
pub struct Fixtures {
    dir: PathBuf,
}

impl Fixtures {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Fixtures shipped with this crate
    pub fn bundled() -> Self {
        Self::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a fixture file
    pub fn path(&self, name: &str) -> PathBuf {
        let name = name.trim_end_matches(".json");
        self.dir.join(format!("{}.json", name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path(name).is_file()
    }

    /// Load a fixture as untyped JSON
    pub fn load_value(&self, name: &str) -> E2eResult<Value> {
        self.load(name)
    }

    /// Load a fixture into `T`
    pub fn load<T: DeserializeOwned>(&self, name: &str) -> E2eResult<T> {
        let path = self.path(name);
        if !path.is_file() {
            return Err(E2eError::FixtureNotFound(path));
        }
        debug!("Loading fixture {}", path.display());
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }
}
