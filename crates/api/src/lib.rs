//! SweetCheck API Testing Library
//!
//! Support code for the REST API suites:
//! - [`BaseApiClient`] / [`ApiClient`] wrap `reqwest` with base URL, default
//!   headers, auth and timing, and expose typed JSONPlaceholder endpoints
//! - builders produce randomised users, posts and todos
//! - JSON schemas for response bodies, checked with `jsonschema`

pub mod builders;
pub mod client;
pub mod error;
pub mod schema;
pub mod types;

pub use builders::{PostBuilder, TodoBuilder, UserBuilder};
pub use client::{ApiClient, BaseApiClient};
pub use error::{ApiError, ApiResult};
pub use schema::{assert_schema, validate_schema, SchemaOutcome, SchemaValidator, SchemaViolation};
pub use types::*;
