//! JSON schemas for API response bodies
//!
//! Schemas are Draft 7 with format checking turned on, so `"format": "email"`
//! is enforced rather than treated as an annotation.

use jsonschema::{Draft, Validator};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{ApiError, ApiResult};

pub fn user_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "name", "username", "email"],
        "properties": {
            "id": { "type": "number", "minimum": 1 },
            "name": { "type": "string", "minLength": 1 },
            "username": { "type": "string", "minLength": 1 },
            "email": { "type": "string", "format": "email" },
            "address": {
                "type": "object",
                "properties": {
                    "street": { "type": "string" },
                    "suite": { "type": "string" },
                    "city": { "type": "string" },
                    "zipcode": { "type": "string" },
                    "geo": {
                        "type": "object",
                        "properties": {
                            "lat": { "type": "string" },
                            "lng": { "type": "string" }
                        },
                        "required": ["lat", "lng"]
                    }
                }
            },
            "phone": { "type": "string" },
            "website": { "type": "string" },
            "company": {
                "type": "object",
                "properties": {
                    "name": { "type": "string" },
                    "catchPhrase": { "type": "string" },
                    "bs": { "type": "string" }
                }
            }
        }
    })
}

pub fn users_array_schema() -> Value {
    array_of(user_schema())
}

pub fn post_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "userId", "title", "body"],
        "properties": {
            "id": { "type": "number", "minimum": 1 },
            "userId": { "type": "number", "minimum": 1 },
            "title": { "type": "string", "minLength": 1 },
            "body": { "type": "string", "minLength": 1 }
        }
    })
}

pub fn posts_array_schema() -> Value {
    array_of(post_schema())
}

pub fn todo_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "userId", "title", "completed"],
        "properties": {
            "id": { "type": "number", "minimum": 1 },
            "userId": { "type": "number", "minimum": 1 },
            "title": { "type": "string", "minLength": 1 },
            "completed": { "type": "boolean" }
        }
    })
}

pub fn todos_array_schema() -> Value {
    array_of(todo_schema())
}

fn array_of(items: Value) -> Value {
    json!({ "type": "array", "items": items, "minItems": 0 })
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer to the offending value, `"root"` for the document itself
    pub path: String,
    pub message: String,
}

/// Result of validating one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaOutcome {
    pub valid: bool,
    pub errors: Vec<SchemaViolation>,
}

impl SchemaOutcome {
    /// `  - <path>: <message>` per violation
    pub fn describe(&self) -> String {
        self.errors
            .iter()
            .map(|violation| format!("  - {}: {}", violation.path, violation.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Compiled schema, reusable across many documents
pub struct SchemaValidator {
    validator: Validator,
}

impl SchemaValidator {
    pub fn new(schema: &Value) -> ApiResult<Self> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft7)
            .should_validate_formats(true)
            .build(schema)
            .map_err(|err| ApiError::InvalidSchema(err.to_string()))?;
        Ok(Self { validator })
    }

    pub fn is_valid(&self, data: &Value) -> bool {
        self.validator.is_valid(data)
    }

    /// Collect every violation, not just the first
    pub fn validate(&self, data: &Value) -> SchemaOutcome {
        let errors: Vec<SchemaViolation> = self
            .validator
            .iter_errors(data)
            .map(|err| {
                let path = err.instance_path.to_string();
                SchemaViolation {
                    path: if path.is_empty() { "root".to_string() } else { path },
                    message: err.to_string(),
                }
            })
            .collect();

        SchemaOutcome {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Fail with [`ApiError::SchemaValidation`] listing every violation
    pub fn assert(&self, data: &Value) -> ApiResult<()> {
        let outcome = self.validate(data);
        if outcome.valid {
            debug!("Schema validation passed");
            return Ok(());
        }

        Err(ApiError::SchemaValidation {
            errors: outcome.describe(),
            data: serde_json::to_string_pretty(data)?,
        })
    }
}

impl std::fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

/// Compile `schema` and validate `data` against it
pub fn validate_schema(data: &Value, schema: &Value) -> ApiResult<SchemaOutcome> {
    Ok(SchemaValidator::new(schema)?.validate(data))
}

pub fn assert_schema(data: &Value, schema: &Value) -> ApiResult<()> {
    SchemaValidator::new(schema)?.assert(data)
}
