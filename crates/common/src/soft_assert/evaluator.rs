//! Comparison of actual and expected values

use std::fmt::{self, Debug};

use serde::{Deserialize, Serialize};

/// Detail of a failed comparison
///
/// Values are stored in their rendered `Debug` form so records of different
/// value types can live in the same log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonError {
    pub message: String,
    pub actual: String,
    pub expected: String,
    /// Line diff of the pretty-printed values, present when either side
    /// spans multiple lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl ComparisonError {
    pub fn new<A, E>(actual: &A, expected: &E, message: impl Into<String>) -> Self
    where
        A: Debug + ?Sized,
        E: Debug + ?Sized,
    {
        let multiline = format!("{:#?}", actual).contains('\n')
            || format!("{:#?}", expected).contains('\n');
        let diff = multiline
            .then(|| pretty_assertions::Comparison::new(actual, expected).to_string());

        Self {
            message: message.into(),
            actual: format!("{:?}", actual),
            expected: format!("{:?}", expected),
            diff,
        }
    }
}

impl ComparisonError {
    /// Write the comparison under a caller-chosen message
    pub(crate) fn write_with(&self, f: &mut fmt::Formatter<'_>, message: &str) -> fmt::Result {
        write!(
            f,
            "{}: expected {} to equal {}",
            message, self.actual, self.expected
        )?;
        if let Some(diff) = &self.diff {
            write!(f, "\n{}", diff)?;
        }
        Ok(())
    }
}

impl fmt::Display for ComparisonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, &self.message)
    }
}

impl std::error::Error for ComparisonError {}

/// Deep-equality check between `actual` and `expected`
///
/// A mismatch comes back as an `Err` for the caller to record; nothing here
/// panics or aborts the current test.
pub fn evaluate<A, E>(actual: &A, expected: &E, message: &str) -> Result<(), ComparisonError>
where
    A: PartialEq<E> + Debug + ?Sized,
    E: Debug + ?Sized,
{
    if actual == expected {
        Ok(())
    } else {
        Err(ComparisonError::new(actual, expected, message))
    }
}
