//! Load failures: the target callable could not be obtained at all.

use thiserror::Error;

/// Errors raised while resolving the target callable of an exercise.
///
/// A load failure is fatal to the whole run: no case is executed and no summary is printed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("no exercise named '{0}'")]
    UnknownExercise(String),

    #[error("cannot import name '{entry_point}': no solution registered under that entry point")]
    MissingEntryPoint { entry_point: String },

    #[error("solution '{entry_point}' has signature {found}, expected {expected}")]
    SignatureMismatch {
        entry_point: String,
        expected: String,
        found: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_exercise_message() {
        let err = LoadError::UnknownExercise("fizz_buzz".to_string());
        assert_eq!(err.to_string(), "no exercise named 'fizz_buzz'");
    }

    #[test]
    fn test_missing_entry_point_message_names_entry_point() {
        let err = LoadError::MissingEntryPoint {
            entry_point: "reverse_string".to_string(),
        };
        assert!(err.to_string().contains("'reverse_string'"));
    }

    #[test]
    fn test_signature_mismatch_message_shows_both_signatures() {
        let err = LoadError::SignatureMismatch {
            entry_point: "add_two_numbers".to_string(),
            expected: "fn((i64, i64)) -> i64".to_string(),
            found: "fn(i64) -> i64".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("fn((i64, i64)) -> i64"));
        assert!(msg.contains("fn(i64) -> i64"));
    }
}
