//! Exercise catalog for the kata verifier.
//!
//! Every exercise is a fixed case table plus the entry-point name and signature its solution must be registered
//! under. The catalog is what the `kata` CLI looks exercises up in; [`reference`] provides known-good solutions
//! for every built-in exercise.
//!
//! ## Built-in exercises
//!
//! | Name | Category | Entry point | Signature |
//! |------|----------|-------------|-----------|
//! | `add_two_numbers` | mathematics | `add_two_numbers` | `fn((i64, i64)) -> i64` |
//! | `average_of_list` | mathematics | `average` | `fn(Vec<f64>) -> f64` (compared within a tolerance) |
//! | `reverse_a_string` | strings | `reverse_string` | `fn(String) -> String` |

pub mod catalog;
pub mod mathematics;
pub mod reference;
pub mod strings;

pub use catalog::{Catalog, Category, Difficulty, Exercise, ExerciseInfo, LoadedExercise, TableExercise};
