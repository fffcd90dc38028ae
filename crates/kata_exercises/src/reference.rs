//! Known-good solutions for the built-in exercises.
//!
//! The `kata` binary verifies these by default; a solution provider builds its own [`SolutionRegistry`] with the
//! same entry-point names.

use kata_core::{SolutionRegistry, Target};

use crate::{mathematics, strings};

pub fn add_two_numbers((a, b): (i64, i64)) -> i64 {
    a + b
}

pub fn average(values: Vec<f64>) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn reverse_string(input: String) -> String {
    input.chars().rev().collect()
}

/// Registry with every reference solution under its exercise's entry point.
pub fn solutions() -> SolutionRegistry {
    SolutionRegistry::new()
        .with(mathematics::ADD_TWO_NUMBERS.entry_point, Target::new(add_two_numbers))
        .with(mathematics::AVERAGE_OF_LIST.entry_point, Target::new(average))
        .with(strings::REVERSE_A_STRING.entry_point, Target::new(reverse_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_solutions_registered() {
        let registry = solutions();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("add_two_numbers"));
        assert!(registry.contains("average"));
        assert!(registry.contains("reverse_string"));
    }

    #[test]
    fn test_reverse_string_handles_multibyte() {
        assert_eq!(reverse_string("añb".to_string()), "bña");
    }

    #[test]
    fn test_average() {
        assert_eq!(average(vec![1.0, 2.0, 3.0, 4.0]), 2.5);
    }
}
