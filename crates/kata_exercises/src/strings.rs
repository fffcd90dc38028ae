//! String exercises.

use kata_core::{Matcher, TestCase};

use crate::catalog::{Category, Difficulty, ExerciseInfo, TableExercise};

pub const REVERSE_A_STRING: ExerciseInfo = ExerciseInfo {
    name: "reverse_a_string",
    title: "Reverse a String",
    category: Category::Strings,
    difficulty: Difficulty::Easy,
    entry_point: "reverse_string",
    points: 15,
};

pub fn reverse_a_string_cases() -> Vec<TestCase<String, String>> {
    let case = |input: &str, expected: &str, label: &str| TestCase::new(input.to_string(), expected.to_string(), label);
    vec![
        case("hello", "olleh", "Basic"),
        case("Python", "nohtyP", "Mixed case"),
        case("", "", "Empty string").hidden(),
        case("a", "a", "Single char").hidden(),
        case("racecar", "racecar", "Palindrome"),
    ]
}

pub fn reverse_a_string() -> TableExercise<String, String> {
    TableExercise::new(REVERSE_A_STRING, reverse_a_string_cases, Matcher::exact())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_table_order() {
        let labels: Vec<String> = reverse_a_string_cases().into_iter().map(|case| case.label).collect();
        assert_eq!(labels, vec!["Basic", "Mixed case", "Empty string", "Single char", "Palindrome"]);
    }

    #[test]
    fn test_reverse_expected_values_are_reversed_inputs() {
        for case in reverse_a_string_cases() {
            let reversed: String = case.input.chars().rev().collect();
            assert_eq!(reversed, case.expected, "case {}", case.label);
        }
    }
}
