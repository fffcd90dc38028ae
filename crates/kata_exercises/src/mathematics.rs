//! Mathematics exercises.

use kata_core::{Matcher, TestCase, Tolerance};

use crate::catalog::{Category, Difficulty, ExerciseInfo, TableExercise};

pub const ADD_TWO_NUMBERS: ExerciseInfo = ExerciseInfo {
    name: "add_two_numbers",
    title: "Add Two Numbers",
    category: Category::Mathematics,
    difficulty: Difficulty::Easy,
    entry_point: "add_two_numbers",
    points: 10,
};

pub fn add_two_numbers_cases() -> Vec<TestCase<(i64, i64), i64>> {
    vec![
        TestCase::new((5, 3), 8, "Positive numbers"),
        TestCase::new((-5, 5), 0, "Neg + Pos"),
        TestCase::new((0, 0), 0, "Zeros"),
        TestCase::new((-10, -20), -30, "Both negative"),
    ]
}

pub fn add_two_numbers() -> TableExercise<(i64, i64), i64> {
    TableExercise::new(ADD_TWO_NUMBERS, add_two_numbers_cases, Matcher::exact())
}

pub const AVERAGE_OF_LIST: ExerciseInfo = ExerciseInfo {
    name: "average_of_list",
    title: "Average of a List",
    category: Category::Mathematics,
    difficulty: Difficulty::Easy,
    entry_point: "average",
    points: 15,
};

/// Absolute slack accepted on float results.
pub const AVERAGE_TOLERANCE: Tolerance = Tolerance::absolute(1e-9);

pub fn average_of_list_cases() -> Vec<TestCase<Vec<f64>, f64>> {
    vec![
        TestCase::new(vec![1.0, 2.0, 3.0, 4.0], 2.5, "Whole numbers"),
        TestCase::new(vec![0.1, 0.2], 0.15, "Decimal fractions"),
        TestCase::new(vec![-1.5, 1.5], 0.0, "Cancelling values"),
        TestCase::new(vec![7.25], 7.25, "Single value"),
        // 0.1 + 0.2 + 0.3 is not exactly 0.6 in binary floating point
        TestCase::new(vec![0.1, 0.2, 0.3], 0.2, "Repeating decimals").hidden(),
    ]
}

pub fn average_of_list() -> TableExercise<Vec<f64>, f64> {
    TableExercise::new(AVERAGE_OF_LIST, average_of_list_cases, Matcher::within(AVERAGE_TOLERANCE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Exercise;

    #[test]
    fn test_add_two_numbers_table() {
        let cases = add_two_numbers_cases();
        assert_eq!(cases.len(), 4);
        assert_eq!(cases[0].input, (5, 3));
        assert_eq!(cases[0].expected, 8);
        assert_eq!(cases[3].label, "Both negative");
        assert!(cases.iter().all(|case| !case.hidden));
    }

    #[test]
    fn test_add_two_numbers_signature() {
        assert_eq!(add_two_numbers().signature(), "fn((i64, i64)) -> i64");
    }

    #[test]
    fn test_average_compares_within_tolerance() {
        let exercise = average_of_list();
        let sum: f64 = [0.1_f64, 0.2, 0.3].iter().sum();
        assert!(exercise.matcher().matches(&0.2, &(sum / 3.0)));
        assert!(!exercise.matcher().matches(&0.2, &0.21));
    }

    #[test]
    fn test_average_has_one_hidden_case() {
        let hidden: Vec<_> = average_of_list_cases().into_iter().filter(|case| case.hidden).collect();
        assert_eq!(hidden.len(), 1);
        assert_eq!(hidden[0].label, "Repeating decimals");
    }
}
