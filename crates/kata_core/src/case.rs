//! Labeled test cases and binding them to a target.

use std::fmt::Debug;

use crate::compare::Matcher;
use crate::outcome::{PreparedCase, Verdict};
use crate::target::Target;

/// One `(input, expected, label)` triple.
///
/// Cases are authored once per exercise and never mutated; the order of a case table only affects the order of
/// the report lines.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase<I, O> {
    pub input: I,
    pub expected: O,
    pub label: String,
    /// Hidden cases run and count like any other but never reveal their values.
    pub hidden: bool,
}

impl<I, O> TestCase<I, O> {
    pub fn new(input: I, expected: O, label: impl Into<String>) -> Self {
        Self {
            input,
            expected,
            label: label.into(),
            hidden: false,
        }
    }

    /// Mark the case as hidden.
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

impl<I, O> TestCase<I, O>
where
    I: Send + 'static,
    O: Debug + Send + 'static,
{
    /// Bind the case to `target` and `matcher`.
    ///
    /// The returned check invokes the target once and compares the result; it does not catch panics.
    pub fn bind(self, target: &Target<I, O>, matcher: &Matcher<O>) -> PreparedCase {
        let target = target.clone();
        let matcher = matcher.clone();
        let TestCase {
            input,
            expected,
            label,
            hidden,
        } = self;

        PreparedCase::new(
            label,
            hidden,
            Box::new(move || {
                let actual = target.call(input)?;
                if matcher.matches(&expected, &actual) {
                    Ok(Verdict::Passed)
                } else {
                    Ok(Verdict::Mismatch {
                        expected: format!("{expected:?}"),
                        actual: format!("{actual:?}"),
                    })
                }
            }),
        )
    }
}

/// Bind a whole case table, preserving its order.
pub fn bind_all<I, O>(cases: Vec<TestCase<I, O>>, target: &Target<I, O>, matcher: &Matcher<O>) -> Vec<PreparedCase>
where
    I: Send + 'static,
    O: Debug + Send + 'static,
{
    cases.into_iter().map(|case| case.bind(target, matcher)).collect()
}
