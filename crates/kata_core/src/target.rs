//! Target callables and the entry-point registry they are resolved from.
//!
//! An exercise declares the entry-point name and the signature it expects. Whoever supplies the solution
//! registers a [`Target`] under that name; resolution checks both the name and the signature (via `Any`
//! downcasting) and reports a [`LoadError`] when either does not match.

use std::any::{Any, type_name};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::LoadError;
use crate::outcome::Fault;

type Call<I, O> = dyn Fn(I) -> Result<O, Fault> + Send + Sync;

/// The function under test, with a fixed signature `I -> O`.
///
/// Infallible solutions are wrapped with [`Target::new`]; solutions that report errors through `Result` use
/// [`Target::fallible`], which turns every `Err` into a [`Fault`].
pub struct Target<I, O> {
    call: Arc<Call<I, O>>,
}

impl<I: 'static, O: 'static> Target<I, O> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Self {
            call: Arc::new(move |input| Ok(f(input))),
        }
    }

    pub fn fallible<F, E>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
        E: fmt::Display,
    {
        Self {
            call: Arc::new(move |input| f(input).map_err(|e| Fault::error(e.to_string()))),
        }
    }
}

impl<I, O> Target<I, O> {
    /// Invoke the callable. Panics are not caught here.
    pub fn call(&self, input: I) -> Result<O, Fault> {
        (self.call)(input)
    }
}

impl<I, O> Clone for Target<I, O> {
    fn clone(&self) -> Self {
        Self {
            call: Arc::clone(&self.call),
        }
    }
}

impl<I, O> fmt::Debug for Target<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("signature", &signature::<I, O>())
            .finish_non_exhaustive()
    }
}

/// Render the signature of a `Target<I, O>` for diagnostics, e.g. `fn((i64, i64)) -> i64`.
pub fn signature<I, O>() -> String {
    format!("fn({}) -> {}", type_name::<I>(), type_name::<O>())
}

struct Entry {
    signature: String,
    target: Box<dyn Any + Send + Sync>,
}

/// Registered solutions, keyed by entry-point name.
///
/// Registering the same entry point twice replaces the earlier solution.
#[derive(Default)]
pub struct SolutionRegistry {
    entries: BTreeMap<String, Entry>,
}

impl SolutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<I, O>(&mut self, entry_point: impl Into<String>, target: Target<I, O>) -> &mut Self
    where
        I: 'static,
        O: 'static,
    {
        self.entries.insert(
            entry_point.into(),
            Entry {
                signature: signature::<I, O>(),
                target: Box::new(target),
            },
        );
        self
    }

    /// Builder form of [`SolutionRegistry::register`].
    pub fn with<I, O>(mut self, entry_point: impl Into<String>, target: Target<I, O>) -> Self
    where
        I: 'static,
        O: 'static,
    {
        self.register(entry_point, target);
        self
    }

    pub fn contains(&self, entry_point: &str) -> bool {
        self.entries.contains_key(entry_point)
    }

    /// Registered entry points in name order.
    pub fn entry_points(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve the solution registered under `entry_point` with the signature `I -> O`.
    pub fn resolve<I, O>(&self, entry_point: &str) -> Result<Target<I, O>, LoadError>
    where
        I: 'static,
        O: 'static,
    {
        let entry = self
            .entries
            .get(entry_point)
            .ok_or_else(|| LoadError::MissingEntryPoint {
                entry_point: entry_point.to_string(),
            })?;

        entry
            .target
            .downcast_ref::<Target<I, O>>()
            .cloned()
            .ok_or_else(|| LoadError::SignatureMismatch {
                entry_point: entry_point.to_string(),
                expected: signature::<I, O>(),
                found: entry.signature.clone(),
            })
    }
}

impl fmt::Debug for SolutionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(name, entry)| (name, &entry.signature)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add((a, b): (i64, i64)) -> i64 {
        a + b
    }

    #[test]
    fn test_resolve_registered_target() {
        let registry = SolutionRegistry::new().with("add_two_numbers", Target::new(add));
        let target = registry.resolve::<(i64, i64), i64>("add_two_numbers").unwrap();
        assert_eq!(target.call((5, 3)), Ok(8));
    }

    #[test]
    fn test_resolve_missing_entry_point() {
        let registry = SolutionRegistry::new();
        let err = registry.resolve::<(i64, i64), i64>("add_two_numbers").unwrap_err();
        assert_eq!(
            err,
            LoadError::MissingEntryPoint {
                entry_point: "add_two_numbers".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_wrong_signature() {
        let registry = SolutionRegistry::new().with("add_two_numbers", Target::new(|x: i64| x));
        let err = registry.resolve::<(i64, i64), i64>("add_two_numbers").unwrap_err();
        match err {
            LoadError::SignatureMismatch { expected, found, .. } => {
                assert_eq!(expected, "fn((i64, i64)) -> i64");
                assert_eq!(found, "fn(i64) -> i64");
            }
            other => panic!("Expected SignatureMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_fallible_target_error_becomes_fault() {
        let target: Target<i64, i64> = Target::fallible(|x: i64| {
            if x == 0 {
                Err("division by zero")
            } else {
                Ok(100 / x)
            }
        });
        assert_eq!(target.call(4), Ok(25));
        let fault = target.call(0).unwrap_err();
        assert_eq!(fault.kind, crate::FaultKind::Error);
        assert_eq!(fault.message, "division by zero");
    }

    #[test]
    fn test_register_replaces_previous_solution() {
        let mut registry = SolutionRegistry::new();
        registry.register("add_two_numbers", Target::new(|(a, b): (i64, i64)| a - b));
        registry.register("add_two_numbers", Target::new(add));
        assert_eq!(registry.len(), 1);
        let target = registry.resolve::<(i64, i64), i64>("add_two_numbers").unwrap();
        assert_eq!(target.call((2, 2)), Ok(4));
    }

    #[test]
    fn test_entry_points_are_sorted() {
        let registry = SolutionRegistry::new()
            .with("reverse_string", Target::new(|s: String| s))
            .with("add_two_numbers", Target::new(add));
        let names: Vec<&str> = registry.entry_points().collect();
        assert_eq!(names, vec!["add_two_numbers", "reverse_string"]);
    }
}
