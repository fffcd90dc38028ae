//! Exercise metadata, the [`Exercise`] contract and the [`Catalog`] registry.

use std::fmt::{self, Debug};

use kata_core::{LoadError, Matcher, PreparedCase, SolutionRegistry, TestCase, bind_all};
use serde::Serialize;
use tracing::debug;

use crate::{mathematics, strings};

/// Topic an exercise belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Arrays,
    Strings,
    Algorithms,
    DataStructures,
    Mathematics,
    Databases,
    Debugging,
    Recursion,
    Sorting,
    Searching,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Arrays => "arrays",
            Category::Strings => "strings",
            Category::Algorithms => "algorithms",
            Category::DataStructures => "data-structures",
            Category::Mathematics => "mathematics",
            Category::Databases => "databases",
            Category::Debugging => "debugging",
            Category::Recursion => "recursion",
            Category::Sorting => "sorting",
            Category::Searching => "searching",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExerciseInfo {
    /// Stable identifier used on the command line (e.g. `add_two_numbers`).
    pub name: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub difficulty: Difficulty,
    /// Name the solution must be registered under.
    pub entry_point: &'static str,
    pub points: u32,
}

/// An exercise that can bind its case table to a registered solution.
pub trait Exercise: Send + Sync {
    fn info(&self) -> &ExerciseInfo;

    fn case_count(&self) -> usize;

    /// Human-readable signature the solution must have.
    fn signature(&self) -> String;

    /// Resolve the solution and bind every case to it, in table order.
    fn prepare(&self, solutions: &SolutionRegistry) -> Result<Vec<PreparedCase>, LoadError>;
}

/// An exercise backed by a literal case table.
pub struct TableExercise<I, O> {
    info: ExerciseInfo,
    cases: fn() -> Vec<TestCase<I, O>>,
    matcher: Matcher<O>,
}

impl<I, O> TableExercise<I, O> {
    pub fn new(info: ExerciseInfo, cases: fn() -> Vec<TestCase<I, O>>, matcher: Matcher<O>) -> Self {
        Self { info, cases, matcher }
    }

    pub fn cases(&self) -> Vec<TestCase<I, O>> {
        (self.cases)()
    }

    pub fn matcher(&self) -> &Matcher<O> {
        &self.matcher
    }
}

impl<I, O> Exercise for TableExercise<I, O>
where
    I: Send + 'static,
    O: Debug + Send + 'static,
{
    fn info(&self) -> &ExerciseInfo {
        &self.info
    }

    fn case_count(&self) -> usize {
        self.cases().len()
    }

    fn signature(&self) -> String {
        kata_core::signature::<I, O>()
    }

    fn prepare(&self, solutions: &SolutionRegistry) -> Result<Vec<PreparedCase>, LoadError> {
        let target = solutions.resolve::<I, O>(self.info.entry_point)?;
        Ok(bind_all(self.cases(), &target, &self.matcher))
    }
}

/// An exercise whose target has been resolved, with its cases ready to run.
#[derive(Debug)]
pub struct LoadedExercise {
    pub info: ExerciseInfo,
    pub cases: Vec<PreparedCase>,
}

/// Registry of exercises, looked up by name.
#[derive(Default)]
pub struct Catalog {
    exercises: Vec<Box<dyn Exercise>>,
}

impl Catalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every built-in exercise.
    pub fn builtin() -> Self {
        Self::new()
            .with_exercise(mathematics::add_two_numbers())
            .with_exercise(mathematics::average_of_list())
            .with_exercise(strings::reverse_a_string())
    }

    /// Add an exercise. An exercise with the same name replaces the earlier one.
    pub fn register(&mut self, exercise: impl Exercise + 'static) {
        let name = exercise.info().name;
        self.exercises.retain(|existing| existing.info().name != name);
        self.exercises.push(Box::new(exercise));
    }

    pub fn with_exercise(mut self, exercise: impl Exercise + 'static) -> Self {
        self.register(exercise);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn Exercise> {
        self.exercises
            .iter()
            .find(|exercise| exercise.info().name == name)
            .map(|exercise| exercise.as_ref())
    }

    /// Exercises in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Exercise> {
        self.exercises.iter().map(|exercise| exercise.as_ref())
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Look up `name` and resolve its solution.
    pub fn load(&self, name: &str, solutions: &SolutionRegistry) -> Result<LoadedExercise, LoadError> {
        let exercise = self
            .get(name)
            .ok_or_else(|| LoadError::UnknownExercise(name.to_string()))?;
        let cases = exercise.prepare(solutions)?;
        debug!(exercise = name, cases = cases.len(), "exercise loaded");
        Ok(LoadedExercise {
            info: exercise.info().clone(),
            cases,
        })
    }
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.exercises.iter().map(|exercise| exercise.info().name))
            .finish()
    }
}
