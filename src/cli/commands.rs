//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::io::{self, Write};
use std::time::Duration;

use kata_core::SolutionRegistry;
use kata_exercises::{Catalog, ExerciseInfo};
use serde::Serialize;
use tracing::{debug, warn};

use crate::report::{CaseReporter, ConsoleReporter, JsonReporter, MarkerStyle, ReportFormat};
use crate::verifier::config::clamp_timeout;
use crate::verifier::{Verifier, VerifierConfig, VerifyError};

use super::{CliError, CliResult, ExitCode};

/// Flags of `kata run`.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub timeout_ms: Option<u64>,
    pub no_timeout: bool,
    pub capture_traces: bool,
    pub markers: MarkerStyle,
    pub format: ReportFormat,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            timeout_ms: None,
            no_timeout: false,
            capture_traces: VerifierConfig::default().capture_traces,
            markers: MarkerStyle::default(),
            format: ReportFormat::default(),
        }
    }
}

impl RunOptions {
    pub fn verifier_config(&self) -> VerifierConfig {
        let config = VerifierConfig::new().with_traces(self.capture_traces);
        if self.no_timeout {
            return config.without_timeout();
        }
        match self.timeout_ms {
            Some(ms) => {
                let requested = Duration::from_millis(ms);
                let clamped = clamp_timeout(requested);
                if clamped != requested {
                    warn!(
                        requested_ms = ms,
                        used_ms = clamped.as_millis() as u64,
                        "case timeout out of range; clamped"
                    );
                }
                config.with_timeout(requested)
            }
            None => config,
        }
    }
}

// ============================================================================
// run
// ============================================================================

/// Verify the registered solution of `exercise` and report to stdout.
///
/// A load failure has already been reported as a single `FAIL:` line (or a JSON document) when this returns.
pub fn run_exercise(
    catalog: &Catalog,
    solutions: &SolutionRegistry,
    exercise: &str,
    options: &RunOptions,
) -> CliResult<ExitCode> {
    let verifier = Verifier::new(options.verifier_config());
    debug!(exercise, config = ?verifier.config(), "starting verification");

    let mut reporter: Box<dyn CaseReporter> = match options.format {
        ReportFormat::Text => Box::new(ConsoleReporter::stdio(options.markers)),
        ReportFormat::Json => Box::new(JsonReporter::stdio()),
    };

    match verifier.verify(catalog, solutions, exercise, reporter.as_mut()) {
        Ok(summary) => Ok(ExitCode(summary.exit_code())),
        Err(VerifyError::Load(_)) => Ok(ExitCode::FAILURE),
        Err(VerifyError::Io(e)) => Err(CliError::failure(format!("Error: failed to write report: {e}"))),
    }
}

// ============================================================================
// list
// ============================================================================

/// One catalog entry of `kata list --format json`.
#[derive(Debug, Serialize)]
struct CatalogEntry<'a> {
    #[serde(flatten)]
    info: &'a ExerciseInfo,
    cases: usize,
    signature: String,
}

/// Print the exercise catalog.
pub fn list_exercises(catalog: &Catalog, format: ReportFormat) -> CliResult<ExitCode> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = match format {
        ReportFormat::Text => write_catalog(&mut out, catalog),
        ReportFormat::Json => write_catalog_json(&mut out, catalog),
    };
    written.map_err(|e| CliError::failure(format!("Error: failed to write catalog: {e}")))?;
    Ok(ExitCode::SUCCESS)
}

fn write_catalog_json(out: &mut dyn Write, catalog: &Catalog) -> io::Result<()> {
    let entries: Vec<CatalogEntry<'_>> = catalog
        .iter()
        .map(|exercise| CatalogEntry {
            info: exercise.info(),
            cases: exercise.case_count(),
            signature: exercise.signature(),
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    out.flush()
}

fn write_catalog(out: &mut dyn Write, catalog: &Catalog) -> io::Result<()> {
    for exercise in catalog.iter() {
        let info = exercise.info();
        writeln!(
            out,
            "{:<20} {:<14} {:<8} {} cases  {}: {}",
            info.name,
            info.category.as_str(),
            info.difficulty.as_str(),
            exercise.case_count(),
            info.entry_point,
            exercise.signature(),
        )?;
    }
    out.flush()
}
