//! Reporting collaborators.
//!
//! The driver never prints. It hands each [`GenerationSummary`] to a
//! [`Reporter`] as soon as the generation has been evaluated; what happens
//! next (structured log events, a text report, nothing) is up to the
//! reporter.

use super::runner::GenerationSummary;
use std::io::{self, Write};

/// Consumes generation summaries as they are produced.
///
/// Any `FnMut(&GenerationSummary)` closure is a reporter.
pub trait Reporter {
    /// Called once per generation, in generation order.
    fn report(&mut self, summary: &GenerationSummary);
}

impl<F: FnMut(&GenerationSummary)> Reporter for F {
    fn report(&mut self, summary: &GenerationSummary) {
        self(summary)
    }
}

/// Emits each summary as a structured `tracing` event at INFO level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&mut self, summary: &GenerationSummary) {
        tracing::info!(
            generation = summary.generation + 1,
            best_fitness = summary.best_fitness,
            auxiliary = summary.auxiliary,
            chromosome = %summary.best,
            "generation best"
        );
    }
}

/// Writes a human-readable block per generation to any [`Write`] sink.
///
/// Write errors do not interrupt the run; the first one is kept and
/// returned by [`into_inner`](Self::into_inner).
#[derive(Debug)]
pub struct TextReporter<W: Write> {
    writer: W,
    error: Option<io::Error>,
}

impl<W: Write> TextReporter<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            error: None,
        }
    }

    /// Returns the writer, or the first write error encountered.
    pub fn into_inner(self) -> io::Result<W> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.writer),
        }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, summary: &GenerationSummary) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = write_summary(&mut self.writer, summary) {
            self.error = Some(err);
        }
    }
}

const RULE_WIDTH: usize = 50;

/// Writes a complete report for a finished run: a header followed by one
/// block per summary.
pub fn write_report<W: Write>(writer: &mut W, summaries: &[GenerationSummary]) -> io::Result<()> {
    writeln!(writer, "Genetic Algorithm Results:")?;
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;
    for summary in summaries {
        write_summary(writer, summary)?;
    }
    Ok(())
}

/// Writes one generation block. Generations are numbered from 1.
pub fn write_summary<W: Write>(writer: &mut W, summary: &GenerationSummary) -> io::Result<()> {
    writeln!(writer, "Generation {}:", summary.generation + 1)?;
    writeln!(writer, "  Best fitness: {}", summary.best_fitness)?;
    if let Some(aux) = summary.auxiliary {
        writeln!(writer, "  Auxiliary: {aux:.2}")?;
    }
    writeln!(writer, "  Chromosome: {}", summary.best)?;
    writeln!(writer, "{}", "-".repeat(RULE_WIDTH))
}
