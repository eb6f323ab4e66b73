//! Terminal output
//!
//! Writes each committed view to a terminal stream, either as colored text
//! or as one JSON object per line.

use colored::*;
use std::io::{self, Write};
use tracing::warn;
use trip_core::view::{SectionBody, TripView};
use trip_core::{FailureKind, View, ViewSink};

use crate::config::OutputFormat;

pub struct TerminalSink<W: Write + Send> {
    out: W,
    format: OutputFormat,
}

impl TerminalSink<io::Stdout> {
    pub fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W: Write + Send> TerminalSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_view(&mut self, view: &View) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.out, view)?;
                writeln!(self.out)
            }
            OutputFormat::Text => self.write_text(view),
        }?;
        self.out.flush()
    }

    fn write_text(&mut self, view: &View) -> io::Result<()> {
        match view {
            View::Loading { message } => writeln!(self.out, "{}", message.dimmed()),
            View::Processing {
                request_id,
                attempt,
                message,
            } => writeln!(
                self.out,
                "{} {} {}",
                "…".cyan(),
                message.dimmed(),
                format!("(request {}, check #{})", request_id, attempt).dimmed()
            ),
            View::Retrying { attempt, message } => writeln!(
                self.out,
                "{} {}",
                message.yellow(),
                format!("(check #{})", attempt).dimmed()
            ),
            View::Text { title, lines } => {
                writeln!(self.out, "{}", title.bold())?;
                writeln!(self.out, "{}", "─".repeat(60).dimmed())?;
                for line in lines {
                    writeln!(self.out, "{}", line)?;
                }
                Ok(())
            }
            View::Trip(trip) => self.write_trip(trip),
            View::Failure { kind, message } => {
                let label = match kind {
                    FailureKind::Validation => "✗ Invalid input:",
                    FailureKind::Timeout => "✗ Timed out:",
                    _ => "✗",
                };
                writeln!(self.out, "{} {}", label.red().bold(), message.red())
            }
        }
    }

    fn write_trip(&mut self, trip: &TripView) -> io::Result<()> {
        writeln!(self.out, "{}", "Your Trip Plan".bold())?;

        for section in &trip.sections {
            writeln!(self.out)?;
            writeln!(self.out, "{}", section.title.cyan().bold())?;
            match &section.body {
                SectionBody::Prose { lines } => {
                    for line in lines {
                        writeln!(self.out, "  {}", line)?;
                    }
                }
                SectionBody::List { items } => {
                    for item in items {
                        writeln!(self.out, "  {} {}", "▸".cyan(), item)?;
                    }
                }
            }
        }

        if let Some(link) = &trip.pdf_link {
            writeln!(self.out)?;
            writeln!(self.out, "{}: {}", link.label.green().bold(), link.href)?;
        }

        Ok(())
    }
}

impl<W: Write + Send> ViewSink for TerminalSink<W> {
    fn commit(&mut self, view: View) {
        if let Err(e) = self.write_view(&view) {
            warn!("Failed to write output: {}", e);
        }
    }
}
