//! Export functionality for timelines
//!
//! Supports multiple output formats:
//! - RON (Rust Object Notation) - default, always available
//! - JSON - requires the `serde_json` feature
//! - CSV - label and timestamp columns for spreadsheets
//! - Text - human-readable summary

use crate::error::{Error, Result};
use crate::status::LogEntry;
use crate::timeline::Timeline;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// RON format (default)
    Ron,
    /// JSON format (requires the `serde_json` feature)
    Json,
    /// CSV format
    Csv,
    /// Human-readable text
    Text,
}

/// Exports a timeline's history in various formats
///
/// The exporter borrows the timeline, so exports always reflect its state
/// at the moment the method is called.
pub struct LogExporter<'a, S: 'static> {
    timeline: &'a Timeline<S>,
}

/// Serializable envelope written by the structured formats
#[derive(Serialize)]
struct ExportData<S> {
    version: u32,
    stats: ExportStats,
    entries: Vec<LogEntry<S>>,
}

#[derive(Serialize)]
struct ExportStats {
    total_entries: usize,
    cursor: Option<usize>,
    capacity: usize,
    oldest_recorded_at: Option<DateTime<Utc>>,
    newest_recorded_at: Option<DateTime<Utc>>,
}

impl<'a, S> LogExporter<'a, S>
where
    S: Serialize + 'static,
{
    /// Create an exporter for the given timeline
    pub fn new(timeline: &'a Timeline<S>) -> Self {
        Self { timeline }
    }

    /// Export in the requested format
    pub fn export(&self, format: ExportFormat) -> Result<String> {
        match format {
            ExportFormat::Ron => self.to_ron(),
            ExportFormat::Json => self.to_json(),
            ExportFormat::Csv => self.to_csv(),
            ExportFormat::Text => self.to_text(),
        }
    }

    /// Export in the requested format to a writer
    pub fn export_to<W: Write>(&self, writer: &mut W, format: ExportFormat) -> Result<()> {
        let content = self.export(format)?;
        writer.write_all(content.as_bytes())?;
        Ok(())
    }

    /// Export as RON
    pub fn to_ron(&self) -> Result<String> {
        let data = self.export_data();
        ron::ser::to_string_pretty(&data, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Export as JSON
    #[cfg(feature = "serde_json")]
    pub fn to_json(&self) -> Result<String> {
        let data = self.export_data();
        serde_json::to_string_pretty(&data).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Export as JSON (unavailable without the `serde_json` feature)
    #[cfg(not(feature = "serde_json"))]
    pub fn to_json(&self) -> Result<String> {
        Err(Error::ExportError(
            "JSON export requires the 'serde_json' feature".to_string(),
        ))
    }

    /// Export as CSV, newest entry first
    pub fn to_csv(&self) -> Result<String> {
        let history = self.timeline.history();
        let newest_index = history.len().saturating_sub(1);

        let mut out = String::from("index,label,recorded_at\n");
        for (row, entry) in history.iter().enumerate() {
            out.push_str(&format!(
                "{},{},{}\n",
                newest_index - row,
                csv_field(&entry.label),
                entry.recorded_at.to_rfc3339()
            ));
        }
        Ok(out)
    }

    /// Export as human-readable text, newest entry first
    pub fn to_text(&self) -> Result<String> {
        let stats = self.timeline.stats();
        let history = self.timeline.history();
        let newest_index = history.len().saturating_sub(1);

        let mut out = String::from("=== Timeline Export ===\n");
        out.push_str(&format!("Entries: {}\n", stats.total_entries));
        if let Some(cursor) = stats.cursor {
            out.push_str(&format!("Active entry: {}\n", cursor));
        }
        if stats.capacity > 0 {
            out.push_str(&format!("Capacity: {}\n", stats.capacity));
        } else {
            out.push_str("Capacity: unlimited\n");
        }
        out.push('\n');

        for (row, entry) in history.iter().enumerate() {
            let index = newest_index - row;
            let marker = if Some(index) == stats.cursor { '*' } else { ' ' };
            out.push_str(&format!(
                "[{}] {:>3}  {}  {}\n",
                marker,
                index,
                entry.recorded_at.format("%Y-%m-%d %H:%M:%S"),
                entry.label
            ));
        }
        Ok(out)
    }

    fn export_data(&self) -> ExportData<S> {
        let stats = self.timeline.stats();
        ExportData {
            version: 1,
            stats: ExportStats {
                total_entries: stats.total_entries,
                cursor: stats.cursor,
                capacity: stats.capacity,
                oldest_recorded_at: stats.oldest_recorded_at,
                newest_recorded_at: stats.newest_recorded_at,
            },
            entries: self.timeline.history(),
        }
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
