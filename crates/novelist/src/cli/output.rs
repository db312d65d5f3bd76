//! Terminal output helpers.

use novelist_error::{JsonError, NovelistResult};
use novelist_storage::RecordSummary;
use serde::Serialize;

/// Pretty-print any record as JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> NovelistResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// One listing line per record.
pub fn format_summary(summary: &RecordSummary) -> String {
    let mut line = format!("{}  {}", summary.id, summary.name);
    if let Some(role) = summary
        .basic_info
        .as_ref()
        .and_then(|info| info.get("role"))
        .and_then(|role| role.as_str())
    {
        line.push_str(&format!(" ({})", role));
    }
    if !summary.created_at.is_empty() {
        line.push_str(&format!("  created {}", summary.created_at));
    }
    line
}

pub fn print_summaries(label: &str, summaries: &[RecordSummary]) {
    if summaries.is_empty() {
        println!("No {} stored", label);
        return;
    }
    println!("{:-<80}", "");
    for summary in summaries {
        println!("{}", format_summary(summary));
    }
    println!("{:-<80}", "");
    println!("Total: {} {}", summaries.len(), label);
}
