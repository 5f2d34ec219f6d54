//! # Human-readable line rendering shared by the print and file sinks.
//!
//! One event becomes one line:
//!
//! ```text
//! {<pid>} <app> (<time>):  <prefix><description> (step path: <a> / <b>) @ <position> [<itemInfo>]
//! ```
//!
//! The `{<pid>}`, step-path, position and item-info segments appear only
//! when the corresponding event field is present.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::events::LoggingEvent;
use crate::severity::Severity;

/// Rendering options for human-readable lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineStyle {
    /// Indent low-severity lines two spaces per stack level.
    pub step_indentation: bool,
}

/// Renders `event` as a single human-readable line.
pub fn render_line(event: &LoggingEvent, style: LineStyle) -> String {
    let mut line = String::new();
    if let Some(pid) = event.process_id {
        line.push_str(&format!("{{{pid}}} "));
    }
    line.push_str(&event.application_name);
    line.push_str(&format!(" ({}):  ", format_time(event.time)));
    line.push_str(&severity_prefix(
        event.severity,
        event.execution_level(),
        style,
    ));
    line.push_str(event.fact.preferred().unwrap_or_default());
    if !event.effectuation_stack.is_empty() {
        let path: Vec<String> = event
            .effectuation_stack
            .iter()
            .map(|frame| frame.to_string())
            .collect();
        line.push_str(&format!(" (step path: {})", path.join(" / ")));
    }
    if let Some(position) = &event.item_position_info {
        line.push_str(&format!(" @ {position}"));
    }
    if let Some(info) = &event.item_info {
        line.push_str(&format!(" [{info}]"));
    }
    line
}

/// Collapses a rendered line into one physical line for file sinks:
/// `\r` is removed, `\` and `\n` are escaped.
pub fn sanitize_line(line: &str) -> String {
    line.replace('\r', "")
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
}

fn severity_prefix(severity: Severity, level: usize, style: LineStyle) -> String {
    match severity {
        Severity::Debug | Severity::Progress | Severity::Info | Severity::Iteration => {
            if style.step_indentation {
                "  ".repeat(level)
            } else {
                String::new()
            }
        }
        Severity::Warning => "! ".to_string(),
        Severity::Error => "!! ".to_string(),
        Severity::Fatal => "!!! ".to_string(),
        Severity::Loss => "!!!!".to_string(),
        Severity::Deadly => "\u{1F480}".to_string(),
    }
}

fn format_time(millis: u64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis as i64)
        .map(|time| time.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| millis.to_string())
}
