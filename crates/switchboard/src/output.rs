//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use switchboard_core::TrainingStatus;

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Training status, colored by outcome when `color` is set.
pub fn paint_status(status: TrainingStatus, color: bool) -> String {
    let text = status.to_string();
    if !color {
        return text;
    }
    match status {
        TrainingStatus::Pending => text.dimmed().to_string(),
        TrainingStatus::Running => text.cyan().to_string(),
        TrainingStatus::Succeeded => text.green().to_string(),
        TrainingStatus::Failed => text.red().to_string(),
    }
}

/// `on`/`off`, colored when `color` is set.
pub fn paint_power(on: bool, color: bool) -> String {
    match (on, color) {
        (true, true) => "on".yellow().to_string(),
        (false, true) => "off".dimmed().to_string(),
        (true, false) => "on".into(),
        (false, false) => "off".into(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses `detail_fn`, since detail views are key/value
/// blocks rather than rows.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(|e| CliError::Internal(format!("JSON serialization failed: {e}")))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data)
        .map_err(|e| CliError::Internal(format!("YAML serialization failed: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: u32,
        name: &'static str,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "ID")]
        id: u32,
        #[tabled(rename = "Name")]
        name: &'static str,
    }

    fn items() -> Vec<Item> {
        vec![Item { id: 1, name: "desk" }, Item { id: 2, name: "porch" }]
    }

    fn render(format: &OutputFormat) -> String {
        render_list(
            format,
            &items(),
            |i| Row {
                id: i.id,
                name: i.name,
            },
            |i| i.id.to_string(),
        )
        .unwrap()
    }

    #[test]
    fn plain_lists_one_id_per_line() {
        assert_eq!(render(&OutputFormat::Plain), "1\n2");
    }

    #[test]
    fn compact_json_is_single_line() {
        assert_eq!(
            render(&OutputFormat::JsonCompact),
            r#"[{"id":1,"name":"desk"},{"id":2,"name":"porch"}]"#
        );
    }

    #[test]
    fn table_has_headers() {
        let table = render(&OutputFormat::Table);
        assert!(table.contains("ID"));
        assert!(table.contains("porch"));
    }

    #[test]
    fn uncolored_status_is_plain_text() {
        assert_eq!(paint_status(TrainingStatus::Failed, false), "failed");
        assert_eq!(paint_power(true, false), "on");
    }
}
