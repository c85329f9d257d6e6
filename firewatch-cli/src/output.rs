//! Output formatting for CLI commands

use colored::Colorize;
use firewatch::FirewatchError;
use serde::Serialize;
use std::fmt::Display;

/// Supported output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned columns (default)
    #[default]
    Table,
    /// Pretty-printed JSON on stdout
    Json,
    /// Tab separated, no colour
    Plain,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "plain" => Ok(OutputFormat::Plain),
            _ => Err(format!(
                "Unknown output format '{}'. Valid options: table, json, plain",
                s
            )),
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Plain => write!(f, "plain"),
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Plain => println!("{}", message),
            OutputFormat::Table => println!("{} {}", "✓".green(), message),
        }
    }

    /// Report a failed operation together with its kind and status code.
    pub fn failure(&self, err: &FirewatchError) {
        match self.format {
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "status": "error",
                        "kind": err.kind(),
                        "statusCode": err.status_code(),
                        "message": err.to_string(),
                    })
                );
            }
            OutputFormat::Plain => eprintln!("{} ({}): {}", err.kind(), err.status_code(), err),
            OutputFormat::Table => {
                eprintln!(
                    "{} {} {}",
                    "✗".red(),
                    format!("[{} {}]", err.status_code(), err.kind()).red(),
                    err
                );
            }
        }
    }

    pub fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({"status": "warning", "message": message})
                );
            }
            _ => eprintln!("{} {}", "⚠".yellow(), message),
        }
    }

    pub fn json<T: Serialize>(&self, data: &T) {
        match serde_json::to_string_pretty(data) {
            Ok(json) => println!("{}", json),
            Err(e) => self.warning(&format!("Failed to serialize to JSON: {}", e)),
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::json!({ key: value })),
            OutputFormat::Table => println!("{}: {}", key.cyan(), value),
            OutputFormat::Plain => println!("{}\t{}", key, value),
        }
    }

    /// Print rows under a header, padding every column to its widest cell.
    /// Plain output drops the header and separates cells with tabs.
    pub fn table(&self, columns: &[&str], rows: &[Vec<String>]) {
        match self.format {
            OutputFormat::Json => {}
            OutputFormat::Plain => {
                for row in rows {
                    println!("{}", row.join("\t"));
                }
            }
            OutputFormat::Table => {
                let widths = column_widths(columns, rows);
                let header: Vec<String> = columns
                    .iter()
                    .zip(&widths)
                    .map(|(c, w)| format!("{:<w$}", c, w = *w).bold().to_string())
                    .collect();
                println!("{}", header.join("  "));
                println!("{}", "-".repeat(widths.iter().map(|w| w + 2).sum()));
                for row in rows {
                    let cells: Vec<String> = row
                        .iter()
                        .zip(&widths)
                        .map(|(v, w)| format!("{:<w$}", v, w = *w))
                        .collect();
                    println!("{}", cells.join("  ").trim_end());
                }
            }
        }
    }

    pub fn section(&self, title: &str) {
        match self.format {
            OutputFormat::Table => {
                println!();
                println!("{}", title.bold().underline());
            }
            OutputFormat::Plain => {
                println!();
                println!("{}", title);
            }
            OutputFormat::Json => {}
        }
    }

    pub fn list_item(&self, item: &str) {
        match self.format {
            OutputFormat::Table => println!("  {} {}", "•".cyan(), item),
            _ => println!("{}", item),
        }
    }
}

fn column_widths(columns: &[&str], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|v| v.chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect()
}

/// `"a, b"` for display cells, `-` when empty.
pub fn joined(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
