//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::path::PathBuf;

use couchload_core::PushOutcome;
use serde_json::Value;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print the result of pushes
    pub fn print_pushes(&self, outcomes: &[PushOutcome]) {
        match self.format {
            OutputFormat::Human => {
                for outcome in outcomes {
                    println!("✓ {}", describe_push(outcome));
                }
            }
            OutputFormat::Json => {
                let json: Vec<_> = outcomes.iter().map(push_json).collect();
                println!("{}", Value::Array(json));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an assembled document
    ///
    /// The document is printed in every mode, since it is the output.
    pub fn print_document(&self, document: &Value) {
        match self.format {
            OutputFormat::Json | OutputFormat::Quiet => println!("{}", document),
            OutputFormat::Human => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(document).unwrap_or_else(|_| document.to_string())
                );
            }
        }
    }

    /// Print files created by a scaffold command
    pub fn print_created(&self, what: &str, files: &[PathBuf]) {
        match self.format {
            OutputFormat::Human => {
                println!("✓ Created {}", what);
                for file in files {
                    println!("  {}", file.display());
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "created": what, "files": files})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn describe_push(outcome: &PushOutcome) -> String {
    let revision = outcome.revision.as_deref().unwrap_or("?");
    match outcome.previous_revision {
        None => format!("Created {} (rev {})", outcome.id, revision),
        Some(ref previous) => format!("Updated {} ({} -> {})", outcome.id, previous, revision),
    }
}

fn push_json(outcome: &PushOutcome) -> Value {
    serde_json::json!({
        "id": outcome.id,
        "created": outcome.created(),
        "previous_rev": outcome.previous_revision,
        "rev": outcome.revision,
    })
}
