//! Rendering of change lists for stdout

use anyhow::Result;
use clap::ValueEnum;

use crate::git::Change;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One path per line
    #[default]
    Text,
    /// JSON array
    Json,
}

/// Render changes as text or JSON. `with_status` adds the action to each entry.
pub fn render(changes: &[Change], format: OutputFormat, with_status: bool) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for change in changes {
                if with_status {
                    out.push(change.action.letter());
                    out.push('\t');
                }
                out.push_str(&change.path);
                out.push('\n');
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let json = if with_status {
                serde_json::to_string_pretty(changes)?
            } else {
                let paths: Vec<&str> = changes.iter().map(|c| c.path.as_str()).collect();
                serde_json::to_string_pretty(&paths)?
            };
            Ok(format!("{}\n", json))
        }
    }
}
