//! `aurum outline` command implementation.

use std::fmt::Write;
use std::path::PathBuf;

use aurum_config::Config;
use aurum_renderer::TocEntry;
use clap::Args;

use super::html_renderer;
use crate::error::CliError;
use crate::input::read_source;
use crate::output::Output;

/// Arguments for the outline command.
#[derive(Args)]
pub(crate) struct OutlineArgs {
    /// Markdown post body (`-` reads stdin).
    input: PathBuf,

    /// Path to configuration file (default: auto-discover aurum.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl OutlineArgs {
    /// Execute the outline command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or input loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;
        let source = read_source(&self.input)?;

        let result = html_renderer(&config, Vec::new()).render(&source);
        if result.toc.is_empty() {
            output.warning("No headings found");
            return Ok(());
        }
        output.document(&format_outline(&result.toc))?;
        Ok(())
    }
}

/// One line per heading, indented by level below `##`.
fn format_outline(toc: &[TocEntry]) -> String {
    let mut out = String::new();
    for entry in toc {
        let indent = "  ".repeat(usize::from(entry.level.saturating_sub(2)));
        writeln!(out, "{indent}{} #{}", entry.title, entry.id).unwrap();
    }
    out
}
