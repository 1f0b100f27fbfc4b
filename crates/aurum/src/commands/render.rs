//! `aurum render` command implementation.

use std::path::PathBuf;

use aurum_config::{CliSettings, Config};
use aurum_renderer::{Node, RenderResult, TocEntry};
use clap::{Args, ValueEnum};
use serde::Serialize;

use super::html_renderer;
use crate::error::CliError;
use crate::input::{load_images, read_source};
use crate::output::Output;

/// Output format of the render command.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Semantic HTML fragment.
    #[default]
    Html,
    /// Parsed node list with outline and warnings.
    Json,
}

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Markdown post body to render (`-` reads stdin).
    input: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Html)]
    format: Format,

    /// JSON file with the ordered image list for `{{image:N}}` tokens.
    #[arg(long)]
    images: Option<PathBuf>,

    /// Do not add `id` attributes to headings.
    #[arg(long)]
    no_heading_ids: bool,

    /// Base URL for relative image URLs (overrides config).
    #[arg(long, env = "AURUM_IMAGE_BASE_URL")]
    image_base_url: Option<String>,

    /// Path to configuration file (default: auto-discover aurum.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the result to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// JSON document printed by `--format json`.
#[derive(Serialize)]
struct JsonDocument<'a> {
    nodes: &'a [Node],
    toc: &'a [TocEntry],
    warnings: &'a [String],
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, input or image loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            heading_ids: self.no_heading_ids.then_some(false),
            image_base_url: self.image_base_url,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Using configuration");
        }

        let images = match &self.images {
            Some(path) => load_images(path)?,
            None => Vec::new(),
        };
        let source = read_source(&self.input)?;

        let result = html_renderer(&config, images).render(&source);
        for warning in &result.warnings {
            output.warning(&format!("Warning: {warning}"));
        }

        let document = format_result(&result, self.format)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, document)?;
                output.success(&format!("Rendered to {}", path.display()));
            }
            None => output.document(&document)?,
        }
        Ok(())
    }
}

/// Serialize a render result in the requested format.
fn format_result(result: &RenderResult, format: Format) -> Result<String, CliError> {
    match format {
        Format::Html => Ok(result.html.clone()),
        Format::Json => {
            let document = JsonDocument {
                nodes: &result.nodes,
                toc: &result.toc,
                warnings: &result.warnings,
            };
            Ok(serde_json::to_string_pretty(&document)?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurum_renderer::{HtmlBackend, MarkdownRenderer};
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> RenderResult {
        MarkdownRenderer::<HtmlBackend>::new().render(markdown)
    }

    #[test]
    fn test_format_html() {
        let result = render("Hello **world**");
        assert_eq!(
            format_result(&result, Format::Html).unwrap(),
            "<p>Hello <strong>world</strong></p>"
        );
    }

    #[test]
    fn test_format_json() {
        let result = render("## Rates\n- 22K");
        let json: serde_json::Value =
            serde_json::from_str(&format_result(&result, Format::Json).unwrap()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "nodes": [
                    {"heading": {"level": 2, "text": [{"plain_text": "Rates"}]}},
                    {"list": {"ordered": false, "items": [[{"plain_text": "22K"}]]}}
                ],
                "toc": [{"level": 2, "title": "Rates", "id": "rates"}],
                "warnings": []
            })
        );
    }

    #[test]
    fn test_format_json_includes_warnings() {
        let result = render("```\nnever closed");
        let json: serde_json::Value =
            serde_json::from_str(&format_result(&result, Format::Json).unwrap()).unwrap();

        assert_eq!(json["nodes"], serde_json::json!([]));
        assert_eq!(json["warnings"].as_array().unwrap().len(), 1);
    }
}
