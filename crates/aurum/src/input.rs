//! Reading post bodies and image lists.

use std::io::Read;
use std::path::Path;

use aurum_renderer::OrderedImage;

use crate::error::CliError;

/// Path argument that selects stdin.
const STDIN_PATH: &str = "-";

/// Read a post body from a file, or from stdin when the path is `-`.
pub(crate) fn read_source(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == STDIN_PATH {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        return Ok(source);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Load the ordered image list from a JSON array of `{url, alt, caption}`.
pub(crate) fn load_images(path: &Path) -> Result<Vec<OrderedImage>, CliError> {
    let content = std::fs::read_to_string(path)?;
    parse_images(&content)
}

fn parse_images(content: &str) -> Result<Vec<OrderedImage>, CliError> {
    let images: Vec<OrderedImage> = serde_json::from_str(content)?;
    if let Some(index) = images.iter().position(|image| image.url.trim().is_empty()) {
        return Err(CliError::Validation(format!(
            "images[{index}].url cannot be empty"
        )));
    }
    tracing::info!(count = images.len(), "Loaded images");
    Ok(images)
}
