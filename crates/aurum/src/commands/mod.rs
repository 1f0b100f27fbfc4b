//! CLI command implementations.

pub(crate) mod outline;
pub(crate) mod render;

pub(crate) use outline::OutlineArgs;
pub(crate) use render::RenderArgs;

use aurum_config::Config;
use aurum_renderer::{HtmlBackend, MarkdownRenderer, OrderedImage};

/// Build an HTML renderer from loaded configuration.
fn html_renderer(config: &Config, images: Vec<OrderedImage>) -> MarkdownRenderer<HtmlBackend> {
    let renderer = MarkdownRenderer::new()
        .with_images(images)
        .with_heading_ids(config.render.heading_ids)
        .with_external_links_new_tab(config.render.external_links_new_tab);

    match &config.images.base_url {
        Some(base_url) => renderer.with_image_base_url(base_url.as_str()),
        None => renderer,
    }
}
