mod block;
mod config;
mod error;
pub mod html;
pub mod pretty;

pub use block::{Block, BlockType, Image, ListFormat};
pub use config::{CodeConfig, Config, OutputConfig};
pub use error::Error;
pub use html::{BlockRenderer, DefaultRenderer, HtmlRenderer, RenderOptions};
pub use pretty::{Indenter, PostFormat, Verbatim};

/// Parse a JSON array of blocks.
pub fn parse(json: &str) -> Result<Vec<Block>, Error> {
    Ok(serde_json::from_str(json)?)
}

/// Render blocks to indented HTML using the default rules.
///
/// # Panics
///
/// Panics if a `text` block has no `text` payload; see [`try_render`].
pub fn render(blocks: &[Block]) -> String {
    render_with(blocks, &DefaultRenderer, &Indenter::default())
}

/// Render blocks with a custom renderer and post-format step.
pub fn render_with<R, F>(blocks: &[Block], renderer: &R, formatter: &F) -> String
where
    R: BlockRenderer + ?Sized,
    F: PostFormat + ?Sized,
{
    formatter.format(&renderer.render_blocks(blocks))
}

/// Render blocks to indented HTML, returning an error instead of panicking.
pub fn try_render(blocks: &[Block]) -> Result<String, Error> {
    try_render_with(blocks, &DefaultRenderer, &Indenter::default())
}

/// Render blocks with a custom renderer and post-format step, returning an
/// error instead of panicking.
pub fn try_render_with<R, F>(
    blocks: &[Block],
    renderer: &R,
    formatter: &F,
) -> Result<String, Error>
where
    R: BlockRenderer + ?Sized,
    F: PostFormat + ?Sized,
{
    Ok(formatter.format(&renderer.try_render_blocks(blocks)?))
}

/// Convert a JSON block document to HTML using the default config.
pub fn render_json(json: &str) -> Result<String, Error> {
    render_json_with_config(json, &Config::compiled_default())
}

/// Convert a JSON block document to HTML with custom config.
pub fn render_json_with_config(json: &str, config: &Config) -> Result<String, Error> {
    let blocks = parse(json)?;
    try_render_with(&blocks, &config.renderer(), config.post_formatter().as_ref())
}
