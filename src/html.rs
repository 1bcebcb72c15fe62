//! Block tree → HTML rendering rules.
//!
//! Every block type has its own method on [`BlockRenderer`]. The provided
//! implementations delegate to the `render_*` functions in this module, so an
//! implementor can swap out a single rule (say, image URLs pointing at a CDN)
//! and keep every other rule as is.

use html_escape::encode_double_quoted_attribute;

use crate::block::{Block, BlockType, ListFormat};
use crate::error::Error;

/// Emitted in place of a block whose `type` is not recognised.
pub const UNSUPPORTED_BLOCK: &str = "unsupported block type";
/// Emitted in place of a list without a valid `format`.
pub const UNSUPPORTED_LIST: &str = "unsupported list";
/// Emitted in place of an image block without an `image` payload.
pub const MISSING_IMAGE: &str = "missing image";

/// Renders blocks to HTML fragments, one overridable method per block type.
pub trait BlockRenderer {
    /// Dispatch a single block to the rule for its type.
    fn write_block(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        match block.kind {
            BlockType::Paragraph => self.paragraph(block, out),
            BlockType::Text => self.text(block, out),
            BlockType::List => self.list(block, out),
            BlockType::ListItem => self.list_item(block, out),
            BlockType::Heading => self.heading(block, out),
            BlockType::Link => self.link(block, out),
            BlockType::Image => self.image(block, out),
            BlockType::Quote => self.quote(block, out),
            BlockType::Code => self.code(block, out),
            BlockType::Unsupported => self.unsupported(block, out),
        }
    }

    fn write_blocks(&self, blocks: &[Block], out: &mut String) -> Result<(), Error> {
        for block in blocks {
            self.write_block(block, out)?;
        }
        Ok(())
    }

    /// Render a block sequence, failing on a `text` block without text.
    fn try_render_blocks(&self, blocks: &[Block]) -> Result<String, Error> {
        let mut out = String::new();
        self.write_blocks(blocks, &mut out)?;
        Ok(out)
    }

    /// Render a block sequence.
    ///
    /// # Panics
    ///
    /// Panics if a `text` block has no `text` payload. Use
    /// [`BlockRenderer::try_render_blocks`] to get an error instead.
    fn render_blocks(&self, blocks: &[Block]) -> String {
        self.try_render_blocks(blocks)
            .unwrap_or_else(|e| panic!("cannot render block tree: {e}"))
    }

    fn paragraph(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_paragraph(self, block, out)
    }

    fn text(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_text(block, out)
    }

    fn list(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_list(self, block, out)
    }

    fn list_item(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_list_item(self, block, out)
    }

    fn heading(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_heading(self, block, out)
    }

    fn link(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_link(self, block, out)
    }

    fn image(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_image(block, out);
        Ok(())
    }

    fn quote(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_quote(self, block, out)
    }

    fn code(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        render_code(self, block, out)
    }

    fn unsupported(&self, _block: &Block, out: &mut String) -> Result<(), Error> {
        out.push_str(UNSUPPORTED_BLOCK);
        Ok(())
    }
}

/// Renderer using every default rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRenderer;

impl BlockRenderer for DefaultRenderer {}

/// Switches on behaviour beyond the default rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit `class="language-<lang>"` on code blocks that carry a language.
    pub code_language_class: bool,
}

/// Renderer driven by [`RenderOptions`].
///
/// With default options the output is identical to [`DefaultRenderer`].
#[derive(Debug, Clone, Default)]
pub struct HtmlRenderer {
    options: RenderOptions,
}

impl HtmlRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }
}

impl BlockRenderer for HtmlRenderer {
    fn code(&self, block: &Block, out: &mut String) -> Result<(), Error> {
        let language = block
            .language
            .as_deref()
            .filter(|lang| self.options.code_language_class && !lang.is_empty());

        let Some(language) = language else {
            return render_code(self, block, out);
        };

        out.push_str("<pre><code class=\"language-");
        out.push_str(&encode_double_quoted_attribute(language));
        out.push_str("\">");
        self.write_blocks(block.children(), out)?;
        out.push_str("</code></pre>");
        Ok(())
    }
}

fn wrap_children<R: BlockRenderer + ?Sized>(
    renderer: &R,
    tag: &str,
    block: &Block,
    out: &mut String,
) -> Result<(), Error> {
    out.push('<');
    out.push_str(tag);
    out.push('>');
    renderer.write_blocks(block.children(), out)?;
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    Ok(())
}

/// `<p>` around the children, or `<br />` for a paragraph holding a single
/// empty text block.
pub fn render_paragraph<R: BlockRenderer + ?Sized>(
    renderer: &R,
    block: &Block,
    out: &mut String,
) -> Result<(), Error> {
    if matches!(block.children(), [only] if only.is_empty_text()) {
        out.push_str("<br />");
        return Ok(());
    }
    wrap_children(renderer, "p", block, out)
}

/// The literal text inside its formatting wrappers, bold outermost and
/// inline code innermost.
pub fn render_text(block: &Block, out: &mut String) -> Result<(), Error> {
    let text = block.text.as_deref().ok_or(Error::MissingText)?;

    let tags: Vec<&str> = [
        (block.bold, "strong"),
        (block.italic, "em"),
        (block.underline, "u"),
        (block.strikethrough, "del"),
        (block.code, "code"),
    ]
    .into_iter()
    .filter(|(flag, _)| *flag == Some(true))
    .map(|(_, tag)| tag)
    .collect();

    for tag in &tags {
        out.push('<');
        out.push_str(tag);
        out.push('>');
    }
    out.push_str(text);
    for tag in tags.iter().rev() {
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
    Ok(())
}

pub fn render_list<R: BlockRenderer + ?Sized>(
    renderer: &R,
    block: &Block,
    out: &mut String,
) -> Result<(), Error> {
    match block.list_format() {
        Some(ListFormat::Unordered) => wrap_children(renderer, "ul", block, out),
        Some(ListFormat::Ordered) => wrap_children(renderer, "ol", block, out),
        None => {
            out.push_str(UNSUPPORTED_LIST);
            Ok(())
        }
    }
}

pub fn render_list_item<R: BlockRenderer + ?Sized>(
    renderer: &R,
    block: &Block,
    out: &mut String,
) -> Result<(), Error> {
    wrap_children(renderer, "li", block, out)
}

/// `<h1>`..`<h6>` around the children. Without a usable level the block's
/// raw text is emitted instead.
pub fn render_heading<R: BlockRenderer + ?Sized>(
    renderer: &R,
    block: &Block,
    out: &mut String,
) -> Result<(), Error> {
    match block.level {
        Some(level @ 1..=6) => wrap_children(renderer, &format!("h{level}"), block, out),
        _ => {
            out.push_str(block.text.as_deref().unwrap_or_default());
            Ok(())
        }
    }
}

pub fn render_link<R: BlockRenderer + ?Sized>(
    renderer: &R,
    block: &Block,
    out: &mut String,
) -> Result<(), Error> {
    let href = block.url.as_deref().unwrap_or("#");

    out.push_str("<a href=\"");
    out.push_str(&encode_double_quoted_attribute(href));
    out.push_str("\">");
    renderer.write_blocks(block.children(), out)?;
    out.push_str("</a>");
    Ok(())
}

pub fn render_image(block: &Block, out: &mut String) {
    let Some(image) = &block.image else {
        out.push_str(MISSING_IMAGE);
        return;
    };

    out.push_str("<img src=\"");
    out.push_str(&encode_double_quoted_attribute(&image.url));
    out.push_str("\" alt=\"");
    out.push_str(&encode_double_quoted_attribute(&image.alternative_text));
    out.push_str("\" />");
}

pub fn render_quote<R: BlockRenderer + ?Sized>(
    renderer: &R,
    block: &Block,
    out: &mut String,
) -> Result<(), Error> {
    wrap_children(renderer, "blockquote", block, out)
}

/// `<pre><code>` around the children. The block's language is not rendered.
pub fn render_code<R: BlockRenderer + ?Sized>(
    renderer: &R,
    block: &Block,
    out: &mut String,
) -> Result<(), Error> {
    out.push_str("<pre>");
    wrap_children(renderer, "code", block, out)?;
    out.push_str("</pre>");
    Ok(())
}
