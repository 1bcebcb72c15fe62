use serde::{Deserialize, Deserializer, Serialize};

/// Discriminant selecting the rendering rule for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockType {
    Paragraph,
    Text,
    List,
    ListItem,
    Heading,
    Link,
    Image,
    Quote,
    Code,
    /// Any `type` value outside the known set.
    #[serde(other)]
    Unsupported,
}

/// Marker style of a `list` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Unordered,
    Ordered,
}

impl ListFormat {
    pub fn parse(format: &str) -> Option<Self> {
        match format {
            "unordered" => Some(ListFormat::Unordered),
            "ordered" => Some(ListFormat::Ordered),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ListFormat::Unordered => "unordered",
            ListFormat::Ordered => "ordered",
        }
    }
}

/// Uploaded image attached to an `image` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "alternativeText", deserialize_with = "null_as_empty")]
    pub alternative_text: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub url: String,
}

/// Upload payloads send `null` for unset strings.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A node of the editor's block tree.
///
/// Every attribute is optional and only meaningful for some block types;
/// absent fields stay `None` so "not specified" is never confused with
/// `false` or the empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    /// Language of a `code` block. Not rendered unless enabled in the config.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl Block {
    /// A block of the given type with every attribute absent.
    pub fn new(kind: BlockType) -> Self {
        Self {
            kind,
            children: None,
            text: None,
            bold: None,
            italic: None,
            underline: None,
            strikethrough: None,
            code: None,
            format: None,
            url: None,
            level: None,
            image: None,
            language: None,
        }
    }

    fn with_children(kind: BlockType, children: Vec<Block>) -> Self {
        Self {
            children: Some(children),
            ..Self::new(kind)
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(BlockType::Text)
        }
    }

    pub fn paragraph(children: Vec<Block>) -> Self {
        Self::with_children(BlockType::Paragraph, children)
    }

    pub fn heading(level: i64, children: Vec<Block>) -> Self {
        Self {
            level: Some(level),
            ..Self::with_children(BlockType::Heading, children)
        }
    }

    pub fn list(format: ListFormat, children: Vec<Block>) -> Self {
        Self {
            format: Some(format.as_str().to_string()),
            ..Self::with_children(BlockType::List, children)
        }
    }

    pub fn list_item(children: Vec<Block>) -> Self {
        Self::with_children(BlockType::ListItem, children)
    }

    pub fn link(url: impl Into<String>, children: Vec<Block>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::with_children(BlockType::Link, children)
        }
    }

    pub fn image(image: Image) -> Self {
        Self {
            image: Some(image),
            ..Self::new(BlockType::Image)
        }
    }

    pub fn quote(children: Vec<Block>) -> Self {
        Self::with_children(BlockType::Quote, children)
    }

    pub fn code_block(children: Vec<Block>) -> Self {
        Self::with_children(BlockType::Code, children)
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = Some(true);
        self
    }

    pub fn inline_code(mut self) -> Self {
        self.code = Some(true);
        self
    }

    /// Child blocks, empty when none were given.
    pub fn children(&self) -> &[Block] {
        self.children.as_deref().unwrap_or_default()
    }

    /// Parsed list format, `None` when absent or not a known format.
    pub fn list_format(&self) -> Option<ListFormat> {
        self.format.as_deref().and_then(ListFormat::parse)
    }

    /// True for a `text` block whose text is absent or empty.
    ///
    /// Editors encode a deliberately blank line as a paragraph holding
    /// exactly one such block.
    pub fn is_empty_text(&self) -> bool {
        self.kind == BlockType::Text && self.text.as_deref().is_none_or(str::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_known_types() {
        let block: Block = serde_json::from_str(r#"{"type": "list-item"}"#).unwrap();
        assert_eq!(block.kind, BlockType::ListItem);
        assert!(block.children().is_empty());
    }

    #[test]
    fn unknown_type_is_unsupported() {
        let block: Block = serde_json::from_str(r#"{"type": "table", "rows": 3}"#).unwrap();
        assert_eq!(block.kind, BlockType::Unsupported);
    }

    #[test]
    fn null_children_are_absent() {
        let block: Block =
            serde_json::from_str(r#"{"type": "paragraph", "children": null}"#).unwrap();
        assert_eq!(block.children, None);
        assert!(block.children().is_empty());
    }

    #[test]
    fn flags_keep_absent_and_false_apart() {
        let block: Block =
            serde_json::from_str(r#"{"type": "text", "text": "x", "bold": false}"#).unwrap();
        assert_eq!(block.bold, Some(false));
        assert_eq!(block.italic, None);
    }

    #[test]
    fn image_payload_uses_camel_case_alt() {
        let block: Block = serde_json::from_str(
            r#"{"type": "image", "image": {"name": "n.jpg", "alternativeText": "alt", "url": "/n.jpg", "width": 10}}"#,
        )
        .unwrap();
        assert_eq!(
            block.image,
            Some(Image {
                name: "n.jpg".to_string(),
                alternative_text: "alt".to_string(),
                url: "/n.jpg".to_string(),
            })
        );
    }

    #[test]
    fn null_image_fields_are_empty() {
        let block: Block = serde_json::from_str(
            r#"{"type": "image", "image": {"name": null, "alternativeText": null, "url": "/a.jpg"}}"#,
        )
        .unwrap();
        let image = block.image.unwrap();
        assert_eq!(image.name, "");
        assert_eq!(image.alternative_text, "");
        assert_eq!(image.url, "/a.jpg");
    }

    #[test]
    fn empty_text_detection() {
        assert!(Block::text("").is_empty_text());
        assert!(Block::new(BlockType::Text).is_empty_text());
        assert!(!Block::text(" ").is_empty_text());
        assert!(!Block::paragraph(vec![]).is_empty_text());
    }

    #[test]
    fn list_format_parsing() {
        assert_eq!(
            Block::list(ListFormat::Ordered, vec![]).list_format(),
            Some(ListFormat::Ordered)
        );

        let mut list = Block::new(BlockType::List);
        assert_eq!(list.list_format(), None);
        list.format = Some("checklist".to_string());
        assert_eq!(list.list_format(), None);
    }

    #[test]
    fn serializes_without_absent_fields() {
        let json = serde_json::to_string(&Block::text("hi").bold()).unwrap();
        assert_eq!(json, r#"{"type":"text","text":"hi","bold":true}"#);
    }
}
