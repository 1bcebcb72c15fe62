//! Post-formatting of rendered markup.
//!
//! [`Indenter`] puts every tag and text run on its own line, indented by
//! nesting depth. `pre`, `textarea`, `script` and `style` elements are
//! whitespace-sensitive and are copied through exactly as written. The pass
//! changes whitespace only: tags, attributes and text are kept byte for byte.

/// Turns a flat HTML string into its final layout.
pub trait PostFormat {
    fn format(&self, html: &str) -> String;
}

impl<F> PostFormat for F
where
    F: Fn(&str) -> String,
{
    fn format(&self, html: &str) -> String {
        self(html)
    }
}

/// Leaves markup untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Verbatim;

impl PostFormat for Verbatim {
    fn format(&self, html: &str) -> String {
        html.to_string()
    }
}

/// Indents markup by nesting depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indenter {
    /// Spaces per nesting level.
    pub indent: usize,
}

impl Default for Indenter {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl Indenter {
    pub fn new(indent: usize) -> Self {
        Self { indent }
    }
}

impl PostFormat for Indenter {
    fn format(&self, html: &str) -> String {
        let nodes = build_tree(tokenize(html));
        let mut writer = Writer {
            out: String::with_capacity(html.len() * 2),
            indent: self.indent,
        };
        for node in &nodes {
            writer.node(node, 0, Parent::Root);
        }
        writer.out
    }
}

const RAW_TAGS: &[&str] = &["pre", "textarea", "script", "style"];
const VOID_TAGS: &[&str] = &["br", "img", "hr", "input", "meta", "link"];

fn is_raw(name: &str) -> bool {
    RAW_TAGS.contains(&name)
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    Start { name: String, raw: &'a str },
    End { name: String, raw: &'a str },
    /// Self-closing or void tag, comment, doctype.
    Leaf(&'a str),
    Text(&'a str),
}

fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = html;

    while !rest.is_empty() {
        if let Some(len) = markup_len(rest) {
            tokens.push(classify(&rest[..len]));
            rest = &rest[len..];
            continue;
        }

        let end = rest
            .char_indices()
            .skip(1)
            .find(|&(i, c)| c == '<' && markup_len(&rest[i..]).is_some())
            .map_or(rest.len(), |(i, _)| i);
        tokens.push(Token::Text(&rest[..end]));
        rest = &rest[end..];
    }

    tokens
}

/// Length of the tag or comment at the start of `s`, if `s` starts with one.
fn markup_len(s: &str) -> Option<usize> {
    if s.starts_with("<!--") {
        return s[4..].find("-->").map(|end| 4 + end + 3);
    }

    let mut chars = s.chars();
    if chars.next() != Some('<') {
        return None;
    }
    let opens_tag = match chars.next() {
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        Some('!') => true,
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    };
    if !opens_tag {
        return None;
    }

    let mut quote = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if c == q => quote = None,
            (None, '>') => return Some(i + 1),
            _ => {}
        }
    }
    None
}

fn tag_name(raw: &str) -> String {
    raw.trim_start_matches(['<', '/'])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

fn classify(raw: &str) -> Token<'_> {
    if raw.starts_with("<!") {
        return Token::Leaf(raw);
    }

    let name = tag_name(raw);
    if raw.starts_with("</") {
        Token::End { name, raw }
    } else if raw.ends_with("/>") || VOID_TAGS.contains(&name.as_str()) {
        Token::Leaf(raw)
    } else {
        Token::Start { name, raw }
    }
}

#[derive(Debug)]
enum Node<'a> {
    Element {
        name: String,
        start: &'a str,
        /// `None` when the element was never explicitly closed.
        end: Option<&'a str>,
        children: Vec<Node<'a>>,
    },
    Leaf(&'a str),
    Text(&'a str),
}

struct Open<'a> {
    name: String,
    start: &'a str,
    children: Vec<Node<'a>>,
}

impl<'a> Open<'a> {
    fn close(self, end: Option<&'a str>) -> Node<'a> {
        Node::Element {
            name: self.name,
            start: self.start,
            end,
            children: self.children,
        }
    }
}

fn attach<'a>(stack: &mut [Open<'a>], roots: &mut Vec<Node<'a>>, node: Node<'a>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

fn build_tree(tokens: Vec<Token<'_>>) -> Vec<Node<'_>> {
    let mut roots = Vec::new();
    let mut stack: Vec<Open> = Vec::new();

    for token in tokens {
        let in_raw = stack.iter().any(|open| is_raw(&open.name));
        match token {
            Token::Text(text) => {
                if in_raw || !text.trim().is_empty() {
                    attach(&mut stack, &mut roots, Node::Text(text));
                }
            }
            Token::Leaf(raw) => attach(&mut stack, &mut roots, Node::Leaf(raw)),
            Token::Start { name, raw } => stack.push(Open {
                name,
                start: raw,
                children: Vec::new(),
            }),
            Token::End { name, raw } => {
                let Some(pos) = stack.iter().rposition(|open| open.name == name) else {
                    // Stray end tag, usually from unescaped text.
                    attach(&mut stack, &mut roots, Node::Leaf(raw));
                    continue;
                };
                while stack.len() > pos + 1 {
                    if let Some(inner) = stack.pop() {
                        let node = inner.close(None);
                        attach(&mut stack, &mut roots, node);
                    }
                }
                if let Some(open) = stack.pop() {
                    let node = open.close(Some(raw));
                    attach(&mut stack, &mut roots, node);
                }
            }
        }
    }

    while let Some(open) = stack.pop() {
        let node = open.close(None);
        attach(&mut stack, &mut roots, node);
    }

    roots
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parent {
    Root,
    Normal,
    Raw,
}

struct Writer {
    out: String,
    indent: usize,
}

impl Writer {
    fn line(&mut self, depth: usize) {
        if !self.out.is_empty() {
            self.out.push('\n');
        }
        for _ in 0..depth.saturating_mul(self.indent) {
            self.out.push(' ');
        }
    }

    fn node(&mut self, node: &Node, depth: usize, parent: Parent) {
        match node {
            Node::Element {
                name,
                start,
                end,
                children,
            } => {
                if parent == Parent::Raw || is_raw(name) {
                    // Top-level raw elements stay glued to what precedes them.
                    if parent == Parent::Normal {
                        self.line(depth);
                    }
                    self.out.push_str(start);
                    for child in children {
                        self.node(child, depth + 1, Parent::Raw);
                    }
                    if let Some(end) = end {
                        self.out.push_str(end);
                    }
                    return;
                }

                self.line(depth);
                self.out.push_str(start);
                for child in children {
                    self.node(child, depth + 1, Parent::Normal);
                }
                if let Some(end) = end {
                    self.line(depth);
                    self.out.push_str(end);
                }
            }
            Node::Leaf(raw) | Node::Text(raw) if parent == Parent::Raw => {
                self.out.push_str(raw);
            }
            Node::Leaf(raw) => {
                self.line(depth);
                self.out.push_str(raw);
            }
            Node::Text(text) => {
                for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    self.line(depth);
                    self.out.push_str(line);
                }
            }
        }
    }
}
