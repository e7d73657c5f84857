//! Block-level content types.

use super::deck::Frontmatter;
use serde::{Deserialize, Serialize};

/// One element of the flat content tree produced by the parser.
///
/// Thematic breaks are slide delimiters, not slide content, so they exist
/// only at this level; the segmenter consumes them when building a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// YAML frontmatter at the start of the document
    Frontmatter(Frontmatter),

    /// A horizontal rule (`---`), the slide boundary marker
    ThematicBreak,

    /// A block of slide content
    Block(Block),
}

/// A content block inside a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (`#` .. `######`)
    Heading(Heading),

    /// A paragraph of text
    Paragraph(Paragraph),

    /// An ordered or unordered list
    List(List),

    /// A table
    Table(Table),

    /// A fenced or indented code block
    CodeBlock(CodeBlock),

    /// A standalone image
    Image(Image),

    /// A blockquote
    Blockquote(Blockquote),

    /// Raw HTML, passed through untouched
    Html(Html),
}

impl Block {
    /// Check if this block is a heading.
    pub fn is_heading(&self) -> bool {
        matches!(self, Block::Heading(_))
    }

    /// Check if this block is a paragraph.
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    /// Check if this block is a list.
    pub fn is_list(&self) -> bool {
        matches!(self, Block::List(_))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Block::Table(_))
    }

    /// Check if this block is a code block.
    pub fn is_code_block(&self) -> bool {
        matches!(self, Block::CodeBlock(_))
    }

    /// Check if this block is a standalone image.
    pub fn is_image(&self) -> bool {
        matches!(self, Block::Image(_))
    }

    /// Add a style class to this block, if the block kind supports one.
    ///
    /// Headings, paragraphs, lists and blockquotes carry classes; tables,
    /// code blocks, images and raw HTML are left untouched.
    pub fn add_class(&mut self, class: &str) -> bool {
        let classes = match self {
            Block::Heading(h) => &mut h.classes,
            Block::Paragraph(p) => &mut p.classes,
            Block::List(l) => &mut l.classes,
            Block::Blockquote(q) => &mut q.classes,
            Block::Table(_) | Block::CodeBlock(_) | Block::Image(_) | Block::Html(_) => {
                return false
            }
        };
        classes.push(class.to_string());
        true
    }
}

/// A heading block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading level (1-6)
    pub level: u8,

    /// Inline text in canonical Markdown form
    pub text: String,

    /// Style classes applied by scaling
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Heading {
    /// Create a new heading. Levels are clamped to 1-6.
    pub fn new(level: u8, text: impl Into<String>) -> Self {
        Self {
            level: level.clamp(1, 6),
            text: text.into(),
            classes: Vec::new(),
        }
    }

    /// Heading text with inline markup stripped.
    pub fn plain_text(&self) -> String {
        strip_inline_markup(&self.text)
    }
}

/// A paragraph block holding one text run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline text in canonical Markdown form
    pub text: String,

    /// Style classes applied by scaling
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Paragraph {
    /// Create a new paragraph.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            classes: Vec::new(),
        }
    }

    /// Paragraph text with inline markup stripped.
    pub fn plain_text(&self) -> String {
        strip_inline_markup(&self.text)
    }

    /// True if the text run carries an inline image.
    pub fn contains_image(&self) -> bool {
        self.text.contains("![")
    }
}

/// A list block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// True for ordered (numbered) lists
    pub ordered: bool,

    /// Start index for ordered lists
    pub start: Option<u64>,

    /// List items, in order
    pub items: Vec<ListItem>,

    /// Style classes applied by scaling
    #[serde(default)]
    pub classes: Vec<String>,
}

impl List {
    /// Create an unordered (bulleted) list.
    pub fn bulleted(items: Vec<ListItem>) -> Self {
        Self {
            ordered: false,
            start: None,
            items,
            classes: Vec::new(),
        }
    }

    /// Create an ordered list starting at the given index.
    pub fn ordered(start: u64, items: Vec<ListItem>) -> Self {
        Self {
            ordered: true,
            start: Some(start),
            items,
            classes: Vec::new(),
        }
    }

    /// Number of direct items (nested items not counted).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One list item, holding a block sub-tree.
///
/// Tight items hold a single paragraph; items with nested lists hold the
/// paragraph followed by the nested `List` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Blocks making up the item
    pub blocks: Vec<Block>,
}

impl ListItem {
    /// Create an item from its blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Create an item holding a single paragraph of text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            blocks: vec![Block::Paragraph(Paragraph::new(text))],
        }
    }
}

/// Column alignment in a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlignment {
    /// No alignment specified
    #[default]
    None,
    /// Left-aligned column
    Left,
    /// Center-aligned column
    Center,
    /// Right-aligned column
    Right,
}

/// A table block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Per-column alignment
    pub alignments: Vec<ColumnAlignment>,

    /// Header row cells, canonical inline Markdown
    pub header: Vec<String>,

    /// Body rows
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with unaligned columns.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let alignments = vec![ColumnAlignment::None; header.len()];
        Self {
            alignments,
            header,
            rows,
        }
    }

    /// Number of columns (taken from the header row).
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// A code block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag from the fence info string
    pub language: Option<String>,

    /// Literal code text
    pub code: String,
}

impl CodeBlock {
    /// Create a code block.
    pub fn new(language: Option<String>, code: impl Into<String>) -> Self {
        Self {
            language,
            code: code.into(),
        }
    }
}

/// A standalone image block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image location
    pub url: String,

    /// Alternative text
    pub alt: String,

    /// Optional title
    pub title: Option<String>,
}

impl Image {
    /// Create an image block.
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: alt.into(),
            title: None,
        }
    }
}

/// A blockquote holding nested blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blockquote {
    /// Quoted blocks
    pub blocks: Vec<Block>,

    /// Style classes applied by scaling
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Blockquote {
    /// Create a blockquote from its inner blocks.
    pub fn new(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            classes: Vec::new(),
        }
    }
}

/// A raw HTML block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    /// Verbatim HTML text
    pub text: String,
}

impl Html {
    /// Create a raw HTML block.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Strip inline Markdown markup from a canonical text run.
///
/// Emphasis markers are dropped, code spans and images are removed whole,
/// links keep their text, HTML tags are removed. The result is what a
/// viewer reads, which is what character counting and sentence splitting
/// operate on.
pub fn strip_inline_markup(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                out.push(chars[i + 1]);
                i += 2;
            }
            '`' => match chars[i + 1..].iter().position(|&c| c == '`') {
                Some(close) => i += close + 2,
                None => {
                    out.push('`');
                    i += 1;
                }
            },
            '!' if chars.get(i + 1) == Some(&'[') => match skip_link(&chars, i + 1) {
                Some((_, end)) => i = end,
                None => {
                    out.push('!');
                    i += 1;
                }
            },
            '[' => match skip_link(&chars, i) {
                Some((label, end)) => {
                    out.push_str(&strip_inline_markup(&label));
                    i = end;
                }
                None => {
                    out.push('[');
                    i += 1;
                }
            },
            '*' => i += 1,
            '~' if chars.get(i + 1) == Some(&'~') => i += 2,
            '<' => match chars[i + 1..].iter().position(|&c| c == '>') {
                Some(close) => i += close + 2,
                None => {
                    out.push('<');
                    i += 1;
                }
            },
            c => {
                out.push(c);
                i += 1;
            }
        }
    }

    out
}

/// Scan a `[label](target)` construct starting at the opening bracket.
/// Returns the label text and the index one past the closing parenthesis.
fn skip_link(chars: &[char], start: usize) -> Option<(String, usize)> {
    debug_assert_eq!(chars[start], '[');
    let close_bracket = start + 1 + chars[start + 1..].iter().position(|&c| c == ']')?;
    if chars.get(close_bracket + 1) != Some(&'(') {
        return None;
    }
    let close_paren =
        close_bracket + 2 + chars[close_bracket + 2..].iter().position(|&c| c == ')')?;
    let label: String = chars[start + 1..close_bracket].iter().collect();
    Some((label, close_paren + 1))
}
