//! Deck-level types.

use super::Block;
use serde::{Deserialize, Serialize};

/// A slide deck: an ordered sequence of slides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deck {
    /// Slides, in presentation order
    pub slides: Vec<Slide>,
}

impl Deck {
    /// Create a deck from its slides.
    pub fn new(slides: Vec<Slide>) -> Self {
        Self { slides }
    }

    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// True when the deck has no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// The document-level frontmatter, carried by the first slide.
    pub fn document_frontmatter(&self) -> Option<&Frontmatter> {
        self.slides.first()?.frontmatter.as_ref()
    }

    /// Mutable access to the document-level frontmatter.
    pub fn document_frontmatter_mut(&mut self) -> Option<&mut Frontmatter> {
        self.slides.first_mut()?.frontmatter.as_mut()
    }

    /// Replace the slide at `index` with one or more slides, shifting
    /// everything after it.
    pub fn replace_slide(&mut self, index: usize, replacements: Vec<Slide>) {
        self.slides.splice(index..=index, replacements);
    }
}

/// One slide: optional frontmatter plus an owned block sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Presentation metadata; only the deck's first slide carries it
    pub frontmatter: Option<Frontmatter>,

    /// Content blocks, in order
    pub content: Vec<Block>,
}

impl Slide {
    /// Create a slide without frontmatter.
    pub fn new(content: Vec<Block>) -> Self {
        Self {
            frontmatter: None,
            content,
        }
    }

    /// Create a slide carrying frontmatter.
    pub fn with_frontmatter(frontmatter: Frontmatter, content: Vec<Block>) -> Self {
        Self {
            frontmatter: Some(frontmatter),
            content,
        }
    }

    /// True when the slide has no content blocks.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Number of content blocks.
    pub fn block_count(&self) -> usize {
        self.content.len()
    }
}

/// Presentation metadata: the YAML lines between the frontmatter fences,
/// kept as a raw text blob.
///
/// The pipeline never parses this as YAML. Scaling appends style rules with
/// a line-oriented edit whose exact layout downstream rendering depends on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Raw metadata lines, fence markers excluded
    pub text: String,
}

impl Frontmatter {
    /// Create frontmatter from its raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Append a CSS rule to the `style:` section.
    ///
    /// If a line starting with `style:` exists, the rule is inserted
    /// directly after it as a two-space-indented line. Otherwise a
    /// `style: |` header is appended followed by the indented rule. Repeated
    /// calls accumulate; rules are never deduplicated.
    pub fn append_style_rule(&mut self, rule: &str) {
        let mut lines: Vec<String> = self.text.split('\n').map(str::to_string).collect();
        match lines.iter().position(|line| line.trim().starts_with("style:")) {
            Some(idx) => lines.insert(idx + 1, format!("  {}", rule)),
            None => {
                lines.push("style: |".to_string());
                lines.push(format!("  {}", rule));
            }
        }
        self.text = lines.join("\n");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;

    #[test]
    fn test_deck_frontmatter_access() {
        let deck = Deck::new(vec![
            Slide::with_frontmatter(
                Frontmatter::new("marp: true"),
                vec![Block::Paragraph(Paragraph::new("a"))],
            ),
            Slide::new(vec![Block::Paragraph(Paragraph::new("b"))]),
        ]);
        assert_eq!(deck.slide_count(), 2);
        assert_eq!(deck.document_frontmatter().unwrap().text, "marp: true");
    }

    #[test]
    fn test_replace_slide_expands_in_place() {
        let mut deck = Deck::new(vec![
            Slide::new(vec![Block::Paragraph(Paragraph::new("a"))]),
            Slide::new(vec![Block::Paragraph(Paragraph::new("b"))]),
            Slide::new(vec![Block::Paragraph(Paragraph::new("c"))]),
        ]);
        deck.replace_slide(
            1,
            vec![
                Slide::new(vec![Block::Paragraph(Paragraph::new("b1"))]),
                Slide::new(vec![Block::Paragraph(Paragraph::new("b2"))]),
            ],
        );
        assert_eq!(deck.slide_count(), 4);
        let texts: Vec<_> = deck
            .slides
            .iter()
            .map(|s| match &s.content[0] {
                Block::Paragraph(p) => p.text.clone(),
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(texts, vec!["a", "b1", "b2", "c"]);
    }

    #[test]
    fn test_append_style_rule_after_existing_section() {
        let mut fm = Frontmatter::new("marp: true\nstyle: |\n  h1 { color: red; }");
        fm.append_style_rule("img { max-width: 100%; height: auto; }");
        assert_eq!(
            fm.text,
            "marp: true\nstyle: |\n  img { max-width: 100%; height: auto; }\n  h1 { color: red; }"
        );
    }

    #[test]
    fn test_append_style_rule_creates_section() {
        let mut fm = Frontmatter::new("marp: true\ntheme: default");
        fm.append_style_rule(".slide-scaled { font-size: 0.8em; }");
        assert_eq!(
            fm.text,
            "marp: true\ntheme: default\nstyle: |\n  .slide-scaled { font-size: 0.8em; }"
        );
    }

    #[test]
    fn test_append_style_rule_accumulates_without_dedup() {
        let mut fm = Frontmatter::new("marp: true");
        fm.append_style_rule("img { max-width: 100%; height: auto; }");
        fm.append_style_rule("img { max-width: 100%; height: auto; }");
        assert_eq!(
            fm.text,
            "marp: true\nstyle: |\n  img { max-width: 100%; height: auto; }\n  img { max-width: 100%; height: auto; }"
        );
    }

    #[test]
    fn test_append_style_rule_matches_indented_style_line() {
        let mut fm = Frontmatter::new("marp: true\n  style: old");
        fm.append_style_rule("a { b: c; }");
        assert_eq!(fm.text, "marp: true\n  style: old\n  a { b: c; }");
    }
}
