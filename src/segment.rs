//! Slide segmentation and reconstruction.
//!
//! A parsed deck is a flat node sequence; slides are the runs between
//! thematic breaks. [`segment`] and [`reconstruct`] are inverses for any
//! sequence that only carries breaks at slide boundaries.

use crate::model::{Block, Deck, Frontmatter, Node, Slide};

/// Partition a flat node sequence into a deck.
///
/// A frontmatter node becomes the pending frontmatter of the slide under
/// construction. A thematic break closes the current slide only once it
/// holds at least one block; leading breaks are ignored. Trailing content
/// without a closing break still forms a final slide.
pub fn segment(nodes: Vec<Node>) -> Deck {
    let mut slides = Vec::new();
    let mut frontmatter: Option<Frontmatter> = None;
    let mut content: Vec<Block> = Vec::new();

    for node in nodes {
        match node {
            Node::Frontmatter(fm) => frontmatter = Some(fm),
            Node::ThematicBreak => {
                if !content.is_empty() {
                    slides.push(Slide {
                        frontmatter: frontmatter.take(),
                        content: std::mem::take(&mut content),
                    });
                }
            }
            Node::Block(block) => content.push(block),
        }
    }
    if !content.is_empty() {
        slides.push(Slide {
            frontmatter: frontmatter.take(),
            content,
        });
    }

    Deck::new(slides)
}

/// Rebuild the flat node sequence for a deck.
///
/// Emits the first slide's frontmatter (if any), then each slide's blocks
/// with one thematic break between consecutive slides. Non-consuming; the
/// pipeline reconstructs on every measurement pass.
pub fn reconstruct(deck: &Deck) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (i, slide) in deck.slides.iter().enumerate() {
        if i > 0 {
            nodes.push(Node::ThematicBreak);
        }
        if i == 0 {
            if let Some(fm) = &slide.frontmatter {
                nodes.push(Node::Frontmatter(fm.clone()));
            }
        }
        nodes.extend(slide.content.iter().cloned().map(Node::Block));
    }
    nodes
}
