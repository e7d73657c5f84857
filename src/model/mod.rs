//! Document model types for Marp deck content.
//!
//! This module defines the intermediate representation that bridges
//! Markdown parsing and the remediation pipeline. A parsed document is a
//! flat sequence of [`Node`]s; the segmenter folds that sequence into a
//! [`Deck`] of [`Slide`]s, which is what the pipeline mutates.

mod block;
mod deck;

pub use block::{
    strip_inline_markup, Block, Blockquote, CodeBlock, ColumnAlignment, Heading, Html, Image,
    List, ListItem, Node, Paragraph, Table,
};
pub use deck::{Deck, Frontmatter, Slide};
