//! Markdown codec for Marp decks.
//!
//! [`parse`] turns source text into the flat [`Node`](crate::model::Node)
//! sequence the segmenter consumes; [`write`] serializes a node sequence
//! back to a canonical textual form. The pair is round-trip-safe for the
//! supported block types: `parse(write(parse(x)))` equals `parse(x)`.

mod parser;
mod writer;

pub use parser::parse;
pub use writer::{write, write_deck};
