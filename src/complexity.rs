//! Content complexity scoring.
//!
//! The score approximates how much rendered space a block sequence wants:
//! visible character count, list items weighted at 50 apiece, plus flat
//! penalties for tables (200), code blocks (100) and images (150). Code
//! text counts at half weight since it renders smaller.

use crate::model::{strip_inline_markup, Block};

/// Structural census of a block sequence with its weighted score.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentProfile {
    /// Visible characters, with code text discounted to half.
    pub text_length: f64,
    /// List items at any nesting depth.
    pub list_item_count: usize,
    pub has_table: bool,
    pub has_code_block: bool,
    pub has_image: bool,
    /// Weighted total of the fields above.
    pub score: f64,
}

/// Score a block sequence.
pub fn estimate(blocks: &[Block]) -> ContentProfile {
    let mut profile = ContentProfile::default();
    accumulate(blocks, &mut profile);
    profile.score = profile.text_length
        + 50.0 * profile.list_item_count as f64
        + if profile.has_table { 200.0 } else { 0.0 }
        + if profile.has_code_block { 100.0 } else { 0.0 }
        + if profile.has_image { 150.0 } else { 0.0 };
    profile
}

fn accumulate(blocks: &[Block], profile: &mut ContentProfile) {
    for block in blocks {
        match block {
            Block::Heading(heading) => {
                profile.text_length += heading.plain_text().chars().count() as f64;
            }
            Block::Paragraph(para) => {
                profile.text_length += para.plain_text().chars().count() as f64;
                if para.contains_image() {
                    profile.has_image = true;
                }
            }
            Block::List(list) => {
                for item in &list.items {
                    profile.list_item_count += 1;
                    accumulate(&item.blocks, profile);
                }
            }
            Block::Table(table) => {
                profile.has_table = true;
                for cell in table.header.iter().chain(table.rows.iter().flatten()) {
                    profile.text_length += strip_inline_markup(cell).chars().count() as f64;
                }
            }
            Block::CodeBlock(code) => {
                profile.has_code_block = true;
                profile.text_length += code.code.chars().count() as f64 * 0.5;
            }
            Block::Image(_) => profile.has_image = true,
            Block::Blockquote(quote) => accumulate(&quote.blocks, profile),
            Block::Html(_) => {}
        }
    }
}
