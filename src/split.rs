//! Slide splitting heuristics.
//!
//! Splitting moves content; it never shrinks it. A slide is only split
//! along boundaries a reader would accept: between sentences, between
//! list items, and before a heading that starts a dense section. Slides
//! carrying tables or images are left for scaling, since moving half of
//! a table to the next slide is worse than shrinking it.

use crate::complexity::estimate;
use crate::config::FixConfig;
use crate::model::{Block, List, Paragraph};

/// Sentence-ending punctuation, Latin and CJK.
pub const SENTENCE_ENDINGS: [char; 6] = ['。', '.', '!', '?', '！', '？'];

/// Complexity score above which a mid-slide heading starts a new slide.
const HEADING_SPLIT_SCORE: f64 = 800.0;

/// Split an overflowing slide's blocks into one or more slides.
///
/// Returns the input as a single sequence when no cut fires, so callers
/// detect a successful split by `result.len() > 1`. Splitting is refused
/// outright for slides containing a table or image anywhere, and for a
/// slide that is a single code block.
pub fn split_slide(blocks: Vec<Block>, config: &FixConfig) -> Vec<Vec<Block>> {
    let profile = estimate(&blocks);
    if profile.has_table || profile.has_image {
        log::debug!("split refused: slide carries a table or image");
        return vec![blocks];
    }
    if profile.has_code_block && blocks.len() == 1 {
        log::debug!("split refused: slide is a lone code block");
        return vec![blocks];
    }

    // Heading cuts depend on the score of the remaining suffix, so decide
    // them against the untouched sequence before blocks start moving.
    let cut_before: Vec<bool> = (0..blocks.len())
        .map(|i| blocks[i].is_heading() && estimate(&blocks[i..]).score > HEADING_SPLIT_SCORE)
        .collect();

    let mut slides: Vec<Vec<Block>> = Vec::new();
    let mut current: Vec<Block> = Vec::new();

    for (i, block) in blocks.into_iter().enumerate() {
        match block {
            Block::Paragraph(para) => {
                match split_paragraph_at_sentence(&para.plain_text(), config.paragraph_max_chars)
                {
                    Some((head, tail)) => {
                        current.push(Block::Paragraph(Paragraph::new(head)));
                        slides.push(std::mem::take(&mut current));
                        current.push(Block::Paragraph(Paragraph::new(tail)));
                    }
                    None => current.push(Block::Paragraph(para)),
                }
            }
            Block::List(list) if list.len() > config.list_max_items => {
                let (head, tail) = split_list_at_midpoint(list);
                current.push(Block::List(head));
                slides.push(std::mem::take(&mut current));
                current.push(Block::List(tail));
            }
            Block::Heading(heading) if cut_before[i] && !current.is_empty() => {
                slides.push(std::mem::take(&mut current));
                current.push(Block::Heading(heading));
            }
            other => current.push(other),
        }
    }
    if !current.is_empty() {
        slides.push(current);
    }
    if slides.is_empty() {
        slides.push(Vec::new());
    }
    slides
}

/// Split a paragraph's visible text at the sentence ending nearest its
/// midpoint.
///
/// Returns `None` when the text fits within `max_chars`, when no sentence
/// ending lies inside the search window around the midpoint, or when
/// either half trims down to nothing. The cut lands just after the
/// punctuation mark; earlier candidates win distance ties.
pub fn split_paragraph_at_sentence(text: &str, max_chars: usize) -> Option<(String, String)> {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_chars {
        return None;
    }

    let midpoint = chars.len() as f64 / 2.0;
    let window_start = (midpoint * 0.3).floor() as usize;
    let window_end = ((midpoint * 1.7).floor() as usize).min(chars.len());

    let mut best_cut = None;
    let mut best_distance = f64::INFINITY;
    for i in window_start..window_end {
        if SENTENCE_ENDINGS.contains(&chars[i]) {
            let distance = (i as f64 - midpoint).abs();
            if distance < best_distance {
                best_distance = distance;
                best_cut = Some(i + 1);
            }
        }
    }

    let cut = best_cut?;
    let head: String = chars[..cut].iter().collect();
    let tail: String = chars[cut..].iter().collect();
    let head = head.trim();
    let tail = tail.trim();
    if head.is_empty() || tail.is_empty() {
        return None;
    }
    Some((head.to_string(), tail.to_string()))
}

/// Split a list into two halves at `floor(len / 2)`.
///
/// Both halves keep the source list's ordering flag and start index, so
/// the numbering of a split ordered list repeats rather than continues.
pub fn split_list_at_midpoint(list: List) -> (List, List) {
    let List {
        ordered,
        start,
        mut items,
        classes,
    } = list;
    let tail_items = items.split_off(items.len() / 2);
    (
        List {
            ordered,
            start,
            items,
            classes: classes.clone(),
        },
        List {
            ordered,
            start,
            items: tail_items,
            classes,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CodeBlock, Heading, Image, ListItem, Table};

    fn sentences(count: usize) -> String {
        std::iter::repeat("This sentence pads the paragraph out. ")
            .take(count)
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn test_short_paragraph_not_split() {
        assert!(split_paragraph_at_sentence("Short enough.", 600).is_none());
    }

    #[test]
    fn test_long_paragraph_splits_near_midpoint() {
        let text = sentences(24);
        assert!(text.chars().count() > 600);
        let (head, tail) = split_paragraph_at_sentence(&text, 600).unwrap();
        assert!(head.ends_with('.'));
        assert!(tail.starts_with("This"));
        // Reassembling the halves recovers the text up to the trimmed
        // boundary whitespace.
        assert_eq!(format!("{} {}", head, tail), text);
        // The cut is reasonably central.
        let ratio = head.chars().count() as f64 / text.chars().count() as f64;
        assert!(ratio > 0.3 && ratio < 0.7, "cut at {}", ratio);
    }

    #[test]
    fn test_no_sentence_ending_in_window_returns_none() {
        let mut text = "a".repeat(699);
        text.push('.');
        // Midpoint 350; the window ends at floor(350 * 1.7) = 595, well
        // before the only mark at index 699.
        assert!(split_paragraph_at_sentence(&text, 600).is_none());
    }

    #[test]
    fn test_earlier_candidate_wins_distance_tie() {
        // Marks at indices 300 and 400 sit equally far from midpoint 350.
        let mut chars: Vec<char> = "a".repeat(700).chars().collect();
        chars[300] = '.';
        chars[400] = '.';
        let text: String = chars.into_iter().collect();
        let (head, _) = split_paragraph_at_sentence(&text, 600).unwrap();
        assert_eq!(head.chars().count(), 301);
    }

    #[test]
    fn test_whitespace_half_discards_split() {
        let mut text = "a".repeat(300);
        text.push('.');
        text.push_str(&" ".repeat(350));
        assert!(split_paragraph_at_sentence(&text, 600).is_none());
    }

    #[test]
    fn test_cjk_sentence_endings_recognized() {
        let text = format!("{}。{}", "あ".repeat(320), "い".repeat(320));
        let (head, tail) = split_paragraph_at_sentence(&text, 600).unwrap();
        assert!(head.ends_with('。'));
        assert_eq!(tail.chars().count(), 320);
    }

    #[test]
    fn test_list_midpoint_arithmetic() {
        let items: Vec<ListItem> = (0..11).map(|i| ListItem::text(format!("item {}", i))).collect();
        let (head, tail) = split_list_at_midpoint(List::bulleted(items));
        assert_eq!(head.len(), 5);
        assert_eq!(tail.len(), 6);
    }

    #[test]
    fn test_ordered_list_halves_keep_start() {
        let items: Vec<ListItem> = (0..12).map(|i| ListItem::text(format!("{}", i))).collect();
        let (head, tail) = split_list_at_midpoint(List::ordered(4, items));
        assert!(head.ordered && tail.ordered);
        assert_eq!(head.start, Some(4));
        assert_eq!(tail.start, Some(4));
    }

    #[test]
    fn test_split_slide_moves_long_list_tail() {
        let items: Vec<ListItem> = (0..12).map(|i| ListItem::text(format!("item {}", i))).collect();
        let blocks = vec![
            Block::Heading(Heading::new(2, "Topics")),
            Block::List(List::bulleted(items)),
        ];
        let result = split_slide(blocks, &FixConfig::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].len(), 2);
        assert!(result[0][1].is_list());
        assert_eq!(result[1].len(), 1);
        assert!(result[1][0].is_list());
    }

    #[test]
    fn test_split_slide_refuses_table() {
        let blocks = vec![
            Block::Paragraph(Paragraph::new(sentences(24))),
            Block::Table(Table::new(vec!["h".to_string()], vec![])),
        ];
        let result = split_slide(blocks.clone(), &FixConfig::default());
        assert_eq!(result, vec![blocks]);
    }

    #[test]
    fn test_split_slide_refuses_inline_image() {
        let long = format!("{} ![chart](c.png)", sentences(24));
        let blocks = vec![Block::Paragraph(Paragraph::new(long))];
        let result = split_slide(blocks.clone(), &FixConfig::default());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_split_slide_refuses_image_block() {
        let blocks = vec![
            Block::Paragraph(Paragraph::new(sentences(24))),
            Block::Image(Image::new("fig.png", "figure")),
        ];
        assert_eq!(split_slide(blocks, &FixConfig::default()).len(), 1);
    }

    #[test]
    fn test_split_slide_refuses_lone_code_block() {
        let code = "fn main() {}\n".repeat(80);
        let blocks = vec![Block::CodeBlock(CodeBlock::new(None, code))];
        assert_eq!(split_slide(blocks, &FixConfig::default()).len(), 1);
    }

    #[test]
    fn test_split_slide_code_with_paragraph_can_split() {
        let blocks = vec![
            Block::CodeBlock(CodeBlock::new(None, "let x = 1;\n")),
            Block::Paragraph(Paragraph::new(sentences(24))),
        ];
        let result = split_slide(blocks, &FixConfig::default());
        assert_eq!(result.len(), 2);
        assert!(result[0][0].is_code_block());
    }

    #[test]
    fn test_split_slide_paragraph_markup_dropped_in_halves() {
        let text = format!("**Bold start.** {}", sentences(23));
        let blocks = vec![Block::Paragraph(Paragraph::new(text))];
        let result = split_slide(blocks, &FixConfig::default());
        assert_eq!(result.len(), 2);
        if let Block::Paragraph(p) = &result[0][0] {
            assert!(p.text.starts_with("Bold start."));
        } else {
            panic!("expected paragraph");
        }
    }

    #[test]
    fn test_split_slide_heading_cut_on_dense_section() {
        let blocks = vec![
            Block::Heading(Heading::new(2, "Intro")),
            Block::Paragraph(Paragraph::new("Opening remarks")),
            Block::Heading(Heading::new(2, "Details")),
            Block::Paragraph(Paragraph::new("b".repeat(850))),
        ];
        let result = split_slide(blocks, &FixConfig::default());
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].len(), 2);
        assert!(result[1][0].is_heading());
        assert_eq!(result[1].len(), 2);
    }

    #[test]
    fn test_split_slide_leading_heading_not_cut() {
        let blocks = vec![
            Block::Heading(Heading::new(1, "Everything")),
            Block::Paragraph(Paragraph::new("c".repeat(850))),
        ];
        // Score exceeds the threshold at the heading, but nothing precedes
        // it, so cutting would only produce an empty slide.
        let result = split_slide(blocks, &FixConfig::default());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].len(), 2);
    }

    #[test]
    fn test_split_slide_sparse_section_heading_not_cut() {
        let blocks = vec![
            Block::Heading(Heading::new(2, "One")),
            Block::Paragraph(Paragraph::new("first")),
            Block::Heading(Heading::new(2, "Two")),
            Block::Paragraph(Paragraph::new("second")),
        ];
        assert_eq!(split_slide(blocks, &FixConfig::default()).len(), 1);
    }

    #[test]
    fn test_split_slide_multiple_cuts() {
        let items: Vec<ListItem> = (0..12).map(|i| ListItem::text(format!("{}", i))).collect();
        let blocks = vec![
            Block::Paragraph(Paragraph::new(sentences(24))),
            Block::List(List::bulleted(items)),
        ];
        let result = split_slide(blocks, &FixConfig::default());
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn test_split_slide_no_cut_returns_input() {
        let blocks = vec![
            Block::Heading(Heading::new(1, "Fine")),
            Block::Paragraph(Paragraph::new("All well within bounds.")),
        ];
        let result = split_slide(blocks.clone(), &FixConfig::default());
        assert_eq!(result, vec![blocks]);
    }
}
