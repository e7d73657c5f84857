//! Overflow scaling policy.
//!
//! Scaling shrinks content that splitting refuses to move. Local rules
//! target the element kind the probe saw (code, table or image); global
//! scaling shrinks a whole slide's font by the measured fit ratio. All
//! emitted CSS lands in the document frontmatter's `style` section, the
//! one place Marp reads document-level CSS from.

use crate::config::FixConfig;
use crate::measure::OverflowReport;
use crate::model::Deck;

/// Shrinks oversized code blocks and lets long lines wrap.
pub const CODE_SCALE_RULE: &str = "pre code { font-size: 0.85em; white-space: pre-wrap; }";

/// Fixes table layout so wide cells truncate instead of spilling.
pub const TABLE_SCALE_RULE: &str =
    "table { table-layout: fixed; width: 100%; } th, td { overflow: hidden; text-overflow: ellipsis; }";

/// Constrains images to the slide width.
pub const IMAGE_SCALE_RULE: &str = "img { max-width: 100%; height: auto; }";

/// Which scaling path fired for a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingKind {
    /// An element-targeted CSS rule was appended
    Local,
    /// The slide was tagged and a font-size rule appended
    Global,
}

/// Scale an overflowing slide, preferring a local rule over global
/// font shrinking.
///
/// Local rules fire on the probe's content census with code blocks
/// winning over tables and tables over images. Global scaling applies
/// only when the computed font size is an actual reduction and the
/// overflow exceeds 50 pixels on some axis. Returns `None` when neither
/// path changed the deck.
pub fn apply_scaling(
    deck: &mut Deck,
    slide_index: usize,
    report: &OverflowReport,
    config: &FixConfig,
) -> Option<ScalingKind> {
    if let Some(rule) = local_rule(report) {
        if let Some(frontmatter) = deck.document_frontmatter_mut() {
            frontmatter.append_style_rule(rule);
            log::info!("slide {}: applied local scaling rule", report.slide_index);
            return Some(ScalingKind::Local);
        }
        // Nowhere to carry the rule; try global scaling instead.
    }

    let font_size = global_font_size(report, config);
    let overflow = &report.overflow_amount;
    if font_size >= 1.0 || (overflow.vertical <= 50.0 && overflow.horizontal <= 50.0) {
        return None;
    }

    let mut mutated = false;
    let class = format!("slide-scaled-{}", (font_size * 100.0).round() as i64);
    if let Some(slide) = deck.slides.get_mut(slide_index) {
        for block in &mut slide.content {
            mutated |= block.add_class(&class);
        }
    }
    if let Some(frontmatter) = deck.document_frontmatter_mut() {
        frontmatter.append_style_rule(&format!(".slide-scaled {{ font-size: {}em; }}", font_size));
        mutated = true;
    }

    if mutated {
        log::info!(
            "slide {}: applied global scaling at {:.2}",
            report.slide_index,
            font_size
        );
        Some(ScalingKind::Global)
    } else {
        None
    }
}

/// Pick the local rule for a measured slide, if its content warrants one.
fn local_rule(report: &OverflowReport) -> Option<&'static str> {
    let info = &report.content_info;
    if info.has_code_block {
        Some(CODE_SCALE_RULE)
    } else if info.has_table {
        Some(TABLE_SCALE_RULE)
    } else if info.has_image {
        Some(IMAGE_SCALE_RULE)
    } else {
        None
    }
}

/// Font scale that would fit the content, with the configured safety
/// margin, floored at `font_min`.
fn global_font_size(report: &OverflowReport, config: &FixConfig) -> f64 {
    let dims = &report.dimensions;
    let vertical_ratio = dims.client_height / dims.scroll_height;
    let horizontal_ratio = dims.client_width / dims.scroll_width;
    let target_ratio = vertical_ratio.min(horizontal_ratio) * config.font_step;
    target_ratio.max(config.font_min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measure::{ContentInfo, OverflowReport};
    use crate::model::{Block, Frontmatter, Heading, Paragraph, Slide};

    fn deck_with_frontmatter(slides: usize) -> Deck {
        let mut deck = Deck::new(
            (0..slides)
                .map(|i| {
                    Slide::new(vec![
                        Block::Heading(Heading::new(1, format!("Slide {}", i))),
                        Block::Paragraph(Paragraph::new("body")),
                    ])
                })
                .collect(),
        );
        deck.slides[0].frontmatter = Some(Frontmatter::new("marp: true"));
        deck
    }

    fn census(code: bool, table: bool, image: bool) -> ContentInfo {
        ContentInfo {
            has_code_block: code,
            has_table: table,
            has_image: image,
            ..ContentInfo::default()
        }
    }

    #[test]
    fn test_local_priority_code_over_table_and_image() {
        let report =
            OverflowReport::overflowing(1, 200.0).with_content_info(census(true, true, true));
        assert_eq!(local_rule(&report), Some(CODE_SCALE_RULE));

        let report =
            OverflowReport::overflowing(1, 200.0).with_content_info(census(false, true, true));
        assert_eq!(local_rule(&report), Some(TABLE_SCALE_RULE));

        let report =
            OverflowReport::overflowing(1, 200.0).with_content_info(census(false, false, true));
        assert_eq!(local_rule(&report), Some(IMAGE_SCALE_RULE));
    }

    #[test]
    fn test_local_rule_lands_in_document_frontmatter() {
        let mut deck = deck_with_frontmatter(3);
        let report =
            OverflowReport::overflowing(3, 200.0).with_content_info(census(false, true, false));
        let kind = apply_scaling(&mut deck, 2, &report, &FixConfig::default());
        assert_eq!(kind, Some(ScalingKind::Local));
        let style = &deck.document_frontmatter().unwrap().text;
        assert!(style.contains("table-layout: fixed"));
        // No font class was applied anywhere.
        for slide in &deck.slides {
            for block in &slide.content {
                if let Block::Heading(h) = block {
                    assert!(h.classes.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_local_returns_before_global() {
        let mut deck = deck_with_frontmatter(1);
        // Heavy overflow that would also qualify for global scaling.
        let report =
            OverflowReport::overflowing(1, 400.0).with_content_info(census(true, false, false));
        let kind = apply_scaling(&mut deck, 0, &report, &FixConfig::default());
        assert_eq!(kind, Some(ScalingKind::Local));
        assert!(!deck.document_frontmatter().unwrap().text.contains("slide-scaled"));
    }

    #[test]
    fn test_global_scaling_tags_blocks_and_appends_rule() {
        let mut deck = deck_with_frontmatter(2);
        // 720 / 1440 = 0.5 fit ratio, below the floor of 0.7.
        let report = OverflowReport::overflowing(2, 720.0);
        let kind = apply_scaling(&mut deck, 1, &report, &FixConfig::default());
        assert_eq!(kind, Some(ScalingKind::Global));

        if let Block::Heading(h) = &deck.slides[1].content[0] {
            assert_eq!(h.classes, vec!["slide-scaled-70"]);
        } else {
            panic!("expected heading");
        }
        if let Block::Paragraph(p) = &deck.slides[1].content[1] {
            assert_eq!(p.classes, vec!["slide-scaled-70"]);
        }
        let style = &deck.document_frontmatter().unwrap().text;
        assert!(style.contains(".slide-scaled { font-size: 0.7em; }"));
        // The untouched slide keeps clean blocks.
        if let Block::Heading(h) = &deck.slides[0].content[0] {
            assert!(h.classes.is_empty());
        }
    }

    #[test]
    fn test_global_respects_font_floor() {
        let mut deck = deck_with_frontmatter(1);
        // Fit ratio 0.25 would want a far smaller font than the floor.
        let report = OverflowReport::overflowing(1, 2160.0);
        apply_scaling(&mut deck, 0, &report, &FixConfig::default());
        let style = &deck.document_frontmatter().unwrap().text;
        assert!(style.contains("font-size: 0.7em"));
    }

    #[test]
    fn test_global_skipped_when_fit_ratio_high() {
        let mut deck = deck_with_frontmatter(1);
        // Both fit ratios sit above 1.05, so the margin still leaves the
        // font at 1.0 or larger and nothing shrinks.
        let mut report = OverflowReport::overflowing(1, 60.0);
        report.dimensions.client_width = 1440.0;
        report.dimensions.scroll_width = 1260.0;
        report.dimensions.client_height = 1440.0;
        report.dimensions.scroll_height = 1260.0;
        assert_eq!(apply_scaling(&mut deck, 0, &report, &FixConfig::default()), None);
    }

    #[test]
    fn test_global_skipped_when_overflow_small() {
        let mut deck = deck_with_frontmatter(1);
        // A real reduction, but only 40px of spill.
        let mut report = OverflowReport::overflowing(1, 40.0);
        report.dimensions.scroll_height = 1440.0;
        assert_eq!(apply_scaling(&mut deck, 0, &report, &FixConfig::default()), None);
        assert!(!deck.document_frontmatter().unwrap().text.contains("slide-scaled"));
    }

    #[test]
    fn test_global_without_any_target_is_no_op() {
        // No frontmatter and a slide whose blocks cannot carry classes.
        let mut deck = Deck::new(vec![Slide::new(vec![Block::CodeBlock(
            crate::model::CodeBlock::new(None, "x"),
        )])]);
        let report = OverflowReport::overflowing(1, 720.0);
        assert_eq!(apply_scaling(&mut deck, 0, &report, &FixConfig::default()), None);
    }

    #[test]
    fn test_rules_accumulate_without_dedup() {
        let mut deck = deck_with_frontmatter(2);
        let report =
            OverflowReport::overflowing(1, 200.0).with_content_info(census(true, false, false));
        apply_scaling(&mut deck, 0, &report, &FixConfig::default());
        apply_scaling(&mut deck, 1, &report, &FixConfig::default());
        let style = &deck.document_frontmatter().unwrap().text;
        assert_eq!(style.matches("pre code").count(), 2);
    }
}
