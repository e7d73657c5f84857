//! # slidefit
//!
//! Automatic overflow remediation for Marp slide decks.
//!
//! This library renders a deck with Marp CLI, measures every slide in a
//! headless browser, and rewrites the Markdown until the content fits:
//! prose and lists are split at natural boundaries, while tables, code
//! blocks and images are shrunk with targeted CSS.
//!
//! ## Quick Start
//!
//! ```no_run
//! use slidefit::{FixConfig, SlideFixer};
//!
//! fn main() -> slidefit::Result<()> {
//!     let fixer = SlideFixer::new(FixConfig::default());
//!     let outcome = fixer.fix_file("deck.md".as_ref(), "deck.fixed.md".as_ref())?;
//!
//!     println!(
//!         "{} slides, {} fixes applied",
//!         outcome.stats.final_slide_count,
//!         outcome.stats.total_remediations()
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Real measurement**: overflow is detected in a browser, never estimated
//! - **Content-aware splitting**: sentence, list and heading boundaries
//! - **Targeted scaling**: CSS rules picked by what actually overflows
//! - **Iterative**: measures again after every fix until the deck fits
//! - **Lossless elsewhere**: slides that fit are reprinted unchanged

pub mod complexity;
pub mod config;
pub mod error;
pub mod markdown;
pub mod measure;
pub mod model;
pub mod pipeline;
pub mod scale;
pub mod segment;
pub mod split;

// Re-export commonly used types
pub use complexity::{estimate, ContentProfile};
pub use config::{FixConfig, Viewport};
pub use error::{Error, Result};
pub use measure::{ContentInfo, MarpProbe, OverflowProbe, OverflowReport};
pub use model::{Block, Deck, Frontmatter, Node, Slide};
pub use pipeline::{FixOutcome, FixStats, FixStatus, SlideFixer};
pub use scale::ScalingKind;

use std::path::Path;

/// Fix a Marp Markdown document with default settings.
///
/// Requires Marp CLI and Node.js with puppeteer on the path.
///
/// # Example
///
/// ```no_run
/// let source = std::fs::read_to_string("deck.md").unwrap();
/// let outcome = slidefit::fix_markdown(&source).unwrap();
/// std::fs::write("deck.fixed.md", outcome.markdown).unwrap();
/// ```
pub fn fix_markdown(source: &str) -> Result<FixOutcome> {
    SlideFixer::new(FixConfig::default()).fix(source)
}

/// Fix a Marp Markdown document with custom settings.
///
/// # Example
///
/// ```no_run
/// use slidefit::FixConfig;
///
/// let config = FixConfig::new().with_max_iterations(5);
/// let source = std::fs::read_to_string("deck.md").unwrap();
/// let outcome = slidefit::fix_markdown_with_config(&source, config).unwrap();
/// ```
pub fn fix_markdown_with_config(source: &str, config: FixConfig) -> Result<FixOutcome> {
    SlideFixer::new(config).fix(source)
}

/// Fix a deck file on disk, writing the result to `output`.
///
/// # Example
///
/// ```no_run
/// slidefit::fix_file("deck.md", "deck.fixed.md").unwrap();
/// ```
pub fn fix_file(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<FixOutcome> {
    SlideFixer::new(FixConfig::default()).fix_file(input.as_ref(), output.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_markdown_validates_before_measuring() {
        // No Marp frontmatter, so this fails before any external tool
        // would be needed.
        let err = fix_markdown("# plain markdown\n").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_fix_markdown_rejects_empty_input() {
        assert!(matches!(fix_markdown(""), Err(Error::Validation(_))));
    }

    #[test]
    fn test_parse_and_write_are_public() {
        let nodes = markdown::parse("---\nmarp: true\n---\n\n# Hi\n");
        let deck = segment::segment(nodes);
        assert_eq!(deck.slide_count(), 1);
        assert_eq!(markdown::write_deck(&deck), "---\nmarp: true\n---\n\n# Hi\n");
    }
}
