//! The fix pipeline.
//!
//! One fix run validates the document, then iterates: render and measure
//! every slide, split the ones that overflow when splitting is safe, and
//! scale the rest. The loop ends when every slide fits, when the
//! iteration budget runs out, or as soon as a whole round changes
//! nothing.

use std::fs;
use std::path::Path;

use regex::Regex;

use crate::config::FixConfig;
use crate::error::{Error, Result};
use crate::markdown;
use crate::measure::{MarpProbe, OverflowProbe, OverflowReport};
use crate::model::{Deck, Slide};
use crate::scale::{self, ScalingKind};
use crate::segment;
use crate::split;

/// Counters accumulated over a fix run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixStats {
    /// Measurement rounds performed
    pub iterations: usize,

    /// Slides replaced by a split
    pub slides_split: usize,

    /// Slides handled by an element-targeted CSS rule
    pub slides_scaled_locally: usize,

    /// Slides handled by font scaling
    pub slides_scaled_globally: usize,

    /// Slides in the input deck
    pub initial_slide_count: usize,

    /// Slides in the output deck
    pub final_slide_count: usize,
}

impl FixStats {
    /// Total remediations applied across all rounds.
    pub fn total_remediations(&self) -> usize {
        self.slides_split + self.slides_scaled_locally + self.slides_scaled_globally
    }
}

/// How a fix run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixStatus {
    /// Every slide fits its box
    Converged,

    /// Overflow remained when the run stopped; indices are the 1-based
    /// slides still overflowing at the last measurement
    Exhausted { unresolved: Vec<usize> },
}

/// Result of a fix run: the rewritten document plus bookkeeping.
#[derive(Debug, Clone)]
pub struct FixOutcome {
    /// The remediated Markdown document
    pub markdown: String,

    /// Counters for reporting
    pub stats: FixStats,

    /// Terminal state of the run
    pub status: FixStatus,
}

impl FixOutcome {
    /// True when the run ended with every slide fitting.
    pub fn converged(&self) -> bool {
        matches!(self.status, FixStatus::Converged)
    }
}

/// Drives the measure-and-remediate loop over a deck.
pub struct SlideFixer<P> {
    probe: P,
    config: FixConfig,
}

impl SlideFixer<MarpProbe> {
    /// Create a fixer measuring through Marp CLI and Puppeteer.
    pub fn new(config: FixConfig) -> Self {
        let probe = MarpProbe::new(&config);
        Self { probe, config }
    }
}

impl<P: OverflowProbe> SlideFixer<P> {
    /// Create a fixer with a caller-supplied probe.
    pub fn with_probe(probe: P, config: FixConfig) -> Self {
        Self { probe, config }
    }

    /// Fix a Markdown document and return the rewritten text.
    pub fn fix(&self, source: &str) -> Result<FixOutcome> {
        let mut deck = segment::segment(markdown::parse(source));
        validate(&deck)?;
        log::info!("validated deck with {} slides", deck.slide_count());

        let mut stats = FixStats {
            initial_slide_count: deck.slide_count(),
            ..FixStats::default()
        };
        let mut unresolved: Vec<usize> = Vec::new();
        let mut converged = false;

        for iteration in 1..=self.config.max_iterations {
            stats.iterations = iteration;
            let rendered = markdown::write_deck(&deck);
            let reports = self.probe.measure(&rendered)?;
            let mut overflowing: Vec<OverflowReport> =
                reports.into_iter().filter(|r| r.has_overflow).collect();

            if overflowing.is_empty() {
                log::info!("iteration {}: all slides fit", iteration);
                converged = true;
                break;
            }
            log::info!(
                "iteration {}/{}: {} slides overflow",
                iteration,
                self.config.max_iterations,
                overflowing.len()
            );

            // Remediate bottom-up so a split cannot shift the indices of
            // slides still waiting for theirs.
            overflowing.sort_by(|a, b| b.slide_index.cmp(&a.slide_index));
            unresolved = overflowing.iter().map(|r| r.slide_index).rev().collect();

            let mut mutations = 0;
            for report in &overflowing {
                if self.remediate(&mut deck, report, &mut stats) {
                    mutations += 1;
                }
            }
            if mutations == 0 {
                log::warn!("no remediation applies to the remaining overflow; stopping");
                break;
            }
        }

        stats.final_slide_count = deck.slide_count();
        let status = if converged {
            FixStatus::Converged
        } else {
            FixStatus::Exhausted { unresolved }
        };
        Ok(FixOutcome {
            markdown: markdown::write_deck(&deck),
            stats,
            status,
        })
    }

    /// Fix a file on disk, writing the result to `output`.
    pub fn fix_file(&self, input: &Path, output: &Path) -> Result<FixOutcome> {
        let source = fs::read_to_string(input)?;
        let outcome = self.fix(&source)?;
        fs::write(output, &outcome.markdown)?;
        log::info!("wrote {}", output.display());
        Ok(outcome)
    }

    /// Apply one remediation to one overflowing slide. Returns whether
    /// the deck changed.
    fn remediate(&self, deck: &mut Deck, report: &OverflowReport, stats: &mut FixStats) -> bool {
        let index = report.slide_index;
        if index == 0 || index > deck.slide_count() {
            log::warn!("probe reported unknown slide {}", index);
            return false;
        }
        let idx = index - 1;

        let slide = &deck.slides[idx];
        let pieces = split::split_slide(slide.content.clone(), &self.config);
        if pieces.len() > 1 {
            let frontmatter = slide.frontmatter.clone();
            let mut replacements: Vec<Slide> = pieces.into_iter().map(Slide::new).collect();
            replacements[0].frontmatter = frontmatter;
            log::info!("slide {}: split into {} slides", index, replacements.len());
            deck.replace_slide(idx, replacements);
            stats.slides_split += 1;
            return true;
        }

        match scale::apply_scaling(deck, idx, report, &self.config) {
            Some(ScalingKind::Local) => {
                stats.slides_scaled_locally += 1;
                true
            }
            Some(ScalingKind::Global) => {
                stats.slides_scaled_globally += 1;
                true
            }
            None => {
                log::debug!("slide {}: no remediation applicable", index);
                false
            }
        }
    }
}

/// Check that the deck is a Marp document before measuring anything.
///
/// The first slide must carry frontmatter declaring `marp: true` or a
/// `theme`, which is what makes Marp CLI treat the file as a deck.
fn validate(deck: &Deck) -> Result<()> {
    if deck.is_empty() {
        return Err(Error::Validation("document contains no slides".to_string()));
    }
    let frontmatter = deck.document_frontmatter().ok_or_else(|| {
        Error::Validation("first slide has no frontmatter".to_string())
    })?;

    let marp = Regex::new(r"(?m)^marp:\s*true\b").unwrap();
    let theme = Regex::new(r"(?m)^theme:\s*.+").unwrap();
    if !marp.is_match(&frontmatter.text) && !theme.is_match(&frontmatter.text) {
        return Err(Error::Validation(
            "frontmatter declares neither marp: true nor a theme".to_string(),
        ));
    }
    Ok(())
}
