//! Overflow measurement.
//!
//! The pipeline never guesses whether a slide fits; it renders the deck
//! and asks a browser. [`OverflowProbe`] is the seam: the real
//! [`MarpProbe`] shells out to Marp CLI and Puppeteer, while tests supply
//! scripted probes.

mod marp;
mod report;

pub use marp::MarpProbe;
pub use report::{
    ContentInfo, Dimensions, ElementSize, OverflowAmount, OverflowReport, OverflowSides,
    ProblematicElement,
};

use crate::error::Result;

/// Renders a Markdown deck and reports per-slide overflow.
pub trait OverflowProbe {
    /// Measure every slide of the deck, in slide order.
    fn measure(&self, markdown: &str) -> Result<Vec<OverflowReport>>;
}
