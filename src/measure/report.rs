//! Overflow report types.
//!
//! These mirror the JSON the measurement probe prints, one report per
//! rendered slide. Field names stay camelCase on the wire.

use serde::{Deserialize, Serialize};

/// Measurement result for one rendered slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverflowReport {
    /// 1-based slide number
    pub slide_index: usize,

    /// True when either axis overflows
    pub has_overflow: bool,

    /// Content wider than the slide box
    pub has_horizontal_overflow: bool,

    /// Content taller than the slide box
    pub has_vertical_overflow: bool,

    /// Box and content extents in pixels
    pub dimensions: Dimensions,

    /// Pixels of content past the box on each axis
    pub overflow_amount: OverflowAmount,

    /// Census of what the rendered slide contains
    pub content_info: ContentInfo,

    /// Children poking out of the slide box, capped at the first ten
    #[serde(default)]
    pub problematic_elements: Vec<ProblematicElement>,
}

impl OverflowReport {
    /// Report for a slide that fits its box.
    pub fn fitting(slide_index: usize) -> Self {
        Self {
            slide_index,
            has_overflow: false,
            has_horizontal_overflow: false,
            has_vertical_overflow: false,
            dimensions: Dimensions {
                client_width: 1280.0,
                client_height: 720.0,
                scroll_width: 1280.0,
                scroll_height: 720.0,
            },
            overflow_amount: OverflowAmount {
                horizontal: 0.0,
                vertical: 0.0,
            },
            content_info: ContentInfo::default(),
            problematic_elements: Vec::new(),
        }
    }

    /// Report for a slide overflowing vertically by `amount` pixels.
    pub fn overflowing(slide_index: usize, amount: f64) -> Self {
        Self {
            slide_index,
            has_overflow: true,
            has_horizontal_overflow: false,
            has_vertical_overflow: true,
            dimensions: Dimensions {
                client_width: 1280.0,
                client_height: 720.0,
                scroll_width: 1280.0,
                scroll_height: 720.0 + amount,
            },
            overflow_amount: OverflowAmount {
                horizontal: 0.0,
                vertical: amount,
            },
            content_info: ContentInfo::default(),
            problematic_elements: Vec::new(),
        }
    }

    /// Replace the content census, builder style.
    pub fn with_content_info(mut self, content_info: ContentInfo) -> Self {
        self.content_info = content_info;
        self
    }
}

/// Slide box and content extents, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    pub client_width: f64,
    pub client_height: f64,
    pub scroll_width: f64,
    pub scroll_height: f64,
}

/// Pixels of content extending past the slide box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OverflowAmount {
    pub horizontal: f64,
    pub vertical: f64,
}

/// What the rendered slide contains, as seen in the DOM.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentInfo {
    /// Rendered text length in characters
    pub text_length: u64,

    /// Number of `li` elements
    pub list_item_count: u64,

    pub has_code_block: bool,
    pub has_table: bool,
    pub has_image: bool,

    /// Math rendering present (KaTeX or MathML)
    #[serde(default)]
    pub has_math: bool,
}

/// A direct child of the slide box that sticks out of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblematicElement {
    /// Lowercased element tag
    pub tag_name: String,

    /// The element's class attribute
    pub class_name: String,

    /// Position among the slide's children
    pub index: u64,

    /// Rendered size in pixels
    pub dimensions: ElementSize,

    /// Which edges the element crosses
    pub overflow_type: OverflowSides,
}

/// Rendered size of a problematic element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementSize {
    pub width: f64,
    pub height: f64,
}

/// Edge crossings for a problematic element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverflowSides {
    pub bottom: bool,
    pub right: bool,
    pub top: bool,
    pub left: bool,
}
