//! Pagination layout: measurement, estimation, break synthesis, and boundaries

mod boundary;
mod estimator;
mod sampler;
mod style;
mod synthesizer;

pub use boundary::{container_min_height, PageBoundaryIndex};
pub use estimator::estimate_page_count;
pub use sampler::{sample_content_height, ContentHeightSample};
pub use style::{build_style_sheet, PAGE_COUNTER, PAGINATION_CLASS, STYLE_SCOPE_ATTR};
pub use synthesizer::{
    synthesize, BodyBand, FooterBand, GapBand, HeaderBand, PageBreakDescriptor,
};

use serde::Serialize;

/// Extra breaks rendered beyond the estimate, hidden until content grows into them
pub const HEADROOM_PAGES: usize = 5;

/// Upper bound on estimated breaks; larger counts are clamped
pub const MAX_ESTIMATED_PAGES: usize = 10_000;

/// Result of one resynthesis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationLayout {
    /// Incremented on every resynthesis
    pub version: u64,
    pub sample: ContentHeightSample,
    /// Estimated breaks, excluding headroom
    pub estimated_pages: usize,
    pub breaks: Vec<PageBreakDescriptor>,
    pub boundaries: PageBoundaryIndex,
    /// Index of the break marked as the last visible one
    pub terminal_break: usize,
    pub min_height: f32,
}

impl PaginationLayout {
    /// Number of pages holding content
    pub fn content_pages(&self) -> usize {
        self.terminal_break + 1
    }

    /// Breaks shown to the user; the rest is pre-rendered slack
    pub fn visible_breaks(&self) -> &[PageBreakDescriptor] {
        let end = (self.terminal_break + 1).min(self.breaks.len());
        &self.breaks[..end]
    }

    /// Footer texts of all breaks, in order
    pub fn footer_texts(&self) -> Vec<&str> {
        self.breaks
            .iter()
            .map(|b| b.footer.footer_text.as_str())
            .collect()
    }
}
