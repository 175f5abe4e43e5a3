//! Page break synthesis

use crate::geometry::GeometryConfig;
use crate::layout::{HEADROOM_PAGES, MAX_ESTIMATED_PAGES};
use serde::{Deserialize, Serialize};

/// Content area of the page preceding a break
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyBand {
    pub height: f32,
    /// Extra top offset; only the first page carries the header band here
    pub margin_top: f32,
    pub margin_left: f32,
    pub margin_right: f32,
}

/// Footer band closing a page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterBand {
    pub height: f32,
    /// 1-based number shown by the page-number counter
    pub page_number: usize,
    pub footer_text: String,
}

/// The strip between two pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapBand {
    pub height: f32,
    /// Border drawn on both lateral edges
    pub border_size: f32,
    pub background: String,
}

/// Header band opening the next page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBand {
    pub height: f32,
}

/// One synthesized page boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBreakDescriptor {
    pub page_index: usize,
    pub is_first_page: bool,
    /// Set after rendering, once the terminal page is known
    pub is_last_page: bool,
    pub body: BodyBand,
    pub footer: FooterBand,
    pub gap: GapBand,
    pub header: HeaderBand,
}

impl PageBreakDescriptor {
    /// Build the descriptor of the break that closes page `page_index`
    pub fn new(page_index: usize, geometry: &GeometryConfig) -> Self {
        let is_first_page = page_index == 0;

        Self {
            page_index,
            is_first_page,
            is_last_page: false,
            body: BodyBand {
                height: geometry.content_band_height(),
                margin_top: if is_first_page {
                    geometry.page_header_height
                } else {
                    0.0
                },
                margin_left: geometry.page_margin_left,
                margin_right: geometry.page_margin_right,
            },
            footer: FooterBand {
                height: geometry.page_footer_height,
                page_number: page_index + 1,
                footer_text: geometry.footer_text.resolve(page_index),
            },
            gap: GapBand {
                height: geometry.page_gap,
                border_size: geometry.page_gap_border_size,
                background: geometry.page_break_background.clone(),
            },
            header: HeaderBand {
                height: geometry.page_header_height,
            },
        }
    }

    /// Total height this break inserts into the flow
    pub fn overhead(&self) -> f32 {
        self.footer.height + self.gap.height + 2.0 * self.gap.border_size + self.header.height
    }
}

/// Build `page_count + HEADROOM_PAGES` break descriptors.
///
/// Total and pure: the same inputs always give the same descriptors.
/// Counts above [`MAX_ESTIMATED_PAGES`] are clamped.
pub fn synthesize(page_count: usize, geometry: &GeometryConfig) -> Vec<PageBreakDescriptor> {
    (0..page_count.min(MAX_ESTIMATED_PAGES) + HEADROOM_PAGES)
        .map(|page_index| PageBreakDescriptor::new(page_index, geometry))
        .collect()
}
