//! Page geometry: band sizes, margins, and footer text

mod footer;
mod options;

pub use footer::FooterText;
pub use options::{FooterTextOption, PaginationOptions};

use crate::error::{PaginationError, Result};
use serde::{Deserialize, Serialize};

/// Snapshot of the page geometry used by one resynthesis
#[derive(Debug, Clone)]
pub struct GeometryConfig {
    pub page_height: f32,
    pub page_gap: f32,
    pub page_gap_border_size: f32,
    pub page_header_height: f32,
    pub page_footer_height: f32,
    pub page_margin_left: f32,
    pub page_margin_right: f32,
    /// Fill color of the gap band between pages
    pub page_break_background: String,
    pub footer_text: FooterText,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        PaginationOptions::default().into()
    }
}

impl GeometryConfig {
    /// Vertical space available for content on one page
    pub fn content_band_height(&self) -> f32 {
        self.page_height - self.page_header_height - self.page_footer_height
    }

    /// Height added to the flow by one break: footer, gap with borders, header
    pub fn break_overhead(&self) -> f32 {
        self.page_gap
            + self.page_header_height
            + self.page_footer_height
            + 2.0 * self.page_gap_border_size
    }

    /// Distance between the tops of two consecutive pages
    pub fn page_stride(&self) -> f32 {
        self.page_height + self.page_gap + 2.0 * self.page_gap_border_size
    }

    /// Check every numeric field and the content band
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("pageHeight", self.page_height),
            ("pageGap", self.page_gap),
            ("pageGapBorderSize", self.page_gap_border_size),
            ("pageHeaderHeight", self.page_header_height),
            ("pageFooterHeight", self.page_footer_height),
            ("pageMarginLeft", self.page_margin_left),
            ("pageMarginRight", self.page_margin_right),
        ];
        for (field, value) in fields {
            check_non_negative(field, value)?;
        }

        if self.content_band_height() <= 0.0 {
            return Err(PaginationError::DegenerateGeometry {
                page_height: self.page_height,
                header: self.page_header_height,
                footer: self.page_footer_height,
            });
        }

        Ok(())
    }

    /// Return a copy with the margin update applied.
    ///
    /// Every provided field is checked before anything is copied, so a
    /// rejected update never leaves a half-applied geometry behind.
    pub fn with_margins(&self, update: &MarginUpdate) -> Result<GeometryConfig> {
        let provided = [
            ("left", update.left),
            ("right", update.right),
            ("top", update.top),
            ("bottom", update.bottom),
        ];
        for (field, value) in provided {
            if let Some(value) = value {
                check_non_negative(field, value)?;
            }
        }

        let mut next = self.clone();
        if let Some(left) = update.left {
            next.page_margin_left = left;
        }
        if let Some(right) = update.right {
            next.page_margin_right = right;
        }
        if let Some(top) = update.top {
            next.page_header_height = top;
        }
        if let Some(bottom) = update.bottom {
            next.page_footer_height = bottom;
        }

        next.validate()?;
        Ok(next)
    }
}

fn check_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(PaginationError::InvalidConfigurationValue { field, value })
    }
}

/// Partial margin update; `top` and `bottom` resize the header and footer bands
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginUpdate {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

impl MarginUpdate {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }
}
