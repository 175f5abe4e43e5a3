//! Host-facing pagination options

use super::{FooterText, GeometryConfig};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Footer text as it can be written in JSON options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FooterTextOption {
    Fixed(String),
    PerPage(Vec<String>),
}

impl Default for FooterTextOption {
    fn default() -> Self {
        FooterTextOption::Fixed(String::new())
    }
}

impl From<FooterTextOption> for FooterText {
    fn from(option: FooterTextOption) -> Self {
        match option {
            FooterTextOption::Fixed(text) => FooterText::Fixed(text),
            FooterTextOption::PerPage(texts) => FooterText::PerPage(texts),
        }
    }
}

/// Options recognized by the paginator; every key is optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationOptions {
    pub page_height: f32,
    pub page_gap: f32,
    pub page_gap_border_size: f32,
    pub page_break_background: String,
    pub page_header_height: f32,
    pub page_footer_height: f32,
    pub page_margin_left: f32,
    pub page_margin_right: f32,
    pub footer_text: FooterTextOption,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            page_height: 800.0,
            page_gap: 50.0,
            page_gap_border_size: 1.0,
            page_break_background: "#ffffff".to_string(),
            page_header_height: 30.0,
            page_footer_height: 30.0,
            page_margin_left: 50.0,
            page_margin_right: 50.0,
            footer_text: FooterTextOption::default(),
        }
    }
}

impl PaginationOptions {
    /// Parse options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Convert into a validated geometry
    pub fn into_geometry(self) -> Result<GeometryConfig> {
        let geometry = GeometryConfig::from(self);
        geometry.validate()?;
        Ok(geometry)
    }
}

impl From<PaginationOptions> for GeometryConfig {
    fn from(options: PaginationOptions) -> Self {
        Self {
            page_height: options.page_height,
            page_gap: options.page_gap,
            page_gap_border_size: options.page_gap_border_size,
            page_header_height: options.page_header_height,
            page_footer_height: options.page_footer_height,
            page_margin_left: options.page_margin_left,
            page_margin_right: options.page_margin_right,
            page_break_background: options.page_break_background,
            footer_text: options.footer_text.into(),
        }
    }
}
