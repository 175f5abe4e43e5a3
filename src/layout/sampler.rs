//! Content height sampling

use crate::host::{ElementBox, ElementRole};
use serde::Serialize;

/// Measured height of the flowed content
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentHeightSample {
    pub total_content_height: f32,
    pub viewport_width: f32,
    pub block_count: usize,
}

/// Sum the rendered heights of the content blocks.
///
/// The pagination widget, the header spacer and the footer spacer are
/// structural and never counted. Unmeasurable heights count as zero.
pub fn sample_content_height(children: &[ElementBox], viewport_width: f32) -> ContentHeightSample {
    let mut sample = ContentHeightSample {
        viewport_width,
        ..ContentHeightSample::default()
    };

    for child in children.iter().filter(|c| c.role == ElementRole::Content) {
        sample.total_content_height += child.height.max(0.0);
        sample.block_count += 1;
    }

    sample
}
