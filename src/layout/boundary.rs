//! Page boundary index built from rendered break positions

use crate::geometry::GeometryConfig;
use serde::Serialize;

/// Ordered page-top offsets used to attribute a vertical offset to a page.
///
/// The first page implicitly starts at 0; measured offsets of 0 are dropped
/// so no empty bucket appears. The last page extends without bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBoundaryIndex {
    /// Page tops, first entry always 0
    tops: Vec<f32>,
}

impl Default for PageBoundaryIndex {
    fn default() -> Self {
        Self { tops: vec![0.0] }
    }
}

impl PageBoundaryIndex {
    /// Build from the measured tops of the rendered page bodies
    pub fn from_break_tops(break_tops: impl IntoIterator<Item = f32>) -> Self {
        let mut tops = vec![0.0];
        tops.extend(
            break_tops
                .into_iter()
                .filter(|top| top.is_finite() && *top > 0.0),
        );
        tops[1..].sort_by(f32::total_cmp);
        Self { tops }
    }

    /// Number of pages the index knows about
    pub fn page_count(&self) -> usize {
        self.tops.len()
    }

    /// Page tops, starting with the implicit 0
    pub fn tops(&self) -> &[f32] {
        &self.tops
    }

    /// Vertical extent of a 1-based page; the last page is unbounded
    pub fn page_range(&self, page: usize) -> Option<(f32, f32)> {
        let index = page.checked_sub(1)?;
        let start = *self.tops.get(index)?;
        let end = self.tops.get(index + 1).copied().unwrap_or(f32::INFINITY);
        Some((start, end))
    }

    /// Classify a vertical offset into a 1-based page number
    pub fn classify(&self, offset: f32) -> usize {
        self.tops.partition_point(|&top| top <= offset).max(1)
    }

    /// Highest page holding any of the given offsets, 1 when there are none
    pub fn last_populated_page(&self, offsets: impl IntoIterator<Item = f32>) -> usize {
        offsets
            .into_iter()
            .map(|offset| self.classify(offset))
            .max()
            .unwrap_or(1)
    }
}

/// Minimum container height that fits every page up to and including the
/// one after the terminal break, with the gaps between them
pub fn container_min_height(terminal_break: usize, geometry: &GeometryConfig) -> f32 {
    let pages = terminal_break + 2;
    let gaps = terminal_break + 1;
    pages as f32 * geometry.page_height
        + gaps as f32 * (geometry.page_gap + 2.0 * geometry.page_gap_border_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_buckets() {
        let index = PageBoundaryIndex::from_break_tops([0.0, 900.0, 1800.0]);
        assert_eq!(index.tops(), &[0.0, 900.0, 1800.0]);
        assert_eq!(index.classify(1850.0), 3);
        assert_eq!(index.classify(0.0), 1);
        assert_eq!(index.classify(899.9), 1);
        assert_eq!(index.classify(900.0), 2);
        assert_eq!(index.classify(-20.0), 1);
        assert_eq!(index.classify(1.0e9), 3);
    }

    #[test]
    fn test_zero_and_unmeasured_offsets_dropped() {
        let index = PageBoundaryIndex::from_break_tops([0.0, f32::NAN, 852.0, 0.0, 1704.0]);
        assert_eq!(index.page_count(), 3);
        assert_eq!(index.tops(), &[0.0, 852.0, 1704.0]);
    }

    #[test]
    fn test_page_range() {
        let index = PageBoundaryIndex::from_break_tops([900.0, 1800.0]);
        assert_eq!(index.page_range(1), Some((0.0, 900.0)));
        assert_eq!(index.page_range(3), Some((1800.0, f32::INFINITY)));
        assert_eq!(index.page_range(0), None);
        assert_eq!(index.page_range(4), None);
    }

    #[test]
    fn test_last_populated_page() {
        let index = PageBoundaryIndex::from_break_tops([900.0, 1800.0, 2700.0]);
        assert_eq!(index.last_populated_page([10.0, 950.0, 1200.0]), 2);
        assert_eq!(index.last_populated_page(std::iter::empty()), 1);
        assert_eq!(PageBoundaryIndex::default().last_populated_page([5000.0]), 1);
    }

    #[test]
    fn test_container_min_height() {
        let geometry = GeometryConfig::default();
        // Terminal break 2: pages 1..=4 with three gaps of 50 + 2 * 1
        assert_eq!(container_min_height(2, &geometry), 4.0 * 800.0 + 3.0 * 52.0);
        assert_eq!(container_min_height(0, &geometry), 1600.0 + 52.0);
    }
}
