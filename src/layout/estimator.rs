//! Page count estimation from sampled content height
//!
//! The estimate is approximate. Measured heights may still contain the
//! overhead of breaks rendered by the previous layout, which is subtracted
//! assuming every non-headroom break was crossed by content. The result can
//! be off by one page around band boundaries; it is recomputed from scratch
//! on every resynthesis, which lets successive passes settle on a fixed point.

use crate::geometry::GeometryConfig;
use crate::layout::{HEADROOM_PAGES, MAX_ESTIMATED_PAGES};

/// Estimate how many breaks the content needs, excluding headroom.
///
/// `previous_break_count` is the number of descriptors rendered by the
/// previous layout (0 when nothing has been rendered yet). The result is
/// one less than the number of content bands needed because the
/// synthesizer always adds [`HEADROOM_PAGES`] on top. Unbounded heights
/// clamp to [`MAX_ESTIMATED_PAGES`].
pub fn estimate_page_count(
    content_height: f32,
    previous_break_count: usize,
    geometry: &GeometryConfig,
) -> usize {
    let band = geometry.content_band_height();
    if band <= 0.0 {
        return 0;
    }

    let carried_breaks = previous_break_count.saturating_sub(HEADROOM_PAGES);
    let overhead = carried_breaks as f32 * geometry.break_overhead();
    let adjusted = (content_height - overhead).max(0.0);

    let pages = (adjusted / band).ceil() as usize;
    pages.saturating_sub(1).min(MAX_ESTIMATED_PAGES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content() {
        let geometry = GeometryConfig::default();
        assert_eq!(estimate_page_count(0.0, 0, &geometry), 0);
        assert_eq!(estimate_page_count(0.0, 12, &geometry), 0);
    }

    #[test]
    fn test_undershoots_by_one() {
        let geometry = GeometryConfig::default();
        // 740 per content band
        assert_eq!(estimate_page_count(740.0, 0, &geometry), 0);
        assert_eq!(estimate_page_count(741.0, 0, &geometry), 1);
        assert_eq!(estimate_page_count(2000.0, 0, &geometry), 2);
    }

    #[test]
    fn test_previous_overhead_subtracted() {
        let geometry = GeometryConfig::default();
        // Two carried breaks of 112 each
        assert_eq!(estimate_page_count(2224.0, 7, &geometry), 2);
        // Headroom-only layouts carry no overhead
        assert_eq!(estimate_page_count(2000.0, 5, &geometry), 2);
        assert_eq!(estimate_page_count(2000.0, 3, &geometry), 2);
    }

    #[test]
    fn test_unbounded_height_is_clamped() {
        let geometry = GeometryConfig::default();
        assert_eq!(estimate_page_count(f32::INFINITY, 0, &geometry), MAX_ESTIMATED_PAGES);
        assert_eq!(estimate_page_count(f32::MAX, usize::MAX, &geometry), MAX_ESTIMATED_PAGES);
        assert_eq!(estimate_page_count(f32::NAN, 0, &geometry), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        /// Integral band sizes with room left for content
        fn geometry() -> impl Strategy<Value = GeometryConfig> {
            (200u32..2000, 0u32..100, 0u32..100, 0u32..120, 0u32..6).prop_map(
                |(page_height, header, footer, gap, border)| GeometryConfig {
                    page_height: page_height as f32,
                    page_header_height: header as f32,
                    page_footer_height: footer as f32,
                    page_gap: gap as f32,
                    page_gap_border_size: border as f32,
                    ..GeometryConfig::default()
                },
            )
        }

        proptest! {
            #[test]
            fn estimate_never_decreases_with_height(
                geometry in geometry(),
                a in 0.0f32..1_000_000.0,
                b in 0.0f32..1_000_000.0,
                previous in 0usize..200,
            ) {
                prop_assert!(geometry.validate().is_ok());
                let (low, high) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(
                    estimate_page_count(low, previous, &geometry)
                        <= estimate_page_count(high, previous, &geometry)
                );
            }

            #[test]
            fn estimate_undershoots_needed_bands_by_one(
                geometry in geometry(),
                height in 1.0f32..1_000_000.0,
            ) {
                let needed = (height / geometry.content_band_height()).ceil() as usize;
                prop_assert_eq!(
                    estimate_page_count(height, 0, &geometry),
                    (needed - 1).min(MAX_ESTIMATED_PAGES)
                );
            }
        }
    }
}
