//! Style sheet derived from the page geometry

use crate::geometry::GeometryConfig;

/// Class added to the container the paginator owns
pub const PAGINATION_CLASS: &str = "rm-with-pagination";

/// Attribute identifying the single injected style element
pub const STYLE_SCOPE_ATTR: &str = "data-rm-pagination-style";

/// Name of the CSS counter driving page numbers
pub const PAGE_COUNTER: &str = "rm-page-number";

/// Build the CSS injected alongside the break widgets.
///
/// Page numbers come from a CSS counter, so the footer bands only carry
/// the resolved footer text.
pub fn build_style_sheet(geometry: &GeometryConfig) -> String {
    let scope = format!(".{}", PAGINATION_CLASS);

    format!(
        "{scope} {{ counter-reset: {counter}; padding-left: {left}px; padding-right: {right}px; }}\n\
         {scope} .rm-first-page-header {{ height: {header}px; }}\n\
         {scope} .rm-page-break {{ width: 100%; }}\n\
         {scope} .rm-page-break .page {{ margin-left: -{left}px; margin-right: -{right}px; }}\n\
         {scope} .rm-page-footer {{ height: {footer}px; counter-increment: {counter}; }}\n\
         {scope} .rm-page-footer .rm-page-number::before {{ content: counter({counter}); }}\n\
         {scope} .rm-pagination-gap {{ height: {gap}px; background: {background}; \
         border-left: {border}px solid; border-right: {border}px solid; }}\n\
         {scope} .rm-page-header {{ height: {header}px; }}\n\
         {scope} .rm-page-break.last-page .rm-pagination-gap, \
         {scope} .rm-page-break.last-page .rm-page-header {{ display: none; }}\n\
         {scope} .rm-page-break.last-page ~ .rm-page-break {{ display: none; }}\n",
        scope = scope,
        counter = PAGE_COUNTER,
        left = geometry.page_margin_left,
        right = geometry.page_margin_right,
        header = geometry.page_header_height,
        footer = geometry.page_footer_height,
        gap = geometry.page_gap,
        border = geometry.page_gap_border_size,
        background = geometry.page_break_background,
    )
}
