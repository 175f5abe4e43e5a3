//! Host environment seams: measurement surface, change observation, transactions

mod simulated;
mod transaction;

pub use simulated::{SimulatedObserver, SimulatedSurface};
pub use transaction::{Transaction, PAGE_MARGINS_UPDATED, PAGINATION_UPDATED, REFRESH_PAGINATION};

use crate::layout::PageBreakDescriptor;
use serde::{Deserialize, Serialize};

/// Structural role of a direct child of the content container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ElementRole {
    /// Subtree holding the rendered page breaks
    PaginationWidget,
    /// Spacer reserving the first page's header band
    HeaderSpacer,
    /// A top-level document block
    Content,
    /// Spacer reserving the last page's footer band
    FooterSpacer,
}

/// Post-layout measurement of one child
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementBox {
    pub role: ElementRole,
    pub top: f32,
    pub height: f32,
}

/// Where an observed DOM mutation happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationScope {
    /// Inside document content
    Content,
    /// Inside the pagination widget (the paginator's own rendering)
    PaginationWidget,
}

/// The rendered container the paginator measures and decorates
pub trait PageSurface {
    /// Whether the pagination widget has been mounted
    fn has_pagination_widget(&self) -> bool;

    fn viewport_width(&self) -> f32;

    /// Direct children of the container, in document order
    fn children(&self) -> Vec<ElementBox>;

    fn add_container_class(&mut self, class: &str);

    /// Replace the single injected style element
    fn inject_style(&mut self, css: &str);

    /// Replace all rendered breaks
    fn render_breaks(&mut self, breaks: &[PageBreakDescriptor]);

    /// Measured top offsets of the page bodies following each rendered break
    fn break_body_tops(&self) -> Vec<f32>;

    /// Show breaks up to `break_index`, hide the rest
    fn mark_terminal(&mut self, break_index: usize);

    fn set_min_height(&mut self, height: f32);

    /// Hand a transaction back to the host editor
    fn dispatch(&mut self, tx: Transaction);
}

pub type ContentChangeCallback = Box<dyn FnMut(MutationScope)>;
pub type ResizeCallback = Box<dyn FnMut(f32)>;

/// Change notifications provided by the host
pub trait ChangeObserver {
    fn observe_content_change(&mut self, callback: ContentChangeCallback);

    /// Callback receives the new container width
    fn observe_resize(&mut self, callback: ResizeCallback);
}
