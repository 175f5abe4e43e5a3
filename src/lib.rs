//! Page-flow: print pagination for a continuously scrolling rich-text editor
//!
//! The editor content stays one continuous flow; this crate decorates it
//! with page break widgets so it reads as a sequence of printed pages:
//! - Content height sampling and page count estimation
//! - Break descriptor synthesis with per-page footer text
//! - Change classification with a debounced resize path
//! - Page boundary indexing and terminal page marking
//! - Footnote placement under page footers
//!
//! The host editor is reached through [`PageSurface`] and
//! [`ChangeObserver`]; [`SimulatedSurface`] is an in-memory host.

pub mod error;
pub mod footnote;
pub mod geometry;
pub mod host;
pub mod layout;
pub mod paginator;
pub mod trigger;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::{WasmFootnotePlacer, WasmPaginator};

// Re-export primary types
pub use error::{PaginationError, Result};
pub use footnote::{assign_footnotes, FootnotePlacer, FootnoteSurface, PageFootnotes};
pub use geometry::{FooterText, GeometryConfig, MarginUpdate, PaginationOptions};
pub use host::{
    ChangeObserver, ElementBox, ElementRole, MutationScope, PageSurface, SimulatedObserver,
    SimulatedSurface, Transaction,
};
pub use layout::{
    container_min_height, estimate_page_count, sample_content_height, synthesize,
    PageBoundaryIndex, PageBreakDescriptor, PaginationLayout,
};
pub use paginator::{Capabilities, Outcome, Paginator, PaginatorBuilder, PaginatorStats};
pub use trigger::{ChangeKind, Clock, ManualClock, RecomputeTrigger, SystemClock};
