//! Change classification deciding when the layout must be rebuilt

mod timer;

pub use timer::{Clock, DebounceTimer, IntervalTimer, ManualClock, SystemClock, RESIZE_DEBOUNCE_MS};

use crate::host::{
    MutationScope, Transaction, PAGE_MARGINS_UPDATED, PAGINATION_UPDATED, REFRESH_PAGINATION,
};

/// Width change below which a resize is ignored
pub const RESIZE_THRESHOLD: f32 = 5.0;

/// Something that happened to the editor or its container
#[derive(Debug, Clone, Copy)]
pub enum ChangeEvent<'a> {
    Transaction(&'a Transaction),
    ContentMutated(MutationScope),
    Resized { width: f32 },
    MarginsUpdated,
    RefreshRequested,
}

/// How a change affects the layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    DocumentChanged,
    MarginsOrGeometryChanged,
    ViewportResized,
    ExplicitRefreshRequested,
    Unrelated,
}

impl ChangeKind {
    pub fn requires_resynthesis(self) -> bool {
        !matches!(self, ChangeKind::Unrelated)
    }

    /// Whether the injected style sheet must be rebuilt as well
    pub fn requires_style_refresh(self) -> bool {
        matches!(self, ChangeKind::MarginsOrGeometryChanged)
    }
}

/// Classifies changes; tracks the last accepted container width
#[derive(Debug, Clone, Default)]
pub struct RecomputeTrigger {
    resize_aware: bool,
    last_width: Option<f32>,
}

impl RecomputeTrigger {
    pub fn new(resize_aware: bool) -> Self {
        Self {
            resize_aware,
            last_width: None,
        }
    }

    /// Seed the width baseline without classifying a resize
    pub fn observe_width(&mut self, width: f32) {
        self.last_width = Some(width);
    }

    pub fn last_width(&self) -> Option<f32> {
        self.last_width
    }

    pub fn classify(&mut self, event: &ChangeEvent<'_>) -> ChangeKind {
        match event {
            ChangeEvent::Transaction(tx) => classify_transaction(tx),
            ChangeEvent::ContentMutated(MutationScope::Content) => ChangeKind::DocumentChanged,
            ChangeEvent::ContentMutated(MutationScope::PaginationWidget) => ChangeKind::Unrelated,
            ChangeEvent::Resized { width } => self.classify_resize(*width),
            ChangeEvent::MarginsUpdated => ChangeKind::MarginsOrGeometryChanged,
            ChangeEvent::RefreshRequested => ChangeKind::ExplicitRefreshRequested,
        }
    }

    fn classify_resize(&mut self, width: f32) -> ChangeKind {
        if !self.resize_aware || !width.is_finite() {
            return ChangeKind::Unrelated;
        }
        match self.last_width {
            Some(last) if (width - last).abs() <= RESIZE_THRESHOLD => ChangeKind::Unrelated,
            Some(_) => {
                self.last_width = Some(width);
                ChangeKind::ViewportResized
            }
            None => {
                self.last_width = Some(width);
                ChangeKind::Unrelated
            }
        }
    }
}

fn classify_transaction(tx: &Transaction) -> ChangeKind {
    if tx.has_meta(PAGINATION_UPDATED) {
        ChangeKind::Unrelated
    } else if tx.has_meta(REFRESH_PAGINATION) {
        ChangeKind::ExplicitRefreshRequested
    } else if tx.has_meta(PAGE_MARGINS_UPDATED) {
        ChangeKind::MarginsOrGeometryChanged
    } else if tx.doc_changed {
        ChangeKind::DocumentChanged
    } else {
        ChangeKind::Unrelated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transactions() {
        let mut trigger = RecomputeTrigger::new(true);
        let edit = Transaction::doc_change();
        let selection = Transaction::new();
        let refresh = Transaction::new().with_meta(REFRESH_PAGINATION, true);
        let margins = Transaction::new().with_meta(PAGE_MARGINS_UPDATED, true);
        let own = Transaction::doc_change().with_meta(PAGINATION_UPDATED, 4u64);

        assert_eq!(trigger.classify(&ChangeEvent::Transaction(&edit)), ChangeKind::DocumentChanged);
        assert_eq!(trigger.classify(&ChangeEvent::Transaction(&selection)), ChangeKind::Unrelated);
        assert_eq!(
            trigger.classify(&ChangeEvent::Transaction(&refresh)),
            ChangeKind::ExplicitRefreshRequested
        );
        assert_eq!(
            trigger.classify(&ChangeEvent::Transaction(&margins)),
            ChangeKind::MarginsOrGeometryChanged
        );
        assert_eq!(trigger.classify(&ChangeEvent::Transaction(&own)), ChangeKind::Unrelated);
    }

    #[test]
    fn test_mutations() {
        let mut trigger = RecomputeTrigger::new(true);
        assert_eq!(
            trigger.classify(&ChangeEvent::ContentMutated(MutationScope::Content)),
            ChangeKind::DocumentChanged
        );
        assert_eq!(
            trigger.classify(&ChangeEvent::ContentMutated(MutationScope::PaginationWidget)),
            ChangeKind::Unrelated
        );
    }

    #[test]
    fn test_resize_threshold() {
        let mut trigger = RecomputeTrigger::new(true);
        // First observation only records the baseline
        assert_eq!(trigger.classify(&ChangeEvent::Resized { width: 600.0 }), ChangeKind::Unrelated);
        assert_eq!(trigger.classify(&ChangeEvent::Resized { width: 604.0 }), ChangeKind::Unrelated);
        assert_eq!(trigger.classify(&ChangeEvent::Resized { width: 605.0 }), ChangeKind::Unrelated);
        assert_eq!(
            trigger.classify(&ChangeEvent::Resized { width: 620.0 }),
            ChangeKind::ViewportResized
        );
        assert_eq!(trigger.last_width(), Some(620.0));
    }

    #[test]
    fn test_resize_ignored_without_capability() {
        let mut trigger = RecomputeTrigger::new(false);
        trigger.observe_width(600.0);
        assert_eq!(trigger.classify(&ChangeEvent::Resized { width: 900.0 }), ChangeKind::Unrelated);
    }

    #[test]
    fn test_kind_predicates() {
        assert!(ChangeKind::DocumentChanged.requires_resynthesis());
        assert!(!ChangeKind::Unrelated.requires_resynthesis());
        assert!(ChangeKind::MarginsOrGeometryChanged.requires_style_refresh());
        assert!(!ChangeKind::ViewportResized.requires_style_refresh());
    }
}
