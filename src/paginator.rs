//! The pagination engine bound to one editor instance

use crate::error::{PaginationError, Result};
use crate::geometry::{GeometryConfig, MarginUpdate};
use crate::host::{
    ChangeObserver, ElementRole, MutationScope, PageSurface, Transaction, PAGINATION_UPDATED,
};
use crate::layout::{
    build_style_sheet, container_min_height, estimate_page_count, sample_content_height,
    synthesize, PageBoundaryIndex, PaginationLayout, PAGINATION_CLASS,
};
use crate::trigger::{
    ChangeEvent, ChangeKind, Clock, DebounceTimer, RecomputeTrigger, SystemClock,
    RESIZE_DEBOUNCE_MS,
};
use log::{debug, trace, warn};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Optional behaviors; the presets match successive revisions of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Accept `update_page_margins`
    pub responsive_margins: bool,
    /// Repaginate when the container width changes
    pub resize_aware: bool,
}

impl Capabilities {
    pub fn basic() -> Self {
        Self {
            responsive_margins: false,
            resize_aware: false,
        }
    }

    pub fn responsive() -> Self {
        Self {
            responsive_margins: true,
            resize_aware: false,
        }
    }

    pub fn full() -> Self {
        Self {
            responsive_margins: true,
            resize_aware: true,
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::full()
    }
}

/// Counters describing what the engine has done so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatorStats {
    pub resyntheses: usize,
    pub reuses: usize,
    pub deferred_resizes: usize,
    pub skipped: usize,
    pub style_issues: usize,
}

/// What handling one change did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Breaks were rebuilt; carries the new layout version
    Resynthesized { version: u64 },
    /// The previous layout was kept as is
    Reused,
    /// A resize was queued behind the debounce timer
    Deferred,
    /// The pagination widget is not mounted yet
    Skipped,
}

#[derive(Debug, Clone, Copy)]
enum HostSignal {
    Content(MutationScope),
    Resize(f32),
}

/// Configures and builds a [`Paginator`]
pub struct PaginatorBuilder {
    geometry: GeometryConfig,
    capabilities: Capabilities,
    clock: Option<Rc<dyn Clock>>,
    label: String,
}

impl PaginatorBuilder {
    pub fn new(geometry: GeometryConfig) -> Self {
        Self {
            geometry,
            capabilities: Capabilities::default(),
            clock: None,
            label: "paginator".to_string(),
        }
    }

    pub fn capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Clock driving the resize debounce; defaults to the system clock
    pub fn clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Name used in log messages of this instance
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn build<S: PageSurface>(self, surface: S) -> Result<Paginator<S>> {
        self.geometry.validate()?;
        let clock = self.clock.unwrap_or_else(|| Rc::new(SystemClock));

        Ok(Paginator {
            surface,
            geometry: self.geometry,
            capabilities: self.capabilities,
            trigger: RecomputeTrigger::new(self.capabilities.resize_aware),
            resize_timer: DebounceTimer::new(clock, RESIZE_DEBOUNCE_MS),
            inbox: Rc::new(RefCell::new(VecDeque::new())),
            layout: None,
            version: 0,
            stats: PaginatorStats::default(),
            label: self.label,
        })
    }
}

/// Paginates the content of one surface
pub struct Paginator<S: PageSurface> {
    surface: S,
    geometry: GeometryConfig,
    capabilities: Capabilities,
    trigger: RecomputeTrigger,
    resize_timer: DebounceTimer,
    /// Filled by observer callbacks, drained by `poll`
    inbox: Rc<RefCell<VecDeque<HostSignal>>>,
    layout: Option<PaginationLayout>,
    version: u64,
    stats: PaginatorStats,
    label: String,
}

impl<S: PageSurface> Paginator<S> {
    /// Paginator with default capabilities and the system clock
    pub fn new(surface: S, geometry: GeometryConfig) -> Result<Self> {
        PaginatorBuilder::new(geometry).build(surface)
    }

    /// Claim the container, inject the style sheet, and lay out the first time
    pub fn mount(&mut self) -> Outcome {
        self.surface.add_container_class(PAGINATION_CLASS);
        self.issue_style();
        self.trigger.observe_width(self.surface.viewport_width());
        self.resynthesize()
    }

    /// Route the host's change notifications into this paginator
    pub fn attach(&mut self, observer: &mut dyn ChangeObserver) {
        let inbox = Rc::clone(&self.inbox);
        observer.observe_content_change(Box::new(move |scope| {
            inbox.borrow_mut().push_back(HostSignal::Content(scope));
        }));

        let inbox = Rc::clone(&self.inbox);
        observer.observe_resize(Box::new(move |width| {
            inbox.borrow_mut().push_back(HostSignal::Resize(width));
        }));
    }

    /// Handle queued observer signals and a due resize.
    ///
    /// Returns the number of resyntheses performed.
    pub fn poll(&mut self) -> usize {
        let mut resyntheses = 0;

        loop {
            let signal = self.inbox.borrow_mut().pop_front();
            let Some(signal) = signal else { break };
            let outcome = match signal {
                HostSignal::Content(scope) => self.handle_content_mutation(scope),
                HostSignal::Resize(width) => self.handle_resize(width),
            };
            if matches!(outcome, Outcome::Resynthesized { .. }) {
                resyntheses += 1;
            }
        }

        if self.resize_timer.fire_if_due() {
            trace!("[{}] resize debounce elapsed", self.label);
            if matches!(self.resynthesize(), Outcome::Resynthesized { .. }) {
                resyntheses += 1;
            }
        }

        resyntheses
    }

    pub fn handle_transaction(&mut self, tx: &Transaction) -> Outcome {
        self.handle(ChangeEvent::Transaction(tx))
    }

    pub fn handle_content_mutation(&mut self, scope: MutationScope) -> Outcome {
        self.handle(ChangeEvent::ContentMutated(scope))
    }

    pub fn handle_resize(&mut self, width: f32) -> Outcome {
        self.handle(ChangeEvent::Resized { width })
    }

    /// Validate and apply a margin update, then restyle and repaginate.
    ///
    /// Nothing changes when any provided value is rejected.
    pub fn update_page_margins(&mut self, update: MarginUpdate) -> Result<()> {
        if !self.capabilities.responsive_margins {
            warn!("[{}] {}", self.label, PaginationError::MarginsLocked);
            return Err(PaginationError::MarginsLocked);
        }

        let geometry = self.geometry.with_margins(&update).map_err(|e| {
            warn!("[{}] rejected margin update: {}", self.label, e);
            e
        })?;
        self.geometry = geometry;
        self.handle(ChangeEvent::MarginsUpdated);
        Ok(())
    }

    /// Repaginate regardless of what changed
    pub fn refresh_pagination(&mut self) -> Outcome {
        self.handle(ChangeEvent::RefreshRequested)
    }

    pub fn layout(&self) -> Option<&PaginationLayout> {
        self.layout.as_ref()
    }

    pub fn geometry(&self) -> &GeometryConfig {
        &self.geometry
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn stats(&self) -> PaginatorStats {
        self.stats
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resize_timer.is_pending()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn handle(&mut self, event: ChangeEvent<'_>) -> Outcome {
        let kind = self.trigger.classify(&event);
        trace!("[{}] {:?} classified as {:?}", self.label, event, kind);

        match kind {
            ChangeKind::Unrelated => {
                self.stats.reuses += 1;
                Outcome::Reused
            }
            ChangeKind::ViewportResized => {
                self.resize_timer.schedule();
                self.stats.deferred_resizes += 1;
                Outcome::Deferred
            }
            kind => {
                if kind.requires_style_refresh() {
                    self.issue_style();
                }
                self.resynthesize()
            }
        }
    }

    fn issue_style(&mut self) {
        let css = build_style_sheet(&self.geometry);
        self.surface.inject_style(&css);
        self.stats.style_issues += 1;
    }

    /// Measure, estimate, synthesize, render, then index the rendered pages
    fn resynthesize(&mut self) -> Outcome {
        if !self.surface.has_pagination_widget() {
            debug!(
                "[{}] {}; skipping resynthesis",
                self.label,
                PaginationError::MissingRenderTarget
            );
            self.stats.skipped += 1;
            return Outcome::Skipped;
        }

        let sample = sample_content_height(&self.surface.children(), self.surface.viewport_width());
        let previous_breaks = self.layout.as_ref().map_or(0, |l| l.breaks.len());
        let estimated_pages =
            estimate_page_count(sample.total_content_height, previous_breaks, &self.geometry);

        let mut breaks = synthesize(estimated_pages, &self.geometry);
        self.surface.render_breaks(&breaks);

        let boundaries = PageBoundaryIndex::from_break_tops(self.surface.break_body_tops());
        let content_tops = self
            .surface
            .children()
            .into_iter()
            .filter(|child| child.role == ElementRole::Content)
            .map(|child| child.top);
        let last_page = boundaries.last_populated_page(content_tops);

        let terminal_break = last_page.saturating_sub(1).min(breaks.len().saturating_sub(1));
        if let Some(descriptor) = breaks.get_mut(terminal_break) {
            descriptor.is_last_page = true;
        }
        self.surface.mark_terminal(terminal_break);

        let min_height = container_min_height(terminal_break, &self.geometry);
        self.surface.set_min_height(min_height);

        self.version += 1;
        self.stats.resyntheses += 1;
        debug!(
            "[{}] v{}: {:.0}px of content, {} estimated + headroom breaks, last page {}",
            self.label, self.version, sample.total_content_height, estimated_pages, last_page
        );

        self.layout = Some(PaginationLayout {
            version: self.version,
            sample,
            estimated_pages,
            breaks,
            boundaries,
            terminal_break,
            min_height,
        });

        self.surface
            .dispatch(Transaction::new().with_meta(PAGINATION_UPDATED, self.version));

        Outcome::Resynthesized {
            version: self.version,
        }
    }
}
