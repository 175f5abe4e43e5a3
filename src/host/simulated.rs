//! Deterministic in-memory host used by tests, benches, and the demo binary
//!
//! Content flows like text around floated break widgets: a block that
//! crosses the end of a page's content band continues on the next page and
//! its measured height grows by the band it jumped over. Past the last
//! rendered break, content flows without page boundaries.

use super::{
    ChangeObserver, ContentChangeCallback, ElementBox, ElementRole, MutationScope, PageSurface,
    ResizeCallback, Transaction,
};
use crate::footnote::{FooterBandBox, FootnoteRef, FootnoteSurface, PageFootnotes};
use crate::layout::PageBreakDescriptor;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

#[derive(Debug, Clone)]
struct SimBlock {
    height: f32,
    footnotes: SmallVec<[String; 2]>,
}

/// Page metrics recovered from the rendered break descriptors
#[derive(Debug, Clone, Copy)]
struct PageMetrics {
    page_height: f32,
    header: f32,
    footer: f32,
    stride: f32,
}

impl PageMetrics {
    fn from_descriptor(descriptor: &PageBreakDescriptor) -> Self {
        let page_height = descriptor.body.height + descriptor.header.height + descriptor.footer.height;
        Self {
            page_height,
            header: descriptor.header.height,
            footer: descriptor.footer.height,
            stride: descriptor.body.height + descriptor.overhead(),
        }
    }

    fn page_of(&self, y: f32) -> usize {
        (y / self.stride).floor().max(0.0) as usize
    }

    fn band_start(&self, page: usize) -> f32 {
        page as f32 * self.stride + self.header
    }

    fn band_end(&self, page: usize) -> f32 {
        page as f32 * self.stride + self.page_height - self.footer
    }
}

/// In-memory content container
#[derive(Debug, Clone)]
pub struct SimulatedSurface {
    blocks: Vec<SimBlock>,
    viewport_width: f32,
    widget_mounted: bool,
    container_classes: Vec<String>,
    style: Option<String>,
    style_injections: usize,
    breaks: Vec<PageBreakDescriptor>,
    render_count: usize,
    terminal_break: Option<usize>,
    min_height: f32,
    dispatched: Vec<Transaction>,
    footnote_texts: FxHashMap<String, String>,
    rendered_footnotes: Vec<PageFootnotes>,
}

impl Default for SimulatedSurface {
    fn default() -> Self {
        Self::new(800.0)
    }
}

impl SimulatedSurface {
    /// Empty container with a mounted pagination widget
    pub fn new(viewport_width: f32) -> Self {
        Self {
            blocks: Vec::new(),
            viewport_width,
            widget_mounted: true,
            container_classes: Vec::new(),
            style: None,
            style_injections: 0,
            breaks: Vec::new(),
            render_count: 0,
            terminal_break: None,
            min_height: 0.0,
            dispatched: Vec::new(),
            footnote_texts: FxHashMap::default(),
            rendered_footnotes: Vec::new(),
        }
    }

    /// Container holding blocks of the given intrinsic heights
    pub fn with_blocks(viewport_width: f32, heights: impl IntoIterator<Item = f32>) -> Self {
        let mut surface = Self::new(viewport_width);
        for height in heights {
            surface.push_block(height);
        }
        surface
    }

    pub fn push_block(&mut self, height: f32) {
        self.blocks.push(SimBlock {
            height,
            footnotes: SmallVec::new(),
        });
    }

    /// Push a block referencing footnotes given as `(id, text)` pairs
    pub fn push_block_with_footnotes(&mut self, height: f32, footnotes: &[(&str, &str)]) {
        let mut ids = SmallVec::new();
        for (id, text) in footnotes {
            ids.push(id.to_string());
            self.footnote_texts.insert(id.to_string(), text.to_string());
        }
        self.blocks.push(SimBlock {
            height,
            footnotes: ids,
        });
    }

    pub fn set_block_height(&mut self, index: usize, height: f32) {
        if let Some(block) = self.blocks.get_mut(index) {
            block.height = height;
        }
    }

    pub fn remove_block(&mut self, index: usize) {
        if index < self.blocks.len() {
            self.blocks.remove(index);
        }
    }

    pub fn clear_blocks(&mut self) {
        self.blocks.clear();
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.viewport_width = width;
    }

    pub fn set_widget_mounted(&mut self, mounted: bool) {
        self.widget_mounted = mounted;
    }

    pub fn rendered_breaks(&self) -> &[PageBreakDescriptor] {
        &self.breaks
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }

    pub fn terminal_break(&self) -> Option<usize> {
        self.terminal_break
    }

    pub fn min_height(&self) -> f32 {
        self.min_height
    }

    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn style_injections(&self) -> usize {
        self.style_injections
    }

    pub fn container_classes(&self) -> &[String] {
        &self.container_classes
    }

    /// Drain the transactions dispatched so far
    pub fn take_dispatched(&mut self) -> Vec<Transaction> {
        std::mem::take(&mut self.dispatched)
    }

    pub fn rendered_footnotes(&self) -> &[PageFootnotes] {
        &self.rendered_footnotes
    }

    /// Top offsets of the content blocks after flow
    pub fn block_tops(&self) -> Vec<f32> {
        self.flow().into_iter().map(|(top, _)| top).collect()
    }

    fn metrics(&self) -> Option<PageMetrics> {
        self.breaks.first().map(PageMetrics::from_descriptor)
    }

    /// Place every block, returning `(top, measured height)` pairs.
    ///
    /// Blocks tile the flow: a block starting on a new page leaves the
    /// skipped break inside the previous block's box, so measured heights
    /// always add up to the full extent of the content.
    fn flow(&self) -> Vec<(f32, f32)> {
        let Some(metrics) = self.metrics() else {
            let mut y = 0.0;
            return self
                .blocks
                .iter()
                .map(|block| {
                    let top = y;
                    y += block.height.max(0.0);
                    (top, y - top)
                })
                .collect();
        };

        let break_count = self.breaks.len();
        let mut spans: Vec<(f32, f32)> = Vec::with_capacity(self.blocks.len());
        let mut y = metrics.header;

        for block in &self.blocks {
            let page = metrics.page_of(y);
            if page < break_count && y >= metrics.band_end(page) {
                y = metrics.band_start(page + 1);
            }

            let top = y;
            let mut remaining = block.height.max(0.0);
            loop {
                let page = metrics.page_of(y);
                if page >= break_count || y + remaining <= metrics.band_end(page) {
                    y += remaining;
                    break;
                }
                remaining -= metrics.band_end(page) - y;
                y = metrics.band_start(page + 1);
            }
            spans.push((top, y));
        }

        let next_tops: Vec<f32> = spans.iter().skip(1).map(|(top, _)| *top).collect();
        spans
            .iter()
            .enumerate()
            .map(|(index, (top, end))| {
                let end = next_tops.get(index).copied().unwrap_or(*end);
                (*top, end - top)
            })
            .collect()
    }

    fn visible_break_count(&self) -> usize {
        match self.terminal_break {
            Some(terminal) => (terminal + 1).min(self.breaks.len()),
            None => self.breaks.len(),
        }
    }
}

impl PageSurface for SimulatedSurface {
    fn has_pagination_widget(&self) -> bool {
        self.widget_mounted
    }

    fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    fn children(&self) -> Vec<ElementBox> {
        let header = self.metrics().map_or(0.0, |m| m.header);
        let footer = self.metrics().map_or(0.0, |m| m.footer);
        let placed = self.flow();
        let end = placed.last().map_or(header, |(top, height)| top + height);

        let mut children = Vec::with_capacity(placed.len() + 3);
        children.push(ElementBox {
            role: ElementRole::PaginationWidget,
            top: 0.0,
            height: 0.0,
        });
        children.push(ElementBox {
            role: ElementRole::HeaderSpacer,
            top: 0.0,
            height: header,
        });
        children.extend(placed.into_iter().map(|(top, height)| ElementBox {
            role: ElementRole::Content,
            top,
            height,
        }));
        children.push(ElementBox {
            role: ElementRole::FooterSpacer,
            top: end,
            height: footer,
        });
        children
    }

    fn add_container_class(&mut self, class: &str) {
        if !self.container_classes.iter().any(|c| c == class) {
            self.container_classes.push(class.to_string());
        }
    }

    fn inject_style(&mut self, css: &str) {
        self.style = Some(css.to_string());
        self.style_injections += 1;
    }

    fn render_breaks(&mut self, breaks: &[PageBreakDescriptor]) {
        self.breaks = breaks.to_vec();
        self.terminal_break = None;
        // Footers are rebuilt, so their footnote lists go with them
        self.rendered_footnotes.clear();
        self.render_count += 1;
    }

    fn break_body_tops(&self) -> Vec<f32> {
        match self.metrics() {
            Some(metrics) => (1..=self.breaks.len())
                .map(|page| page as f32 * metrics.stride)
                .collect(),
            None => Vec::new(),
        }
    }

    fn mark_terminal(&mut self, break_index: usize) {
        self.terminal_break = Some(break_index);
        for (index, descriptor) in self.breaks.iter_mut().enumerate() {
            descriptor.is_last_page = index == break_index;
        }
    }

    fn set_min_height(&mut self, height: f32) {
        self.min_height = height;
    }

    fn dispatch(&mut self, tx: Transaction) {
        self.dispatched.push(tx);
    }
}

impl FootnoteSurface for SimulatedSurface {
    fn footnote_refs(&self) -> Vec<FootnoteRef> {
        self.blocks
            .iter()
            .zip(self.flow())
            .flat_map(|(block, (top, _))| {
                block.footnotes.iter().map(move |id| FootnoteRef {
                    id: id.clone(),
                    top,
                })
            })
            .collect()
    }

    fn footnote_text(&self, id: &str) -> Option<String> {
        self.footnote_texts.get(id).cloned()
    }

    fn footer_bands(&self) -> Vec<FooterBandBox> {
        let Some(metrics) = self.metrics() else {
            return Vec::new();
        };
        (0..self.visible_break_count())
            .map(|break_index| FooterBandBox {
                break_index,
                top: metrics.band_end(break_index),
            })
            .collect()
    }

    fn render_footnotes(&mut self, placements: &[PageFootnotes]) {
        self.rendered_footnotes = placements.to_vec();
    }
}

/// Observer whose callbacks are fired by hand
#[derive(Default)]
pub struct SimulatedObserver {
    content: Vec<ContentChangeCallback>,
    resize: Vec<ResizeCallback>,
}

impl SimulatedObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fire_content_change(&mut self, scope: MutationScope) {
        for callback in &mut self.content {
            callback(scope);
        }
    }

    pub fn fire_resize(&mut self, width: f32) {
        for callback in &mut self.resize {
            callback(width);
        }
    }
}

impl ChangeObserver for SimulatedObserver {
    fn observe_content_change(&mut self, callback: ContentChangeCallback) {
        self.content.push(callback);
    }

    fn observe_resize(&mut self, callback: ResizeCallback) {
        self.resize.push(callback);
    }
}
