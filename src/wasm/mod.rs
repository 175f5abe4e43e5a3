//! WASM bindings for the paginator and the footnote placer

mod surface;

pub use surface::JsSurface;

use crate::error::PaginationError;
use crate::footnote::FootnotePlacer;
use crate::geometry::{GeometryConfig, MarginUpdate, PaginationOptions};
use crate::host::{MutationScope, Transaction};
use crate::layout::{estimate_page_count, PageBoundaryIndex};
use crate::paginator::{Capabilities, Outcome, Paginator, PaginatorBuilder};
use crate::trigger::SystemClock;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn to_js_error(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Empty options select the defaults
fn parse_geometry(options_json: &str) -> Result<GeometryConfig, JsValue> {
    if options_json.trim().is_empty() {
        return Ok(GeometryConfig::default());
    }
    PaginationOptions::from_json(options_json)
        .and_then(PaginationOptions::into_geometry)
        .map_err(to_js_error)
}

/// Empty or missing meta leaves the transaction bare
fn transaction_from_json(doc_changed: bool, meta_json: Option<String>) -> Result<Transaction, JsValue> {
    let mut tx = Transaction::new();
    tx.doc_changed = doc_changed;
    if let Some(json) = meta_json.filter(|json| !json.trim().is_empty()) {
        let meta: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&json).map_err(to_js_error)?;
        for (key, value) in meta {
            tx.set_meta(key, value);
        }
    }
    Ok(tx)
}

/// WASM-exposed paginator bound to one host editor
#[wasm_bindgen]
pub struct WasmPaginator {
    paginator: Paginator<JsSurface>,
    last_error: Option<String>,
}

#[wasm_bindgen]
impl WasmPaginator {
    /// Create a paginator over a host object; `options_json` may be empty
    #[wasm_bindgen(constructor)]
    pub fn new(host: JsValue, options_json: &str) -> Result<WasmPaginator, JsValue> {
        let geometry = parse_geometry(options_json)?;
        let paginator = PaginatorBuilder::new(geometry)
            .capabilities(Capabilities::full())
            .build(JsSurface::new(host))
            .map_err(to_js_error)?;

        Ok(Self {
            paginator,
            last_error: None,
        })
    }

    /// Inject styles and lay out for the first time
    pub fn mount(&mut self) -> bool {
        is_resynthesized(self.paginator.mount())
    }

    /// Forward a host transaction; `meta_json` is an optional JSON object
    #[wasm_bindgen(js_name = onTransaction)]
    pub fn on_transaction(&mut self, doc_changed: bool, meta_json: Option<String>) -> Result<bool, JsValue> {
        let tx = transaction_from_json(doc_changed, meta_json)?;
        Ok(is_resynthesized(self.paginator.handle_transaction(&tx)))
    }

    /// Forward a DOM mutation of the content container
    #[wasm_bindgen(js_name = onContentMutation)]
    pub fn on_content_mutation(&mut self, inside_widget: bool) -> bool {
        let scope = if inside_widget {
            MutationScope::PaginationWidget
        } else {
            MutationScope::Content
        };
        is_resynthesized(self.paginator.handle_content_mutation(scope))
    }

    /// Forward a container resize; the layout follows after the debounce
    #[wasm_bindgen(js_name = onResize)]
    pub fn on_resize(&mut self, width: f32) {
        self.paginator.handle_resize(width);
    }

    /// Run a due debounced resize; call from a timer
    pub fn poll(&mut self) -> usize {
        self.paginator.poll()
    }

    /// Apply a `{left, right, top, bottom}` margin update
    #[wasm_bindgen(js_name = updatePageMargins)]
    pub fn update_page_margins(&mut self, margins_json: &str) -> bool {
        let result = serde_json::from_str::<MarginUpdate>(margins_json)
            .map_err(PaginationError::from)
            .and_then(|update| self.paginator.update_page_margins(update));
        match result {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    #[wasm_bindgen(js_name = refreshPagination)]
    pub fn refresh_pagination(&mut self) -> bool {
        is_resynthesized(self.paginator.refresh_pagination())
    }

    /// Message of the last rejected margin update
    #[wasm_bindgen(getter, js_name = lastError)]
    pub fn last_error(&self) -> Option<String> {
        self.last_error.clone()
    }

    /// Pages currently holding content
    #[wasm_bindgen(js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.paginator
            .layout()
            .map_or(0, |layout| layout.content_pages())
    }

    /// Current layout as JSON, `null` before the first resynthesis
    #[wasm_bindgen(js_name = layoutJson)]
    pub fn layout_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.paginator.layout()).map_err(to_js_error)
    }

    /// Engine counters as JSON
    #[wasm_bindgen(js_name = statsJson)]
    pub fn stats_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.paginator.stats()).map_err(to_js_error)
    }
}

/// WASM-exposed footnote placer bound to one host editor
#[wasm_bindgen]
pub struct WasmFootnotePlacer {
    placer: FootnotePlacer,
    surface: JsSurface,
}

#[wasm_bindgen]
impl WasmFootnotePlacer {
    #[wasm_bindgen(constructor)]
    pub fn new(host: JsValue) -> WasmFootnotePlacer {
        Self {
            placer: FootnotePlacer::new(Rc::new(SystemClock)),
            surface: JsSurface::new(host),
        }
    }

    /// Forward a host transaction; re-renders after repagination
    #[wasm_bindgen(js_name = onTransaction)]
    pub fn on_transaction(&mut self, meta_json: Option<String>) -> Result<bool, JsValue> {
        let tx = transaction_from_json(false, meta_json)?;
        Ok(self.placer.on_transaction(&tx, &mut self.surface))
    }

    /// Forward a DOM mutation of the editor
    #[wasm_bindgen(js_name = onMutation)]
    pub fn on_mutation(&mut self) -> bool {
        self.placer.on_mutation(&mut self.surface)
    }

    /// Periodic re-check; call from a timer
    pub fn tick(&mut self) -> bool {
        self.placer.tick(&mut self.surface)
    }

    /// Place the footnotes now; false when nothing changed
    pub fn place(&mut self) -> bool {
        self.placer.place(&mut self.surface)
    }

    #[wasm_bindgen(js_name = renderCount)]
    pub fn render_count(&self) -> usize {
        self.placer.render_count()
    }
}

fn is_resynthesized(outcome: Outcome) -> bool {
    matches!(outcome, Outcome::Resynthesized { .. })
}

/// Estimate the page breaks needed for `content_height` under default or given options
#[wasm_bindgen(js_name = estimatePageCount)]
pub fn estimate_page_count_js(
    content_height: f32,
    previous_break_count: usize,
    options_json: &str,
) -> Result<usize, JsValue> {
    let geometry = parse_geometry(options_json)?;
    Ok(estimate_page_count(content_height, previous_break_count, &geometry))
}

/// 1-based page holding `offset`, given the measured page body tops
#[wasm_bindgen(js_name = classifyOffset)]
pub fn classify_offset(break_tops: &[f32], offset: f32) -> usize {
    PageBoundaryIndex::from_break_tops(break_tops.iter().copied()).classify(offset)
}
