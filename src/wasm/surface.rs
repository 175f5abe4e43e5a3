//! Page surface backed by a JavaScript host object
//!
//! The host object exposes:
//! `hasPaginationWidget()`, `viewportWidth()`, `children()`,
//! `addContainerClass(cls)`, `injectStyle(css, scopeAttr)`, `renderBreaks(json)`,
//! `breakBodyTops()`, `markTerminal(index)`, `setMinHeight(px)` and
//! `dispatch(metaJson)`. Footnote placement additionally uses
//! `footnoteRefs()`, `footnoteText(id)`, `footerBands()` and
//! `renderFootnotes(json)`. Missing or throwing methods are logged and
//! treated as empty results.

use crate::footnote::{FooterBandBox, FootnoteRef, FootnoteSurface, PageFootnotes};
use crate::host::{ElementBox, PageSurface, Transaction};
use crate::layout::{PageBreakDescriptor, STYLE_SCOPE_ATTR};
use js_sys::{Float64Array, Function, Reflect, JSON};
use log::warn;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub struct JsSurface {
    host: JsValue,
}

impl JsSurface {
    pub fn new(host: JsValue) -> Self {
        Self { host }
    }

    fn method(&self, name: &str) -> Option<Function> {
        let value = Reflect::get(&self.host, &JsValue::from_str(name)).ok()?;
        match value.dyn_into::<Function>() {
            Ok(function) => Some(function),
            Err(_) => {
                warn!("host object has no `{}` method", name);
                None
            }
        }
    }

    fn call0(&self, name: &str) -> Option<JsValue> {
        let function = self.method(name)?;
        function
            .call0(&self.host)
            .map_err(|e| warn!("host `{}` threw: {:?}", name, e))
            .ok()
    }

    fn call1(&self, name: &str, arg: &JsValue) -> Option<JsValue> {
        let function = self.method(name)?;
        function
            .call1(&self.host, arg)
            .map_err(|e| warn!("host `{}` threw: {:?}", name, e))
            .ok()
    }

    /// Call a method returning an array and decode it through JSON
    fn call_json_list<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        let Some(value) = self.call0(name) else {
            return Vec::new();
        };
        let json = match JSON::stringify(&value) {
            Ok(json) => String::from(json),
            Err(e) => {
                warn!("host `{}` result is not serializable: {:?}", name, e);
                return Vec::new();
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("malformed host `{}` result: {}", name, e);
            Vec::new()
        })
    }

    fn call2(&self, name: &str, first: &JsValue, second: &JsValue) -> Option<JsValue> {
        let function = self.method(name)?;
        function
            .call2(&self.host, first, second)
            .map_err(|e| warn!("host `{}` threw: {:?}", name, e))
            .ok()
    }
}

impl PageSurface for JsSurface {
    fn has_pagination_widget(&self) -> bool {
        self.call0("hasPaginationWidget")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }

    fn viewport_width(&self) -> f32 {
        self.call0("viewportWidth")
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn children(&self) -> Vec<ElementBox> {
        self.call_json_list("children")
    }

    fn add_container_class(&mut self, class: &str) {
        self.call1("addContainerClass", &JsValue::from_str(class));
    }

    fn inject_style(&mut self, css: &str) {
        self.call2(
            "injectStyle",
            &JsValue::from_str(css),
            &JsValue::from_str(STYLE_SCOPE_ATTR),
        );
    }

    fn render_breaks(&mut self, breaks: &[PageBreakDescriptor]) {
        match serde_json::to_string(breaks) {
            Ok(json) => {
                self.call1("renderBreaks", &JsValue::from_str(&json));
            }
            Err(e) => warn!("failed to encode breaks: {}", e),
        }
    }

    fn break_body_tops(&self) -> Vec<f32> {
        self.call0("breakBodyTops")
            .map(|value| {
                Float64Array::new(&value)
                    .to_vec()
                    .into_iter()
                    .map(|top| top as f32)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn mark_terminal(&mut self, break_index: usize) {
        self.call1("markTerminal", &JsValue::from_f64(break_index as f64));
    }

    fn set_min_height(&mut self, height: f32) {
        self.call1("setMinHeight", &JsValue::from_f64(height as f64));
    }

    fn dispatch(&mut self, tx: Transaction) {
        let meta: serde_json::Map<String, serde_json::Value> = tx
            .meta_entries()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        let payload = serde_json::json!({ "docChanged": tx.doc_changed, "meta": meta });
        self.call1("dispatch", &JsValue::from_str(&payload.to_string()));
    }
}

impl FootnoteSurface for JsSurface {
    fn footnote_refs(&self) -> Vec<FootnoteRef> {
        self.call_json_list("footnoteRefs")
    }

    fn footnote_text(&self, id: &str) -> Option<String> {
        self.call1("footnoteText", &JsValue::from_str(id))
            .and_then(|v| v.as_string())
    }

    fn footer_bands(&self) -> Vec<FooterBandBox> {
        self.call_json_list("footerBands")
    }

    fn render_footnotes(&mut self, placements: &[PageFootnotes]) {
        match serde_json::to_string(placements) {
            Ok(json) => {
                self.call1("renderFootnotes", &JsValue::from_str(&json));
            }
            Err(e) => warn!("failed to encode footnotes: {}", e),
        }
    }
}
