//! Browser-side checks of the JS bindings
#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Object, Reflect};
use page_flow::wasm::{classify_offset, estimate_page_count_js};
use page_flow::{WasmFootnotePlacer, WasmPaginator};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

fn set_method(host: &Object, name: &str, body: &str) {
    let function = Function::new_no_args(body);
    Reflect::set(host, &JsValue::from_str(name), &function).unwrap();
}

fn fake_host() -> Object {
    let host = Object::new();
    set_method(&host, "hasPaginationWidget", "return true;");
    set_method(&host, "viewportWidth", "return 600;");
    set_method(
        &host,
        "children",
        "return [{role: 'paginationWidget', top: 0, height: 0}, \
                 {role: 'content', top: 0, height: 2000}];",
    );
    set_method(&host, "addContainerClass", "");
    set_method(&host, "injectStyle", "");
    set_method(&host, "renderBreaks", "");
    set_method(&host, "breakBodyTops", "return [852, 1704, 2556];");
    set_method(&host, "markTerminal", "");
    set_method(&host, "setMinHeight", "");
    set_method(&host, "dispatch", "");
    host
}

#[wasm_bindgen_test]
fn estimates_with_default_options() {
    assert_eq!(estimate_page_count_js(2000.0, 0, "").unwrap(), 2);
    assert!(estimate_page_count_js(100.0, 0, r#"{"pageHeight": 10}"#).is_err());
}

#[wasm_bindgen_test]
fn classifies_offsets() {
    assert_eq!(classify_offset(&[852.0, 1704.0], 900.0), 2);
    assert_eq!(classify_offset(&[], 5000.0), 1);
}

#[wasm_bindgen_test]
fn paginates_through_host_object() {
    let mut paginator = WasmPaginator::new(fake_host().into(), "").unwrap();
    assert!(paginator.mount());
    assert_eq!(paginator.page_count(), 1);

    assert!(!paginator.update_page_margins(r#"{"left": -4}"#));
    assert!(paginator.last_error().is_some());
    assert!(paginator.update_page_margins(r#"{"top": 20}"#));
    assert!(paginator.last_error().is_none());
}

fn footnote_host() -> Object {
    let host = Object::new();
    set_method(&host, "footnoteRefs", "return [{id: 'a', top: 100}, {id: 'b', top: 1200}];");
    set_method(&host, "footerBands", "return [{breakIndex: 0, top: 800}, {breakIndex: 1, top: 1650}];");
    let text = Function::new_with_args("id", "return id === 'a' ? 'First' : 'Second';");
    Reflect::set(&host, &JsValue::from_str("footnoteText"), &text).unwrap();
    let render = Function::new_with_args("json", "this.rendered = json;");
    Reflect::set(&host, &JsValue::from_str("renderFootnotes"), &render).unwrap();
    host
}

#[wasm_bindgen_test]
fn places_footnotes_through_host_object() {
    let host = footnote_host();
    let mut placer = WasmFootnotePlacer::new(host.clone().into());

    assert!(placer.place());
    assert_eq!(placer.render_count(), 1);
    let rendered = Reflect::get(&host, &JsValue::from_str("rendered"))
        .unwrap()
        .as_string()
        .unwrap();
    let placements: serde_json::Value = serde_json::from_str(&rendered).unwrap();
    assert_eq!(placements[0]["breakIndex"], 0);
    assert_eq!(placements[0]["entries"][0]["text"], "First");
    assert_eq!(placements[1]["entries"][0]["number"], 2);

    // Unchanged placement is not re-rendered
    assert!(!placer.on_mutation());
    assert!(!placer.on_transaction(None).unwrap());
    assert!(placer.on_transaction(Some(r#"{"paginationUpdated": 2}"#.into())).unwrap());
    assert_eq!(placer.render_count(), 2);
}

