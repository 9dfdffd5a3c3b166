//! Browser tests for the DOM binding.
//!
//! Run with `wasm-pack test --headless --chrome crates/pagesift-wasm`.

#![cfg(target_arch = "wasm32")]

use pagesift_core::WidgetConfig;
use pagesift_search::{ContentProvider, TextIndex};
use pagesift_wasm::{DomProvider, mount};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Element, Event, HtmlElement, HtmlInputElement, KeyboardEvent, KeyboardEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("document")
}

fn set_body(markup: &str) {
    document().body().expect("body").set_inner_html(markup);
}

#[wasm_bindgen_test]
fn test_dom_provider_skips_hidden_text() {
    set_body(
        r#"<h2>Intro</h2><p>The quick brown fox jumps.</p>
           <p hidden>brown secret</p><script>var brown;</script>"#,
    );

    let provider = DomProvider::new(document());
    let index = TextIndex::build(&provider, &WidgetConfig::default());
    let texts: Vec<&str> = index.entries().iter().map(|e| e.text.as_str()).collect();

    assert_eq!(texts, vec!["Intro", "The quick brown fox jumps."]);
    assert_eq!(index.entries()[1].heading, "Intro");
    assert!(provider.text_nodes().len() >= 3);
}

#[wasm_bindgen_test]
fn test_mount_without_elements_is_disabled() {
    set_body("<p>No search box here</p>");
    let search = mount(JsValue::UNDEFINED).expect("mount");
    assert!(search.is_none());
}

#[wasm_bindgen_test]
fn test_mount_and_search() {
    set_body(
        r#"<input id="search-input"><div id="search-results"></div>
           <h2>Intro</h2><p>The quick brown fox jumps.</p>"#,
    );

    let search = mount(JsValue::UNDEFINED).expect("mount").expect("widget");
    assert_eq!(search.entry_count(), 2);

    search.search("brown");
    let results = document().get_element_by_id("search-results").expect("results");
    assert!(results.inner_html().contains("<mark>brown</mark>"));
    assert!(results.class_list().contains("visible"));

    search.destroy();
}

const PAGE: &str = r#"<input id="search-input"><div id="search-results"></div>
    <h2>Intro</h2><p>The quick brown fox jumps.</p>
    <div data-infogram-element id="chart"><p>A brown bar chart.</p></div>"#;

fn by_id(id: &str) -> Element {
    document().get_element_by_id(id).expect(id)
}

fn options(json: &str) -> JsValue {
    js_sys::JSON::parse(json).expect("options")
}

async fn sleep(millis: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            .expect("set timeout");
    });
    JsFuture::from(promise).await.expect("sleep");
}

fn press(key: &str) {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    let event = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("event");
    by_id("search-input").dispatch_event(&event).expect("dispatch");
}

fn active_rows() -> u32 {
    document()
        .query_selector_all(".search-result.active")
        .expect("query")
        .length()
}

#[wasm_bindgen_test]
async fn test_input_event_searches_after_debounce() {
    set_body(PAGE);
    let search = mount(options(r#"{"debounce_ms": 20}"#))
        .expect("mount")
        .expect("widget");

    let input: HtmlInputElement = by_id("search-input").dyn_into().expect("input");
    input.set_value("brown");
    input
        .dispatch_event(&Event::new("input").expect("event"))
        .expect("dispatch");

    let results = by_id("search-results");
    assert!(results.inner_html().is_empty());

    sleep(80).await;
    assert!(results.inner_html().contains("<mark>brown</mark>"));
    assert!(results.class_list().contains("visible"));

    search.destroy();
}

#[wasm_bindgen_test]
fn test_arrow_down_marks_one_row() {
    set_body(PAGE);
    let search = mount(JsValue::UNDEFINED).expect("mount").expect("widget");
    search.search("brown");

    press("ArrowDown");
    assert_eq!(active_rows(), 1);
    let first = document()
        .query_selector(".search-result.active")
        .expect("query")
        .expect("active row");
    assert_eq!(first.get_attribute("data-index").as_deref(), Some("0"));

    press("ArrowDown");
    assert_eq!(active_rows(), 1);
    let second = document()
        .query_selector(".search-result.active")
        .expect("query")
        .expect("active row");
    assert_eq!(second.get_attribute("data-index").as_deref(), Some("1"));

    search.destroy();
}

#[wasm_bindgen_test]
fn test_click_highlights_container() {
    set_body(PAGE);
    let search = mount(JsValue::UNDEFINED).expect("mount").expect("widget");
    search.search("bar chart");

    let row: HtmlElement = document()
        .query_selector(".search-result .search-snippet")
        .expect("query")
        .expect("row")
        .dyn_into()
        .expect("html element");
    row.click();

    assert!(by_id("chart").class_list().contains("search-target"));

    search.destroy();
}

#[wasm_bindgen_test]
async fn test_destroy_removes_highlight_and_timers() {
    set_body(PAGE);
    let search = mount(options(r#"{"debounce_ms": 20, "highlight_ms": 40}"#))
        .expect("mount")
        .expect("widget");
    search.search("bar chart");

    let row: HtmlElement = document()
        .query_selector(".search-result")
        .expect("query")
        .expect("row")
        .dyn_into()
        .expect("html element");
    row.click();

    let input: HtmlInputElement = by_id("search-input").dyn_into().expect("input");
    input.set_value("fox");
    input
        .dispatch_event(&Event::new("input").expect("event"))
        .expect("dispatch");

    let chart = by_id("chart");
    assert!(chart.class_list().contains("search-target"));

    search.destroy();
    assert!(!chart.class_list().contains("search-target"));

    // Neither timeout may fire once the widget is gone.
    sleep(100).await;
    assert!(!by_id("search-results").inner_html().contains("fox"));
}
