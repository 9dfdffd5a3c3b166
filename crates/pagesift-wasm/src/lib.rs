//! pagesift WASM Binding
//!
//! Attaches the in-page search widget to a live document.
//!
//! # Example (JavaScript)
//!
//! ```javascript
//! import init, { mount } from 'pagesift-wasm';
//!
//! await init();
//!
//! // Uses #search-input and #search-results; returns undefined if either is missing.
//! const search = mount();
//!
//! // Or with overrides
//! const custom = mount({ input_id: 'find', results_limit: 10 });
//! custom?.destroy();
//! ```

pub mod dom;
pub mod host;
pub mod timer;

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

pub use dom::DomProvider;
pub use host::DomHost;
use pagesift_core::{Config, WidgetConfig};
use pagesift_search::{Key, SearchWidget};
pub use timer::TimeoutScheduler;
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{Element, Event, EventTarget, HtmlInputElement, KeyboardEvent, MouseEvent};

type DomWidget = SearchWidget<DomHost, TimeoutScheduler>;

/// Initialize the WASM module.
///
/// Sets up the panic hook and console logging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second init in the same page keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Get the version of the library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// A search widget attached to the page.
///
/// Dropping it (or calling `destroy`) detaches every listener, cancels
/// pending timeouts and removes the current highlight.
#[wasm_bindgen]
pub struct PageSearch {
    widget: Rc<RefCell<DomWidget>>,
    input: HtmlInputElement,
    results: Element,
    on_input: Closure<dyn FnMut(Event)>,
    on_keydown: Closure<dyn FnMut(KeyboardEvent)>,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

#[wasm_bindgen]
impl PageSearch {
    /// Number of indexed text entries.
    #[wasm_bindgen(js_name = entryCount)]
    pub fn entry_count(&self) -> usize {
        self.widget.borrow().index().len()
    }

    /// Run a search immediately, bypassing the debounce.
    pub fn search(&self, query: &str) {
        self.widget.borrow_mut().perform_search(query);
    }

    /// Detach the widget from the page.
    pub fn destroy(self) {}
}

impl PageSearch {
    fn listen(target: &EventTarget, event: &str, callback: &JsValue) {
        if let Err(err) = target.add_event_listener_with_callback(event, callback.unchecked_ref()) {
            log::warn!("Cannot listen for {event}: {err:?}");
        }
    }

    fn unlisten(target: &EventTarget, event: &str, callback: &JsValue) {
        let _ = target.remove_event_listener_with_callback(event, callback.unchecked_ref());
    }
}

impl Drop for PageSearch {
    fn drop(&mut self) {
        Self::unlisten(&self.input, "input", self.on_input.as_ref());
        Self::unlisten(&self.input, "keydown", self.on_keydown.as_ref());
        Self::unlisten(&self.results, "click", self.on_click.as_ref());
        match self.widget.try_borrow_mut() {
            Ok(mut widget) => widget.detach(),
            Err(_) => log::warn!("Search widget busy while detaching"),
        }
        log::debug!("Search widget detached");
    }
}

/// Index the page and attach the search widget.
///
/// `config` is an optional object with the same keys as the `[widget]`
/// configuration table. Returns `undefined` when the page lacks the input or
/// the results element.
#[wasm_bindgen]
pub fn mount(config: JsValue) -> Result<Option<PageSearch>, JsValue> {
    let config = widget_config(config)?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let input = document
        .get_element_by_id(&config.input_id)
        .and_then(|e| e.dyn_into::<HtmlInputElement>().ok());
    let results = document.get_element_by_id(&config.results_id);
    let (Some(input), Some(results)) = (input, results) else {
        log::debug!("Search elements not found, widget disabled");
        return Ok(None);
    };

    let start = js_sys::Date::now();
    let provider = DomProvider::new(document);
    let host = DomHost::new(input.clone(), results.clone(), &config.container_attribute);

    let widget = Rc::new_cyclic(|weak: &Weak<RefCell<DomWidget>>| {
        let weak = weak.clone();
        let scheduler = TimeoutScheduler::new(window, move |kind| {
            if let Some(widget) = weak.upgrade() {
                widget.borrow_mut().on_timer(kind);
            }
        });
        RefCell::new(SearchWidget::attach(&provider, config, host, scheduler))
    });

    log::info!(
        "Indexed {} text entries in {}ms",
        widget.borrow().index().len(),
        (js_sys::Date::now() - start) as u32
    );

    let on_input = {
        let widget = Rc::clone(&widget);
        let input = input.clone();
        Closure::<dyn FnMut(Event)>::new(move |_: Event| {
            widget.borrow_mut().on_input(&input.value());
        })
    };

    let on_keydown = {
        let widget = Rc::clone(&widget);
        Closure::<dyn FnMut(KeyboardEvent)>::new(move |ev: KeyboardEvent| {
            if widget.borrow_mut().on_key(Key::from_name(&ev.key())) {
                ev.prevent_default();
            }
        })
    };

    let on_click = {
        let widget = Rc::clone(&widget);
        Closure::<dyn FnMut(MouseEvent)>::new(move |ev: MouseEvent| {
            let row = ev
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|e| e.closest(host::RESULT_SELECTOR).ok().flatten());
            if let Some(position) = row.and_then(|r| result_position(r.get_attribute("data-index"))) {
                widget.borrow_mut().activate(position);
            }
        })
    };

    PageSearch::listen(&input, "input", on_input.as_ref());
    PageSearch::listen(&input, "keydown", on_keydown.as_ref());
    PageSearch::listen(&results, "click", on_click.as_ref());

    Ok(Some(PageSearch {
        widget,
        input,
        results,
        on_input,
        on_keydown,
        on_click,
    }))
}

fn widget_config(value: JsValue) -> Result<WidgetConfig, JsValue> {
    let widget: WidgetConfig = if value.is_undefined() || value.is_null() {
        WidgetConfig::default()
    } else {
        serde_wasm_bindgen::from_value(value)?
    };

    let config = Config {
        widget,
        ..Config::default()
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config.widget)
}

/// Result position from a row's `data-index` attribute.
fn result_position(data_index: Option<String>) -> Option<usize> {
    data_index?.trim().parse().ok()
}
