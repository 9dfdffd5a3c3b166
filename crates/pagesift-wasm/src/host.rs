//! Widget host over the page's input and results elements.

use pagesift_search::{Panel, WidgetHost};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

/// Class on every rendered result row.
pub const RESULT_SELECTOR: &str = ".search-result";

const ACTIVE_CLASS: &str = "active";

/// Renders widget state into the live page.
pub struct DomHost {
    input: HtmlInputElement,
    results: Element,
    container_selector: String,
}

impl DomHost {
    pub fn new(input: HtmlInputElement, results: Element, container_attribute: &str) -> Self {
        Self {
            input,
            results,
            container_selector: container_selector(container_attribute),
        }
    }

    fn toggle(element: &Element, class: &str, on: bool) {
        if let Err(err) = element.class_list().toggle_with_force(class, on) {
            log::warn!("Cannot toggle class {class}: {err:?}");
        }
    }
}

/// Attribute-presence selector for `attribute`.
pub fn container_selector(attribute: &str) -> String {
    format!("[{attribute}]")
}

impl WidgetHost for DomHost {
    type Element = Element;

    fn set_input_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn set_results_html(&mut self, html: &str) {
        self.results.set_inner_html(html);
    }

    fn set_panel(&mut self, panel: Panel) {
        let shown = panel == Panel::Shown;
        Self::toggle(&self.results, "has-results", shown);
        Self::toggle(&self.results, "visible", shown);
    }

    fn mark_active(&mut self, index: usize) {
        let Ok(rows) = self.results.query_selector_all(RESULT_SELECTOR) else {
            return;
        };

        for i in 0..rows.length() {
            let Some(row) = rows.get(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let active = i as usize == index;
            Self::toggle(&row, ACTIVE_CLASS, active);
            if active {
                let options = ScrollIntoViewOptions::new();
                options.set_block(ScrollLogicalPosition::Nearest);
                row.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
    }

    fn highlight_container(&self, element: &Element) -> Element {
        match element.closest(&self.container_selector) {
            Ok(Some(container)) => container,
            _ => element.clone(),
        }
    }

    fn reveal(&mut self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn add_class(&mut self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().add_1(class) {
            log::warn!("Cannot add class {class}: {err:?}");
        }
    }

    fn remove_class(&mut self, element: &Element, class: &str) {
        if let Err(err) = element.class_list().remove_1(class) {
            log::warn!("Cannot remove class {class}: {err:?}");
        }
    }
}
