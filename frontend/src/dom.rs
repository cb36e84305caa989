use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, NodeList};

use crate::error::EnhanceError;

/// One-way marker added to elements (and the page body) once they should
/// fade into view.
pub const FADE_IN: &str = "fade-in";

/// Collects the elements of a `querySelectorAll` result.
pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Sets an inline style property. Elements without inline style (SVG and
/// friends) are left alone.
pub fn set_style(element: &Element, property: &str, value: &str) -> Result<(), EnhanceError> {
    if let Some(element) = element.dyn_ref::<HtmlElement>() {
        element.style().set_property(property, value)?;
    }
    Ok(())
}
