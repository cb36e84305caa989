use log::warn;
use web_sys::Document;

use crate::dom;
use crate::error::EnhanceError;
use crate::events::dispatch::{Dispatcher, Trigger};

const TOGGLE_SELECTOR: &str = ".mobile-toggle";
const MENU_SELECTOR: &str = ".menu";
const OPEN: &str = "open";

pub fn toggle_rotation(open: bool) -> &'static str {
    if open {
        "rotate(90deg)"
    } else {
        "rotate(0deg)"
    }
}

/// Opens and closes the mobile menu from its burger toggle.
pub fn mount(document: &Document, dispatcher: &mut Dispatcher) -> Result<bool, EnhanceError> {
    let (Some(_), Some(menu)) = (
        document.query_selector(TOGGLE_SELECTOR)?,
        document.query_selector(MENU_SELECTOR)?,
    ) else {
        return Ok(false);
    };

    dispatcher.on(Trigger::Click(TOGGLE_SELECTOR), move |_, toggle| {
        let Some(toggle) = toggle else {
            return;
        };
        let result = menu
            .class_list()
            .toggle(OPEN)
            .map_err(EnhanceError::from)
            .and_then(|open| dom::set_style(toggle, "transform", toggle_rotation(open)));
        if let Err(err) = result {
            warn!("Mobile menu toggle failed: {}", err);
        }
    })?;
    Ok(true)
}
