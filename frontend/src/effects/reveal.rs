use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{Document, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::RevealConfig;
use crate::dom::{self, FADE_IN};
use crate::error::EnhanceError;

const REVEAL_SELECTOR: &str = ".card-3d, .blog-card, .team-card, .gallery-item, section";

/// Adds the fade-in marker to cards and sections the first time they
/// scroll into view. The marker is never removed.
pub struct Reveal {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub fn mount(document: &Document, config: &RevealConfig) -> Result<Option<Reveal>, EnhanceError> {
    let targets = dom::elements(&document.query_selector_all(REVEAL_SELECTOR)?);
    if targets.is_empty() {
        return Ok(None);
    }

    let callback = Closure::wrap(Box::new(|entries: Array, observer: IntersectionObserver| {
        for entry in entries.iter() {
            let entry: IntersectionObserverEntry = entry.unchecked_into();
            if !entry.is_intersecting() {
                continue;
            }
            let target = entry.target();
            if let Err(err) = target.class_list().add_1(FADE_IN) {
                warn!("Failed to reveal element: {:?}", err);
            }
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options.set_root_margin(&config.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    for target in &targets {
        observer.observe(target);
    }

    Ok(Some(Reveal {
        observer,
        _callback: callback,
    }))
}
