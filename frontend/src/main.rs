use std::cell::RefCell;

use log::{info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, Window};

mod config;
mod dom;
mod error;
mod site;
mod events {
    pub mod dispatch;
    pub mod listener;
}
mod components {
    pub mod hero_slider;
    pub mod read_more_modal;
    pub mod slider_state;
}
mod effects {
    pub mod anchors;
    pub mod filter;
    pub mod menu;
    pub mod parallax;
    pub mod reveal;
    pub mod search;
    pub mod tilt;
}

use config::SiteConfig;
use error::EnhanceError;
use site::Site;

thread_local! {
    // Lives for the rest of the page; dropping it would detach every listener.
    static SITE: RefCell<Option<Site>> = RefCell::new(None);
}

fn browser() -> Result<(Window, Document), EnhanceError> {
    let window = web_sys::window().ok_or(EnhanceError::NoDocument)?;
    let document = window.document().ok_or(EnhanceError::NoDocument)?;
    Ok((window, document))
}

fn start(window: &Window, document: &Document) {
    let config = match SiteConfig::from_document(document) {
        Ok(config) => config,
        Err(err) => {
            warn!("Ignoring site config: {}", err);
            SiteConfig::default()
        }
    };
    match config.log_level() {
        Ok(level) => log::set_max_level(level),
        Err(err) => warn!("{}", err),
    }

    let site = Site::init(window, document, &config);
    SITE.with(|slot| *slot.borrow_mut() = Some(site));
    info!("Page enhancements ready");
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::default_log_level()).expect("error initializing log");

    info!("Starting page enhancements");
    let (window, document) = match browser() {
        Ok(browser) => browser,
        Err(err) => {
            warn!("{}", err);
            return;
        }
    };

    if document.ready_state() == "loading" {
        let target = document.clone();
        let on_ready = Closure::once(move || start(&window, &document));
        if let Err(err) = target
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        {
            warn!("Failed to wait for DOMContentLoaded: {:?}", err);
        }
        on_ready.forget();
    } else {
        start(&window, &document);
    }
}
