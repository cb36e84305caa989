use log::{debug, info, warn};
use web_sys::{Document, Window};

use crate::components::hero_slider::{self, SliderHandle};
use crate::components::read_more_modal::{self, ModalHandle};
use crate::config::SiteConfig;
use crate::dom::FADE_IN;
use crate::effects::parallax::{self, Parallax};
use crate::effects::reveal::{self, Reveal};
use crate::effects::search::{self, Search};
use crate::effects::tilt::{self, CardTilt};
use crate::effects::{anchors, filter, menu};
use crate::error::EnhanceError;
use crate::events::dispatch::Dispatcher;

/// Every enhancement running on the page. Dropping it detaches them all.
pub struct Site {
    _dispatcher: Dispatcher,
    _slider: Option<SliderHandle>,
    _modal: Option<ModalHandle>,
    _tilt: Option<CardTilt>,
    _search: Option<Search>,
    _reveal: Option<Reveal>,
    _parallax: Option<Parallax>,
}

/// Features whose markup is missing stay off; failures are logged and do
/// not stop the rest of the page from starting.
fn enable<T>(feature: &str, mounted: Result<Option<T>, EnhanceError>) -> Option<T> {
    match mounted {
        Ok(Some(component)) => {
            info!("{} enabled", feature);
            Some(component)
        }
        Ok(None) => {
            debug!("{}: markup not found, skipping", feature);
            None
        }
        Err(err) => {
            warn!("{} failed to start: {}", feature, err);
            None
        }
    }
}

/// For features that live entirely in dispatcher routes.
fn enable_routes(feature: &str, mounted: Result<bool, EnhanceError>) {
    let _ = enable(feature, mounted.map(|on| on.then_some(())));
}

impl Site {
    pub fn init(window: &Window, document: &Document, config: &SiteConfig) -> Self {
        let mut dispatcher = Dispatcher::new(document);

        let slider = enable(
            "Hero slider",
            hero_slider::mount(document, &mut dispatcher, &config.slider),
        );
        let tilt = enable("Card tilt", tilt::mount(document, &config.tilt));
        let modal = enable(
            "Read-more modal",
            read_more_modal::mount(document, &mut dispatcher),
        );
        enable_routes("Blog filter", filter::mount(document, &mut dispatcher));
        let reveal = enable("Scroll reveal", reveal::mount(document, &config.reveal));
        let search = enable("Search", search::mount(document));
        enable_routes("Smooth anchors", anchors::mount(document, &mut dispatcher));
        enable_routes("Mobile menu", menu::mount(document, &mut dispatcher));
        let parallax = enable(
            "Parallax",
            parallax::mount(window, document, &config.parallax),
        );

        if let Some(body) = document.body() {
            if let Err(err) = body.class_list().add_1(FADE_IN) {
                warn!("Failed to fade in page: {:?}", err);
            }
        }

        Self {
            _dispatcher: dispatcher,
            _slider: slider,
            _modal: modal,
            _tilt: tilt,
            _search: search,
            _reveal: reveal,
            _parallax: parallax,
        }
    }
}
