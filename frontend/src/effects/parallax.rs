use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

use crate::config::ParallaxConfig;
use crate::error::EnhanceError;
use crate::events::listener::EventListener;

const HERO_SELECTOR: &str = ".hero-slider";

pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    scroll_y * factor
}

pub fn translate_y(offset: f64) -> String {
    format!("translateY({}px)", offset)
}

/// Shifts the hero down by a fraction of the page scroll on every scroll
/// event. Unthrottled.
pub struct Parallax {
    _listener: EventListener,
}

pub fn mount(window: &Window, document: &Document, config: &ParallaxConfig) -> Result<Option<Parallax>, EnhanceError> {
    let Some(hero) = document
        .query_selector(HERO_SELECTOR)?
        .and_then(|element| element.dyn_into::<HtmlElement>().ok())
    else {
        return Ok(None);
    };

    let factor = config.factor;
    let view = window.clone();
    let listener = EventListener::new(window, "scroll", move |_| {
        let Ok(scrolled) = view.scroll_y() else {
            return;
        };
        let _ = hero
            .style()
            .set_property("transform", &translate_y(parallax_offset(scrolled, factor)));
    })?;

    Ok(Some(Parallax {
        _listener: listener,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_half_the_scroll_by_default() {
        let factor = ParallaxConfig::default().factor;
        assert_eq!(parallax_offset(0.0, factor), 0.0);
        assert_eq!(parallax_offset(400.0, factor), 200.0);
        assert_eq!(parallax_offset(333.0, factor), 166.5);
    }

    #[test]
    fn transform_is_a_vertical_translation() {
        assert_eq!(translate_y(0.0), "translateY(0px)");
        assert_eq!(translate_y(166.5), "translateY(166.5px)");
    }
}
