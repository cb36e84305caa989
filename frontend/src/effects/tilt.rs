use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, MouseEvent};

use crate::config::TiltConfig;
use crate::dom;
use crate::error::EnhanceError;
use crate::events::listener::EventListener;

pub const CARD_SELECTOR: &str = ".card-3d, .blog-card, .team-card, .gallery-item";
const RESET_TRANSFORM: &str = "translateY(0) rotateX(0) rotateY(0) scale3d(1, 1, 1)";

/// Rotation in degrees for a pointer position over a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    /// `x` and `y` are relative to the card's top-left corner. The card tips
    /// toward the pointer: below center rotates positive around X, right of
    /// center rotates negative around Y.
    pub fn from_pointer(width: f64, height: f64, x: f64, y: f64, config: &TiltConfig) -> Self {
        Self {
            rotate_x: (y - height / 2.0) / config.divisor,
            rotate_y: (width / 2.0 - x) / config.divisor,
        }
    }

    pub fn transform(&self, config: &TiltConfig) -> String {
        format!(
            "translateY(-{}px) rotateX({}deg) rotateY({}deg) scale3d({s}, {s}, {s})",
            config.lift_px,
            self.rotate_x,
            self.rotate_y,
            s = config.scale
        )
    }
}

pub struct CardTilt {
    _listeners: Vec<EventListener>,
}

pub fn mount(document: &Document, config: &TiltConfig) -> Result<Option<CardTilt>, EnhanceError> {
    let cards: Vec<HtmlElement> = dom::elements(&document.query_selector_all(CARD_SELECTOR)?)
        .into_iter()
        .filter_map(|card| card.dyn_into::<HtmlElement>().ok())
        .collect();
    if cards.is_empty() {
        return Ok(None);
    }

    let mut listeners = Vec::with_capacity(cards.len() * 2);
    for card in cards {
        let config = *config;
        listeners.push(EventListener::typed::<MouseEvent, _>(&card, "mousemove", {
            let card = card.clone();
            move |event| {
                let rect = card.get_bounding_client_rect();
                let tilt = Tilt::from_pointer(
                    rect.width(),
                    rect.height(),
                    f64::from(event.client_x()) - rect.left(),
                    f64::from(event.client_y()) - rect.top(),
                    &config,
                );
                let _ = card.style().set_property("transform", &tilt.transform(&config));
            }
        })?);
        listeners.push(EventListener::new(&card, "mouseleave", {
            let card = card.clone();
            move |_| {
                let _ = card.style().set_property("transform", RESET_TRANSFORM);
            }
        })?);
    }

    Ok(Some(CardTilt {
        _listeners: listeners,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_flat() {
        let tilt = Tilt::from_pointer(300.0, 200.0, 150.0, 100.0, &TiltConfig::default());
        assert_eq!(tilt, Tilt { rotate_x: 0.0, rotate_y: 0.0 });
    }

    #[test]
    fn rotation_is_proportional_to_offset() {
        let config = TiltConfig::default();
        let tilt = Tilt::from_pointer(300.0, 200.0, 300.0, 0.0, &config);
        assert_eq!(tilt.rotate_x, -10.0);
        assert_eq!(tilt.rotate_y, -15.0);

        let tilt = Tilt::from_pointer(300.0, 200.0, 0.0, 200.0, &config);
        assert_eq!(tilt.rotate_x, 10.0);
        assert_eq!(tilt.rotate_y, 15.0);
    }

    #[test]
    fn divisor_scales_rotation() {
        let config = TiltConfig {
            divisor: 20.0,
            ..TiltConfig::default()
        };
        let tilt = Tilt::from_pointer(100.0, 100.0, 100.0, 50.0, &config);
        assert_eq!(tilt.rotate_y, -2.5);
    }

    #[test]
    fn transform_lifts_and_scales() {
        let tilt = Tilt {
            rotate_x: 2.5,
            rotate_y: -4.0,
        };
        assert_eq!(
            tilt.transform(&TiltConfig::default()),
            "translateY(-5px) rotateX(2.5deg) rotateY(-4deg) scale3d(1.02, 1.02, 1.02)"
        );
    }
}
