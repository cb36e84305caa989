use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use super::filter::BLOG_CARD_SELECTOR;
use crate::dom;
use crate::error::EnhanceError;
use crate::events::listener::EventListener;

const SEARCH_INPUT_SELECTOR: &str = ".search-input";
const TITLE_SELECTOR: &str = ".blog-title";
const EXCERPT_SELECTOR: &str = ".blog-excerpt";

/// Case-insensitive substring match against a card's title or excerpt.
/// An empty query matches everything.
pub fn search_matches(query: &str, title: &str, excerpt: &str) -> bool {
    let query = query.to_lowercase();
    title.to_lowercase().contains(&query) || excerpt.to_lowercase().contains(&query)
}

pub struct Search {
    _listener: EventListener,
}

pub fn mount(document: &Document) -> Result<Option<Search>, EnhanceError> {
    let Some(input) = document
        .query_selector(SEARCH_INPUT_SELECTOR)?
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
    else {
        return Ok(None);
    };

    let root = document.clone();
    let field = input.clone();
    let listener = EventListener::new(&input, "input", move |_| {
        if let Err(err) = apply(&root, &field.value()) {
            warn!("Search failed: {}", err);
        }
    })?;

    Ok(Some(Search { _listener: listener }))
}

/// Cards are looked up on every keystroke so ones added later are included.
fn apply(document: &Document, query: &str) -> Result<(), EnhanceError> {
    for card in dom::elements(&document.query_selector_all(BLOG_CARD_SELECTOR)?) {
        let title = text_of(&card, TITLE_SELECTOR)?;
        let excerpt = text_of(&card, EXCERPT_SELECTOR)?;
        let display = if search_matches(query, &title, &excerpt) {
            "block"
        } else {
            "none"
        };
        dom::set_style(&card, "display", display)?;
    }
    Ok(())
}

fn text_of(card: &Element, selector: &str) -> Result<String, EnhanceError> {
    Ok(card
        .query_selector(selector)?
        .and_then(|element| element.text_content())
        .unwrap_or_default())
}
