use std::cell::RefCell;

use log::{debug, warn};
use web_sys::{Document, Element};

use crate::dom::{self, FADE_IN};
use crate::error::EnhanceError;
use crate::events::dispatch::{Dispatcher, Trigger};

pub const ALL_CATEGORIES: &str = "all";
pub const BLOG_CARD_SELECTOR: &str = ".blog-card";
const FILTER_BUTTON_SELECTOR: &str = ".filter-btn";
const ACTIVE: &str = "active";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: String,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        Self {
            selected: ALL_CATEGORIES.to_string(),
        }
    }
}

impl CategoryFilter {
    /// A button without a category resets to showing everything.
    pub fn select(&mut self, category: Option<String>) {
        self.selected = category.unwrap_or_else(|| ALL_CATEGORIES.to_string());
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn shows(&self, item_category: Option<&str>) -> bool {
        self.selected == ALL_CATEGORIES || item_category == Some(self.selected.as_str())
    }
}

/// Which buttons should carry `active` once `pressed` is clicked: exactly
/// the pressed one.
pub fn active_states<T: PartialEq>(buttons: &[T], pressed: &T) -> Vec<bool> {
    buttons.iter().map(|button| button == pressed).collect()
}

/// Routes `.filter-btn` clicks to a filter over the blog cards present at
/// startup. Buttons are looked up on every click, so ones added later are
/// cleared like the rest.
pub fn mount(document: &Document, dispatcher: &mut Dispatcher) -> Result<bool, EnhanceError> {
    if document.query_selector(FILTER_BUTTON_SELECTOR)?.is_none() {
        return Ok(false);
    }
    let cards = dom::elements(&document.query_selector_all(BLOG_CARD_SELECTOR)?);
    let filter = RefCell::new(CategoryFilter::default());
    let root = document.clone();

    dispatcher.on(Trigger::Click(FILTER_BUTTON_SELECTOR), move |_, button| {
        let Some(button) = button else {
            return;
        };
        filter.borrow_mut().select(button.get_attribute("data-category"));
        if let Err(err) = apply(&root, &filter.borrow(), button, &cards) {
            warn!("Blog filter failed: {}", err);
        }
    })?;
    Ok(true)
}

fn apply(
    document: &Document,
    filter: &CategoryFilter,
    pressed: &Element,
    cards: &[Element],
) -> Result<(), EnhanceError> {
    let buttons = dom::elements(&document.query_selector_all(FILTER_BUTTON_SELECTOR)?);
    for (button, active) in buttons.iter().zip(active_states(&buttons, pressed)) {
        button.class_list().toggle_with_force(ACTIVE, active)?;
    }

    let mut shown = 0;
    for card in cards {
        if filter.shows(card.get_attribute("data-category").as_deref()) {
            dom::set_style(card, "display", "block")?;
            card.class_list().add_1(FADE_IN)?;
            shown += 1;
        } else {
            dom::set_style(card, "display", "none")?;
        }
    }
    debug!(
        "Category {:?}: showing {} of {} cards",
        filter.selected(),
        shown,
        cards.len()
    );
    Ok(())
}
