use std::borrow::Cow;

use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::error::EnhanceError;
use crate::events::dispatch::{Dispatcher, Trigger};

const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;

/// Element id named by an in-page link, percent-decoded. A bare `#` names
/// nothing.
pub fn fragment_id(href: &str) -> Option<String> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() {
        return None;
    }
    Some(
        urlencoding::decode(fragment)
            .map(Cow::into_owned)
            .unwrap_or_else(|_| fragment.to_string()),
    )
}

/// Replaces the jump of in-page links with a smooth scroll.
pub fn mount(document: &Document, dispatcher: &mut Dispatcher) -> Result<bool, EnhanceError> {
    if document.query_selector(ANCHOR_SELECTOR)?.is_none() {
        return Ok(false);
    }

    let root = document.clone();
    dispatcher.on(Trigger::Click(ANCHOR_SELECTOR), move |event, anchor| {
        let Some(anchor) = anchor else {
            return;
        };
        event.prevent_default();
        let Some(target) = anchor
            .get_attribute("href")
            .as_deref()
            .and_then(fragment_id)
            .and_then(|id| root.get_element_by_id(&id))
        else {
            return;
        };

        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        target.scroll_into_view_with_scroll_into_view_options(&options);
    })?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fragment() {
        assert_eq!(fragment_id("#contact").as_deref(), Some("contact"));
    }

    #[test]
    fn bare_hash_names_nothing() {
        assert_eq!(fragment_id("#"), None);
    }

    #[test]
    fn non_fragment_links_are_ignored() {
        assert_eq!(fragment_id("/about#team"), None);
        assert_eq!(fragment_id(""), None);
    }

    #[test]
    fn percent_encoded_ids_are_decoded() {
        assert_eq!(fragment_id("#caf%C3%A9-menu").as_deref(), Some("café-menu"));
        assert_eq!(fragment_id("#our%20work").as_deref(), Some("our work"));
    }

    #[test]
    fn invalid_encoding_falls_back_to_raw_fragment() {
        assert_eq!(fragment_id("#bad%FF").as_deref(), Some("bad%FF"));
    }
}
