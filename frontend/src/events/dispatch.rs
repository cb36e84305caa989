//! Document-wide event routing.
//!
//! Keyboard shortcuts and delegated clicks from every component share one
//! `keydown` and one `click` subscription on the document. Components
//! register routes instead of their own global listeners.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use super::listener::EventListener;
use crate::error::EnhanceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A `keydown` whose `key` is exactly this name.
    Key(&'static str),
    /// A `click` on an element matching the selector, or anywhere inside one.
    Click(&'static str),
}

impl Trigger {
    pub fn event_type(self) -> &'static str {
        match self {
            Trigger::Key(_) => "keydown",
            Trigger::Click(_) => "click",
        }
    }
}

/// Registered routes, kept in registration order.
pub struct RouteTable<H> {
    routes: Vec<(Trigger, H)>,
}

impl<H> Default for RouteTable<H> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<H> RouteTable<H> {
    pub fn insert(&mut self, trigger: Trigger, handler: H) {
        self.routes.push((trigger, handler));
    }

    /// Handlers whose trigger fires for an event, each paired with the
    /// element its selector matched. `closest` resolves a selector against
    /// the event target and its ancestors.
    pub fn matching<T, F>(&self, event_type: &str, key: Option<&str>, mut closest: F) -> Vec<(&H, Option<T>)>
    where
        F: FnMut(&str) -> Option<T>,
    {
        self.routes
            .iter()
            .filter(|(trigger, _)| trigger.event_type() == event_type)
            .filter_map(|(trigger, handler)| match *trigger {
                Trigger::Key(name) => (key == Some(name)).then(|| (handler, None)),
                Trigger::Click(selector) => closest(selector).map(|element| (handler, Some(element))),
            })
            .collect()
    }
}

type Handler = Rc<dyn Fn(&Event, Option<&Element>)>;

pub struct Dispatcher {
    document: Document,
    routes: Rc<RefCell<RouteTable<Handler>>>,
    listeners: HashMap<&'static str, EventListener>,
}

impl Dispatcher {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
            routes: Rc::new(RefCell::new(RouteTable::default())),
            listeners: HashMap::new(),
        }
    }

    /// Registers a route. The document listener for the trigger's event type
    /// is attached the first time a route needs it.
    pub fn on<F>(&mut self, trigger: Trigger, handler: F) -> Result<(), EnhanceError>
    where
        F: Fn(&Event, Option<&Element>) + 'static,
    {
        let event_type = trigger.event_type();
        if !self.listeners.contains_key(event_type) {
            let routes = Rc::clone(&self.routes);
            let listener = EventListener::new(&self.document, event_type, move |event| {
                dispatch(&routes, event)
            })?;
            self.listeners.insert(event_type, listener);
        }

        self.routes.borrow_mut().insert(trigger, Rc::new(handler));
        Ok(())
    }
}

fn dispatch(routes: &RefCell<RouteTable<Handler>>, event: &Event) {
    let key = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key);
    let target = event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok());

    // Handlers run after the table borrow ends.
    let matched: Vec<(Handler, Option<Element>)> = routes
        .borrow()
        .matching(&event.type_(), key.as_deref(), |selector| {
            target
                .as_ref()
                .and_then(|element| element.closest(selector).ok().flatten())
        })
        .into_iter()
        .map(|(handler, element)| (Rc::clone(handler), element))
        .collect();

    for (handler, element) in matched {
        handler(event, element.as_ref());
    }
}
