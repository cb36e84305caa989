use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::error::EnhanceError;

/// An event subscription that removes itself from its target when dropped.
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(
        target: &EventTarget,
        event_type: &'static str,
        mut handler: F,
    ) -> Result<Self, EnhanceError>
    where
        F: FnMut(&Event) + 'static,
    {
        let callback =
            Closure::wrap(Box::new(move |event: Event| handler(&event)) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }

    /// Like [`EventListener::new`], but the handler only sees events that
    /// cast to `E` (mouse, touch, ...).
    pub fn typed<E, F>(
        target: &EventTarget,
        event_type: &'static str,
        mut handler: F,
    ) -> Result<Self, EnhanceError>
    where
        E: JsCast,
        F: FnMut(&E) + 'static,
    {
        Self::new(target, event_type, move |event| {
            if let Some(event) = event.dyn_ref::<E>() {
                handler(event);
            }
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref());
    }
}
