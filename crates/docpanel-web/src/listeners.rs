//! Owned DOM event listeners, detached on drop.

use tracing::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget};

struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

#[derive(Default)]
pub(crate) struct ListenerSet {
    entries: Vec<Listener>,
}

impl ListenerSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(err) =
            target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        {
            warn!(event, error = ?err, "failed to attach listener");
            return;
        }
        self.entries.push(Listener {
            target: target.clone(),
            event,
            closure,
        });
    }

    /// Detach every listener.
    pub(crate) fn clear(&mut self) {
        for listener in self.entries.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for ListenerSet {
    fn drop(&mut self) {
        self.clear();
    }
}
