//! Per-command publish/subscribe registry.
//!
//! Option activation and sub-command matching are both delivered as named
//! events. Subscribing the same name twice appends; every listener runs in
//! registration order.

use std::collections::HashMap;
use std::fmt;

use crate::error::Result;
use crate::value::Values;

/// Event name fired with the whole positional list before dispatch.
pub const CATCH_ALL: &str = "*";

/// Payload delivered to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// An option fired, with its value if one was consumed.
    Activation(Option<&'a str>),
    /// Positional tokens: the full list for `*`, the remainder for a command.
    Tokens(&'a [String]),
}

impl<'a> Event<'a> {
    pub fn value(&self) -> Option<&'a str> {
        match self {
            Event::Activation(value) => *value,
            Event::Tokens(_) => None,
        }
    }

    pub fn tokens(&self) -> &'a [String] {
        match self {
            Event::Tokens(tokens) => tokens,
            Event::Activation(_) => &[],
        }
    }
}

/// A registered behavior. Receives the owning command's values.
pub type Listener = Box<dyn FnMut(&Event<'_>, &mut Values) -> Result<()>>;

#[derive(Default)]
pub struct EventBus {
    listeners: HashMap<String, Vec<Listener>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, name: impl Into<String>, listener: F)
    where
        F: FnMut(&Event<'_>, &mut Values) -> Result<()> + 'static,
    {
        self.listeners
            .entry(name.into())
            .or_default()
            .push(Box::new(listener));
    }

    /// Fire `name`, returning how many listeners ran.
    ///
    /// Stops at the first listener error. A name nobody subscribed to is a
    /// no-op that returns `Ok(0)`.
    pub fn publish(&mut self, name: &str, event: &Event<'_>, values: &mut Values) -> Result<usize> {
        let Some(listeners) = self.listeners.get_mut(name) else {
            return Ok(0);
        };
        for listener in listeners.iter_mut() {
            listener(event, values)?;
        }
        Ok(listeners.len())
    }

    pub fn listener_count(&self, name: &str) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<(&str, usize)> = self
            .listeners
            .iter()
            .map(|(name, listeners)| (name.as_str(), listeners.len()))
            .collect();
        names.sort_unstable();
        f.debug_struct("EventBus").field("listeners", &names).finish()
    }
}
