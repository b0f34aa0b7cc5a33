//! Catalog of handler implementations chosen by theme configuration.
//!
//! A theme names handlers by id in its `[handlers]` table; collaborators
//! register implementations under those ids and pick one per resource.

use std::collections::BTreeMap;

use tracing::debug;

use crate::theme::Theme;

#[derive(Debug, Clone)]
pub struct HandlerCatalog<T> {
    handlers: BTreeMap<String, T>,
}

impl<T> Default for HandlerCatalog<T> {
    fn default() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }
}

impl<T> HandlerCatalog<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `id`, returning the one it replaces.
    pub fn register(&mut self, id: impl Into<String>, handler: T) -> Option<T> {
        self.handlers.insert(id.into(), handler)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.handlers.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Handler the theme configures for `resource`, if it is registered.
    pub fn select(&self, theme: &Theme, resource: &str) -> Option<&T> {
        let id = theme.custom_handler_for(resource)?;
        let handler = self.handlers.get(id);
        if handler.is_none() {
            debug!(theme = theme.name(), resource, handler = id, "configured handler is not registered");
        }
        handler
    }
}
