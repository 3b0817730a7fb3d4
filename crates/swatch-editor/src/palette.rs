//! Command palette: a search overlay over the component library.

use swatch_core::registry::{ComponentDefinition, Registry};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandPalette {
    open: bool,
    query: String,
}

impl CommandPalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Flip visibility. Opening always starts from an empty query.
    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open = true;
            self.query.clear();
        }
    }

    pub fn close(&mut self) {
        self.open = false;
        self.query.clear();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Library entries matching the current query.
    pub fn results<'r>(&self, registry: &'r Registry) -> Vec<&'r ComponentDefinition> {
        registry.search(&self.query)
    }
}
