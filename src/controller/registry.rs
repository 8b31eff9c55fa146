use super::Context;
use crate::error::RegistryError;
use crate::page::Page;
use serde_json::Value;
use std::collections::HashMap;

/// Builds a page from the shared context and the redirect's extra arguments
pub type PageConstructor = Box<dyn Fn(&mut Context, &[Value]) -> Box<dyn Page>>;

/// Table of every page the controller may navigate to
///
/// Names are unique; a second registration under the same name is rejected
/// instead of replacing the first. The controller only ever constructs pages
/// whose name is registered here.
pub struct PageRegistry {
    pages: HashMap<String, PageConstructor>,
}

impl PageRegistry {
    /// Creates a new empty registry
    pub fn new() -> Self {
        PageRegistry {
            pages: HashMap::new(),
        }
    }

    /// Registers a boxed page constructor
    ///
    /// Returns error if a page with this name already exists.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        constructor: PageConstructor,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        if self.pages.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }

        self.pages.insert(name, constructor);
        Ok(())
    }

    /// Registers a constructor returning a concrete page type
    ///
    /// ```ignore
    /// registry.register_page("menu", MenuPage::new)?;
    /// ```
    pub fn register_page<P, F>(&mut self, name: impl Into<String>, constructor: F) -> Result<(), RegistryError>
    where
        P: Page + 'static,
        F: Fn(&mut Context, &[Value]) -> P + 'static,
    {
        self.register(
            name,
            Box::new(move |ctx: &mut Context, args: &[Value]| -> Box<dyn Page> {
                Box::new(constructor(ctx, args))
            }),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pages.contains_key(name)
    }

    /// Registered page names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.pages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Builds the page registered under `name`, `None` if there is none
    pub fn construct(&self, name: &str, ctx: &mut Context, args: &[Value]) -> Option<Box<dyn Page>> {
        self.pages.get(name).map(|constructor| constructor(ctx, args))
    }
}

impl Default for PageRegistry {
    fn default() -> Self {
        Self::new()
    }
}
