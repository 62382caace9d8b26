//! Named type registry
//!
//! Named types are elements carrying a String `id` in their meta. An element whose
//! `element()` is not one of the reserved base names refers to another named type, its
//! parent. The registry stores named types by id and follows those parent links.
//!
//!     Base     (element "object", id "Base")
//!     Derived  (element "Base",   id "Derived")
//!
//! `expand_inheritance("Derived")` yields an Extend holding clones of Base then Derived;
//! `resolve("Derived")` merges it into one object.

use super::dsd::{Extend, Str};
use super::element::{CloneFlags, Element};
use std::collections::BTreeMap;
use std::fmt;

/// Element names of the base types, which can never be registered
pub const RESERVED_NAMES: [&str; 13] = [
    "boolean", "number", "string", "null", "array", "object", "enum", "member", "ref",
    "select", "option", "extend", "generic",
];

pub fn is_reserved(name: &str) -> bool {
    RESERVED_NAMES.contains(&name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The element has no `id` meta entry holding a String element
    MissingId,
    /// The id is one of the reserved base names
    Reserved(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::MissingId => write!(f, "Element has no string 'id' in meta"),
            RegistryError::Reserved(name) => {
                write!(f, "Cannot register base element '{}'", name)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    types: BTreeMap<String, Element>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named type.
    ///
    /// Returns `Ok(false)` and leaves the registry unchanged when the id is already taken.
    pub fn add(&mut self, element: Element) -> Result<bool, RegistryError> {
        let id = element_id(&element)
            .ok_or(RegistryError::MissingId)?
            .to_string();
        if is_reserved(&id) {
            return Err(RegistryError::Reserved(id));
        }
        if self.types.contains_key(&id) {
            return Ok(false);
        }
        self.types.insert(id, element);
        Ok(true)
    }

    pub fn find(&self, name: &str) -> Option<&Element> {
        self.types.get(name)
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.types.remove(name).is_some()
    }

    pub fn clear(&mut self) {
        self.types.clear();
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// The farthest registered ancestor of `name`, or `name` itself when its parent is a
    /// base type or unknown.
    pub fn find_root_ancestor(&self, name: &str) -> Option<&Element> {
        let mut current = self.find(name)?;
        let mut visited = vec![name];
        loop {
            let parent_name = current.element();
            if is_reserved(parent_name) || visited.contains(&parent_name) {
                return Some(current);
            }
            match self.find(parent_name) {
                Some(parent) => {
                    visited.push(parent_name);
                    current = parent;
                }
                None => return Some(current),
            }
        }
    }

    /// The inheritance chain of `name` as an Extend, root ancestor first and `name` last.
    ///
    /// Each layer is a clone without its element name and `id`, tagged with a `ref` meta
    /// entry naming the type it came from. A cyclic chain expands to an empty Extend.
    pub fn expand_inheritance(&self, name: &str) -> Option<Element> {
        let mut current = self.find(name)?;
        let mut chain = vec![(name, current)];
        loop {
            let parent_name = current.element();
            if is_reserved(parent_name) {
                break;
            }
            if chain.iter().any(|(visited, _)| *visited == parent_name) {
                tracing::debug!(id = name, parent = parent_name, "cyclic inheritance");
                return Some(Element::extend([]));
            }
            match self.find(parent_name) {
                Some(parent) => {
                    chain.push((parent_name, parent));
                    current = parent;
                }
                None => break,
            }
        }

        let flags = (CloneFlags::ALL ^ CloneFlags::NAME) | CloneFlags::NO_META_ID;
        let layers = chain.iter().rev().map(|(id, element)| {
            let mut layer = element.clone_with(flags);
            layer.meta_mut().set("ref", Element::string(*id));
            layer
        });
        Some(Element::extend(layers))
    }

    /// `name` with its inheritance chain merged in; `None` for unknown or cyclic types.
    pub fn resolve(&self, name: &str) -> Option<Element> {
        let expanded = self.expand_inheritance(name)?.downcast::<Extend>().ok()?;
        expanded.get()?.merge()
    }
}

fn element_id(element: &Element) -> Option<&str> {
    element
        .meta()
        .get("id")?
        .downcast_ref::<Str>()?
        .get()
        .map(Str::as_str)
}
