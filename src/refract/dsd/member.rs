use crate::refract::element::{Element, StringElement};

/// Key/value pair of an object
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    key: Box<Element>,
    value: Option<Box<Element>>,
}

impl Default for Member {
    fn default() -> Self {
        Self {
            key: Box::new(StringElement::empty().into()),
            value: None,
        }
    }
}

impl Member {
    pub fn new(key: impl Into<Element>, value: Option<Element>) -> Self {
        Self {
            key: Box::new(key.into()),
            value: value.map(Box::new),
        }
    }

    /// Member whose key is a String element holding `name`
    pub fn named(name: impl Into<String>, value: impl Into<Element>) -> Self {
        Self::new(Element::string(name), Some(value.into()))
    }

    pub fn key(&self) -> &Element {
        &self.key
    }

    pub fn key_mut(&mut self) -> &mut Element {
        &mut self.key
    }

    /// The key as text, if it is a non-empty String element
    pub fn key_str(&self) -> Option<&str> {
        self.key.as_str()
    }

    pub fn value(&self) -> Option<&Element> {
        self.value.as_deref()
    }

    pub fn value_mut(&mut self) -> Option<&mut Element> {
        self.value.as_deref_mut()
    }

    pub fn set_value(&mut self, value: impl Into<Element>) {
        self.value = Some(Box::new(value.into()));
    }

    pub fn take_value(&mut self) -> Option<Element> {
        self.value.take().map(|value| *value)
    }
}
