use crate::refract::element::Element;

/// Opaque carrier of one nested element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Holder {
    data: Box<Element>,
}

impl Holder {
    pub fn new(data: impl Into<Element>) -> Self {
        Self {
            data: Box::new(data.into()),
        }
    }

    pub fn data(&self) -> &Element {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut Element {
        &mut self.data
    }

    pub fn into_data(self) -> Element {
        *self.data
    }
}

/// The value chosen from an enumeration
///
/// The available enumerations live in the `enumerations` attribute of the owning element.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enum {
    value: Box<Element>,
}

impl Enum {
    pub fn new(value: impl Into<Element>) -> Self {
        Self {
            value: Box::new(value.into()),
        }
    }

    pub fn value(&self) -> &Element {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut Element {
        &mut self.value
    }

    pub fn set(&mut self, value: impl Into<Element>) {
        *self.value = value.into();
    }

    pub fn into_value(self) -> Element {
        *self.value
    }
}
