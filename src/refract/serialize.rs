//! Rendering elements into structured values
//!
//! Every element becomes an object with up to four entries, in this order:
//!
//!     element      the element name
//!     meta         serialized meta entries, when there are any
//!     attributes   serialized attributes, when there are any
//!     content      the serialized payload, when the element is not empty
//!
//! `sourceMap` entries of meta and attributes are left out unless source maps were
//! requested. Attributes of an `annotation` element always keep them.

use super::dsd::{
    Array, Boolean, Dsd, Enum, Extend, Holder, Member, Null, Number, Object, Opt, Ref,
    Select, Str,
};
use super::element::{Element, TypedElement};
use super::info::InfoElements;
use super::visitor::{ContentVisitor, ElementFn};
use crate::so;

const SOURCE_MAP: &str = "sourceMap";

/// Render `element` and its whole subtree.
pub fn render_so(element: &Element, source_maps: bool) -> so::Value {
    tracing::info!(element = element.element(), "serializing element tree");
    serialize_element(element, source_maps).into()
}

fn serialize_element(element: &Element, source_maps: bool) -> so::Object {
    element.apply(ElementSerializer { source_maps })
}

struct ElementSerializer {
    source_maps: bool,
}

impl<'a> ElementFn<'a> for ElementSerializer {
    type Output = so::Object;

    fn call<D: Dsd>(&mut self, element: &'a TypedElement<D>) -> so::Object {
        serialize_typed(element, self.source_maps)
    }
}

fn serialize_typed<D: Dsd>(element: &TypedElement<D>, source_maps: bool) -> so::Object {
    tracing::debug!(element = element.element(), kind = %D::KIND, "serializing element");
    let mut result = so::Object::new();
    result.push("element", element.element());

    let meta = serialize_info(element.meta(), source_maps);
    if !meta.is_empty() {
        result.push("meta", meta);
    }

    let attributes = serialize_info(
        element.attributes(),
        source_maps || element.element() == "annotation",
    );
    if !attributes.is_empty() {
        result.push("attributes", attributes);
    }

    if let Some(content) = element.content(&mut ContentSerializer { source_maps }) {
        result.push("content", content);
    }

    result
}

fn serialize_info(info: &InfoElements, source_maps: bool) -> so::Object {
    info.iter()
        .filter(|(key, _)| source_maps || *key != SOURCE_MAP)
        .map(|(key, element)| (key, serialize_element(element, source_maps)))
        .collect()
}

fn serialize_list<'a>(
    items: impl IntoIterator<Item = &'a Element>,
    source_maps: bool,
) -> so::Value {
    so::Value::Array(
        items
            .into_iter()
            .map(|item| serialize_element(item, source_maps).into())
            .collect(),
    )
}

struct ContentSerializer {
    source_maps: bool,
}

impl<'a> ContentVisitor<'a> for ContentSerializer {
    type Output = so::Value;

    fn null(&mut self, _: &'a Null) -> so::Value {
        so::Value::Null
    }

    fn boolean(&mut self, value: &'a Boolean) -> so::Value {
        value.get().into()
    }

    fn number(&mut self, value: &'a Number) -> so::Value {
        so::Value::Number(value.as_str().to_string())
    }

    fn string(&mut self, value: &'a Str) -> so::Value {
        value.as_str().into()
    }

    fn reference(&mut self, value: &'a Ref) -> so::Value {
        value.symbol().into()
    }

    fn holder(&mut self, value: &'a Holder) -> so::Value {
        serialize_element(value.data(), self.source_maps).into()
    }

    fn member(&mut self, value: &'a Member) -> so::Value {
        let mut result = so::Object::new();
        result.push("key", serialize_element(value.key(), self.source_maps));
        if let Some(item) = value.value() {
            result.push("value", serialize_element(item, self.source_maps));
        }
        result.into()
    }

    fn array(&mut self, value: &'a Array) -> so::Value {
        serialize_list(value, self.source_maps)
    }

    fn object(&mut self, value: &'a Object) -> so::Value {
        serialize_list(value, self.source_maps)
    }

    fn enumeration(&mut self, value: &'a Enum) -> so::Value {
        serialize_element(value.value(), self.source_maps).into()
    }

    fn option(&mut self, value: &'a Opt) -> so::Value {
        serialize_list(value, self.source_maps)
    }

    fn select(&mut self, value: &'a Select) -> so::Value {
        so::Value::Array(
            value
                .into_iter()
                .map(|option| serialize_typed(option, self.source_maps).into())
                .collect(),
        )
    }

    fn extend(&mut self, value: &'a Extend) -> so::Value {
        serialize_list(value, self.source_maps)
    }
}
