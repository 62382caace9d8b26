//! Collapsing an Extend into a single element
//!
//! The layers of an Extend are folded left to right into an accumulator that starts as a
//! clone of the first layer. For each following layer:
//!
//!     kind differs        accumulator := clone of the layer
//!     kind matches        meta merged (except id, prefix, namespace), attributes merged,
//!                         then the value merged per kind when the layer is non-empty
//!
//! Value merging per kind:
//!
//!     Boolean, Number, String, Ref    last value wins
//!     Array                           children appended
//!     Object                          children appended; a member with the same key, a ref
//!                                     with the same symbol or an equal select is replaced
//!                                     where it stands
//!     Enum                            last value wins, `enumerations` unioned
//!     anything else                   accumulator := clone of the layer

use super::dsd::{Array, Dsd, Enum, Extend, Member, Object, Select, Sequence};
use super::element::{Element, ElementKind, TypedElement};

/// Meta entries that belong to one definition and are never inherited
const NON_INHERITED_META: [&str; 3] = ["id", "prefix", "namespace"];

const ENUMERATIONS: &str = "enumerations";

impl Extend {
    /// Fold the layers into one element; `None` when there are no layers.
    pub fn merge(&self) -> Option<Element> {
        let mut layers = self.iter();
        let mut merged = layers.next()?.clone();
        for layer in layers {
            merge_into(&mut merged, layer);
        }
        Some(merged)
    }
}

fn merge_into(target: &mut Element, layer: &Element) {
    if target.kind() != layer.kind() {
        *target = layer.clone();
        return;
    }

    let is_enum = layer.kind() == ElementKind::Enum;
    target
        .meta_mut()
        .merge_from(layer.meta(), |key| !NON_INHERITED_META.contains(&key));
    target
        .attributes_mut()
        .merge_from(layer.attributes(), |key| !(is_enum && key == ENUMERATIONS));
    if is_enum {
        merge_enumerations(target, layer);
    }

    if layer.is_empty() {
        return;
    }

    match (target, layer) {
        (Element::Boolean(target), Element::Boolean(layer)) => replace_value(target, layer),
        (Element::Number(target), Element::Number(layer)) => replace_value(target, layer),
        (Element::String(target), Element::String(layer)) => replace_value(target, layer),
        (Element::Ref(target), Element::Ref(layer)) => replace_value(target, layer),
        (Element::Enum(target), Element::Enum(layer)) => replace_value(target, layer),
        (Element::Array(target), Element::Array(layer)) => {
            if let Some(children) = layer.get() {
                append_children(target.value_mut(), children);
            }
        }
        (Element::Object(target), Element::Object(layer)) => {
            if let Some(children) = layer.get() {
                merge_object(target.value_mut(), children);
            }
        }
        (target, layer) => *target = layer.clone(),
    }
}

fn replace_value<D: Dsd>(target: &mut TypedElement<D>, layer: &TypedElement<D>) {
    if let Some(value) = layer.get() {
        target.set(value.clone());
    }
}

fn append_children(target: &mut Array, children: &Array) {
    for child in children {
        target.push_back(child.clone());
    }
}

fn merge_object(target: &mut Object, children: &Object) {
    for child in children {
        let is_select = matches!(child, Element::Select(_));
        if is_select && target.iter().any(|existing| existing == child) {
            continue;
        }
        match target.iter().position(|existing| collides(existing, child)) {
            Some(index) => {
                target.erase(index..index + 1);
                target.insert(index, child.clone());
            }
            None => target.push_back(child.clone()),
        }
    }
}

/// Whether `child` redefines `existing` inside an object
fn collides(existing: &Element, child: &Element) -> bool {
    if let Some(key) = member_key(child) {
        return match existing {
            Element::Member(_) => member_key(existing) == Some(key),
            Element::Select(select) => select
                .get()
                .is_some_and(|select| select_defines(select, key)),
            _ => false,
        };
    }

    match (existing, child) {
        (Element::Ref(existing), Element::Ref(child)) => {
            existing.get().is_some() && existing.get() == child.get()
        }
        _ => false,
    }
}

fn select_defines(select: &Select, key: &str) -> bool {
    select.iter().any(|option| {
        option
            .get()
            .is_some_and(|option| option.iter().any(|child| member_key(child) == Some(key)))
    })
}

fn member_key(element: &Element) -> Option<&str> {
    element.downcast_ref::<Member>()?.get()?.key_str()
}

fn merge_enumerations(target: &mut Element, layer: &Element) {
    let Some(added) = layer
        .attributes()
        .get(ENUMERATIONS)
        .and_then(|element| element.downcast_ref::<Array>())
    else {
        return;
    };

    let existing = target
        .attributes_mut()
        .get_mut(ENUMERATIONS)
        .and_then(|element| element.downcast_mut::<Array>());
    match existing {
        Some(existing) => {
            if let Some(added) = added.get() {
                let union = existing.value_mut();
                for enumeration in added {
                    if let Some(index) = union.iter().position(|e| e == enumeration) {
                        union.erase(index..index + 1);
                    }
                    union.push_back(enumeration.clone());
                }
            }
        }
        None => target.attributes_mut().set(ENUMERATIONS, added.clone()),
    }
}
