//! Data structure definitions
//!
//! A DSD is the kind-specific payload of an element. Each of the thirteen element kinds has
//! exactly one DSD type here; [`TypedElement<D>`](super::element::TypedElement) wraps a DSD
//! together with the name, meta and attributes every element carries.
//!
//! Scalars
//!
//!     Null, Boolean, Number (lexical), Str, Ref (symbol)
//!
//! Single child
//!
//!     Holder, Enum, Member (key + optional value)
//!
//! Sequences
//!
//!     Array, Object, Opt, Extend (owned elements), Select (owned options)
//!
//! Sequence DSDs implement [`Sequence`]: the three primitive operations `as_slice`,
//! `insert` and `erase`, from which `push_back`, `len`, `is_empty` and `clear` follow.

mod member;
mod object;
mod scalars;
mod sequences;
mod wrappers;

pub use member::Member;
pub use object::Object;
pub use scalars::{Boolean, Null, Number, Ref, Str};
pub use sequences::{Array, Extend, Opt, Select};
pub use wrappers::{Enum, Holder};

use super::element::{Element, ElementKind, TypedElement};
use super::visitor::ContentVisitor;
use std::fmt;
use std::ops::Range;

/// Payload of one element kind
pub trait Dsd: Clone + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    const KIND: ElementKind;

    fn wrap(element: TypedElement<Self>) -> Element;
    fn downcast_ref(element: &Element) -> Option<&TypedElement<Self>>;
    fn downcast_mut(element: &mut Element) -> Option<&mut TypedElement<Self>>;
    fn downcast(element: Element) -> Result<TypedElement<Self>, Element>;

    /// Dispatch to the [`ContentVisitor`] method of this kind.
    fn accept_content<'a, V: ContentVisitor<'a>>(&'a self, visitor: &mut V) -> V::Output;
}

macro_rules! impl_dsd {
    ($($dsd:ty => $variant:ident, $visit:ident);+ $(;)?) => {
        $(
            impl Dsd for $dsd {
                const KIND: ElementKind = ElementKind::$variant;

                fn wrap(element: TypedElement<Self>) -> Element {
                    Element::$variant(element)
                }

                fn downcast_ref(element: &Element) -> Option<&TypedElement<Self>> {
                    match element {
                        Element::$variant(typed) => Some(typed),
                        _ => None,
                    }
                }

                fn downcast_mut(element: &mut Element) -> Option<&mut TypedElement<Self>> {
                    match element {
                        Element::$variant(typed) => Some(typed),
                        _ => None,
                    }
                }

                fn downcast(element: Element) -> Result<TypedElement<Self>, Element> {
                    match element {
                        Element::$variant(typed) => Ok(typed),
                        other => Err(other),
                    }
                }

                fn accept_content<'a, V: ContentVisitor<'a>>(
                    &'a self,
                    visitor: &mut V,
                ) -> V::Output {
                    visitor.$visit(self)
                }
            }
        )+
    };
}

impl_dsd! {
    Null => Null, null;
    Boolean => Boolean, boolean;
    Number => Number, number;
    Str => String, string;
    Ref => Ref, reference;
    Holder => Holder, holder;
    Member => Member, member;
    Array => Array, array;
    Object => Object, object;
    Enum => Enum, enumeration;
    Opt => Option, option;
    Select => Select, select;
    Extend => Extend, extend;
}

/// Ordered sequence of exclusively owned items
pub trait Sequence {
    type Item;

    fn as_slice(&self) -> &[Self::Item];
    fn as_mut_slice(&mut self) -> &mut [Self::Item];
    /// Insert `item` before `index`; `index == len()` appends.
    fn insert(&mut self, index: usize, item: Self::Item);
    /// Remove and return the items in `range`.
    fn erase(&mut self, range: Range<usize>) -> Vec<Self::Item>;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    fn push_back(&mut self, item: Self::Item) {
        let end = self.len();
        self.insert(end, item);
    }

    fn clear(&mut self) {
        let end = self.len();
        self.erase(0..end);
    }

    fn get(&self, index: usize) -> Option<&Self::Item> {
        self.as_slice().get(index)
    }

    fn iter(&self) -> std::slice::Iter<'_, Self::Item> {
        self.as_slice().iter()
    }

    fn iter_mut(&mut self) -> std::slice::IterMut<'_, Self::Item> {
        self.as_mut_slice().iter_mut()
    }
}

/// Implements [`Sequence`] and the conversions every sequence DSD shares.
macro_rules! sequence_dsd {
    ($name:ident, $item:ty) => {
        impl $name {
            pub fn new() -> Self {
                Self::default()
            }
        }

        impl $crate::refract::dsd::Sequence for $name {
            type Item = $item;

            fn as_slice(&self) -> &[$item] {
                &self.items
            }

            fn as_mut_slice(&mut self) -> &mut [$item] {
                &mut self.items
            }

            fn insert(&mut self, index: usize, item: $item) {
                self.items.insert(index, item);
            }

            fn erase(&mut self, range: std::ops::Range<usize>) -> Vec<$item> {
                self.items.drain(range).collect()
            }
        }

        impl From<Vec<$item>> for $name {
            fn from(items: Vec<$item>) -> Self {
                Self { items }
            }
        }

        impl FromIterator<$item> for $name {
            fn from_iter<T: IntoIterator<Item = $item>>(iter: T) -> Self {
                Self {
                    items: iter.into_iter().collect(),
                }
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.items.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.items.iter()
            }
        }
    };
}

pub(crate) use sequence_dsd;
