use super::sequence_dsd;
use crate::refract::element::{Element, OptionElement};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    items: Vec<Element>,
}

sequence_dsd!(Array, Element);

/// One alternative of a [`Select`]: the elements describing that shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Opt {
    items: Vec<Element>,
}

sequence_dsd!(Opt, Element);

/// Mutually exclusive alternatives
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Select {
    items: Vec<OptionElement>,
}

sequence_dsd!(Select, OptionElement);

/// Layered definitions of one type, later entries overriding earlier ones
///
/// [`Extend::merge`] collapses the layers into a single element; see
/// [`merge`](crate::refract::merge).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extend {
    items: Vec<Element>,
}

sequence_dsd!(Extend, Element);
