//! Visitor traits for dispatching on element kind
//!
//! Three ways to get from an [`Element`](super::Element) to kind-specific code:
//!
//! - [`ElementVisitor`] / [`ElementVisitorMut`]: one method per kind, receiving the
//!   typed element (name, meta, attributes and payload)
//! - [`ElementFn`]: a single generic method over any [`Dsd`], for code that treats every
//!   kind alike apart from the payload type
//! - [`ContentVisitor`]: one method per kind, receiving only the payload of a non-empty
//!   element
//!
//! Dispatch is total: adding an element kind breaks every visitor until it handles it.

use super::dsd::{
    Array, Boolean, Dsd, Enum, Extend, Holder, Member, Null, Number, Object, Opt, Ref,
    Select, Str,
};
use super::element::{
    ArrayElement, BooleanElement, EnumElement, ExtendElement, HolderElement, MemberElement,
    NullElement, NumberElement, ObjectElement, OptionElement, RefElement, SelectElement,
    StringElement, TypedElement,
};

pub trait ElementVisitor<'a> {
    type Output;

    fn visit_null(&mut self, element: &'a NullElement) -> Self::Output;
    fn visit_boolean(&mut self, element: &'a BooleanElement) -> Self::Output;
    fn visit_number(&mut self, element: &'a NumberElement) -> Self::Output;
    fn visit_string(&mut self, element: &'a StringElement) -> Self::Output;
    fn visit_ref(&mut self, element: &'a RefElement) -> Self::Output;
    fn visit_holder(&mut self, element: &'a HolderElement) -> Self::Output;
    fn visit_member(&mut self, element: &'a MemberElement) -> Self::Output;
    fn visit_array(&mut self, element: &'a ArrayElement) -> Self::Output;
    fn visit_object(&mut self, element: &'a ObjectElement) -> Self::Output;
    fn visit_enum(&mut self, element: &'a EnumElement) -> Self::Output;
    fn visit_option(&mut self, element: &'a OptionElement) -> Self::Output;
    fn visit_select(&mut self, element: &'a SelectElement) -> Self::Output;
    fn visit_extend(&mut self, element: &'a ExtendElement) -> Self::Output;
}

pub trait ElementVisitorMut {
    type Output;

    fn visit_null(&mut self, element: &mut NullElement) -> Self::Output;
    fn visit_boolean(&mut self, element: &mut BooleanElement) -> Self::Output;
    fn visit_number(&mut self, element: &mut NumberElement) -> Self::Output;
    fn visit_string(&mut self, element: &mut StringElement) -> Self::Output;
    fn visit_ref(&mut self, element: &mut RefElement) -> Self::Output;
    fn visit_holder(&mut self, element: &mut HolderElement) -> Self::Output;
    fn visit_member(&mut self, element: &mut MemberElement) -> Self::Output;
    fn visit_array(&mut self, element: &mut ArrayElement) -> Self::Output;
    fn visit_object(&mut self, element: &mut ObjectElement) -> Self::Output;
    fn visit_enum(&mut self, element: &mut EnumElement) -> Self::Output;
    fn visit_option(&mut self, element: &mut OptionElement) -> Self::Output;
    fn visit_select(&mut self, element: &mut SelectElement) -> Self::Output;
    fn visit_extend(&mut self, element: &mut ExtendElement) -> Self::Output;
}

/// A function generic over the element kind
pub trait ElementFn<'a> {
    type Output;

    fn call<D: Dsd>(&mut self, element: &'a TypedElement<D>) -> Self::Output;
}

/// Runs an [`ElementFn`] as an [`ElementVisitor`].
pub struct Adapter<F> {
    function: F,
}

impl<F> Adapter<F> {
    pub fn new(function: F) -> Self {
        Self { function }
    }
}

macro_rules! forward_to_fn {
    ($($method:ident: $element:ty),+ $(,)?) => {
        $(
            fn $method(&mut self, element: &'a $element) -> Self::Output {
                self.function.call(element)
            }
        )+
    };
}

impl<'a, F: ElementFn<'a>> ElementVisitor<'a> for Adapter<F> {
    type Output = F::Output;

    forward_to_fn! {
        visit_null: NullElement,
        visit_boolean: BooleanElement,
        visit_number: NumberElement,
        visit_string: StringElement,
        visit_ref: RefElement,
        visit_holder: HolderElement,
        visit_member: MemberElement,
        visit_array: ArrayElement,
        visit_object: ObjectElement,
        visit_enum: EnumElement,
        visit_option: OptionElement,
        visit_select: SelectElement,
        visit_extend: ExtendElement,
    }
}

/// Visits the payload of a non-empty element
pub trait ContentVisitor<'a> {
    type Output;

    fn null(&mut self, value: &'a Null) -> Self::Output;
    fn boolean(&mut self, value: &'a Boolean) -> Self::Output;
    fn number(&mut self, value: &'a Number) -> Self::Output;
    fn string(&mut self, value: &'a Str) -> Self::Output;
    fn reference(&mut self, value: &'a Ref) -> Self::Output;
    fn holder(&mut self, value: &'a Holder) -> Self::Output;
    fn member(&mut self, value: &'a Member) -> Self::Output;
    fn array(&mut self, value: &'a Array) -> Self::Output;
    fn object(&mut self, value: &'a Object) -> Self::Output;
    fn enumeration(&mut self, value: &'a Enum) -> Self::Output;
    fn option(&mut self, value: &'a Opt) -> Self::Output;
    fn select(&mut self, value: &'a Select) -> Self::Output;
    fn extend(&mut self, value: &'a Extend) -> Self::Output;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refract::dsd::Sequence;
    use crate::refract::element::{Element, ElementKind};

    struct KindName;

    impl<'a> ElementFn<'a> for KindName {
        type Output = (ElementKind, &'a str);

        fn call<D: Dsd>(&mut self, element: &'a TypedElement<D>) -> Self::Output {
            (D::KIND, element.element())
        }
    }

    #[test]
    fn element_fn_sees_the_variant_kind() {
        for kind in ElementKind::ALL {
            let element = Element::empty(kind);
            assert_eq!(element.apply(KindName), (kind, kind.dsd_name()));
        }
    }

    struct ChildCount;

    impl<'a> ContentVisitor<'a> for ChildCount {
        type Output = usize;

        fn null(&mut self, _: &'a Null) -> usize {
            0
        }
        fn boolean(&mut self, _: &'a Boolean) -> usize {
            0
        }
        fn number(&mut self, _: &'a Number) -> usize {
            0
        }
        fn string(&mut self, _: &'a Str) -> usize {
            0
        }
        fn reference(&mut self, _: &'a Ref) -> usize {
            0
        }
        fn holder(&mut self, _: &'a Holder) -> usize {
            1
        }
        fn member(&mut self, value: &'a Member) -> usize {
            1 + usize::from(value.value().is_some())
        }
        fn array(&mut self, value: &'a Array) -> usize {
            value.len()
        }
        fn object(&mut self, value: &'a Object) -> usize {
            value.len()
        }
        fn enumeration(&mut self, _: &'a Enum) -> usize {
            1
        }
        fn option(&mut self, value: &'a Opt) -> usize {
            value.len()
        }
        fn select(&mut self, value: &'a Select) -> usize {
            value.len()
        }
        fn extend(&mut self, value: &'a Extend) -> usize {
            value.len()
        }
    }

    #[test]
    fn content_visitor_skips_empty_elements() {
        let array = Element::array([Element::number(1), Element::number(2)]);
        assert_eq!(array.content(&mut ChildCount), Some(2));
        assert_eq!(Element::member("k", Element::null()).content(&mut ChildCount), Some(2));
        assert_eq!(Element::empty(ElementKind::Array).content(&mut ChildCount), None);
    }

    struct Rename;

    impl ElementVisitorMut for Rename {
        type Output = ();

        fn visit_null(&mut self, element: &mut NullElement) {
            element.set_element("nothing");
        }
        fn visit_boolean(&mut self, _: &mut BooleanElement) {}
        fn visit_number(&mut self, _: &mut NumberElement) {}
        fn visit_string(&mut self, element: &mut StringElement) {
            element.set_element("text");
        }
        fn visit_ref(&mut self, _: &mut RefElement) {}
        fn visit_holder(&mut self, _: &mut HolderElement) {}
        fn visit_member(&mut self, _: &mut MemberElement) {}
        fn visit_array(&mut self, _: &mut ArrayElement) {}
        fn visit_object(&mut self, _: &mut ObjectElement) {}
        fn visit_enum(&mut self, _: &mut EnumElement) {}
        fn visit_option(&mut self, _: &mut OptionElement) {}
        fn visit_select(&mut self, _: &mut SelectElement) {}
        fn visit_extend(&mut self, _: &mut ExtendElement) {}
    }

    #[test]
    fn mutable_visitor_reaches_the_typed_element() {
        let mut element = Element::string("x");
        element.accept_mut(&mut Rename);
        assert_eq!(element.element(), "text");

        let mut null = Element::null();
        null.accept_mut(&mut Rename);
        assert_eq!(null.element(), "nothing");
    }
}
