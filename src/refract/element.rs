//! Refract elements
//!
//! [`Element`] is the universal node of the output tree: a closed sum over the thirteen
//! element kinds. Each variant holds a [`TypedElement<D>`], which pairs the kind's payload
//! (its [DSD](super::dsd)) with what every element carries:
//!
//! - a name (`element()`), defaulting to the DSD name of the kind
//! - `meta` and `attributes`, ordered maps of owned child elements
//! - the payload itself, absent until a value is assigned
//!
//! An element with no payload is *empty*. Emptiness is not the same as a container having
//! no children: an Array assigned an empty list is not empty.
//!
//! Equality compares kind, emptiness, attributes, meta and payload. The name does not
//! take part.

use super::dsd::{
    Array, Boolean, Dsd, Enum, Extend, Holder, Member, Null, Number, Object, Opt, Ref,
    Select, Str,
};
use super::info::InfoElements;
use super::visitor::{Adapter, ContentVisitor, ElementFn, ElementVisitor, ElementVisitorMut};
use bitflags::bitflags;
use std::fmt;

/// The closed set of element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Null,
    Boolean,
    Number,
    String,
    Ref,
    Holder,
    Member,
    Array,
    Object,
    Enum,
    Option,
    Select,
    Extend,
}

impl ElementKind {
    pub const ALL: [ElementKind; 13] = [
        ElementKind::Null,
        ElementKind::Boolean,
        ElementKind::Number,
        ElementKind::String,
        ElementKind::Ref,
        ElementKind::Holder,
        ElementKind::Member,
        ElementKind::Array,
        ElementKind::Object,
        ElementKind::Enum,
        ElementKind::Option,
        ElementKind::Select,
        ElementKind::Extend,
    ];

    /// Element name used when none was set explicitly
    pub fn dsd_name(self) -> &'static str {
        match self {
            ElementKind::Null => "null",
            ElementKind::Boolean => "boolean",
            ElementKind::Number => "number",
            ElementKind::String => "string",
            ElementKind::Ref => "ref",
            ElementKind::Holder => "",
            ElementKind::Member => "member",
            ElementKind::Array => "array",
            ElementKind::Object => "object",
            ElementKind::Enum => "enum",
            ElementKind::Option => "option",
            ElementKind::Select => "select",
            ElementKind::Extend => "extend",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

bitflags! {
    /// Selects which parts of an element [`clone_with`](Element::clone_with) copies
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CloneFlags: u8 {
        const META = 1 << 0;
        const ATTRIBUTES = 1 << 1;
        const VALUE = 1 << 2;
        const NAME = 1 << 3;
        const ALL = Self::META.bits()
            | Self::ATTRIBUTES.bits()
            | Self::VALUE.bits()
            | Self::NAME.bits();
        /// Drop the `id` meta entry even when `META` is requested
        const NO_META_ID = 1 << 4;
    }
}

/// An element of one statically known kind
#[derive(Debug, Clone, Default)]
pub struct TypedElement<D> {
    name: Option<String>,
    meta: InfoElements,
    attributes: InfoElements,
    value: Option<D>,
}

pub type NullElement = TypedElement<Null>;
pub type BooleanElement = TypedElement<Boolean>;
pub type NumberElement = TypedElement<Number>;
pub type StringElement = TypedElement<Str>;
pub type RefElement = TypedElement<Ref>;
pub type HolderElement = TypedElement<Holder>;
pub type MemberElement = TypedElement<Member>;
pub type ArrayElement = TypedElement<Array>;
pub type ObjectElement = TypedElement<Object>;
pub type EnumElement = TypedElement<Enum>;
pub type OptionElement = TypedElement<Opt>;
pub type SelectElement = TypedElement<Select>;
pub type ExtendElement = TypedElement<Extend>;

impl<D: Dsd> TypedElement<D> {
    /// Element without a value
    pub fn empty() -> Self {
        Self {
            name: None,
            meta: InfoElements::new(),
            attributes: InfoElements::new(),
            value: None,
        }
    }

    pub fn new(value: D) -> Self {
        Self {
            value: Some(value),
            ..Self::empty()
        }
    }

    pub fn kind(&self) -> ElementKind {
        D::KIND
    }

    pub fn element(&self) -> &str {
        self.name.as_deref().unwrap_or(D::KIND.dsd_name())
    }

    pub fn set_element(&mut self, name: impl Into<String>) {
        let name = name.into();
        self.name = if name.is_empty() { None } else { Some(name) };
    }

    /// Builder form of [`set_element`](Self::set_element)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.set_element(name);
        self
    }

    pub fn meta(&self) -> &InfoElements {
        &self.meta
    }

    pub fn meta_mut(&mut self) -> &mut InfoElements {
        &mut self.meta
    }

    pub fn attributes(&self) -> &InfoElements {
        &self.attributes
    }

    pub fn attributes_mut(&mut self) -> &mut InfoElements {
        &mut self.attributes
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    pub fn get(&self) -> Option<&D> {
        self.value.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut D> {
        self.value.as_mut()
    }

    /// Mutable access to the value, assigning a default one to an empty element first.
    pub fn value_mut(&mut self) -> &mut D {
        self.value.get_or_insert_with(D::default)
    }

    pub fn set(&mut self, value: D) {
        self.value = Some(value);
    }

    /// Dispatch the value to `visitor`; `None` for an empty element.
    pub fn content<'a, V: ContentVisitor<'a>>(&'a self, visitor: &mut V) -> Option<V::Output> {
        self.value.as_ref().map(|value| value.accept_content(visitor))
    }

    /// Remove the value, leaving the element empty.
    pub fn take(&mut self) -> Option<D> {
        self.value.take()
    }

    pub fn clone_with(&self, flags: CloneFlags) -> Self {
        let mut meta = if flags.contains(CloneFlags::META) {
            self.meta.clone()
        } else {
            InfoElements::new()
        };
        if flags.contains(CloneFlags::NO_META_ID) {
            meta.erase("id");
        }

        Self {
            name: if flags.contains(CloneFlags::NAME) {
                self.name.clone()
            } else {
                None
            },
            meta,
            attributes: if flags.contains(CloneFlags::ATTRIBUTES) {
                self.attributes.clone()
            } else {
                InfoElements::new()
            },
            value: if flags.contains(CloneFlags::VALUE) {
                self.value.clone()
            } else {
                None
            },
        }
    }
}

impl<D: Dsd> PartialEq for TypedElement<D> {
    fn eq(&self, other: &Self) -> bool {
        self.is_empty() == other.is_empty()
            && self.attributes == other.attributes
            && self.meta == other.meta
            && self.value == other.value
    }
}

impl<D: Dsd> From<TypedElement<D>> for Element {
    fn from(element: TypedElement<D>) -> Self {
        D::wrap(element)
    }
}

/// A node of the element tree
#[derive(Debug, Clone)]
pub enum Element {
    Null(NullElement),
    Boolean(BooleanElement),
    Number(NumberElement),
    String(StringElement),
    Ref(RefElement),
    Holder(HolderElement),
    Member(MemberElement),
    Array(ArrayElement),
    Object(ObjectElement),
    Enum(EnumElement),
    Option(OptionElement),
    Select(SelectElement),
    Extend(ExtendElement),
}

/// Evaluate `$body` with `$e` bound to the typed element of any variant.
macro_rules! with_typed {
    ($element:expr, $e:ident => $body:expr) => {
        match $element {
            Element::Null($e) => $body,
            Element::Boolean($e) => $body,
            Element::Number($e) => $body,
            Element::String($e) => $body,
            Element::Ref($e) => $body,
            Element::Holder($e) => $body,
            Element::Member($e) => $body,
            Element::Array($e) => $body,
            Element::Object($e) => $body,
            Element::Enum($e) => $body,
            Element::Option($e) => $body,
            Element::Select($e) => $body,
            Element::Extend($e) => $body,
        }
    };
}

impl Default for Element {
    fn default() -> Self {
        Element::Null(NullElement::empty())
    }
}

impl Element {
    /// Empty element of `kind`
    pub fn empty(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Null => NullElement::empty().into(),
            ElementKind::Boolean => BooleanElement::empty().into(),
            ElementKind::Number => NumberElement::empty().into(),
            ElementKind::String => StringElement::empty().into(),
            ElementKind::Ref => RefElement::empty().into(),
            ElementKind::Holder => HolderElement::empty().into(),
            ElementKind::Member => MemberElement::empty().into(),
            ElementKind::Array => ArrayElement::empty().into(),
            ElementKind::Object => ObjectElement::empty().into(),
            ElementKind::Enum => EnumElement::empty().into(),
            ElementKind::Option => OptionElement::empty().into(),
            ElementKind::Select => SelectElement::empty().into(),
            ElementKind::Extend => ExtendElement::empty().into(),
        }
    }

    pub fn null() -> Self {
        NullElement::new(Null).into()
    }

    pub fn boolean(value: bool) -> Self {
        BooleanElement::new(Boolean(value)).into()
    }

    pub fn number(value: impl Into<Number>) -> Self {
        NumberElement::new(value.into()).into()
    }

    pub fn string(value: impl Into<String>) -> Self {
        StringElement::new(Str::new(value)).into()
    }

    pub fn reference(symbol: impl Into<String>) -> Self {
        RefElement::new(Ref::new(symbol)).into()
    }

    pub fn holder(data: impl Into<Element>) -> Self {
        HolderElement::new(Holder::new(data)).into()
    }

    pub fn member(name: impl Into<String>, value: impl Into<Element>) -> Self {
        MemberElement::new(Member::named(name, value)).into()
    }

    pub fn array(items: impl IntoIterator<Item = Element>) -> Self {
        ArrayElement::new(items.into_iter().collect()).into()
    }

    pub fn object(items: impl IntoIterator<Item = Element>) -> Self {
        ObjectElement::new(items.into_iter().collect()).into()
    }

    pub fn enumeration(value: impl Into<Element>) -> Self {
        EnumElement::new(Enum::new(value)).into()
    }

    pub fn option(items: impl IntoIterator<Item = Element>) -> Self {
        OptionElement::new(items.into_iter().collect()).into()
    }

    pub fn select(options: impl IntoIterator<Item = OptionElement>) -> Self {
        SelectElement::new(options.into_iter().collect()).into()
    }

    pub fn extend(items: impl IntoIterator<Item = Element>) -> Self {
        ExtendElement::new(items.into_iter().collect()).into()
    }

    pub fn kind(&self) -> ElementKind {
        with_typed!(self, e => e.kind())
    }

    pub fn element(&self) -> &str {
        with_typed!(self, e => e.element())
    }

    pub fn set_element(&mut self, name: impl Into<String>) {
        let name = name.into();
        with_typed!(self, e => e.set_element(name))
    }

    /// Builder form of [`set_element`](Self::set_element)
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.set_element(name);
        self
    }

    pub fn meta(&self) -> &InfoElements {
        with_typed!(self, e => e.meta())
    }

    pub fn meta_mut(&mut self) -> &mut InfoElements {
        with_typed!(self, e => e.meta_mut())
    }

    pub fn attributes(&self) -> &InfoElements {
        with_typed!(self, e => e.attributes())
    }

    pub fn attributes_mut(&mut self) -> &mut InfoElements {
        with_typed!(self, e => e.attributes_mut())
    }

    pub fn is_empty(&self) -> bool {
        with_typed!(self, e => e.is_empty())
    }

    pub fn clone_with(&self, flags: CloneFlags) -> Self {
        with_typed!(self, e => e.clone_with(flags).into())
    }

    pub fn downcast_ref<D: Dsd>(&self) -> Option<&TypedElement<D>> {
        D::downcast_ref(self)
    }

    pub fn downcast_mut<D: Dsd>(&mut self) -> Option<&mut TypedElement<D>> {
        D::downcast_mut(self)
    }

    pub fn downcast<D: Dsd>(self) -> Result<TypedElement<D>, Element> {
        D::downcast(self)
    }

    /// Value of a non-empty String element
    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<Str>()
            .and_then(TypedElement::get)
            .map(Str::as_str)
    }

    /// Dispatch to the visitor method of this element's kind.
    pub fn accept<'a, V: ElementVisitor<'a>>(&'a self, visitor: &mut V) -> V::Output {
        match self {
            Element::Null(e) => visitor.visit_null(e),
            Element::Boolean(e) => visitor.visit_boolean(e),
            Element::Number(e) => visitor.visit_number(e),
            Element::String(e) => visitor.visit_string(e),
            Element::Ref(e) => visitor.visit_ref(e),
            Element::Holder(e) => visitor.visit_holder(e),
            Element::Member(e) => visitor.visit_member(e),
            Element::Array(e) => visitor.visit_array(e),
            Element::Object(e) => visitor.visit_object(e),
            Element::Enum(e) => visitor.visit_enum(e),
            Element::Option(e) => visitor.visit_option(e),
            Element::Select(e) => visitor.visit_select(e),
            Element::Extend(e) => visitor.visit_extend(e),
        }
    }

    pub fn accept_mut<V: ElementVisitorMut>(&mut self, visitor: &mut V) -> V::Output {
        match self {
            Element::Null(e) => visitor.visit_null(e),
            Element::Boolean(e) => visitor.visit_boolean(e),
            Element::Number(e) => visitor.visit_number(e),
            Element::String(e) => visitor.visit_string(e),
            Element::Ref(e) => visitor.visit_ref(e),
            Element::Holder(e) => visitor.visit_holder(e),
            Element::Member(e) => visitor.visit_member(e),
            Element::Array(e) => visitor.visit_array(e),
            Element::Object(e) => visitor.visit_object(e),
            Element::Enum(e) => visitor.visit_enum(e),
            Element::Option(e) => visitor.visit_option(e),
            Element::Select(e) => visitor.visit_select(e),
            Element::Extend(e) => visitor.visit_extend(e),
        }
    }

    /// Call a kind-generic function with the typed element.
    pub fn apply<'a, F: ElementFn<'a>>(&'a self, function: F) -> F::Output {
        self.accept(&mut Adapter::new(function))
    }

    /// Dispatch the payload to `visitor`; `None` for an empty element.
    pub fn content<'a, V: ContentVisitor<'a>>(&'a self, visitor: &mut V) -> Option<V::Output> {
        with_typed!(self, e => e.content(visitor))
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Element::Null(a), Element::Null(b)) => a == b,
            (Element::Boolean(a), Element::Boolean(b)) => a == b,
            (Element::Number(a), Element::Number(b)) => a == b,
            (Element::String(a), Element::String(b)) => a == b,
            (Element::Ref(a), Element::Ref(b)) => a == b,
            (Element::Holder(a), Element::Holder(b)) => a == b,
            (Element::Member(a), Element::Member(b)) => a == b,
            (Element::Array(a), Element::Array(b)) => a == b,
            (Element::Object(a), Element::Object(b)) => a == b,
            (Element::Enum(a), Element::Enum(b)) => a == b,
            (Element::Option(a), Element::Option(b)) => a == b,
            (Element::Select(a), Element::Select(b)) => a == b,
            (Element::Extend(a), Element::Extend(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refract::dsd::Sequence;

    fn sample() -> Element {
        let mut object = ObjectElement::new(Object::new()).named("User");
        object.meta_mut().set("id", Element::string("User"));
        object.meta_mut().set("title", Element::string("A user"));
        object.attributes_mut().set("typeAttributes", Element::array([Element::string("fixed")]));
        object.value_mut().add_member("name", Element::string("Ann"));
        object.value_mut().add_member("tags", Element::array([Element::string("a")]));
        object.into()
    }

    #[test]
    fn element_name_defaults_to_dsd_name() {
        assert_eq!(Element::string("x").element(), "string");
        assert_eq!(Element::holder(Element::null()).element(), "");
        assert_eq!(Element::string("x").named("custom").element(), "custom");
        assert_eq!(Element::string("x").named("").element(), "string");
    }

    #[test]
    fn every_kind_has_an_empty_form() {
        for kind in ElementKind::ALL {
            let element = Element::empty(kind);
            assert_eq!(element.kind(), kind);
            assert!(element.is_empty());
            assert_eq!(element.element(), kind.dsd_name());
        }
    }

    #[test]
    fn emptiness_differs_from_zero_children() {
        assert!(!Element::array([]).is_empty());
        assert!(Element::empty(ElementKind::Array).is_empty());
        assert_ne!(Element::array([]), Element::empty(ElementKind::Array));
    }

    #[test]
    fn equality_requires_same_kind() {
        assert_ne!(Element::string("1"), Element::number("1"));
        assert_ne!(Element::array([]), Element::object([]));
    }

    #[test]
    fn equality_ignores_name() {
        assert_eq!(Element::string("x").named("a"), Element::string("x").named("b"));
    }

    #[test]
    fn equality_compares_meta_and_attributes() {
        let mut tagged = Element::string("x");
        tagged.meta_mut().set("id", Element::string("X"));
        assert_ne!(tagged, Element::string("x"));

        let mut attributed = Element::string("x");
        attributed.attributes_mut().set("default", Element::string("y"));
        assert_ne!(attributed, Element::string("x"));
    }

    #[test]
    fn equality_is_symmetric_for_separately_built_trees() {
        let a = sample();
        let b = sample();
        assert_eq!(a, b);
        assert_eq!(b, a);

        let mut tagged = sample();
        tagged.attributes_mut().set("default", Element::string("x"));
        assert_ne!(tagged, a);
        assert_ne!(a, tagged);

        let mut emptied = sample();
        if let Some(object) = emptied.downcast_mut::<Object>() {
            object.take();
        }
        assert_ne!(emptied, a);
        assert_ne!(a, emptied);
    }

    #[test]
    fn clone_all_is_deep_and_independent() {
        let original = sample();
        let mut copy = original.clone_with(CloneFlags::ALL);
        assert_eq!(copy, original);
        assert_eq!(original, copy);
        assert_eq!(copy.element(), "User");

        if let Some(object) = copy.downcast_mut::<Object>() {
            object.value_mut().add_member("name", Element::string("Bob"));
        }
        assert_ne!(copy, original);
        assert_ne!(original, copy);
        let name = original
            .downcast_ref::<Object>()
            .and_then(TypedElement::get)
            .and_then(|object| object.find_value("name"));
        assert_eq!(name, Some(&Element::string("Ann")));
    }

    #[test]
    fn clone_flags_select_parts() {
        let original = sample();

        let value_only = original.clone_with(CloneFlags::VALUE);
        assert!(value_only.meta().is_empty());
        assert!(value_only.attributes().is_empty());
        assert_eq!(value_only.element(), "object");
        assert!(!value_only.is_empty());

        let no_value = original.clone_with(CloneFlags::ALL ^ CloneFlags::VALUE);
        assert!(no_value.is_empty());
        assert_eq!(no_value.meta().len(), 2);

        let no_id = original.clone_with(CloneFlags::ALL | CloneFlags::NO_META_ID);
        assert!(no_id.meta().get("id").is_none());
        assert!(no_id.meta().get("title").is_some());
    }

    #[test]
    fn clone_flag_bits() {
        assert_eq!(CloneFlags::META.bits(), 0x01);
        assert_eq!(CloneFlags::ATTRIBUTES.bits(), 0x02);
        assert_eq!(CloneFlags::VALUE.bits(), 0x04);
        assert_eq!(CloneFlags::NAME.bits(), 0x08);
        assert_eq!(CloneFlags::NO_META_ID.bits(), 0x10);
        assert_eq!(
            CloneFlags::META | CloneFlags::ATTRIBUTES | CloneFlags::VALUE | CloneFlags::NAME,
            CloneFlags::ALL
        );
        assert!(CloneFlags::ALL.contains(CloneFlags::NAME));
        assert!(!CloneFlags::ALL.contains(CloneFlags::NO_META_ID));
        assert_eq!(CloneFlags::from_bits(0x20), None);
        assert_eq!(
            CloneFlags::from_bits_truncate(0xFF),
            CloneFlags::ALL | CloneFlags::NO_META_ID
        );
        assert_eq!(CloneFlags::all(), CloneFlags::from_bits_truncate(0x1F));
    }

    #[test]
    fn take_leaves_element_empty() {
        let mut element = ArrayElement::new(vec![Element::number(1)].into());
        let value = element.take().expect("value present");
        assert_eq!(value.len(), 1);
        assert!(element.is_empty());
    }

    #[test]
    fn downcast_by_kind() {
        let element = Element::reference("Base");
        assert!(element.downcast_ref::<Str>().is_none());
        let reference = element.downcast::<Ref>().expect("ref element");
        assert_eq!(reference.get().map(Ref::symbol), Some("Base"));
    }
}
