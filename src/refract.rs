//! Refract element model
//!
//! A closed set of element kinds forming exclusively owned trees:
//!
//!     element      Element, TypedElement<D>, clone flags, factories
//!     info         ordered meta / attributes maps
//!     dsd          the per-kind payloads (DSDs)
//!     visitor      dispatch on element kind
//!     merge        collapsing Extend layers
//!     registry     named types and inheritance
//!     serialize    elements into structured values
//!
//! ```ignore
//! let mut object = Object::new();
//! object.add_member("name", Element::string("Ann"));
//! let element: Element = ObjectElement::new(object).into();
//! let yaml = so::yaml::to_string(&serialize::render_so(&element, false));
//! ```

pub mod dsd;
pub mod element;
pub mod info;
pub mod merge;
pub mod registry;
pub mod serialize;
pub mod visitor;

pub use element::{
    ArrayElement, BooleanElement, CloneFlags, Element, ElementKind, EnumElement, ExtendElement,
    HolderElement, MemberElement, NullElement, NumberElement, ObjectElement, OptionElement,
    RefElement, SelectElement, StringElement, TypedElement,
};
pub use info::InfoElements;
pub use registry::{Registry, RegistryError};
pub use visitor::{ContentVisitor, ElementFn, ElementVisitor, ElementVisitorMut};
