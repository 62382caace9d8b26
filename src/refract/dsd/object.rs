use super::{sequence_dsd, Member, Sequence};
use crate::refract::element::{Element, MemberElement};

/// Object properties
///
/// Children are usually members, but an object may also carry refs (mixins), selects
/// (one-of groups) and extends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    items: Vec<Element>,
}

sequence_dsd!(Object, Element);

impl Object {
    /// Append a member keyed `name`, dropping any member with the same key first.
    ///
    /// A redefined key therefore moves to the end of the object.
    pub fn add_member(&mut self, name: impl Into<String>, value: impl Into<Element>) {
        let name = name.into();
        if let Some(index) = self.position(&name) {
            self.erase(index..index + 1);
        }
        self.push_back(MemberElement::new(Member::named(name, value)).into());
    }

    /// Index of the member keyed `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items.iter().position(|child| member_key(child) == Some(name))
    }

    pub fn find(&self, name: &str) -> Option<&MemberElement> {
        self.position(name)
            .and_then(|index| self.items[index].downcast_ref::<Member>())
    }

    /// Value of the member keyed `name`
    pub fn find_value(&self, name: &str) -> Option<&Element> {
        self.find(name)
            .and_then(|member| member.get())
            .and_then(Member::value)
    }
}

fn member_key(child: &Element) -> Option<&str> {
    child
        .downcast_ref::<Member>()
        .and_then(|member| member.get())
        .and_then(Member::key_str)
}
