//! Ordered keyed children of an element (`meta` and `attributes`)

use super::element::Element;

/// Insertion-ordered map from key to an owned element
///
/// Keys are unique. Setting an existing key replaces its element in place, keeping the
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InfoElements {
    entries: Vec<(String, Element)>,
}

impl InfoElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, element: impl Into<Element>) {
        let key = key.into();
        let element = element.into();
        match self.position(&key) {
            Some(index) => self.entries[index].1 = element,
            None => self.entries.push((key, element)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Element> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Element> {
        let index = self.position(key)?;
        Some(&mut self.entries[index].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Remove `key`, returning its element.
    pub fn erase(&mut self, key: &str) -> Option<Element> {
        self.position(key).map(|index| self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Element)> {
        self.entries.iter().map(|(key, element)| (key.as_str(), element))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Element)> {
        self.entries
            .iter_mut()
            .map(|(key, element)| (key.as_str(), element))
    }

    /// Copy every entry of `other` whose key passes `keep` (last write wins).
    pub fn merge_from(&mut self, other: &InfoElements, keep: impl Fn(&str) -> bool) {
        for (key, element) in other.iter() {
            if keep(key) {
                self.set(key, element.clone());
            }
        }
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }
}

impl<K: Into<String>, E: Into<Element>> FromIterator<(K, E)> for InfoElements {
    fn from_iter<T: IntoIterator<Item = (K, E)>>(iter: T) -> Self {
        let mut info = InfoElements::new();
        for (key, element) in iter {
            info.set(key, element);
        }
        info
    }
}

impl<'a> IntoIterator for &'a InfoElements {
    type Item = &'a (String, Element);
    type IntoIter = std::slice::Iter<'a, (String, Element)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_in_place() {
        let mut info = InfoElements::new();
        info.set("a", Element::string("1"));
        info.set("b", Element::string("2"));
        info.set("a", Element::string("3"));

        let keys: Vec<&str> = info.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(info.get("a"), Some(&Element::string("3")));
    }

    #[test]
    fn erase_removes_the_entry() {
        let mut info: InfoElements = [("id", Element::string("x")), ("title", Element::string("y"))]
            .into_iter()
            .collect();

        assert_eq!(info.erase("title"), Some(Element::string("y")));
        assert_eq!(info.erase("title"), None);
        assert!(!info.contains_key("title"));
        assert_eq!(info.len(), 1);
        assert_eq!(info.erase("missing"), None);
    }

    #[test]
    fn equality_is_ordered() {
        let ab: InfoElements = [("a", Element::boolean(true)), ("b", Element::boolean(false))]
            .into_iter()
            .collect();
        let ba: InfoElements = [("b", Element::boolean(false)), ("a", Element::boolean(true))]
            .into_iter()
            .collect();
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn merge_from_skips_filtered_keys() {
        let mut target: InfoElements = [("id", Element::string("base"))].into_iter().collect();
        let source: InfoElements = [
            ("id", Element::string("derived")),
            ("title", Element::string("t")),
        ]
        .into_iter()
        .collect();

        target.merge_from(&source, |key| key != "id");
        assert_eq!(target.get("id"), Some(&Element::string("base")));
        assert_eq!(target.get("title"), Some(&Element::string("t")));
    }
}
