//! Replacement instructions
//!
//! An [`Instruction`] tells the replacer what text goes where each marker sits.
//! Exactly one instruction is applied per fragment.

use crate::error::Result;
use std::fmt::{self, Display};

/// What to substitute into a fragment
///
/// `T` is the collection item type and only matters for
/// [`Instruction::CollectionMap`].
pub enum Instruction<'f, T = ()> {
    /// One partial, rendered and substituted for its own marker
    Single(String),

    /// Several partials, in order, each rendered and substituted for its marker
    List(Vec<String>),

    /// Already computed text per placeholder name
    Map(Replacements),

    /// Per-item text computed from each element of a collection
    CollectionMap(CollectionMap<'f, T>),
}

impl<T> Instruction<'_, T> {
    /// Short name of the variant, used in logs and error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Instruction::Single(_) => "single",
            Instruction::List(_) => "list",
            Instruction::Map(_) => "map",
            Instruction::CollectionMap(_) => "collection_map",
        }
    }
}

impl<T> fmt::Debug for Instruction<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Single(name) => f.debug_tuple("Single").field(name).finish(),
            Instruction::List(names) => f.debug_tuple("List").field(names).finish(),
            Instruction::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Instruction::CollectionMap(map) => f.debug_tuple("CollectionMap").field(map).finish(),
        }
    }
}

impl<T> From<&str> for Instruction<'_, T> {
    fn from(name: &str) -> Self {
        Instruction::Single(name.to_string())
    }
}

impl<T> From<String> for Instruction<'_, T> {
    fn from(name: String) -> Self {
        Instruction::Single(name)
    }
}

impl<T> From<Vec<String>> for Instruction<'_, T> {
    fn from(names: Vec<String>) -> Self {
        Instruction::List(names)
    }
}

impl<T> From<Vec<&str>> for Instruction<'_, T> {
    fn from(names: Vec<&str>) -> Self {
        Instruction::List(names.into_iter().map(str::to_string).collect())
    }
}

impl<T> From<Replacements> for Instruction<'_, T> {
    fn from(map: Replacements) -> Self {
        Instruction::Map(map)
    }
}

impl<'f, T> From<CollectionMap<'f, T>> for Instruction<'f, T> {
    fn from(map: CollectionMap<'f, T>) -> Self {
        Instruction::CollectionMap(map)
    }
}

/// Ordered placeholder name → replacement text
///
/// Values are converted to text once, when inserted. Inserting a name twice
/// keeps its original position and overwrites the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, String)>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text for a placeholder name
    pub fn insert(&mut self, name: impl Display, value: impl Display) {
        let name = name.to_string();
        let value = value.to_string();

        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder form of [`Replacements::insert`]
    pub fn with(mut self, name: impl Display, value: impl Display) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Display, V: Display> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Replacements::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

type ItemFn<'f, T> = Box<dyn Fn(&T) -> Result<String> + 'f>;

/// Ordered placeholder name → function of a collection item
///
/// Each function is called once per item. Inserting a name twice keeps its
/// original position and overwrites the function.
pub struct CollectionMap<'f, T> {
    entries: Vec<(String, ItemFn<'f, T>)>,
}

impl<'f, T> CollectionMap<'f, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set an infallible per-item function for a placeholder name
    pub fn insert<F, S>(&mut self, name: impl Display, f: F)
    where
        F: Fn(&T) -> S + 'f,
        S: Display,
    {
        self.try_insert(name, move |item| Ok(f(item).to_string()));
    }

    /// Set a fallible per-item function for a placeholder name
    ///
    /// An error aborts the whole collection expansion.
    pub fn try_insert<F>(&mut self, name: impl Display, f: F)
    where
        F: Fn(&T) -> Result<String> + 'f,
    {
        let name = name.to_string();
        let f: ItemFn<'f, T> = Box::new(f);

        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = f,
            None => self.entries.push((name, f)),
        }
    }

    /// Builder form of [`CollectionMap::insert`]
    pub fn with<F, S>(mut self, name: impl Display, f: F) -> Self
    where
        F: Fn(&T) -> S + 'f,
        S: Display,
    {
        self.insert(name, f);
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Compute every replacement for one item
    pub(crate) fn resolve(&self, item: &T) -> Result<Replacements> {
        let mut resolved = Replacements::new();
        for (key, f) in &self.entries {
            resolved.insert(key, f(item)?);
        }
        Ok(resolved)
    }
}

impl<T> Default for CollectionMap<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CollectionMap<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionMap")
            .field("keys", &self.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheReplaceError;

    #[test]
    fn test_replacements_keep_insertion_order() {
        let map = Replacements::new().with("b", 2).with("a", 1);
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_replacements_last_write_wins() {
        let map = Replacements::new().with("a", 1).with("b", 2).with("a", 3);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some("3"));
        assert_eq!(map.iter().next(), Some(("a", "3")));
    }

    #[test]
    fn test_replacements_from_iter_stringifies() {
        let map: Replacements = vec![("count", 42)].into_iter().collect();
        assert_eq!(map.get("count"), Some("42"));
    }

    #[test]
    fn test_collection_map_last_write_wins() {
        let map = CollectionMap::new()
            .with("k", |i: &i32| i + 1)
            .with("k", |i: &i32| i * 10);
        assert_eq!(map.len(), 1);
        let resolved = map.resolve(&2).unwrap();
        assert_eq!(resolved.get("k"), Some("20"));
    }

    #[test]
    fn test_collection_map_try_insert_propagates() {
        let mut map = CollectionMap::new();
        map.try_insert("k", |i: &i32| {
            Err(CacheReplaceError::ItemReplace {
                key: "k".to_string(),
                index: *i as usize,
                reason: "boom".to_string(),
            })
        });
        assert!(matches!(
            map.resolve(&0),
            Err(CacheReplaceError::ItemReplace { .. })
        ));
    }

    #[test]
    fn test_instruction_conversions() {
        let single: Instruction = "inner".into();
        assert_eq!(single.kind(), "single");

        let list: Instruction = vec!["a", "b"].into();
        match list {
            Instruction::List(names) => assert_eq!(names, vec!["a", "b"]),
            other => panic!("Expected List, got {:?}", other),
        }

        let map: Instruction = Replacements::new().with("a", "x").into();
        assert_eq!(map.kind(), "map");
    }
}
