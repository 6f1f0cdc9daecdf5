//! Fragment replacer
//!
//! A [`Fragment`] owns the text of one rendered partial and applies exactly one
//! replacement strategy to it:
//!
//! - **List** (and **Single**): render the partial named by each placeholder
//!   and splice it in
//! - **Map**: splice in precomputed text per placeholder
//! - **CollectionMap**: expand the fragment once per collection item and
//!   concatenate the results
//!
//! All substitution is literal and global, see [`literal`].

mod collection;
mod literal;

use crate::error::{CacheReplaceError, Result};
use crate::instruction::{CollectionMap, Instruction, Replacements};
use crate::marker::marker;
use crate::render::{Locals, PartialRenderer, TrustedHtml};
use std::fmt::{self, Display};

/// Check that an instruction and the presence of a collection agree
pub(crate) fn check_pairing<T>(
    instruction: &Instruction<'_, T>,
    has_collection: bool,
) -> Result<()> {
    match (instruction, has_collection) {
        (Instruction::CollectionMap(_), true) => Ok(()),
        (Instruction::CollectionMap(_), false) => Err(CacheReplaceError::invalid_combination(
            "a collection map instruction requires a collection",
        )),
        (other, true) => Err(CacheReplaceError::invalid_combination(format!(
            "a collection requires a collection map instruction, got {}",
            other.kind()
        ))),
        (_, false) => Ok(()),
    }
}

/// Rendered partial text being substituted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    value: String,
}

impl Fragment {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }

    /// Consume the fragment as output that must not be escaped again
    pub fn into_trusted(self) -> TrustedHtml {
        TrustedHtml::new(self.value)
    }

    /// Replace every marker for `name` with `value`
    ///
    /// Returns the number of markers replaced.
    pub fn substitute(&mut self, name: impl Display, value: &str) -> usize {
        let needle = marker(&name);
        let count = literal::replace_all(&mut self.value, &needle, value);
        tracing::trace!(marker = %needle, count, "substituted marker");
        count
    }

    /// Apply any instruction
    ///
    /// `collection` must be given exactly when the instruction is a
    /// [`Instruction::CollectionMap`].
    pub fn replace<R, T>(
        &mut self,
        renderer: &R,
        locals: &Locals,
        instruction: Instruction<'_, T>,
        collection: Option<&[T]>,
    ) -> Result<&mut Self>
    where
        R: PartialRenderer + ?Sized,
    {
        check_pairing(&instruction, collection.is_some())?;
        tracing::debug!(strategy = instruction.kind(), "replacing fragment");

        match (instruction, collection) {
            (Instruction::Single(name), _) => self.replace_list(renderer, &[name], locals),
            (Instruction::List(names), _) => self.replace_list(renderer, &names, locals),
            (Instruction::Map(map), _) => Ok(self.replace_map(&map)),
            (Instruction::CollectionMap(map), Some(items)) => self.replace_collection(items, &map),
            (Instruction::CollectionMap(_), None) => unreachable!("pairing checked above"),
        }
    }

    /// Render each named partial and substitute it for its marker
    ///
    /// Every partial is rendered before the buffer is touched, so a render
    /// error leaves the fragment unchanged. Renderings are then substituted in
    /// list order, one pass per entry, so a repeated name gets its own pass.
    pub fn replace_list<R>(
        &mut self,
        renderer: &R,
        names: &[String],
        locals: &Locals,
    ) -> Result<&mut Self>
    where
        R: PartialRenderer + ?Sized,
    {
        let mut rendered = Vec::with_capacity(names.len());
        for name in names {
            tracing::debug!(partial = %name, "rendering replacement partial");
            rendered.push((name, renderer.render(name, locals)?));
        }

        for (name, value) in &rendered {
            self.substitute(name, value);
        }
        Ok(self)
    }

    /// Substitute precomputed text, in insertion order
    pub fn replace_map(&mut self, map: &Replacements) -> &mut Self {
        for (name, value) in map.iter() {
            self.substitute(name, value);
        }
        self
    }

    /// Expand the fragment once per item and concatenate the results
    ///
    /// Each item starts from the original text. An empty collection yields an
    /// empty fragment. On error the fragment is left unchanged.
    pub fn replace_collection<T>(
        &mut self,
        items: &[T],
        map: &CollectionMap<'_, T>,
    ) -> Result<&mut Self> {
        self.value = collection::expand(&self.value, items, map)?;
        Ok(self)
    }
}

impl Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<String> for Fragment {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Fragment {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests;
