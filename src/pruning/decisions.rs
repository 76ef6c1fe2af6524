//! Explicit name lists turned into removal decisions.
//!
//! A policy level applies its [`Mode`] to a list of names:
//!
//! | Mode | Listed names | Unlisted names |
//! |------|--------------|----------------|
//! | `Remove` | [`Removal::Forced`] | untouched |
//! | `Keep` | untouched | [`Removal::Soft`] |
//! | `None` | untouched | untouched |
//!
//! Soft removals yield to protective rules (the attribute-type exception for top-level
//! types, `InterfaceMethodsToKeep` for methods); forced removals do not.

use std::collections::{HashMap, HashSet};

use crate::{config::Mode, Result};

/// Strength of a list-based removal decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Removal {
    /// Not kept by a `Keep` list; protective rules may still retain the symbol
    Soft,
    /// Named by a `Remove` list or by an interface cascade; always removed
    Forced,
}

/// Removal decisions keyed by fully qualified symbol name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemovalSet {
    entries: HashMap<String, Removal>,
}

impl RemovalSet {
    /// An empty decision set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `mode` to `listed`.
    ///
    /// `all_names` is only consulted in [`Mode::Keep`] and yields every symbol name of the
    /// level. Names must already be fully qualified.
    pub fn resolve<L, A>(mode: Mode, listed: L, all_names: impl FnOnce() -> A) -> Self
    where
        L: IntoIterator<Item = String>,
        A: IntoIterator<Item = String>,
    {
        let entries = match mode {
            Mode::Remove => listed
                .into_iter()
                .map(|name| (name, Removal::Forced))
                .collect(),
            Mode::Keep => {
                let kept: HashSet<String> = listed.into_iter().collect();
                all_names()
                    .into_iter()
                    .filter(|name| !kept.contains(name))
                    .map(|name| (name, Removal::Soft))
                    .collect()
            }
            Mode::None => HashMap::new(),
        };
        RemovalSet { entries }
    }

    /// The decision for `name`, if any
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Removal> {
        self.entries.get(name).copied()
    }

    /// Returns `true` if any decision exists for `name`
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns `true` if `name` is force-removed
    #[must_use]
    pub fn is_forced(&self, name: &str) -> bool {
        self.get(name) == Some(Removal::Forced)
    }

    /// Whether the list removes `name`, given whether a protective rule covers it
    #[must_use]
    pub fn removes(&self, name: &str, protected: bool) -> bool {
        match self.get(name) {
            Some(Removal::Forced) => true,
            Some(Removal::Soft) => !protected,
            None => false,
        }
    }

    /// Force-remove `name`, upgrading a soft decision
    pub fn force(&mut self, name: impl Into<String>) {
        self.entries.insert(name.into(), Removal::Forced);
    }

    /// Number of decisions
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no decisions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Expand a member entry relative to its type into the fully qualified symbol name.
///
/// `System.Void Reset()` in `Contoso.Widget` becomes `System.Void Contoso.Widget::Reset()`.
/// The entry is split at its first space.
///
/// # Errors
/// Returns [`crate::Error::Malformed`] if the entry has no space or an empty half.
pub fn member_full_name(type_name: &str, entry: &str) -> Result<String> {
    match entry.split_once(' ') {
        Some((member_type, name)) if !member_type.is_empty() && !name.is_empty() => {
            Ok(format!("{member_type} {type_name}::{name}"))
        }
        _ => Err(malformed_error!(
            "Invalid member name '{}' in type {}",
            entry,
            type_name
        )),
    }
}

/// Expand every entry of `entries`, see [`member_full_name`]
///
/// # Errors
/// Returns the first [`crate::Error::Malformed`] entry error.
pub fn member_full_names(type_name: &str, entries: &[String]) -> Result<Vec<String>> {
    entries
        .iter()
        .map(|entry| member_full_name(type_name, entry))
        .collect()
}

/// Full name of the nested type `simple_name` inside `enclosing`
#[must_use]
pub fn nested_full_name(enclosing: &str, simple_name: &str) -> String {
    format!("{enclosing}/{simple_name}")
}
