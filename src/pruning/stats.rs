//! Statistics tracking for pruning runs.
//!
//! Provides [`PruneStats`] to track what was removed or stubbed while pruning an assembly,
//! useful for reporting and debugging.

use std::fmt;

use serde::Serialize;

/// Statistics from pruning one assembly.
///
/// Tracks the number of symbols removed in each category, plus the method bodies replaced
/// by stubs and the override records stripped by interface cascades.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneStats {
    /// Number of types removed, nested types included.
    pub types_removed: usize,
    /// Number of methods removed.
    pub methods_removed: usize,
    /// Number of fields removed.
    pub fields_removed: usize,
    /// Number of properties removed.
    pub properties_removed: usize,
    /// Number of events removed.
    pub events_removed: usize,
    /// Number of interface implementations removed.
    pub interfaces_removed: usize,
    /// Number of override records stripped.
    pub overrides_stripped: usize,
    /// Number of method bodies replaced by the reference stub.
    pub bodies_stubbed: usize,
}

impl PruneStats {
    /// Creates a new empty stats instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of symbols removed.
    ///
    /// Stripped override records and stubbed bodies are modifications, not removals.
    #[must_use]
    pub fn total_removed(&self) -> usize {
        self.types_removed
            + self.methods_removed
            + self.fields_removed
            + self.properties_removed
            + self.events_removed
            + self.interfaces_removed
    }

    /// Returns true if the run changed anything.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        self.total_removed() > 0 || self.overrides_stripped > 0 || self.bodies_stubbed > 0
    }

    /// Merges stats from another run into this one.
    pub fn merge(&mut self, other: &PruneStats) {
        self.types_removed += other.types_removed;
        self.methods_removed += other.methods_removed;
        self.fields_removed += other.fields_removed;
        self.properties_removed += other.properties_removed;
        self.events_removed += other.events_removed;
        self.interfaces_removed += other.interfaces_removed;
        self.overrides_stripped += other.overrides_stripped;
        self.bodies_stubbed += other.bodies_stubbed;
    }
}

impl fmt::Display for PruneStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_changes() {
            return write!(f, "No changes");
        }

        let counters = [
            (self.types_removed, "types"),
            (self.methods_removed, "methods"),
            (self.fields_removed, "fields"),
            (self.properties_removed, "properties"),
            (self.events_removed, "events"),
            (self.interfaces_removed, "interfaces"),
        ];
        let mut parts: Vec<String> = counters
            .iter()
            .filter(|(count, _)| *count > 0)
            .map(|(count, label)| format!("{count} {label}"))
            .collect();

        let mut text = String::new();
        if !parts.is_empty() {
            text = format!("Removed: {}", parts.join(", "));
        }

        parts.clear();
        if self.bodies_stubbed > 0 {
            parts.push(format!("{} bodies stubbed", self.bodies_stubbed));
        }
        if self.overrides_stripped > 0 {
            parts.push(format!("{} overrides stripped", self.overrides_stripped));
        }
        if !parts.is_empty() {
            if !text.is_empty() {
                text.push_str("; ");
            }
            text.push_str(&parts.join(", "));
        }

        f.write_str(&text)
    }
}
