//! Resolved flags - the append-only record of solved puzzles and steps.
//!
//! A flag gates visibility and interactivity of other objects once present.
//! Flags are only ever added during play; the whole set is cleared by reset.

use serde::{Deserialize, Serialize};

use crate::Flag;

/// Insertion-ordered set of resolved flags.
///
/// Persisted as a plain JSON array, in the order the flags were resolved.
/// Loading drops repeated entries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Flag>", into = "Vec<Flag>")]
pub struct ResolvedFlags(Vec<Flag>);

impl ResolvedFlags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a flag. Returns `false` if it was already present.
    pub fn insert(&mut self, flag: Flag) -> bool {
        if self.contains(&flag) {
            return false;
        }
        self.0.push(flag);
        true
    }

    pub fn contains(&self, flag: &Flag) -> bool {
        self.0.iter().any(|f| f == flag)
    }

    /// OR semantics over `flags`.
    pub fn any_of(&self, flags: &[Flag]) -> bool {
        flags.iter().any(|f| self.contains(f))
    }

    /// AND semantics over `flags`. Vacuously true for an empty list.
    pub fn all_of(&self, flags: &[Flag]) -> bool {
        flags.iter().all(|f| self.contains(f))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.0.iter()
    }
}

impl FromIterator<Flag> for ResolvedFlags {
    fn from_iter<T: IntoIterator<Item = Flag>>(iter: T) -> Self {
        let mut flags = Self::new();
        for flag in iter {
            flags.insert(flag);
        }
        flags
    }
}

impl From<Vec<Flag>> for ResolvedFlags {
    fn from(flags: Vec<Flag>) -> Self {
        flags.into_iter().collect()
    }
}

impl From<ResolvedFlags> for Vec<Flag> {
    fn from(flags: ResolvedFlags) -> Self {
        flags.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent_and_keeps_order() {
        let mut flags = ResolvedFlags::new();
        assert!(flags.insert(Flag::from("b")));
        assert!(flags.insert(Flag::from("a")));
        assert!(!flags.insert(Flag::from("b")));

        let order: Vec<&str> = flags.iter().map(Flag::as_str).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn any_and_all_semantics() {
        let flags: ResolvedFlags = [Flag::from("a")].into_iter().collect();
        let pair = [Flag::from("a"), Flag::from("b")];

        assert!(flags.any_of(&pair));
        assert!(!flags.all_of(&pair));
        assert!(flags.all_of(&[]));
        assert!(!flags.any_of(&[]));
    }

    #[test]
    fn serializes_as_plain_array() {
        let flags: ResolvedFlags = [Flag::from("door"), Flag::from("slot1")]
            .into_iter()
            .collect();
        assert_eq!(serde_json::to_string(&flags).unwrap(), r#"["door","slot1"]"#);
    }

    #[test]
    fn loading_drops_repeated_flags() {
        let flags: ResolvedFlags =
            serde_json::from_str(r#"["door","slot1","door"]"#).unwrap();

        assert_eq!(flags.len(), 2);
        let order: Vec<&str> = flags.iter().map(Flag::as_str).collect();
        assert_eq!(order, vec!["door", "slot1"]);
    }
}
