use std::collections::HashSet;
use std::hash::Hash;

/// Insertion-ordered set: the first occurrence of each value wins.
#[derive(Debug, Clone)]
pub struct Distinct<T> {
    seen: HashSet<T>,
    ordered: Vec<T>,
}

impl<T: Clone + Eq + Hash> Distinct<T> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
            ordered: Vec::new(),
        }
    }

    /// Returns `true` if the value was not seen before.
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.contains(&value) {
            return false;
        }
        self.seen.insert(value.clone());
        self.ordered.push(value);
        true
    }

    pub fn into_vec(self) -> Vec<T> {
        self.ordered
    }
}

impl<T: Clone + Eq + Hash> Default for Distinct<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> Extend<T> for Distinct<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Clone + Eq + Hash> FromIterator<T> for Distinct<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
