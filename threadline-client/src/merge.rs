use std::collections::HashSet;

use crate::Record;

/// Records accumulated across pages, unique by id, in first-seen order
#[derive(Clone, Debug)]
pub struct Collection<R: Record> {
    records: Vec<R>,
    ids: HashSet<R::Id>,

    /// Bumped every time the contents change
    version: u64,
}

impl<R: Record> Collection<R> {
    pub fn new() -> Collection<R> {
        Collection {
            records: Vec::new(),
            ids: HashSet::new(),
            version: 0,
        }
    }

    /// Builds a collection from `records`, dropping any repeated id
    pub fn from_records(records: impl IntoIterator<Item = R>) -> Collection<R> {
        let mut res = Collection::new();
        res.merge(records, false);
        res
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, id: &R::Id) -> bool {
        self.ids.contains(id)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn into_vec(self) -> Vec<R> {
        self.records
    }

    /// Appends the records of `incoming` not seen yet, in arrival order, and
    /// returns how many there were. A refresh first discards everything.
    pub fn merge(&mut self, incoming: impl IntoIterator<Item = R>, is_refresh: bool) -> usize {
        let mut changed = false;
        if is_refresh {
            changed = !self.records.is_empty();
            self.records.clear();
            self.ids.clear();
        }
        let mut new_unique = 0;
        for r in incoming {
            if self.ids.insert(r.id()) {
                self.records.push(r);
                new_unique += 1;
            }
        }
        if changed || new_unique > 0 {
            self.version += 1;
        }
        new_unique
    }

    pub fn clear(&mut self) {
        if !self.records.is_empty() {
            self.records.clear();
            self.ids.clear();
            self.version += 1;
        }
    }
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Collection<R> {
        Collection::new()
    }
}

impl<R: Record + PartialEq> PartialEq for Collection<R> {
    fn eq(&self, other: &Collection<R>) -> bool {
        self.records == other.records
    }
}

impl<'a, R: Record> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Pure form of [`Collection::merge`]: returns the merged collection along
/// with the number of records `incoming` contributed
pub fn merge<R: Record + Clone>(
    existing: &Collection<R>,
    incoming: Vec<R>,
    is_refresh: bool,
) -> (Collection<R>, usize) {
    let mut merged = existing.clone();
    let new_unique = merged.merge(incoming, is_refresh);
    (merged, new_unique)
}
