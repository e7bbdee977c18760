use std::collections::HashMap;

use asapcat_toolkit::Error;

use crate::bank::{WordBank, WordHandle};

/// Value stored in the global aggregate: a document frequency plus the id
/// assigned by a dedicated [`crate::assign_ids`] pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AppearCount {
    pub doc_frequency: u32,
    pub id: u32,
}

impl AppearCount {
    pub const UNASSIGNED: u32 = u32::MAX;

    pub fn new() -> Self {
        Self {
            doc_frequency: 0,
            id: Self::UNASSIGNED,
        }
    }
}

impl Default for AppearCount {
    fn default() -> Self {
        Self::new()
    }
}

/// Values that can be merged commutatively by [`WordMap::reduce`] /
/// [`WordList::reduce`].
pub trait Reducible {
    fn combine(&mut self, other: &Self);
}

impl Reducible for usize {
    fn combine(&mut self, other: &Self) {
        *self += *other;
    }
}

impl Reducible for AppearCount {
    fn combine(&mut self, other: &Self) {
        self.doc_frequency += other.doc_frequency;
    }
}

/// Values that support the presence-count merge ([`WordMap::count_presence`]):
/// bumped by exactly one per distinct key seen in the other side, regardless
/// of that side's value.
pub trait Presence {
    fn bump(&mut self);
}

impl Presence for usize {
    fn bump(&mut self) {
        *self += 1;
    }
}

impl Presence for AppearCount {
    fn bump(&mut self) {
        self.doc_frequency += 1;
    }
}

/// A hash-map-shaped word container: O(1) average `find`/`insert`, values
/// merged by [`Reducible::combine`] on `reduce` or [`Presence::bump`] on
/// `count_presence`.
///
/// The dedup index is keyed by the word's raw bytes (mirroring the original
/// `hash_index` companion structure) rather than by [`WordHandle`], since two
/// handles are only equal if they were produced from the very same `store`
/// call — textual equality is what a container needs for "is this word
/// already present".
#[derive(Debug)]
pub struct WordMap<V> {
    bank: WordBank,
    index: HashMap<Box<[u8]>, WordHandle>,
    values: HashMap<WordHandle, V>,
}

impl<V> WordMap<V> {
    pub fn new(bank: WordBank) -> Self {
        Self {
            bank,
            index: HashMap::new(),
            values: HashMap::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn word_bank_mut(&mut self) -> &mut WordBank {
        &mut self.bank
    }

    pub fn resolve(&self, handle: WordHandle) -> &[u8] {
        self.bank.resolve(handle)
    }

    pub fn find(&self, word: &[u8]) -> Option<(WordHandle, &V)> {
        let handle = *self.index.get(word)?;
        self.values.get(&handle).map(|v| (handle, v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordHandle, &V)> {
        self.values.iter().map(|(h, v)| (*h, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (WordHandle, &mut V)> {
        self.values.iter_mut().map(|(h, v)| (*h, v))
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.values.clear();
    }

    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    /// Inserts `word`, initialising its value to `default` if new, or
    /// returning the existing entry's handle and a mutable reference to
    /// its value for the caller to update (e.g. bump a count).
    pub fn entry(&mut self, word: &[u8], default: V) -> Result<(WordHandle, &mut V), Error> {
        if let Some(&handle) = self.index.get(word) {
            Ok((handle, self.values.get_mut(&handle).expect("index/values out of sync")))
        } else {
            let handle = self.bank.store(word)?;
            self.index.insert(word.into(), handle);
            self.values.insert(handle, default);
            Ok((handle, self.values.get_mut(&handle).expect("just inserted")))
        }
    }

    /// Like [`entry`](Self::entry), but for a pre-allocated bank: instead of
    /// copying `word`'s bytes into the arena, it delimits a handle directly
    /// into a chunk the caller has already [`enregister`](WordBank::enregister)ed,
    /// at byte offset `start`. `word` is only used for the dedup lookup, not
    /// stored.
    pub fn entry_preallocated(&mut self, word: &[u8], chunk: u32, start: u32, default: V) -> (WordHandle, &mut V) {
        if let Some(&handle) = self.index.get(word) {
            (handle, self.values.get_mut(&handle).expect("index/values out of sync"))
        } else {
            let handle = self.bank.intern_at(chunk, start, word.len() as u32);
            self.index.insert(word.into(), handle);
            self.values.insert(handle, default);
            (handle, self.values.get_mut(&handle).expect("just inserted"))
        }
    }

    pub fn insert(&mut self, word: &[u8], value: V) -> Result<WordHandle, Error> {
        let handle = self.bank.store(word)?;
        self.index.insert(word.into(), handle);
        self.values.insert(handle, value);
        Ok(handle)
    }

    /// Converts to an unsorted [`WordList`], consuming `self` (used before
    /// feeding a per-document map into `count_presence` on the aggregate, or
    /// before sorting for a binary-search lookup path).
    pub fn into_list(self) -> WordList<V> {
        let entries = self.values.into_iter().collect();
        WordList {
            bank: self.bank,
            entries,
        }
    }
}

impl<V: Reducible + Clone> WordMap<V> {
    /// Merges `other` into `self`: for two maps, iterate the smaller side and
    /// upsert into the larger, adding values on key collision (the monoid
    /// must be commutative). `other`'s bank is absorbed in O(chunks) and its
    /// handles are remapped in O(1) each.
    pub fn reduce(&mut self, mut other: Self) {
        if self.values.len() < other.values.len() {
            std::mem::swap(self, &mut other);
        }
        let offset = self.bank.absorb(other.bank);
        for (handle, value) in other.values {
            let shifted = handle.shifted(offset);
            let bytes = self.bank.resolve(shifted).to_vec();
            match self.index.get(bytes.as_slice()) {
                Some(&existing) => {
                    let slot = self.values.get_mut(&existing).expect("index/values out of sync");
                    slot.combine(&value);
                }
                None => {
                    self.index.insert(bytes.into_boxed_slice(), shifted);
                    self.values.insert(shifted, value);
                }
            }
        }
    }
}

impl<V: Presence + Default> WordMap<V> {
    /// For every distinct key present in `other`, bumps the local value by
    /// one (not by `other`'s value) — this is how document frequency is
    /// built from per-document term counts.
    pub fn count_presence<W>(&mut self, other: &WordList<W>) -> Result<(), Error> {
        for (handle, _value) in other.entries.iter() {
            let bytes = other.bank.resolve(*handle);
            let (_, slot) = self.entry(bytes, V::default())?;
            slot.bump();
        }
        Ok(())
    }
}

impl<V> Default for WordMap<V> {
    fn default() -> Self {
        Self::new(WordBank::managed())
    }
}

/// A sortable list-shaped word container (`Vec<(WordHandle, V)>`). Used as
/// the per-document intermediate representation fed into
/// [`WordMap::count_presence`], and — once sorted — as a binary-searchable
/// lookup structure for the term-major TF-IDF path.
#[derive(Debug)]
pub struct WordList<V> {
    bank: WordBank,
    entries: Vec<(WordHandle, V)>,
}

impl<V> WordList<V> {
    pub fn new(bank: WordBank) -> Self {
        Self {
            bank,
            entries: Vec::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn word_bank(&self) -> &WordBank {
        &self.bank
    }

    pub fn resolve(&self, handle: WordHandle) -> &[u8] {
        self.bank.resolve(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (WordHandle, &V)> {
        self.entries.iter().map(|(h, v)| (*h, v))
    }

    /// Replaces each entry's value in place, keeping the same handles and
    /// the same word bank (no bytes are copied). Used by the in-place
    /// TF-IDF projection to turn raw term counts into weights without
    /// building a separate vector set.
    pub fn map_values<W>(self, mut f: impl FnMut(&V) -> W) -> WordList<W> {
        let entries = self.entries.into_iter().map(|(h, v)| (h, f(&v))).collect();
        WordList {
            bank: self.bank,
            entries,
        }
    }

    pub fn push(&mut self, handle: WordHandle, value: V) {
        self.entries.push((handle, value));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sorts entries by the lexicographic byte order of their resolved word.
    pub fn sort(&mut self) {
        let bank = &self.bank;
        self.entries.sort_by(|(a, _), (b, _)| bank.resolve(*a).cmp(bank.resolve(*b)));
    }

    /// Binary search by word bytes; `self` must have been [`sort`](Self::sort)ed.
    pub fn binary_search(&self, word: &[u8]) -> Option<(WordHandle, &V)> {
        let idx = self
            .entries
            .binary_search_by(|(h, _)| self.bank.resolve(*h).cmp(word))
            .ok()?;
        let (h, v) = &self.entries[idx];
        Some((*h, v))
    }
}

impl<V: Reducible> WordList<V> {
    /// Merges two sorted lists in key order, adding values on key collision.
    /// Both `self` and `other` must already be [`sort`](Self::sort)ed.
    pub fn reduce_sorted(&mut self, other: Self) {
        let offset_chunks = self.bank.absorb(other.bank);
        let shifted: Vec<(WordHandle, V)> = other
            .entries
            .into_iter()
            .map(|(h, v)| (h.shifted(offset_chunks), v))
            .collect();
        let bank = &self.bank;
        let mut merged = Vec::with_capacity(self.entries.len() + shifted.len());
        let mut left = self.entries.drain(..).peekable();
        let mut right = shifted.into_iter().peekable();
        loop {
            match (left.peek(), right.peek()) {
                (Some((lh, _)), Some((rh, _))) => {
                    let ordering = bank.resolve(*lh).cmp(bank.resolve(*rh));
                    match ordering {
                        std::cmp::Ordering::Less => merged.push(left.next().unwrap()),
                        std::cmp::Ordering::Greater => merged.push(right.next().unwrap()),
                        std::cmp::Ordering::Equal => {
                            let (lh, mut lv) = left.next().unwrap();
                            let (_, rv) = right.next().unwrap();
                            lv.combine(&rv);
                            merged.push((lh, lv));
                            right.next();
                        }
                    }
                }
                (Some(_), None) => merged.push(left.next().unwrap()),
                (None, Some(_)) => merged.push(right.next().unwrap()),
                (None, None) => break,
            }
        }
        self.entries = merged;
    }
}

/// A sorted, unique list of paths without an associated value — used as a
/// directory listing.
#[derive(Debug, Default)]
pub struct PathList {
    entries: Vec<std::path::PathBuf>,
}

impl PathList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_paths(mut paths: Vec<std::path::PathBuf>) -> Self {
        paths.sort();
        paths.dedup();
        Self { entries: paths }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &std::path::PathBuf> {
        self.entries.iter()
    }
}

/// Assigns unique ascending ids to every entry of `aggregate`, making them a
/// permutation of `0..aggregate.size()`, in alphabetical order of the term's
/// bytes. The ordering itself is produced by a parallel sort over a
/// random-access `Vec` of handles; writing the assigned ids back is a cheap
/// sequential pass since `HashMap` cannot be mutated concurrently from
/// multiple threads.
pub fn assign_ids(aggregate: &mut WordMap<AppearCount>) {
    use rayon::prelude::*;

    let bank = &aggregate.bank;
    let mut handles: Vec<WordHandle> = aggregate.values.keys().copied().collect();
    handles.par_sort_unstable_by(|a, b| bank.resolve(*a).cmp(bank.resolve(*b)));

    for (id, handle) in handles.into_iter().enumerate() {
        if let Some(slot) = aggregate.values.get_mut(&handle) {
            slot.id = id as u32;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_dedups_repeated_words() {
        let mut map: WordMap<usize> = WordMap::new(WordBank::managed());
        let (h1, v1) = map.entry(b"FOX", 0usize).unwrap();
        *v1 += 1;
        let h1 = h1;
        let (h2, v2) = map.entry(b"FOX", 0usize).unwrap();
        *v2 += 1;
        assert_eq!(h1, h2);
        assert_eq!(*map.find(b"FOX").unwrap().1, 2);
    }

    #[test]
    fn reduce_is_commutative_on_disjoint_keys() {
        let mut a: WordMap<usize> = WordMap::new(WordBank::managed());
        a.entry(b"A", 0).unwrap().1.combine(&1);
        let mut b: WordMap<usize> = WordMap::new(WordBank::managed());
        b.entry(b"B", 0).unwrap().1.combine(&1);

        let mut ab: WordMap<usize> = WordMap::new(WordBank::managed());
        ab.entry(b"A", 0).unwrap().1.combine(&1);
        ab.reduce(b);

        let mut ba: WordMap<usize> = WordMap::new(WordBank::managed());
        ba.entry(b"B", 0).unwrap().1.combine(&1);
        ba.reduce(a);

        assert_eq!(*ab.find(b"A").unwrap().1, 1);
        assert_eq!(*ab.find(b"B").unwrap().1, 1);
        assert_eq!(*ba.find(b"A").unwrap().1, 1);
        assert_eq!(*ba.find(b"B").unwrap().1, 1);
    }

    #[test]
    fn reduce_adds_values_on_key_collision() {
        let mut a: WordMap<usize> = WordMap::new(WordBank::managed());
        a.entry(b"FOX", 0).unwrap().1.combine(&2);
        let mut b: WordMap<usize> = WordMap::new(WordBank::managed());
        b.entry(b"FOX", 0).unwrap().1.combine(&3);
        a.reduce(b);
        assert_eq!(*a.find(b"FOX").unwrap().1, 5);
    }

    #[test]
    fn count_presence_counts_documents_not_occurrences() {
        let mut aggregate: WordMap<AppearCount> = WordMap::new(WordBank::managed());

        let mut doc1: WordMap<usize> = WordMap::new(WordBank::managed());
        doc1.entry(b"A", 0).unwrap().1.combine(&1);
        doc1.entry(b"B", 0).unwrap().1.combine(&1);
        doc1.entry(b"A", 0).unwrap().1.combine(&1); // "a b" has A twice

        aggregate.count_presence(&doc1.into_list()).unwrap();

        let mut doc2: WordMap<usize> = WordMap::new(WordBank::managed());
        doc2.entry(b"B", 0).unwrap().1.combine(&1);
        doc2.entry(b"C", 0).unwrap().1.combine(&1);
        aggregate.count_presence(&doc2.into_list()).unwrap();

        let mut doc3: WordMap<usize> = WordMap::new(WordBank::managed());
        doc3.entry(b"C", 0).unwrap().1.combine(&1);
        doc3.entry(b"A", 0).unwrap().1.combine(&1);
        doc3.entry(b"B", 0).unwrap().1.combine(&1);
        aggregate.count_presence(&doc3.into_list()).unwrap();

        assert_eq!(aggregate.find(b"A").unwrap().1.doc_frequency, 2);
        assert_eq!(aggregate.find(b"B").unwrap().1.doc_frequency, 3);
        assert_eq!(aggregate.find(b"C").unwrap().1.doc_frequency, 2);
    }

    #[test]
    fn assign_ids_is_a_permutation_in_alphabetical_order() {
        let mut aggregate: WordMap<AppearCount> = WordMap::new(WordBank::managed());
        for w in [b"FOX".as_slice(), b"APPLE", b"MANGO", b"ZEBRA"] {
            aggregate.entry(w, AppearCount::default()).unwrap().1.bump();
        }
        assign_ids(&mut aggregate);
        let mut ids: Vec<u32> = aggregate.iter().map(|(_, v)| v.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(aggregate.find(b"APPLE").unwrap().1.id, 0);
        assert_eq!(aggregate.find(b"ZEBRA").unwrap().1.id, 3);
    }

    #[test]
    fn sorted_list_binary_search() {
        let mut map: WordMap<usize> = WordMap::new(WordBank::managed());
        for w in [b"ZEBRA".as_slice(), b"APPLE", b"MANGO"] {
            map.entry(w, 0).unwrap().1.combine(&1);
        }
        let mut list = map.into_list();
        list.sort();
        assert!(list.binary_search(b"MANGO").is_some());
        assert!(list.binary_search(b"MISSING").is_none());
    }
}
