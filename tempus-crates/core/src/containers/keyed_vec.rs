use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

/// Storage for elements of type `Value` which can only be indexed by a `Key`.
///
/// The Bellman-Ford network uses it to attach adjacency lists and potentials to the nodes of its
/// distance graph without exposing raw indices.
#[derive(Debug, Hash, PartialEq, Eq)]
pub struct KeyedVec<Key, Value> {
    key: PhantomData<Key>,
    elements: Vec<Value>,
}

impl<Key, Value: Clone> Clone for KeyedVec<Key, Value> {
    fn clone(&self) -> Self {
        Self {
            key: PhantomData,
            elements: self.elements.clone(),
        }
    }
}

impl<Key, Value> Default for KeyedVec<Key, Value> {
    fn default() -> Self {
        Self {
            key: PhantomData,
            elements: Vec::default(),
        }
    }
}

impl<Key, Value> KeyedVec<Key, Value> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            key: PhantomData,
            elements: Vec::with_capacity(capacity),
        }
    }
}

impl<Key: StorageKey, Value> KeyedVec<Key, Value> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Add a new value to the vector.
    ///
    /// Returns the key for the inserted value.
    pub fn push(&mut self, value: Value) -> Key {
        self.elements.push(value);

        Key::create_from_index(self.elements.len() - 1)
    }

    /// Removes the value with the largest key.
    pub fn pop(&mut self) -> Option<Value> {
        self.elements.pop()
    }

    /// Iterate over the values in the vector.
    pub fn iter(&self) -> impl Iterator<Item = &'_ Value> {
        self.elements.iter()
    }

    /// Iterate over the keys of the stored values, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.elements.len()).map(Key::create_from_index)
    }
}

impl<Key: StorageKey, Value> Index<Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> Index<&Key> for KeyedVec<Key, Value> {
    type Output = Value;

    fn index(&self, index: &Key) -> &Self::Output {
        &self.elements[index.index()]
    }
}

impl<Key: StorageKey, Value> IndexMut<Key> for KeyedVec<Key, Value> {
    fn index_mut(&mut self, index: Key) -> &mut Self::Output {
        &mut self.elements[index.index()]
    }
}

/// A structure which can be used as a dense index into storage.
pub trait StorageKey: Clone {
    fn index(&self) -> usize;

    fn create_from_index(index: usize) -> Self;
}

impl StorageKey for usize {
    fn index(&self) -> usize {
        *self
    }

    fn create_from_index(index: usize) -> Self {
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pushed_values_are_indexed_by_their_key() {
        let mut keyed_vec: KeyedVec<usize, &str> = KeyedVec::default();
        let first = keyed_vec.push("first");
        let second = keyed_vec.push("second");

        assert_eq!(keyed_vec[first], "first");
        assert_eq!(keyed_vec[second], "second");
        assert_eq!(keyed_vec.keys().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn clones_do_not_share_storage() {
        let mut original: KeyedVec<usize, i64> = KeyedVec::with_capacity(4);
        let key = original.push(1);
        let mut copy = original.clone();
        copy[key] = 5;

        assert_eq!(original[key], 1);
        assert_eq!(copy[key], 5);
    }
}
