//! Card identity and id-keyed storage

use crate::MatchError;
use crate::Result;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable integer handle for a card
///
/// Assigned once when a level is generated and never reused or re-minted.
/// This is the only identity the engine hands to the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Central storage for all cards of a level
///
/// Uses FxHashMap for fast hashing of integer keys. Cards are never removed
/// during play; they only move between containers, which hold ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStore<T> {
    entities: FxHashMap<CardId, T>,
    next_id: u32,
}

impl<T> EntityStore<T> {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    /// Create a store whose first generated id is `first_id`
    pub fn starting_at(first_id: u32) -> Self {
        EntityStore {
            entities: FxHashMap::default(),
            next_id: first_id,
        }
    }

    /// Generate a new unique CardId
    ///
    /// Fails once the id space is exhausted; the counter must always be
    /// able to advance past the id it hands out.
    pub fn next_id(&mut self) -> Result<CardId> {
        let id = CardId::new(self.next_id);
        self.next_id = self.next_id.checked_add(1).ok_or_else(|| {
            MatchError::InvalidLevel(format!("card id space exhausted at {}", self.next_id))
        })?;
        Ok(id)
    }

    pub fn insert(&mut self, id: CardId, entity: T) {
        self.entities.insert(id, entity);
    }

    pub fn get(&self, id: CardId) -> Result<&T> {
        self.entities.get(&id).ok_or(MatchError::CardNotFound(id))
    }

    pub fn get_mut(&mut self, id: CardId) -> Result<&mut T> {
        self.entities.get_mut(&id).ok_or(MatchError::CardNotFound(id))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.entities.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &T)> {
        self.entities.iter()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_store() {
        let mut store = EntityStore::starting_at(1000);
        let id1 = store.next_id().unwrap();
        let id2 = store.next_id().unwrap();

        assert_eq!(id1.as_u32(), 1000);
        assert_eq!(id2.as_u32(), 1001);

        store.insert(id1, "first");
        store.insert(id2, "second");

        assert_eq!(store.len(), 2);
        assert_eq!(*store.get(id1).unwrap(), "first");
        assert!(store.contains(id2));
        assert!(matches!(
            store.get(CardId::new(999)),
            Err(MatchError::CardNotFound(id)) if id == CardId::new(999)
        ));
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut store: EntityStore<()> = EntityStore::new();
        let ids: Vec<_> = (0..5).map(|_| store.next_id().unwrap()).collect();
        let mut deduped = ids.clone();
        deduped.dedup();
        assert_eq!(ids, deduped);
        assert_eq!(ids[4].as_u32(), 4);
    }

    #[test]
    fn test_next_id_overflow_is_an_error() {
        let mut store: EntityStore<()> = EntityStore::starting_at(u32::MAX - 1);
        assert_eq!(store.next_id().unwrap().as_u32(), u32::MAX - 1);
        assert!(matches!(store.next_id(), Err(MatchError::InvalidLevel(_))));
        // A failed allocation does not move the counter
        assert!(matches!(store.next_id(), Err(MatchError::InvalidLevel(_))));
    }
}
