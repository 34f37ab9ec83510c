//! Liked recipes, mirrored to durable storage.
//!
//! Every mutation rewrites the whole collection under [`LIKES_KEY`]. Nothing
//! here rejects duplicate ids: callers check [`Likes::is_liked`] first.

use crate::error::StorageError;
use crate::storage::KeyValueStore;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Storage key the collection is persisted under
pub const LIKES_KEY: &str = "likes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Like {
    pub id: String,
    pub title: String,
    pub author: String,
    pub img: String,
}

pub struct Likes {
    likes: Vec<Like>,
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Likes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Likes").field("likes", &self.likes).finish()
    }
}

impl Likes {
    /// An empty collection over `store`. Call [`Likes::read_storage`] before mutating.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self::with_store(Box::new(store))
    }

    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Likes {
            likes: Vec::new(),
            store,
        }
    }

    /// Append a like and persist the collection.
    ///
    /// The like stays in memory even when persisting fails.
    pub fn add_like(
        &mut self,
        id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        img: impl Into<String>,
    ) -> Result<&Like, StorageError> {
        self.likes.push(Like {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            img: img.into(),
        });
        self.persist()?;
        Ok(&self.likes[self.likes.len() - 1])
    }

    /// Remove the like with `id` and persist; absent ids write nothing.
    pub fn delete_like(&mut self, id: &str) -> Result<Option<Like>, StorageError> {
        let Some(index) = self.likes.iter().position(|like| like.id == id) else {
            return Ok(None);
        };
        let removed = self.likes.remove(index);
        self.persist()?;
        Ok(Some(removed))
    }

    pub fn is_liked(&self, id: &str) -> bool {
        self.likes.iter().any(|like| like.id == id)
    }

    pub fn num_likes(&self) -> usize {
        self.likes.len()
    }

    pub fn likes(&self) -> &[Like] {
        &self.likes
    }

    /// Replace the in-memory collection with what storage holds.
    ///
    /// A missing key yields an empty collection. A corrupt value is an error
    /// and leaves the collection as it was.
    pub fn read_storage(&mut self) -> Result<usize, StorageError> {
        let likes = match self.store.get(LIKES_KEY)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt {
                    key: LIKES_KEY.to_string(),
                    source,
                })?
            }
            None => Vec::new(),
        };
        self.likes = likes;
        info!("Restored {} liked recipes", self.likes.len());
        Ok(self.likes.len())
    }

    fn persist(&mut self) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(&self.likes)?;
        debug!("Persisting {} likes", self.likes.len());
        self.store.set(LIKES_KEY, &serialized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_add_then_is_liked_then_delete() {
        let mut likes = Likes::new(MemoryStore::new());
        likes.add_like("r1", "Soup", "Chef", "img.png").unwrap();
        assert!(likes.is_liked("r1"));
        assert_eq!(likes.num_likes(), 1);

        let removed = likes.delete_like("r1").unwrap();
        assert_eq!(removed.map(|l| l.title), Some("Soup".to_string()));
        assert!(!likes.is_liked("r1"));
        assert_eq!(likes.num_likes(), 0);
    }

    #[test]
    fn test_add_persists_whole_collection() {
        let store = MemoryStore::new();
        let mut likes = Likes::new(store.clone());
        likes.add_like("r1", "Soup", "Chef", "img.png").unwrap();
        likes.add_like("r2", "Bread", "Baker", "bread.png").unwrap();

        let raw = store.get(LIKES_KEY).unwrap().unwrap();
        let stored: Vec<Like> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, likes.likes());
    }

    #[test]
    fn test_read_storage_round_trip() {
        let store = MemoryStore::new();
        let mut likes = Likes::new(store.clone());
        likes.add_like("r1", "Soup", "Chef", "img.png").unwrap();

        let mut reloaded = Likes::new(store);
        assert_eq!(reloaded.read_storage().unwrap(), 1);
        assert_eq!(
            reloaded.likes(),
            &[Like {
                id: "r1".to_string(),
                title: "Soup".to_string(),
                author: "Chef".to_string(),
                img: "img.png".to_string(),
            }]
        );
    }

    #[test]
    fn test_read_storage_missing_key_is_empty() {
        let mut likes = Likes::new(MemoryStore::new());
        assert_eq!(likes.read_storage().unwrap(), 0);
        assert_eq!(likes.num_likes(), 0);
    }

    #[test]
    fn test_read_storage_replaces_collection() {
        let store = MemoryStore::new();
        let mut likes = Likes::new(store.clone());
        likes.add_like("r1", "Soup", "Chef", "img.png").unwrap();

        let mut other = store.clone();
        other.set(LIKES_KEY, "[]").unwrap();

        likes.read_storage().unwrap();
        assert!(!likes.is_liked("r1"));
    }

    #[test]
    fn test_read_storage_corrupt_value() {
        let mut store = MemoryStore::new();
        store.set(LIKES_KEY, "{not json").unwrap();

        let mut likes = Likes::new(store.clone());
        likes.likes.push(Like {
            id: "keep".to_string(),
            title: String::new(),
            author: String::new(),
            img: String::new(),
        });

        let err = likes.read_storage().unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
        assert!(likes.is_liked("keep"));
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let store = MemoryStore::new();
        let mut likes = Likes::new(store.clone());
        likes.add_like("r1", "Soup", "Chef", "img.png").unwrap();
        let before = store.get(LIKES_KEY).unwrap();

        assert!(likes.delete_like("missing").unwrap().is_none());
        assert_eq!(likes.num_likes(), 1);
        assert_eq!(store.get(LIKES_KEY).unwrap(), before);
    }

    #[test]
    fn test_duplicates_are_not_rejected() {
        let mut likes = Likes::new(MemoryStore::new());
        likes.add_like("r1", "Soup", "Chef", "img.png").unwrap();
        likes.add_like("r1", "Soup", "Chef", "img.png").unwrap();
        assert_eq!(likes.num_likes(), 2);
    }
}
