//! Storage entity traits

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Key under which an entity is stored
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// String form used by backends that index on text keys
    fn as_str(&self) -> &str;
}

/// An entity that can be persisted by a [`Storage`](super::Storage) backend
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    type Key: StorageKey;

    fn key(&self) -> &Self::Key;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    struct NoteKey(String);

    impl StorageKey for NoteKey {
        fn as_str(&self) -> &str {
            &self.0
        }
    }

    #[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
    struct Note {
        key: NoteKey,
        body: String,
    }

    impl StorageEntity for Note {
        type Key = NoteKey;

        fn key(&self) -> &Self::Key {
            &self.key
        }
    }

    #[test]
    fn test_entity_exposes_its_key() {
        let note = Note {
            key: NoteKey("note-1".to_string()),
            body: "hello".to_string(),
        };
        assert_eq!(note.key().as_str(), "note-1");
        assert_eq!(note.body, "hello");
    }
}
