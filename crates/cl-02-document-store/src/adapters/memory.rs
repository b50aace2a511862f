use crate::domain::{DocType, Document, DocumentKey, SeqNo, StoreError};
use crate::ports::DocumentStore;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::Arc;

/// In-memory document store.
///
/// Documents sit in a sharded [`DashMap`]. Writers first serialize on the
/// commit tip, which holds the last committed sequence number, and only then
/// take the write lock of the one shard holding the key. That lock is held
/// for the occupancy check and the insert of an `Arc`, so a read of another
/// key hashed to the same shard can stall for that long; reads of keys in
/// other shards never stall.
pub struct InMemoryDocumentStore {
    documents: DashMap<DocumentKey, Arc<Document>>,
    by_seq_no: DashMap<SeqNo, DocumentKey>,
    commit_tip: Mutex<Option<SeqNo>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
            by_seq_no: DashMap::new(),
            commit_tip: Mutex::new(None),
        }
    }
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn put(&self, document: Document) -> Result<Arc<Document>, StoreError> {
        let mut tip = self.commit_tip.lock();

        let seq_no = document.seq_no;
        let key = document.key.clone();
        match self.documents.entry(key.clone()) {
            Entry::Occupied(existing) => Err(StoreError::KeyAlreadyExists {
                key,
                existing_seq_no: existing.get().seq_no,
            }),
            Entry::Vacant(slot) => {
                if let Some(last) = *tip {
                    if seq_no <= last {
                        return Err(StoreError::SeqNoNotMonotonic { got: seq_no, last });
                    }
                }
                let document = Arc::new(document);
                slot.insert(Arc::clone(&document));
                // Secondary index after the primary: a seqNo lookup never
                // resolves to a key that is not there yet.
                self.by_seq_no.insert(seq_no, key);
                *tip = Some(seq_no);
                Ok(document)
            }
        }
    }

    fn get(&self, key: &DocumentKey, doc_type: DocType) -> Option<Arc<Document>> {
        self.documents
            .get(key)
            .filter(|doc| doc.doc_type == doc_type)
            .map(|doc| Arc::clone(doc.value()))
    }

    fn contains_key(&self, key: &DocumentKey) -> bool {
        self.documents.contains_key(key)
    }

    fn get_by_seq_no(&self, seq_no: SeqNo) -> Option<Arc<Document>> {
        let key = self.by_seq_no.get(&seq_no)?.value().clone();
        self.documents.get(&key).map(|doc| Arc::clone(doc.value()))
    }

    fn last_seq_no(&self) -> Option<SeqNo> {
        *self.commit_tip.lock()
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;
    use shared_types::DocumentDraft;

    fn arb_key() -> impl Strategy<Value = DocumentKey> {
        ("[1-9A-HJ-NP-Za-km-z]{4,22}", "[A-Za-z][A-Za-z0-9_]{0,15}", "[0-9]{1,3}(\\.[0-9]{1,3}){0,2}")
            .prop_map(|(author, name, version)| DocumentKey::new(author, name, version))
    }

    proptest! {
        #[test]
        fn prop_round_trip(key in arb_key(), value in any::<i64>()) {
            let store = InMemoryDocumentStore::new();
            let payload = serde_json::json!({"@context": {"value": value}});
            store.put(DocumentDraft { key: key.clone(), doc_type: DocType::Context, payload: payload.clone() }.commit(1, 0)).unwrap();

            let found = store.get(&key, DocType::Context).unwrap();
            prop_assert_eq!(&found.payload, &payload);
            prop_assert_eq!(found.seq_no, 1);
        }

        #[test]
        fn prop_exact_match_miss(key in arb_key(), other in arb_key()) {
            prop_assume!(key != other);
            let store = InMemoryDocumentStore::new();
            store.put(DocumentDraft { key, doc_type: DocType::Context, payload: serde_json::json!({}) }.commit(1, 0)).unwrap();
            prop_assert!(store.get(&other, DocType::Context).is_none());
        }
    }
}
