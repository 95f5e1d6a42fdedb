use std::{collections::HashMap, fmt::Debug, hash::Hash};

use parking_lot::RwLock;

use crate::api::{CommentId, CommentView, PostId, PostView};

/// Something the server hands out in pages, identified by a unique id
pub trait Record {
    type Id: Copy + Debug + Eq + Hash + Send + Sync;

    fn id(&self) -> Self::Id;
}

impl Record for PostView {
    type Id = PostId;

    fn id(&self) -> PostId {
        self.post.id
    }
}

impl Record for CommentView {
    type Id = CommentId;

    fn id(&self) -> CommentId {
        self.comment.id
    }
}

/// Latest copy of every record received from the server, whichever list
/// fetched it. Pages land here even when their list later drops them as stale.
#[derive(Debug)]
pub struct RecordCache<R: Record> {
    records: RwLock<HashMap<R::Id, R>>,
}

impl<R: Record + Clone> RecordCache<R> {
    pub fn new() -> RecordCache<R> {
        RecordCache {
            records: RwLock::new(HashMap::new()),
        }
    }

    pub fn received(&self, page: &[R]) {
        let mut records = self.records.write();
        records.reserve(page.len());
        for r in page {
            records.insert(r.id(), r.clone());
        }
    }

    pub fn get(&self, id: &R::Id) -> Option<R> {
        self.records.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<R: Record + Clone> Default for RecordCache<R> {
    fn default() -> RecordCache<R> {
        RecordCache::new()
    }
}
