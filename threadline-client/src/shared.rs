use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    api::{PostId, PostView},
    Aggregator, Comments, Error, Listing, ListingConfig, Outcome, PostSource, RecordCache,
    Snapshot, Source, TransportError, Trigger,
};

/// Runs a completion callback when dropped, whichever way the scope it lives
/// in is left
pub struct RefreshCompletion {
    on_complete: Option<Box<dyn FnOnce() + Send>>,
}

impl RefreshCompletion {
    pub fn new(on_complete: impl FnOnce() + Send + 'static) -> RefreshCompletion {
        RefreshCompletion {
            on_complete: Some(Box::new(on_complete)),
        }
    }
}

impl Drop for RefreshCompletion {
    fn drop(&mut self) {
        if let Some(f) = self.on_complete.take() {
            f();
        }
    }
}

/// Handle on an [`Aggregator`] that the presentation layer forwards its
/// events to. The lock is never held while waiting on the network.
pub struct SharedAggregator<L: Listing> {
    inner: Arc<Mutex<Aggregator<L>>>,
    cache: Option<Arc<RecordCache<L::Item>>>,
}

impl<L: Listing> Clone for SharedAggregator<L> {
    fn clone(&self) -> Self {
        SharedAggregator {
            inner: self.inner.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<L: Listing> SharedAggregator<L> {
    pub fn new(subject: L::Subject, config: ListingConfig) -> SharedAggregator<L> {
        SharedAggregator {
            inner: Arc::new(Mutex::new(Aggregator::new(subject, config))),
            cache: None,
        }
    }

    /// Every page received gets published to `cache`, even the stale ones
    pub fn with_cache(mut self, cache: Arc<RecordCache<L::Item>>) -> SharedAggregator<L> {
        self.cache = Some(cache);
        self
    }

    pub fn snapshot(&self) -> Snapshot<L> {
        self.inner.lock().snapshot()
    }

    pub fn subject(&self) -> L::Subject {
        self.inner.lock().subject().clone()
    }

    pub async fn fetch<S>(&self, source: &S, trigger: Trigger) -> Result<Outcome, Error>
    where
        S: Source<L> + ?Sized,
    {
        let ticket = self.inner.lock().begin(trigger);
        let ticket = match ticket {
            Some(t) => t,
            None => return Ok(Outcome::Skipped),
        };
        let result = source.fetch_page(ticket.subject(), ticket.request()).await;
        if let (Ok(page), Some(cache)) = (&result, &self.cache) {
            cache.received(page);
        }
        self.inner.lock().commit(ticket, result)
    }

    pub async fn load_initial<S>(&self, source: &S) -> Result<Outcome, Error>
    where
        S: Source<L> + ?Sized,
    {
        self.fetch(source, Trigger::Initial).await
    }

    pub async fn on_viewport_end_reached<S>(&self, source: &S) -> Result<Outcome, Error>
    where
        S: Source<L> + ?Sized,
    {
        self.fetch(source, Trigger::ViewportEnd).await
    }

    /// `completion` runs once the refresh is over, successful or not
    pub async fn on_pull_to_refresh<S>(
        &self,
        source: &S,
        completion: impl FnOnce() + Send + 'static,
    ) -> Result<Outcome, Error>
    where
        S: Source<L> + ?Sized,
    {
        let _completion = RefreshCompletion::new(completion);
        self.fetch(source, Trigger::Refresh).await
    }

    /// Switches the list to `subject` and loads its first page
    pub async fn on_resource_changed<S>(
        &self,
        source: &S,
        subject: L::Subject,
    ) -> Result<Outcome, Error>
    where
        S: Source<L> + ?Sized,
    {
        self.inner.lock().change_subject(subject);
        self.load_initial(source).await
    }
}

impl SharedAggregator<Comments> {
    /// Refreshes the thread and the post it hangs under at the same time.
    /// `completion` runs once both are over.
    pub async fn refresh_thread<S>(
        &self,
        source: &S,
        completion: impl FnOnce() + Send + 'static,
    ) -> (Result<Outcome, Error>, Result<PostView, TransportError>)
    where
        S: Source<Comments> + PostSource + ?Sized,
    {
        let _completion = RefreshCompletion::new(completion);
        let post: PostId = self.subject();
        futures::join!(
            self.fetch(source, Trigger::Refresh),
            source.get_post(post)
        )
    }
}
