use std::sync::Arc;

use crate::{
    Collection, Error, Generation, GenerationGuard, Listing, ListingConfig, PageRequest,
    PaginationCursor, TransportError,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Trigger {
    /// The view for the subject just got shown
    Initial,

    /// The user scrolled to the end of what is loaded
    ViewportEnd,

    /// Pull-to-refresh: start over from page 1
    Refresh,
}

/// An in-flight fetch, to be handed back to [`Aggregator::commit`] along with
/// its result
#[derive(Debug)]
pub struct FetchTicket<L: Listing> {
    generation: Generation,
    subject: L::Subject,
    request: PageRequest<L::Sort>,
    is_refresh: bool,
}

impl<L: Listing> FetchTicket<L> {
    pub fn subject(&self) -> &L::Subject {
        &self.subject
    }

    pub fn request(&self) -> &PageRequest<L::Sort> {
        &self.request
    }

    pub fn is_refresh(&self) -> bool {
        self.is_refresh
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The page brought new records
    Merged { new_unique: usize, page: u32 },

    /// The page brought nothing new: no further page will be requested until
    /// a refresh
    Exhausted,

    /// The list moved on while the request was in flight, the result was
    /// dropped
    Stale,

    /// A fetch was already in flight or the list is exhausted, nothing was
    /// requested
    Skipped,
}

/// What the presentation layer needs to render a list
#[derive(Debug)]
pub struct Snapshot<L: Listing> {
    pub items: Vec<L::Item>,
    pub view: Arc<L::View>,
    pub loading: bool,
    pub exhausted: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placeholder {
    Spinner,
    Empty,
}

impl<L: Listing> Snapshot<L> {
    /// What to show instead of the list, if anything
    pub fn placeholder(&self) -> Option<Placeholder> {
        match (self.items.is_empty(), self.loading) {
            (false, _) => None,
            (true, true) => Some(Placeholder::Spinner),
            (true, false) => Some(Placeholder::Empty),
        }
    }
}

/// Accumulated state of one paginated list bound to one subject
#[derive(Debug)]
pub struct Aggregator<L: Listing> {
    subject: L::Subject,
    config: ListingConfig,
    guard: GenerationGuard,
    cursor: PaginationCursor,

    /// Cursor as it was before the refresh in flight, put back if it fails
    before_refresh: Option<PaginationCursor>,

    items: Collection<L::Item>,
    view: Arc<L::View>,
    view_version: u64,
}

impl<L: Listing> Aggregator<L> {
    pub fn new(subject: L::Subject, config: ListingConfig) -> Aggregator<L> {
        let items = Collection::new();
        Aggregator {
            subject,
            config,
            guard: GenerationGuard::new(),
            cursor: PaginationCursor::new(),
            before_refresh: None,
            view: Arc::new(L::derive(items.as_slice())),
            view_version: items.version(),
            items,
        }
    }

    pub fn subject(&self) -> &L::Subject {
        &self.subject
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.cursor
    }

    pub fn items(&self) -> &Collection<L::Item> {
        &self.items
    }

    pub fn view(&self) -> Arc<L::View> {
        self.view.clone()
    }

    pub fn snapshot(&self) -> Snapshot<L> {
        Snapshot {
            items: self.items.as_slice().to_vec(),
            view: self.view.clone(),
            loading: self.cursor.is_loading(),
            exhausted: self.cursor.is_exhausted(),
        }
    }

    /// Starts a fetch if `trigger` allows one now.
    ///
    /// A refresh is always accepted: it starts over from page 1 and makes any
    /// fetch still in flight stale.
    pub fn begin(&mut self, trigger: Trigger) -> Option<FetchTicket<L>> {
        let is_refresh = trigger == Trigger::Refresh;
        if is_refresh {
            self.guard.advance();
            // a refresh replacing another one must restore the older cursor
            self.before_refresh.get_or_insert(self.cursor);
            self.cursor.reset();
        }
        let page = match self.cursor.begin_fetch() {
            Some(page) => page,
            None => {
                tracing::trace!(
                    ?trigger,
                    subject = ?self.subject,
                    cursor = ?self.cursor,
                    "ignoring fetch trigger"
                );
                return None;
            }
        };
        tracing::debug!(
            ?trigger,
            subject = ?self.subject,
            page,
            "fetching {}",
            L::NOUN
        );
        Some(FetchTicket {
            generation: self.guard.current(),
            subject: self.subject.clone(),
            request: L::request(&self.config, page),
            is_refresh,
        })
    }

    /// Applies the result of the fetch described by `ticket`.
    ///
    /// Stale results, failed or not, leave the state untouched. A failure of
    /// the current fetch is returned so it can be shown to the user, and the
    /// same page may be requested again. A failed refresh leaves the list
    /// where it was before the refresh.
    pub fn commit(
        &mut self,
        ticket: FetchTicket<L>,
        result: Result<Vec<L::Item>, TransportError>,
    ) -> Result<Outcome, Error> {
        // not loading means this ticket was already committed
        if !self.guard.is_current(ticket.generation) || !self.cursor.is_loading() {
            tracing::debug!(
                subject = ?ticket.subject,
                page = ticket.request.page,
                "dropping stale {} response",
                L::NOUN
            );
            return Ok(Outcome::Stale);
        }

        let page = match result {
            Ok(page) => page,
            Err(source) => {
                tracing::warn!(
                    subject = ?ticket.subject,
                    page = ticket.request.page,
                    err = %source,
                    "failed fetching {}",
                    L::NOUN
                );
                if let Some(before) = self.before_refresh.take() {
                    self.cursor = before;
                }
                self.cursor.abort_fetch();
                return Err(Error::Fetch {
                    what: L::NOUN,
                    source,
                });
            }
        };

        self.before_refresh = None;
        let received = page.len();
        let new_unique = self.items.merge(page, ticket.is_refresh);
        self.cursor.complete_fetch(ticket.request.page, new_unique);
        self.refresh_view();

        if self.cursor.is_exhausted() {
            tracing::info!(
                subject = ?self.subject,
                page = ticket.request.page,
                received,
                total = self.items.len(),
                "no new {}, end of list reached",
                L::NOUN
            );
            Ok(Outcome::Exhausted)
        } else {
            tracing::debug!(
                subject = ?self.subject,
                page = ticket.request.page,
                received,
                new_unique,
                total = self.items.len(),
                "merged page of {}",
                L::NOUN
            );
            Ok(Outcome::Merged {
                new_unique,
                page: ticket.request.page,
            })
        }
    }

    /// Drops everything about the current subject, including fetches still in
    /// flight, and starts over with `subject`
    pub fn change_subject(&mut self, subject: L::Subject) {
        tracing::info!(from = ?self.subject, to = ?subject, "changing {} subject", L::NOUN);
        self.guard.advance();
        self.subject = subject;
        self.cursor.reset();
        self.before_refresh = None;
        self.items.clear();
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        if self.items.version() != self.view_version {
            self.view = Arc::new(L::derive(self.items.as_slice()));
            self.view_version = self.items.version();
        }
    }
}
