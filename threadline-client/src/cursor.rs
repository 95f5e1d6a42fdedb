/// Pagination state of one list
///
/// At most one fetch is in flight at any time, and once a page brought no new
/// record the cursor refuses to fetch again until it is reset.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PaginationCursor {
    page: u32,
    loading: bool,
    exhausted: bool,
}

impl PaginationCursor {
    pub fn new() -> PaginationCursor {
        PaginationCursor::default()
    }

    /// Last page successfully merged, 0 if none yet
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn can_fetch(&self) -> bool {
        !self.loading && !self.exhausted
    }

    /// Returns the page number to fetch, or `None` if no fetch may start now
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if !self.can_fetch() {
            return None;
        }
        self.loading = true;
        Some(self.page + 1)
    }

    pub fn complete_fetch(&mut self, fetched_page: u32, new_unique_count: usize) {
        self.loading = false;
        if new_unique_count == 0 {
            self.exhausted = true;
        } else {
            self.page = fetched_page;
        }
    }

    /// The fetch failed: allow a retry of the same page
    pub fn abort_fetch(&mut self) {
        self.loading = false;
    }

    pub fn reset(&mut self) {
        *self = PaginationCursor::default();
    }
}
