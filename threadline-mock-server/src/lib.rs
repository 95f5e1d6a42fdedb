use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use threadline_client::{
    api::{CommentSortType, CommentView, Error, PostId, PostView, SortType},
    Comments, PageRequest, PostListing, PostSource, Posts, Source, TransportError,
};

/// A post along with its whole comment thread, as produced by
/// `generate-test-data`
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Fixture {
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

impl Fixture {
    pub fn from_json(s: &str) -> serde_json::Result<Fixture> {
        serde_json::from_str(s)
    }
}

/// In-memory stand-in for the server. Rankings are plain vectors, first is
/// best, and ignore the requested sort.
pub struct MockServer(Mutex<State>);

#[derive(Debug, Default)]
struct State {
    posts: Vec<PostView>,
    threads: HashMap<PostId, Vec<CommentView>>,
    failures_left: usize,
    fetches: usize,
}

impl State {
    /// Counts the call, and eats one of the injected failures if any is left
    fn fetch_attempt(&mut self) -> Result<(), TransportError> {
        self.fetches += 1;
        if self.failures_left > 0 {
            self.failures_left -= 1;
            tracing::debug!(failures_left = self.failures_left, "injecting failure");
            return Err(TransportError::Status(503));
        }
        Ok(())
    }
}

fn page_of<T: Clone>(ranking: &[T], page: u32, limit: u32) -> Vec<T> {
    let start = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    ranking
        .iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect()
}

impl MockServer {
    pub fn new() -> MockServer {
        MockServer(Mutex::new(State::default()))
    }

    pub fn from_fixture(f: Fixture) -> MockServer {
        let this = MockServer::new();
        let post = f.post.post.id;
        this.add_post(f.post);
        for c in f.comments {
            this.add_comment(post, c);
        }
        this
    }

    /// Appends `p` at the bottom of the post ranking
    pub fn add_post(&self, p: PostView) {
        let mut state = self.0.lock();
        state.threads.entry(p.post.id).or_default();
        state.posts.push(p);
    }

    /// Makes `p` the best-ranked post, shifting all others one slot down
    pub fn insert_first_post(&self, p: PostView) {
        let mut state = self.0.lock();
        state.threads.entry(p.post.id).or_default();
        state.posts.insert(0, p);
    }

    /// Appends `c` at the bottom of the thread of `post`
    pub fn add_comment(&self, post: PostId, mut c: CommentView) {
        c.comment.post_id = post;
        self.0.lock().threads.entry(post).or_default().push(c);
    }

    /// Makes `c` the best-ranked comment of `post`
    pub fn insert_first_comment(&self, post: PostId, mut c: CommentView) {
        c.comment.post_id = post;
        self.0.lock().threads.entry(post).or_default().insert(0, c);
    }

    /// The next `n` fetches will fail with a 503
    pub fn fail_next(&self, n: usize) {
        self.0.lock().failures_left = n;
    }

    /// Number of fetches received so far, failed ones included
    pub fn fetch_count(&self) -> usize {
        self.0.lock().fetches
    }

    pub fn test_num_posts(&self) -> usize {
        self.0.lock().posts.len()
    }

    pub fn test_num_comments(&self, post: PostId) -> usize {
        self.0.lock().threads.get(&post).map_or(0, |t| t.len())
    }
}

impl Default for MockServer {
    fn default() -> MockServer {
        MockServer::new()
    }
}

#[async_trait]
impl Source<Posts> for MockServer {
    async fn fetch_page(
        &self,
        listing: &PostListing,
        req: &PageRequest<SortType>,
    ) -> Result<Vec<PostView>, TransportError> {
        let mut state = self.0.lock();
        state.fetch_attempt()?;
        let ranking = state
            .posts
            .iter()
            .filter(|p| match &listing.community {
                Some(c) => p.community.name == *c,
                None => true,
            })
            .cloned()
            .collect::<Vec<_>>();
        let res = page_of(&ranking, req.page, req.limit);
        tracing::debug!(page = req.page, num_posts = res.len(), "serving posts");
        Ok(res)
    }
}

#[async_trait]
impl Source<Comments> for MockServer {
    async fn fetch_page(
        &self,
        post: &PostId,
        req: &PageRequest<CommentSortType>,
    ) -> Result<Vec<CommentView>, TransportError> {
        let mut state = self.0.lock();
        state.fetch_attempt()?;
        let thread = state
            .threads
            .get(post)
            .ok_or(TransportError::Api(Error::CouldntFindPost))?;
        let ranking = thread
            .iter()
            .filter(|c| match req.max_depth {
                Some(d) => c.comment.path.depth() <= d as usize,
                None => true,
            })
            .cloned()
            .collect::<Vec<_>>();
        let res = page_of(&ranking, req.page, req.limit);
        tracing::debug!(post = post.0, page = req.page, num_comments = res.len(), "serving comments");
        Ok(res)
    }
}

#[async_trait]
impl PostSource for MockServer {
    async fn get_post(&self, id: PostId) -> Result<PostView, TransportError> {
        let mut state = self.0.lock();
        state.fetch_attempt()?;
        state
            .posts
            .iter()
            .find(|p| p.post.id == id)
            .cloned()
            .ok_or(TransportError::Api(Error::CouldntFindPost))
    }
}
