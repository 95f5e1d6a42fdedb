use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;

use crate::{
    api::{
        self, CommentSortType, CommentView, CommunityView, GetComments, GetCommentsResponse,
        GetPost, GetPostResponse, GetPosts, GetPostsResponse, PostId, PostView,
        SearchResponse, SearchType, SortType,
    },
    Comments, PageRequest, PostListing, PostSource, Posts, Source, TransportError,
};

const SEARCH_LIMIT: u32 = 20;

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct ClientConfig {
    /// eg. `https://lemmy.ml`
    pub host: String,

    /// JWT of the logged-in user, if any
    #[serde(default)]
    pub auth: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    pub fn new(host: impl Into<String>) -> ClientConfig {
        ClientConfig {
            host: host.into(),
            auth: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Talks to the server's JSON API
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<HttpClient, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(HttpClient { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn get<Q, R>(&self, endpoint: &str, query: &Q) -> Result<R, TransportError>
    where
        Q: serde::Serialize + ?Sized,
        R: for<'de> serde::Deserialize<'de>,
    {
        let url = format!(
            "{}{}/{}",
            self.config.host.trim_end_matches('/'),
            api::API_PREFIX,
            endpoint
        );
        let resp = self.client.get(&url).query(query).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.bytes().await?;
            return Err(match api::Error::parse(&body) {
                Ok(err) => TransportError::Api(err),
                Err(_) => TransportError::Status(status.as_u16()),
            });
        }
        decode(&resp.bytes().await?)
    }

    fn posts_query(&self, listing: &PostListing, req: &PageRequest<SortType>) -> GetPosts {
        GetPosts {
            type_: Some(req.listing_type),
            sort: Some(req.sort),
            page: Some(req.page),
            limit: Some(req.limit),
            community_name: listing.community.clone(),
            saved_only: Some(req.saved_only),
            auth: self.config.auth.clone(),
        }
    }

    fn comments_query(&self, post: PostId, req: &PageRequest<CommentSortType>) -> GetComments {
        GetComments {
            type_: Some(req.listing_type),
            sort: Some(req.sort),
            max_depth: req.max_depth,
            page: Some(req.page),
            limit: Some(req.limit),
            post_id: Some(post),
            saved_only: Some(req.saved_only),
            auth: self.config.auth.clone(),
        }
    }

    pub async fn get_posts(
        &self,
        listing: &PostListing,
        req: &PageRequest<SortType>,
    ) -> Result<Vec<PostView>, TransportError> {
        let query = self.posts_query(listing, req);
        let resp: GetPostsResponse = self.get("post/list", &query).await?;
        Ok(resp.posts)
    }

    pub async fn get_comments(
        &self,
        post: PostId,
        req: &PageRequest<CommentSortType>,
    ) -> Result<Vec<CommentView>, TransportError> {
        let query = self.comments_query(post, req);
        let resp: GetCommentsResponse = self.get("comment/list", &query).await?;
        Ok(resp.comments)
    }

    pub async fn get_post(&self, id: PostId) -> Result<PostView, TransportError> {
        let query = GetPost {
            id,
            auth: self.config.auth.clone(),
        };
        let resp: GetPostResponse = self.get("post", &query).await?;
        Ok(resp.post_view)
    }

    /// Communities whose name matches `q`. An empty query matches nothing.
    pub async fn search_communities(&self, q: &str) -> Result<Vec<CommunityView>, TransportError> {
        if q.is_empty() {
            return Ok(Vec::new());
        }
        let query = api::Search {
            q: String::from(q),
            type_: Some(SearchType::Communities),
            limit: Some(SEARCH_LIMIT),
            auth: self.config.auth.clone(),
        };
        let resp: SearchResponse = self.get("search", &query).await?;
        Ok(resp.communities)
    }
}

/// A success body that does not hold what the endpoint promised
fn decode<R>(body: &[u8]) -> Result<R, TransportError>
where
    R: for<'de> serde::Deserialize<'de>,
{
    Ok(serde_json::from_slice(body).context("decoding response body")?)
}

#[async_trait]
impl Source<Posts> for HttpClient {
    async fn fetch_page(
        &self,
        listing: &PostListing,
        req: &PageRequest<SortType>,
    ) -> Result<Vec<PostView>, TransportError> {
        self.get_posts(listing, req).await
    }
}

#[async_trait]
impl Source<Comments> for HttpClient {
    async fn fetch_page(
        &self,
        post: &PostId,
        req: &PageRequest<CommentSortType>,
    ) -> Result<Vec<CommentView>, TransportError> {
        self.get_comments(*post, req).await
    }
}

#[async_trait]
impl PostSource for HttpClient {
    async fn get_post(&self, id: PostId) -> Result<PostView, TransportError> {
        HttpClient::get_post(self, id).await
    }
}
