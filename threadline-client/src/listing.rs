use std::fmt::Debug;

use async_trait::async_trait;

use crate::{
    api::{CommentSortType, CommentView, ListingType, PostId, PostView, SortType},
    tree, CommentForest, Record, TransportError,
};

/// A kind of paginated list: what it is about, what it contains, and what the
/// presentation layer gets out of its contents
pub trait Listing: Debug + Send + Sync + 'static {
    type Subject: Clone + Debug + Eq + Send + Sync;
    type Item: Record + Clone + Debug + Send + Sync;
    type Sort: Copy + Debug + Send + Sync;
    type View: Debug + Send + Sync;

    /// Plural noun used in user-facing messages
    const NOUN: &'static str;

    fn request(config: &ListingConfig, page: u32) -> PageRequest<Self::Sort>;

    /// Recomputed from scratch every time the list contents change
    fn derive(items: &[Self::Item]) -> Self::View;
}

/// Front page or community feed
#[derive(Clone, Copy, Debug)]
pub struct Posts;

/// Comment thread under a post
#[derive(Clone, Copy, Debug)]
pub struct Comments;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PostListing {
    /// `None` for the instance-wide feed
    pub community: Option<String>,
}

impl PostListing {
    pub fn all() -> PostListing {
        PostListing { community: None }
    }

    pub fn community(name: impl Into<String>) -> PostListing {
        PostListing {
            community: Some(name.into()),
        }
    }
}

impl Listing for Posts {
    type Subject = PostListing;
    type Item = PostView;
    type Sort = SortType;
    type View = ();

    const NOUN: &'static str = "posts";

    fn request(config: &ListingConfig, page: u32) -> PageRequest<SortType> {
        PageRequest {
            page,
            limit: config.limit,
            sort: config.sort,
            max_depth: None,
            listing_type: config.listing_type,
            saved_only: config.saved_only,
        }
    }

    fn derive(_: &[PostView]) {}
}

impl Listing for Comments {
    type Subject = PostId;
    type Item = CommentView;
    type Sort = CommentSortType;
    type View = CommentForest;

    const NOUN: &'static str = "comments";

    fn request(config: &ListingConfig, page: u32) -> PageRequest<CommentSortType> {
        PageRequest {
            page,
            limit: config.limit,
            sort: config.comment_sort,
            max_depth: Some(config.max_depth),
            listing_type: config.listing_type,
            saved_only: config.saved_only,
        }
    }

    fn derive(items: &[CommentView]) -> CommentForest {
        tree::build(items)
    }
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Records per page
    pub limit: u32,
    pub sort: SortType,
    pub comment_sort: CommentSortType,
    pub max_depth: u32,
    pub listing_type: ListingType,

    /// Only what the logged-in user saved
    pub saved_only: bool,
}

impl Default for ListingConfig {
    fn default() -> ListingConfig {
        ListingConfig {
            limit: 10,
            sort: SortType::Hot,
            comment_sort: CommentSortType::Hot,
            max_depth: 8,
            listing_type: ListingType::All,
            saved_only: false,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageRequest<S> {
    /// 1-based
    pub page: u32,
    pub limit: u32,
    pub sort: S,
    pub max_depth: Option<u32>,
    pub listing_type: ListingType,
    pub saved_only: bool,
}

/// The network collaborator. Either returns the whole page or fails, never
/// anything in-between.
#[async_trait]
pub trait Source<L: Listing>: Send + Sync {
    async fn fetch_page(
        &self,
        subject: &L::Subject,
        req: &PageRequest<L::Sort>,
    ) -> Result<Vec<L::Item>, TransportError>;
}

#[async_trait]
pub trait PostSource: Send + Sync {
    async fn get_post(&self, id: PostId) -> Result<PostView, TransportError>;
}
