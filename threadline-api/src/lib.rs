mod comment;
pub use comment::{Comment, CommentAggregates, CommentId, CommentPath, CommentView};

mod community;
pub use community::{Community, CommunityAggregates, CommunityId, CommunityView};

mod error;
pub use error::Error;

mod person;
pub use person::{Person, PersonId};

mod post;
pub use post::{Post, PostAggregates, PostId, PostView};

mod query;
pub use query::{
    CommentSortType, GetComments, GetCommentsResponse, GetPost, GetPostResponse, GetPosts,
    GetPostsResponse, ListingType, Search, SearchResponse, SearchType, SortType,
};

/// Timestamps are sent by the server without a timezone, and are UTC
pub type Time = chrono::NaiveDateTime;

pub const API_PREFIX: &str = "/api/v3";
