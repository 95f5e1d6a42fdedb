use std::str::FromStr;

use crate::{CommentView, CommunityView, PostId, PostView};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum SortType {
    Active,
    #[default]
    Hot,
    New,
    Old,
    TopDay,
    TopWeek,
    TopMonth,
    TopYear,
    TopAll,
    MostComments,
    NewComments,
}

impl FromStr for SortType {
    type Err = String;

    fn from_str(s: &str) -> Result<SortType, String> {
        Ok(match s {
            "Active" => SortType::Active,
            "Hot" => SortType::Hot,
            "New" => SortType::New,
            "Old" => SortType::Old,
            "TopDay" => SortType::TopDay,
            "TopWeek" => SortType::TopWeek,
            "TopMonth" => SortType::TopMonth,
            "TopYear" => SortType::TopYear,
            "TopAll" => SortType::TopAll,
            "MostComments" => SortType::MostComments,
            "NewComments" => SortType::NewComments,
            _ => return Err(format!("unknown post sort {s:?}")),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum CommentSortType {
    #[default]
    Hot,
    Top,
    New,
    Old,
}

impl FromStr for CommentSortType {
    type Err = String;

    fn from_str(s: &str) -> Result<CommentSortType, String> {
        Ok(match s {
            "Hot" => CommentSortType::Hot,
            "Top" => CommentSortType::Top,
            "New" => CommentSortType::New,
            "Old" => CommentSortType::Old,
            _ => return Err(format!("unknown comment sort {s:?}")),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum ListingType {
    #[default]
    All,
    Local,
    Subscribed,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum SearchType {
    All,
    Comments,
    Posts,
    Communities,
    Users,
    Url,
}

#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct GetPosts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_: Option<ListingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct GetPostsResponse {
    pub posts: Vec<PostView>,
}

#[derive(Clone, Debug, Default, serde::Deserialize, serde::Serialize)]
pub struct GetComments {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_: Option<ListingType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<CommentSortType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<PostId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct GetCommentsResponse {
    pub comments: Vec<CommentView>,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct GetPost {
    pub id: PostId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct GetPostResponse {
    pub post_view: PostView,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct Search {
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_: Option<SearchType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub communities: Vec<CommunityView>,
}
