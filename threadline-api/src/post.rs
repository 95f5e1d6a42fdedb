use crate::{Community, CommunityId, Person, PersonId, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct PostId(pub i32);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Post {
    pub id: PostId,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    pub creator_id: PersonId,
    pub community_id: CommunityId,
    pub published: Time,
    #[serde(default)]
    pub updated: Option<Time>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PostAggregates {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default)]
    pub comments: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct PostView {
    pub post: Post,
    pub creator: Person,
    pub community: Community,
    #[serde(default)]
    pub counts: PostAggregates,
}

impl PostView {
    pub fn stub(id: PostId) -> PostView {
        PostView {
            post: Post {
                id,
                name: format!("post {}", id.0),
                url: None,
                body: None,
                creator_id: PersonId::stub(),
                community_id: CommunityId::stub(),
                published: Time::default(),
                updated: None,
                deleted: false,
                removed: false,
                nsfw: false,
                thumbnail_url: None,
            },
            creator: Person::stub(),
            community: Community::stub(),
            counts: PostAggregates::default(),
        }
    }
}
