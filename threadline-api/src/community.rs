#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommunityId(pub i32);

impl CommunityId {
    pub fn stub() -> CommunityId {
        CommunityId(0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub actor_id: String,
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub nsfw: bool,
}

impl Community {
    pub fn stub() -> Community {
        Community {
            id: CommunityId::stub(),
            name: String::from("stub"),
            title: String::from("Stub"),
            actor_id: String::new(),
            local: true,
            nsfw: false,
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommunityAggregates {
    #[serde(default)]
    pub subscribers: i64,
    #[serde(default)]
    pub posts: i64,
    #[serde(default)]
    pub comments: i64,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommunityView {
    pub community: Community,
    #[serde(default)]
    pub counts: CommunityAggregates,
}
