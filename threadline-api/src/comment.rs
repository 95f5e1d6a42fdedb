use std::{fmt, str::FromStr};

use crate::{Error, Person, PersonId, PostId, Time};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub i32);

/// Materialized ancestry of a comment: the ids of all its ancestors, from the
/// top-level comment down, followed by the comment's own id.
///
/// On the wire this is a `.`-separated string whose first segment is the `0`
/// sentinel standing for the post itself, eg. `"0.12.57"` for comment 57
/// replying to top-level comment 12.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct CommentPath(Vec<CommentId>);

const ROOT_SENTINEL: &str = "0";

impl CommentPath {
    /// Panics if `ids` is empty
    pub fn new(ids: Vec<CommentId>) -> CommentPath {
        assert!(!ids.is_empty(), "comment paths must contain at least one id");
        CommentPath(ids)
    }

    pub fn ids(&self) -> &[CommentId] {
        &self.0
    }

    /// The comment this path leads to
    pub fn own_id(&self) -> CommentId {
        self.0[self.0.len() - 1]
    }

    /// Ancestors of the comment, excluding itself
    pub fn ancestors(&self) -> &[CommentId] {
        &self.0[..self.0.len() - 1]
    }

    /// Immediate parent, or `None` for a top-level comment
    pub fn parent(&self) -> Option<CommentId> {
        self.ancestors().last().copied()
    }

    /// 1 for top-level comments
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Path of a reply to the comment at this path
    pub fn child(&self, id: CommentId) -> CommentPath {
        let mut ids = self.0.clone();
        ids.push(id);
        CommentPath(ids)
    }
}

impl FromStr for CommentPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<CommentPath, Error> {
        let invalid = || Error::InvalidCommentPath(String::from(s));
        let mut segments = s.split('.').peekable();
        if segments.peek() == Some(&ROOT_SENTINEL) {
            segments.next();
        }
        let ids = segments
            .map(|seg| seg.parse::<i32>().map(CommentId).map_err(|_| invalid()))
            .collect::<Result<Vec<_>, Error>>()?;
        if ids.is_empty() {
            return Err(invalid());
        }
        Ok(CommentPath(ids))
    }
}

impl TryFrom<String> for CommentPath {
    type Error = Error;

    fn try_from(s: String) -> Result<CommentPath, Error> {
        s.parse()
    }
}

impl From<CommentPath> for String {
    fn from(p: CommentPath) -> String {
        p.to_string()
    }
}

impl fmt::Display for CommentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(ROOT_SENTINEL)?;
        for id in &self.0 {
            write!(f, ".{}", id.0)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    pub id: CommentId,
    pub creator_id: PersonId,
    pub post_id: PostId,
    pub content: String,
    pub path: CommentPath,
    pub published: Time,
    #[serde(default)]
    pub updated: Option<Time>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub removed: bool,
    #[serde(default)]
    pub distinguished: bool,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentAggregates {
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub downvotes: i64,
    #[serde(default)]
    pub child_count: i32,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentView {
    pub comment: Comment,
    pub creator: Person,
    #[serde(default)]
    pub counts: CommentAggregates,
}

impl CommentView {
    /// Builds a comment on post 0 whose path is `path`, eg. `stub(&[3, 7])`
    /// for comment 7 replying to comment 3.
    ///
    /// Panics if `path` is empty
    pub fn stub(path: &[i32]) -> CommentView {
        let path = CommentPath::new(path.iter().copied().map(CommentId).collect());
        CommentView {
            comment: Comment {
                id: path.own_id(),
                creator_id: PersonId::stub(),
                post_id: PostId(0),
                content: format!("comment {}", path.own_id().0),
                path,
                published: Time::default(),
                updated: None,
                deleted: false,
                removed: false,
                distinguished: false,
            },
            creator: Person::stub(),
            counts: CommentAggregates::default(),
        }
    }
}
