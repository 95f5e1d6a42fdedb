mod aggregator;
pub use aggregator::{Aggregator, FetchTicket, Outcome, Placeholder, Snapshot, Trigger};

mod cursor;
pub use cursor::PaginationCursor;

mod error;
pub use error::{Error, TransportError};

mod guard;
pub use guard::{Generation, GenerationGuard};

mod http;
pub use http::{ClientConfig, HttpClient};

mod listing;
pub use listing::{
    Comments, Listing, ListingConfig, PageRequest, PostListing, PostSource, Posts, Source,
};

mod merge;
pub use merge::{merge, Collection};

mod record;
pub use record::{Record, RecordCache};

mod shared;
pub use shared::{RefreshCompletion, SharedAggregator};

pub mod tree;
pub use tree::{CommentForest, CommentNode};

pub mod api {
    pub use threadline_api::*;
}
