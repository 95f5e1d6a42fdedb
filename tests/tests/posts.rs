use std::sync::Arc;

use threadline_client::{
    api::{PostId, PostView},
    Aggregator, ListingConfig, Outcome, Placeholder, PostListing, Posts, RecordCache,
    SharedAggregator, Source, TransportError, Trigger,
};
use threadline_mock_server::MockServer;

fn server(n: i32) -> MockServer {
    let s = MockServer::new();
    for i in 1..=n {
        s.add_post(PostView::stub(PostId(i)));
    }
    s
}

fn config(limit: u32) -> ListingConfig {
    ListingConfig {
        limit,
        ..ListingConfig::default()
    }
}

fn ids(list: &SharedAggregator<Posts>) -> Vec<i32> {
    list.snapshot().items.iter().map(|p| p.post.id.0).collect()
}

fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        // several tests share the process
        let _ = tracing_subscriber::fmt::try_init();
    }
}

#[tokio::test]
async fn pages_until_exhausted_then_stops_asking() {
    init_tracing();
    let s = server(5);
    let list = SharedAggregator::<Posts>::new(PostListing::all(), config(2));
    assert_eq!(list.snapshot().placeholder(), Some(Placeholder::Empty));

    assert_eq!(
        list.load_initial(&s).await.unwrap(),
        Outcome::Merged {
            new_unique: 2,
            page: 1
        }
    );
    list.on_viewport_end_reached(&s).await.unwrap();
    list.on_viewport_end_reached(&s).await.unwrap();
    assert_eq!(ids(&list), vec![1, 2, 3, 4, 5]);

    assert_eq!(
        list.on_viewport_end_reached(&s).await.unwrap(),
        Outcome::Exhausted
    );
    let calls = s.fetch_count();
    for _ in 0..5 {
        assert_eq!(
            list.on_viewport_end_reached(&s).await.unwrap(),
            Outcome::Skipped
        );
    }
    assert_eq!(s.fetch_count(), calls);
    assert_eq!(list.snapshot().placeholder(), None);
}

#[tokio::test]
async fn shifted_ranking_overlap_is_deduplicated() {
    init_tracing();
    let s = server(4);
    let list = SharedAggregator::<Posts>::new(PostListing::all(), config(2));
    list.load_initial(&s).await.unwrap();

    // everything slides one slot down, page 2 now repeats post 2
    s.insert_first_post(PostView::stub(PostId(9)));
    assert_eq!(
        list.on_viewport_end_reached(&s).await.unwrap(),
        Outcome::Merged {
            new_unique: 1,
            page: 2
        }
    );
    assert_eq!(ids(&list), vec![1, 2, 3]);

    // pull to refresh sees the new head
    list.on_pull_to_refresh(&s, || ()).await.unwrap();
    assert_eq!(ids(&list), vec![9, 1]);
    assert!(!list.snapshot().exhausted);
}

#[tokio::test]
async fn failure_allows_retry_of_same_page() {
    init_tracing();
    let s = server(3);
    let list = SharedAggregator::<Posts>::new(PostListing::all(), config(2));
    list.load_initial(&s).await.unwrap();

    s.fail_next(1);
    let err = list.on_viewport_end_reached(&s).await.unwrap_err();
    assert_eq!(err.to_string(), "Problem fetching posts. Please try again.");
    assert!(matches!(err.transport(), TransportError::Status(503)));
    assert!(!list.snapshot().loading);
    assert_eq!(ids(&list), vec![1, 2]);

    assert_eq!(
        list.on_viewport_end_reached(&s).await.unwrap(),
        Outcome::Merged {
            new_unique: 1,
            page: 2
        }
    );
}

#[tokio::test]
async fn community_switch_discards_in_flight_page() {
    init_tracing();
    let s = MockServer::new();
    let mut cat = PostView::stub(PostId(1));
    cat.community.name = String::from("cats");
    let mut dog = PostView::stub(PostId(2));
    dog.community.name = String::from("dogs");
    s.add_post(cat);
    s.add_post(dog);

    let mut agg = Aggregator::<Posts>::new(PostListing::community("cats"), config(10));
    let ticket = agg.begin(Trigger::Initial).unwrap();
    let late = Source::<Posts>::fetch_page(&s, ticket.subject(), ticket.request()).await;

    agg.change_subject(PostListing::community("dogs"));
    assert_eq!(agg.commit(ticket, late).unwrap(), Outcome::Stale);
    assert!(agg.items().is_empty());

    let ticket = agg.begin(Trigger::Initial).unwrap();
    let page = Source::<Posts>::fetch_page(&s, ticket.subject(), ticket.request()).await;
    agg.commit(ticket, page).unwrap();
    let names = agg
        .items()
        .iter()
        .map(|p| p.community.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["dogs"]);
}

#[tokio::test]
async fn stale_failure_is_silent() {
    init_tracing();
    let s = server(3);
    s.fail_next(1);
    let mut agg = Aggregator::<Posts>::new(PostListing::all(), config(10));
    let ticket = agg.begin(Trigger::Initial).unwrap();
    let failed = Source::<Posts>::fetch_page(&s, ticket.subject(), ticket.request()).await;
    assert!(failed.is_err());

    // a refresh started meanwhile wins
    let refresh = agg.begin(Trigger::Refresh).unwrap();
    assert_eq!(agg.commit(ticket, failed).unwrap(), Outcome::Stale);
    let page = Source::<Posts>::fetch_page(&s, refresh.subject(), refresh.request()).await;
    agg.commit(refresh, page).unwrap();
    assert_eq!(agg.items().len(), 3);
}

#[tokio::test]
async fn cache_is_shared_between_lists() {
    init_tracing();
    let s = server(4);
    let cache = Arc::new(RecordCache::new());
    let front = SharedAggregator::<Posts>::new(PostListing::all(), config(2))
        .with_cache(cache.clone());
    let other = SharedAggregator::<Posts>::new(PostListing::all(), config(4))
        .with_cache(cache.clone());
    front.load_initial(&s).await.unwrap();
    other.load_initial(&s).await.unwrap();
    assert_eq!(cache.len(), 4);
    assert_eq!(
        cache.get(&PostId(4)).map(|p| p.post.name.clone()),
        Some(String::from("post 4"))
    );
}
