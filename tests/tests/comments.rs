use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use threadline_client::{
    api::{CommentId, CommentView, Error as ApiError, PostId, PostView},
    Comments, ListingConfig, Outcome, SharedAggregator, TransportError,
};
use threadline_mock_server::{Fixture, MockServer};

const POST: PostId = PostId(1);

fn thread(paths: &[&[i32]]) -> MockServer {
    MockServer::from_fixture(Fixture {
        post: PostView::stub(POST),
        comments: paths.iter().map(|p| CommentView::stub(p)).collect(),
    })
}

fn config(limit: u32, max_depth: u32) -> ListingConfig {
    ListingConfig {
        limit,
        max_depth,
        ..ListingConfig::default()
    }
}

fn shape(list: &SharedAggregator<Comments>) -> Vec<(usize, i32)> {
    list.snapshot()
        .view
        .depth_first()
        .map(|(d, n)| (d, n.comment.comment.id.0))
        .collect()
}

fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        // several tests share the process
        let _ = tracing_subscriber::fmt::try_init();
    }
}

#[tokio::test]
async fn thread_grows_as_pages_arrive() {
    init_tracing();
    let s = thread(&[&[1], &[1, 2], &[3], &[1, 2, 4], &[3, 5]]);
    let list = SharedAggregator::<Comments>::new(POST, config(2, 8));

    list.load_initial(&s).await.unwrap();
    assert_eq!(shape(&list), vec![(0, 1), (1, 2)]);

    list.on_viewport_end_reached(&s).await.unwrap();
    list.on_viewport_end_reached(&s).await.unwrap();
    assert_eq!(
        shape(&list),
        vec![(0, 1), (1, 2), (2, 4), (0, 3), (1, 5)]
    );
    let snapshot = list.snapshot();
    let one = snapshot.view.get(&CommentId(1)).unwrap();
    assert_eq!(one.descendant_count, 2);
    assert!(snapshot.items.iter().all(|c| c.comment.post_id == POST));
}

#[tokio::test]
async fn depth_limit_orphans_become_roots() {
    init_tracing();
    let s = thread(&[&[1], &[1, 2], &[1, 2, 3], &[1, 2, 3, 4]]);
    let list = SharedAggregator::<Comments>::new(POST, config(10, 2));
    list.load_initial(&s).await.unwrap();
    assert_eq!(shape(&list), vec![(0, 1), (1, 2)]);
    assert_eq!(
        list.on_viewport_end_reached(&s).await.unwrap(),
        Outcome::Exhausted
    );
}

#[tokio::test]
async fn refresh_thread_fetches_post_too() {
    init_tracing();
    let s = thread(&[&[1], &[2]]);
    let list = SharedAggregator::<Comments>::new(POST, config(10, 8));
    list.load_initial(&s).await.unwrap();

    s.insert_first_comment(POST, CommentView::stub(&[7]));
    let done = Arc::new(AtomicBool::new(false));
    let (comments, post) = {
        let done = done.clone();
        list.refresh_thread(&s, move || done.store(true, Ordering::SeqCst))
            .await
    };
    assert_eq!(
        comments.unwrap(),
        Outcome::Merged {
            new_unique: 3,
            page: 1
        }
    );
    assert_eq!(post.unwrap().post.id, POST);
    assert!(done.load(Ordering::SeqCst));
    assert_eq!(shape(&list), vec![(0, 7), (0, 1), (0, 2)]);
}

#[tokio::test]
async fn refresh_thread_reports_both_failures() {
    init_tracing();
    let s = thread(&[&[1]]);
    let list = SharedAggregator::<Comments>::new(POST, config(10, 8));
    s.fail_next(2);
    let done = Arc::new(AtomicBool::new(false));
    let (comments, post) = {
        let done = done.clone();
        list.refresh_thread(&s, move || done.store(true, Ordering::SeqCst))
            .await
    };
    assert_eq!(
        comments.unwrap_err().to_string(),
        "Problem fetching comments. Please try again."
    );
    assert!(matches!(post, Err(TransportError::Status(503))));
    assert!(done.load(Ordering::SeqCst));
    assert!(list.snapshot().items.is_empty());
}

#[tokio::test]
async fn switching_post_starts_over() {
    init_tracing();
    let s = thread(&[&[1], &[1, 2]]);
    let other = PostId(2);
    s.add_post(PostView::stub(other));
    s.add_comment(other, CommentView::stub(&[10]));

    let list = SharedAggregator::<Comments>::new(POST, config(10, 8));
    list.load_initial(&s).await.unwrap();
    list.on_resource_changed(&s, other).await.unwrap();
    assert_eq!(list.subject(), other);
    assert_eq!(shape(&list), vec![(0, 10)]);

    let err = list
        .on_resource_changed(&s, PostId(404))
        .await
        .unwrap_err();
    assert!(matches!(
        err.transport(),
        TransportError::Api(ApiError::CouldntFindPost)
    ));
    assert!(list.snapshot().items.is_empty());
}

#[tokio::test]
async fn generated_fixture_renders_every_comment() {
    use rand::Rng;

    init_tracing();
    // same shape as what generate-test-data emits, kept small
    let mut rng = rand::thread_rng();
    let mut paths: Vec<Vec<i32>> = Vec::new();
    for i in 1..=60 {
        let path = match paths.len() {
            0 => vec![i],
            n if rng.gen_bool(0.7) => {
                let mut p = paths[rng.gen_range(0..n)].clone();
                p.push(i);
                p
            }
            _ => vec![i],
        };
        paths.push(path);
    }
    let refs = paths.iter().map(|p| p.as_slice()).collect::<Vec<_>>();
    let s = thread(&refs);
    let list = SharedAggregator::<Comments>::new(POST, config(7, u32::MAX));
    list.load_initial(&s).await.unwrap();
    while list.on_viewport_end_reached(&s).await.unwrap() != Outcome::Exhausted {}

    let snapshot = list.snapshot();
    assert_eq!(snapshot.items.len(), 60);
    assert_eq!(snapshot.view.depth_first().count(), 60);
    for (depth, node) in snapshot.view.depth_first() {
        assert_eq!(depth + 1, node.comment.comment.path.depth());
    }
}
