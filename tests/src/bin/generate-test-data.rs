use chrono::Duration;
use rand::Rng;
use threadline_client::api::{
    CommentAggregates, CommentId, CommentPath, CommentView, Person, PersonId, PostId, PostView,
    Time,
};
use threadline_mock_server::Fixture;

const POST_ID: i32 = 1;
const POST_TITLE_WORDS: usize = 8;

const NUM_USERS: i32 = 12;
const NUM_COMMENTS: i32 = 300;
const MAX_DEPTH: usize = 12;
const COMMENT_WORD_COUNT: usize = 30;

/// Chance for a comment to reply to the previous one rather than to a random
/// earlier one, which makes for deep chains
const CHAIN_PROBABILITY: f64 = 0.4;
const TOP_LEVEL_PROBABILITY: f64 = 0.15;

fn gen_person(rng: &mut impl Rng) -> Person {
    let id = rng.gen_range(1..=NUM_USERS);
    Person {
        id: PersonId(id),
        name: format!("user{id}"),
        display_name: rng
            .gen_bool(0.5)
            .then(|| lipsum::lipsum_words(2)),
        ..Person::stub()
    }
}

fn gen_path(rng: &mut impl Rng, paths: &[CommentPath], id: CommentId) -> CommentPath {
    let parent = match paths.last() {
        None => None,
        Some(_) if rng.gen_bool(TOP_LEVEL_PROBABILITY) => None,
        Some(last) if rng.gen_bool(CHAIN_PROBABILITY) => Some(last),
        Some(_) => Some(&paths[rng.gen_range(0..paths.len())]),
    };
    match parent {
        Some(p) if p.depth() < MAX_DEPTH => p.child(id),
        _ => CommentPath::new(vec![id]),
    }
}

fn main() -> anyhow::Result<()> {
    let mut rng = rand::thread_rng();
    let now: Time = chrono::Utc::now().naive_utc();

    let mut post = PostView::stub(PostId(POST_ID));
    post.post.name = lipsum::lipsum_words(POST_TITLE_WORDS);
    post.post.body = Some(lipsum::lipsum(COMMENT_WORD_COUNT * 3));
    post.post.published = now - Duration::hours(rng.gen_range(1..48));
    post.creator = gen_person(&mut rng);
    post.counts.comments = i64::from(NUM_COMMENTS);

    let mut paths = Vec::new();
    let mut comments = Vec::new();
    for i in 1..=NUM_COMMENTS {
        let path = gen_path(&mut rng, &paths, CommentId(i));
        paths.push(path.clone());
        let mut c = CommentView::stub(&path.ids().iter().map(|id| id.0).collect::<Vec<_>>());
        c.comment.post_id = PostId(POST_ID);
        c.comment.content = lipsum::lipsum_words(rng.gen_range(3..COMMENT_WORD_COUNT));
        c.comment.published = now - Duration::minutes(rng.gen_range(0..60 * 24));
        c.creator = gen_person(&mut rng);
        c.comment.creator_id = c.creator.id;
        let upvotes = rng.gen_range(0..100);
        let downvotes = rng.gen_range(0..20);
        c.counts = CommentAggregates {
            score: upvotes - downvotes,
            upvotes,
            downvotes,
            child_count: 0,
        };
        comments.push(c);
    }
    for p in &paths {
        for ancestor in p.ancestors() {
            comments[ancestor.0 as usize - 1].counts.child_count += 1;
        }
    }

    let fixture = Fixture { post, comments };
    println!("{}", serde_json::to_string_pretty(&fixture)?);
    Ok(())
}
