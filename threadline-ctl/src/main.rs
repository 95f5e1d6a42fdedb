use anyhow::Context;
use threadline_client::{
    api::{CommentSortType, PostId, SortType},
    ClientConfig, Comments, HttpClient, Listing, ListingConfig, Outcome, PostListing, Posts,
    SharedAggregator, Source,
};

#[derive(structopt::StructOpt)]
struct Opt {
    /// eg. https://lemmy.ml
    #[structopt(short, long)]
    host: String,

    /// Records per page
    #[structopt(long, default_value = "10")]
    limit: u32,

    /// Post sort: Active, Hot, New, Old, TopDay, ...
    #[structopt(long, default_value = "Hot")]
    sort: SortType,

    /// Comment sort: Hot, Top, New, Old
    #[structopt(long, default_value = "Hot")]
    comment_sort: CommentSortType,

    #[structopt(long, default_value = "8")]
    max_depth: u32,

    #[structopt(subcommand)]
    cmd: Command,
}

#[derive(structopt::StructOpt)]
enum Command {
    /// List posts, instance-wide or of one community
    Posts {
        #[structopt(short, long)]
        community: Option<String>,

        /// Number of pages to load
        #[structopt(short, long, default_value = "1")]
        pages: u32,
    },

    /// Show the comment thread of a post
    Comments {
        post_id: i32,

        /// Number of pages to load
        #[structopt(short, long, default_value = "1")]
        pages: u32,
    },

    /// Search communities by name
    Search { q: String },
}

fn jwt() -> Option<String> {
    std::env::var("THREADLINE_JWT").ok()
}

/// Loads up to `pages` pages, stopping early once the list is exhausted
async fn load<L, S>(list: &SharedAggregator<L>, source: &S, pages: u32) -> anyhow::Result<()>
where
    L: Listing,
    S: Source<L>,
{
    let mut outcome = list
        .load_initial(source)
        .await
        .context("loading first page")?;
    tracing::debug!(?outcome, "loaded first page");
    for page in 1..pages {
        if outcome == Outcome::Exhausted {
            tracing::info!(pages_loaded = page, "list exhausted before requested page count");
            break;
        }
        outcome = list
            .on_viewport_end_reached(source)
            .await
            .with_context(|| format!("loading page {}", page + 1))?;
        tracing::debug!(page = page + 1, ?outcome, "loaded page");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let opt = <Opt as structopt::StructOpt>::from_args();

    let client = HttpClient::new(ClientConfig {
        auth: jwt(),
        ..ClientConfig::new(opt.host)
    })
    .context("building http client")?;
    let config = ListingConfig {
        limit: opt.limit,
        sort: opt.sort,
        comment_sort: opt.comment_sort,
        max_depth: opt.max_depth,
        ..ListingConfig::default()
    };

    match opt.cmd {
        Command::Posts { community, pages } => {
            let listing = PostListing { community };
            let list = SharedAggregator::<Posts>::new(listing, config);
            load(&list, &client, pages).await?;
            for p in list.snapshot().items {
                println!(
                    "[{:>5}] {} ({} comments, in {})",
                    p.counts.score, p.post.name, p.counts.comments, p.community.name
                );
            }
        }
        Command::Comments { post_id, pages } => {
            let post = client
                .get_post(PostId(post_id))
                .await
                .with_context(|| format!("fetching post {post_id}"))?;
            println!("{}\n", post.post.name);
            let list = SharedAggregator::<Comments>::new(PostId(post_id), config);
            load(&list, &client, pages).await?;
            let snapshot = list.snapshot();
            if snapshot.items.is_empty() {
                println!("No comments");
            }
            for (depth, node) in snapshot.view.depth_first() {
                let c = &node.comment;
                println!(
                    "{:indent$}{} ({}, {} replies): {}",
                    "",
                    c.creator.shown_name(),
                    c.counts.score,
                    node.descendant_count,
                    c.comment.content,
                    indent = depth * 2
                );
            }
        }
        Command::Search { q } => {
            let communities = client
                .search_communities(&q)
                .await
                .context("searching communities")?;
            for c in communities {
                println!(
                    "{} ({} subscribers): {}",
                    c.community.name, c.counts.subscribers, c.community.title
                );
            }
        }
    }

    Ok(())
}
