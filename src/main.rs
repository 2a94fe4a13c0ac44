use anyhow::bail;
use clap::Parser;
use dashboard::markup::{self, plain_text, Block};
use dashboard::{Dashboard, DashboardView, Notification};
use std::path::PathBuf;
use themetracer_core::{AppConfig, ErrorExt, SearchQuery};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "themetracer=info,reddit_client=info,dashboard=info";

/// Sentiment and theme analysis over Reddit posts.
#[derive(Debug, Parser)]
#[command(name = "themetracer", version, about)]
struct Args {
    /// Keyword to search for, or a subreddit name with --subreddit
    query: String,

    /// Treat the query as a subreddit ("r/" prefix optional)
    #[arg(short, long)]
    subreddit: bool,

    /// Business idea to frame the insights around
    #[arg(short, long)]
    idea: Option<String>,

    /// Use generated posts instead of the live Reddit listings
    #[arg(long)]
    simulated: bool,

    /// Number of pages to fetch
    #[arg(short, long, default_value_t = 1)]
    pages: u32,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let args = Args::parse();
    if args.pages == 0 {
        bail!("--pages must be at least 1");
    }

    let mut config = AppConfig::load(args.config.as_deref()).map_err(|e| {
        let summary = format!("{} [{}]", e.user_friendly_message(), e.error_code());
        anyhow::Error::new(e).context(summary)
    })?;
    if args.simulated {
        config.source.use_live_source = false;
    }

    tracing::info!(
        "Starting ThemeTracer ({} source)",
        if config.source.use_live_source { "live" } else { "simulated" }
    );

    let mut dashboard = Dashboard::new(config.source);
    dashboard.set_seed_idea(args.idea);

    let query = if args.subreddit {
        SearchQuery::subreddit(args.query)
    } else {
        SearchQuery::keyword(args.query)
    };

    dashboard.search(query).await;
    print_notifications(&dashboard.take_notifications());

    for _ in 1..args.pages {
        if !dashboard.has_more() {
            break;
        }
        dashboard.load_more().await;
        print_notifications(&dashboard.take_notifications());
    }

    render(&dashboard.view());
    Ok(())
}

fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        eprintln!("[{}] {}", notification.title, notification.description);
    }
}

fn render(view: &DashboardView) {
    let Some(label) = &view.results_label else {
        println!("No posts found.");
        if !view.insights.is_empty() {
            println!();
            render_markup(&view.insights);
        }
        return;
    };

    println!("{label}\n");

    println!("Sentiment");
    for slice in &view.sentiment_chart {
        println!("  {:<9} {:>4} ({}%)", slice.label, slice.value, slice.percent);
    }

    println!("\nWord cloud");
    let words: Vec<String> = view
        .word_cloud
        .iter()
        .map(|w| format!("{} ({}, {})", w.text, w.frequency, w.sentiment))
        .collect();
    println!("  {}", words.join(", "));

    println!("\nInsights");
    render_markup(&view.insights);

    println!("\nPosts");
    for post in &view.posts {
        println!(
            "  [{}] r/{} - {} ({} upvotes, {} comments)",
            post.sentiment(),
            post.subreddit(),
            post.title(),
            post.upvotes(),
            post.comment_count()
        );
        println!("      {}", post.url());
    }
}

fn render_markup(text: &str) {
    for block in markup::parse(text) {
        match block {
            Block::Heading(spans) => println!("\n{}", plain_text(&spans).to_uppercase()),
            Block::Paragraph(spans) => println!("{}\n", plain_text(&spans)),
            Block::Bullets(items) => {
                for item in items {
                    println!("  * {}", plain_text(&item));
                }
                println!();
            }
        }
    }
}
