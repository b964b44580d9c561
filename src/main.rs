//! `linkpath`: find how two wiki articles connect.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use linkpath::logging::init_logging;
use linkpath::{
    Demonstrator, DotRenderer, Explorer, GraphRenderer, JsonRenderer, LinkCheckDemonstrator,
    MediaWikiFetcher, NoReplay, Settings, SearchStatus,
};

#[derive(Debug, Parser)]
#[command(name = "linkpath", version, about = "Find a shortest link path between two wiki articles")]
struct Cli {
    /// Title of the article to start from.
    start: String,

    /// Title of the article to reach.
    end: String,

    /// JSON config file (`{"search": {...}, "mediawiki": {...}}`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// MediaWiki `api.php` endpoint.
    #[arg(long)]
    api_url: Option<String>,

    /// Lookups in flight at once per layer.
    #[arg(long)]
    max_concurrent_fetches: Option<usize>,

    /// Timeout per lookup, in milliseconds.
    #[arg(long)]
    fetch_timeout_ms: Option<u64>,

    /// Depth cap of the bidirectional search.
    #[arg(long)]
    depth_cap: Option<usize>,

    /// Depth cap of the forward-only fallback.
    #[arg(long)]
    fallback_depth_cap: Option<usize>,

    /// Write the explored graph as Graphviz DOT.
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Write the explored graph as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Replay the found path link by link; retry forward-only if it breaks.
    #[arg(long)]
    verify: bool,

    /// Skip the bidirectional search.
    #[arg(long)]
    forward_only: bool,

    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn settings(&self) -> linkpath::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        if let Some(url) = &self.api_url {
            settings.mediawiki.api_url = url.clone();
        }
        let search = &mut settings.search;
        if let Some(n) = self.max_concurrent_fetches {
            search.max_concurrent_fetches = n;
        }
        if let Some(ms) = self.fetch_timeout_ms {
            search.fetch_timeout_ms = ms;
        }
        if let Some(cap) = self.depth_cap {
            search.bidirectional_depth_cap = cap;
        }
        if let Some(cap) = self.fallback_depth_cap {
            search.fallback_depth_cap = cap;
        }
        search.validate()?;
        Ok(settings)
    }

    fn renderers(&self) -> linkpath::Result<Vec<Box<dyn GraphRenderer>>> {
        let mut renderers: Vec<Box<dyn GraphRenderer>> = Vec::new();
        if let Some(path) = &self.dot {
            renderers.push(Box::new(DotRenderer::new(BufWriter::new(File::create(path)?))));
        }
        if let Some(path) = &self.json {
            renderers.push(Box::new(JsonRenderer::new(BufWriter::new(File::create(path)?))));
        }
        Ok(renderers)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(2)
        }
    }
}

/// Returns whether a path was found.
async fn run(cli: &Cli) -> linkpath::Result<bool> {
    let settings = cli.settings()?;
    let fetcher = MediaWikiFetcher::new(settings.mediawiki.clone())?;
    let explorer = Explorer::new(fetcher.clone(), settings.search.clone())?;

    if cli.forward_only {
        let result = explorer.find_path_forward_only(&cli.start, &cli.end).await?;
        let Some(path) = result.path() else {
            println!("No path found ({:?}).", result.status);
            return Ok(false);
        };
        for mut renderer in cli.renderers()? {
            renderer.render(&result.graph, path)?;
        }
        println!("Path found ({} hops, {:.2}s)", path.hops(), result.stats.elapsed.as_secs_f64());
        println!("{path}");
        return Ok(true);
    }

    let demonstrator: Box<dyn Demonstrator> = if cli.verify {
        Box::new(LinkCheckDemonstrator::new(fetcher))
    } else {
        Box::new(NoReplay)
    };
    let mut renderers = cli.renderers()?;
    let exploration = explorer
        .explore(&cli.start, &cli.end, &mut renderers, demonstrator.as_ref())
        .await?;

    for attempt in &exploration.attempts {
        let outcome = match &attempt.status {
            SearchStatus::Found { path } => format!("found {} hops", path.hops()),
            SearchStatus::Exhausted => "exhausted".to_owned(),
            SearchStatus::DepthExceeded { cap } => format!("depth cap {cap} reached"),
        };
        println!(
            "[{}] {outcome} (depth {}, {} lookups, {:.2}s)",
            attempt.strategy,
            attempt.stats.depth,
            attempt.stats.fetches,
            attempt.stats.elapsed.as_secs_f64(),
        );
    }

    match &exploration.path {
        Some(path) => {
            println!("{path}");
            Ok(true)
        }
        None => {
            println!("No path found. Check that both titles exist.");
            Ok(false)
        }
    }
}
