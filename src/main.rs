//! Pokedex - Browse and filter the Pokémon catalog from the terminal
//!
//! This is the main entry point for the `pokedex` command.

mod render;
mod settings;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pokedex_api::{Catalog, PokeApiClient};
use pokedex_core::{CategoryKind, FilterCriteria};
use pokedex_filter::{DetailView, FilterEngine, FilterStore, ListController, ListView, SearchDebouncer};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use settings::Settings;

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse and filter the Pokémon catalog")]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one browse page
    Page {
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },

    /// Show a single Pokémon by number or name
    Show { id_or_name: String },

    /// Combine filters and list every match
    Filter {
        /// Name fragment, or a number for a direct lookup
        #[arg(short, long)]
        search: Option<String>,

        #[arg(short = 't', long = "type")]
        types: Vec<String>,

        #[arg(short, long = "generation")]
        generations: Vec<String>,

        #[arg(short, long = "ability")]
        abilities: Vec<String>,

        /// Keep Pokémon weak to any of these types
        #[arg(short, long = "weakness")]
        weaknesses: Vec<String>,
    },

    /// List the available filter choices
    Categories,

    /// Read search edits from stdin and redraw the list as filters change
    Interactive,

    /// Write the effective settings to the user config directory
    SaveSettings,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    match cli.command {
        Commands::Page { page } => {
            let (_, engine) = connect(&settings)?;
            let combination = engine
                .combine(&FilterCriteria::default(), page)
                .await
                .context("Failed to load the page")?;
            let mut view = ListView::new(engine.page_size());
            view.show(1, page, combination);
            print!("{}", render::list_view(&view));
        }
        Commands::Show { id_or_name } => {
            let (catalog, _) = connect(&settings)?;
            match DetailView::load(&catalog, &id_or_name).await {
                Ok(view) => print!("{}", render::detail_view(&view)),
                Err(err) => anyhow::bail!("{}: {}", DetailView::error_message(&err), err),
            }
        }
        Commands::Filter {
            search,
            types,
            generations,
            abilities,
            weaknesses,
        } => {
            let (_, engine) = connect(&settings)?;
            let criteria = FilterCriteria::search(search.unwrap_or_default())
                .with_category(CategoryKind::Type, types)
                .with_category(CategoryKind::Generation, generations)
                .with_category(CategoryKind::Ability, abilities)
                .with_weaknesses(weaknesses);
            let controller = ListController::new(engine, &settings.list);
            controller.apply(criteria).finished().await;
            print!("{}", render::list_view(&controller.snapshot()));
            controller.shutdown();
        }
        Commands::Categories => {
            let (_, engine) = connect(&settings)?;
            let options = engine
                .filter_options()
                .await
                .context("Failed to load filter choices")?;
            print!("{}", render::filter_options(&options));
        }
        Commands::Interactive => {
            let (_, engine) = connect(&settings)?;
            interactive(engine, &settings).await?;
        }
        Commands::SaveSettings => {
            let path = settings.save().context("Failed to save settings")?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

/// Build the shared catalog and an engine over it
fn connect(settings: &Settings) -> Result<(Arc<Catalog>, FilterEngine)> {
    info!("Using catalog at {}", settings.api.base_url);
    let client = PokeApiClient::new(settings.api.clone()).context("Failed to build HTTP client")?;
    let catalog = Arc::new(Catalog::new(Arc::new(client)));
    let engine = FilterEngine::new(Arc::clone(&catalog), settings.list.page_size);
    Ok((catalog, engine))
}

/// Line-oriented front end over the filter store.
///
/// Plain lines edit the search term through the debouncer. Commands:
/// `:type`, `:gen`, `:ability` (any category name) and `:weak` toggle a value,
/// `:next` / `:prev` page, `:reset` clears everything, `:quit` exits.
async fn interactive(engine: FilterEngine, settings: &Settings) -> Result<()> {
    let store = FilterStore::new();
    let controller = ListController::new(engine, &settings.list);
    let mut commits = controller.commits();
    let mut settled = controller.commits();
    controller.follow(&store);

    let (edits, rx) = mpsc::channel(32);
    let debouncer = SearchDebouncer::new(settings.list.debounce_window()).spawn(rx, store.clone());

    let printed = Arc::new(AtomicU64::new(0));
    let printer = {
        let controller = controller.clone();
        let printed = Arc::clone(&printed);
        tokio::spawn(async move {
            while commits.changed().await.is_ok() {
                let view = controller.snapshot();
                printed.store(view.generation, Ordering::SeqCst);
                print!("{}", render::list_view(&view));
            }
        })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };
        match command {
            ":quit" | ":q" => break,
            ":reset" => store.reset(),
            ":next" => {
                controller.next_page();
            }
            ":prev" => {
                controller.previous_page();
            }
            ":weak" => store.update(|c| toggle(&mut c.weaknesses, arg)),
            _ => match command.strip_prefix(':').map(str::parse::<CategoryKind>) {
                Some(Ok(kind)) => store.update(|c| toggle(c.category_mut(kind), arg)),
                Some(Err(err)) => warn!("{}", err),
                None => edits.send(line.to_string()).await.context("Search input closed")?,
            },
        }
    }

    drop(edits);
    let applied = debouncer.await.context("Search debouncer panicked")?;
    info!("Applied {} search edits", applied);

    // let the follower pick up a flushed edit, then wait for its pass to commit
    tokio::task::yield_now().await;
    while controller.snapshot().is_loading {
        if settled.changed().await.is_err() {
            break;
        }
    }
    controller.shutdown();
    printer.abort();
    let _ = printer.await;

    let view = controller.snapshot();
    if view.generation != printed.load(Ordering::SeqCst) {
        print!("{}", render::list_view(&view));
    }
    Ok(())
}

fn toggle(set: &mut BTreeSet<String>, name: &str) {
    let name = name.trim().to_lowercase();
    if name.is_empty() {
        return;
    }
    if !set.remove(&name) {
        set.insert(name);
    }
}
