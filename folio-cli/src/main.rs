mod render;
mod session;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use folio_common::BookId;
use folio_core::views::{BookDetailView, WishlistView};
use folio_core::{
    Config, FileStore, GutendexClient, ListingController, PageCache, RecordLookup, RemoteCatalog,
    WishlistStore,
};
use tracing::{error, info};

/// folio: browse the Project Gutenberg catalog and keep a wishlist.
#[derive(Parser)]
#[command(name = "folio")]
struct Args {
    /// Catalog endpoint, e.g. https://gutendex.com/books
    #[arg(long, global = true, env = "FOLIO_API_BASE_URL")]
    api_url: Option<String>,

    /// Directory holding storage.json (the wishlist lives there).
    #[arg(long, global = true, env = "FOLIO_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of the catalog.
    Browse {
        #[arg(long, default_value = "1")]
        page: u32,

        /// Case-insensitive title filter over the loaded page.
        #[arg(long)]
        search: Option<String>,

        /// Exact subject to filter by.
        #[arg(long)]
        genre: Option<String>,

        /// Print the genres present on the page instead of the cards.
        #[arg(long)]
        genres: bool,

        /// Keep reading navigation commands from stdin.
        #[arg(long, short)]
        interactive: bool,
    },
    /// Show one book.
    Book {
        id: BookId,

        /// Add the book to the wishlist after showing it.
        #[arg(long)]
        add: bool,
    },
    /// Show or edit the wishlist.
    Wishlist {
        #[command(subcommand)]
        action: Option<WishlistAction>,
    },
    /// Print the effective configuration, optionally writing it to the config file.
    Config {
        #[arg(long)]
        save: bool,
    },
}

#[derive(Subcommand)]
enum WishlistAction {
    Show,
    Remove { id: BookId },
    Toggle { id: BookId },
}

fn configure_logging() {
    use tracing_subscriber::prelude::*;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_line_number(true)
        .with_target(false)
        .with_file(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn load_config(args: &Args) -> Config {
    let mut config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load config: {e}");
        std::process::exit(1);
    });
    if let Some(url) = &args.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    config
}

fn open_wishlist(config: &Config) -> WishlistStore {
    let storage = Arc::new(FileStore::new(config.storage_path()));
    WishlistStore::with_key(storage, config.wishlist_key.clone())
}

#[tokio::main]
async fn main() {
    configure_logging();
    let args = Args::parse();
    let config = load_config(&args);

    info!("Using catalog at {}", config.api_base_url);
    let catalog: Arc<dyn RemoteCatalog> =
        Arc::new(GutendexClient::from_config(&config).unwrap_or_else(|e| {
            error!("Failed to create catalog client: {e}");
            std::process::exit(1);
        }));

    match args.command {
        Command::Browse {
            page,
            search,
            genre,
            genres,
            interactive,
        } => {
            let listing = ListingController::new(PageCache::new(catalog));
            let mut wishlist = open_wishlist(&config);

            if let Err(e) = listing.load_page(page).await {
                error!("Failed to load page {page}: {e}");
                if !interactive {
                    println!("{}", render::LOAD_FAILED);
                    std::process::exit(1);
                }
            }
            if search.is_some() || genre.is_some() {
                listing.apply_filter(search.as_deref().unwrap_or(""), genre.as_deref());
            }

            if interactive {
                session::run(&listing, &mut wishlist).await;
            } else if genres {
                println!("{}", render::format_genres(&listing.derive_genres()));
            } else {
                println!("{}", render::format_listing(&listing.snapshot(), &wishlist));
            }
        }
        Command::Book { id, add } => {
            let lookup = Arc::new(RecordLookup::new(catalog));
            let mut view = BookDetailView::new(lookup, open_wishlist(&config));
            let outcome = view.open(id).await;
            println!("{}", render::format_detail(&outcome));
            if matches!(outcome, folio_core::views::DetailOutcome::Failed(_)) {
                std::process::exit(1);
            }
            if add {
                match view.add_to_wishlist(id) {
                    Ok(added) => println!("{}", added.message()),
                    Err(e) => {
                        error!("Failed to update wishlist: {e}");
                        std::process::exit(1);
                    }
                }
            }
        }
        Command::Wishlist { action } => {
            let lookup = Arc::new(RecordLookup::new(catalog));
            let mut view = WishlistView::new(lookup, open_wishlist(&config));
            let outcome = match action.unwrap_or(WishlistAction::Show) {
                WishlistAction::Show => view.refresh().await,
                WishlistAction::Remove { id } => {
                    view.remove(id).await.unwrap_or_else(|e| {
                        error!("Failed to update wishlist: {e}");
                        std::process::exit(1);
                    })
                }
                WishlistAction::Toggle { id } => {
                    let (member, outcome) = view.toggle(id).await.unwrap_or_else(|e| {
                        error!("Failed to update wishlist: {e}");
                        std::process::exit(1);
                    });
                    println!("{} {}", id, render::wishlist_label(member));
                    outcome
                }
            };
            println!("Wishlist ({})", view.wishlist().count());
            println!("{}", render::format_wishlist(&outcome));
        }
        Command::Config { save } => {
            println!("api_base_url: {}", config.api_base_url);
            println!("data_dir: {}", config.data_dir.display());
            println!("wishlist_key: {}", config.wishlist_key);
            println!("request_timeout_secs: {}", config.request_timeout_secs);
            println!("user_agent: {}", config.user_agent);
            if save {
                let Some(path) = Config::config_path() else {
                    error!("No config directory on this platform");
                    std::process::exit(1);
                };
                config.save_to_config_yaml(&path).unwrap_or_else(|e| {
                    error!("Failed to write {}: {e}", path.display());
                    std::process::exit(1);
                });
                println!("Saved to {}", path.display());
            }
        }
    }
}
