//! Interactive browse session: one listing controller driven from stdin, so
//! revisiting a page is served from the page cache.

use std::io::Write;
use std::str::FromStr;

use folio_common::BookId;
use folio_core::{ListingController, ListingError, WishlistStore};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};

use crate::render;

const HELP: &str = "\
commands:
  next | prev        move one page
  page N             jump to page N
  search TEXT        filter titles (empty TEXT clears)
  genre NAME         filter by genre (no NAME = all genres)
  clear              drop both filters
  genres             list genres on this page
  wish ID            toggle a book in the wishlist
  help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Next,
    Prev,
    Page(u32),
    Search(String),
    Genre(Option<String>),
    Clear,
    Genres,
    Wish(BookId),
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        match word {
            "next" | "n" => Ok(SessionCommand::Next),
            "prev" | "p" => Ok(SessionCommand::Prev),
            "page" => rest
                .parse()
                .map(SessionCommand::Page)
                .map_err(|_| format!("not a page number: {rest:?}")),
            "search" | "s" => Ok(SessionCommand::Search(rest.to_string())),
            "genre" | "g" => Ok(SessionCommand::Genre(
                (!rest.is_empty()).then(|| rest.to_string()),
            )),
            "clear" => Ok(SessionCommand::Clear),
            "genres" => Ok(SessionCommand::Genres),
            "wish" | "w" => rest
                .parse()
                .map(SessionCommand::Wish)
                .map_err(|_| format!("not a book id: {rest:?}")),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "q" | "exit" => Ok(SessionCommand::Quit),
            other => Err(format!("unknown command: {other:?} (try help)")),
        }
    }
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

fn report(err: &ListingError) {
    match err {
        ListingError::Fetch(_) => {}
        other => println!("{other}"),
    }
}

pub async fn run(listing: &ListingController, wishlist: &mut WishlistStore) {
    println!("{}", render::format_listing(&listing.snapshot(), wishlist));
    println!("{HELP}");
    prompt();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };
        if line.trim().is_empty() {
            prompt();
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(msg) => {
                println!("{msg}");
                prompt();
                continue;
            }
        };

        match command {
            SessionCommand::Quit => break,
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Genres => {
                println!("{}", render::format_genres(&listing.derive_genres()))
            }
            SessionCommand::Wish(id) => {
                wishlist.load();
                match wishlist.toggle(id) {
                    Ok(member) => println!(
                        "{} {} - Wishlist ({})",
                        id,
                        render::wishlist_label(member),
                        wishlist.count()
                    ),
                    Err(e) => warn!("Could not update wishlist: {}", e),
                }
            }
            navigation => {
                let result = match navigation {
                    SessionCommand::Next => listing.go_next().await,
                    SessionCommand::Prev => listing.go_prev().await,
                    SessionCommand::Page(n) => listing.load_page(n).await,
                    SessionCommand::Search(text) => {
                        let genre = listing.snapshot().filter.genre;
                        listing.apply_filter(&text, genre.as_deref());
                        Ok(())
                    }
                    SessionCommand::Genre(genre) => {
                        let text = listing.snapshot().filter.text;
                        listing.apply_filter(&text, genre.as_deref());
                        Ok(())
                    }
                    SessionCommand::Clear => {
                        listing.apply_filter("", None);
                        Ok(())
                    }
                    _ => Ok(()),
                };
                if let Err(e) = &result {
                    report(e);
                }
                println!("{}", render::format_listing(&listing.snapshot(), wishlist));
            }
        }
        prompt();
    }
}
