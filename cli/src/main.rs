mod render;
mod settings;
mod transport;

use std::time::Duration;

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use inventory_core::{
    AddBookForm, ApiError, BookEditor, BooksPage, Dashboard, DetailsCache, InventoryClient,
    MemorySessionStore, NewTodo, Outcome, TodoList,
};

use crate::settings::Settings;
use crate::transport::Transport;

#[derive(Parser)]
#[command(name = "inventory", version, about = "Book inventory dashboard")]
struct Cli {
    /// Backend base URL; overrides `api.base_url` from configuration.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Browse and manage books.
    #[command(subcommand)]
    Books(BooksCommand),
    /// Inventory status, total inventory and financial overview.
    Summary,
    /// The to-do list.
    #[command(subcommand)]
    Todos(TodosCommand),
}

#[derive(Subcommand)]
enum BooksCommand {
    /// List books, loading pages the way scrolling would.
    List {
        #[arg(long)]
        pages: Option<u32>,
    },
    /// Find books by exact ISBN.
    Search { isbn: String },
    /// Books sold in the given month.
    SoldIn { year: i32, month: u32 },
    /// Add a book to inventory.
    Add {
        isbn: String,
        #[arg(long, default_value_t = 0.0)]
        cogs: f64,
        /// Purchase date (YYYY-MM-DD).
        #[arg(long)]
        purchased: Option<NaiveDate>,
    },
    /// Edit a book; profit is recomputed from cogs and payout.
    Edit {
        id: String,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        cogs: Option<f64>,
        #[arg(long)]
        payout: Option<f64>,
        /// Sale date (YYYY-MM-DD).
        #[arg(long, conflicts_with = "unsold")]
        sold: Option<NaiveDate>,
        /// Put the book back into inventory.
        #[arg(long)]
        unsold: bool,
        #[arg(long)]
        purchased: Option<NaiveDate>,
    },
    /// Delete a book.
    Delete { id: String },
    /// Look up title and cover image for an ISBN.
    Details { isbn: String },
}

#[derive(Subcommand)]
enum TodosCommand {
    List,
    Add {
        title: String,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::try_init().ok();

    let cli = Cli::parse();
    let settings = Settings::load().with_context(|| "failed to load settings")?;
    let base_url = cli.base_url.unwrap_or(settings.api.base_url);
    let client = InventoryClient::new(&base_url);
    let transport = Transport::new(Duration::from_millis(settings.api.timeout_ms));

    match cli.command {
        Command::Books(cmd) => books(cmd, client, &transport, settings.ui.pages),
        Command::Summary => summary(client, &transport),
        Command::Todos(cmd) => todos(cmd, client, &transport),
    }
}

fn books(
    cmd: BooksCommand,
    client: InventoryClient,
    transport: &Transport,
    default_pages: u32,
) -> anyhow::Result<()> {
    let cache = DetailsCache::new(client.clone(), MemorySessionStore::new());
    let mut page = BooksPage::new(client.clone(), cache);

    match cmd {
        BooksCommand::List { pages } => {
            let pages = pages.unwrap_or(default_pages).max(1);
            let mut next = page.mount();
            let mut loaded = 0;
            while let Some(out) = next {
                let (ticket, result) = transport.run(out);
                if let Outcome::Failed(err) = page.complete(ticket, result) {
                    bail!("failed to load books: {err}");
                }
                loaded += 1;
                if loaded >= pages {
                    break;
                }
                next = page.on_scroll(true);
            }
            println!("{}", render::books(page.rendered()));
            if page.cursor().has_more() {
                println!("more available; pass --pages {}", loaded + 1);
            }
        }
        BooksCommand::Search { isbn } => {
            let Some(out) = page.search(&isbn) else {
                println!("enter an ISBN to search");
                return Ok(());
            };
            let (ticket, result) = transport.run(out);
            match page.complete(ticket, result) {
                Outcome::Failed(ApiError::NotFound) => println!("no book with ISBN {isbn}"),
                Outcome::Failed(err) => eprintln!("warning: search failed: {err}"),
                _ => println!("{}", render::books(page.displayed())),
            }
        }
        BooksCommand::SoldIn { year, month } => {
            let out = page.filter_by_month(year, month)?;
            let (ticket, result) = transport.run(out);
            if let Outcome::Failed(err) = page.complete(ticket, result) {
                eprintln!("warning: filter failed: {err}");
            }
            println!("{}", render::books(page.displayed()));
        }
        BooksCommand::Add {
            isbn,
            cogs,
            purchased,
        } => {
            let mut form = AddBookForm::new();
            form.set_isbn(&isbn);
            form.cogs = cogs;
            form.date_purchased = purchased;
            let out = page.create_book(&form.submit()?)?;
            let (ticket, result) = transport.run(out);
            if let Outcome::Failed(err) = page.complete(ticket, result) {
                bail!("failed to add book: {err}");
            }
            println!("{}", render::books(page.canonical()));
        }
        BooksCommand::Edit {
            id,
            isbn,
            cogs,
            payout,
            sold,
            unsold,
            purchased,
        } => {
            let current = client
                .parse_get_book(transport.execute(client.build_get_book(&id))?)
                .with_context(|| format!("failed to fetch book {id}"))?;
            let mut editor = BookEditor::new(current);
            if let Some(isbn) = isbn {
                editor.set_isbn(&isbn);
            }
            if cogs.is_some() {
                editor.set_cogs(cogs);
            }
            if payout.is_some() {
                editor.set_payout(payout);
            }
            if sold.is_some() {
                editor.set_sold(sold);
            } else if unsold {
                editor.set_sold(None);
            }
            if purchased.is_some() {
                editor.set_date_purchased(purchased);
            }

            let out = page.update_book(editor.finish())?;
            let (ticket, result) = transport.run(out);
            if let Outcome::Failed(err) = page.complete(ticket, result) {
                bail!("failed to update book {id}: {err}");
            }
            let saved = client.parse_get_book(transport.execute(client.build_get_book(&id))?)?;
            println!("{}", render::books(&[saved]));
        }
        BooksCommand::Delete { id } => {
            let out = page.delete_book(&id);
            let (ticket, result) = transport.run(out);
            if let Outcome::Failed(err) = page.complete(ticket, result) {
                bail!("failed to delete book {id}: {err}");
            }
            println!("deleted {id}");
        }
        BooksCommand::Details { isbn } => {
            if let Some(out) = page.view_details(&isbn) {
                let (ticket, result) = transport.run(out);
                if let Outcome::Failed(err) = page.complete(ticket, result) {
                    bail!("failed to fetch details for {isbn}: {err}");
                }
            }
            match &page.details_modal().details {
                Some(details) => println!("{}", render::details(&isbn, details)),
                None => println!("no details for {isbn}"),
            }
        }
    }

    page.unmount();
    Ok(())
}

fn summary(client: InventoryClient, transport: &Transport) -> anyhow::Result<()> {
    let mut dashboard = Dashboard::new(client);
    for out in dashboard.refresh() {
        let (ticket, result) = transport.run(out);
        if let Outcome::Failed(err) = dashboard.complete(ticket, result) {
            eprintln!("warning: {err}");
        }
    }
    println!("{}", render::summary(&dashboard));
    Ok(())
}

fn todos(cmd: TodosCommand, client: InventoryClient, transport: &Transport) -> anyhow::Result<()> {
    let mut list = TodoList::new(client);
    let (ticket, result) = transport.run(list.load());
    if let Outcome::Failed(err) = list.complete(ticket, result) {
        bail!("failed to load todos: {err}");
    }

    let out = match cmd {
        TodosCommand::List => None,
        TodosCommand::Add { title, description } => {
            Some(list.add(&NewTodo { title, description })?)
        }
        TodosCommand::Delete { id } => Some(list.delete(&id)),
    };
    if let Some(out) = out {
        let (ticket, result) = transport.run(out);
        if let Outcome::Failed(err) = list.complete(ticket, result) {
            bail!("todo request failed: {err}");
        }
    }
    println!("{}", render::todos(list.todos()));
    Ok(())
}
