//! Command-line front end for the contact book.
//!
//! # Responsibility
//! - Collect input, confirm destructive actions and print user-facing messages.
//! - Keep all storage behavior inside `contactbook_core`.

mod render;

use clap::{Parser, Subcommand};
use contactbook_core::{
    init_logging, Contact, ContactDraft, ContactId, ContactListQuery, ContactStore, StoreConfig,
    StoreError,
};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "contactbook", version, about = "Local contact book")]
struct Cli {
    /// SQLite database file (overrides CONTACTBOOK_DB_PATH).
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Absolute directory for rolling log files (overrides CONTACTBOOK_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error (overrides CONTACTBOOK_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List contacts, optionally filtered by a search text.
    List {
        query: Option<String>,
        #[arg(long)]
        json: bool,
        /// Maximum number of contacts to print.
        #[arg(long)]
        limit: Option<u32>,
        /// Number of contacts to skip.
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Show one contact.
    Show {
        id: ContactId,
        #[arg(long)]
        json: bool,
    },
    /// Add a new contact.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        address: String,
    },
    /// Edit an existing contact; omitted fields keep their current value.
    Edit {
        id: ContactId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        address: Option<String>,
    },
    /// Delete a contact after confirmation.
    Delete {
        id: ContactId,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// Print the number of stored contacts.
    Count,
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = resolve_config(&cli)?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir)?;
    }

    let store = ContactStore::open(&config.db_path).map_err(|err| user_message(&err))?;
    store.initialize().map_err(|err| user_message(&err))?;
    info!(
        "event=cli_start module=cli status=ok command={}",
        command_name(&cli.command)
    );

    match cli.command {
        Command::List {
            query,
            json,
            limit,
            offset,
        } => {
            let contacts = match page_query(query.as_deref(), limit, offset) {
                Some(page) => store.list_page(&page),
                None => store.list(query.as_deref()),
            }
            .map_err(|err| user_message(&err))?;
            print_contacts(&contacts, json)
        }
        Command::Show { id, json } => {
            let contact = load_contact(&store, id)?;
            print_contacts(&[contact], json)
        }
        Command::Add {
            name,
            phone,
            email,
            address,
        } => {
            let draft = ContactDraft::new(name.trim(), phone.trim(), email.trim(), address.trim());
            store.add(draft).map_err(|err| user_message(&err))?;
            println!("Contact added successfully");
            Ok(())
        }
        Command::Edit {
            id,
            name,
            phone,
            email,
            address,
        } => {
            let current = load_contact(&store, id)?;
            let draft = merge_edit(current.to_draft(), name, phone, email, address);
            store.update(id, draft).map_err(|err| user_message(&err))?;
            println!("Contact updated successfully");
            Ok(())
        }
        Command::Delete { id, yes } => {
            let contact = load_contact(&store, id)?;
            if !yes && !confirm(&format!("Are you sure you want to delete {}?", contact.name))? {
                println!("Delete cancelled");
                return Ok(());
            }
            store.delete(id).map_err(|err| user_message(&err))?;
            println!("Contact deleted successfully");
            Ok(())
        }
        Command::Count => {
            let count = store.count().map_err(|err| user_message(&err))?;
            println!("{count}");
            Ok(())
        }
    }
}

fn resolve_config(cli: &Cli) -> Result<StoreConfig, String> {
    let mut config = StoreConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(db) = &cli.db {
        config.db_path = db.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    Ok(config)
}

/// Returns a paged query only when `--limit` or `--offset` was given.
fn page_query(query: Option<&str>, limit: Option<u32>, offset: u32) -> Option<ContactListQuery> {
    if limit.is_none() && offset == 0 {
        return None;
    }
    Some(ContactListQuery {
        filter: query.map(str::to_owned),
        limit,
        offset,
    })
}

fn load_contact(store: &ContactStore, id: ContactId) -> Result<Contact, String> {
    store
        .get(id)
        .map_err(|err| user_message(&err))?
        .ok_or_else(|| user_message(&StoreError::NotFound(id)))
}

fn merge_edit(
    mut draft: ContactDraft,
    name: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    address: Option<String>,
) -> ContactDraft {
    let trimmed = |value: String| value.trim().to_string();
    if let Some(name) = name {
        draft.name = trimmed(name);
    }
    if let Some(phone) = phone {
        draft.phone = trimmed(phone);
    }
    if let Some(email) = email {
        draft.email = trimmed(email);
    }
    if let Some(address) = address {
        draft.address = trimmed(address);
    }
    draft
}

fn print_contacts(contacts: &[Contact], json: bool) -> Result<(), String> {
    if json {
        println!("{}", render::render_json(contacts)?);
    } else if contacts.is_empty() {
        println!("No contacts found");
    } else {
        print!("{}", render::render_table(contacts));
    }
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool, String> {
    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .map_err(|err| format!("failed to write prompt: {err}"))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|err| format!("failed to read answer: {err}"))?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn user_message(err: &StoreError) -> String {
    match err {
        StoreError::Validation(_) => "Name and Phone are required fields".to_string(),
        StoreError::NotFound(id) => format!("Contact {id} not found"),
        other => format!("Contact book storage error: {other}"),
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::List { .. } => "list",
        Command::Show { .. } => "show",
        Command::Add { .. } => "add",
        Command::Edit { .. } => "edit",
        Command::Delete { .. } => "delete",
        Command::Count => "count",
    }
}
