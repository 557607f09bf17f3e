//! `quicknote` command-line front end.
//!
//! # Responsibility
//! - Parse arguments and environment into one command.
//! - Open the SQLite-backed store and run the command through `NoteService`.
//! - Render notes for the terminal with secret content redacted.

mod args;

use args::{parse_args, Command, Invocation, USAGE};
use log::info;
use quicknote_core::{
    default_log_level, init_logging, DeleteOutcome, ImportDecision, ImportOutcome, ImportSummary,
    suggest_tags, Note, NoteService, SqliteKvStore, TagFilter, TagSuggestion, UserPrompt,
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "./quicknote.sqlite3";
const SECRET_PLACEHOLDER: &str = "[secret]";
const PREVIEW_CHARS: usize = 60;

fn main() {
    if let Err(err) = run() {
        eprintln!("quicknote: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let invocation = parse_args(std::env::args().skip(1).collect())?;
    if invocation.command == Command::Help {
        println!("{USAGE}");
        return Ok(());
    }

    setup_logging()?;
    let db_path = resolve_db_path(&invocation);
    let store = SqliteKvStore::open(&db_path)?;
    let mut service = NoteService::new(&store);
    service.load();
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        db_path.display()
    );

    execute(&mut service, invocation.command)
}

fn setup_logging() -> Result<(), Box<dyn Error>> {
    let Ok(log_dir) = std::env::var("QUICKNOTE_LOG_DIR") else {
        return Ok(());
    };
    let level = std::env::var("QUICKNOTE_LOG_LEVEL")
        .unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, &log_dir)?;
    Ok(())
}

fn resolve_db_path(invocation: &Invocation) -> PathBuf {
    invocation
        .db_path
        .clone()
        .or_else(|| std::env::var_os("QUICKNOTE_DB").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
}

fn execute(
    service: &mut NoteService<&SqliteKvStore>,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Add {
            content,
            tags,
            is_secret,
        } => {
            let note = service.create_note(&content, tags, is_secret)?;
            println!("Added {}", note.id);
        }
        Command::Clip { text } => {
            let note = service.add_from_clipboard(&text)?;
            println!("Added {}", note.id);
        }
        Command::List { tags, query } => {
            let mut filter = TagFilter::new();
            for tag in &tags {
                filter.toggle(tag);
            }
            let result = service.search(&filter.to_query(&query));
            if service.notes().is_empty() {
                println!("No notes yet.");
            } else if result.notes().is_empty() {
                println!("No notes match {}.", filter.label());
            } else {
                for note in result.notes() {
                    println!("{}", render_line(note));
                }
            }
        }
        Command::Tags => {
            for tag in service.tag_index().iter() {
                println!("{tag}");
            }
        }
        Command::Suggest { partial, attached } => {
            for suggestion in suggest_tags(service.tag_index(), &partial, &attached) {
                match suggestion {
                    TagSuggestion::Existing(tag) => println!("{tag}"),
                    TagSuggestion::CreateNew(tag) => println!("+ create \"{tag}\""),
                }
            }
        }
        Command::Edit {
            id,
            content,
            tags,
            is_secret,
        } => {
            let note = service.update_note(&id, &content, tags, is_secret)?;
            println!("Updated {}", note.id);
        }
        Command::Show { id } => {
            let content = service
                .copy_content(&id)
                .ok_or_else(|| format!("no note with id {id}"))?;
            println!("{content}");
        }
        Command::Delete { id, assume_yes } => {
            match service.delete_note(&id, &TerminalPrompt::new(assume_yes)) {
                DeleteOutcome::Deleted => println!("Deleted {id}"),
                DeleteOutcome::Declined => println!("Kept {id}"),
                DeleteOutcome::Missing => return Err(format!("no note with id {id}").into()),
            }
        }
        Command::DeleteAll { assume_yes } => {
            if service.delete_all(&TerminalPrompt::new(assume_yes)) {
                println!("Deleted all notes");
            } else {
                println!("Kept all notes");
            }
        }
        Command::Export { path } => {
            let rendered = service.export_json()?;
            std::fs::write(&path, rendered)?;
            println!(
                "Exported {} notes to {}",
                service.notes().len(),
                path.display()
            );
        }
        Command::Import { path, decision } => {
            let text = std::fs::read_to_string(&path)?;
            let prompt = TerminalPrompt::with_import(decision);
            match service.import_json(&text, &prompt)? {
                ImportOutcome::Replaced { count } => println!("Replaced with {count} notes"),
                ImportOutcome::Merged { added, overwritten } => {
                    println!("Merged: {added} added, {overwritten} overwritten")
                }
                ImportOutcome::Cancelled => println!("Import cancelled"),
            }
        }
        Command::DefaultSecret { enabled } => {
            service.set_default_secret(enabled);
            println!(
                "New notes are {} by default",
                if enabled { "secret" } else { "public" }
            );
        }
        Command::Help => println!("{USAGE}"),
    }
    Ok(())
}

fn render_line(note: &Note) -> String {
    let body = if note.is_secret {
        SECRET_PLACEHOLDER.to_string()
    } else {
        preview(&note.content)
    };
    if note.tags.is_empty() {
        format!("{}  {}", note.id, body)
    } else {
        format!("{}  {}  [{}]", note.id, body, note.tags.join(", "))
    }
}

fn preview(content: &str) -> String {
    let single_line = content.replace(['\n', '\r'], " ");
    let mut shown: String = single_line.chars().take(PREVIEW_CHARS).collect();
    if single_line.chars().count() > PREVIEW_CHARS {
        shown.push_str("...");
    }
    shown
}

/// Answers confirmations from stdin unless `--yes` was given; import
/// decisions come from the command line.
struct TerminalPrompt {
    assume_yes: bool,
    import: ImportDecision,
}

impl TerminalPrompt {
    fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            import: ImportDecision::Cancel,
        }
    }

    fn with_import(import: ImportDecision) -> Self {
        Self {
            assume_yes: true,
            import,
        }
    }

    fn ask(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{question} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

impl UserPrompt for TerminalPrompt {
    fn confirm_delete(&self, note: &Note) -> bool {
        self.ask(&format!("Delete note {}?", note.id))
    }

    fn confirm_delete_all(&self, count: usize) -> bool {
        self.ask(&format!("Delete all {count} notes?"))
    }

    fn choose_import(&self, summary: &ImportSummary) -> ImportDecision {
        println!(
            "Importing {} notes ({} already exist locally, {} local notes)",
            summary.incoming, summary.colliding, summary.existing
        );
        self.import
    }
}
