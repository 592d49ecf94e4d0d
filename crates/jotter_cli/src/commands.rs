//! Command handlers: call the note service and print results.

use crate::cli::Command;
use crate::config::AppConfig;
use crate::web::{self, WebState};
use anyhow::{Context, Result};
use jotter_core::{FileNoteRepository, Note, NoteId, NoteRepository, NoteService};
use std::io::Write;

/// Dispatches one parsed command against the configured store.
pub fn run(command: Command, config: &AppConfig) -> Result<()> {
    let service = NoteService::new(FileNoteRepository::new(&config.store_path));
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::New { note, tags } => handle_new(&service, &mut out, note, tags.as_deref()),
        Command::All => handle_all(&service, &mut out),
        Command::Find { filter } => handle_find(&service, &mut out, &filter),
        Command::Remove { id } => handle_remove(&service, &mut out, id),
        Command::Clean => handle_clean(&service, &mut out),
        Command::Web {
            port,
            host,
            no_open,
        } => {
            drop(out);
            let state = WebState::new(service, config.template_path.clone());
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(web::serve(state, host, port, !no_open))
        }
    }
}

pub fn handle_new<R: NoteRepository>(
    service: &NoteService<R>,
    out: &mut impl Write,
    content: String,
    tags: Option<&str>,
) -> Result<()> {
    let tags = tags.map(parse_tags).unwrap_or_default();
    let note = service
        .create_note(content, tags)
        .context("Failed to create note")?;
    writeln!(out, "New note added! {}", note.id)?;
    Ok(())
}

pub fn handle_all<R: NoteRepository>(
    service: &NoteService<R>,
    out: &mut impl Write,
) -> Result<()> {
    let notes = service.list_notes().context("Failed to list notes")?;
    print_notes(out, &notes)
}

pub fn handle_find<R: NoteRepository>(
    service: &NoteService<R>,
    out: &mut impl Write,
    filter: &str,
) -> Result<()> {
    let notes = service
        .find_notes(filter)
        .context("Failed to search notes")?;
    print_notes(out, &notes)
}

pub fn handle_remove<R: NoteRepository>(
    service: &NoteService<R>,
    out: &mut impl Write,
    id: NoteId,
) -> Result<()> {
    let removed = service
        .remove_note(id)
        .with_context(|| format!("Failed to remove note {id}"))?;
    if removed {
        writeln!(out, "Removed note {id}")?;
    } else {
        writeln!(out, "No note with id {id}")?;
    }
    Ok(())
}

pub fn handle_clean<R: NoteRepository>(
    service: &NoteService<R>,
    out: &mut impl Write,
) -> Result<()> {
    let removed = service.clear_notes().context("Failed to remove notes")?;
    let noun = if removed == 1 { "note" } else { "notes" };
    writeln!(out, "Removed {removed} {noun}")?;
    Ok(())
}

fn print_notes(out: &mut impl Write, notes: &[Note]) -> Result<()> {
    if notes.is_empty() {
        writeln!(out, "No notes found.")?;
        return Ok(());
    }
    for note in notes {
        writeln!(out, "id: {}", note.id)?;
        writeln!(out, "tags: {}", note.tags.join(", "))?;
        writeln!(out, "content: {}", note.content)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Splits comma-separated tags, trimming each and dropping empty pieces.
///
/// Order and duplicates are kept.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
