//! Terminal front end for Jotpad notes.
//!
//! # Responsibility
//! - Map subcommands onto dashboard operations against a running server.
//! - Print one line per note.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use jotpad_client::{Dashboard, NoteDraft, NotesApi};
use jotpad_core::{init_logging, Note};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "jotpad")]
#[command(about = "CLI for Jotpad notes")]
struct Cli {
    /// Notes server URL
    #[arg(long, env = "JOTPAD_API_URL", default_value = "http://localhost:5000")]
    server: String,

    /// Owner filter applied to listing and new notes
    #[arg(long, global = true, env = "JOTPAD_USER_ID")]
    user: Option<String>,

    /// Log level for client diagnostics (stderr)
    #[arg(long, env = "JOTPAD_LOG_LEVEL", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, newest first
    List,

    /// Create a note
    Add {
        #[arg(short, long)]
        title: String,

        #[arg(short, long, default_value = "")]
        content: String,
    },

    /// Edit a note in place
    Edit {
        id: Uuid,

        #[arg(short, long)]
        title: Option<String>,

        #[arg(short, long)]
        content: Option<String>,
    },

    /// Delete a note
    Rm { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, None).map_err(anyhow::Error::msg)?;

    let mut dashboard = Dashboard::new(NotesApi::new(&cli.server)?);

    match cli.command {
        Commands::List => {
            dashboard.mount(cli.user).await;
            if let jotpad_client::LoadStatus::Error(message) = dashboard.state().status() {
                bail!("could not load notes: {message}");
            }
            if dashboard.state().shows_empty_hint() {
                println!("No notes yet. Add one with `jotpad add --title ...`.");
            }
            for note in dashboard.state().notes() {
                println!("{}", format_note_line(note));
            }
        }
        Commands::Add { title, content } => {
            dashboard.mount(cli.user).await;
            dashboard.open_dialog();
            dashboard.edit_dialog(NoteDraft::new(title, content));
            match dashboard.submit_new_note().await? {
                Some(note) => println!("{}", format_note_line(&note)),
                None => bail!("title must not be blank"),
            }
        }
        Commands::Edit { id, title, content } => {
            dashboard.mount(cli.user).await;
            dashboard.start_edit(id);
            let Some(current) = dashboard.state().draft(id).cloned() else {
                bail!("note {id} not found");
            };
            dashboard.edit_draft(
                id,
                NoteDraft::new(
                    title.unwrap_or(current.title),
                    content.unwrap_or(current.content),
                ),
            );
            if let Some(note) = dashboard.save_edit(id).await? {
                println!("{}", format_note_line(&note));
            }
        }
        Commands::Rm { id } => {
            dashboard.delete(id).await?;
            println!("deleted {id}");
        }
    }

    Ok(())
}

fn format_note_line(note: &Note) -> String {
    let mut line = format!(
        "{}  {}  {}",
        note.id,
        note.updated_at.format("%Y-%m-%d %H:%M"),
        note.title
    );
    if let Some(preview) = note.content.lines().next().filter(|line| !line.is_empty()) {
        line.push_str(" | ");
        line.extend(preview.chars().take(40));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::format_note_line;
    use chrono::DateTime;
    use jotpad_core::Note;
    use uuid::Uuid;

    #[test]
    fn format_note_line_shows_id_time_title_and_preview() {
        let stamp = DateTime::from_timestamp_millis(0).unwrap();
        let note = Note {
            id: Uuid::nil(),
            owner_id: None,
            title: "groceries".to_string(),
            content: "milk\neggs".to_string(),
            created_at: stamp,
            updated_at: stamp,
        };

        assert_eq!(
            format_note_line(&note),
            format!("{}  1970-01-01 00:00  groceries | milk", Uuid::nil())
        );
    }

    #[test]
    fn format_note_line_skips_empty_content() {
        let stamp = DateTime::from_timestamp_millis(0).unwrap();
        let note = Note {
            id: Uuid::nil(),
            owner_id: None,
            title: "t".to_string(),
            content: String::new(),
            created_at: stamp,
            updated_at: stamp,
        };

        assert!(format_note_line(&note).ends_with("  t"));
    }
}
