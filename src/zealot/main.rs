use chrono::Utc;
use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use log::debug;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;
use zealot::api::{MessageLevel, NotebookApi};
use zealot::commands::config::{self as config_cmd, ConfigAction};
use zealot::commands::CmdMessage;
use zealot::config::ZealotConfig;
use zealot::error::{Result, ZealotError};
use zealot::model::{FolderId, Note};
use zealot::persist::StorageKeys;
use zealot::state::NoteFilter;
use zealot::store::fs::FileStorage;
use zealot::view::{display_title, format_date, preview};

mod args;
use args::{Cli, Commands, FolderAction};

const STORAGE_DIR: &str = "storage";

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn initialize_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}

struct AppContext {
    api: NotebookApi<FileStorage>,
    config: ZealotConfig,
    dir: PathBuf,
}

fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { folder, unfiled }) => handle_list(&ctx, folder, unfiled),
        Some(Commands::View { id }) => handle_view(&ctx, &id),
        Some(Commands::New {
            folder,
            title,
            content,
        }) => handle_new(&mut ctx, folder, &title, &content),
        Some(Commands::Edit { id, title, content }) => handle_edit(&mut ctx, &id, title, content),
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id),
        Some(Commands::Move { id, folder }) => handle_move(&mut ctx, &id, folder),
        Some(Commands::Folders) => handle_folders(&ctx),
        Some(Commands::Folder { action }) => handle_folder(&mut ctx, action),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, None, false),
    }
}

fn data_dir(cli: &Cli) -> Result<PathBuf> {
    if let Some(dir) = &cli.data_dir {
        return Ok(dir.clone());
    }
    if let Some(dir) = std::env::var_os("ZEALOT_HOME") {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "zealot", "zealot")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ZealotError::Config("Could not determine data directory".into()))
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let dir = data_dir(cli)?;
    debug!("Using data directory {}", dir.display());

    let config = ZealotConfig::load(&dir)?;
    let storage = FileStorage::new(dir.join(STORAGE_DIR)).with_quota(config.storage_quota);
    let api = NotebookApi::open(storage, StorageKeys::from(&config));
    if let Some(reason) = api.persistence_degraded() {
        print_messages(&[CmdMessage::warning(format!(
            "Changes may not be saved: {}",
            reason
        ))]);
    }

    Ok(AppContext { api, config, dir })
}

fn resolve_folder(ctx: &AppContext, folder: Option<String>) -> Result<Option<FolderId>> {
    folder
        .map(|f| ctx.api.resolve_folder_id(&f))
        .transpose()
}

fn handle_list(ctx: &AppContext, folder: Option<String>, unfiled: bool) -> Result<()> {
    let filter = match resolve_folder(ctx, folder)? {
        Some(id) => NoteFilter::Folder(id),
        None if unfiled => NoteFilter::Unfiled,
        None => NoteFilter::All,
    };
    print_notes(&ctx.api.notes_in(&filter), ctx.config.preview_length);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: &str) -> Result<()> {
    let id = ctx.api.resolve_note_id(id)?;
    if let Some(note) = ctx.api.note(&id) {
        print_full_note(ctx, note);
    }
    Ok(())
}

fn handle_new(
    ctx: &mut AppContext,
    folder: Option<String>,
    title: &str,
    content: &str,
) -> Result<()> {
    let folder = resolve_folder(ctx, folder)?;
    ctx.api.select_folder(folder.as_ref());
    ctx.api.start_new_note();
    let result = ctx.api.save_note(title, content);
    for note in &result.affected_notes {
        println!("{}", note.id.as_str().dimmed());
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    id: &str,
    title: Option<String>,
    content: Option<String>,
) -> Result<()> {
    let id = ctx.api.resolve_note_id(id)?;
    ctx.api.select_note(&id);

    let (title, content) = match ctx.api.selected_note() {
        Some(note) => (
            title.unwrap_or_else(|| note.title.clone()),
            content.unwrap_or_else(|| note.content.clone()),
        ),
        None => return Err(ZealotError::Api(format!("Note not found: {}", id))),
    };

    let result = ctx.api.save_note(&title, &content);
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let id = ctx.api.resolve_note_id(id)?;
    let result = ctx.api.delete_note(&id);
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, id: &str, folder: Option<String>) -> Result<()> {
    let id = ctx.api.resolve_note_id(id)?;
    let folder = resolve_folder(ctx, folder)?;
    let result = ctx.api.move_note(&id, folder.as_ref());
    print_messages(&result.messages);
    Ok(())
}

fn handle_folders(ctx: &AppContext) -> Result<()> {
    let counts = ctx.api.note_counts();

    println!(
        "{:<10}{}{:>6}",
        "",
        format!("{:<28}", "All Notes").bold(),
        counts.total()
    );
    for folder in ctx.api.folders() {
        println!(
            "{}{:<28}{:>6}",
            format!("{:<10}", short_id(folder.id.as_str())).yellow(),
            folder.name,
            counts.for_folder(&folder.id)
        );
    }
    println!(
        "{:<10}{}{:>6}",
        "",
        format!("{:<28}", "Unfiled").dimmed(),
        counts.unfiled
    );
    Ok(())
}

fn handle_folder(ctx: &mut AppContext, action: FolderAction) -> Result<()> {
    let result = match action {
        FolderAction::Create { name } => {
            let result = ctx.api.create_folder(&name);
            for folder in &result.affected_folders {
                println!("{}", folder.id.as_str().dimmed());
            }
            result
        }
        FolderAction::Rename { id, name } => {
            let id = ctx.api.resolve_folder_id(&id)?;
            ctx.api.rename_folder(&id, &name)
        }
        FolderAction::Delete { id } => {
            let id = ctx.api.resolve_folder_id(&id)?;
            ctx.api.delete_folder(&id)
        }
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = config_cmd::run(&ctx.dir, action)?;
    print_messages(&result.messages);
    Ok(())
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn print_full_note(ctx: &AppContext, note: &Note) {
    let folder = note
        .folder_id
        .as_ref()
        .and_then(|id| ctx.api.folder(id))
        .map(|f| f.name.as_str())
        .unwrap_or("All Notes");

    println!(
        "{} {}",
        short_id(note.id.as_str()).yellow(),
        display_title(note).bold()
    );
    println!(
        "{}",
        format!(
            "{} · created {} · updated {}",
            folder,
            format_date(note.created_at),
            format_date(note.updated_at)
        )
        .dimmed()
    );
    println!("--------------------------------");
    println!("{}", note.content);
}

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 10;
const TIME_WIDTH: usize = 16;

fn print_notes(notes: &[&Note], preview_length: usize) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    for note in notes {
        let idx_str = format!("{:<width$}", short_id(note.id.as_str()), width = ID_WIDTH);

        let body: String = preview(&note.content, preview_length)
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title = display_title(note);
        let title_content = if body.trim().is_empty() {
            title.bold().to_string()
        } else {
            format!("{} {}", title.bold(), body.dimmed())
        };
        let plain_width = title.width() + 1 + body.width();

        let available = LINE_WIDTH.saturating_sub(ID_WIDTH + TIME_WIDTH);
        let (title_display, content_width) = if plain_width > available {
            let plain = format!("{} {}", title, body);
            let cut = truncate_to_width(&plain, available);
            let width = cut.width();
            (cut, width)
        } else {
            (title_content, plain_width)
        };
        let padding = available.saturating_sub(content_width);

        println!(
            "{}{}{}{}",
            idx_str.yellow(),
            title_display,
            " ".repeat(padding),
            format_time_ago(note.updated_at).dimmed()
        );
    }
}

fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: chrono::DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(timestamp);

    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());

    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
