//! Command handlers: argument-to-service mapping and terminal output.

use crate::Command;
use itemdeck_core::{
    content_preview, normalize_tag, parse_tag_input, ItemService, ItemServiceError, Record,
    RecordDraft, RecordPatch, RecordStore, TagInput, ViewQuery, DEFAULT_SUGGESTION_LIMIT,
    NO_TAGS_SENTINEL,
};
use log::info;
use std::error::Error;
use std::io::{self, BufRead, Write};

pub(crate) fn dispatch<S: RecordStore>(
    service: &mut ItemService<S>,
    command: Command,
) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Add {
            name,
            content,
            tags,
        } => {
            let draft = RecordDraft::new(name)
                .with_content(content)
                .with_tag_input(&tags);
            let record = service.create_item(draft)?;
            println!("created {}", record.id);
        }
        Command::List { search, tag, sort } => {
            let tag = tag.map(|value| {
                if value == NO_TAGS_SENTINEL {
                    value
                } else {
                    normalize_tag(&value).unwrap_or_default()
                }
            });
            let view = ViewQuery { search, tag, sort };
            let records = service.list_items(&view)?;
            if records.is_empty() {
                println!("no items");
            }
            for record in &records {
                print_row(record);
            }
        }
        Command::Show { id } => print_detail(&service.get_item(&id)?),
        Command::Edit {
            id,
            name,
            content,
            tags,
            add_tag,
            remove_tag,
        } => {
            let current = service.get_item(&id)?;
            let mut patch = RecordPatch::from_record(&current);
            if let Some(name) = name {
                patch.name = name;
            }
            if let Some(content) = content {
                patch.content = content;
            }
            if let Some(tags) = tags {
                patch.tags = parse_tag_input(&tags);
            } else {
                let mut pills = TagInput::from_tags(&current.tags);
                for tag in &add_tag {
                    pills.commit_text(tag);
                }
                for tag in &remove_tag {
                    pills.remove(tag);
                }
                patch.tags = pills.into_tags();
            }
            let updated = service.update_item(&id, patch)?;
            print_detail(&updated);
        }
        Command::Delete { id, yes } => {
            let record = match service.get_item(&id) {
                Ok(record) => record,
                Err(ItemServiceError::NotFound(_)) => {
                    println!("no item with id {id}; nothing deleted");
                    return Ok(());
                }
                Err(err) => return Err(err.into()),
            };
            if !yes && !confirm(&format!("Delete \"{}\"?", record.name))? {
                println!("cancelled");
                return Ok(());
            }
            service.delete_item(&id)?;
            println!("deleted {id}");
        }
        Command::Tags { suggest } => {
            let tags = match suggest {
                Some(partial) => service.suggest_tags(&partial, &[], DEFAULT_SUGGESTION_LIMIT)?,
                None => service.tags()?,
            };
            for tag in tags {
                println!("{tag}");
            }
        }
        Command::Export { out_dir } => {
            let bundle = service.export()?;
            std::fs::create_dir_all(&out_dir)?;
            let path = out_dir.join(&bundle.file_name);
            std::fs::write(&path, bundle.body.as_bytes())?;
            info!("event=export_write module=cli status=ok bytes={}", bundle.body.len());
            println!("exported to {}", path.display());
        }
        Command::Import { file, yes } => {
            let payload = std::fs::read_to_string(&file)?;
            let preview = service.preview_import(&payload)?;
            if preview.is_noop() {
                println!(
                    "nothing to import ({} items already up to date)",
                    preview.unchanged
                );
                return Ok(());
            }
            let question = format!(
                "Import will add {} and overwrite {} items. Continue?",
                preview.added, preview.updated
            );
            if !yes && !confirm(&question)? {
                println!("cancelled");
                return Ok(());
            }
            let report = service.import(&payload)?;
            println!(
                "imported: {} added, {} updated, {} unchanged",
                report.added, report.updated, report.unchanged
            );
        }
    }
    Ok(())
}

fn print_row(record: &Record) {
    let tags = if record.tags.is_empty() {
        String::new()
    } else {
        format!("  [{}]", record.tags.join(", "))
    };
    let preview = content_preview(&record.content)
        .map(|text| format!("  {text}"))
        .unwrap_or_default();
    println!("{}  {}{}{}", record.id, record.name, tags, preview);
}

fn print_detail(record: &Record) {
    println!("id:       {}", record.id);
    println!("name:     {}", record.name);
    println!("tags:     {}", record.tags.join(", "));
    println!("created:  {}", record.created);
    println!("modified: {}", record.modified);
    if !record.content.is_empty() {
        println!();
        println!("{}", record.content);
    }
}

fn confirm(question: &str) -> io::Result<bool> {
    let mut stderr = io::stderr();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}
