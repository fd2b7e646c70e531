use anyhow::Context;
use linkset_storage::{InsertEntryRequest, ListEntriesRequest, SqliteStore, StoreError};
use serde_json::json;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

use crate::args::{ListArgs, SetsArgs};

// LIMIT has to fit in an i64; this is plenty for a full-set dump.
const EXPORT_LIMIT: usize = u32::MAX as usize;

pub fn add(
    store: &mut SqliteStore,
    set: &str,
    url: &str,
    timestamp: Option<String>,
) -> anyhow::Result<()> {
    let row = store.insert_entry(InsertEntryRequest {
        set_name: set.to_string(),
        url: url.to_string(),
        timestamp,
    })?;
    info!(set = %row.set_name, url = %row.url, "added entry");
    println!("added {} to {} at {}", row.url, row.set_name, row.timestamp);
    Ok(())
}

pub fn has(store: &SqliteStore, set: &str, url: &str) -> anyhow::Result<bool> {
    let found = store.contains(set, url)?;
    println!("{}", if found { "yes" } else { "no" });
    Ok(found)
}

pub fn remove(store: &mut SqliteStore, set: &str, url: &str) -> anyhow::Result<()> {
    if store.remove_entry(set, url)? {
        println!("removed {url} from {set}");
    } else {
        println!("{url} was not in {set}");
    }
    Ok(())
}

pub fn clear(store: &mut SqliteStore, set: &str) -> anyhow::Result<()> {
    let removed = store.clear_set(set)?;
    println!("removed {removed} entries from {set}");
    Ok(())
}

pub fn list(store: &SqliteStore, args: &ListArgs) -> anyhow::Result<()> {
    let rows = store.list_entries(ListEntriesRequest {
        set_name: args.set.clone(),
        limit: args.limit,
        offset: args.offset,
    })?;

    if args.json {
        let payload: Vec<_> = rows
            .iter()
            .map(|row| {
                json!({
                    "name": row.set_name,
                    "url": row.url,
                    "timestamp": row.timestamp,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for row in &rows {
        println!("{}  {}", row.timestamp, row.url);
    }
    Ok(())
}

pub fn sets(store: &SqliteStore, args: &SetsArgs) -> anyhow::Result<()> {
    let summaries = store.list_sets()?;

    if args.json {
        let payload: Vec<_> = summaries
            .iter()
            .map(|set| {
                json!({
                    "name": set.name,
                    "entries": set.entries,
                    "first_added": set.first_added,
                    "last_added": set.last_added,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    for set in &summaries {
        println!(
            "{}  {} entries  {} .. {}",
            set.name, set.entries, set.first_added, set.last_added
        );
    }
    Ok(())
}

pub fn export(store: &SqliteStore, set: &str) -> anyhow::Result<()> {
    store
        .summarize_set(set)
        .with_context(|| format!("no set named {set:?}"))?;

    let rows = store.list_entries(ListEntriesRequest {
        set_name: set.to_string(),
        limit: EXPORT_LIMIT,
        offset: 0,
    })?;

    let payload: Vec<_> = rows
        .iter()
        .map(|row| {
            json!({
                "name": row.set_name,
                "url": row.url,
                "timestamp": row.timestamp,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

pub fn import(
    store: &mut SqliteStore,
    set: &str,
    file: Option<&Path>,
) -> anyhow::Result<()> {
    let text = match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("could not read stdin")?;
            buf
        }
    };

    let payload: serde_json::Value =
        serde_json::from_str(&text).context("input is not valid JSON")?;
    let entries = payload
        .as_array()
        .context("input must be a JSON array of entries")?;

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for (index, entry) in entries.iter().enumerate() {
        let url = entry
            .get("url")
            .and_then(serde_json::Value::as_str)
            .with_context(|| format!("entry {index} has no \"url\" string"))?;
        let timestamp = entry
            .get("timestamp")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);

        match store.insert_entry(InsertEntryRequest {
            set_name: set.to_string(),
            url: url.to_string(),
            timestamp,
        }) {
            Ok(_) => imported += 1,
            Err(StoreError::DuplicateEntry { .. }) => {
                debug!(url, "skipping duplicate");
                skipped += 1;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("entry {index} ({url}) failed"));
            }
        }
    }

    println!("imported {imported} entries into {set} ({skipped} duplicates skipped)");
    Ok(())
}
