#![forbid(unsafe_code)]

mod args;
mod commands;
mod logging;
mod paths;
mod platform;

use anyhow::Context;
use clap::Parser;
use linkset_storage::SqliteStore;
use std::process::ExitCode;
use tracing::debug;

use args::{Cli, Cmd};
use paths::AppPaths;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let paths = AppPaths::resolve(cli.data_dir.clone())?;
    let _guard = logging::init(&paths.logs_dir(), cli.verbose);
    debug!(data_dir = %paths.data_dir().display(), "resolved paths");

    match cli.cmd {
        Cmd::Data => {
            platform::open_in_file_manager(paths.data_dir())?;
            Ok(ExitCode::SUCCESS)
        }
        Cmd::Logs => {
            platform::open_in_file_manager(&paths.logs_dir())?;
            Ok(ExitCode::SUCCESS)
        }
        cmd => run_store_command(cmd, &paths),
    }
}

fn run_store_command(cmd: Cmd, paths: &AppPaths) -> anyhow::Result<ExitCode> {
    let mut store = SqliteStore::open(paths.data_dir())
        .with_context(|| format!("could not open store in {}", paths.data_dir().display()))?;

    match cmd {
        Cmd::Add(args) => commands::add(&mut store, &args.set, &args.url, args.timestamp)?,
        Cmd::Has(args) => {
            if !commands::has(&store, &args.set, &args.url)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Cmd::List(args) => commands::list(&store, &args)?,
        Cmd::Sets(args) => commands::sets(&store, &args)?,
        Cmd::Remove(args) => commands::remove(&mut store, &args.set, &args.url)?,
        Cmd::Clear(args) => commands::clear(&mut store, &args.set)?,
        Cmd::Export(args) => commands::export(&store, &args.set)?,
        Cmd::Import(args) => commands::import(&mut store, &args.set, args.file.as_deref())?,
        Cmd::Data | Cmd::Logs => unreachable!("handled before the store is opened"),
    }

    Ok(ExitCode::SUCCESS)
}
