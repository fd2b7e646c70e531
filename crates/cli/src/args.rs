use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "linkset", version, about = "Persisted named sets of URLs", long_about = None)]
pub struct Cli {
    #[arg(
        long,
        value_name = "PATH",
        global = true,
        help = "Application data directory. When omitted, linkset uses LINKSET_DATA_DIR or the platform data directory."
    )]
    pub data_dir: Option<PathBuf>,
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Add a url to a set.
    Add(AddArgs),
    /// Check whether a set contains a url (exit 1 when it does not).
    Has(PairArgs),
    /// List the urls in a set.
    List(ListArgs),
    /// Summarize every set in the store.
    Sets(SetsArgs),
    /// Remove a url from a set.
    Remove(PairArgs),
    /// Remove every url in a set.
    Clear(SetArgs),
    /// Write a set to stdout as JSON.
    Export(SetArgs),
    /// Read JSON entries into a set from a file or stdin.
    Import(ImportArgs),
    /// Open the application data directory in the file manager.
    #[command(visible_alias = "dd")]
    Data,
    /// Open the log directory in the file manager.
    #[command(visible_alias = "lg")]
    Logs,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Set name.
    pub set: String,
    /// Url to add.
    pub url: String,
    /// Store this timestamp instead of the insertion time.
    #[arg(long, value_name = "TS")]
    pub timestamp: Option<String>,
}

#[derive(Args, Debug)]
pub struct PairArgs {
    /// Set name.
    pub set: String,
    /// Url to look up.
    pub url: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Set name.
    pub set: String,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Set name.
    pub set: String,
    #[arg(long, default_value_t = 1000)]
    pub limit: usize,
    #[arg(long, default_value_t = 0)]
    pub offset: usize,
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SetsArgs {
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ImportArgs {
    /// Set name.
    pub set: String,
    /// JSON file to read; stdin when omitted.
    pub file: Option<PathBuf>,
}
