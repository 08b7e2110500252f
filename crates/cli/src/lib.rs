use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use dropcat_ingest::{
    ClipboardSink, ClipboardSource, IngestConfig, IngestController, MemoryClipboard,
    SystemClipboard, UnavailableClipboard, SESSION_FILE_NAME,
};
use messages::Language;
use output::{print_json, print_stdout, ConsoleReporter};
use serde::Serialize;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

mod messages;
mod output;

#[derive(Parser)]
#[command(name = "dropcat")]
#[command(about = "Collect text files into one combined document", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for paste files (overrides DROPCAT_TEMP_DIR)
    #[arg(long, global = true)]
    temp_dir: Option<PathBuf>,

    /// Session state file (overrides DROPCAT_STATE_PATH)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Language for status messages
    #[arg(long, global = true, value_enum, default_value_t = Language::EnUs)]
    lang: Language,

    /// Print one JSON object per line instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest the files named by a raw drag-and-drop payload
    Drop(DropArgs),

    /// Add files by path
    Add(AddArgs),

    /// Paste from the clipboard: files are added, text becomes a paste file
    Paste(PasteArgs),

    /// List the files in the set
    List,

    /// Print the combined document
    Show,

    /// Report line and character counts of the combined document
    Stats,

    /// Remove the file at INDEX (as shown by `list`)
    Remove(RemoveArgs),

    /// Restore the most recently removed file
    Undo,

    /// Remove every file and forget the session
    Clear,

    /// Copy the combined document to the clipboard
    Copy,

    /// Print the name the next paste file would get
    #[command(name = "peek-paste-name")]
    PeekPasteName,

    /// Delete paste files older than the configured age
    Sweep(SweepArgs),

    /// Print the session state file location
    #[command(name = "state-path")]
    StatePath,
}

#[derive(Args)]
struct DropArgs {
    /// Payload as delivered by the drop event, e.g. `{/a b.txt} /c.md`
    payload: String,
}

#[derive(Args)]
struct AddArgs {
    #[arg(required = true)]
    paths: Vec<PathBuf>,
}

#[derive(Args)]
struct PasteArgs {
    /// Take text from stdin instead of the system clipboard
    #[arg(long)]
    stdin: bool,
}

#[derive(Args)]
struct RemoveArgs {
    index: Option<usize>,
}

#[derive(Args)]
struct SweepArgs {
    /// Age threshold in hours (overrides DROPCAT_PASTE_MAX_AGE_HOURS)
    #[arg(long)]
    max_age_hours: Option<u64>,
}

#[derive(Serialize)]
struct ListedFile<'a> {
    index: usize,
    name: String,
    path: &'a Path,
}

#[derive(Serialize)]
struct ListOutput<'a> {
    files: Vec<ListedFile<'a>>,
    deleted: usize,
}

#[derive(Serialize)]
struct SweepOutput<'a> {
    removed: &'a [PathBuf],
    failed: usize,
}

pub fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();
    if cli.json && !cli.verbose {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = resolve_config(&cli);
    log::debug!(
        "Using temp dir {} and state file {}",
        config.temp_dir.display(),
        config.state_file.display()
    );

    run(cli, &config)
}

fn resolve_config(cli: &Cli) -> IngestConfig {
    let mut config = IngestConfig::from_env();
    if let Some(dir) = &cli.temp_dir {
        let state_follows_dir = config.state_file == config.temp_dir.join(SESSION_FILE_NAME);
        config.temp_dir = dir.clone();
        if state_follows_dir {
            config.state_file = dir.join(SESSION_FILE_NAME);
        }
    }
    if let Some(state) = &cli.state_file {
        config.state_file = state.clone();
    }
    config
}

fn run(cli: Cli, config: &IngestConfig) -> Result<()> {
    let reporter = ConsoleReporter::new(cli.lang, cli.json);
    let mut controller = IngestController::new(config, reporter);
    controller.resume();

    match cli.command {
        Commands::Drop(args) => {
            controller.handle_drop(&args.payload);
        }
        Commands::Add(args) => {
            let paths = args
                .paths
                .iter()
                .map(|path| absolutize(path))
                .collect::<Result<Vec<_>>>()?;
            controller.add_paths(&paths);
        }
        Commands::Paste(args) => {
            let mut source: Box<dyn ClipboardSource> = if args.stdin {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read pasted text from stdin")?;
                Box::new(MemoryClipboard::with_text(text))
            } else {
                system_clipboard_source()
            };
            controller.paste(source.as_mut());
        }
        Commands::List => {
            let store = controller.store();
            let files = store
                .entries()
                .iter()
                .enumerate()
                .map(|(index, entry)| ListedFile {
                    index,
                    name: entry.basename(),
                    path: &entry.path,
                })
                .collect::<Vec<_>>();
            if cli.json {
                print_json(&ListOutput {
                    files,
                    deleted: store.deleted_len(),
                })?;
            } else {
                for file in files {
                    print_stdout(&format!(
                        "{}\t{}\t{}",
                        file.index,
                        file.name,
                        file.path.display()
                    ))?;
                }
            }
        }
        Commands::Show => {
            let content = controller.store().combined_content();
            if cli.json {
                print_json(&serde_json::json!({ "content": content }))?;
            } else if !content.is_empty() {
                print_stdout(&content)?;
            }
        }
        Commands::Stats => {
            controller.report_stats();
        }
        Commands::Remove(args) => {
            controller.delete(args.index);
        }
        Commands::Undo => {
            controller.undo();
        }
        Commands::Clear => {
            controller.clear();
        }
        Commands::Copy => {
            let mut sink = system_clipboard_sink();
            controller.copy_content(sink.as_mut());
        }
        Commands::PeekPasteName => {
            let name = controller.paste_files().peek_next_name();
            if cli.json {
                print_json(&serde_json::json!({ "name": name }))?;
            } else {
                print_stdout(&name)?;
            }
        }
        Commands::Sweep(args) => {
            let max_age = args.max_age_hours.unwrap_or(config.paste_max_age_hours);
            let report = controller.sweep_stale_pastes(max_age);
            if cli.json {
                print_json(&SweepOutput {
                    removed: &report.removed,
                    failed: report.failed,
                })?;
            } else {
                for path in &report.removed {
                    print_stdout(&path.display().to_string())?;
                }
            }
        }
        Commands::StatePath => {
            let path = config.state_file.display().to_string();
            if cli.json {
                print_json(&serde_json::json!({ "path": path }))?;
            } else {
                print_stdout(&path)?;
            }
        }
    }
    Ok(())
}

fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to resolve current directory")?;
    Ok(cwd.join(path))
}

fn system_clipboard_source() -> Box<dyn ClipboardSource> {
    match SystemClipboard::open() {
        Ok(clipboard) => Box::new(clipboard),
        Err(err) => {
            log::warn!("{err}");
            Box::new(UnavailableClipboard::new(err.to_string()))
        }
    }
}

fn system_clipboard_sink() -> Box<dyn ClipboardSink> {
    match SystemClipboard::open() {
        Ok(clipboard) => Box::new(clipboard),
        Err(err) => {
            log::warn!("{err}");
            Box::new(UnavailableClipboard::new(err.to_string()))
        }
    }
}
