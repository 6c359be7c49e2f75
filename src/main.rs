use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use is_terminal::IsTerminal;
use loki::areas::config::ConfigLevel;
use loki::areas::repository::Repository;
use loki::artifacts::core::PagerWriter;
use loki::commands::porcelain::config::config;
use minus::Pager;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const LOG_FILTER_ENV: &str = "LOKI_LOG";

#[derive(Parser)]
#[command(
    name = "loki",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A minimal content-addressed version control system",
    long_about = "Loki stores file snapshots as content-addressed objects, \
    stages changes against the last commit and records a linear history.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create an empty repository or reinitialize an existing one",
        long_about = "This command creates the .loki directory in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(
        name = "add",
        about = "Add file contents to the index",
        long_about = "This command stages each path as added, modified or deleted relative to the last commit."
    )]
    Add {
        #[arg(required = true, help = "Files to add to the staging area")]
        paths: Vec<String>,
    },
    #[command(
        name = "commit",
        about = "Record changes to the repository",
        long_about = "This command creates a new commit from the staged changes with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show the staged changes")]
    Status,
    #[command(name = "log", about = "Show commit logs")]
    Log,
    #[command(
        name = "config",
        about = "Get or set configuration values",
        long_about = "This command reads a value merged from the system, global and local files, \
        or writes a value into one of them (local by default)."
    )]
    Config {
        #[command(flatten)]
        level: ConfigLevelArgs,
        #[arg(index = 1, help = "The configuration key")]
        key: String,
        #[arg(index = 2, help = "The value to set")]
        value: Option<String>,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file and optionally write it to the object database",
        long_about = "This command hashes a file as a blob object and can write it to the object database."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "cat-file",
        about = "Print the content of an object",
        long_about = "This command pretty-prints a blob, tree or commit stored in the repository."
    )]
    CatFile {
        #[arg(short = 'p', long, help = "The object SHA to print")]
        sha: String,
    },
    #[command(
        name = "ls-tree",
        about = "List the contents of a tree object",
        long_about = "This command lists the entries of a tree, given a tree SHA, a commit SHA or HEAD."
    )]
    LsTree {
        #[arg(index = 1, default_value = "HEAD", help = "The tree-ish to list")]
        revision: String,
    },
}

#[derive(Args)]
#[group(multiple = false)]
struct ConfigLevelArgs {
    #[arg(long, help = "Use the system-wide config file")]
    system: bool,
    #[arg(long, help = "Use the per-user config file")]
    global: bool,
    #[arg(long, help = "Use the repository config file (default)")]
    local: bool,
}

impl From<&ConfigLevelArgs> for ConfigLevel {
    fn from(args: &ConfigLevelArgs) -> Self {
        if args.system {
            ConfigLevel::System
        } else if args.global {
            ConfigLevel::Global
        } else {
            ConfigLevel::Local
        }
    }
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn current_dir() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.canonicalize()?)
}

fn open_repository(pwd: &Path) -> Result<Repository> {
    Repository::open(pwd, Box::new(std::io::stdout()))
}

fn use_pager() -> bool {
    std::io::stdout().is_terminal() && std::env::var_os("NO_PAGER").is_none()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();
    if !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    match &cli.command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(Path::new(path), Box::new(std::io::stdout()))?,
                None => Repository::new(&current_dir()?, Box::new(std::io::stdout()))?,
            };

            repository.init()?
        }
        Commands::Add { paths } => {
            let pwd = current_dir()?;
            let repository = open_repository(&pwd)?;

            let skipped = repository.add(&pwd, paths)?;
            if skipped > 0 {
                tracing::info!(skipped, "some paths were not staged");
            }
        }
        Commands::Commit { message } => {
            let repository = open_repository(&current_dir()?)?;

            repository.commit(message)?;
        }
        Commands::Status => {
            let repository = open_repository(&current_dir()?)?;

            repository.status()?
        }
        Commands::Log => {
            let pwd = current_dir()?;

            if use_pager() {
                let pager = Pager::new();
                let repository =
                    Repository::open(&pwd, Box::new(PagerWriter::new(pager.clone())))?;

                repository.log()?;
                minus::page_all(pager)?;
            } else {
                open_repository(&pwd)?.log()?
            }
        }
        Commands::Config { level, key, value } => {
            let pwd = current_dir()?;

            config(
                &mut std::io::stdout(),
                &pwd,
                level.into(),
                key,
                value.as_deref(),
            )?
        }
        Commands::HashObject { write, file } => {
            let pwd = current_dir()?;
            let repository = open_repository(&pwd)?;

            repository.hash_object(&pwd, file, *write)?;
        }
        Commands::CatFile { sha } => {
            let repository = open_repository(&current_dir()?)?;

            repository.cat_file(sha)?
        }
        Commands::LsTree { revision } => {
            let repository = open_repository(&current_dir()?)?;

            repository.ls_tree(revision)?
        }
    }

    Ok(())
}
