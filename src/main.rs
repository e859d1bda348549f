use crate::areas::repository::Repository;
use crate::commands::porcelain::merge::MergeOutcome;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod areas;
mod artifacts;
mod commands;
mod errors;

#[derive(Parser)]
#[command(
    name = "jit",
    version = "0.1.0",
    about = "A minimal content-addressed version control system",
    long_about = "jit tracks snapshots of a working directory as immutable \
    objects keyed by content hash, links them into a history, and supports \
    branching, three-way merging and diffing between commits."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Initialize a new repository")]
    Init,
    #[command(name = "add", about = "Add files or directories to the index")]
    Add {
        #[arg(index = 1, required = true, help = "The files or directories to stage")]
        paths: Vec<String>,
    },
    #[command(name = "commit", about = "Create a new commit from the index")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(name = "log", about = "Show commit history newest-first")]
    Log,
    #[command(name = "branch", about = "List branches, or create one")]
    Branch {
        #[arg(index = 1, help = "Name of the branch to create")]
        name: Option<String>,
    },
    #[command(name = "checkout", about = "Switch to another branch")]
    Checkout {
        #[arg(index = 1, help = "The branch to switch to")]
        branch: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current one")]
    Merge {
        #[arg(index = 1, help = "The branch to merge into HEAD")]
        branch: String,
    },
    #[command(name = "diff", about = "Show per-file differences between two commits")]
    Diff {
        #[arg(index = 1, help = "The old commit hash")]
        from: String,
        #[arg(index = 2, help = "The new commit hash")]
        to: String,
    },
    #[command(name = "clone", about = "Copy a local repository and check it out")]
    Clone {
        #[arg(index = 1, help = "Path of the repository to clone")]
        src: String,
        #[arg(index = 2, help = "Destination path")]
        dst: String,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let stdout: Box<dyn std::io::Write> = Box::new(std::io::stdout());

    let open_repository = || -> anyhow::Result<Repository> {
        let pwd = std::env::current_dir()?;
        Ok(Repository::new(pwd, Box::new(std::io::stdout()))?)
    };

    match &cli.command {
        Commands::Init => {
            let mut repository = open_repository()?;
            repository.init()?;
        }
        Commands::Add { paths } => {
            let mut repository = open_repository()?;
            repository.add(paths)?;
        }
        Commands::Commit { message } => {
            let mut repository = open_repository()?;
            repository.commit(message)?;
        }
        Commands::Log => {
            let mut repository = open_repository()?;
            repository.log()?;
        }
        Commands::Branch { name } => {
            let mut repository = open_repository()?;
            match name {
                Some(name) => repository.create_branch(name)?,
                None => repository.list_branches()?,
            }
        }
        Commands::Checkout { branch } => {
            let mut repository = open_repository()?;
            repository.checkout(branch)?;
        }
        Commands::Merge { branch } => {
            let mut repository = open_repository()?;
            if let MergeOutcome::Merged { conflicts } = repository.merge(branch)?
                && !conflicts.is_empty()
            {
                eprintln!(
                    "Automatic merge left conflicts in {} file(s); fix them and commit the result.",
                    conflicts.len()
                );
            }
        }
        Commands::Diff { from, to } => {
            let mut repository = open_repository()?;
            repository.diff(from, to)?;
        }
        Commands::Clone { src, dst } => {
            Repository::clone_repository(
                &PathBuf::from(src),
                &PathBuf::from(dst),
                stdout,
            )?;
        }
    }

    Ok(())
}
