use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use gitlet::areas::repository::Repository;
use gitlet::artifacts::core::{GitletError, PipeWriter};
use gitlet::commands::porcelain::checkout::CheckoutRequest;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_ENV: &str = "GITLET_LOG";
const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Parser)]
#[command(
    name = "gitlet",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control system",
    long_about = "Gitlet keeps snapshots of the files in the current directory, \
    with branches, history browsing and three-way merges. \
    All state lives in the .gitlet directory at the repository root.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a repository in the current directory",
        long_about = "Creates the .gitlet directory with a single initial commit on branch master."
    )]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "rm", about = "Unstage a file or stage it for removal")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the IDs of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working changes")]
    Status,
    #[command(name = "branch", about = "Create a branch at the current head commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "checkout -- <file> restores a file from the head commit, \
        checkout <commit> -- <file> restores it from any commit, \
        checkout <branch> switches to another branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit ID when a file follows")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "reset", about = "Move the current branch to a commit")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge another branch into the current one")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> ExitCode {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return report_usage_error(err),
    };

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(err),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    let pwd = std::env::current_dir()?;
    let writer = Box::new(PipeWriter::new(std::io::stdout()));

    let repository = match command {
        Commands::Init => Repository::init(&pwd, writer)?,
        command => {
            let mut repository = Repository::open(&pwd, writer)?;
            dispatch(&mut repository, command)?;
            repository
        }
    };

    repository.persist()
}

fn dispatch(repository: &mut Repository, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Init => Err(GitletError::AlreadyInitialized.into()),
        Commands::Add { file } => repository.add(&file),
        Commands::Commit { message } => repository.commit(message.as_deref().unwrap_or_default()),
        Commands::Rm { file } => repository.rm(&file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(&message),
        Commands::Status => repository.status(),
        Commands::Branch { name } => repository.branch(&name),
        Commands::RmBranch { name } => repository.rm_branch(&name),
        Commands::Checkout { target, file } => {
            let request = match (target, file) {
                (None, Some(path)) => CheckoutRequest::HeadFile { path },
                (Some(commit), Some(path)) => CheckoutRequest::CommitFile { commit, path },
                (Some(name), None) => CheckoutRequest::Branch { name },
                (None, None) => return Err(GitletError::IncorrectOperands.into()),
            };
            repository.checkout(request)
        }
        Commands::Reset { commit } => repository.reset(&commit),
        Commands::Merge { branch } => repository.merge(&branch),
    }
}

fn report_usage_error(err: clap::Error) -> ExitCode {
    let gitlet_error = match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        ErrorKind::MissingSubcommand | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            GitletError::MissingCommand
        }
        ErrorKind::InvalidSubcommand => GitletError::UnknownCommand,
        _ => GitletError::IncorrectOperands,
    };
    tracing::debug!(kind = ?err.kind(), "rejected command line");

    report_error(gitlet_error.into())
}

fn report_error(err: anyhow::Error) -> ExitCode {
    match err.downcast_ref::<GitletError>() {
        Some(user_error) if user_error.is_user_error() => {
            println!("{user_error}");
            ExitCode::from(1)
        }
        _ => {
            eprintln!("fatal: {err:#}");
            ExitCode::from(2)
        }
    }
}
