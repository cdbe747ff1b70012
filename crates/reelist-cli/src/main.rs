use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{auth, browse, clear, details, list};
use reelist_models::SortBy;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelist")]
#[command(about = "Reelist - browse the movie catalog and keep your watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortArg {
    /// Insertion order
    Added,
    /// Highest rated first
    Rating,
}

impl From<SortArg> for SortBy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Added => SortBy::Added,
            SortArg::Rating => SortBy::Rating,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in to your account
    #[command(long_about = "Sign in with email and password. On success the session is stored locally and your personal watchlist becomes the active list.")]
    Login {
        /// Email address (if not provided, will prompt)
        #[arg(long)]
        email: Option<String>,
    },
    /// Create a new account
    #[command(long_about = "Create a new account with a display name, email and password (minimum 6 characters), then sign in as that account.")]
    Signup {
        /// Display name (if not provided, will prompt)
        #[arg(long)]
        name: Option<String>,

        /// Email address (if not provided, will prompt)
        #[arg(long)]
        email: Option<String>,
    },
    /// Sign out and return to the guest watchlist
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Browse catalog shelves
    #[command(long_about = "Browse a catalog category (popular, top_rated, upcoming, trending, now_playing, or a tv_ prefixed variant). Without a category, shows the home shelves.")]
    Browse {
        /// Category token (e.g. popular, trending, tv_popular)
        category: Option<String>,

        /// Language for catalog results (en, hi, es, or a full tag)
        #[arg(long)]
        lang: Option<String>,

        /// Result page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search the catalog by title
    Search {
        /// Search phrase
        query: String,

        /// Language for catalog results (en, hi, es, or a full tag)
        #[arg(long)]
        lang: Option<String>,

        /// Result page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Show details and cast for a title
    Details {
        /// Catalog item id
        id: u64,

        /// Language for catalog results (en, hi, es, or a full tag)
        #[arg(long)]
        lang: Option<String>,
    },
    /// Show the trailer link for a title
    Trailer {
        /// Catalog item id
        id: u64,
    },
    /// Show the active watchlist
    List {
        /// Presentation order
        #[arg(long, default_value = "added", value_enum)]
        sort: SortArg,
    },
    /// Add a title to the active watchlist
    Add {
        /// Catalog item id
        id: u64,
    },
    /// Remove a title from the active watchlist
    Remove {
        /// Catalog item id
        id: String,
    },
    /// Clear stored data
    #[command(long_about = "Clear stored data. Use --watchlists to drop every stored watchlist, --session to drop the stored session, --credentials to drop provider tokens, or --all for everything.")]
    Clear {
        /// Clear everything
        #[arg(long, action = ArgAction::SetTrue)]
        all: bool,

        /// Clear all stored watchlists
        #[arg(long, action = ArgAction::SetTrue)]
        watchlists: bool,

        /// Clear the stored session
        #[arg(long, action = ArgAction::SetTrue)]
        session: bool,

        /// Clear stored provider tokens
        #[arg(long, action = ArgAction::SetTrue)]
        credentials: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Login { email } => auth::run_login(email, &output).await,
        Commands::Signup { name, email } => auth::run_signup(name, email, &output).await,
        Commands::Logout => auth::run_logout(&output).await,
        Commands::Whoami => auth::run_whoami(&output),
        Commands::Browse { category, lang, page } => {
            browse::run_browse(category, lang, page, &output).await
        }
        Commands::Search { query, lang, page } => {
            browse::run_search(query, lang, page, &output).await
        }
        Commands::Details { id, lang } => details::run_details(id, lang, &output).await,
        Commands::Trailer { id } => details::run_trailer(id, &output).await,
        Commands::List { sort } => list::run_list(sort.into(), &output),
        Commands::Add { id } => list::run_add(id, &output).await,
        Commands::Remove { id } => list::run_remove(&id, &output),
        Commands::Clear {
            all,
            watchlists,
            session,
            credentials,
        } => clear::run_clear(all, watchlists, session, credentials, &output),
    }
}
