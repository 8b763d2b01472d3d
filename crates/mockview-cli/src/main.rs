//! mockview CLI: practice job interviews from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use mockview_core::model::{Difficulty, JobLevel};

mod app;
mod commands;

use app::GlobalArgs;
use commands::interview::ReportOptions;

#[derive(Parser)]
#[command(name = "mockview", version, about = "Mock-interview practice with scoring and coaching")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory for accounts, saved progress, and history
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config file
    Init,

    /// Create an account and sign in
    Signup {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
    },

    /// Sign in to an existing account
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Start a new practice interview
    Start {
        /// Job role to practice for (e.g. "Data Engineer")
        #[arg(long)]
        role: String,

        /// Experience level: entry, mid, senior
        #[arg(long, default_value = "entry")]
        level: JobLevel,

        /// Difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Directory for the finished report (default: <data-dir>/reports)
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Also write an HTML report
        #[arg(long)]
        html: bool,
    },

    /// Continue an unfinished interview
    Resume {
        /// Directory for the finished report (default: <data-dir>/reports)
        #[arg(long)]
        report_dir: Option<PathBuf>,

        /// Also write an HTML report
        #[arg(long)]
        html: bool,
    },

    /// Show past interviews
    History {
        /// Write the history as an HTML page
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Score a JSON array of answers without running an interview
    Score {
        /// JSON file containing an array of answer strings
        #[arg(long)]
        answers: PathBuf,

        /// Difficulty: easy, medium, hard
        #[arg(long, default_value = "medium")]
        difficulty: Difficulty,

        /// Total time spent answering, in seconds
        #[arg(long, default_value = "0")]
        elapsed: u64,

        /// Print the score breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// List available models
    ListModels {
        /// Filter to specific provider
        #[arg(long)]
        provider: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mockview=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();
    let global = GlobalArgs {
        config: cli.config,
        data_dir: cli.data_dir,
    };

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Signup {
            name,
            email,
            password,
            confirm_password,
        } => commands::account::signup(
            &global,
            commands::account::SignupArgs {
                name,
                email,
                password,
                confirm_password,
            },
        ),
        Commands::Login { email, password } => commands::account::login(&global, email, password),
        Commands::Logout => commands::account::logout(&global),
        Commands::Whoami => commands::account::whoami(&global),
        Commands::Start {
            role,
            level,
            difficulty,
            report_dir,
            html,
        } => {
            commands::interview::start(
                &global,
                role,
                level,
                difficulty,
                ReportOptions { report_dir, html },
            )
            .await
        }
        Commands::Resume { report_dir, html } => {
            commands::interview::resume(&global, ReportOptions { report_dir, html }).await
        }
        Commands::History { html } => commands::history::execute(&global, html),
        Commands::Score {
            answers,
            difficulty,
            elapsed,
            json,
        } => commands::score::execute(&answers, difficulty, elapsed, json),
        Commands::ListModels { provider } => {
            commands::list_models::execute(provider, global.config.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
