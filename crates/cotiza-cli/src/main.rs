mod commands;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cotiza",
    version,
    about = "Side-by-side comparison of Mexican auto insurance quotes (HDI, Qualitas, ANA, Atlas)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare quote documents (PDF or pre-extracted .txt) side by side
    Compare {
        /// Quote files, one per insurer
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Write the comparison as JSON to a file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Custom vendor profile(s); each replaces the built-in profile of its insurer
        #[arg(short, long = "profile", value_name = "FILE")]
        profile: Vec<PathBuf>,

        /// TOML file with comparison settings
        #[arg(long, env = "COTIZA_CONFIG", value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Identify and extract a single quote without comparing
    Parse {
        /// Path to PDF or .txt file
        input_file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// TOML file with comparison settings
        #[arg(long, env = "COTIZA_CONFIG", value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Inspect and validate vendor extraction profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text grid
    Table,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List built-in vendor profiles
    List,
    /// Show how a vendor's quote is identified and read
    Explain {
        /// Insurer key: hdi, qualitas, ana or atlas
        company: String,
    },
    /// Print the comparison fields in table order
    Fields,
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compare {
            files,
            output,
            out,
            profile,
            config,
        } => commands::compare::run(files, output, out, profile, config),
        Commands::Parse {
            input_file,
            output,
            config,
        } => commands::parse::run(input_file, output, config),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Explain { company } => commands::profiles::explain(&company),
            ProfilesAction::Fields => commands::profiles::fields(),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
