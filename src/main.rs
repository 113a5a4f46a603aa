use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use ipon::cli::accounts::FormInput;
use ipon::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct FormArgs {
    /// Institution name from `ipon institutions`
    #[arg(short, long)]
    institution: Option<String>,
    /// Custom account name, used with the "Other" institution
    #[arg(short = 'n', long)]
    name: Option<String>,
    /// Balance amount; negative only for credit card accounts
    #[arg(short, long, allow_hyphen_values = true)]
    balance: Option<String>,
}

impl From<FormArgs> for FormInput {
    fn from(args: FormArgs) -> FormInput {
        FormInput {
            institution: args.institution,
            custom_name: args.name,
            balance: args.balance,
        }
    }
}

impl From<Commands> for ipon::AppCommand {
    fn from(cmd: Commands) -> ipon::AppCommand {
        match cmd {
            Commands::List => ipon::AppCommand::List,
            Commands::Overview { select } => ipon::AppCommand::Overview { select },
            Commands::Add(form) => ipon::AppCommand::Add(form.into()),
            Commands::Edit { id, form } => ipon::AppCommand::Edit {
                id,
                input: form.into(),
            },
            Commands::Delete { id } => ipon::AppCommand::Delete { id },
            Commands::Institutions => ipon::AppCommand::Institutions,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display all accounts
    List,
    /// Display the total and how it is spread across accounts
    Overview {
        /// Slice to focus; repeating an index toggles it off again
        #[arg(short, long)]
        select: Vec<usize>,
    },
    /// Add an account
    Add(FormArgs),
    /// Edit an account
    Edit {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete an account
    Delete { id: String },
    /// List institution names
    Institutions,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => ipon::cli::setup::setup(),
        Some(cmd) => ipon::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
