use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use eloan_cli::cli::{
    handle_application_command, handle_loan_command, handle_ticket_command, handle_user_command,
    ApplicationCommands, LoanCommands, TicketCommands, UserCommands,
};
use eloan_cli::config::{EloanPaths, Settings};
use eloan_cli::crypto::{EncryptionKey, FieldCipher, ENCRYPTION_KEY_ENV};
use eloan_cli::reports::portfolio_stats;
use eloan_cli::storage::Storage;

#[derive(Parser)]
#[command(
    name = "eloan",
    version,
    about = "Terminal-based loan origination and servicing application",
    long_about = "eLoan manages a loan product catalog, borrower accounts, loan \
                  applications with encrypted bank details, support tickets, and \
                  reducing-balance repayment schedules, all from the command line."
)]
struct Cli {
    /// Log filter (e.g. "info" or "eloan_cli=debug")
    #[arg(long, default_value = "warn", env = "ELOAN_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Account management commands
    #[command(subcommand)]
    User(UserCommands),

    /// Loan catalog commands
    #[command(subcommand)]
    Loan(LoanCommands),

    /// Loan application commands
    #[command(subcommand, alias = "app")]
    Application(ApplicationCommands),

    /// Support ticket commands
    #[command(subcommand)]
    Ticket(TicketCommands),

    /// Show portfolio statistics
    Stats,

    /// Generate a fresh encryption key for the key environment variable
    Keygen,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Keygen exists to mint the key, so it is the one command that runs
    // without one.
    if matches!(cli.command, Commands::Keygen) {
        println!("{}", EncryptionKey::generate().to_hex());
        println!();
        println!("Export it before running other commands:");
        println!("  export {}=<the key above>", ENCRYPTION_KEY_ENV);
        return Ok(());
    }

    let paths = EloanPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    // A missing or malformed key makes every encrypted-field operation
    // meaningless, so it is loaded before any command is dispatched.
    let key = EncryptionKey::from_env()?;
    let cipher = FieldCipher::new(&key)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Commands::User(cmd) => handle_user_command(&storage, &cipher, cmd)?,
        Commands::Loan(cmd) => handle_loan_command(&storage, &settings, cmd)?,
        Commands::Application(cmd) => {
            handle_application_command(&storage, &cipher, &settings, cmd)?
        }
        Commands::Ticket(cmd) => handle_ticket_command(&storage, &cipher, cmd)?,
        Commands::Stats => {
            let stats = portfolio_stats(&storage)?;
            println!("Borrowers:          {}", stats.total_borrowers);
            println!("Loan products:      {}", stats.total_products);
            println!("Applications:       {}", stats.total_applications);
            println!(
                "Amount requested:   {}{}",
                settings.currency_symbol, stats.total_amount_requested
            );
            println!("  pending:                  {}", stats.pending);
            println!("  processing:               {}", stats.processing);
            println!("  accepted-not-disbursed:   {}", stats.accepted);
            println!("  accepted-disbursed:       {}", stats.disbursed);
            println!("  rejected:                 {}", stats.rejected);
        }
        Commands::Keygen => unreachable!("handled before storage setup"),
        Commands::Config => {
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Settings file:   {}", paths.settings_file().display());
            println!("Currency:        {}", settings.currency_symbol);
            println!("Date format:     {}", settings.date_format);
        }
    }

    Ok(())
}
