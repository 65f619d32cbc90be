use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use account_ledger::cli::{
    handle_list_command, handle_record_command, handle_report_command, Console, ListArgs, Menu,
    RecordArgs, ReportCommands,
};
use account_ledger::config::{LedgerConfig, LedgerPaths, Settings};
use account_ledger::models::TransactionKind;
use account_ledger::storage::Ledger;

#[derive(Parser)]
#[command(
    name = "ledger",
    author = "Kaylee Beyene",
    version,
    about = "Terminal personal ledger for deposits and payments",
    long_about = "Records deposits and payments in a pipe-delimited ledger file and \
                  browses them by period, vendor or custom search, either through \
                  an interactive menu or one-shot subcommands."
)]
struct Cli {
    /// Ledger file to load (defaults to the configured or standard location)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// File to write after each change (defaults to the source file)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (the default)
    Menu,

    /// Create a new ledger file holding only a header line
    Init {
        /// Header line to write
        #[arg(long)]
        header: Option<String>,
    },

    /// Record a deposit
    Deposit(RecordArgs),

    /// Record a payment
    #[command(alias = "pay")]
    Payment(RecordArgs),

    /// Show the ledger, newest first
    #[command(alias = "ls")]
    List(ListArgs),

    /// Period, vendor and search reports
    #[command(subcommand)]
    Report(ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    account_ledger::logging::init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LedgerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let config = LedgerConfig::resolve(
        &paths,
        &settings,
        cli.source.as_deref(),
        cli.output.as_deref(),
    );
    let symbol = settings.currency_symbol.as_str();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let mut ledger = load_ledger(config)?;
            Menu::new(&mut ledger, Console::stdio())
                .with_currency_symbol(symbol)
                .run();
            // Records whose save failed mid-session get one last attempt
            if ledger.is_dirty() {
                ledger.save()?;
            }
        }
        Commands::Init { header } => {
            let header = header.unwrap_or_else(|| settings.default_header.clone());
            let ledger = Ledger::create(config, header)?;
            println!(
                "Created ledger at: {}",
                ledger.config().source_path.display()
            );
        }
        Commands::Deposit(args) => {
            let mut ledger = load_ledger(config)?;
            handle_record_command(&mut ledger, TransactionKind::Deposit, args, symbol)?;
        }
        Commands::Payment(args) => {
            let mut ledger = load_ledger(config)?;
            handle_record_command(&mut ledger, TransactionKind::Payment, args, symbol)?;
        }
        Commands::List(args) => {
            let mut ledger = load_ledger(config)?;
            handle_list_command(&mut ledger, args, symbol)?;
        }
        Commands::Report(cmd) => {
            let mut ledger = load_ledger(config)?;
            handle_report_command(&mut ledger, cmd, Local::now().date_naive(), symbol)?;
        }
        Commands::Config => {
            println!("Ledger Configuration");
            println!("====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Source file:    {}", config.source_path.display());
            println!("Output file:    {}", config.output_path.display());
            println!();
            println!("Settings:");
            println!("  Default header:  {}", settings.default_header);
            println!("  Currency symbol: {}", settings.currency_symbol);
        }
    }

    Ok(())
}

fn load_ledger(config: LedgerConfig) -> Result<Ledger> {
    Ledger::load(config).map_err(|e| {
        if e.is_not_found() {
            anyhow!("{} (run `ledger init` to create it)", e)
        } else {
            e.into()
        }
    })
}
