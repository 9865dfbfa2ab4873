// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use creditsea::logging::{self, LogTarget};
use creditsea::screens::report_detail::{detail_view, error_line, MSG_NOT_FOUND};
use creditsea::screens::report_list::count_caption;
use creditsea::view::Severity;
use creditsea::{
    ApiClient, Config, DetailState, ListState, ReportCard, ReportDetailScreen, ReportListScreen,
    RequestKey, UploadScreen,
};

/// CreditSea credit report client.
///
/// Upload Experian XML credit reports and browse the parsed results.
/// Without a subcommand the interactive terminal UI starts.
#[derive(Parser)]
#[command(name = "creditsea", version, about)]
struct Cli {
    /// Backend base URL (overrides CREDITSEA_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive terminal UI (default)
    Tui {
        /// Start on this route, e.g. /reports or /reports/<id>
        #[arg(long, default_value = "/")]
        route: String,
    },
    /// Upload one XML report and print the result
    Upload {
        /// Path to the .xml file
        file: PathBuf,
    },
    /// List uploaded reports
    List {
        /// Filter by name or PAN (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show one report in full
    Show {
        /// Report id
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url).context("Invalid --api-url")?;
    }

    let command = cli.command.unwrap_or(Command::Tui { route: "/".to_string() });

    let target = match command {
        Command::Tui { .. } => LogTarget::File(config.log_file.clone()),
        _ => LogTarget::Stderr,
    };
    logging::init(cli.verbose, target);
    tracing::info!("creditsea {} using {}", creditsea::VERSION, config.api_url);
    if let Some(timeout) = config.http_timeout {
        tracing::debug!("HTTP timeout: {:?}", timeout);
    }

    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let client = ApiClient::new(&config).context("Failed to create HTTP client")?;

    match command {
        Command::Tui { route } => run_ui_mode(&runtime, &client, &route),
        Command::Upload { file } => run_upload(&runtime, &client, &file),
        Command::List { search } => run_list(&runtime, &client, search.as_deref()),
        Command::Show { id } => run_show(&runtime, &client, &id),
    }
}

#[cfg(feature = "tui")]
fn run_ui_mode(runtime: &Runtime, client: &ApiClient, route: &str) -> Result<()> {
    let route = creditsea::Route::parse_or_default(route);
    let (mut app, initial) = creditsea::App::start(route);

    ui::run_ui(&mut app, initial, client, runtime.handle())?;

    tracing::info!("UI closed");
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_runtime: &Runtime, _client: &ApiClient, _route: &str) -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use the command line: creditsea list | show <id> | upload <file>");
    std::process::exit(1);
}

fn run_upload(runtime: &Runtime, client: &ApiClient, file: &std::path::Path) -> Result<()> {
    let mut screen = UploadScreen::new();

    if !screen.select_path(&file.to_string_lossy()) {
        if let Some(notice) = screen.notice() {
            eprintln!("{} {}", notice.severity.icon(), notice.text);
        }
        std::process::exit(1);
    }

    let key = RequestKey::new(1, None);
    let Some(selected) = screen.submit(key.clone()) else {
        std::process::exit(1);
    };
    if let Some(notice) = screen.notice() {
        println!("{} {}", notice.severity.icon(), notice.text);
    }

    let result = runtime.block_on(client.upload_report(&selected));
    screen.finish(&key, result);

    let failed = match screen.notice() {
        Some(notice) => {
            println!("{} {}", notice.severity.icon(), notice.text);
            notice.severity == Severity::Error
        }
        None => false,
    };
    for line in screen.summary_lines() {
        println!("   {}", line.plain_text());
    }

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn run_list(runtime: &Runtime, client: &ApiClient, search: Option<&str>) -> Result<()> {
    let key = RequestKey::new(1, None);
    let mut screen = ReportListScreen::new(key.clone());
    screen.finish(&key, runtime.block_on(client.list_reports()));
    if let Some(query) = search {
        screen.set_query(query);
    }

    if let ListState::Error(message) = screen.state() {
        eprintln!("❌ {}", message);
        std::process::exit(1);
    }

    println!("📋 Credit Reports - {}", count_caption(screen.total()));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if let Some(empty) = screen.empty_state() {
        println!("{}", empty.title());
        println!("{}", empty.hint());
        return Ok(());
    }

    for report in screen.visible() {
        let card = ReportCard::from_report(report);
        let id = report.id.as_deref().unwrap_or("-");
        println!();
        match &card.pan {
            Some(pan) => println!("{}  PAN: {}  [{}]", card.name, pan, id),
            None => println!("{}  [{}]", card.name, id),
        }
        println!("   Score: {} ({})", card.score, card.tier.label());
        println!(
            "   Uploaded: {}  Accounts: {}  Credit Cards: {}  Balance: {}",
            card.uploaded, card.total_accounts, card.credit_cards, card.balance
        );
    }

    Ok(())
}

fn run_show(runtime: &Runtime, client: &ApiClient, id: &str) -> Result<()> {
    let key = RequestKey::new(1, Some(id.to_string()));
    let mut screen = ReportDetailScreen::new(id, key.clone());
    screen.finish(&key, runtime.block_on(client.get_report(id)));

    match screen.state() {
        DetailState::Loaded(report) => {
            print!("{}", detail_view(report).plain_text());
            Ok(())
        }
        DetailState::NotFound => {
            eprintln!("{}", MSG_NOT_FOUND);
            std::process::exit(1);
        }
        DetailState::Error(message) => {
            eprintln!("{}", error_line(message));
            std::process::exit(1);
        }
        DetailState::Loading { .. } => Ok(()),
    }
}
