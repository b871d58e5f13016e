use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gandi_ldns::{config::Settings, reconcile, Error};

#[derive(Parser)]
#[command(name = "gandi-ldns")]
#[command(about = "Dynamic DNS updater - points a LiveDNS A record at this host's public IP")]
#[command(version)]
struct Cli {
    /// TOML file with the same keys as the environment (environment wins)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Update the A record if the public IP changed (default)
    Update,

    /// Compare the public IP with the zone without writing anything
    Check,

    /// Show the effective configuration
    Config,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load config before logging so its level applies
    let settings = Settings::load(cli.config.as_deref());

    let log_level = cli
        .log_level
        .clone()
        .or_else(|| settings.as_ref().ok().map(|s| s.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    init_logging(&log_level);

    match cli.command.unwrap_or(Commands::Update) {
        Commands::Update => match settings {
            Ok(settings) => run_update(&settings).await,
            Err(e) => fail(e),
        },

        Commands::Check => match settings {
            Ok(settings) => run_check(&settings).await,
            Err(e) => fail(e),
        },

        Commands::Config => show_config(settings).unwrap_or_else(|e| {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }),
    }
}

fn fail(err: Error) -> ExitCode {
    eprintln!("Error: {}", err);
    ExitCode::from(err.exit_code())
}

async fn run_update(settings: &Settings) -> ExitCode {
    let target = settings.target();
    println!("Checking {} ...", target);

    match reconcile::update(settings).await {
        Ok(outcome) => {
            println!("{}", outcome);
            ExitCode::SUCCESS
        }
        Err(e) => fail(e),
    }
}

async fn run_check(settings: &Settings) -> ExitCode {
    let target = settings.target();
    println!("Checking {} ...\n", target);

    let plan = match reconcile::check(settings).await {
        Ok(plan) => plan,
        Err(e) => return fail(e),
    };

    println!("Public IP: {}", plan.public_ip);
    println!(
        "Zone IP:   {}",
        plan.zone_ip.as_deref().unwrap_or("(no A record)")
    );

    if plan.is_current() {
        println!("\nRecord up to date");
    } else {
        println!("\nUpdate needed. Run 'gandi-ldns update' to apply it.");
    }

    ExitCode::SUCCESS
}

fn show_config(settings: Result<Settings, Error>) -> anyhow::Result<ExitCode> {
    match settings {
        Ok(s) => {
            println!("Effective configuration:\n");
            println!("{}", toml::to_string_pretty(&s)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{}\n", e);
            println!("Set the variables in the environment, or pass --config with a file like:\n");
            println!(
                r#"api_key = "your-livedns-api-key"
domain = "example.com"
# subdomain = "vpn"
# ttl = 10800
# api_url = "https://dns.api.gandi.net/api/v5/"
# ip_url = "https://api.ipify.org"
# log_level = "info"
"#
            );
            Ok(ExitCode::from(e.exit_code()))
        }
    }
}
