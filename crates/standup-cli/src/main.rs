mod cmd_serve;
mod cmd_summary;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use standup_serve::AppConfig;

#[derive(Parser)]
#[command(name = "standup", version, about = "Daily GitHub activity digest for team chat")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Args)]
struct CommonOpts {
    /// Path to the activity store database
    #[arg(long, default_value = "standup.db", env = "STANDUP_DB")]
    db: PathBuf,
    /// Reference timezone for bucketing activity into days
    #[arg(long, default_value = standup_core::clock::DEFAULT_ZONE)]
    timezone: String,
    /// Slack incoming-webhook URL for digest delivery
    #[arg(long, env = "SLACK_WEBHOOK_URL")]
    slack_webhook_url: Option<String>,
}

impl CommonOpts {
    fn into_config(self) -> AppConfig {
        AppConfig {
            db_path: self.db,
            timezone: self.timezone,
            slack_webhook_url: self.slack_webhook_url,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Run the webhook receiver and summary-trigger HTTP server
    Serve {
        #[command(flatten)]
        common: CommonOpts,
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
        /// Port
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Compose a digest and deliver it to Slack
    Summary {
        #[command(flatten)]
        common: CommonOpts,
        /// Aggregate this date (YYYYMMDD) instead of today
        #[arg(long)]
        date: Option<String>,
        /// Print the report as JSON instead of delivering it
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Command::Serve { common, bind, port } => {
            cmd_serve::execute(common.into_config(), &bind, port)
        }
        Command::Summary {
            common,
            date,
            dry_run,
        } => cmd_summary::execute(common.into_config(), date.as_deref(), dry_run),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
