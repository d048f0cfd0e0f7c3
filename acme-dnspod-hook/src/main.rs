//! certbot manual-hook entry point.
//!
//! certbot invokes the hook with `CERTBOT_DOMAIN` and `CERTBOT_VALIDATION`
//! in the environment (`--manual-auth-hook` / `--manual-cleanup-hook`);
//! flags take precedence for manual runs. All record decisions live in
//! `acme-dnspod-client`; this binary only wires configuration to it.

mod credentials;

use std::path::PathBuf;
use std::process::ExitCode;

use acme_dnspod_client::DnspodClient;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Label prepended to the validated domain to form the challenge record name.
const CHALLENGE_LABEL: &str = "_acme-challenge";

#[derive(Parser)]
#[command(name = "acme-dnspod-hook")]
#[command(about = "DNSPod dns-01 challenge hook for certbot")]
struct Cli {
    /// Credentials file (`key = value` lines: api_token, ttl, contact_email)
    #[arg(long, default_value = "/etc/letsencrypt/dnspod.ini")]
    credentials: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Publish the validation token (use as --manual-auth-hook)
    Auth {
        /// Domain being validated
        #[arg(long, env = "CERTBOT_DOMAIN")]
        domain: String,

        /// Validation token to publish
        #[arg(long, env = "CERTBOT_VALIDATION")]
        validation: String,
    },

    /// Remove the validation record (use as --manual-cleanup-hook)
    Cleanup {
        /// Domain that was validated
        #[arg(long, env = "CERTBOT_DOMAIN")]
        domain: String,

        /// Validation token the record is expected to hold
        #[arg(long, env = "CERTBOT_VALIDATION")]
        validation: String,
    },

    /// Verify the credentials can see a zone
    Check {
        /// Zone to probe
        #[arg(long)]
        domain: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let creds = credentials::load(&cli.credentials)?;
    let client = DnspodClient::new(creds);

    match cli.command {
        Command::Auth { domain, validation } => {
            let record_name = challenge_record_name(&domain);
            client.ensure_record(&record_name, &validation).await?;
            tracing::info!("published validation token at {record_name}");
        }
        Command::Cleanup { domain, validation } => {
            let record_name = challenge_record_name(&domain);
            client.remove_record(&record_name, &validation).await?;
            tracing::info!("cleaned up validation record at {record_name}");
        }
        Command::Check { domain } => {
            if client.validate_credentials(&domain).await? {
                tracing::info!("credentials can manage {domain}");
            } else {
                anyhow::bail!("credentials rejected for {domain}");
            }
        }
    }
    Ok(())
}

/// certbot hands over the bare domain; the TXT record lives one label below.
fn challenge_record_name(domain: &str) -> String {
    format!("{CHALLENGE_LABEL}.{domain}")
}
