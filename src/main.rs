use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};

use pressroom::bootstrap::{self, ProcessHost};
use pressroom::config::{secret_id_from_env, ConfigLoader};
use pressroom::observability::{init_tracing, ObservabilityConfig};
use pressroom::secrets::{
    EnvVarSecretsClient, FallbackSecretsClient, SecretsClient, VaultSecretsClient,
};
use pressroom::{Error, Result, APP_NAME, VERSION};

/// Fixed operator-facing message printed on any secret-retrieval failure.
/// Deliberately cause-agnostic; the logs carry the typed diagnostic.
const FATAL_CONFIG_MESSAGE: &str =
    "Failed to retrieve database configuration from the secrets backend.";

#[derive(Debug, Parser)]
#[command(name = "pressroom", version, about = "Configuration bootstrap for the Pressroom publishing platform")]
struct Cli {
    /// Secret identifier holding the database bundle
    /// (default: PRESSROOM_DB_SECRET_ID or "book")
    #[arg(long)]
    secret_id: Option<String>,

    /// AWS region hosting the secret (default: PRESSROOM_AWS_REGION,
    /// AWS_REGION, or eu-west-3)
    #[arg(long)]
    region: Option<String>,

    /// Secrets backend to fetch the bundle from
    #[arg(long, value_enum, default_value = "aws")]
    backend: Backend,

    /// Fall back to PRESSROOM_SECRET_* environment variables if the primary
    /// backend fails (development only)
    #[arg(long)]
    allow_env_fallback: bool,

    /// Host application entry point (default: PRESSROOM_HOST_APP)
    #[arg(long)]
    host_app: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    /// AWS Secrets Manager
    Aws,
    /// HashiCorp Vault KV v2
    Vault,
    /// Environment variables (development only)
    Env,
}

async fn build_client(cli: &Cli) -> Result<Box<dyn SecretsClient>> {
    let primary: Box<dyn SecretsClient> = match cli.backend {
        #[cfg(feature = "aws")]
        Backend::Aws => {
            let mut config = pressroom::secrets::AwsBackendConfig::from_env();
            if let Some(ref region) = cli.region {
                config.region = region.clone();
            }
            Box::new(pressroom::secrets::AwsSecretsManagerClient::new(config).await?)
        }
        #[cfg(not(feature = "aws"))]
        Backend::Aws => {
            return Err(Error::config(
                "This build does not include the AWS backend; rebuild with --features aws",
            ));
        }
        Backend::Vault => Box::new(VaultSecretsClient::from_env().await?),
        Backend::Env => Box::new(EnvVarSecretsClient::new()),
    };

    if cli.allow_env_fallback && cli.backend != Backend::Env {
        info!("Environment fallback enabled for secret retrieval");
        Ok(Box::new(FallbackSecretsClient::new(primary, EnvVarSecretsClient::new())))
    } else {
        Ok(primary)
    }
}

async fn run(cli: Cli) -> Result<()> {
    let secret_id = cli.secret_id.clone().unwrap_or_else(secret_id_from_env);

    let host = match cli.host_app.clone() {
        Some(program) => ProcessHost::new(program),
        None => ProcessHost::from_env()?,
    };

    let client = build_client(&cli).await?;
    let loader = ConfigLoader::new(client, secret_id);

    bootstrap::launch(&loader, &host).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env if present; must happen before any config is read from the
    // environment.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let observability_config = ObservabilityConfig::from_env();
    if let Err(e) = init_tracing(&observability_config) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(app_name = APP_NAME, version = VERSION, "Starting Pressroom configuration bootstrap");

    if let Err(e) = run(cli).await {
        error!(error = %e, "Bootstrap failed");
        match e {
            // Secret retrieval failures get the fixed cause-agnostic
            // message the original deployment promised its operators.
            Error::Secrets(_) => eprintln!("{}", FATAL_CONFIG_MESSAGE),
            other => eprintln!("pressroom: {}", other),
        }
        std::process::exit(1);
    }
}
