mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use config::Config;
use directories::ProjectDirs;
use formpost_client::{
    ConfigService, FileHandle, RecordingSink, ReqwestTransport, SubmissionForm, Transport,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "formpost", version, about = "Post multipart forms and fetch app config")]
struct Cli {
    /// Base URL the endpoints are resolved against
    #[arg(short, long, env = "FORMPOST_SERVER")]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "FORMPOST_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Submit the name field and files as one multipart request
    Submit {
        #[arg(short, long, default_value = "")]
        name: String,

        /// Files to attach, in order
        files: Vec<PathBuf>,
    },
    /// Fetch /api/config and print it
    Config {
        /// Print the body as received instead of pretty JSON
        #[arg(long)]
        raw: bool,
    },
}

fn get_config_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("com", "formpost", "formpost") {
        proj_dirs.config_dir().join("config.toml")
    } else {
        PathBuf::from("config/default.toml")
    }
}

fn build_transport(config: &Config) -> Result<Arc<dyn Transport>> {
    let transport = ReqwestTransport::with_config(
        &config.server.base_url,
        &config.http.user_agent,
        config.http.timeout(),
        config.http.connect_timeout(),
    )
    .with_context(|| format!("invalid server address {}", config.server.base_url))?;
    Ok(Arc::new(transport))
}

async fn run_submit(config: &Config, name: String, paths: Vec<PathBuf>) -> Result<()> {
    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let file = FileHandle::from_path(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?;
        files.push(file);
    }

    let sink = Arc::new(RecordingSink::new());
    let mut form = SubmissionForm::new(build_transport(config)?, sink.clone())
        .with_endpoint(config.endpoints.submit.clone())
        .with_file_field(config.endpoints.file_field.clone());
    form.set_name(name);
    form.select_files(files);
    form.submit().await;

    if sink.failures() > 0 {
        bail!("submission to {} failed", config.endpoints.submit);
    }
    println!("Submitted {} file(s)", form.files().len());
    Ok(())
}

async fn run_config(config: &Config, raw: bool) -> Result<()> {
    let service = ConfigService::new(build_transport(config)?);
    let response = service
        .load_config()
        .await
        .context("failed to load config")?;

    if raw {
        println!("{}", response.text());
        return Ok(());
    }
    match response.json::<serde_json::Value>() {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(e) => {
            tracing::debug!("Config is not JSON: {}", e);
            println!("{}", response.text());
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(get_config_path);
    let mut config = Config::load_or_default(&config_path);
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    match cli.command {
        Commands::Submit { name, files } => run_submit(&config, name, files).await,
        Commands::Config { raw } => run_config(&config, raw).await,
    }
}
