//! Clara onboarding wizard launcher

#[cfg(feature = "tui")]
use anyhow::Context;
#[cfg(feature = "tui")]
use clap::Parser;
#[cfg(feature = "tui")]
use clara_onboarding::{logging, tui::run_tui, OnboardingConfig};
#[cfg(feature = "tui")]
use std::path::PathBuf;

#[cfg(feature = "tui")]
#[derive(Parser)]
#[command(name = "clara-onboarding")]
#[command(about = "Set up a Clara AI receptionist for your business")]
#[command(version)]
struct Args {
    /// Configuration file (defaults to ~/.config/clara-onboarding/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Origin of the onboarding site; loopback hosts select the local API
    #[arg(long)]
    site_url: Option<String>,

    /// Base URL of the local provisioning server
    #[arg(long)]
    local_api_url: Option<String>,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    init_config: bool,

    /// Verbose logging
    #[arg(short, long)]
    debug: bool,
}

#[cfg(feature = "tui")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let log_path =
        logging::init_file_logging(args.debug).context("failed to initialize logging")?;

    let mut config =
        OnboardingConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    if let Some(site_url) = args.site_url {
        config = config.with_site_url(site_url);
    }
    if let Some(local_api_url) = args.local_api_url {
        config = config.with_local_api_url(local_api_url);
    }

    if args.init_config {
        let path = args.config.unwrap_or_else(OnboardingConfig::default_path);
        config
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    let endpoint = config
        .onboard_url()
        .context("invalid provisioning endpoint")?;
    tracing::info!(%endpoint, log = %log_path.display(), "starting onboarding");

    run_tui(config).await.context("onboarding wizard failed")?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("clara-onboarding was built without the `tui` feature.");
    eprintln!("Rebuild with: cargo build --features tui");
    std::process::exit(1);
}
