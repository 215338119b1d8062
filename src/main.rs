#![warn(clippy::all, clippy::pedantic)]

use chrono::Utc;
use clap::Parser;
use gritpost::cli::{Cli, Commands, render_status};
use gritpost::compose::{Compositor, ensure_font_exists, load_font};
use gritpost::config::Config;
use gritpost::error::ConfigError;
use gritpost::pipeline::{RunOutcome, run_once};
use gritpost::providers::{
    ChatDirectiveClient, ImageGenerator, OpenAiImageClient, SyntheticImage,
};
use gritpost::publish::PageFeedClient;
use gritpost::state::{FileStore, KillSwitch, StateStore};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // Scheduler environments commonly carry a .env alongside the binary.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();
    let code = match dispatch(cli).await {
        Ok(()) => 0,
        Err(e) => {
            error!(error = %e, "run failed");
            e.exit_code()
        }
    };
    std::process::exit(i32::from(code));
}

async fn dispatch(cli: Cli) -> gritpost::Result<()> {
    match cli.command {
        Commands::Run { dry_run, force } => run(dry_run, force).await,
        Commands::Status => {
            let cfg = status_config()?;
            let store = FileStore::new(&cfg.state_dir);
            let now = Utc::now().with_timezone(&cfg.timezone);
            print!("{}", render_status(&cfg, &store, now)?);
            Ok(())
        }
        Commands::Enable => {
            let cfg = status_config()?;
            let store = FileStore::new(&cfg.state_dir);
            store.set_kill_switch(&KillSwitch::Active)?;
            info!("posting re-enabled");
            Ok(())
        }
        Commands::Disable { reason } => {
            let cfg = status_config()?;
            let store = FileStore::new(&cfg.state_dir);
            let now = Utc::now().with_timezone(&cfg.timezone);
            store.set_kill_switch(&KillSwitch::Disabled {
                reason,
                since: now.date_naive(),
            })?;
            info!("posting disabled until `gritpost enable`");
            Ok(())
        }
    }
}

/// Status/enable/disable never post, so missing credentials must not stop
/// them: read the config as if in dry-run mode.
fn status_config() -> Result<Config, ConfigError> {
    Config::from_lookup(|name| {
        if name == "DRY_RUN" {
            Some("true".to_string())
        } else {
            std::env::var(name).ok()
        }
    })
}

async fn run(dry_run_flag: bool, force_flag: bool) -> gritpost::Result<()> {
    let mut cfg = if dry_run_flag {
        status_config()?
    } else {
        Config::from_env()?
    };
    cfg.dry_run |= dry_run_flag;
    cfg.force_post |= force_flag;

    // Fatal configuration checks before any network call.
    ensure_font_exists(&cfg.font_path)?;
    let font = load_font(&cfg.font_path)?;
    let compositor = Compositor::new(font, cfg.watermark.clone());

    let store = FileStore::new(&cfg.state_dir);

    let generator: Box<dyn ImageGenerator> = if cfg.dry_run {
        Box::new(SyntheticImage::default())
    } else {
        let key = cfg
            .openai_api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;
        Box::new(OpenAiImageClient::new(
            &cfg.image_api_base,
            key,
            &cfg.image_model,
            &cfg.image_size,
        ))
    };

    let publisher = if cfg.dry_run {
        None
    } else {
        let token = cfg
            .page_access_token
            .as_deref()
            .ok_or(ConfigError::MissingVar("PAGE_ACCESS_TOKEN"))?;
        let page_id = cfg
            .page_id
            .as_deref()
            .ok_or(ConfigError::MissingVar("PAGE_ID"))?;
        Some(PageFeedClient::new(&cfg.graph_api_base, token, page_id))
    };

    let chat = if cfg.chat_directive && !cfg.dry_run {
        let key = cfg
            .openai_api_key
            .as_deref()
            .ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;
        Some(ChatDirectiveClient::new(
            &cfg.image_api_base,
            key,
            &cfg.chat_model,
        ))
    } else {
        None
    };

    let outcome = run_once(
        &cfg,
        &store,
        generator.as_ref(),
        &compositor,
        publisher.as_ref(),
        chat.as_ref(),
    )
    .await?;

    match outcome {
        RunOutcome::Posted => info!("posted"),
        RunOutcome::DryRun => info!("dry run finished"),
        RunOutcome::Skipped(reason) => info!(%reason, "skipped"),
    }
    Ok(())
}
