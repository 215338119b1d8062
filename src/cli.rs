use crate::config::Config;
use crate::error::StateError;
use crate::state::{KillSwitch, StateStore};
use chrono::DateTime;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::fmt::Write;

/// `gritpost` — scheduled page-feed image bot.
#[derive(Parser, Debug)]
#[command(name = "gritpost")]
#[command(version)]
#[command(about = "Picks a line and a scene, renders an AI background, overlays \
adaptive typography, publishes once per day.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one invocation of the posting pipeline
    Run {
        /// Skip paid calls and the real publish; use a synthetic image
        #[arg(long)]
        dry_run: bool,

        /// Bypass the time-window and daily gates (never the cap or kill switch)
        #[arg(long)]
        force: bool,
    },

    /// Show gate and state summary without running anything
    Status,

    /// Clear the kill switch and re-enable posting
    Enable,

    /// Trip the kill switch manually
    Disable {
        /// Reason recorded alongside the switch
        #[arg(long, default_value = "manually disabled")]
        reason: String,
    },
}

/// Human-readable state summary for the `status` subcommand.
pub fn render_status(
    cfg: &Config,
    store: &dyn StateStore,
    now: DateTime<Tz>,
) -> Result<String, StateError> {
    let month_key = now.format("%Y-%m").to_string();
    let mut out = String::new();

    match store.kill_switch()? {
        KillSwitch::Active => out.push_str("posting:       enabled\n"),
        KillSwitch::Disabled { reason, since } => {
            let _ = writeln!(out, "posting:       DISABLED since {since} ({reason})");
        }
    }

    match store.daily_marker()? {
        Some(date) if date == now.date_naive() => {
            let _ = writeln!(out, "last post:     {date} (today)");
        }
        Some(date) => {
            let _ = writeln!(out, "last post:     {date}");
        }
        None => out.push_str("last post:     never\n"),
    }

    let _ = writeln!(
        out,
        "monthly usage: {}/{} ({month_key})",
        store.monthly_count(&month_key)?,
        cfg.max_monthly_images
    );

    let windows = cfg
        .post_windows
        .iter()
        .map(|(s, e)| format!("{s:02}:00-{e:02}:00"))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "windows:       {windows} ({})", cfg.timezone.name());

    let _ = writeln!(
        out,
        "cooldowns:     {} lines, {} scenes on record",
        store.content_history()?.len(),
        store.scene_history()?.len()
    );

    Ok(out)
}
