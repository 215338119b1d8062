use crate::compose::{Overlay, Placement};
use crate::config::Config;
use crate::content::{self, SelectorState};
use crate::error::{BotError, Result};
use crate::gate::{self, Decision, DenyReason, GateOptions, GateState};
use crate::providers::{ChatDirectiveClient, ImageGenerator};
use crate::publish::PageFeedClient;
use crate::state::{EngagementEntry, KillSwitch, StateStore};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use tracing::{error, info, warn};

/// Terminal result of one invocation. A gate denial is a clean "nothing to
/// do", not an error; the scheduler sees exit code 0 for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Posted,
    DryRun,
    Skipped(DenyReason),
}

/// What was chosen for today's post, unified across the bank selector and
/// the optional chat directive.
struct Chosen {
    scene_key: String,
    text: String,
    prompt: String,
    placement: Placement,
    holiday: Option<&'static str>,
}

fn record_failure(
    store: &dyn StateStore,
    now: DateTime<Tz>,
    scene: &str,
    text: &str,
    detail: &str,
) {
    let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    if let Err(e) = store.append_error(&stamp, detail) {
        error!(error = %e, "error log append failed");
    }
    let entry = EngagementEntry::new(now, scene, text, &format!("FAILED: {detail}"));
    if let Err(e) = store.append_engagement(&entry) {
        error!(error = %e, "engagement log append failed");
    }
}

fn trip_kill_switch(store: &dyn StateStore, now: DateTime<Tz>, reason: &str) {
    let switch = KillSwitch::Disabled {
        reason: reason.to_string(),
        since: now.date_naive(),
    };
    if let Err(e) = store.set_kill_switch(&switch) {
        error!(error = %e, "failed to persist kill switch");
    } else {
        warn!(reason, "kill switch tripped; posting stays disabled until `enable`");
    }
}

/// One scheduled invocation: gate, probe, select, generate, composite,
/// publish, and — only after a successful publish — the ordered state commit.
///
/// `publisher` is `None` in dry-run mode; `chat` is `None` unless the
/// chat-directive flow is enabled.
pub async fn run_once(
    cfg: &Config,
    store: &dyn StateStore,
    generator: &dyn ImageGenerator,
    overlay: &dyn Overlay,
    publisher: Option<&PageFeedClient>,
    chat: Option<&ChatDirectiveClient>,
) -> Result<RunOutcome> {
    let now = Utc::now().with_timezone(&cfg.timezone);
    run_at(now, cfg, store, generator, overlay, publisher, chat).await
}

/// Same as [`run_once`] with an injected clock, so tests can pin the date.
pub async fn run_at(
    now: DateTime<Tz>,
    cfg: &Config,
    store: &dyn StateStore,
    generator: &dyn ImageGenerator,
    overlay: &dyn Overlay,
    publisher: Option<&PageFeedClient>,
    chat: Option<&ChatDirectiveClient>,
) -> Result<RunOutcome> {
    let today = now.date_naive();
    let month_key = now.format("%Y-%m").to_string();

    // Gate check: all reads first, decision on the snapshot.
    let gate_state = GateState {
        kill_switch: store.kill_switch()?,
        daily_marker: store.daily_marker()?,
        monthly_count: store.monthly_count(&month_key)?,
    };
    let gate_opts = GateOptions {
        windows: cfg.post_windows.clone(),
        monthly_cap: cfg.max_monthly_images,
        force: cfg.force_post,
        dry_run: cfg.dry_run,
    };
    if let Decision::Deny(reason) = gate::evaluate(now, &gate_state, &gate_opts) {
        info!(%reason, "gate denied; nothing to do");
        return Ok(RunOutcome::Skipped(reason));
    }

    // Token health probe, before anything that costs money. Skipped entirely
    // in dry-run mode (no publisher).
    if let Some(publisher) = publisher {
        if let Err(probe_err) = publisher.check_token().await {
            let detail = format!("token health probe failed: {probe_err}");
            let stamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
            if let Err(e) = store.append_error(&stamp, &detail) {
                error!(error = %e, "error log append failed");
            }
            trip_kill_switch(store, now, &detail);
            if cfg.force_post {
                warn!("force post set; continuing past failed token probe");
            } else {
                return Err(BotError::Publish(probe_err));
            }
        }
    }

    // Content decision. Free of charge, so it happens after the gates.
    let chosen = if let Some(chat) = chat {
        let directive = match chat
            .directive("Write today's post directive for a hustle-culture page.")
            .await
        {
            Ok(directive) => directive,
            Err(e) => {
                record_failure(store, now, "directive", "", &e.to_string());
                return Err(e);
            }
        };
        info!(scene = %directive.scene, "chat directive accepted");
        Chosen {
            scene_key: directive.scene.clone(),
            prompt: content::holiday_prompt(&directive.scene),
            text: directive.text,
            placement: directive.position,
            holiday: None,
        }
    } else {
        let selector_state = SelectorState {
            content_history: store.content_history()?,
            scene_history: store.scene_history()?,
            holidays_used: store.holiday_ledger(today.year())?,
            content_cooldown_days: cfg.content_cooldown_days,
            scene_cooldown_days: cfg.scene_cooldown_days,
        };
        let selection = content::select(today, &selector_state, &mut rand::rng());
        match selection.holiday_name() {
            Some(name) => info!(holiday = name, "holiday post"),
            None => info!(scene = %selection.scene_key(), "regular post"),
        }
        Chosen {
            scene_key: selection.scene_key(),
            text: selection.text().to_string(),
            prompt: selection.prompt(),
            placement: Placement::Auto,
            holiday: selection.holiday_name(),
        }
    };

    // Generate. From here on every failure is recorded against the chosen
    // scene and text.
    let raw = match generator.generate(&chosen.prompt).await {
        Ok(bytes) => bytes,
        Err(e) => {
            record_failure(store, now, &chosen.scene_key, &chosen.text, &e.to_string());
            return Err(e);
        }
    };

    let final_image = match overlay.composite(&raw, &chosen.text, chosen.placement) {
        Ok(bytes) => bytes,
        Err(e) => {
            record_failure(store, now, &chosen.scene_key, &chosen.text, &e.to_string());
            return Err(e.into());
        }
    };

    let Some(publisher) = publisher else {
        // Dry run: full pipeline minus the paid surfaces, no state commit.
        store.append_engagement(&EngagementEntry::new(
            now,
            &chosen.scene_key,
            &chosen.text,
            "DRY_RUN",
        ))?;
        info!("dry run complete; no state committed");
        return Ok(RunOutcome::DryRun);
    };

    let caption = cfg.caption.then_some(chosen.text.as_str());
    if let Err(publish_err) = publisher.publish(final_image, caption).await {
        let detail = format!("publish failed: {publish_err}");
        trip_kill_switch(store, now, &detail);
        record_failure(store, now, &chosen.scene_key, &chosen.text, &detail);
        return Err(BotError::Publish(publish_err));
    }

    // Commit, in this order. A crash mid-sequence can double-post within the
    // same window on the next run; accepted for a once-a-day cadence.
    store.set_daily_marker(today)?;
    store.increment_monthly(&month_key)?;
    store.mark_content_used(&chosen.text, today)?;
    store.mark_scene_used(&chosen.scene_key, today)?;
    if let Some(holiday) = chosen.holiday {
        store.mark_holiday_used(today.year(), holiday)?;
    }
    store.append_engagement(&EngagementEntry::new(
        now,
        &chosen.scene_key,
        &chosen.text,
        "SUCCESS",
    ))?;

    info!(scene = %chosen.scene_key, "post committed");
    Ok(RunOutcome::Posted)
}
