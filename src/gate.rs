use crate::state::KillSwitch;
use chrono::{DateTime, NaiveDate, Timelike};
use chrono_tz::Tz;
use std::fmt;

/// Snapshot of stored facts the gate needs. The orchestrator reads these from
/// the store; the gate itself performs no I/O.
#[derive(Debug, Clone)]
pub struct GateState {
    pub kill_switch: KillSwitch,
    pub daily_marker: Option<NaiveDate>,
    /// Successful generations recorded for the current `"YYYY-MM"`.
    pub monthly_count: u32,
}

#[derive(Debug, Clone)]
pub struct GateOptions {
    /// Posting windows as `(start_hour, end_hour)`, end exclusive.
    pub windows: Vec<(u8, u8)>,
    pub monthly_cap: u32,
    /// Bypasses the time window and daily marker. Never the cap or the switch.
    pub force: bool,
    /// A dry run spends no budget: bypasses window, marker, and cap.
    pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    Disabled,
    OutsideWindow,
    AlreadyPostedToday,
    MonthlyCapReached,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Disabled => "posting disabled by kill switch",
            Self::OutsideWindow => "outside posting window",
            Self::AlreadyPostedToday => "already posted today",
            Self::MonthlyCapReached => "monthly cap reached",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

/// Evaluate every gate in order, short-circuiting on the first denial.
///
/// The kill switch and the monthly cap are cost-safety gates and are never
/// bypassed by `force`; a dry run skips the cap because it generates nothing.
pub fn evaluate(now: DateTime<Tz>, state: &GateState, opts: &GateOptions) -> Decision {
    if state.kill_switch.is_disabled() {
        return Decision::Deny(DenyReason::Disabled);
    }

    let bypass_schedule = opts.force || opts.dry_run;

    if !bypass_schedule {
        let hour = now.hour() as u8;
        let in_window = opts
            .windows
            .iter()
            .any(|&(start, end)| start <= hour && hour < end);
        if !in_window {
            return Decision::Deny(DenyReason::OutsideWindow);
        }
    }

    if !bypass_schedule && state.daily_marker == Some(now.date_naive()) {
        return Decision::Deny(DenyReason::AlreadyPostedToday);
    }

    if !opts.dry_run && state.monthly_count >= opts.monthly_cap {
        return Decision::Deny(DenyReason::MonthlyCapReached);
    }

    Decision::Allow
}
