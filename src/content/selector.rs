use super::{
    CONTENT_BANK, ContentCategory, HolidayRule, SCENES, SceneDescriptor, holiday_for,
    holiday_prompt, regular_prompt, seasonal_categories,
};
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;

/// Inputs the selector needs, read from the store by the orchestrator.
#[derive(Debug, Clone, Default)]
pub struct SelectorState {
    pub content_history: HashMap<String, NaiveDate>,
    pub scene_history: HashMap<String, NaiveDate>,
    /// Holiday names already posted this calendar year.
    pub holidays_used: Vec<String>,
    pub content_cooldown_days: i64,
    pub scene_cooldown_days: i64,
}

/// What the selector decided to post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Regular {
        scene: &'static SceneDescriptor,
        text: &'static str,
    },
    Holiday(&'static HolidayRule),
}

impl Selection {
    /// Key used for the scene cooldown history and the engagement log.
    pub fn scene_key(&self) -> String {
        match self {
            Self::Regular { scene, .. } => scene.name.to_string(),
            Self::Holiday(rule) => format!("holiday_{}", rule.name),
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Regular { text, .. } => text,
            Self::Holiday(rule) => rule.text,
        }
    }

    pub fn prompt(&self) -> String {
        match self {
            Self::Regular { scene, .. } => regular_prompt(scene),
            Self::Holiday(rule) => holiday_prompt(rule.scene),
        }
    }

    pub fn holiday_name(&self) -> Option<&'static str> {
        match self {
            Self::Regular { .. } => None,
            Self::Holiday(rule) => Some(rule.name),
        }
    }
}

fn off_cooldown(
    history: &HashMap<String, NaiveDate>,
    key: &str,
    today: NaiveDate,
    threshold: i64,
) -> bool {
    match history.get(key) {
        Some(last) => (today - *last).num_days() >= threshold,
        None => true,
    }
}

/// Choose what to post today. Holiday rules win when the date matches and the
/// year's ledger has not seen them; otherwise a cooldown-filtered, seasonally
/// biased random pick. Always returns a valid pair: when every candidate is
/// on cooldown the filter is dropped rather than failing the run.
pub fn select(today: NaiveDate, state: &SelectorState, rng: &mut impl Rng) -> Selection {
    if let Some(rule) = holiday_for(today.month(), today.day()) {
        if !state.holidays_used.iter().any(|n| n == rule.name) {
            return Selection::Holiday(rule);
        }
    }

    let mut eligible: Vec<(ContentCategory, &'static str)> = CONTENT_BANK
        .iter()
        .flat_map(|(category, lines)| lines.iter().map(|line| (*category, *line)))
        .filter(|(_, line)| {
            off_cooldown(
                &state.content_history,
                line,
                today,
                state.content_cooldown_days,
            )
        })
        .collect();
    if eligible.is_empty() {
        eligible = CONTENT_BANK
            .iter()
            .flat_map(|(category, lines)| lines.iter().map(|line| (*category, *line)))
            .collect();
    }

    let mut scenes: Vec<&'static SceneDescriptor> = SCENES
        .iter()
        .filter(|scene| {
            off_cooldown(
                &state.scene_history,
                scene.name,
                today,
                state.scene_cooldown_days,
            )
        })
        .collect();
    if scenes.is_empty() {
        scenes = SCENES.iter().collect();
    }

    let preferred = seasonal_categories(today.month());
    let seasonal: Vec<(ContentCategory, &'static str)> = if preferred.is_empty() {
        Vec::new()
    } else {
        eligible
            .iter()
            .copied()
            .filter(|(category, _)| preferred.contains(category))
            .collect()
    };
    let pool = if seasonal.is_empty() { &eligible } else { &seasonal };

    // Both slices are guaranteed non-empty by the fallbacks above.
    let (_, text) = *pool.choose(rng).unwrap_or(&pool[0]);
    let scene = *scenes.choose(rng).unwrap_or(&scenes[0]);

    Selection::Regular { scene, text }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn base_state() -> SelectorState {
        SelectorState {
            content_cooldown_days: 35,
            scene_cooldown_days: 5,
            ..SelectorState::default()
        }
    }

    #[test]
    fn holiday_date_returns_fixed_pair() {
        let sel = select(d(2026, 12, 25), &base_state(), &mut rand::rng());
        assert_eq!(sel.holiday_name(), Some("christmas"));
        assert_eq!(sel.text(), "The best gift you can give yourself is results.");
        assert_eq!(sel.scene_key(), "holiday_christmas");
    }

    #[test]
    fn used_holiday_falls_through_to_regular_selection() {
        let mut state = base_state();
        state.holidays_used.push("christmas".to_string());
        for _ in 0..20 {
            let sel = select(d(2026, 12, 25), &state, &mut rand::rng());
            assert_eq!(sel.holiday_name(), None);
        }
    }

    #[test]
    fn cooled_content_is_never_selected_while_alternatives_exist() {
        let mut state = base_state();
        let blocked = "While they sleep, I build.";
        state
            .content_history
            .insert(blocked.to_string(), d(2026, 3, 10));

        // Used 4 days ago against a 35-day threshold: must stay excluded.
        for _ in 0..100 {
            let sel = select(d(2026, 3, 14), &state, &mut rand::rng());
            assert_ne!(sel.text(), blocked);
        }
    }

    #[test]
    fn content_past_cooldown_is_eligible_again() {
        let mut state = base_state();
        state
            .content_history
            .insert("Motivation fades. Discipline stays.".to_string(), d(2026, 1, 1));
        // 35 days later the line is merely eligible, not mandatory; just
        // verify selection still works and returns bank members.
        let sel = select(d(2026, 2, 5), &state, &mut rand::rng());
        assert!(
            CONTENT_BANK
                .iter()
                .any(|(_, lines)| lines.contains(&sel.text()))
        );
    }

    #[test]
    fn fully_cooled_bank_falls_back_instead_of_failing() {
        let mut state = base_state();
        for (_, lines) in CONTENT_BANK {
            for line in *lines {
                state.content_history.insert((*line).to_string(), d(2026, 3, 13));
            }
        }
        for scene in SCENES {
            state.scene_history.insert(scene.name.to_string(), d(2026, 3, 13));
        }
        let sel = select(d(2026, 3, 14), &state, &mut rand::rng());
        assert!(matches!(sel, Selection::Regular { .. }));
    }

    #[test]
    fn cooled_scenes_are_excluded_while_alternatives_exist() {
        let mut state = base_state();
        state
            .scene_history
            .insert("empty_gym_4am".to_string(), d(2026, 3, 12));
        for _ in 0..100 {
            let sel = select(d(2026, 3, 14), &state, &mut rand::rng());
            assert_ne!(sel.scene_key(), "empty_gym_4am");
        }
    }

    #[test]
    fn seasonal_preference_narrows_the_pool() {
        // December prefers success/struggle; every non-holiday December pick
        // must come from those categories while they have eligible lines.
        let state = base_state();
        let december_lines: Vec<&str> = CONTENT_BANK
            .iter()
            .filter(|(category, _)| {
                matches!(category, ContentCategory::Success | ContentCategory::Struggle)
            })
            .flat_map(|(_, lines)| lines.iter().copied())
            .collect();

        for _ in 0..100 {
            let sel = select(d(2026, 12, 10), &state, &mut rand::rng());
            assert!(december_lines.contains(&sel.text()), "picked {}", sel.text());
        }
    }

    #[test]
    fn seasonal_preference_yields_when_its_categories_are_cooled() {
        let mut state = base_state();
        for (category, lines) in CONTENT_BANK {
            if matches!(category, ContentCategory::Success | ContentCategory::Struggle) {
                for line in *lines {
                    state.content_history.insert((*line).to_string(), d(2026, 12, 9));
                }
            }
        }
        for _ in 0..50 {
            let sel = select(d(2026, 12, 10), &state, &mut rand::rng());
            assert!(matches!(sel, Selection::Regular { .. }));
        }
    }
}
