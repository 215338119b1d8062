use crate::error::ConfigError;
use chrono_tz::Tz;
use std::path::PathBuf;

/// Runtime configuration, built once at process start from the environment
/// and passed by reference into each component. No ambient globals.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub page_access_token: Option<String>,
    pub page_id: Option<String>,

    pub timezone: Tz,
    pub dry_run: bool,
    pub force_post: bool,

    /// Allowed posting windows as `(start_hour, end_hour)`, end exclusive.
    pub post_windows: Vec<(u8, u8)>,
    pub max_monthly_images: u32,
    pub content_cooldown_days: i64,
    pub scene_cooldown_days: i64,

    pub state_dir: PathBuf,
    pub font_path: PathBuf,
    pub watermark: String,

    pub image_model: String,
    pub image_size: String,
    pub image_api_base: String,
    pub graph_api_base: String,

    pub chat_directive: bool,
    pub chat_model: String,

    /// Publish the chosen text as the photo caption.
    pub caption: bool,
}

fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}

fn parse_windows(raw: &str) -> Result<Vec<(u8, u8)>, ConfigError> {
    let mut windows = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let window = || ConfigError::Window(part.to_string());
        let (start, end) = part.split_once('-').ok_or_else(window)?;
        let start: u8 = start.trim().parse().map_err(|_| window())?;
        let end: u8 = end.trim().parse().map_err(|_| window())?;
        if start >= end || end > 24 {
            return Err(window());
        }
        windows.push((start, end));
    }
    if windows.is_empty() {
        return Err(ConfigError::Window(raw.to_string()));
    }
    Ok(windows)
}

impl Config {
    /// Build from process environment variables (after `dotenvy` has run).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Keeps parsing and validation
    /// testable without touching the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dry_run = get("DRY_RUN").is_some_and(|v| parse_bool(&v));
        let force_post = get("FORCE_POST").is_some_and(|v| parse_bool(&v));

        let openai_api_key = get("OPENAI_API_KEY");
        let page_access_token = get("PAGE_ACCESS_TOKEN");
        let page_id = get("PAGE_ID");

        // Paid calls and publishing need credentials; a dry run needs none.
        if !dry_run {
            if openai_api_key.is_none() {
                return Err(ConfigError::MissingVar("OPENAI_API_KEY"));
            }
            if page_access_token.is_none() {
                return Err(ConfigError::MissingVar("PAGE_ACCESS_TOKEN"));
            }
            if page_id.is_none() {
                return Err(ConfigError::MissingVar("PAGE_ID"));
            }
        }

        let tz_name = get("TIMEZONE").unwrap_or_else(|| "Asia/Manila".to_string());
        let timezone: Tz = tz_name
            .parse()
            .map_err(|_| ConfigError::Timezone(tz_name))?;

        let post_windows = match get("POST_WINDOWS") {
            Some(raw) => parse_windows(&raw)?,
            None => vec![(13, 15)],
        };

        let parse_u32 = |name: &'static str, default: u32| -> Result<u32, ConfigError> {
            match get(name) {
                Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                    name,
                    value: v.clone(),
                }),
                None => Ok(default),
            }
        };
        let parse_i64 = |name: &'static str, default: i64| -> Result<i64, ConfigError> {
            match get(name) {
                Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid {
                    name,
                    value: v.clone(),
                }),
                None => Ok(default),
            }
        };

        Ok(Self {
            openai_api_key,
            page_access_token,
            page_id,
            timezone,
            dry_run,
            force_post,
            post_windows,
            max_monthly_images: parse_u32("MAX_MONTHLY_IMAGES", 30)?,
            content_cooldown_days: parse_i64("CONTENT_COOLDOWN_DAYS", 35)?,
            scene_cooldown_days: parse_i64("SCENE_COOLDOWN_DAYS", 5)?,
            state_dir: PathBuf::from(get("STATE_DIR").unwrap_or_else(|| "state".to_string())),
            font_path: PathBuf::from(
                get("FONT_PATH")
                    .unwrap_or_else(|| "fonts/LibreBaskerville-Regular.ttf".to_string()),
            ),
            watermark: get("WATERMARK").unwrap_or_else(|| "© GritPost".to_string()),
            image_model: get("IMAGE_MODEL").unwrap_or_else(|| "gpt-image-1.5".to_string()),
            image_size: get("IMAGE_SIZE").unwrap_or_else(|| "1024x1536".to_string()),
            image_api_base: get("IMAGE_API_BASE")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            graph_api_base: get("GRAPH_API_BASE")
                .unwrap_or_else(|| "https://graph.facebook.com/v19.0".to_string()),
            chat_directive: get("CHAT_DIRECTIVE").is_some_and(|v| parse_bool(&v)),
            chat_model: get("CHAT_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            caption: get("CAPTION").is_some_and(|v| parse_bool(&v)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|v| (*v).to_string())
    }

    #[test]
    fn dry_run_needs_no_credentials() {
        let cfg = Config::from_lookup(lookup(&[("DRY_RUN", "true")])).unwrap();
        assert!(cfg.dry_run);
        assert!(cfg.openai_api_key.is_none());
        assert_eq!(cfg.post_windows, vec![(13, 15)]);
        assert_eq!(cfg.max_monthly_images, 30);
        assert_eq!(cfg.timezone.name(), "Asia/Manila");
    }

    #[test]
    fn missing_credentials_fail_outside_dry_run() {
        let err = Config::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn parses_multiple_windows() {
        let vars = [
            ("DRY_RUN", "true"),
            ("POST_WINDOWS", "7-9, 13-15,20-22"),
        ];
        let cfg = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(cfg.post_windows, vec![(7, 9), (13, 15), (20, 22)]);
    }

    #[test]
    fn rejects_inverted_window() {
        let vars = [("DRY_RUN", "true"), ("POST_WINDOWS", "15-13")];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Window(_)));
    }

    #[test]
    fn rejects_unknown_timezone() {
        let vars = [("DRY_RUN", "true"), ("TIMEZONE", "Mars/Olympus")];
        let err = Config::from_lookup(lookup(&vars)).unwrap_err();
        assert!(matches!(err, ConfigError::Timezone(_)));
    }

    #[test]
    fn numeric_overrides_apply() {
        let vars = [
            ("DRY_RUN", "true"),
            ("MAX_MONTHLY_IMAGES", "10"),
            ("CONTENT_COOLDOWN_DAYS", "14"),
            ("SCENE_COOLDOWN_DAYS", "2"),
        ];
        let cfg = Config::from_lookup(lookup(&vars)).unwrap();
        assert_eq!(cfg.max_monthly_images, 10);
        assert_eq!(cfg.content_cooldown_days, 14);
        assert_eq!(cfg.scene_cooldown_days, 2);
    }
}
