use crate::error::{ComposeError, ConfigError};
use rusttype::Font;
use std::path::Path;

/// Cheap existence check run before any paid API call. A missing font is a
/// deployment problem, not a run failure.
pub fn ensure_font_exists(path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::FontMissing(path.display().to_string()))
    }
}

/// Load and parse a TTF into an owned font.
pub fn load_font(path: &Path) -> Result<Font<'static>, ComposeError> {
    let bytes = std::fs::read(path).map_err(|e| ComposeError::Font {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| ComposeError::Font {
        path: path.display().to_string(),
        message: "not a parseable TTF".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_font_is_a_config_error() {
        let err = ensure_font_exists(Path::new("fonts/nope.ttf")).unwrap_err();
        assert!(err.to_string().contains("fonts/nope.ttf"));
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();
        assert!(ensure_font_exists(file.path()).is_ok());
        let err = load_font(file.path()).unwrap_err();
        assert!(err.to_string().contains("not a parseable TTF"));
    }
}
