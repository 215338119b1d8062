use crate::compose::Placement;
use crate::error::ApiError;

/// A parsed posting directive from the chat model:
/// `TEXT: <str> | POSITION: TOP|BOTTOM | SCENE: <str>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub text: String,
    pub position: Placement,
    pub scene: String,
}

fn field<'a>(segment: &'a str, key: &str) -> Result<&'a str, ApiError> {
    let segment = segment.trim();
    let value = segment
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
        .ok_or_else(|| ApiError::MalformedResponse(format!("expected '{key}:' in '{segment}'")))?
        .trim();
    if value.is_empty() {
        return Err(ApiError::MalformedResponse(format!("empty {key} field")));
    }
    Ok(value)
}

/// Strict parse of the pipe-delimited directive schema. Any violation —
/// wrong field count, wrong keys, wrong order, unknown position — is a
/// `MalformedResponse`, a recoverable upstream failure rather than a panic.
pub fn parse_directive(raw: &str) -> Result<Directive, ApiError> {
    let line = raw
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| ApiError::MalformedResponse("empty response".to_string()))?;

    let segments: Vec<&str> = line.split('|').collect();
    if segments.len() != 3 {
        return Err(ApiError::MalformedResponse(format!(
            "expected 3 pipe-delimited fields, got {}",
            segments.len()
        )));
    }

    let text = field(segments[0], "TEXT")?;
    let position = match field(segments[1], "POSITION")? {
        "TOP" => Placement::Top,
        "BOTTOM" => Placement::Bottom,
        other => {
            return Err(ApiError::MalformedResponse(format!(
                "unknown POSITION '{other}'"
            )));
        }
    };
    let scene = field(segments[2], "SCENE")?;

    Ok(Directive {
        text: text.to_string(),
        position,
        scene: scene.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_directive() {
        let d = parse_directive(
            "TEXT: While they sleep, I build. | POSITION: TOP | SCENE: empty gym at dawn",
        )
        .unwrap();
        assert_eq!(d.text, "While they sleep, I build.");
        assert_eq!(d.position, Placement::Top);
        assert_eq!(d.scene, "empty gym at dawn");
    }

    #[test]
    fn parses_bottom_and_skips_leading_blank_lines() {
        let d = parse_directive("\n\nTEXT: Grind. | POSITION: BOTTOM | SCENE: city\n").unwrap();
        assert_eq!(d.position, Placement::Bottom);
    }

    #[test]
    fn rejects_missing_delimiter() {
        let err = parse_directive("TEXT: a POSITION: TOP SCENE: b").unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_misordered_fields() {
        let err = parse_directive("POSITION: TOP | TEXT: a | SCENE: b").unwrap_err();
        assert!(err.to_string().contains("TEXT"));
    }

    #[test]
    fn rejects_unknown_position() {
        let err = parse_directive("TEXT: a | POSITION: MIDDLE | SCENE: b").unwrap_err();
        assert!(err.to_string().contains("MIDDLE"));
    }

    #[test]
    fn rejects_empty_fields_and_arbitrary_garbage() {
        assert!(parse_directive("TEXT:  | POSITION: TOP | SCENE: b").is_err());
        assert!(parse_directive("").is_err());
        assert!(parse_directive("|||||").is_err());
        assert!(parse_directive("an apology about being unable to comply").is_err());
    }
}
