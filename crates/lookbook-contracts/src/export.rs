use std::path::Path;

use serde_json::{Map, Value};

use crate::events::now_utc_iso;
use crate::outfits::Lookbook;
use crate::preferences::Preferences;

/// Writes the lookbook as pretty JSON. `extra` keys are merged last.
pub fn write_lookbook(
    path: &Path,
    session_id: &str,
    lookbook: &Lookbook,
    prefs: &Preferences,
    extra: Option<&Map<String, Value>>,
) -> anyhow::Result<()> {
    let mut payload = Map::new();
    payload.insert(
        "session_id".to_string(),
        Value::String(session_id.to_string()),
    );
    payload.insert("preferences".to_string(), serde_json::to_value(prefs)?);
    payload.insert(
        "outfits".to_string(),
        serde_json::to_value(lookbook.outfits())?,
    );
    payload.insert(
        "cursor".to_string(),
        Value::Number((lookbook.position() as u64).into()),
    );
    payload.insert("ts".to_string(), Value::String(now_utc_iso()));
    if let Some(extra) = extra {
        for (key, value) in extra {
            payload.insert(key.clone(), value.clone());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&Value::Object(payload))?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use super::write_lookbook;
    use crate::outfits::{fallback_outfits, Lookbook};
    use crate::preferences::Preferences;

    #[test]
    fn write_lookbook_generates_expected_payload() -> anyhow::Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("nested").join("lookbook.json");

        let prefs = Preferences {
            style: Some("casual".to_string()),
            season: Some("winter".to_string()),
            ..Preferences::default()
        };
        let mut lookbook = Lookbook::new(fallback_outfits(&prefs));
        lookbook.next();
        let mut extra = Map::new();
        extra.insert("source".to_string(), json!("catalog"));
        write_lookbook(&path, "session-1", &lookbook, &prefs, Some(&extra))?;

        let parsed: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        assert_eq!(parsed["session_id"], json!("session-1"));
        assert_eq!(parsed["preferences"]["season"], json!("winter"));
        assert_eq!(parsed["preferences"]["occasion"], Value::Null);
        assert_eq!(parsed["outfits"][0]["title"], json!("Cozy Winter Casual 1"));
        assert_eq!(parsed["outfits"].as_array().map(Vec::len), Some(3));
        assert_eq!(parsed["cursor"], json!(1));
        assert_eq!(parsed["source"], json!("catalog"));
        assert!(parsed.get("ts").and_then(Value::as_str).is_some());
        Ok(())
    }
}
