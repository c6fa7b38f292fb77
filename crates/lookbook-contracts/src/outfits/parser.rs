use serde_json::Value;
use thiserror::Error;

use super::record::Outfit;

#[derive(Debug, Error)]
pub enum OutfitParseError {
    #[error("no JSON object found in model response")]
    NoJsonFound,
    #[error("model response JSON is malformed: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("model response JSON has invalid outfit data: {0}")]
    InvalidSchema(String),
}

/// Pulls the `outfits` array out of a free-text completion.
///
/// The embedded object is the greedy span from the first `{` to the last `}`,
/// so prose before and after the JSON is tolerated but two separate objects
/// are not.
pub fn extract_outfits(response: &str) -> Result<Vec<Outfit>, OutfitParseError> {
    let span = greedy_object_span(response).ok_or(OutfitParseError::NoJsonFound)?;
    let payload: Value = serde_json::from_str(span).map_err(OutfitParseError::MalformedJson)?;
    let Some(outfits) = payload.get("outfits") else {
        return Err(OutfitParseError::InvalidSchema(
            "missing \"outfits\" field".to_string(),
        ));
    };
    if !outfits.is_array() {
        return Err(OutfitParseError::InvalidSchema(
            "\"outfits\" is not an array".to_string(),
        ));
    }
    let outfits: Vec<Outfit> = serde_json::from_value(outfits.clone())
        .map_err(|err| OutfitParseError::InvalidSchema(err.to_string()))?;
    if let Some(index) = outfits
        .iter()
        .position(|outfit| outfit.title.trim().is_empty())
    {
        return Err(OutfitParseError::InvalidSchema(format!(
            "outfit {index} has a blank title"
        )));
    }
    Ok(outfits)
}

/// Lenient form of [`extract_outfits`]: failures are logged and come back as
/// an empty list, which callers treat as "use the catalog".
pub fn parse_outfit_results(response: &str) -> Vec<Outfit> {
    match extract_outfits(response) {
        Ok(outfits) => outfits,
        Err(err) => {
            log::warn!("error parsing outfit results: {err}");
            log::debug!("raw model response: {response}");
            Vec::new()
        }
    }
}

fn greedy_object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::{extract_outfits, parse_outfit_results, OutfitParseError};

    const PAYLOAD: &str = r#"{"outfits": [
        {"title": "Linen Day", "description": "Airy", "tops": ["linen shirt"],
         "bottoms": ["chinos"], "shoes": ["loafers"], "accessories": ["straw hat"],
         "notes": ["roll the sleeves"]},
        {"title": "Night Walk", "description": "Dark", "tops": ["tee"],
         "bottoms": ["jeans"], "shoes": ["boots"], "accessories": []}
    ]}"#;

    #[test]
    fn extracts_payload_wrapped_in_prose() -> anyhow::Result<()> {
        let response = format!("Here are your looks:\n```json\n{PAYLOAD}\n```\nEnjoy!");
        let outfits = extract_outfits(&response)?;
        assert_eq!(outfits.len(), 2);
        assert_eq!(outfits[0].title, "Linen Day");
        assert_eq!(outfits[0].notes, vec!["roll the sleeves".to_string()]);
        assert!(outfits[1].notes.is_empty());
        Ok(())
    }

    #[test]
    fn missing_braces_is_no_json() {
        assert!(matches!(
            extract_outfits("Sorry, I can't help with that."),
            Err(OutfitParseError::NoJsonFound)
        ));
        assert!(matches!(
            extract_outfits("} backwards {"),
            Err(OutfitParseError::NoJsonFound)
        ));
        assert!(parse_outfit_results("no json here").is_empty());
    }

    #[test]
    fn malformed_json_is_reported() {
        let response = r#"{"outfits": [ {"title": "half"#.to_string() + "}";
        assert!(matches!(
            extract_outfits(&response),
            Err(OutfitParseError::MalformedJson(_))
        ));
        assert!(parse_outfit_results(&response).is_empty());
    }

    #[test]
    fn valid_json_without_outfits_is_invalid_schema() {
        assert!(matches!(
            extract_outfits(r#"{"looks": []}"#),
            Err(OutfitParseError::InvalidSchema(_))
        ));
        assert!(matches!(
            extract_outfits(r#"{"outfits": {"title": "x"}}"#),
            Err(OutfitParseError::InvalidSchema(_))
        ));
        assert!(parse_outfit_results(r#"{"looks": []}"#).is_empty());
    }

    #[test]
    fn non_object_entries_are_invalid_schema() {
        assert!(matches!(
            extract_outfits(r#"{"outfits": ["just a string"]}"#),
            Err(OutfitParseError::InvalidSchema(_))
        ));
    }

    #[test]
    fn untitled_outfits_are_invalid_schema() {
        for response in [
            r#"{"outfits": [{}]}"#,
            r#"{"outfits": [{"description": "no name", "tops": ["tee"]}]}"#,
            r#"{"outfits": [{"title": "Fine"}, {"title": "   "}]}"#,
        ] {
            assert!(
                matches!(
                    extract_outfits(response),
                    Err(OutfitParseError::InvalidSchema(_))
                ),
                "response: {response}"
            );
            assert!(parse_outfit_results(response).is_empty());
        }
    }

    #[test]
    fn lenient_parse_returns_the_sequence() {
        let outfits = parse_outfit_results(PAYLOAD);
        assert_eq!(outfits.len(), 2);
        assert_eq!(outfits[1].shoes, vec!["boots".to_string()]);
    }
}
