use crate::conversation::ChatHistory;
use crate::preferences::Preferences;

const NOT_SPECIFIED: &str = "Not specified";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PromptKind {
    /// Conversational stylist reply.
    Chat,
    /// Structured request for three outfits as JSON.
    Outfits,
}

impl PromptKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Chat => "chat",
            Self::Outfits => "outfits",
        }
    }
}

pub fn build_prompt(
    message: &str,
    kind: PromptKind,
    prefs: &Preferences,
    history: &ChatHistory,
) -> String {
    match kind {
        PromptKind::Chat => chat_prompt(message, prefs, history),
        PromptKind::Outfits => outfits_prompt(prefs),
    }
}

/// Message sent on the user's behalf when a filter toggle regenerates the
/// lookbook.
pub fn filter_generation_message(prefs: &Preferences) -> String {
    format!(
        "Generate outfits for my {} style, for {} and {} occasions",
        prefs.style.as_deref().unwrap_or_default(),
        prefs.season.as_deref().unwrap_or("any season"),
        prefs.occasion.as_deref().unwrap_or("casual"),
    )
}

fn chat_prompt(message: &str, prefs: &Preferences, history: &ChatHistory) -> String {
    let field = |value: &Option<String>| value.clone().unwrap_or_else(|| NOT_SPECIFIED.to_string());
    format!(
        "You are a virtual fashion stylist helping users create personalized fashion lookbooks.

User Preferences so far:
Style: {style}
Color Palette: {palette}
Season: {season}
Occasion: {occasion}
Gender Identity: {gender}

Chat History:
{history}

USER: {message}

Respond as a helpful fashion stylist, giving style advice and asking for any missing preferences. \
Keep your response concise and friendly. If you have enough preferences (style + either season or occasion), \
mention that you'll create outfit suggestions.",
        style = field(&prefs.style),
        palette = field(&prefs.color_palette),
        season = field(&prefs.season),
        occasion = field(&prefs.occasion),
        gender = field(&prefs.gender),
        history = history.transcript(),
    )
}

fn outfits_prompt(prefs: &Preferences) -> String {
    let field = |value: &Option<String>, default: &str| {
        value.clone().unwrap_or_else(|| default.to_string())
    };
    format!(
        r#"Generate exactly 3 outfit suggestions based on these preferences:

Style: {style}
Color Palette: {palette}
Season: {season}
Occasion: {occasion}
Gender Identity: {gender}

Format each outfit in a valid JSON structure with the following fields for each:
{{
  "outfits": [
    {{
      "title": "Outfit name",
      "description": "Brief description",
      "tops": ["item 1", "item 2"],
      "bottoms": ["item 1", "item 2"],
      "shoes": ["item 1", "item 2"],
      "accessories": ["item 1", "item 2", "item 3"],
      "notes": ["styling tip 1", "styling tip 2"]
    }}
  ]
}}

Return exactly three entries in the "outfits" array.
Make sure each outfit is creative, trendy, and reflects current fashion. Include specific items (with colors/materials), not generic ones."#,
        style = field(&prefs.style, "Casual"),
        palette = field(&prefs.color_palette, "Neutral"),
        season = field(&prefs.season, "Summer"),
        occasion = field(&prefs.occasion, "Everyday"),
        gender = field(&prefs.gender, "Neutral"),
    )
}
