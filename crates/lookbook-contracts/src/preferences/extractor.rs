//! Keyword-driven preference extraction from free-text chat messages.
//!
//! Keywords match case-insensitively at the start of a word, not anywhere in
//! the text. "women" therefore never sets the `men` rule, and "female" never
//! sets `male`. The cost is that a keyword buried inside a longer word does not
//! match: "semiformal" leaves style unset and "multicolorful" leaves the
//! palette unset. A keyword that starts a longer word still matches, so
//! "earth tones" and "menswear" both count.

use std::sync::OnceLock;

use regex::Regex;

use super::record::{PreferenceCategory, Preferences};

#[derive(Clone, Copy, Debug)]
struct KeywordRule {
    keywords: &'static [&'static str],
    value: &'static str,
}

const STYLE_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["casual", "relaxed"],
        value: "casual",
    },
    KeywordRule {
        keywords: &["formal", "elegant"],
        value: "formal",
    },
    KeywordRule {
        keywords: &["streetwear", "urban"],
        value: "streetwear",
    },
    KeywordRule {
        keywords: &["bohemian", "boho"],
        value: "bohemian",
    },
    KeywordRule {
        keywords: &["minimalist", "simple"],
        value: "minimalist",
    },
];

const COLOR_PALETTE_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["neutral", "earth tone"],
        value: "neutral",
    },
    KeywordRule {
        keywords: &["bright", "colorful"],
        value: "bright",
    },
    KeywordRule {
        keywords: &["pastel", "soft color"],
        value: "pastel",
    },
    KeywordRule {
        keywords: &["monochrome", "black and white"],
        value: "monochrome",
    },
];

const SEASON_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["summer", "hot weather"],
        value: "summer",
    },
    KeywordRule {
        keywords: &["fall", "autumn"],
        value: "fall",
    },
    KeywordRule {
        keywords: &["winter", "cold weather"],
        value: "winter",
    },
    KeywordRule {
        keywords: &["spring"],
        value: "spring",
    },
];

const OCCASION_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["work", "office", "professional"],
        value: "work",
    },
    KeywordRule {
        keywords: &["party", "night out"],
        value: "party",
    },
    KeywordRule {
        keywords: &["date", "dinner"],
        value: "date",
    },
    KeywordRule {
        keywords: &["vacation", "travel"],
        value: "vacation",
    },
    KeywordRule {
        keywords: &["everyday", "daily"],
        value: "casual",
    },
];

const GENDER_RULES: &[KeywordRule] = &[
    KeywordRule {
        keywords: &["men", "male", "man"],
        value: "male",
    },
    KeywordRule {
        keywords: &["women", "female", "woman"],
        value: "female",
    },
    KeywordRule {
        keywords: &["non-binary", "gender neutral", "unisex"],
        value: "neutral",
    },
];

const CATEGORY_RULES: &[(PreferenceCategory, &[KeywordRule])] = &[
    (PreferenceCategory::Style, STYLE_RULES),
    (PreferenceCategory::ColorPalette, COLOR_PALETTE_RULES),
    (PreferenceCategory::Season, SEASON_RULES),
    (PreferenceCategory::Occasion, OCCASION_RULES),
    (PreferenceCategory::Gender, GENDER_RULES),
];

struct CompiledRule {
    pattern: Regex,
    value: &'static str,
}

/// A field written by [`update_preferences`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceChange {
    pub category: PreferenceCategory,
    pub previous: Option<String>,
    pub value: String,
}

fn compiled_rules() -> &'static [(PreferenceCategory, Vec<CompiledRule>)] {
    static RULES: OnceLock<Vec<(PreferenceCategory, Vec<CompiledRule>)>> = OnceLock::new();
    RULES.get_or_init(|| {
        CATEGORY_RULES
            .iter()
            .map(|(category, rules)| {
                let compiled = rules
                    .iter()
                    .filter_map(|rule| {
                        let alternatives = rule
                            .keywords
                            .iter()
                            .map(|keyword| regex::escape(keyword))
                            .collect::<Vec<String>>()
                            .join("|");
                        // Anchored at the start of a word so "women" never trips "men".
                        match Regex::new(&format!(r"\b(?:{alternatives})")) {
                            Ok(pattern) => Some(CompiledRule {
                                pattern,
                                value: rule.value,
                            }),
                            Err(err) => {
                                log::error!("keyword rule for {} failed to compile: {err}", rule.value);
                                None
                            }
                        }
                    })
                    .collect();
                (*category, compiled)
            })
            .collect()
    })
}

/// Scans `message` for preference keywords and writes every category that
/// matched. Within a category the first rule in table order wins.
pub fn update_preferences(prefs: &mut Preferences, message: &str) -> Vec<PreferenceChange> {
    let lowered = message.to_lowercase();
    let mut changes = Vec::new();
    for (category, rules) in compiled_rules() {
        let Some(rule) = rules.iter().find(|rule| rule.pattern.is_match(&lowered)) else {
            continue;
        };
        let previous = prefs.get(*category).map(str::to_string);
        prefs.set(*category, rule.value);
        changes.push(PreferenceChange {
            category: *category,
            previous,
            value: rule.value.to_string(),
        });
    }
    changes
}

/// Outfits need a style plus either a season or an occasion.
pub fn has_enough_preferences(prefs: &Preferences) -> bool {
    prefs.style.is_some() && (prefs.season.is_some() || prefs.occasion.is_some())
}
