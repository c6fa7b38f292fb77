use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreferenceCategory {
    Style,
    ColorPalette,
    Season,
    Occasion,
    Gender,
}

impl PreferenceCategory {
    pub const ALL: [PreferenceCategory; 5] = [
        PreferenceCategory::Style,
        PreferenceCategory::ColorPalette,
        PreferenceCategory::Season,
        PreferenceCategory::Occasion,
        PreferenceCategory::Gender,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "style" => Some(Self::Style),
            "color" | "colour" | "palette" | "color_palette" | "colorpalette" => {
                Some(Self::ColorPalette)
            }
            "season" => Some(Self::Season),
            "occasion" => Some(Self::Occasion),
            "gender" => Some(Self::Gender),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Style => "style",
            Self::ColorPalette => "color_palette",
            Self::Season => "season",
            Self::Occasion => "occasion",
            Self::Gender => "gender",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Style => "Style",
            Self::ColorPalette => "Color Palette",
            Self::Season => "Season",
            Self::Occasion => "Occasion",
            Self::Gender => "Gender Identity",
        }
    }
}

/// What the user has told us so far. Every field starts unset and is only
/// cleared again through [`Preferences::toggle`] or [`Preferences::clear`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub style: Option<String>,
    pub color_palette: Option<String>,
    pub season: Option<String>,
    pub occasion: Option<String>,
    pub gender: Option<String>,
}

impl Preferences {
    pub fn get(&self, category: PreferenceCategory) -> Option<&str> {
        self.slot(category).as_deref()
    }

    pub fn set(&mut self, category: PreferenceCategory, value: impl Into<String>) {
        let value = value.into();
        let trimmed = value.trim();
        *self.slot_mut(category) = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_ascii_lowercase())
        };
    }

    pub fn clear(&mut self, category: PreferenceCategory) {
        *self.slot_mut(category) = None;
    }

    /// Filter-button semantics: selecting the active value turns it off,
    /// anything else replaces it. Returns the field's new value.
    pub fn toggle(&mut self, category: PreferenceCategory, value: &str) -> Option<&str> {
        let normalized = value.trim().to_ascii_lowercase();
        if self.get(category) == Some(normalized.as_str()) {
            self.clear(category);
        } else {
            self.set(category, normalized);
        }
        self.get(category)
    }

    /// Values that light up a filter control. Only style, season and occasion
    /// have filter groups.
    pub fn active_filters(&self) -> Vec<&str> {
        [&self.style, &self.season, &self.occasion]
            .into_iter()
            .filter_map(|value| value.as_deref())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        PreferenceCategory::ALL
            .iter()
            .all(|category| self.get(*category).is_none())
    }

    fn slot(&self, category: PreferenceCategory) -> &Option<String> {
        match category {
            PreferenceCategory::Style => &self.style,
            PreferenceCategory::ColorPalette => &self.color_palette,
            PreferenceCategory::Season => &self.season,
            PreferenceCategory::Occasion => &self.occasion,
            PreferenceCategory::Gender => &self.gender,
        }
    }

    fn slot_mut(&mut self, category: PreferenceCategory) -> &mut Option<String> {
        match category {
            PreferenceCategory::Style => &mut self.style,
            PreferenceCategory::ColorPalette => &mut self.color_palette,
            PreferenceCategory::Season => &mut self.season,
            PreferenceCategory::Occasion => &mut self.occasion,
            PreferenceCategory::Gender => &mut self.gender,
        }
    }
}
