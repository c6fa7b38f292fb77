use crate::preferences::Preferences;

use super::record::Outfit;

pub const FALLBACK_BATCH_SIZE: usize = 3;

const DEFAULT_STYLE: &str = "casual";
const DEFAULT_SEASON: &str = "summer";
const DEFAULT_OCCASION: &str = "casual";
const DEFAULT_GENDER: &str = "neutral";

const PARTY_DESCRIPTION: &str = "A stylish outfit that's perfect for social gatherings and parties.";
const PARTY_ACCESSORY: &str = "Statement jewelry";

#[derive(Clone, Copy, Debug)]
struct CatalogEntry {
    style: &'static str,
    season: &'static str,
    gender: &'static str,
    title: &'static str,
    description: &'static str,
    tops: &'static [&'static str],
    bottoms: &'static [&'static str],
    shoes: &'static [&'static str],
    accessories: &'static [&'static str],
    notes: &'static [&'static str],
}

impl CatalogEntry {
    fn to_outfit(self) -> Outfit {
        Outfit {
            title: self.title.to_string(),
            description: self.description.to_string(),
            tops: owned(self.tops),
            bottoms: owned(self.bottoms),
            shoes: owned(self.shoes),
            accessories: owned(self.accessories),
            notes: owned(self.notes),
        }
    }
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        style: "casual",
        season: "summer",
        gender: "neutral",
        title: "Relaxed Summer Casual",
        description: "A comfortable and breezy outfit perfect for warm summer days.",
        tops: &[
            "Lightweight cotton T-shirt in white or pastel",
            "Linen button-up with rolled sleeves",
        ],
        bottoms: &[
            "Relaxed fit chino shorts in beige or navy",
            "Light wash denim shorts",
        ],
        shoes: &["Canvas sneakers", "Leather sandals"],
        accessories: &["Straw hat", "Minimal leather bracelet", "Classic sunglasses"],
        notes: &[
            "Roll sleeves for a more relaxed look",
            "Opt for breathable fabrics to stay cool",
        ],
    },
    CatalogEntry {
        style: "casual",
        season: "summer",
        gender: "female",
        title: "Effortless Summer Style",
        description: "Light and feminine outfit that keeps you cool while looking put-together.",
        tops: &["Loose cotton tank in pastel", "Off-shoulder linen blouse"],
        bottoms: &["Flowy midi skirt", "High-waisted denim shorts"],
        shoes: &["Strappy sandals", "Espadrilles"],
        accessories: &[
            "Delicate layered necklace",
            "Woven handbag",
            "Oversized sunglasses",
        ],
        notes: &[
            "Tuck in your top for a more defined silhouette",
            "Add a hat for sun protection and style",
        ],
    },
    CatalogEntry {
        style: "casual",
        season: "summer",
        gender: "male",
        title: "Cool Summer Casual",
        description: "Laid-back men's look that's effortlessly stylish for summer days.",
        tops: &["Cotton henley in light blue", "Patterned short-sleeve button-up"],
        bottoms: &["Tailored shorts in khaki", "Linen drawstring shorts"],
        shoes: &["Low-top white sneakers", "Leather boat shoes"],
        accessories: &["Woven belt", "Minimal watch", "Classic aviator sunglasses"],
        notes: &[
            "Keep the fit relaxed but not baggy",
            "Roll shorts once for a more tailored look",
        ],
    },
    CatalogEntry {
        style: "casual",
        season: "winter",
        gender: "neutral",
        title: "Cozy Winter Casual",
        description: "Warm and comfortable outfit for chilly winter days.",
        tops: &["Chunky knit sweater", "Thermal henley with flannel overshirt"],
        bottoms: &["Dark wash jeans", "Corduroy pants in earth tone"],
        shoes: &["Leather boots", "Wool-lined sneakers"],
        accessories: &["Knit beanie", "Wool scarf", "Leather gloves"],
        notes: &[
            "Layer for both warmth and style",
            "Choose thicker fabrics with texture",
        ],
    },
    CatalogEntry {
        style: "formal",
        season: "summer",
        gender: "neutral",
        title: "Refined Summer Formal",
        description: "Elegant yet comfortable formal look for warm weather events.",
        tops: &[
            "Lightweight cotton blazer in tan",
            "Crisp linen shirt in white or light blue",
        ],
        bottoms: &[
            "Tailored chinos in navy or light grey",
            "Linen-blend trousers",
        ],
        shoes: &["Suede loafers", "Leather dress shoes without socks"],
        accessories: &[
            "Silk pocket square",
            "Minimal leather watch",
            "Woven leather belt",
        ],
        notes: &[
            "Consider unstructured blazers for comfort",
            "Opt for lighter fabrics like linen and cotton blends",
        ],
    },
];

const STYLE_DEFAULT_SEASONS: &[(&str, &str)] = &[("casual", "summer"), ("formal", "summer")];

fn default_season_for(style: &str) -> &'static str {
    STYLE_DEFAULT_SEASONS
        .iter()
        .find(|(known, _)| *known == style)
        .map(|(_, season)| *season)
        .unwrap_or(DEFAULT_SEASON)
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

fn has_entry(style: &str, season: &str, gender: Option<&str>) -> bool {
    CATALOG.iter().any(|entry| {
        entry.style == style
            && entry.season == season
            && gender.map_or(true, |gender| entry.gender == gender)
    })
}

/// Gender and season are checked against the requested style and season;
/// only then is an unknown style replaced by `casual`. An unknown style
/// therefore always lands on the neutral summer entry.
fn resolve_entry(style: &str, season: &str, gender: &str) -> Option<&'static CatalogEntry> {
    let gender = if has_entry(style, season, Some(gender)) {
        gender
    } else {
        DEFAULT_GENDER
    };
    let season = if has_entry(style, season, None) {
        season
    } else {
        default_season_for(style)
    };
    let style = if CATALOG.iter().any(|entry| entry.style == style) {
        style
    } else {
        DEFAULT_STYLE
    };
    CATALOG
        .iter()
        .find(|entry| entry.style == style && entry.season == season && entry.gender == gender)
}

/// Builds fallback outfit `number` for the given preferences.
///
/// Lookup falls back gender → `neutral`, then season → the style's default,
/// then style → `casual`. The party override applies to the requested style, so an
/// unknown style that resolved to `casual` still gets it.
pub fn outfit_template(
    number: usize,
    style: &str,
    season: &str,
    occasion: &str,
    gender: &str,
) -> Outfit {
    let mut outfit = match resolve_entry(style, season, gender) {
        Some(entry) => entry.to_outfit(),
        None => {
            log::warn!("catalog has no entry for {style}/{season}/{gender}; using an empty card");
            Outfit::default()
        }
    };

    if occasion == "party" && style != "formal" {
        outfit.title = outfit.title.replacen("Casual", "Party", 1);
        outfit.description = PARTY_DESCRIPTION.to_string();
        outfit.accessories.push(PARTY_ACCESSORY.to_string());
    }

    outfit.title = format!("{} {number}", outfit.title);
    outfit
}

/// The three catalog outfits shown when the model path fails.
pub fn fallback_outfits(prefs: &Preferences) -> Vec<Outfit> {
    let style = prefs.style.as_deref().unwrap_or(DEFAULT_STYLE);
    let season = prefs.season.as_deref().unwrap_or(DEFAULT_SEASON);
    let occasion = prefs.occasion.as_deref().unwrap_or(DEFAULT_OCCASION);
    let gender = prefs.gender.as_deref().unwrap_or(DEFAULT_GENDER);
    (1..=FALLBACK_BATCH_SIZE)
        .map(|number| outfit_template(number, style, season, occasion, gender))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{fallback_outfits, outfit_template, PARTY_ACCESSORY};
    use crate::preferences::Preferences;

    #[test]
    fn formal_male_falls_back_to_neutral() {
        let outfit = outfit_template(1, "formal", "summer", "work", "male");
        assert_eq!(outfit.title, "Refined Summer Formal 1");
    }

    #[test]
    fn unknown_style_falls_back_to_casual() {
        let outfit = outfit_template(2, "cyberpunk", "summer", "casual", "neutral");
        assert_eq!(outfit.title, "Relaxed Summer Casual 2");
    }

    #[test]
    fn unknown_season_uses_style_default() {
        let outfit = outfit_template(1, "formal", "winter", "work", "neutral");
        assert_eq!(outfit.title, "Refined Summer Formal 1");

        let outfit = outfit_template(1, "casual", "spring", "work", "female");
        assert_eq!(outfit.title, "Relaxed Summer Casual 1");
    }

    #[test]
    fn fallbacks_use_the_requested_style_and_season() {
        let cases = [
            ("minimalist", "winter", "neutral", "Relaxed Summer Casual 1"),
            ("casual", "spring", "female", "Relaxed Summer Casual 1"),
            ("bohemian", "summer", "male", "Relaxed Summer Casual 1"),
            ("casual", "winter", "male", "Cozy Winter Casual 1"),
            ("casual", "summer", "female", "Effortless Summer Style 1"),
        ];
        for (style, season, gender, expected) in cases {
            let outfit = outfit_template(1, style, season, "casual", gender);
            assert_eq!(outfit.title, expected, "{style}/{season}/{gender}");
        }
    }

    #[test]
    fn gender_specific_entries_are_used_when_present() {
        let outfit = outfit_template(3, "casual", "summer", "casual", "male");
        assert_eq!(outfit.title, "Cool Summer Casual 3");

        let outfit = outfit_template(1, "casual", "winter", "casual", "female");
        assert_eq!(outfit.title, "Cozy Winter Casual 1");
    }

    #[test]
    fn party_override_rewrites_non_formal_templates() {
        let plain = outfit_template(1, "casual", "summer", "casual", "neutral");
        let party = outfit_template(1, "casual", "summer", "party", "neutral");

        assert!(plain.title.contains("Casual"));
        assert!(!party.title.contains("Casual"));
        assert_eq!(party.title, "Relaxed Summer Party 1");
        assert_eq!(party.accessories.len(), plain.accessories.len() + 1);
        assert_eq!(party.accessories.last().map(String::as_str), Some(PARTY_ACCESSORY));
        assert_ne!(party.description, plain.description);
    }

    #[test]
    fn party_override_without_casual_in_title_keeps_title() {
        let party = outfit_template(2, "casual", "summer", "party", "female");
        assert_eq!(party.title, "Effortless Summer Style 2");
        assert_eq!(party.accessories.len(), 4);
    }

    #[test]
    fn formal_style_ignores_party_override() {
        let outfit = outfit_template(1, "formal", "summer", "party", "neutral");
        assert_eq!(outfit.accessories.len(), 3);
        assert_eq!(outfit.title, "Refined Summer Formal 1");
    }

    #[test]
    fn batch_titles_are_numbered() {
        let outfits = fallback_outfits(&Preferences::default());
        let titles: Vec<&str> = outfits.iter().map(|outfit| outfit.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Relaxed Summer Casual 1",
                "Relaxed Summer Casual 2",
                "Relaxed Summer Casual 3",
            ]
        );
    }

    #[test]
    fn repeated_calls_do_not_share_state() {
        let mut first = outfit_template(1, "casual", "summer", "party", "neutral");
        first.accessories.push("Extra".to_string());
        let second = outfit_template(2, "casual", "summer", "party", "neutral");
        assert_eq!(second.accessories.len(), 4);
        assert_eq!(second.title, "Relaxed Summer Party 2");
    }
}
