//! Icon selection for outfit cards.
//!
//! Front ends draw the actual glyphs; this module only decides which glyph
//! each category gets and which palette colour fills it.

use rand::seq::SliceRandom;
use rand::Rng;

use super::record::Outfit;

pub const TOP_PALETTE: &[&str] = &[
    "#f8c9b9", "#e3d5f2", "#c7e5d6", "#f1a5a5", "#a8d7e0", "#d6c6ff",
];
pub const BOTTOM_PALETTE: &[&str] = &["#212529", "#394a59", "#455b6d", "#3c3c50", "#2c2c3e"];
pub const SHOE_PALETTE: &[&str] = &["#212529", "#483d68", "#3a2f54", "#1a1a2e"];
pub const ACCESSORY_PALETTE: &[&str] = &["#f5b39e", "#d86464", "#b4dac3", "#c25e5e"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IconKind {
    Shirt,
    Jacket,
    Pants,
    Dress,
    Shoe,
    Hat,
    Necklace,
    Bag,
    Watch,
    Glasses,
    Accessory,
}

impl IconKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Shirt => "shirt",
            Self::Jacket => "jacket",
            Self::Pants => "pants",
            Self::Dress => "dress",
            Self::Shoe => "shoe",
            Self::Hat => "hat",
            Self::Necklace => "necklace",
            Self::Bag => "bag",
            Self::Watch => "watch",
            Self::Glasses => "glasses",
            Self::Accessory => "accessory",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClothingIcon {
    pub kind: IconKind,
    pub fill: &'static str,
    pub label: String,
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

pub fn top_kind(item: &str) -> IconKind {
    if contains_any(&item.to_lowercase(), &["jacket", "blazer", "coat"]) {
        IconKind::Jacket
    } else {
        IconKind::Shirt
    }
}

pub fn bottom_kind(item: &str) -> IconKind {
    if contains_any(&item.to_lowercase(), &["dress", "skirt"]) {
        IconKind::Dress
    } else {
        IconKind::Pants
    }
}

pub fn accessory_kind(item: &str) -> IconKind {
    let lowered = item.to_lowercase();
    if contains_any(&lowered, &["hat", "cap", "beanie"]) {
        IconKind::Hat
    } else if contains_any(&lowered, &["necklace", "jewelry", "chain"]) {
        IconKind::Necklace
    } else if contains_any(&lowered, &["bag", "purse", "handbag"]) {
        IconKind::Bag
    } else if contains_any(&lowered, &["watch", "bracelet"]) {
        IconKind::Watch
    } else if contains_any(&lowered, &["glasses", "sunglasses"]) {
        IconKind::Glasses
    } else {
        IconKind::Accessory
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, palette: &'static [&'static str]) -> &'static str {
    palette.choose(rng).copied().unwrap_or("#212529")
}

/// One icon per non-empty category, keyed off the first item listed.
pub fn clothing_icons<R: Rng + ?Sized>(outfit: &Outfit, rng: &mut R) -> Vec<ClothingIcon> {
    let mut icons = Vec::new();
    if let Some(top) = outfit.tops.first() {
        icons.push(ClothingIcon {
            kind: top_kind(top),
            fill: pick(rng, TOP_PALETTE),
            label: top.clone(),
        });
    }
    if let Some(bottom) = outfit.bottoms.first() {
        icons.push(ClothingIcon {
            kind: bottom_kind(bottom),
            fill: pick(rng, BOTTOM_PALETTE),
            label: bottom.clone(),
        });
    }
    if let Some(shoe) = outfit.shoes.first() {
        icons.push(ClothingIcon {
            kind: IconKind::Shoe,
            fill: pick(rng, SHOE_PALETTE),
            label: shoe.clone(),
        });
    }
    if let Some(accessory) = outfit.accessories.first() {
        icons.push(ClothingIcon {
            kind: accessory_kind(accessory),
            fill: pick(rng, ACCESSORY_PALETTE),
            label: accessory.clone(),
        });
    }
    icons
}
