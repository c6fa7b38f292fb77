use serde::{Deserialize, Serialize};

/// One look in the lookbook. Field names match the JSON the model is asked
/// to produce; `title` is the only required one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tops: Vec<String>,
    #[serde(default)]
    pub bottoms: Vec<String>,
    #[serde(default)]
    pub shoes: Vec<String>,
    #[serde(default)]
    pub accessories: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl Outfit {
    /// Category label and items, in display order.
    pub fn categories(&self) -> [(&'static str, &[String]); 4] {
        [
            ("Tops", self.tops.as_slice()),
            ("Bottoms", self.bottoms.as_slice()),
            ("Shoes", self.shoes.as_slice()),
            ("Accessories", self.accessories.as_slice()),
        ]
    }
}
