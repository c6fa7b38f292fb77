mod catalog;
mod lookbook;
mod parser;
mod record;
pub mod visuals;

pub use catalog::{fallback_outfits, outfit_template, FALLBACK_BATCH_SIZE};
pub use lookbook::Lookbook;
pub use parser::{extract_outfits, parse_outfit_results, OutfitParseError};
pub use record::Outfit;
