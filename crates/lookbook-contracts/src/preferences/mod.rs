mod extractor;
mod record;

pub use extractor::{has_enough_preferences, update_preferences, PreferenceChange};
pub use record::{PreferenceCategory, Preferences};
