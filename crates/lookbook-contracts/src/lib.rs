pub mod chat;
pub mod conversation;
pub mod events;
pub mod export;
pub mod outfits;
pub mod preferences;
pub mod prompts;
pub mod providers;
