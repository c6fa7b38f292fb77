use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lookbook_contracts::conversation::{ChatHistory, Role};
use lookbook_contracts::events::{EventLog, SessionEvent};
use lookbook_contracts::export::write_lookbook;
use lookbook_contracts::outfits::{extract_outfits, fallback_outfits, Lookbook, Outfit};
use lookbook_contracts::preferences::{
    has_enough_preferences, update_preferences, PreferenceCategory, PreferenceChange, Preferences,
};
use lookbook_contracts::prompts::{build_prompt, filter_generation_message, PromptKind};
use serde_json::{json, Map, Value};

mod providers;

pub use providers::{
    build_request_body, default_provider_registry, extract_completion_text, DryrunProvider,
    GeminiProvider, ModelError, TextProvider, TextProviderRegistry, DEFAULT_GEMINI_API_BASE,
    DEFAULT_GEMINI_MODEL,
};

pub const APOLOGY_MESSAGE: &str =
    "I'm having trouble connecting right now. Please try again later.";

/// Where the current lookbook came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutfitSource {
    Model { count: usize },
    Catalog { reason: String },
}

impl OutfitSource {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Model { .. } => "model",
            Self::Catalog { .. } => "catalog",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutcome {
    pub reply: String,
    pub failed: bool,
    pub preference_changes: Vec<PreferenceChange>,
    pub outfits: Option<OutfitSource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub category: PreferenceCategory,
    pub value: Option<String>,
    pub outfits: Option<OutfitSource>,
}

/// One stylist conversation: preferences, transcript and lookbook, plus the
/// provider that answers prompts.
///
/// Every operation takes `&mut self`, so a chat turn and a filter-triggered
/// regeneration can never interleave.
pub struct StylistEngine {
    session_id: String,
    provider: Box<dyn TextProvider>,
    events: Option<EventLog>,
    preferences: Preferences,
    history: ChatHistory,
    lookbook: Lookbook,
    last_source: Option<OutfitSource>,
}

impl StylistEngine {
    pub fn new(provider: Box<dyn TextProvider>, events_path: Option<PathBuf>) -> Self {
        let session_id = uuid::Uuid::new_v4().to_string();
        let events = events_path.map(|path| EventLog::new(path, session_id.clone()));
        let engine = Self {
            session_id,
            provider,
            events,
            preferences: Preferences::default(),
            history: ChatHistory::new(),
            lookbook: Lookbook::default(),
            last_source: None,
        };
        engine.emit(
            SessionEvent::SessionStarted,
            json!({ "provider": engine.provider.name() }),
        );
        engine
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn lookbook(&self) -> &Lookbook {
        &self.lookbook
    }

    pub fn lookbook_mut(&mut self) -> &mut Lookbook {
        &mut self.lookbook
    }

    pub fn last_source(&self) -> Option<&OutfitSource> {
        self.last_source.as_ref()
    }

    /// Runs one chat turn. Blank input is ignored and yields `None`.
    ///
    /// A failed reply surfaces [`APOLOGY_MESSAGE`], is not recorded in the
    /// history, and skips outfit generation for the turn. No failure inside a
    /// turn ends the session.
    pub fn handle_message(&mut self, text: &str) -> Option<ChatOutcome> {
        if text.trim().is_empty() {
            return None;
        }
        self.history.push(Role::User, text);

        let preference_changes = update_preferences(&mut self.preferences, text);
        if !preference_changes.is_empty() {
            let changes: Vec<Value> = preference_changes
                .iter()
                .map(|change| {
                    json!({
                        "category": change.category.as_str(),
                        "previous": change.previous,
                        "value": change.value,
                    })
                })
                .collect();
            self.emit(SessionEvent::PreferencesUpdated, json!({ "changes": changes }));
        }

        let prompt = build_prompt(text, PromptKind::Chat, &self.preferences, &self.history);
        let reply = match self.provider.generate(PromptKind::Chat, &prompt) {
            Ok(reply) => reply,
            Err(err) => {
                log::error!("error processing message: {err}");
                self.emit(SessionEvent::ChatFailed, json!({ "error": err.to_string() }));
                return Some(ChatOutcome {
                    reply: APOLOGY_MESSAGE.to_string(),
                    failed: true,
                    preference_changes,
                    outfits: None,
                });
            }
        };

        self.history.push(Role::Assistant, reply.clone());
        self.emit(
            SessionEvent::ChatReply,
            json!({ "chars": reply.chars().count(), "turns": self.history.len() }),
        );

        let outfits = if has_enough_preferences(&self.preferences) {
            Some(self.regenerate_outfits(text))
        } else {
            None
        };

        Some(ChatOutcome {
            reply,
            failed: false,
            preference_changes,
            outfits,
        })
    }

    /// Asks the provider for a fresh batch. Any failure along the way, or an
    /// empty batch, swaps in the catalog outfits instead.
    pub fn regenerate_outfits(&mut self, message: &str) -> OutfitSource {
        let prompt = build_prompt(
            message,
            PromptKind::Outfits,
            &self.preferences,
            &self.history,
        );
        let attempt = self
            .provider
            .generate(PromptKind::Outfits, &prompt)
            .map_err(|err| err.to_string())
            .and_then(|response| extract_outfits(&response).map_err(|err| err.to_string()));

        let (outfits, source) = match attempt {
            Ok(outfits) if !outfits.is_empty() => {
                let count = outfits.len();
                (outfits, OutfitSource::Model { count })
            }
            Ok(_) => self.catalog_outfits("model returned no outfits".to_string()),
            Err(reason) => self.catalog_outfits(reason),
        };

        let reason = match &source {
            OutfitSource::Catalog { reason } => Some(reason.as_str()),
            OutfitSource::Model { .. } => None,
        };
        let titles: Vec<&str> = outfits.iter().map(|outfit| outfit.title.as_str()).collect();
        self.emit(
            SessionEvent::OutfitsGenerated,
            json!({
                "source": source.label(),
                "count": outfits.len(),
                "titles": titles,
                "reason": reason,
            }),
        );
        self.lookbook.replace(outfits);
        self.last_source = Some(source.clone());
        source
    }

    /// Filter-control semantics: choosing the active value clears it. When
    /// enough is known afterwards the lookbook is regenerated.
    pub fn toggle_filter(&mut self, category: PreferenceCategory, value: &str) -> FilterOutcome {
        let value = self
            .preferences
            .toggle(category, value)
            .map(str::to_string);
        self.after_filter_change(category, value)
    }

    pub fn clear_preference(&mut self, category: PreferenceCategory) -> FilterOutcome {
        self.preferences.clear(category);
        self.after_filter_change(category, None)
    }

    pub fn export_lookbook(&self, path: &Path) -> Result<()> {
        let mut extra = Map::new();
        extra.insert(
            "source".to_string(),
            self.last_source
                .as_ref()
                .map(|source| Value::String(source.label().to_string()))
                .unwrap_or(Value::Null),
        );
        write_lookbook(
            path,
            &self.session_id,
            &self.lookbook,
            &self.preferences,
            Some(&extra),
        )
        .with_context(|| format!("failed to export lookbook to {}", path.display()))
    }

    fn after_filter_change(
        &mut self,
        category: PreferenceCategory,
        value: Option<String>,
    ) -> FilterOutcome {
        self.emit(
            SessionEvent::FilterToggled,
            json!({ "category": category.as_str(), "value": value }),
        );
        let outfits = if has_enough_preferences(&self.preferences) {
            let message = filter_generation_message(&self.preferences);
            Some(self.regenerate_outfits(&message))
        } else {
            None
        };
        FilterOutcome {
            category,
            value,
            outfits,
        }
    }

    fn catalog_outfits(&self, reason: String) -> (Vec<Outfit>, OutfitSource) {
        log::warn!("falling back to catalog outfits: {reason}");
        (
            fallback_outfits(&self.preferences),
            OutfitSource::Catalog { reason },
        )
    }

    /// Event-log failures are reported and otherwise ignored.
    fn emit(&self, event: SessionEvent, payload: Value) {
        let Some(events) = self.events.as_ref() else {
            return;
        };
        if let Err(err) = events.record(event, payload) {
            log::warn!("failed to write {} event: {err:#}", event.as_str());
        }
    }
}
