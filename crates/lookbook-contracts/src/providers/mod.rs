#[derive(Debug, Clone)]
pub struct ProviderRegistry<T: NamedProvider> {
    providers: Vec<T>,
}

pub trait NamedProvider {
    fn name(&self) -> &str;
}

impl<T: NamedProvider> ProviderRegistry<T> {
    pub fn new(providers: Vec<T>) -> Self {
        Self { providers }
    }

    pub fn list(&self) -> Vec<String> {
        let mut names = self
            .providers
            .iter()
            .map(|provider| provider.name().to_string())
            .collect::<Vec<String>>();
        names.sort();
        names
    }

    /// Takes the provider named `requested` out of the registry, falling back
    /// to the first registered one with an explanation.
    pub fn into_selected(self, requested: Option<&str>) -> Result<(T, Option<String>), String> {
        let index = match requested {
            Some(name) => self
                .providers
                .iter()
                .position(|provider| provider.name() == name),
            None => None,
        };
        let fallback_reason = match (requested, index) {
            (_, Some(_)) => None,
            (Some(name), None) => Some(format!("Requested provider '{name}' unavailable.")),
            (None, None) => Some("No provider specified; using default.".to_string()),
        };
        let mut providers = self.providers;
        if providers.is_empty() {
            return Err("No text providers registered.".to_string());
        }
        Ok((providers.swap_remove(index.unwrap_or(0)), fallback_reason))
    }
}

#[cfg(test)]
mod tests {
    use super::{NamedProvider, ProviderRegistry};

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct DummyProvider {
        name: String,
    }

    impl NamedProvider for DummyProvider {
        fn name(&self) -> &str {
            self.name.as_str()
        }
    }

    fn registry(names: &[&str]) -> ProviderRegistry<DummyProvider> {
        ProviderRegistry::new(
            names
                .iter()
                .map(|name| DummyProvider {
                    name: (*name).to_string(),
                })
                .collect(),
        )
    }

    #[test]
    fn names_are_listed_sorted_while_default_keeps_registration_order() {
        let registry = registry(&["gemini", "dryrun"]);
        assert_eq!(registry.list(), vec!["dryrun", "gemini"]);
        let (provider, _) = registry.into_selected(None).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn unknown_provider_falls_back_to_first() {
        let (provider, reason) = registry(&["dryrun", "gemini"])
            .into_selected(Some("missing"))
            .unwrap();
        assert_eq!(provider.name(), "dryrun");
        assert_eq!(
            reason.as_deref(),
            Some("Requested provider 'missing' unavailable.")
        );
    }

    #[test]
    fn empty_registry_errors() {
        let err = registry(&[]).into_selected(None).err().unwrap_or_default();
        assert_eq!(err, "No text providers registered.");
    }

    #[test]
    fn into_selected_moves_the_provider_out() {
        let (provider, reason) = registry(&["dryrun", "gemini"])
            .into_selected(Some("gemini"))
            .unwrap();
        assert_eq!(provider.name(), "gemini");
        assert!(reason.is_none());

        let (provider, reason) = registry(&["dryrun", "gemini"]).into_selected(None).unwrap();
        assert_eq!(provider.name(), "dryrun");
        assert_eq!(
            reason.as_deref(),
            Some("No provider specified; using default.")
        );
    }
}
