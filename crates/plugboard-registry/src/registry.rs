// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry keyed by app name.
//!
//! The registry is populated during bootstrap through `&mut self` and then
//! frozen behind an `Arc` (see [`Plugboard`](crate::Plugboard)), so
//! concurrent readers never race a writer. Registering while the registry is
//! shared requires the host's own synchronization and is not supported here.

use std::sync::Arc;

use indexmap::IndexMap;
use plugboard_core::{ConfigurableIntegration, ToolDescriptor, ToolProvider};
use tracing::{debug, warn};

/// Directory of providers, addressable by name.
///
/// Names are unique and the last registration for a name wins. Iteration
/// follows the order in which names were first registered.
#[derive(Default)]
pub struct ToolProviderRegistry {
    providers: IndexMap<String, Arc<dyn ToolProvider>>,
}

impl ToolProviderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under its `app_name()`.
    ///
    /// An existing provider with the same name is replaced and returned.
    pub fn register(&mut self, provider: Arc<dyn ToolProvider>) -> Option<Arc<dyn ToolProvider>> {
        let name = provider.app_name().to_string();
        let replaced = self.providers.insert(name.clone(), provider);
        if replaced.is_some() {
            warn!(provider = %name, "provider re-registered, replacing previous instance");
        } else {
            debug!(provider = %name, "provider registered");
        }
        replaced
    }

    /// Every registered provider, keyed by name.
    pub fn all(&self) -> &IndexMap<String, Arc<dyn ToolProvider>> {
        &self.providers
    }

    /// Looks up a provider. Absence is an expected outcome.
    pub fn get(&self, name: &str) -> Option<Arc<dyn ToolProvider>> {
        self.providers.get(name).cloned()
    }

    /// Whether a provider is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    /// Registered names in iteration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.keys().map(String::as_str)
    }

    /// Providers that represent toggle-able external integrations.
    pub fn integrations(&self) -> impl Iterator<Item = &Arc<dyn ToolProvider>> {
        self.providers.values().filter(|p| p.is_integration())
    }

    /// The configurable view of a provider, if it is registered and has one.
    pub fn configurable(&self, name: &str) -> Option<&dyn ConfigurableIntegration> {
        self.providers.get(name)?.as_configurable()
    }

    /// Finds the provider exposing the tool `slug`, with its descriptor.
    ///
    /// Slugs are unique within a provider; across providers the first match
    /// in iteration order wins.
    pub fn find_tool(&self, slug: &str) -> Option<(Arc<dyn ToolProvider>, ToolDescriptor)> {
        self.providers.values().find_map(|provider| {
            provider
                .tools()
                .swap_remove(slug)
                .map(|descriptor| (Arc::clone(provider), descriptor))
        })
    }

    /// Returns the number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Returns true if no providers are registered.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ToolProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolProviderRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugboard_test_utils::MockProvider;
    use proptest::prelude::*;
    use tracing_test::traced_test;

    fn provider(name: &str) -> Arc<dyn ToolProvider> {
        Arc::new(MockProvider::new(name))
    }

    #[test]
    fn register_then_get_and_has() {
        let mut registry = ToolProviderRegistry::new();
        let alpha = provider("alpha");
        assert!(registry.register(Arc::clone(&alpha)).is_none());

        let found = registry.get("alpha").unwrap();
        assert!(Arc::ptr_eq(&found, &alpha));
        assert!(registry.has("alpha"));
    }

    #[test]
    fn unknown_name_is_absent() {
        let registry = ToolProviderRegistry::new();
        assert!(registry.get("gamma").is_none());
        assert!(!registry.has("gamma"));
        assert!(registry.configurable("gamma").is_none());
    }

    #[test]
    #[traced_test]
    fn last_registration_wins() {
        let mut registry = ToolProviderRegistry::new();
        let first = provider("alpha");
        let second = provider("alpha");
        registry.register(Arc::clone(&first));
        let replaced = registry.register(Arc::clone(&second)).unwrap();

        assert!(Arc::ptr_eq(&replaced, &first));
        assert!(Arc::ptr_eq(&registry.get("alpha").unwrap(), &second));
        assert_eq!(registry.len(), 1);
        assert!(logs_contain("provider re-registered"));
    }

    #[test]
    fn all_keeps_first_registration_order() {
        let mut registry = ToolProviderRegistry::new();
        registry.register(provider("zebra"));
        registry.register(provider("alpha"));
        registry.register(provider("middle"));
        registry.register(provider("zebra"));

        let names: Vec<&str> = registry.all().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["zebra", "alpha", "middle"]);
        assert_eq!(registry.names().count(), 3);
    }

    #[test]
    fn integrations_filter_on_flag() {
        let mut registry = ToolProviderRegistry::new();
        registry.register(provider("builtin"));
        registry.register(Arc::new(MockProvider::new("external").as_integration()));

        let names: Vec<&str> = registry.integrations().map(|p| p.app_name()).collect();
        assert_eq!(names, vec!["external"]);
    }

    #[test]
    fn configurable_is_a_runtime_capability_check() {
        let mut registry = ToolProviderRegistry::new();
        registry.register(provider("plain"));
        registry.register(Arc::new(MockProvider::new("form").configurable()));

        assert!(registry.configurable("plain").is_none());
        let form = registry.configurable("form").unwrap();
        assert!(!form.config_schema().is_empty());
    }

    #[test]
    fn find_tool_locates_provider_by_slug() {
        let mut registry = ToolProviderRegistry::new();
        registry.register(Arc::new(MockProvider::new("alpha").with_tool("alpha_echo")));
        registry.register(Arc::new(MockProvider::new("beta").with_tool("beta_echo")));

        let (owner, descriptor) = registry.find_tool("beta_echo").unwrap();
        assert_eq!(owner.app_name(), "beta");
        assert_eq!(descriptor.class, "mock::Echo");
        assert!(registry.find_tool("nope").is_none());
    }

    #[test]
    fn len_and_is_empty() {
        let mut registry = ToolProviderRegistry::new();
        assert!(registry.is_empty());
        registry.register(provider("alpha"));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
        assert!(format!("{registry:?}").contains("alpha"));
    }

    proptest! {
        #[test]
        fn all_counts_distinct_names(names in proptest::collection::vec("[a-e]{1,2}", 0..20)) {
            let mut registry = ToolProviderRegistry::new();
            for name in &names {
                registry.register(provider(name));
            }

            let distinct: std::collections::HashSet<&String> = names.iter().collect();
            prop_assert_eq!(registry.all().len(), distinct.len());
            for name in &names {
                prop_assert!(registry.has(name));
                prop_assert_eq!(registry.get(name).map(|p| p.app_name().to_string()), Some(name.clone()));
            }
        }
    }
}
