// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup wiring: registry population, resolver binding, and freezing.
//!
//! The host builds one [`Plugboard`] at startup and passes it (or its parts)
//! to whatever needs lookups. After [`PlugboardBuilder::build`] the registry
//! sits behind an `Arc` and cannot be mutated.

use std::sync::Arc;

use plugboard_config::PlugboardConfig;
use plugboard_core::{CredentialResolver, ToolProvider};
use tracing::info;

use crate::catalog::{CatalogEntry, build_catalog};
use crate::registry::ToolProviderRegistry;
use crate::resolver::ConfigCredentialResolver;

/// Frozen registry plus the bound credential resolver.
#[derive(Clone)]
pub struct Plugboard {
    registry: Arc<ToolProviderRegistry>,
    credentials: Arc<dyn CredentialResolver>,
}

impl Plugboard {
    /// Starts wiring against the given configuration store.
    pub fn builder(config: Arc<PlugboardConfig>) -> PlugboardBuilder {
        PlugboardBuilder {
            config,
            registry: ToolProviderRegistry::new(),
            credentials: None,
        }
    }

    pub fn registry(&self) -> &Arc<ToolProviderRegistry> {
        &self.registry
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialResolver> {
        &self.credentials
    }

    /// Registered and, for integrations, configured.
    pub fn is_available(&self, name: &str) -> bool {
        self.registry
            .get(name)
            .is_some_and(|p| !p.is_integration() || self.credentials.is_configured(name))
    }

    pub fn catalog(&self) -> Vec<CatalogEntry> {
        build_catalog(&self.registry, self.credentials.as_ref())
    }
}

impl std::fmt::Debug for Plugboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugboard")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// Registration phase of a [`Plugboard`].
pub struct PlugboardBuilder {
    config: Arc<PlugboardConfig>,
    registry: ToolProviderRegistry,
    credentials: Option<Arc<dyn CredentialResolver>>,
}

impl PlugboardBuilder {
    /// Binds a host-supplied resolver in place of the config-backed default.
    ///
    /// Bind before calling [`register_with`](Self::register_with) so
    /// providers receive the override.
    pub fn credential_resolver(mut self, resolver: Arc<dyn CredentialResolver>) -> Self {
        self.credentials = Some(resolver);
        self
    }

    /// The resolver providers should use: the bound one, or the default
    /// [`ConfigCredentialResolver`] over the configuration store.
    pub fn resolver(&self) -> Arc<dyn CredentialResolver> {
        match &self.credentials {
            Some(resolver) => Arc::clone(resolver),
            None => Arc::new(ConfigCredentialResolver::new(Arc::clone(&self.config))),
        }
    }

    /// Registers a provider. Last registration for a name wins.
    pub fn register(mut self, provider: Arc<dyn ToolProvider>) -> Self {
        self.registry.register(provider);
        self
    }

    /// Registers a provider built from the current resolver.
    pub fn register_with<F>(self, make: F) -> Self
    where
        F: FnOnce(Arc<dyn CredentialResolver>) -> Arc<dyn ToolProvider>,
    {
        let provider = make(self.resolver());
        self.register(provider)
    }

    /// Ends registration and freezes the registry.
    pub fn build(self) -> Plugboard {
        let credentials = self.resolver();
        info!(providers = self.registry.len(), "plugboard registry frozen");
        Plugboard {
            registry: Arc::new(self.registry),
            credentials,
        }
    }
}
