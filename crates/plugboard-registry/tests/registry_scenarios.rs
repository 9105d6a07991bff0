// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end registry and credential scenarios.

use std::sync::Arc;

use plugboard_config::load_config_from_str;
use plugboard_core::{CredentialResolver, PlugboardError, ToolContext};
use plugboard_registry::{ConfigCredentialResolver, Plugboard, ToolProviderRegistry};
use plugboard_test_utils::{MOCK_TOOL_CLASS, MockProvider};
use serde_json::json;

#[test]
fn alpha_configured_beta_not_gamma_absent() {
    let config = Arc::new(
        load_config_from_str(
            r#"
[integrations.alpha]
api_key = "k1"

[integrations.beta]
url = "https://beta.example.com"
"#,
        )
        .unwrap(),
    );

    let plugboard = Plugboard::builder(config)
        .register(Arc::new(MockProvider::new("alpha").as_integration()))
        .register(Arc::new(MockProvider::new("beta").as_integration()))
        .build();

    let credentials = plugboard.credentials();
    assert!(credentials.is_configured("alpha"));
    assert!(!credentials.is_configured("beta"));
    assert_eq!(plugboard.registry().all().len(), 2);
    assert!(plugboard.registry().get("gamma").is_none());
    assert!(!plugboard.registry().has("gamma"));
}

#[test]
fn resolver_fallback_for_unset_key() {
    let config = Arc::new(load_config_from_str("").unwrap());
    let resolver = ConfigCredentialResolver::new(config);
    assert_eq!(
        resolver.get_or("plausible", "api_key", json!("fallback")),
        json!("fallback")
    );
}

#[test]
fn create_tool_through_registry_lookup() {
    let alpha = Arc::new(MockProvider::new("alpha").with_tool("alpha_echo"));
    let mut registry = ToolProviderRegistry::new();
    registry.register(alpha.clone());

    let (provider, descriptor) = registry.find_tool("alpha_echo").unwrap();
    let tool = provider
        .create_tool(&descriptor.class, &ToolContext::new().with("timezone", "UTC"))
        .unwrap();
    assert_eq!(tool.name(), "alpha_echo");

    let err = match provider.create_tool("mock::Missing", &ToolContext::new()) {
        Err(err) => err,
        Ok(_) => panic!("unknown class must fail"),
    };
    assert!(matches!(
        err,
        PlugboardError::UnknownToolImplementation { ref provider, ref class }
            if provider == "alpha" && class == "mock::Missing"
    ));

    // Only the successful construction reached the provider's factory.
    assert_eq!(alpha.created_classes(), vec![MOCK_TOOL_CLASS]);
}

#[test]
fn frozen_registry_is_shareable_across_threads() {
    let plugboard = Plugboard::builder(Arc::new(load_config_from_str("").unwrap()))
        .register(Arc::new(MockProvider::new("alpha")))
        .build();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let registry = Arc::clone(plugboard.registry());
            std::thread::spawn(move || registry.has("alpha"))
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
