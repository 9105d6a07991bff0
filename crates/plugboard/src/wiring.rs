// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Startup registration of every provider shipped with the binary.

use std::sync::Arc;

use plugboard_config::PlugboardConfig;
use plugboard_plausible::PlausibleProvider;
use plugboard_registry::Plugboard;
use tracing::debug;

/// Registers built-ins and integrations against `config` and freezes the result.
pub fn build_plugboard(config: PlugboardConfig) -> Plugboard {
    let mut builder = Plugboard::builder(Arc::new(config));
    for provider in plugboard_builtin::builtin_providers() {
        builder = builder.register(provider);
    }
    let plugboard = builder
        .register_with(|credentials| Arc::new(PlausibleProvider::new(credentials)))
        .build();

    debug!(
        providers = ?plugboard.registry().names().collect::<Vec<_>>(),
        "providers wired"
    );
    plugboard
}
