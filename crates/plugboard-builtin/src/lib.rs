// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in providers.
//!
//! These groups need no credentials and are always available:
//! - [`ClockProvider`] (`clock`) -- current time and date arithmetic

pub mod clock;

pub use clock::ClockProvider;

use std::sync::Arc;

use plugboard_core::ToolProvider;

/// Returns every built-in provider, ready for registration.
pub fn builtin_providers() -> Vec<Arc<dyn ToolProvider>> {
    vec![Arc::new(ClockProvider::new())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_not_integrations() {
        let providers = builtin_providers();
        assert_eq!(providers.len(), 1);
        assert!(providers.iter().all(|p| !p.is_integration()));
        assert_eq!(providers[0].app_name(), "clock");
    }
}
