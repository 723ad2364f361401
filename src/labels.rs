// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Label constants stamped on every object the controller creates.
//!
//! The identifying pair (`app=Aquarium`) is what the ownership filter admits and
//! what the child `Deployment` selects its pods by.

use std::collections::BTreeMap;

// ============================================================================
// Label Keys
// ============================================================================

/// Identifying label key carried by every owned child object
pub const APP_LABEL: &str = "app";

/// Label recording the placement namespace an aquarium was deployed to
pub const LOCATED_AT_LABEL: &str = "located-at";

// ============================================================================
// Label Values
// ============================================================================

/// Value of the identifying label for objects owned by this controller
pub const APP_AQUARIUM: &str = "Aquarium";

/// Label selector string used to restrict child watches server-side
#[must_use]
pub fn owned_selector() -> String {
    format!("{APP_LABEL}={APP_AQUARIUM}")
}

/// The identifying label pair as a map, shared by the selector and pod template.
#[must_use]
pub fn identifying_labels() -> BTreeMap<String, String> {
    BTreeMap::from([(APP_LABEL.to_string(), APP_AQUARIUM.to_string())])
}
