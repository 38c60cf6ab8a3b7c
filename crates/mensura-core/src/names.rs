//! Display and registry forms of unit names.
//!
//! Users see `nautical mile`; the registry knows `nautical_mile`.

/// Converts a display name to registry form (spaces become underscores).
pub fn to_registry_form(display: &str) -> String {
    display.replace(' ', "_")
}

/// Converts a registry name to display form (underscores become spaces).
pub fn to_display_form(registry: &str) -> String {
    registry.replace('_', " ")
}
