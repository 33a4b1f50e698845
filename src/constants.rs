//! Well-known names shared with the host page and the process environment.

/// Global function the host exposes once its index widget is ready
pub const REGISTER_HOOK_NAME: &str = "register_implementors";

/// Global the snippet writes to when the hook is not yet available
pub const PENDING_SLOT_NAME: &str = "pending_implementors";

/// Local variable holding the table inside the registration snippet
pub const TABLE_VARIABLE_NAME: &str = "implementors";

pub mod env {
    /// Prefix for configuration overrides, e.g. `IMPLEMENTORS__WARN_ON_OVERWRITE=false`
    pub const CONFIG_PREFIX: &str = "IMPLEMENTORS";

    /// Separator between nested configuration keys
    pub const CONFIG_SEPARATOR: &str = "__";

    /// Environment name lookups, in priority order
    pub const ENVIRONMENT_VARS: [&str; 2] = ["IMPLEMENTORS_ENV", "APP_ENV"];

    pub const DEFAULT_ENVIRONMENT: &str = "development";
}
