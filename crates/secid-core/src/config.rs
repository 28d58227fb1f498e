use serde::{Deserialize, Serialize};

/// Knobs for [`crate::parse_locator_with`].
///
/// Deserializes from the `[parser]` table of a configuration file; missing
/// keys take their default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParserOptions {
    /// Reject locators that omit the `//<scheme>/<provider>` prefix.
    pub require_service: bool,
}

impl ParserOptions {
    pub const fn with_require_service(mut self, require_service: bool) -> Self {
        self.require_service = require_service;
        self
    }
}
