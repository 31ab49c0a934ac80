//! Active context resolved at login and embedded in every access token.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One primary role plus the flattened permission set for the caller's
/// tenant scope. `school_id` is `None` for platform admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveContext {
    pub role_id: Uuid,
    pub role_name: String,
    pub school_id: Option<Uuid>,
    /// Sorted, de-duplicated `<resource>:<action>` strings.
    pub permissions: Vec<String>,
}

impl ActiveContext {
    /// Exact string containment check. Wildcards are not expanded here —
    /// any expansion happens once at token issuance.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p == name)
    }
}
