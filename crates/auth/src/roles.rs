use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role name as issued by the backend session.
///
/// Roles are opaque strings; only the two administrative roles carry meaning
/// on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    /// Administers every company.
    pub const GLOBAL_ADMIN: Role = Role(Cow::Borrowed("GlobalAdmin"));
    /// Administers a single company.
    pub const ADMIN: Role = Role(Cow::Borrowed("Admin"));

    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_global_admin(&self) -> bool {
        self.as_str() == Self::GLOBAL_ADMIN.as_str()
    }

    pub fn is_admin(&self) -> bool {
        self.as_str() == Self::ADMIN.as_str()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
