use serde::{Deserialize, Serialize};

use tallybook_core::{CompanyId, UserId};

use crate::Role;

/// The signed-in user, as resolved from the backend session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub user_id: Option<UserId>,
    pub username: String,
    pub role: Role,
    /// Company the user belongs to. Global administrators usually have none.
    pub company_id: Option<CompanyId>,
}

impl CurrentUser {
    pub fn new(username: impl Into<String>, role: Role, company_id: Option<CompanyId>) -> Self {
        Self {
            user_id: None,
            username: username.into(),
            role,
            company_id,
        }
    }

    pub fn is_global_admin(&self) -> bool {
        self.role.is_global_admin()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
