//! Operator session and role models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of the signed-in operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Cashier,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Cashier => "cashier",
        }
    }
}

/// The signed-in operator's context, threaded explicitly to every core
/// operation instead of living in ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Uuid,
    pub name: String,
    pub role: Role,
}

impl Session {
    pub fn new(user_id: Uuid, name: String, role: Role) -> Self {
        Self {
            user_id,
            name,
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}
