//! Contacts (callers)

use serde::{Deserialize, Serialize};

/// Site role held by a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Program chair; administers every paper
    Chair,
    /// Program committee member
    Pc,
}

/// A site contact. The export caller is a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Email, unique per site (compared case-insensitively)
    pub email: String,

    /// Display name
    #[serde(default)]
    pub name: Option<String>,

    /// Site roles
    #[serde(default)]
    pub roles: Vec<Role>,
}

impl Contact {
    /// Creates a contact without roles
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: None,
            roles: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    pub fn is_chair(&self) -> bool {
        self.roles.contains(&Role::Chair)
    }

    pub fn is_pc(&self) -> bool {
        self.is_chair() || self.roles.contains(&Role::Pc)
    }

    /// Case-insensitive email comparison
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email)
    }
}
