//! Role Model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Staff role (perfil)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Waiter,
    Kitchen,
}

/// Screens of the front-of-house UI, used for the role access matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Login,
    ForgotPassword,
    Register,
    Dashboard,
    Dishes,
    Tables,
    Orders,
    ManageUsers,
    Profile,
}

impl Page {
    /// Pages reachable without a session
    pub fn is_public(&self) -> bool {
        matches!(self, Page::Login | Page::ForgotPassword | Page::Register)
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Waiter => "waiter",
            Role::Kitchen => "kitchen",
        }
    }

    /// Kitchen flow: only admin and kitchen move orders through statuses
    pub fn can_change_order_status(&self) -> bool {
        matches!(self, Role::Admin | Role::Kitchen)
    }

    /// User management is admin-only
    pub fn can_manage_users(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Page access matrix
    pub fn can_access(&self, page: Page) -> bool {
        if page.is_public() {
            return true;
        }
        match self {
            Role::Admin => true,
            Role::Waiter => matches!(
                page,
                Page::Dashboard | Page::Dishes | Page::Tables | Page::Profile
            ),
            Role::Kitchen => matches!(
                page,
                Page::Dashboard | Page::Dishes | Page::Orders | Page::Profile
            ),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "waiter" => Ok(Role::Waiter),
            "kitchen" => Ok(Role::Kitchen),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_matrix() {
        assert!(Role::Admin.can_access(Page::ManageUsers));
        assert!(Role::Admin.can_access(Page::Orders));

        assert!(Role::Waiter.can_access(Page::Tables));
        assert!(!Role::Waiter.can_access(Page::Orders));
        assert!(!Role::Waiter.can_access(Page::ManageUsers));

        assert!(Role::Kitchen.can_access(Page::Orders));
        assert!(!Role::Kitchen.can_access(Page::Tables));

        for role in [Role::Admin, Role::Waiter, Role::Kitchen] {
            assert!(role.can_access(Page::Login));
            assert!(role.can_access(Page::Profile));
        }
    }

    #[test]
    fn test_status_permission() {
        assert!(Role::Admin.can_change_order_status());
        assert!(Role::Kitchen.can_change_order_status());
        assert!(!Role::Waiter.can_change_order_status());
        assert!(Role::Admin.can_manage_users());
        assert!(!Role::Kitchen.can_manage_users());
    }

    #[test]
    fn test_parse_and_serde() {
        assert_eq!("Kitchen".parse::<Role>(), Ok(Role::Kitchen));
        assert!("chef".parse::<Role>().is_err());
        assert_eq!(serde_json::to_string(&Role::Waiter).unwrap(), "\"waiter\"");
    }
}
