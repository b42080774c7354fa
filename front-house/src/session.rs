//! Session context
//!
//! The acting user is passed explicitly into every call that needs one; the
//! engine never reads an ambient "current user".

use crate::core::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use shared::models::{Page, Role, User, UserProfile};

/// Current actor: id, display name, role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub user_name: String,
    pub role: Role,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>, role: Role) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
            role,
        }
    }

    pub fn can_access(&self, page: Page) -> bool {
        self.role.can_access(page)
    }

    /// Resolve an optional actor; a missing or blank one is no session
    pub fn resolve(actor: Option<&SessionContext>) -> EngineResult<&SessionContext> {
        match actor {
            Some(session) if !session.user_id.trim().is_empty() => Ok(session),
            _ => Err(EngineError::NoActiveSession),
        }
    }

    /// Admin-only operations
    pub fn require_admin(&self, action: &str) -> EngineResult<()> {
        if !self.role.can_manage_users() {
            crate::security_log!(
                WARN,
                "permission_denied",
                user_id = %self.user_id,
                role = %self.role,
                action = action
            );
            return Err(EngineError::Forbidden(format!(
                "{} requires the admin role",
                action
            )));
        }
        Ok(())
    }
}

impl From<&UserProfile> for SessionContext {
    fn from(user: &UserProfile) -> Self {
        Self::new(user.id.clone(), user.name.clone(), user.role)
    }
}

impl From<&User> for SessionContext {
    fn from(user: &User) -> Self {
        Self::new(user.id.clone(), user.name.clone(), user.role)
    }
}

/// Destructive actions the presentation layer must confirm before calling
///
/// The engine performs these unconditionally; asking the operator is the
/// caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    FreeTable,
    DeleteDish,
    DeleteUser,
    RevertOrderStatus,
}

impl ConfirmAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            ConfirmAction::FreeTable => {
                "Free this table? Its orders will be closed and the next party starts with an empty bill."
            }
            ConfirmAction::DeleteDish => "Delete this dish from the menu?",
            ConfirmAction::DeleteUser => "Delete this user account?",
            ConfirmAction::RevertOrderStatus => "Send this order back to requested?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorKind;

    #[test]
    fn test_resolve() {
        let waiter = SessionContext::new("u2", "Garçom Silva", Role::Waiter);
        assert_eq!(SessionContext::resolve(Some(&waiter)).unwrap(), &waiter);

        let err = SessionContext::resolve(None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoActiveSession);

        let blank = SessionContext::new(" ", "Ghost", Role::Admin);
        assert_eq!(
            SessionContext::resolve(Some(&blank)).unwrap_err().kind(),
            ErrorKind::NoActiveSession
        );
    }

    #[test]
    fn test_require_admin() {
        let admin = SessionContext::new("u1", "Admin Master", Role::Admin);
        let kitchen = SessionContext::new("u4", "Cozinheiro Chef", Role::Kitchen);
        assert!(admin.require_admin("delete user").is_ok());
        assert_eq!(
            kitchen.require_admin("delete user").unwrap_err().kind(),
            ErrorKind::Forbidden
        );
    }

    #[test]
    fn test_confirm_prompts() {
        let actions = [
            ConfirmAction::FreeTable,
            ConfirmAction::DeleteDish,
            ConfirmAction::DeleteUser,
            ConfirmAction::RevertOrderStatus,
        ];
        for action in actions {
            assert!(action.prompt().contains('?'));
        }
        assert!(ConfirmAction::FreeTable.prompt().contains("empty bill"));
    }

    #[test]
    fn test_page_access_follows_role() {
        let kitchen = SessionContext::new("u4", "Cozinheiro Chef", Role::Kitchen);
        assert!(kitchen.can_access(Page::Orders));
        assert!(!kitchen.can_access(Page::ManageUsers));
    }
}
