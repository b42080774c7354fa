//! User Directory
//!
//! Emails are unique case-insensitively and stored lower-cased. Passwords are
//! compared in plaintext; this store is not meant for real credentials.

use crate::catalog::user_image_ref;
use crate::core::{EngineError, EngineResult, Entity};
use crate::session::SessionContext;
use crate::store::Store;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_PASSWORD_LEN, MAX_URL_LEN, check_len, normalize_email, optional_text,
    required_text,
};
use shared::models::{NewUser, ProfileUpdate, User, UserProfile, UserUpdate};
use shared::util::prefixed_id;
use std::sync::Arc;

fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn validate_password(password: &str) -> EngineResult<String> {
    if password.is_empty() {
        return Err(EngineError::invalid_field("password", "must not be empty"));
    }
    check_len(password, "password", MAX_PASSWORD_LEN)?;
    Ok(password.to_string())
}

/// A non-empty replacement password, if one was supplied
fn new_password(password: Option<&str>) -> EngineResult<Option<String>> {
    match password {
        Some(p) if !p.is_empty() => validate_password(p).map(Some),
        _ => Ok(None),
    }
}

/// User accounts, login and profiles
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn Store>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn list_users(&self) -> EngineResult<Vec<UserProfile>> {
        Ok(self.store.users()?.iter().map(UserProfile::from).collect())
    }

    pub fn get_user(&self, user_id: &str) -> EngineResult<UserProfile> {
        self.store
            .users()?
            .iter()
            .find(|u| u.id == user_id)
            .map(UserProfile::from)
            .ok_or_else(|| EngineError::not_found(Entity::User, user_id))
    }

    /// Create an account (admin action or registration)
    pub fn add_user(&self, input: NewUser) -> EngineResult<UserProfile> {
        let name = required_text(&input.name, "name", MAX_NAME_LEN)?;
        let email = normalize_email(&input.email)?;
        let password = validate_password(&input.password)?;
        let image_ref = optional_text(input.image_ref.as_deref(), "image_ref", MAX_URL_LEN)?;

        let mut users = self.store.users()?;
        if users.iter().any(|u| same_email(&u.email, &email)) {
            return Err(EngineError::DuplicateEmail(email));
        }

        let user = User {
            id: prefixed_id('u'),
            name,
            email,
            role: input.role,
            password,
            image_ref,
        };
        users.push(user.clone());
        self.store.save_users(&users)?;

        tracing::info!(user_id = %user.id, email = %user.email, role = %user.role, "User added");
        Ok(UserProfile::from(&user))
    }

    /// Public self-registration
    pub fn register(&self, input: NewUser, confirm_password: &str) -> EngineResult<UserProfile> {
        if input.password != confirm_password {
            return Err(EngineError::invalid_field(
                "confirm_password",
                "passwords do not match",
            ));
        }
        self.add_user(input)
    }

    /// Email is case-insensitive, password exact
    pub fn authenticate(&self, email: &str, password: &str) -> EngineResult<UserProfile> {
        let email = email.trim();
        let user = self
            .store
            .users()?
            .into_iter()
            .find(|u| same_email(&u.email, email) && u.password == password);

        match user {
            Some(user) => {
                crate::security_log!(INFO, "login", user_id = %user.id, role = %user.role);
                Ok(UserProfile::from(&user))
            }
            None => {
                crate::security_log!(WARN, "auth_failed", email = %email);
                Err(EngineError::InvalidCredentials)
            }
        }
    }

    /// Session for a freshly authenticated user
    pub fn session_for(&self, user: &UserProfile) -> SessionContext {
        SessionContext::from(user)
    }

    /// Admin edit: name, email, role, and password when a non-empty one is given
    ///
    /// Admins cannot edit themselves here; their own account goes through
    /// [`UserDirectory::update_own_profile`].
    pub fn update_user(
        &self,
        actor: &SessionContext,
        user_id: &str,
        patch: UserUpdate,
    ) -> EngineResult<UserProfile> {
        actor.require_admin("update user")?;
        if actor.user_id == user_id {
            crate::security_log!(WARN, "self_edit_rejected", user_id = %actor.user_id);
            return Err(EngineError::SelfEditForbidden);
        }

        let mut users = self.store.users()?;
        let index = users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| EngineError::not_found(Entity::User, user_id))?;

        let mut user = users[index].clone();
        if let Some(email) = patch.email.as_deref() {
            let email = normalize_email(email)?;
            if users
                .iter()
                .any(|u| u.id != user_id && same_email(&u.email, &email))
            {
                return Err(EngineError::DuplicateEmail(email));
            }
            user.email = email;
        }
        if let Some(name) = patch.name.as_deref() {
            user.name = required_text(name, "name", MAX_NAME_LEN)?;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(password) = new_password(patch.password.as_deref())? {
            user.password = password;
        }

        users[index] = user.clone();
        self.store.save_users(&users)?;

        let resource = format!("user:{}", user.id);
        crate::audit_log!(actor.user_id.as_str(), "update_user", resource.as_str());
        Ok(UserProfile::from(&user))
    }

    /// Admin delete; nobody can delete their own account
    pub fn delete_user(&self, actor: &SessionContext, user_id: &str) -> EngineResult<UserProfile> {
        actor.require_admin("delete user")?;

        let mut users = self.store.users()?;
        let index = users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| EngineError::not_found(Entity::User, user_id))?;
        if user_id == actor.user_id {
            return Err(EngineError::SelfDeletionForbidden);
        }

        let removed = users.remove(index);
        self.store.save_users(&users)?;

        let resource = format!("user:{}", removed.id);
        crate::audit_log!(actor.user_id.as_str(), "delete_user", resource.as_str());
        Ok(UserProfile::from(&removed))
    }

    /// Profile page edit: name, password, picture. Email cannot change here.
    pub fn update_own_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> EngineResult<UserProfile> {
        let mut users = self.store.users()?;
        let index = users
            .iter()
            .position(|u| u.id == user_id)
            .ok_or_else(|| EngineError::not_found(Entity::User, user_id))?;

        let name = required_text(&update.name, "name", MAX_NAME_LEN)?;
        let password = new_password(update.password.as_deref())?;
        if let Some(password) = password.as_deref()
            && update.confirm_password.as_deref() != Some(password)
        {
            return Err(EngineError::invalid_field(
                "confirm_password",
                "passwords do not match",
            ));
        }

        let user = &mut users[index];
        if let Some(extension) = update.image_extension.as_deref() {
            user.image_ref = Some(user_image_ref(&name, extension));
        }
        user.name = name;
        if let Some(password) = password {
            user.password = password;
        }

        let profile = UserProfile::from(&*user);
        self.store.save_users(&users)?;

        tracing::info!(user_id = %profile.id, "Profile updated");
        Ok(profile)
    }
}
