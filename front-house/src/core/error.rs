//! Engine errors
//!
//! Every catalog / user / order operation returns [`EngineResult`]. Expected
//! rejections are modelled as variants carrying the offending field or id;
//! callers that need a stable wire shape convert into [`AppError`].

use crate::store::StorageError;
use shared::error::{AppError, ErrorCode};
use shared::models::OrderStatus;
use std::fmt;
use thiserror::Error;

/// Entity a lookup failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Table,
    Dish,
    User,
    Order,
}

impl Entity {
    fn as_str(&self) -> &'static str {
        match self {
            Entity::Table => "table",
            Entity::Dish => "dish",
            Entity::User => "user",
            Entity::Order => "order",
        }
    }

    fn not_found_code(&self) -> ErrorCode {
        match self {
            Entity::Table => ErrorCode::TableNotFound,
            Entity::Dish => ErrorCode::DishNotFound,
            Entity::User => ErrorCode::UserNotFound,
            Entity::Order => ErrorCode::OrderNotFound,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine errors
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Dish name already exists: {0}")]
    DuplicateName(String),

    #[error("Table number already exists: {0}")]
    DuplicateNumber(u32),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(f64),

    #[error("Invalid table number: {0}")]
    InvalidNumber(i64),

    #[error("Invalid party size: {0}")]
    InvalidPartySize(i64),

    #[error("Invalid quantity {quantity}, must be between 1 and {max}")]
    InvalidQuantity { quantity: i64, max: u32 },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{entity} not found: {id}")]
    NotFound { entity: Entity, id: String },

    #[error("No dish selected")]
    EmptySelection,

    #[error("Cart is empty")]
    EmptyCart,

    #[error("No active session")]
    NoActiveSession,

    #[error("Table is already occupied: {0}")]
    AlreadyOccupied(String),

    #[error("Table is not occupied: {0}")]
    TableNotOccupied(String),

    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Users cannot delete their own account")]
    SelfDeletionForbidden,

    #[error("Own account is edited through the profile, not user management")]
    SelfEditForbidden,

    #[error("Dish category is required")]
    MissingCategory,

    #[error("Invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Inspectable error kind, one per [`EngineError`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DuplicateName,
    DuplicateNumber,
    DuplicateEmail,
    InvalidPrice,
    InvalidNumber,
    InvalidPartySize,
    InvalidQuantity,
    InvalidCredentials,
    NotFound,
    EmptySelection,
    EmptyCart,
    NoActiveSession,
    AlreadyOccupied,
    TableNotOccupied,
    InvalidTransition,
    Forbidden,
    SelfDeletionForbidden,
    SelfEditForbidden,
    MissingCategory,
    InvalidField,
    Storage,
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn not_found(entity: Entity, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::DuplicateName(_) => ErrorKind::DuplicateName,
            EngineError::DuplicateNumber(_) => ErrorKind::DuplicateNumber,
            EngineError::DuplicateEmail(_) => ErrorKind::DuplicateEmail,
            EngineError::InvalidPrice(_) => ErrorKind::InvalidPrice,
            EngineError::InvalidNumber(_) => ErrorKind::InvalidNumber,
            EngineError::InvalidPartySize(_) => ErrorKind::InvalidPartySize,
            EngineError::InvalidQuantity { .. } => ErrorKind::InvalidQuantity,
            EngineError::InvalidCredentials => ErrorKind::InvalidCredentials,
            EngineError::NotFound { .. } => ErrorKind::NotFound,
            EngineError::EmptySelection => ErrorKind::EmptySelection,
            EngineError::EmptyCart => ErrorKind::EmptyCart,
            EngineError::NoActiveSession => ErrorKind::NoActiveSession,
            EngineError::AlreadyOccupied(_) => ErrorKind::AlreadyOccupied,
            EngineError::TableNotOccupied(_) => ErrorKind::TableNotOccupied,
            EngineError::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            EngineError::Forbidden(_) => ErrorKind::Forbidden,
            EngineError::SelfDeletionForbidden => ErrorKind::SelfDeletionForbidden,
            EngineError::SelfEditForbidden => ErrorKind::SelfEditForbidden,
            EngineError::MissingCategory => ErrorKind::MissingCategory,
            EngineError::InvalidField { .. } => ErrorKind::InvalidField,
            EngineError::Storage(_) => ErrorKind::Storage,
        }
    }
}

/// 存储错误 → 错误码（损坏数据与 I/O 故障区分开）
fn classify_storage_error(e: &StorageError) -> ErrorCode {
    match e {
        StorageError::Serialization(_) => ErrorCode::StorageCorrupted,
        _ => ErrorCode::DatabaseError,
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        let message = err.to_string();
        match err {
            EngineError::DuplicateName(name) => {
                AppError::with_message(ErrorCode::DishNameExists, message)
                    .with_detail("field", "name")
                    .with_detail("name", name)
            }
            EngineError::DuplicateNumber(number) => {
                AppError::with_message(ErrorCode::TableNumberExists, message)
                    .with_detail("field", "number")
                    .with_detail("number", number)
            }
            EngineError::DuplicateEmail(email) => {
                AppError::with_message(ErrorCode::UserEmailExists, message)
                    .with_detail("field", "email")
                    .with_detail("email", email)
            }
            EngineError::InvalidPrice(_) => {
                AppError::with_message(ErrorCode::DishInvalidPrice, message)
                    .with_detail("field", "price")
            }
            EngineError::InvalidNumber(number) => {
                AppError::with_message(ErrorCode::TableInvalidNumber, message)
                    .with_detail("field", "number")
                    .with_detail("value", number)
            }
            EngineError::InvalidPartySize(people) => {
                AppError::with_message(ErrorCode::InvalidPartySize, message)
                    .with_detail("field", "people")
                    .with_detail("value", people)
            }
            EngineError::InvalidQuantity { quantity, max } => {
                AppError::with_message(ErrorCode::InvalidQuantity, message)
                    .with_detail("field", "quantity")
                    .with_detail("value", quantity)
                    .with_detail("max", max)
            }
            EngineError::InvalidCredentials => AppError::new(ErrorCode::InvalidCredentials),
            EngineError::NotFound { entity, id } => {
                AppError::with_message(entity.not_found_code(), message)
                    .with_detail(format!("{}_id", entity), id)
            }
            EngineError::EmptySelection => {
                AppError::with_message(ErrorCode::EmptySelection, message)
                    .with_detail("field", "dish_id")
            }
            EngineError::EmptyCart => AppError::with_message(ErrorCode::OrderEmpty, message),
            EngineError::NoActiveSession => {
                AppError::with_message(ErrorCode::NotAuthenticated, message)
            }
            EngineError::AlreadyOccupied(table_id) => {
                AppError::with_message(ErrorCode::TableOccupied, message)
                    .with_detail("table_id", table_id)
            }
            EngineError::TableNotOccupied(table_id) => {
                AppError::with_message(ErrorCode::TableNotOccupied, message)
                    .with_detail("table_id", table_id)
            }
            EngineError::InvalidTransition { order_id, from, to } => {
                AppError::with_message(ErrorCode::OrderInvalidTransition, message)
                    .with_detail("order_id", order_id)
                    .with_detail("from", from.as_str())
                    .with_detail("to", to.as_str())
            }
            EngineError::Forbidden(_) => AppError::with_message(ErrorCode::PermissionDenied, message),
            EngineError::SelfDeletionForbidden => {
                AppError::with_message(ErrorCode::UserCannotDeleteSelf, message)
            }
            EngineError::SelfEditForbidden => {
                AppError::with_message(ErrorCode::UserCannotEditSelf, message)
            }
            EngineError::MissingCategory => {
                AppError::with_message(ErrorCode::DishCategoryRequired, message)
                    .with_detail("field", "category")
            }
            EngineError::InvalidField { field, .. } => {
                AppError::with_message(ErrorCode::ValidationFailed, message)
                    .with_detail("field", field)
            }
            EngineError::Storage(e) => {
                let code = classify_storage_error(&e);
                tracing::error!(error = %e, error_code = %code, "Storage error occurred");
                AppError::with_message(code, message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(EngineError::EmptyCart.kind(), ErrorKind::EmptyCart);
        assert_eq!(
            EngineError::not_found(Entity::Table, "t9").kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            EngineError::invalid_field("name", "must not be empty").kind(),
            ErrorKind::InvalidField
        );
    }

    #[test]
    fn test_not_found_maps_to_entity_code() {
        let err: AppError = EngineError::not_found(Entity::Table, "t9").into();
        assert_eq!(err.code, ErrorCode::TableNotFound);
        assert_eq!(err.detail("table_id"), Some(&serde_json::json!("t9")));

        let err: AppError = EngineError::not_found(Entity::Order, "o1").into();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.detail("order_id"), Some(&serde_json::json!("o1")));
    }

    #[test]
    fn test_field_details() {
        let err: AppError = EngineError::InvalidPrice(-1.0).into();
        assert_eq!(err.code, ErrorCode::DishInvalidPrice);
        assert_eq!(err.detail("field"), Some(&serde_json::json!("price")));

        let err: AppError = EngineError::InvalidQuantity {
            quantity: 120,
            max: 99,
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);
        assert_eq!(err.detail("max"), Some(&serde_json::json!(99)));
    }

    #[test]
    fn test_transition_details() {
        let err: AppError = EngineError::InvalidTransition {
            order_id: "o1".to_string(),
            from: OrderStatus::Completed,
            to: OrderStatus::Preparing,
        }
        .into();
        assert_eq!(err.code, ErrorCode::OrderInvalidTransition);
        assert_eq!(err.detail("from"), Some(&serde_json::json!("completed")));
        assert_eq!(err.detail("to"), Some(&serde_json::json!("preparing")));
    }

    #[test]
    fn test_self_protection_codes() {
        let err: AppError = EngineError::SelfEditForbidden.into();
        assert_eq!(err.code, ErrorCode::UserCannotEditSelf);
        let err: AppError = EngineError::SelfDeletionForbidden.into();
        assert_eq!(err.code, ErrorCode::UserCannotDeleteSelf);
    }

    #[test]
    fn test_message_is_kept() {
        let err: AppError = EngineError::DuplicateEmail("a@b.com".to_string()).into();
        assert_eq!(err.message, "Email already registered: a@b.com");
    }
}
