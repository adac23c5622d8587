use contracts::system::users::UserId;
use thiserror::Error;

use crate::shared::export::ExportError;

/// Ошибки операций со списком пользователей
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UsersError {
    #[error("User name must not be empty")]
    EmptyName,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("User not found: {0}")]
    NotFound(UserId),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),
}
