//! Constructors taking anything string-like

use super::types::QualityError;

macro_rules! message_constructors {
    ($($name:ident => $variant:ident),* $(,)?) => {
        impl QualityError {
            $(
                pub fn $name<S: Into<String>>(message: S) -> Self {
                    Self::$variant(message.into())
                }
            )*
        }
    };
}

message_constructors! {
    auth => Auth,
    unauthorized => Unauthorized,
    forbidden => Forbidden,
    validation => Validation,
    bad_request => BadRequest,
    not_found => NotFound,
    conflict => Conflict,
    file_storage => FileStorage,
    server => Server,
    internal => Internal,
}

impl QualityError {
    /// Whether the database rejected a write on a unique index
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(err) => matches!(
                err.sql_err(),
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
            ),
            _ => false,
        }
    }
}
