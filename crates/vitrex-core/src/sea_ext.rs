use sea_orm::{DbErr, SqlErr};

/// Helpers for classifying database errors.
pub trait DbErrExt {
    /// If this error is a unique-constraint violation, return the driver
    /// message (which names the violated constraint).
    fn unique_violation(&self) -> Option<String>;
}

impl DbErrExt for DbErr {
    fn unique_violation(&self) -> Option<String> {
        match self.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(message)) => Some(message),
            _ => None,
        }
    }
}
