// ABOUTME: Structured error types for persistence operations
// ABOUTME: Converts backend failures into internal AppErrors without leaking them to callers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Handfit Contributors

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Failures raised by a measurement store backend
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Could not open or reach the database
    #[error("Database connection failed: {context}")]
    ConnectionError {
        /// What was being attempted
        context: String,
    },

    /// A statement failed to execute
    #[error("Database query failed: {context}")]
    QueryError {
        /// Failing operation and backend message
        context: String,
    },

    /// A stored row could not be turned back into a domain value
    #[error("Failed to decode stored {entity}: {reason}")]
    DecodeError {
        /// Kind of record being decoded
        entity: &'static str,
        /// Why decoding failed
        reason: String,
    },

    /// Schema bootstrap failed
    #[error("Database migration failed: {context}")]
    MigrationError {
        /// Failing migration step
        context: String,
    },
}

impl DatabaseError {
    /// Build a query error from an operation name and any displayable cause
    #[must_use]
    pub fn query(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::QueryError {
            context: format!("{operation}: {cause}"),
        }
    }

    /// Build a decode error for the given entity
    #[must_use]
    pub fn decode(entity: &'static str, reason: impl Into<String>) -> Self {
        Self::DecodeError {
            entity,
            reason: reason.into(),
        }
    }
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError {
                    context: error.to_string(),
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => Self::DecodeError {
                entity: "row",
                reason: error.to_string(),
            },
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}

impl From<DatabaseError> for AppError {
    fn from(error: DatabaseError) -> Self {
        let code = match &error {
            DatabaseError::DecodeError { .. } => ErrorCode::SerializationError,
            _ => ErrorCode::DatabaseError,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_maps_to_serialization_code() {
        let error: AppError = DatabaseError::decode("measurement", "bad timestamp").into();
        assert_eq!(error.code, ErrorCode::SerializationError);
        assert!(error.is_internal());
    }

    #[test]
    fn test_query_error_maps_to_database_code() {
        let error: AppError = DatabaseError::query("insert measurement", "disk I/O error").into();
        assert_eq!(error.code, ErrorCode::DatabaseError);
        assert!(error.message.contains("insert measurement"));
    }
}
