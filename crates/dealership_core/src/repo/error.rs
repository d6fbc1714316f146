//! Repository error type and failure taxonomy.

use crate::db::DbError;
use crate::model::validation::ValidationError;
use crate::model::EntityKind;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for store access and repository operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    NotFound {
        entity: EntityKind,
        id: i64,
    },
    /// A unique column would hold a duplicate value.
    UniquenessViolation {
        entity: EntityKind,
        field: &'static str,
    },
    /// A write references a parent record that does not exist.
    MissingReference {
        entity: EntityKind,
        id: i64,
    },
    /// A delete is blocked because dependent records still point at the row.
    StillReferenced {
        entity: EntityKind,
        id: i64,
        dependent: EntityKind,
    },
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

/// Tagged failure categories handed to the routing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UniquenessViolation,
    ReferentialViolation,
    Validation,
    Storage,
}

impl RepoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UniquenessViolation { .. } => ErrorKind::UniquenessViolation,
            Self::MissingReference { .. } | Self::StillReferenced { .. } => {
                ErrorKind::ReferentialViolation
            }
            Self::Db(_)
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => ErrorKind::Storage,
        }
    }

    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Db(_) => "db_error",
            Self::NotFound { .. } => "not_found",
            Self::UniquenessViolation { .. } => "uniqueness_violation",
            Self::MissingReference { .. } => "missing_reference",
            Self::StillReferenced { .. } => "still_referenced",
            Self::InvalidData(_) => "invalid_data",
            Self::UninitializedConnection { .. } => "uninitialized_connection",
            Self::MissingRequiredTable(_) => "missing_required_table",
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UniquenessViolation { entity, field } => {
                write!(f, "{entity} with the same `{field}` already exists")
            }
            Self::MissingReference { entity, id } => {
                write!(f, "referenced {entity} does not exist: {id}")
            }
            Self::StillReferenced {
                entity,
                id,
                dependent,
            } => write!(f, "{entity} {id} is still referenced by a {dependent}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, RepoError};
    use crate::model::validation::ValidationError;
    use crate::model::EntityKind;

    #[test]
    fn referential_variants_share_one_kind() {
        let missing = RepoError::MissingReference {
            entity: EntityKind::Dealer,
            id: 9,
        };
        let blocked = RepoError::StillReferenced {
            entity: EntityKind::Car,
            id: 1,
            dependent: EntityKind::Sale,
        };
        assert_eq!(missing.kind(), ErrorKind::ReferentialViolation);
        assert_eq!(blocked.kind(), ErrorKind::ReferentialViolation);
    }

    #[test]
    fn display_names_entity_and_id() {
        let err = RepoError::NotFound {
            entity: EntityKind::Car,
            id: 4,
        };
        assert_eq!(err.to_string(), "car not found: 4");

        let err = RepoError::from(ValidationError::BlankField("vin"));
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("vin"));
    }
}
