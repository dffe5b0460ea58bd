//! Board use-case services.
//!
//! # Responsibility
//! - Orchestrate read → order → write sequences over the entity store.
//! - Keep presentation layers decoupled from storage and position math.
//!
//! # Invariants
//! - Multi-step mutations (create, remove, move, repair) run inside the
//!   store's atomic scope; single-row renames and content updates do not
//!   need one.
//! - Mutations addressed by id resolve the entity first and report
//!   [`MutationOutcome::NoOp`] when it is already gone.
//! - Column positions per board and card positions per column are dense
//!   `1..N` after every successful call on a serialized store.

use crate::model::board::BoardId;
use crate::model::column::ColumnId;
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board_service;
pub mod card_service;
pub mod column_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result of a mutation addressed by entity id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The entity existed and the change was written.
    Applied,
    /// The entity was already gone; nothing was written.
    NoOp,
}

impl From<bool> for MutationOutcome {
    fn from(changed: bool) -> Self {
        if changed {
            Self::Applied
        } else {
            Self::NoOp
        }
    }
}

impl MutationOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Errors from board, column and card service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Title is blank after trim.
    InvalidTitle,
    /// Parent board for a new column does not exist.
    BoardNotFound(BoardId),
    /// Parent or target column for a card does not exist.
    ColumnNotFound(ColumnId),
    /// Store-level failure.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTitle => write!(f, "title must not be blank"),
            Self::BoardNotFound(id) => write!(f, "board not found: {id}"),
            Self::ColumnNotFound(id) => write!(f, "column not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub(crate) fn normalize_title(value: String) -> ServiceResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::InvalidTitle);
    }
    Ok(trimmed.to_string())
}

pub(crate) fn normalize_description(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
