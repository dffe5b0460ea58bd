//! Board/column/card domain model.
//!
//! # Responsibility
//! - Define canonical records used by ordering, repository and service code.
//! - Keep one shape per entity type, independent from storage backends.
//!
//! # Invariants
//! - Every entity is identified by a stable UUID that is never reused.
//! - Column and card `position` values are dense `1..N` within their parent
//!   after every completed service operation.

pub mod board;
pub mod card;
pub mod column;

/// 1-based ordering slot of a column within a board or a card within a column.
pub type Position = i64;
