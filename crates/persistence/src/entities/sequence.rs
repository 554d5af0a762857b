//! Sequence entity (database row mapping).

use sqlx::FromRow;

/// Database row mapping for the sequence_info table.
#[derive(Debug, Clone, FromRow)]
pub struct SequenceEntity {
    pub name: String,
    pub current_value: i32,
    pub step: i32,
    pub init_value: i32,
    pub max_value: i32,
}

impl SequenceEntity {
    /// Value after advancing by one step, wrapping at `max_value`.
    pub fn next_value(&self) -> i32 {
        domain::models::order::next_sequence_value(
            self.current_value,
            self.step,
            self.init_value,
            self.max_value,
        )
    }
}
