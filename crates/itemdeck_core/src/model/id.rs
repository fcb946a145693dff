//! Record identifier generation.

use crate::model::record::RecordId;
use uuid::Uuid;

/// Length of every generated identifier.
pub const GENERATED_ID_LEN: usize = 32;

/// Generates a new opaque record id.
///
/// The id is the lowercase hex form of a random v4 UUID: fixed length,
/// alphanumeric, and collision-free for practical collection sizes.
pub fn generate_id() -> RecordId {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::{generate_id, GENERATED_ID_LEN};
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_fixed_length_alphanumeric() {
        let id = generate_id();
        assert_eq!(id.len(), GENERATED_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_ids_do_not_repeat() {
        let ids = (0..1_000).map(|_| generate_id()).collect::<HashSet<_>>();
        assert_eq!(ids.len(), 1_000);
    }
}
