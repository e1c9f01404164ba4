//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Every record shown in a table (catalog items, customers, users, tax rates)
/// is an entity: edits replace the record that carries the same id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Next identifier for a new record: one past the largest id in use.
///
/// Returns `first` when the collection is empty.
pub fn next_id<'a, E, F>(records: impl IntoIterator<Item = &'a E>, first: E::Id, succ: F) -> E::Id
where
    E: Entity + 'a,
    F: Fn(E::Id) -> E::Id,
{
    records
        .into_iter()
        .map(Entity::id)
        .max()
        .map(succ)
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row(u32);

    impl Entity for Row {
        type Id = u32;

        fn id(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn next_id_is_one_past_the_max() {
        let rows = vec![Row(3), Row(7), Row(5)];
        assert_eq!(next_id(&rows, 1, |id| id + 1), 8);
    }

    #[test]
    fn next_id_of_empty_collection_is_first() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(next_id(&rows, 1, |id| id + 1), 1);
    }
}
