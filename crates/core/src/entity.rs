//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Insert `record` at the head of a most-recent-first list.
pub fn prepend<E: Entity>(records: &mut Vec<E>, record: E) {
    records.insert(0, record);
}

/// Remove every record whose id matches. Returns how many were removed.
pub fn remove_by_id<E: Entity>(records: &mut Vec<E>, id: &E::Id) -> usize {
    let before = records.len();
    records.retain(|r| r.id() != id);
    before - records.len()
}
