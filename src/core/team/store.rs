use std::collections::HashMap;

use super::member::{MemberId, MemberRecord};

/// Member records for one session, in roster order.
///
/// Built once from the roster payload and read-only afterwards. Every record
/// keeps its roster position; lookups by id resolve to the last record that
/// carried that id.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    members: Vec<MemberRecord>,
    by_id: HashMap<MemberId, usize>,
}

impl ProfileStore {
    pub fn from_members(members: Vec<MemberRecord>) -> Self {
        let by_id = members
            .iter()
            .enumerate()
            .map(|(idx, m)| (m.id, idx))
            .collect();
        Self { members, by_id }
    }

    /// Look up a member. Unknown ids are `None`, never an error.
    pub fn get(&self, id: MemberId) -> Option<&MemberRecord> {
        self.by_id.get(&id).map(|&idx| &self.members[idx])
    }

    /// Records in the order the team endpoint returned them.
    pub fn roster(&self) -> &[MemberRecord] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::team::member::fixtures::{bare_member, member};

    #[test]
    fn test_lookup_hit_and_miss() {
        let store = ProfileStore::from_members(vec![
            member(1, "Noel", "Hart"),
            member(2, "Kyle", "Ng"),
        ]);
        assert_eq!(store.get(MemberId(2)).unwrap().first_name, "Kyle");
        assert!(store.get(MemberId(42)).is_none());
    }

    #[test]
    fn test_roster_order_is_preserved() {
        let store = ProfileStore::from_members(vec![
            bare_member(5, "Steve", "Lyn"),
            bare_member(1, "Noel", "Hart"),
            bare_member(3, "Riese", "Moss"),
        ]);
        let ids: Vec<u64> = store.roster().iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![5, 1, 3]);
    }

    #[test]
    fn test_duplicate_ids_keep_cards_and_resolve_to_last() {
        let store = ProfileStore::from_members(vec![
            bare_member(1, "First", "Copy"),
            bare_member(1, "Second", "Copy"),
        ]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(MemberId(1)).unwrap().first_name, "Second");
    }

    #[test]
    fn test_empty_store() {
        let store = ProfileStore::default();
        assert!(store.is_empty());
        assert!(store.get(MemberId(1)).is_none());
    }
}
