//! Model records and the per-user collection.

use serde::{Deserialize, Serialize};
use vault::Vault;

/// Head direction a face model was captured in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Front,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Front, Direction::Left, Direction::Right];

    /// The suffix embedded in group labels, e.g. `(Front)`.
    pub fn suffix(&self) -> &'static str {
        match self {
            Direction::Front => "Front",
            Direction::Left => "Left",
            Direction::Right => "Right",
        }
    }
}

/// One enrolled model: a vault plus its bookkeeping.
///
/// `point_count` and `degree` record the enrollment chunking so
/// verification derives its unlock parameters from the stored values
/// instead of guessing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Stable identifier, unique within one user's collection.
    pub id: u32,
    /// Human-readable label.
    pub label: String,
    /// Enrollment time, unix seconds.
    pub time: u64,
    /// Secret polynomial degree used at enrollment.
    pub degree: usize,
    /// Chunk count used at enrollment.
    pub point_count: usize,
    /// The locked vault.
    pub vault: Vault,
}

impl ModelRecord {
    /// Whether this record's label carries the given direction suffix.
    pub fn matches_direction(&self, direction: Direction) -> bool {
        self.label.contains(&format!("({})", direction.suffix()))
    }
}

/// A user's ordered collection of model records.
///
/// Ids are assigned from [`next_id`](Self::next_id) and stay stable across
/// removals; the collection may become empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelSet {
    records: Vec<ModelRecord>,
}

impl ModelSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next available id: one past the last record's, 0 when empty.
    pub fn next_id(&self) -> u32 {
        self.records.last().map(|r| r.id + 1).unwrap_or(0)
    }

    pub fn push(&mut self, record: ModelRecord) {
        self.records.push(record);
    }

    /// Remove the record with `id`. Returns false when no record matches.
    pub fn remove(&mut self, id: u32) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }

    pub fn get(&self, id: u32) -> Option<&ModelRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose label carries the given direction suffix.
    pub fn records_for_direction(
        &self,
        direction: Direction,
    ) -> impl Iterator<Item = &ModelRecord> {
        self.records
            .iter()
            .filter(move |r| r.matches_direction(direction))
    }
}

/// Compose a group label: `<base> #<group> (<direction>)`.
///
/// Commas are stripped from the base label so labels stay safe for
/// comma-separated listings.
pub fn group_label(base: &str, group: u32, direction: Direction) -> String {
    let base = base.replace(',', "");
    format!("{} #{} ({})", base, group, direction.suffix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vault::Vault;

    fn dummy_vault() -> Vault {
        Vault {
            points: Vec::new(),
            coeff_hash: [0; 32],
        }
    }

    fn record(id: u32, label: &str) -> ModelRecord {
        ModelRecord {
            id,
            label: label.to_string(),
            time: 1_700_000_000,
            degree: 8,
            point_count: 10,
            vault: dummy_vault(),
        }
    }

    #[test]
    fn test_next_id_starts_at_zero() {
        assert_eq!(ModelSet::new().next_id(), 0);
    }

    #[test]
    fn test_next_id_follows_last_record() {
        let mut set = ModelSet::new();
        set.push(record(0, "a"));
        set.push(record(1, "b"));
        assert_eq!(set.next_id(), 2);

        // Ids stay stable after removals in the middle.
        assert!(set.remove(0));
        assert_eq!(set.next_id(), 2);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut set = ModelSet::new();
        set.push(record(0, "a"));
        assert!(!set.remove(5));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_group_label_format() {
        assert_eq!(
            group_label("Composite Model", 2, Direction::Left),
            "Composite Model #2 (Left)"
        );
    }

    #[test]
    fn test_group_label_strips_commas() {
        assert_eq!(
            group_label("a,b,c", 0, Direction::Front),
            "abc #0 (Front)"
        );
    }

    #[test]
    fn test_direction_filter() {
        let mut set = ModelSet::new();
        set.push(record(0, "Composite Model #0 (Front)"));
        set.push(record(1, "Composite Model #0 (Left)"));
        set.push(record(2, "Composite Model #0 (Right)"));

        let fronts: Vec<u32> = set
            .records_for_direction(Direction::Front)
            .map(|r| r.id)
            .collect();
        assert_eq!(fronts, vec![0]);
    }

    #[test]
    fn test_set_serde_roundtrip() {
        let mut set = ModelSet::new();
        set.push(record(0, "a"));
        let json = serde_json::to_string(&set).unwrap();
        let restored: ModelSet = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, set);
    }
}
