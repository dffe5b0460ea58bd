//! Dense sibling ordering engine.
//!
//! # Responsibility
//! - Compute position assignments for append, remove and move operations.
//! - Stay pure: callers load sibling snapshots and persist the returned
//!   updates themselves.
//!
//! # Invariants
//! - Results always describe a dense `1..N` sequence for the affected parent.
//! - Equal input positions keep their input order (stable sort).
//! - Target positions are clamped into `[1, remaining + 1]`.
//! - Only siblings whose position actually changes are reported.

use crate::model::Position;
use uuid::Uuid;

/// Entity that occupies one ordering slot under a parent.
pub trait Sibling {
    /// Stable entity id.
    fn id(&self) -> Uuid;
    /// Current 1-based position under the parent.
    fn position(&self) -> Position;
}

/// One position write produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionUpdate {
    pub id: Uuid,
    pub position: Position,
}

/// Write plan for relocating one entity to a different parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrossParentMove {
    /// Renumbering of the siblings left behind in the source parent.
    pub source_updates: Vec<PositionUpdate>,
    /// Renumbering of the pre-existing target siblings, moved entity excluded.
    pub target_updates: Vec<PositionUpdate>,
    /// Position the moved entity takes in the target parent. Always written
    /// together with the new parent reference.
    pub moved_position: Position,
}

/// Returns the append slot: `max(position) + 1`, or `1` for an empty parent.
pub fn next_position<S: Sibling>(siblings: &[S]) -> Position {
    siblings
        .iter()
        .fold(0, |max, sibling| max.max(sibling.position()))
        + 1
}

/// Renumbers the siblings remaining after `removed_id` leaves the parent.
///
/// `removed_id` may or may not still be present in `siblings`; either way it
/// is excluded. Running this on an already dense list yields no updates.
pub fn compact<S: Sibling>(siblings: &[S], removed_id: Uuid) -> Vec<PositionUpdate> {
    let order: Vec<_> = sorted_slots(siblings)
        .into_iter()
        .filter(|(id, _)| *id != removed_id)
        .collect();
    renumber(&order)
}

/// Renumbers every sibling into dense order without removing anything.
pub fn normalize<S: Sibling>(siblings: &[S]) -> Vec<PositionUpdate> {
    renumber(&sorted_slots(siblings))
}

/// Moves `moved_id` to `target_position` among its own siblings.
///
/// Returns `None` when `moved_id` is not one of `siblings`.
pub fn move_within<S: Sibling>(
    siblings: &[S],
    moved_id: Uuid,
    target_position: Position,
) -> Option<Vec<PositionUpdate>> {
    let mut order = sorted_slots(siblings);
    let current_index = order.iter().position(|(id, _)| *id == moved_id)?;
    let moved = order.remove(current_index);

    let target_index = clamp_target_index(target_position, order.len());
    order.insert(target_index, moved);
    Some(renumber(&order))
}

/// Moves `moved_id` out of `source` and into `target` at `target_position`.
///
/// `source` may include the moved entity; `target` must not contain it but a
/// stale copy is ignored if it does.
pub fn move_across<S: Sibling>(
    source: &[S],
    target: &[S],
    moved_id: Uuid,
    target_position: Position,
) -> CrossParentMove {
    let source_updates = compact(source, moved_id);

    let mut order: Vec<_> = sorted_slots(target)
        .into_iter()
        .filter(|(id, _)| *id != moved_id)
        .map(|(id, position)| (id, Some(position)))
        .collect();
    let target_index = clamp_target_index(target_position, order.len());
    order.insert(target_index, (moved_id, None));

    let target_updates = order
        .iter()
        .enumerate()
        .filter_map(|(index, (id, current))| {
            let position = index as Position + 1;
            match current {
                Some(current) if *current != position => Some(PositionUpdate { id: *id, position }),
                _ => None,
            }
        })
        .collect();

    CrossParentMove {
        source_updates,
        target_updates,
        moved_position: target_index as Position + 1,
    }
}

/// Maps a 1-based target onto a splice index for `remaining` siblings.
pub fn clamp_target_index(target_position: Position, remaining: usize) -> usize {
    let upper = remaining as Position + 1;
    (target_position.clamp(1, upper) - 1) as usize
}

fn sorted_slots<S: Sibling>(siblings: &[S]) -> Vec<(Uuid, Position)> {
    let mut slots: Vec<_> = siblings
        .iter()
        .map(|sibling| (sibling.id(), sibling.position()))
        .collect();
    slots.sort_by_key(|(_, position)| *position);
    slots
}

fn renumber(order: &[(Uuid, Position)]) -> Vec<PositionUpdate> {
    order
        .iter()
        .enumerate()
        .filter_map(|(index, (id, current))| {
            let position = index as Position + 1;
            (*current != position).then_some(PositionUpdate { id: *id, position })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{
        clamp_target_index, compact, move_across, move_within, next_position, normalize,
        PositionUpdate, Sibling,
    };
    use crate::model::Position;
    use std::collections::HashMap;
    use uuid::Uuid;

    #[derive(Debug, Clone)]
    struct Slot {
        id: Uuid,
        position: Position,
    }

    impl Sibling for Slot {
        fn id(&self) -> Uuid {
            self.id
        }

        fn position(&self) -> Position {
            self.position
        }
    }

    fn slots(positions: &[Position]) -> Vec<Slot> {
        positions
            .iter()
            .map(|position| Slot {
                id: Uuid::new_v4(),
                position: *position,
            })
            .collect()
    }

    fn apply(siblings: &mut [Slot], updates: &[PositionUpdate]) {
        let by_id: HashMap<_, _> = updates.iter().map(|u| (u.id, u.position)).collect();
        for sibling in siblings.iter_mut() {
            if let Some(position) = by_id.get(&sibling.id) {
                sibling.position = *position;
            }
        }
    }

    fn order_of(siblings: &[Slot]) -> Vec<Uuid> {
        let mut sorted = siblings.to_vec();
        sorted.sort_by_key(|s| s.position);
        sorted.into_iter().map(|s| s.id).collect()
    }

    #[test]
    fn next_position_starts_at_one() {
        assert_eq!(next_position::<Slot>(&[]), 1);
    }

    #[test]
    fn next_position_uses_max_not_len() {
        assert_eq!(next_position(&slots(&[1, 7, 3])), 8);
    }

    #[test]
    fn compact_closes_gap_and_keeps_order() {
        let mut siblings = slots(&[1, 2, 3, 4]);
        let removed = siblings[1].id;
        let updates = compact(&siblings, removed);

        assert_eq!(
            updates,
            vec![
                PositionUpdate {
                    id: siblings[2].id,
                    position: 2
                },
                PositionUpdate {
                    id: siblings[3].id,
                    position: 3
                },
            ]
        );

        siblings.retain(|s| s.id != removed);
        apply(&mut siblings, &updates);
        assert!(compact(&siblings, Uuid::nil()).is_empty());
    }

    #[test]
    fn compact_breaks_ties_by_input_order() {
        let siblings = slots(&[2, 2, 5]);
        let updates = compact(&siblings, Uuid::nil());
        assert_eq!(
            updates,
            vec![
                PositionUpdate {
                    id: siblings[0].id,
                    position: 1
                },
                PositionUpdate {
                    id: siblings[2].id,
                    position: 3
                },
            ]
        );
    }

    #[test]
    fn move_within_last_to_first_rewrites_every_slot() {
        let mut siblings = slots(&[1, 2, 3]);
        let ids: Vec<_> = siblings.iter().map(|s| s.id).collect();

        let updates = move_within(&siblings, ids[2], 1).unwrap();
        assert_eq!(updates.len(), 3);

        apply(&mut siblings, &updates);
        assert_eq!(order_of(&siblings), vec![ids[2], ids[0], ids[1]]);
    }

    #[test]
    fn move_within_only_touches_shifted_range() {
        let siblings = slots(&[1, 2, 3, 4, 5]);
        let updates = move_within(&siblings, siblings[1].id, 3).unwrap();
        let touched: Vec<_> = updates.iter().map(|u| u.id).collect();
        assert_eq!(touched, vec![siblings[2].id, siblings[1].id]);
    }

    #[test]
    fn move_within_same_slot_is_empty() {
        let siblings = slots(&[1, 2, 3]);
        assert!(move_within(&siblings, siblings[1].id, 2).unwrap().is_empty());
    }

    #[test]
    fn move_within_clamps_out_of_range_targets() {
        let mut siblings = slots(&[1, 2, 3]);
        let ids: Vec<_> = siblings.iter().map(|s| s.id).collect();

        let updates = move_within(&siblings, ids[0], 99).unwrap();
        apply(&mut siblings, &updates);
        assert_eq!(order_of(&siblings), vec![ids[1], ids[2], ids[0]]);

        let updates = move_within(&siblings, ids[0], -4).unwrap();
        apply(&mut siblings, &updates);
        assert_eq!(order_of(&siblings), vec![ids[0], ids[1], ids[2]]);
    }

    #[test]
    fn move_within_unknown_id_returns_none() {
        let siblings = slots(&[1, 2]);
        assert!(move_within(&siblings, Uuid::new_v4(), 1).is_none());
    }

    #[test]
    fn move_across_compacts_source_and_splices_target() {
        let source = slots(&[1, 2, 3]);
        let target = slots(&[1, 2]);
        let moved = source[0].id;

        let plan = move_across(&source, &target, moved, 2);

        assert_eq!(plan.moved_position, 2);
        assert_eq!(
            plan.source_updates,
            vec![
                PositionUpdate {
                    id: source[1].id,
                    position: 1
                },
                PositionUpdate {
                    id: source[2].id,
                    position: 2
                },
            ]
        );
        assert_eq!(
            plan.target_updates,
            vec![PositionUpdate {
                id: target[1].id,
                position: 3
            }]
        );
    }

    #[test]
    fn move_across_into_empty_parent_lands_first() {
        let source = slots(&[1]);
        let plan = move_across::<Slot>(&source, &[], source[0].id, 10);
        assert_eq!(plan.moved_position, 1);
        assert!(plan.source_updates.is_empty());
        assert!(plan.target_updates.is_empty());
    }

    #[test]
    fn normalize_repairs_duplicates_and_gaps() {
        let mut siblings = slots(&[3, 3, 9, 0]);
        let updates = normalize(&siblings);
        apply(&mut siblings, &updates);
        let mut positions: Vec<_> = siblings.iter().map(|s| s.position).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn clamp_target_index_bounds() {
        assert_eq!(clamp_target_index(0, 3), 0);
        assert_eq!(clamp_target_index(1, 3), 0);
        assert_eq!(clamp_target_index(4, 3), 3);
        assert_eq!(clamp_target_index(5, 3), 3);
        assert_eq!(clamp_target_index(i64::MAX, 0), 0);
    }
}
