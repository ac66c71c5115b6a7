//! Property-based invariant tests for reordering, target resolution and ghost
//! placement.
//!
//! 1. `move_item` is a permutation of its input.
//! 2. The moved record lands at the gap index, shifted down by one when the gap
//!    lies past the record.
//! 3. Dropping into the gap before or after oneself keeps the order.
//! 4. The resolver splits a record into a leading and trailing half along the
//!    layout axis.
//! 5. The ghost never appears for the successor gap, and at most once otherwise.

use gpui_dnd_core::{Direction, Point, Rect, move_item, place_ghost, resolve_target_index};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// A list of distinct records together with a valid source index and gap.
fn list_with_move() -> impl Strategy<Value = (Vec<u32>, usize, usize)> {
    (2usize..=24).prop_flat_map(|len| {
        let items: Vec<u32> = (0..len as u32).map(|v| v * 7 + 1).collect();
        (Just(items), 0..len, 0..=len)
    })
}

fn sorted(mut values: Vec<u32>) -> Vec<u32> {
    values.sort_unstable();
    values
}

// ═════════════════════════════════════════════════════════════════════════
// 1-2. Move correctness
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn move_is_a_permutation((items, from, gap) in list_with_move()) {
        let moved = move_item(&items, from, gap);
        prop_assert_eq!(moved.len(), items.len());
        prop_assert_eq!(sorted(moved), sorted(items.clone()));
    }

    #[test]
    fn moved_record_lands_at_gap((items, from, gap) in list_with_move()) {
        let moved = move_item(&items, from, gap);
        let expected_ix = if gap > from { gap - 1 } else { gap };
        prop_assert_eq!(moved[expected_ix], items[from]);

        // Everything else keeps its relative order.
        let rest_before: Vec<u32> = items.iter().copied().filter(|v| *v != items[from]).collect();
        let rest_after: Vec<u32> = moved.iter().copied().filter(|v| *v != items[from]).collect();
        prop_assert_eq!(rest_before, rest_after);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Self-drop idempotence
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drop_around_self_keeps_order((items, from, _gap) in list_with_move()) {
        prop_assert_eq!(&move_item(&items, from, from), &items);
        prop_assert_eq!(&move_item(&items, from, from + 1), &items);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Resolver halves
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolver_splits_at_midpoint(
        hovered in 0usize..1000,
        top in -500.0f32..500.0,
        height in 1.0f32..200.0,
        ratio in 0.0f32..=1.0,
    ) {
        let rect = Rect::new(0., top, 300., height);
        let pointer = Point::new(150., top + ratio * height);
        let resolved = resolve_target_index(hovered, rect, pointer, Direction::Vertical);

        // Recompute the ratio the way the resolver sees it to stay exact at the
        // midpoint despite float rounding in `top + ratio * height`.
        let seen = ((pointer.y - top) / height).clamp(0., 1.);
        let expected = if seen < 0.5 { hovered } else { hovered + 1 };
        prop_assert_eq!(resolved, Some(expected));
    }

    #[test]
    fn resolver_is_idempotent(
        hovered in 0usize..100,
        x in -100.0f32..400.0,
        y in -100.0f32..400.0,
        horizontal in any::<bool>(),
    ) {
        let direction = if horizontal { Direction::Horizontal } else { Direction::Vertical };
        let rect = Rect::new(20., 40., 120., 30.);
        let first = resolve_target_index(hovered, rect, Point::new(x, y), direction);
        let second = resolve_target_index(hovered, rect, Point::new(x, y), direction);
        prop_assert_eq!(first, second);
        prop_assert!(matches!(first, Some(ix) if ix == hovered || ix == hovered + 1));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Ghost placement
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn ghost_suppressed_for_successor_gap(len in 2usize..40, active in 0usize..39) {
        prop_assume!(active < len);
        let slots = place_ghost(len, Some(active), Some(active + 1));
        prop_assert!(slots.iter().all(|slot| !slot.is_ghost()));
    }

    #[test]
    fn ghost_appears_at_most_once((items, active, target) in list_with_move()) {
        let len = items.len();
        let slots = place_ghost(len, Some(active), Some(target));
        let ghosts = slots.iter().filter(|slot| slot.is_ghost()).count();
        let moves = move_item(&items, active, target) != items;
        prop_assert_eq!(ghosts, usize::from(moves));
        prop_assert_eq!(slots.len(), len + ghosts);
    }
}
