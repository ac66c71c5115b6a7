/// Final index of a record moved from `from_ix` into the gap `gap_ix`.
///
/// Gaps are numbered against the list *before* the move: gap `0` is before the
/// first record, gap `len` is after the last one. Once the record is lifted out
/// of the list every gap past it shifts down by one, so a gap after the source
/// lands one index earlier.
pub fn reorder_to_index(from_ix: usize, gap_ix: usize, item_count: usize) -> usize {
    let mut to_ix = gap_ix.min(item_count);
    if to_ix > from_ix {
        to_ix -= 1;
    }
    to_ix.min(item_count.saturating_sub(1))
}

/// Move the record at `from_ix` into gap `gap_ix`, in place.
///
/// Returns the record's final index, or `None` when `from_ix` is out of range
/// (the list is left untouched). Gaps past the end are clamped to `len`.
pub fn relocate<T>(items: &mut Vec<T>, from_ix: usize, gap_ix: usize) -> Option<usize> {
    if from_ix >= items.len() {
        return None;
    }

    let to_ix = reorder_to_index(from_ix, gap_ix, items.len());
    if to_ix != from_ix {
        let item = items.remove(from_ix);
        items.insert(to_ix, item);
    }
    Some(to_ix)
}

/// Return a copy of `items` with the record at `from_ix` moved into gap
/// `gap_ix`. `items` itself is never modified.
///
/// Dropping a record into the gap directly before or directly after itself
/// (`gap_ix == from_ix` or `gap_ix == from_ix + 1`) yields the original order.
pub fn move_item<T: Clone>(items: &[T], from_ix: usize, gap_ix: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    relocate(&mut moved, from_ix, gap_ix);
    moved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reorder_moves_item_down() {
        let items = ["A", "B", "C", "D"];
        assert_eq!(move_item(&items, 1, 4), ["A", "C", "D", "B"]);
        assert_eq!(move_item(&items, 0, 3), ["B", "C", "A", "D"]);
    }

    #[test]
    fn reorder_moves_item_up() {
        let items = ["A", "B", "C", "D"];
        assert_eq!(move_item(&items, 3, 1), ["A", "D", "B", "C"]);
        assert_eq!(move_item(&items, 2, 0), ["C", "A", "B", "D"]);
    }

    #[test]
    fn reorder_noop_when_dropped_around_self() {
        let items = ["A", "B", "C"];
        for from_ix in 0..items.len() {
            for gap_ix in [from_ix, from_ix + 1] {
                assert_eq!(move_item(&items, from_ix, gap_ix), items);
            }
        }
    }

    #[test]
    fn move_item_leaves_input_untouched() {
        let items = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let moved = move_item(&items, 0, 3);
        assert_eq!(items, ["A", "B", "C"]);
        assert_eq!(moved, ["B", "C", "A"]);
    }

    #[test]
    fn relocate_rejects_out_of_range_source() {
        let mut items = vec![1, 2, 3];
        assert_eq!(relocate(&mut items, 3, 0), None);
        assert_eq!(items, [1, 2, 3]);
    }

    #[test]
    fn relocate_clamps_gap_past_end() {
        let mut items = vec![1, 2, 3];
        assert_eq!(relocate(&mut items, 0, 99), Some(2));
        assert_eq!(items, [2, 3, 1]);
    }

    #[test]
    fn reorder_to_index_on_empty_list_is_zero() {
        assert_eq!(reorder_to_index(0, 0, 0), 0);
    }
}
