/// One entry of the render sequence produced by [`place_ghost`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderSlot {
    /// The live record at `ix`, with its presentation flags.
    Item { ix: usize, active: bool, target: bool },
    /// The placeholder previewing where the active record will land.
    Ghost,
}

impl RenderSlot {
    pub fn item(ix: usize) -> Self {
        RenderSlot::Item {
            ix,
            active: false,
            target: false,
        }
    }

    pub fn is_ghost(&self) -> bool {
        matches!(self, RenderSlot::Ghost)
    }
}

/// Interleave a ghost into the render sequence of `len` records.
///
/// - The active record stays in place and is flagged `active`.
/// - The record at the target gap is flagged `target`; a ghost is emitted
///   right before it when the drop would actually move the active record,
///   i.e. the gap lies before the active record or at least two past it.
///   Gap `active + 1` is the record's own successor and shows no ghost.
/// - Gap `len` (after the last record) emits a trailing ghost after the last
///   record, unless that record is the active one.
///
/// Without an active record no ghost is ever emitted.
pub fn place_ghost(len: usize, active_ix: Option<usize>, target_ix: Option<usize>) -> Vec<RenderSlot> {
    let mut slots = Vec::with_capacity(len + 1);
    for ix in 0..len {
        if Some(ix) == active_ix {
            slots.push(RenderSlot::Item {
                ix,
                active: true,
                target: false,
            });
            continue;
        }

        if Some(ix) == target_ix {
            let moves = active_ix.is_some_and(|active_ix| ix < active_ix || ix >= active_ix + 2);
            if moves {
                slots.push(RenderSlot::Ghost);
            }
            slots.push(RenderSlot::Item {
                ix,
                active: false,
                target: true,
            });
            continue;
        }

        slots.push(RenderSlot::item(ix));
        if ix + 1 == len && target_ix == Some(len) && active_ix.is_some() {
            slots.push(RenderSlot::Ghost);
        }
    }
    slots
}
