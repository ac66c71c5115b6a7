use crate::geometry::{Direction, Point, Rect};

/// Resolve the insertion gap for a pointer over the record at `hovered_ix`.
///
/// The pointer's position along `direction` is normalized into `[0, 1]` across
/// the hovered rectangle; the leading half maps to `hovered_ix` (insert before)
/// and the trailing half, including the exact midpoint, maps to
/// `hovered_ix + 1` (insert after).
///
/// Returns `None` when the rectangle cannot be measured (zero or non-finite
/// extent) or the pointer coordinate is not finite.
pub fn resolve_target_index(
    hovered_ix: usize,
    rect: Rect,
    pointer: Point,
    direction: Direction,
) -> Option<usize> {
    if rect.is_degenerate() {
        return None;
    }

    let (origin, extent) = rect.span(direction);
    let coord = match direction {
        Direction::Vertical => pointer.y,
        Direction::Horizontal => pointer.x,
    };
    if !coord.is_finite() {
        return None;
    }

    let ratio = ((coord - origin) / extent).clamp(0., 1.);
    let shift = usize::from(ratio >= 0.5);
    Some(hovered_ix + shift)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: Rect = Rect::new(0., 100., 200., 20.);

    #[test]
    fn upper_half_inserts_before() {
        let ix = resolve_target_index(3, ROW, Point::new(50., 102.), Direction::Vertical);
        assert_eq!(ix, Some(3));
    }

    #[test]
    fn midpoint_rounds_half_up() {
        let ix = resolve_target_index(3, ROW, Point::new(50., 110.), Direction::Vertical);
        assert_eq!(ix, Some(4));
    }

    #[test]
    fn pointer_outside_rect_is_clamped() {
        assert_eq!(
            resolve_target_index(3, ROW, Point::new(0., 40.), Direction::Vertical),
            Some(3)
        );
        assert_eq!(
            resolve_target_index(3, ROW, Point::new(0., 400.), Direction::Vertical),
            Some(4)
        );
    }

    #[test]
    fn horizontal_uses_x_axis() {
        // y is in the trailing half, x in the leading half.
        let pointer = Point::new(20., 118.);
        assert_eq!(
            resolve_target_index(0, ROW, pointer, Direction::Horizontal),
            Some(0)
        );
        assert_eq!(
            resolve_target_index(0, ROW, pointer, Direction::Vertical),
            Some(1)
        );
    }

    #[test]
    fn degenerate_rect_fails() {
        let flat = Rect::new(0., 100., 200., 0.);
        assert_eq!(
            resolve_target_index(1, flat, Point::new(0., 100.), Direction::Vertical),
            None
        );
        assert_eq!(
            resolve_target_index(1, ROW, Point::new(0., f32::NAN), Direction::Vertical),
            None
        );
    }
}
