use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::DragError;
use crate::geometry::{Direction, Point, Rect};
use crate::ghost::{RenderSlot, place_ghost};
use crate::registry::SpatialRegistry;
use crate::reorder::relocate;
use crate::resolve::resolve_target_index;

/// The in-flight drag: which record is moving, where it started and which gap
/// it would currently drop into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragSession {
    active_key: String,
    source_ix: usize,
    target_ix: Option<usize>,
}

impl DragSession {
    pub fn active_key(&self) -> &str {
        &self.active_key
    }

    /// Index of the active record when the drag began.
    pub fn source_ix(&self) -> usize {
        self.source_ix
    }

    pub fn target_ix(&self) -> Option<usize> {
        self.target_ix
    }
}

/// Returned by [`DragController::begin`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragStart {
    pub key: String,
    pub source_ix: usize,
}

impl DragStart {
    /// Measured rectangle of the active record, for sizing a drag preview.
    pub fn rect<R>(&self, registry: &R) -> Option<Rect>
    where
        R: SpatialRegistry + ?Sized,
    {
        registry.measure(&self.key)
    }

    /// Pointer offset inside the active record, for positioning a drag preview
    /// where the record was grabbed.
    pub fn anchor<R>(&self, registry: &R, pointer: Point) -> Option<Point>
    where
        R: SpatialRegistry + ?Sized,
    {
        Some(self.rect(registry)?.offset_of(pointer))
    }
}

/// Returned by a successful commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEnd {
    pub key: String,
    /// Index of the record before the move.
    pub from: usize,
    /// Index of the record after the move.
    pub to: usize,
}

/// Owns an ordered list and the single drag session that may reorder it.
///
/// Every operation runs to completion and leaves the controller either idle or
/// dragging; the list is only ever replaced wholesale on a successful commit.
pub struct DragController<T> {
    items: Vec<T>,
    key_of: Rc<dyn Fn(&T) -> &str>,
    direction: Direction,
    session: Option<DragSession>,
    on_change: Option<Rc<dyn Fn(&[T])>>,
}

impl<T: 'static> DragController<T> {
    pub fn new(items: impl Into<Vec<T>>, key_of: impl Fn(&T) -> &str + 'static) -> Self {
        Self {
            items: items.into(),
            key_of: Rc::new(key_of),
            direction: Direction::default(),
            session: None,
            on_change: None,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Provide a callback invoked with the new order after every successful
    /// commit. Cancelled or rejected drags never invoke it.
    pub fn on_change(mut self, on_change: impl Fn(&[T]) + 'static) -> Self {
        self.on_change = Some(Rc::new(on_change));
        self
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_on_change(&mut self, on_change: impl Fn(&[T]) + 'static) {
        self.on_change = Some(Rc::new(on_change));
    }

    /// Replace the list with `items`, discarding the current order.
    ///
    /// A drag in progress is kept; its record is looked up again on commit.
    pub fn set_items(&mut self, items: impl Into<Vec<T>>) {
        self.items = items.into();
        debug!(len = self.items.len(), "items reset");
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn key_of<'a>(&self, item: &'a T) -> &'a str {
        (self.key_of)(item)
    }

    /// Index of the first record whose key is `key`.
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.items.iter().position(|item| (self.key_of)(item) == key)
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Current index of the active record, re-derived from the list.
    pub fn active_ix(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        self.index_of(&session.active_key)
    }

    pub fn active_item(&self) -> Option<&T> {
        self.active_ix().and_then(|ix| self.items.get(ix))
    }

    pub fn target_ix(&self) -> Option<usize> {
        self.session.as_ref().and_then(|session| session.target_ix)
    }

    /// Render sequence for the current state, with the ghost placed.
    pub fn placement(&self) -> Vec<RenderSlot> {
        place_ghost(self.items.len(), self.active_ix(), self.target_ix())
    }

    /// Start dragging the record identified by `key`.
    pub fn begin(&mut self, key: &str) -> Result<DragStart, DragError> {
        if let Some(session) = self.session.as_ref() {
            debug!(key, active = %session.active_key, "drag start rejected: already dragging");
            return Err(DragError::AlreadyDragging {
                active: session.active_key.clone(),
            });
        }

        let Some(source_ix) = self.index_of(key) else {
            debug!(key, "drag start rejected: unknown key");
            return Err(DragError::UnknownKey(key.to_string()));
        };

        self.session = Some(DragSession {
            active_key: key.to_string(),
            source_ix,
            target_ix: None,
        });
        debug!(key, source_ix, "drag started");

        Ok(DragStart {
            key: key.to_string(),
            source_ix,
        })
    }

    /// Update the drop target from a pointer over the record identified by
    /// `hovered_key`.
    ///
    /// On any failure the previously resolved target is kept.
    pub fn hover<R>(
        &mut self,
        hovered_key: &str,
        pointer: Point,
        registry: &R,
    ) -> Result<usize, DragError>
    where
        R: SpatialRegistry + ?Sized,
    {
        if self.session.is_none() {
            return Err(DragError::NotDragging);
        }

        let Some(hovered_ix) = self.index_of(hovered_key) else {
            trace!(hovered_key, "hover ignored: unknown key");
            return Err(DragError::UnknownKey(hovered_key.to_string()));
        };

        let target_ix = registry
            .measure(hovered_key)
            .and_then(|rect| resolve_target_index(hovered_ix, rect, pointer, self.direction));
        let Some(target_ix) = target_ix else {
            trace!(hovered_key, "hover ignored: unmeasured");
            return Err(DragError::Unmeasured(hovered_key.to_string()));
        };

        let Some(session) = self.session.as_mut() else {
            return Err(DragError::NotDragging);
        };
        if session.target_ix != Some(target_ix) {
            trace!(hovered_key, hovered_ix, target_ix, "drop target changed");
        }
        session.target_ix = Some(target_ix);
        Ok(target_ix)
    }

    /// Finish the drag by moving the active record into the resolved gap.
    ///
    /// Fails, and cancels, when no target was resolved or the active record is
    /// no longer in the list. The controller is idle afterwards either way.
    pub fn commit(&mut self) -> Result<DragEnd, DragError> {
        let Some(session) = self.session.take() else {
            return Err(DragError::NotDragging);
        };

        let Some(from) = self.index_of(&session.active_key) else {
            debug!(key = %session.active_key, "drag cancelled: record no longer in list");
            return Err(DragError::StaleSession(session.active_key));
        };
        let Some(gap_ix) = session.target_ix else {
            debug!(key = %session.active_key, "drag cancelled: no drop target");
            return Err(DragError::NoTarget);
        };
        let Some(to) = relocate(&mut self.items, from, gap_ix) else {
            return Err(DragError::StaleSession(session.active_key));
        };

        debug!(key = %session.active_key, from, to, "drag committed");
        if let Some(on_change) = self.on_change.as_ref() {
            on_change(&self.items);
        }

        Ok(DragEnd {
            key: session.active_key,
            from,
            to,
        })
    }

    /// Abandon the drag without touching the list.
    pub fn cancel(&mut self) -> Result<(), DragError> {
        let Some(session) = self.session.take() else {
            return Err(DragError::NotDragging);
        };
        debug!(key = %session.active_key, "drag cancelled");
        Ok(())
    }

    /// Handle a drag-end event for the record identified by `key`.
    ///
    /// Commits when `key` belongs to the active drag; an end event for any other
    /// record is stale and cancels the drag instead.
    pub fn end(&mut self, key: &str) -> Result<DragEnd, DragError> {
        let Some(session) = self.session.as_ref() else {
            return Err(DragError::NotDragging);
        };
        if session.active_key != key {
            debug!(key, active = %session.active_key, "stale drag end");
            self.session = None;
            return Err(DragError::StaleSession(key.to_string()));
        }
        self.commit()
    }
}

impl<T> std::fmt::Debug for DragController<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DragController")
            .field("len", &self.items.len())
            .field("direction", &self.direction)
            .field("session", &self.session)
            .finish()
    }
}
