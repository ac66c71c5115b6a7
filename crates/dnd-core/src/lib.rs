//! Framework-free drag-to-reorder engine.
//!
//! The engine tracks a single drag session over an ordered list of records,
//! resolves pointer positions to insertion gaps, relocates the dragged record on
//! commit, and decides where a placeholder ("ghost") belongs in the rendered
//! sequence. Rendering is left to the caller.

mod controller;
mod error;
mod geometry;
mod ghost;
mod registry;
mod reorder;
mod resolve;

pub use controller::{DragController, DragEnd, DragSession, DragStart};
pub use error::DragError;
pub use geometry::{Direction, Point, Rect};
pub use ghost::{RenderSlot, place_ghost};
pub use registry::{RectRegistry, SpatialRegistry};
pub use reorder::{move_item, relocate, reorder_to_index};
pub use resolve::resolve_target_index;
