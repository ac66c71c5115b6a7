mod list;

pub use gpui_dnd_core::{Direction, DragController, DragEnd, DragError};
pub use list::{DndReorder, DndReorderRow, DndReorderRowState, DndReorderState, dnd_reorder};
