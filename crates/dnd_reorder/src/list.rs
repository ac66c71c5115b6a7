use std::rc::Rc;

use gpui::{
    AnyElement, App, AppContext as _, Bounds, Context, CursorStyle, DragMoveEvent, ElementId,
    Entity, EntityId, FocusHandle, InteractiveElement as _, IntoElement, ParentElement as _,
    Pixels, Render, RenderOnce, SharedString, Size, StatefulInteractiveElement as _,
    StyleRefinement, Styled, Window, div, prelude::FluentBuilder as _, px,
};
use gpui_component::{ActiveTheme as _, StyledExt as _, h_flex, v_flex};
use gpui_dnd_core::{Direction, DragController, DragStart, RectRegistry, RenderSlot, SpatialRegistry};
use tracing::{debug, trace};

const CONTEXT: &str = "DndReorder";

type RenderItemFn<T> = Rc<dyn Fn(DndReorderRow<'_, T>, &mut Window, &mut App) -> AnyElement>;
type RenderGhostFn<T> = Rc<dyn Fn(&T, &mut Window, &mut App) -> AnyElement>;

/// Create a [`DndReorder`].
pub fn dnd_reorder<T, R, E>(state: &Entity<DndReorderState<T>>, render_item: R) -> DndReorder<T>
where
    T: 'static,
    R: Fn(DndReorderRow<'_, T>, &mut Window, &mut App) -> E + 'static,
    E: IntoElement,
{
    DndReorder::new(state, render_item)
}

/// Presentation flags for one rendered record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DndReorderRowState {
    /// The record is the one being dragged. It stays in place while dragging.
    pub active: bool,
    /// The record sits at the gap the drag would currently drop into.
    pub target: bool,
}

/// Everything the item callback receives for one record.
pub struct DndReorderRow<'a, T> {
    pub item: &'a T,
    pub state: DndReorderRowState,
    controller: &'a DragController<T>,
}

impl<'a, T: 'static> DndReorderRow<'a, T> {
    pub fn key(&self) -> &'a str {
        self.controller.key_of(self.item)
    }

    /// The record's index in the current list, looked up when called.
    pub fn index(&self) -> Option<usize> {
        self.controller.index_of(self.key())
    }
}

#[derive(Clone)]
struct DndReorderDrag {
    list_id: EntityId,
    key: SharedString,
    label: SharedString,
}

/// Size and placement of the floating drag image.
///
/// gpui draws the drag view at `pointer - offset`, where `offset` is measured
/// from the element that started the drag (a handle strip or the record).
/// `shift` moves the image so it lines up with the whole record instead.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct PreviewLayout {
    size: Option<Size<Pixels>>,
    shift: gpui::Point<Pixels>,
}

fn preview_layout<R>(
    registry: &R,
    start: &DragStart,
    pointer: gpui::Point<Pixels>,
    offset: gpui::Point<Pixels>,
) -> PreviewLayout
where
    R: SpatialRegistry + ?Sized,
{
    let (Some(rect), Some(anchor)) = (start.rect(registry), start.anchor(registry, to_point(pointer)))
    else {
        return PreviewLayout::default();
    };

    PreviewLayout {
        size: Some(gpui::size(px(rect.width), px(rect.height))),
        shift: gpui::point(offset.x - px(anchor.x), offset.y - px(anchor.y)),
    }
}

struct DragPreview {
    label: SharedString,
    layout: PreviewLayout,
}

impl Render for DragPreview {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        div()
            .ml(self.layout.shift.x)
            .mt(self.layout.shift.y)
            .when_some(self.layout.size, |this, size| {
                this.w(size.width).h(size.height).overflow_hidden()
            })
            .flex()
            .items_center()
            .px(px(10.))
            .rounded(px(6.))
            .bg(theme.popover)
            .border_1()
            .border_color(theme.drag_border)
            .shadow_md()
            .opacity(0.9)
            .text_color(theme.popover_foreground)
            .text_sm()
            .child(self.label.clone())
    }
}

/// State for a list reorderable by dragging one record over another.
///
/// Records are laid out along the configured [`Direction`]. While a drag is in
/// flight, a ghost rendered by the ghost callback previews where the record will
/// land; dropping commits the move and calls `on_change` with the new order.
pub struct DndReorderState<T> {
    focus_handle: FocusHandle,
    controller: DragController<T>,
    bounds: RectRegistry,
    drag_handle_size: Option<Pixels>,
    drag_label: Option<Rc<dyn Fn(&T) -> SharedString>>,
    render_item: RenderItemFn<T>,
    render_ghost: Option<RenderGhostFn<T>>,
}

impl<T: 'static> DndReorderState<T> {
    /// `key_of` extracts each record's primary key; keys must be unique within
    /// the list and stable while it is displayed.
    pub fn new(key_of: impl Fn(&T) -> &str + 'static, cx: &mut App) -> Self {
        let controller = DragController::new(Vec::new(), key_of);
        Self {
            focus_handle: cx.focus_handle(),
            controller,
            bounds: RectRegistry::new(),
            drag_handle_size: None,
            drag_label: None,
            render_item: Rc::new(|_, _, _| div().into_any_element()),
            render_ghost: None,
        }
    }

    pub fn items(mut self, items: impl Into<Vec<T>>) -> Self {
        self.controller.set_items(items);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.controller.set_direction(direction);
        self
    }

    /// Provide a callback invoked with the new order after each committed drop.
    pub fn on_change(mut self, on_change: impl Fn(&[T]) + 'static) -> Self {
        self.controller.set_on_change(on_change);
        self
    }

    /// Text shown in the floating drag preview. Defaults to the record's key.
    pub fn drag_label(mut self, drag_label: impl Fn(&T) -> SharedString + 'static) -> Self {
        self.drag_label = Some(Rc::new(drag_label));
        self
    }

    /// Restrict drag start to a handle strip of the given size on the leading
    /// edge of each record (left for vertical lists, top for horizontal ones).
    pub fn drag_handle_size(mut self, size: Pixels) -> Self {
        self.drag_handle_size = Some(size);
        self
    }

    /// Allow dragging from anywhere on the record. This is the default.
    pub fn drag_on_item(mut self) -> Self {
        self.drag_handle_size = None;
        self
    }

    /// Replace the displayed records, discarding the current order.
    pub fn set_items(&mut self, items: impl Into<Vec<T>>, cx: &mut Context<Self>) {
        self.controller.set_items(items);
        cx.notify();
    }

    pub fn items_ref(&self) -> &[T] {
        self.controller.items()
    }

    pub fn controller(&self) -> &DragController<T> {
        &self.controller
    }

    fn label_for(&self, item: &T) -> SharedString {
        match &self.drag_label {
            Some(drag_label) => drag_label(item),
            None => SharedString::from(self.controller.key_of(item).to_string()),
        }
    }

    fn on_drag_start(
        &mut self,
        drag: &DndReorderDrag,
        offset: gpui::Point<Pixels>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> PreviewLayout {
        if drag.list_id != cx.entity_id() {
            return PreviewLayout::default();
        }

        match self.controller.begin(&drag.key) {
            Ok(start) => {
                let layout = preview_layout(&self.bounds, &start, window.mouse_position(), offset);
                trace!(
                    key = %start.key,
                    source_ix = start.source_ix,
                    measured = layout.size.is_some(),
                    "drag started"
                );
                cx.notify();
                layout
            }
            Err(err) => {
                debug!(%err, "drag start ignored");
                PreviewLayout::default()
            }
        }
    }

    fn on_drag_move_over_item(
        &mut self,
        key: &SharedString,
        event: &DragMoveEvent<DndReorderDrag>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if !cx.has_active_drag() {
            return;
        }

        let drag = event.drag(cx);
        if drag.list_id != cx.entity_id() {
            return;
        }

        // Every item sees every move; keep all measurements fresh but only
        // resolve against the item under the pointer.
        let item_bounds = event.bounds;
        self.bounds.register(key.to_string(), to_rect(item_bounds));

        let mouse_position = event.event.position;
        if !item_bounds.contains(&mouse_position) {
            return;
        }

        let previous = self.controller.target_ix();
        match self
            .controller
            .hover(key, to_point(mouse_position), &self.bounds)
        {
            Ok(target_ix) if previous != Some(target_ix) => cx.notify(),
            Ok(_) => {}
            Err(err) => trace!(%err, "hover ignored"),
        }
    }

    fn on_drop(&mut self, drag: &DndReorderDrag, _window: &mut Window, cx: &mut Context<Self>) {
        if drag.list_id != cx.entity_id() {
            return;
        }

        match self.controller.end(&drag.key) {
            Ok(end) => debug!(key = %end.key, from = end.from, to = end.to, "reordered"),
            Err(err) => debug!(%err, "drop ignored"),
        }
        cx.notify();
    }

    fn render_record(
        &self,
        ix: usize,
        row_state: DndReorderRowState,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Option<AnyElement> {
        let item = self.controller.items().get(ix)?;
        let key = SharedString::from(self.controller.key_of(item).to_string());
        let row = DndReorderRow {
            item,
            state: row_state,
            controller: &self.controller,
        };
        let content = (self.render_item)(row, window, cx);

        let drag_value = DndReorderDrag {
            list_id: cx.entity_id(),
            key: key.clone(),
            label: self.label_for(item),
        };
        let state_entity = cx.entity();
        let direction = self.controller.direction();

        let element = div()
            .id(ElementId::Name(key.clone()))
            .relative()
            .child(content)
            .on_drag_move::<DndReorderDrag>(cx.listener({
                let key = key.clone();
                move |this, event, window, cx| {
                    this.on_drag_move_over_item(&key, event, window, cx);
                }
            }))
            .on_drop::<DndReorderDrag>(cx.listener(Self::on_drop));

        let element = match self.drag_handle_size {
            Some(handle_size) => element.child(
                div()
                    .id(("dnd-reorder-handle", ix))
                    .absolute()
                    .top_0()
                    .left_0()
                    .map(|this| match direction {
                        Direction::Vertical => this.bottom_0().w(handle_size),
                        Direction::Horizontal => this.right_0().h(handle_size),
                    })
                    .cursor(CursorStyle::OpenHand)
                    .on_drag(drag_value, start_drag(state_entity)),
            ),
            None => element
                .cursor(CursorStyle::OpenHand)
                .on_drag(drag_value, start_drag(state_entity)),
        };

        Some(element.into_any_element())
    }

    fn render_ghost(&self, window: &mut Window, cx: &mut Context<Self>) -> Option<AnyElement> {
        let render_ghost = self.render_ghost.as_ref()?;
        let item = self.controller.active_item()?;
        let ghost = render_ghost(item, window, cx);

        // The ghost accepts drops but is never measured, so hovering it keeps
        // the current target.
        Some(
            div()
                .id("dnd-reorder-ghost")
                .child(ghost)
                .on_drop::<DndReorderDrag>(cx.listener(Self::on_drop))
                .into_any_element(),
        )
    }
}

fn start_drag<T: 'static>(
    state_entity: Entity<DndReorderState<T>>,
) -> impl Fn(&DndReorderDrag, gpui::Point<Pixels>, &mut Window, &mut App) -> Entity<DragPreview> + 'static
{
    move |drag: &DndReorderDrag, offset: gpui::Point<Pixels>, window: &mut Window, cx: &mut App| {
        let layout = state_entity.update(cx, |state, cx| {
            state.on_drag_start(drag, offset, window, cx)
        });
        let label = drag.label.clone();
        cx.new(|_| DragPreview { label, layout })
    }
}

fn to_point(point: gpui::Point<Pixels>) -> gpui_dnd_core::Point {
    gpui_dnd_core::Point::new(point.x.into(), point.y.into())
}

/// Record the laid-out bounds of each rendered record. `keys` runs parallel to
/// the container's children; `None` marks the ghost, which is never measured.
fn register_child_bounds(
    registry: &mut RectRegistry,
    keys: &[Option<SharedString>],
    bounds: &[Bounds<Pixels>],
) {
    for (key, bounds) in keys.iter().zip(bounds) {
        if let Some(key) = key {
            registry.register(key.to_string(), to_rect(*bounds));
        }
    }
}

fn to_rect(bounds: Bounds<Pixels>) -> gpui_dnd_core::Rect {
    gpui_dnd_core::Rect::new(
        bounds.origin.x.into(),
        bounds.origin.y.into(),
        bounds.size.width.into(),
        bounds.size.height.into(),
    )
}

impl<T: 'static> Render for DndReorderState<T> {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        // A drag released outside any drop target never reaches `on_drop`.
        if !cx.has_active_drag() && self.controller.cancel().is_ok() {
            trace!("drag released outside the list");
        }

        let controller = &self.controller;
        self.bounds.retain(|key| controller.index_of(key).is_some());

        let slots = self.controller.placement();
        let mut children = Vec::with_capacity(slots.len());
        let mut keys = Vec::with_capacity(slots.len());
        for slot in slots {
            let (key, child) = match slot {
                RenderSlot::Ghost => (None, self.render_ghost(window, cx)),
                RenderSlot::Item { ix, active, target } => (
                    self.controller
                        .items()
                        .get(ix)
                        .map(|item| SharedString::from(self.controller.key_of(item).to_string())),
                    self.render_record(ix, DndReorderRowState { active, target }, window, cx),
                ),
            };
            if let Some(child) = child {
                keys.push(key);
                children.push(child);
            }
        }

        let container = match self.controller.direction() {
            Direction::Vertical => v_flex(),
            Direction::Horizontal => h_flex(),
        };
        let state = cx.entity().downgrade();
        container
            // Measure every record after layout so a drag can anchor its
            // preview before the first move event arrives.
            .on_children_prepainted(move |bounds, _window, cx| {
                state
                    .update(cx, |this, _| register_child_bounds(&mut this.bounds, &keys, &bounds))
                    .ok();
            })
            .id("dnd-reorder-state")
            .relative()
            .children(children)
            .on_drop::<DndReorderDrag>(cx.listener(Self::on_drop))
    }
}

/// A list element whose records can be reordered by drag and drop.
#[derive(IntoElement)]
pub struct DndReorder<T: 'static> {
    id: ElementId,
    state: Entity<DndReorderState<T>>,
    style: StyleRefinement,
    render_item: RenderItemFn<T>,
    render_ghost: Option<RenderGhostFn<T>>,
}

impl<T: 'static> DndReorder<T> {
    pub fn new<R, E>(state: &Entity<DndReorderState<T>>, render_item: R) -> Self
    where
        R: Fn(DndReorderRow<'_, T>, &mut Window, &mut App) -> E + 'static,
        E: IntoElement,
    {
        Self {
            id: ElementId::Name(format!("dnd-reorder-{}", state.entity_id()).into()),
            state: state.clone(),
            style: StyleRefinement::default(),
            render_item: Rc::new(move |row, window, cx| {
                render_item(row, window, cx).into_any_element()
            }),
            render_ghost: None,
        }
    }

    /// Render the placeholder shown at the prospective drop position. It
    /// receives the record being dragged. Without it no placeholder is shown.
    pub fn ghost<G, E>(mut self, render_ghost: G) -> Self
    where
        G: Fn(&T, &mut Window, &mut App) -> E + 'static,
        E: IntoElement,
    {
        self.render_ghost = Some(Rc::new(
            move |item: &T, window: &mut Window, cx: &mut App| {
                render_ghost(item, window, cx).into_any_element()
            },
        ));
        self
    }
}

impl<T: 'static> Styled for DndReorder<T> {
    fn style(&mut self) -> &mut StyleRefinement {
        &mut self.style
    }
}

impl<T: 'static> RenderOnce for DndReorder<T> {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let focus_handle = self.state.read(cx).focus_handle.clone();
        self.state.update(cx, |state, _| {
            state.render_item = self.render_item;
            state.render_ghost = self.render_ghost;
        });

        div()
            .id(self.id)
            .key_context(CONTEXT)
            .track_focus(&focus_handle)
            .child(self.state)
            .refine_style(&self.style)
    }
}
