use gpui::prelude::FluentBuilder as _;
use gpui::*;
use gpui_component::ActiveTheme as _;
use gpui_component::button::{Button, ButtonVariants as _};
use gpui_component::{h_flex, v_flex};
use gpui_dnd_reorder::{Direction, DndReorderRow, DndReorderState, dnd_reorder};
use tracing::info;

use crate::users::{Column, ColumnKind, User, cell_text, demo_columns};

/// Header cells reorder horizontally, user rows reorder vertically; every row
/// lays its cells out in the header's current order.
pub struct TableExample {
    header: Entity<DndReorderState<Column>>,
    rows: Entity<DndReorderState<User>>,
    users: Vec<User>,
    _subscriptions: Vec<Subscription>,
}

impl TableExample {
    pub fn view(users: Vec<User>, _window: &mut Window, cx: &mut App) -> Entity<Self> {
        cx.new(|cx| {
            let header = cx.new(|cx| {
                DndReorderState::new(|column: &Column| column.key, cx)
                    .items(demo_columns())
                    .direction(Direction::Horizontal)
                    .drag_label(|column| column.title.into())
                    .on_change(|columns| {
                        let order: Vec<_> = columns.iter().map(|column| column.title).collect();
                        info!(?order, "columns reordered");
                    })
            });
            let rows = cx.new(|cx| {
                DndReorderState::new(|user: &User| user.key(), cx)
                    .items(users.clone())
                    .direction(Direction::Vertical)
                    .drag_label(|user| user.name.clone().into())
                    .on_change(|users| {
                        let order: Vec<_> = users.iter().map(|user| user.id).collect();
                        info!(?order, "rows reordered");
                    })
            });

            let _subscriptions = vec![
                cx.observe(&header, |_, _, cx| cx.notify()),
                cx.observe(&rows, |_, _, cx| cx.notify()),
            ];

            Self {
                header,
                rows,
                users,
                _subscriptions,
            }
        })
    }

    fn reset(&mut self, cx: &mut Context<Self>) {
        let users = self.users.clone();
        self.rows.update(cx, |rows, cx| rows.set_items(users, cx));
        self.header
            .update(cx, |header, cx| header.set_items(demo_columns(), cx));
    }
}

impl Render for TableExample {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let column_order = self
            .header
            .read(cx)
            .items_ref()
            .iter()
            .map(|column| column.title)
            .collect::<Vec<_>>()
            .join(" | ");
        let dump = self
            .rows
            .read(cx)
            .items_ref()
            .iter()
            .enumerate()
            .map(|(ix, user)| format!("{ix:02}  #{}  {}", user.id, user.name))
            .collect::<Vec<_>>();

        let header = self.header.clone();
        let header_for_ghost = self.header.clone();

        v_flex()
            .size_full()
            .p(px(16.))
            .gap_y_3()
            .child(
                h_flex()
                    .gap_x_3()
                    .items_center()
                    .child(
                        div()
                            .text_xl()
                            .font_weight(FontWeight::BOLD)
                            .child("DnD Reorder"),
                    )
                    .child(
                        Button::new("reset")
                            .ghost()
                            .label("Reset")
                            .on_click(cx.listener(|this, _, _window, cx| this.reset(cx))),
                    ),
            )
            .child(
                div()
                    .text_sm()
                    .text_color(theme.muted_foreground)
                    .child("Drag a header cell sideways or a row up and down. The outlined placeholder marks where it will land."),
            )
            .child(
                v_flex()
                    .rounded(px(12.))
                    .border_1()
                    .border_color(theme.border)
                    .bg(theme.background)
                    .overflow_hidden()
                    .child(
                        div()
                            .border_b_1()
                            .border_color(theme.border)
                            .bg(theme.muted)
                            .child(
                                dnd_reorder(&self.header, |row, _window, cx| header_cell(row, cx))
                                    .ghost(|column: &Column, _window, cx| {
                                        ghost_cell(column.width, column.title, cx)
                                    }),
                            ),
                    )
                    .child(
                        dnd_reorder(&self.rows, move |row, _window, cx| {
                            let columns = header.read(cx).items_ref().to_vec();
                            user_row(row, &columns, cx)
                        })
                        .ghost(move |user: &User, _window, cx| {
                            let columns = header_for_ghost.read(cx).items_ref().to_vec();
                            ghost_row(user, &columns, cx)
                        }),
                    ),
            )
            .child(
                v_flex()
                    .flex_1()
                    .min_h(px(0.))
                    .gap_y_1()
                    .child(
                        div()
                            .text_sm()
                            .font_weight(FontWeight::MEDIUM)
                            .child(format!("Columns: {column_order}")),
                    )
                    .children(
                        dump.into_iter()
                            .map(|line| div().text_sm().text_color(theme.muted_foreground).child(line)),
                    ),
            )
    }
}

fn header_cell(row: DndReorderRow<'_, Column>, cx: &App) -> Div {
    let theme = cx.theme();
    let column = row.item;
    div()
        .w(px(column.width))
        .px(px(8.))
        .py(px(6.))
        .text_sm()
        .font_weight(FontWeight::SEMIBOLD)
        .when(row.state.active, |this| this.opacity(0.4))
        .when(row.state.target, |this| this.bg(theme.drop_target))
        .child(column.title)
}

fn ghost_cell(width: f32, title: &'static str, cx: &App) -> Div {
    let theme = cx.theme();
    div()
        .w(px(width))
        .px(px(8.))
        .py(px(6.))
        .text_sm()
        .border_1()
        .border_color(theme.drag_border)
        .text_color(theme.muted_foreground)
        .child(title)
}

fn user_row(row: DndReorderRow<'_, User>, columns: &[Column], cx: &App) -> Div {
    let theme = cx.theme();
    let user = row.item;
    let striped = row.index().is_some_and(|ix| ix % 2 == 1);

    h_flex()
        .border_b_1()
        .border_color(theme.border)
        .when(striped, |this| this.bg(theme.muted))
        .when(row.state.target, |this| this.bg(theme.drop_target))
        .when(row.state.active, |this| this.opacity(0.4))
        .children(columns.iter().map(|column| user_cell(user, column, cx)))
}

fn ghost_row(user: &User, columns: &[Column], cx: &App) -> Div {
    let theme = cx.theme();
    h_flex()
        .border_1()
        .border_color(theme.drag_border)
        .text_color(theme.muted_foreground)
        .children(columns.iter().map(|column| user_cell(user, column, cx)))
}

fn user_cell(user: &User, column: &Column, cx: &App) -> AnyElement {
    let theme = cx.theme();
    let cell = div()
        .w(px(column.width))
        .px(px(8.))
        .py(px(6.))
        .text_sm()
        .overflow_hidden();

    match column.kind {
        ColumnKind::Custom => cell
            .child(
                div()
                    .px(px(6.))
                    .rounded(px(6.))
                    .bg(theme.muted)
                    .text_color(theme.muted_foreground)
                    .child("custom"),
            )
            .into_any_element(),
        kind => cell.child(cell_text(user, kind)).into_any_element(),
    }
}
