//! Products screen: the full product table with role-gated row actions.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use stockroom_core::{InventoryState, LOW_STOCK_THRESHOLD, Product};

use crate::action::{Action, Notification};
use crate::component::Component;
use crate::theme;
use crate::widgets::money_fmt;

/// What the toggle key does to `product` right now.
pub(crate) fn toggle_verb(product: &Product) -> &'static str {
    if product.is_disabled { "enable" } else { "disable" }
}

pub struct ProductsScreen {
    focused: bool,
    state: Arc<InventoryState>,
    table_state: TableState,
}

impl ProductsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            state: Arc::new(InventoryState::default()),
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected_product(&self) -> Option<&Product> {
        self.state
            .products
            .get_index(self.selected_index())
            .map(|(_, p)| p)
    }

    fn select(&mut self, idx: usize) {
        let len = self.state.products.len();
        let clamped = if len == 0 { 0 } else { idx.min(len - 1) };
        self.table_state.select(Some(clamped));
    }

    fn move_selection(&mut self, delta: isize) {
        let next = self.selected_index().saturating_add_signed(delta);
        self.select(next);
    }

    /// Row action for the selected product, or a warning when the current
    /// role or product state does not allow it.
    fn row_action(
        &self,
        allowed: impl Fn(&InventoryState, &Product) -> bool,
        make: impl Fn(&Product) -> Action,
        verb: impl Fn(&Product) -> &'static str,
    ) -> Option<Action> {
        let product = self.selected_product()?;
        if allowed(&self.state, product) {
            return Some(make(product));
        }
        let verb = verb(product);
        let reason = if self.state.is_admin() {
            format!("Cannot {verb} a disabled product")
        } else {
            format!("Read-only: switch to admin (r) to {verb}")
        };
        Some(Action::Notify(Notification::warning(reason)))
    }

    fn action_cell(enabled: bool, symbol: &'static str, color: Color) -> Span<'static> {
        if enabled {
            Span::styled(symbol, Style::default().fg(color))
        } else {
            Span::styled(symbol, Style::default().fg(theme::MUTED_GRAY))
        }
    }

    fn product_row(&self, product: &Product) -> Row<'static> {
        let state = &self.state;
        let dim = product.is_disabled && state.is_admin();

        let qty_color = if product.is_out_of_stock() {
            theme::ERROR_RED
        } else if product.quantity <= LOW_STOCK_THRESHOLD {
            theme::ELECTRIC_YELLOW
        } else {
            theme::DIM_WHITE
        };

        let actions = Line::from(vec![
            Self::action_cell(state.can_edit(product), "✎ ", theme::NEON_CYAN),
            Self::action_cell(
                state.can_toggle(product),
                if product.is_disabled { "◉ " } else { "⊘ " },
                theme::ELECTRIC_YELLOW,
            ),
            Self::action_cell(state.can_delete(product), "✕", theme::ERROR_RED),
        ]);

        let cells = vec![
            Cell::from(product.name.clone()).style(Style::default().fg(theme::NEON_CYAN)),
            Cell::from(product.category.clone()).style(theme::table_row()),
            Cell::from(money_fmt::fmt_money(product.price.amount())).style(theme::table_row()),
            Cell::from(product.quantity.to_string()).style(Style::default().fg(qty_color)),
            Cell::from(money_fmt::fmt_money(product.value()))
                .style(Style::default().fg(theme::ELECTRIC_PURPLE)),
            Cell::from(actions),
        ];

        let row = Row::new(cells);
        if dim {
            row.style(theme::table_row_disabled())
        } else {
            row
        }
    }
}

impl Default for ProductsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ProductsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') | KeyCode::Home => {
                self.select(0);
                None
            }
            KeyCode::Char('G') | KeyCode::End => {
                self.select(usize::MAX);
                None
            }
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(10);
                None
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.move_selection(-10);
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => self.row_action(
                InventoryState::can_edit,
                |p| Action::RequestEdit(p.id.clone()),
                |_| "edit",
            ),
            KeyCode::Char('d') => self.row_action(
                InventoryState::can_toggle,
                |p| Action::RequestToggleDisabled(p.id.clone()),
                toggle_verb,
            ),
            KeyCode::Char('x') | KeyCode::Delete => self.row_action(
                InventoryState::can_delete,
                |p| Action::RequestDelete(p.id.clone()),
                |_| "delete",
            ),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::StateUpdated(state) = action {
            self.state = Arc::clone(state);
            self.select(self.selected_index());
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(format!(" Products ({}) ", self.state.products.len()))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [table_area, hint_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        if self.state.products.is_empty() {
            let msg = if self.state.loading {
                "  Loading products..."
            } else {
                "  No products. Press R to reload."
            };
            frame.render_widget(
                Paragraph::new(Span::styled(msg, Style::default().fg(theme::DIM_WHITE))),
                table_area,
            );
        } else {
            let header = Row::new(["Name", "Category", "Price", "Qty", "Value", "Actions"])
                .style(theme::table_header());
            let rows: Vec<Row> = self
                .state
                .products
                .values()
                .map(|p| self.product_row(p))
                .collect();
            let widths = [
                Constraint::Fill(3),    // name
                Constraint::Fill(2),    // category
                Constraint::Length(12), // price
                Constraint::Length(6),  // quantity
                Constraint::Length(14), // value
                Constraint::Length(8),  // actions
            ];
            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(theme::table_selected())
                .highlight_symbol("▸ ");

            let mut state = self.table_state;
            frame.render_stateful_widget(table, table_area, &mut state);
        }

        let hints = if self.state.is_admin() {
            Line::from(vec![
                Span::styled("  j/k ", theme::key_hint_key()),
                Span::styled("navigate  ", theme::key_hint()),
                Span::styled("e ", theme::key_hint_key()),
                Span::styled("edit  ", theme::key_hint()),
                Span::styled("d ", theme::key_hint_key()),
                Span::styled("disable/enable  ", theme::key_hint()),
                Span::styled("x ", theme::key_hint_key()),
                Span::styled("delete", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled("  j/k ", theme::key_hint_key()),
                Span::styled("navigate  ", theme::key_hint()),
                Span::styled("read-only  ", theme::key_hint()),
                Span::styled("r ", theme::key_hint_key()),
                Span::styled("switch role", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), hint_area);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Products"
    }
}
