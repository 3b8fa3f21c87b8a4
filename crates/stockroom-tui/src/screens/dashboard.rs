//! Dashboard screen: inventory statistics, the home screen.
//!
//! Layout:
//! ┌ Total Products ┐┌ Store Value ┐┌ Out of Stock ┐┌ Categories ┐
//! └────────────────┘└─────────────┘└──────────────┘└────────────┘
//! ┌─ Low Stock ───────────────┐  ┌─ Catalog ──────────────────┐
//! │ active products ≤ 10 units │  │ source, data age, status   │
//! │                            │  └────────────────────────────┘
//! │                            │  ┌─ Categories ───────────────┐
//! └────────────────────────────┘  └────────────────────────────┘

use std::sync::Arc;

use color_eyre::eyre::Result;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table};
use throbber_widgets_tui::{Throbber, ThrobberState};

use stockroom_core::{InventoryState, LOW_STOCK_THRESHOLD};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::money_fmt;
use crate::widgets::stat_card::StatCard;

pub struct DashboardScreen {
    focused: bool,
    /// Human-readable catalog location shown in the Catalog panel.
    source: String,
    state: Arc<InventoryState>,
    throbber_state: ThrobberState,
}

impl DashboardScreen {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            focused: false,
            source: source.into(),
            state: Arc::new(InventoryState::default()),
            throbber_state: ThrobberState::default(),
        }
    }

    fn panel(&self, title: &str) -> Block<'static> {
        Block::default()
            .title(format!(" {title} "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            })
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect) {
        let stats = self.state.stats();
        let cols = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

        let value = if area.width < 80 {
            money_fmt::fmt_money_short(stats.total_value)
        } else {
            money_fmt::fmt_money(stats.total_value)
        };
        let out_accent = if stats.out_of_stock > 0 {
            theme::ERROR_RED
        } else {
            theme::SUCCESS_GREEN
        };

        let cards = [
            StatCard::new(
                "Total Products",
                stats.total_products.to_string(),
                theme::NEON_CYAN,
            ),
            StatCard::new("Store Value", value, theme::ELECTRIC_PURPLE),
            StatCard::new("Out of Stock", stats.out_of_stock.to_string(), out_accent),
            StatCard::new("Categories", stats.categories.to_string(), theme::CORAL),
        ];
        for (card, col) in cards.into_iter().zip(cols.iter()) {
            frame.render_widget(card, *col);
        }
    }

    fn render_low_stock(&self, frame: &mut Frame, area: Rect) {
        let block = self.panel(&format!("Low Stock (≤ {LOW_STOCK_THRESHOLD})"));

        let mut low = self.state.low_stock_products();
        low.sort_by_key(|p| p.quantity);

        if low.is_empty() {
            let msg = if self.state.products.is_empty() {
                "No products loaded"
            } else {
                "All products are well stocked"
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("  {msg}"),
                    Style::default().fg(theme::DIM_WHITE),
                ))
                .block(block),
                area,
            );
            return;
        }

        let header = Row::new(["Name", "Category", "Qty"]).style(theme::table_header());
        let rows: Vec<Row> = low
            .iter()
            .map(|p| {
                let (qty, color) = if p.is_out_of_stock() {
                    ("out".to_owned(), theme::ERROR_RED)
                } else {
                    (p.quantity.to_string(), theme::ELECTRIC_YELLOW)
                };
                Row::new([
                    Cell::from(p.name.clone()).style(Style::default().fg(theme::NEON_CYAN)),
                    Cell::from(p.category.clone()).style(theme::table_row()),
                    Cell::from(qty).style(Style::default().fg(color)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Fill(3), Constraint::Fill(2), Constraint::Length(5)],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, area);
    }

    fn render_catalog(&self, frame: &mut Frame, area: Rect) {
        let block = self.panel("Catalog");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

        let label = |text: &'static str| Span::styled(text, Style::default().fg(theme::DIM_WHITE));

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                label("  Source   "),
                Span::styled(self.source.as_str(), Style::default().fg(theme::CORAL)),
            ])),
            rows[0],
        );

        let age = money_fmt::fmt_age(self.state.last_loaded, chrono::Utc::now());
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                label("  Loaded   "),
                Span::styled(age, Style::default().fg(theme::NEON_CYAN)),
            ])),
            rows[1],
        );

        if self.state.loading {
            let throbber = Throbber::default()
                .label("  Loading products...")
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, rows[2], &mut self.throbber_state.clone());
        } else if let Some(ref error) = self.state.error {
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    label("  Status   "),
                    Span::styled(error.as_str(), Style::default().fg(theme::ERROR_RED)),
                ])),
                rows[2],
            );
        } else {
            let active = self.state.active_products().count();
            frame.render_widget(
                Paragraph::new(Line::from(vec![
                    label("  Status   "),
                    Span::styled(
                        format!("{active} active"),
                        Style::default().fg(theme::SUCCESS_GREEN),
                    ),
                ])),
                rows[2],
            );
        }
    }

    fn render_categories(&self, frame: &mut Frame, area: Rect) {
        let block = self.panel("Categories");
        let header = Row::new(["Category", "Items", "Value"]).style(theme::table_header());
        let rows: Vec<Row> = self
            .state
            .category_summaries()
            .into_iter()
            .map(|c| {
                Row::new([
                    Cell::from(c.name).style(Style::default().fg(theme::NEON_CYAN)),
                    Cell::from(c.active_products.to_string()).style(theme::table_row()),
                    Cell::from(money_fmt::fmt_money(c.value))
                        .style(Style::default().fg(theme::ELECTRIC_PURPLE)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [Constraint::Fill(2), Constraint::Length(6), Constraint::Fill(2)],
        )
        .header(header)
        .block(block);
        frame.render_widget(table, area);
    }
}

impl Component for DashboardScreen {
    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::StateUpdated(state) => self.state = Arc::clone(state),
            Action::Tick if self.state.loading => self.throbber_state.calc_next(),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let [cards, body] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(area);
        self.render_cards(frame, cards);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                .areas(body);
        self.render_low_stock(frame, left);

        let [catalog, categories] =
            Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(right);
        self.render_catalog(frame, catalog);
        self.render_categories(frame, categories);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn id(&self) -> &str {
        "Dashboard"
    }
}
