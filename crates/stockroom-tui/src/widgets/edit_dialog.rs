//! Modal product editor.
//!
//! Holds one text input per editable field, pre-populated from the product
//! being edited. The dialog never touches the store itself: Enter emits
//! [`Action::SaveDraft`] and Esc emits [`Action::CancelEdit`]; validation
//! errors come back through [`EditDialog::set_errors`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tui_input::{Input, InputRequest};

use stockroom_core::{DraftErrors, DraftField, Product, ProductDraft, ProductId};

use crate::action::Action;
use crate::theme;

const LABEL_WIDTH: u16 = 12;

pub struct EditDialog {
    product_id: ProductId,
    product_name: String,
    inputs: Vec<(DraftField, Input)>,
    active: DraftField,
    errors: DraftErrors,
}

impl EditDialog {
    pub fn new(product: &Product) -> Self {
        let draft = ProductDraft::from_product(product);
        let inputs = DraftField::ALL
            .iter()
            .map(|&field| (field, Input::new(draft.field(field).to_owned())))
            .collect();
        Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            inputs,
            active: DraftField::Name,
            errors: DraftErrors::default(),
        }
    }

    /// Id of the product this dialog edits.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    #[cfg(test)]
    pub fn active_field(&self) -> DraftField {
        self.active
    }

    pub fn set_errors(&mut self, errors: DraftErrors) {
        self.errors = errors;
    }

    /// Current form contents.
    pub fn draft(&self) -> ProductDraft {
        let mut draft = ProductDraft::default();
        for (field, input) in &self.inputs {
            draft.set_field(*field, input.value());
        }
        draft
    }

    fn active_input_mut(&mut self) -> Option<&mut Input> {
        let active = self.active;
        self.inputs
            .iter_mut()
            .find(|(f, _)| *f == active)
            .map(|(_, i)| i)
    }

    fn edit(&mut self, request: InputRequest) {
        if let Some(input) = self.active_input_mut() {
            input.handle(request);
        }
    }

    /// Handle a key while the dialog is open. Captures all keys.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(Action::CancelEdit),
            KeyCode::Enter => return Some(Action::SaveDraft(self.draft())),
            KeyCode::Tab | KeyCode::Down => self.active = self.active.next(),
            KeyCode::BackTab | KeyCode::Up => self.active = self.active.prev(),
            KeyCode::Left => self.edit(InputRequest::GoToPrevChar),
            KeyCode::Right => self.edit(InputRequest::GoToNextChar),
            KeyCode::Home => self.edit(InputRequest::GoToStart),
            KeyCode::End => self.edit(InputRequest::GoToEnd),
            KeyCode::Backspace => self.edit(InputRequest::DeletePrevChar),
            KeyCode::Delete => self.edit(InputRequest::DeleteNextChar),
            KeyCode::Char('u') if ctrl => self.edit(InputRequest::DeleteLine),
            KeyCode::Char(c) if !ctrl => self.edit(InputRequest::InsertChar(c)),
            _ => {}
        }
        None
    }

    /// Render centered over `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let width = 56u16.min(area.width.saturating_sub(4));
        let height = 13u16.min(area.height.saturating_sub(2));
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.y + (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(x, y, width, height);

        frame.render_widget(Clear, dialog_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            dialog_area,
        );

        let block = Block::default()
            .title(format!(" Edit {} ", self.product_name))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused());
        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let rows = Layout::vertical([
            Constraint::Length(1), // spacer
            Constraint::Length(2), // name
            Constraint::Length(2), // category
            Constraint::Length(2), // price
            Constraint::Length(2), // quantity
            Constraint::Min(0),
            Constraint::Length(1), // hints
        ])
        .split(inner);

        for (slot, (field, input)) in self.inputs.iter().enumerate() {
            let Some(&row) = rows.get(slot + 1) else {
                continue;
            };
            self.render_field(frame, row, *field, input);
        }

        if let Some(&hint_row) = rows.last() {
            let hints = Line::from(vec![
                Span::styled("  Tab ", theme::key_hint_key()),
                Span::styled("next  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("save  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]);
            frame.render_widget(Paragraph::new(hints), hint_row);
        }
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: DraftField, input: &Input) {
        let active = field == self.active;
        let [line_area, error_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        let [label_area, value_area] =
            Layout::horizontal([Constraint::Length(LABEL_WIDTH), Constraint::Min(1)])
                .areas(line_area);

        let label_style = if active {
            theme::key_hint_key()
        } else {
            Style::default().fg(theme::DIM_WHITE)
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!("  {}", field.label()), label_style)),
            label_area,
        );

        let value_width = usize::from(value_area.width.saturating_sub(1));
        let scroll = input.visual_scroll(value_width);
        let value_style = if active {
            Style::default().fg(theme::NEON_CYAN).bg(theme::BG_HIGHLIGHT)
        } else {
            Style::default().fg(theme::DIM_WHITE)
        };
        let scroll_x = u16::try_from(scroll).unwrap_or(u16::MAX);
        frame.render_widget(
            Paragraph::new(input.value())
                .style(value_style)
                .scroll((0, scroll_x)),
            value_area,
        );

        if active {
            let cursor = input.visual_cursor().saturating_sub(scroll);
            let cursor_x = u16::try_from(cursor).unwrap_or(0);
            frame.set_cursor_position(Position::new(
                value_area.x + cursor_x.min(value_area.width.saturating_sub(1)),
                value_area.y,
            ));
        }

        if let Some(message) = self.errors.get(field) {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("{:width$}{message}", "", width = usize::from(LABEL_WIDTH)),
                    Style::default().fg(theme::ERROR_RED),
                )),
                error_area,
            );
        }
    }

    #[cfg(test)]
    pub fn value(&self, field: DraftField) -> &str {
        self.inputs
            .iter()
            .find(|(f, _)| *f == field)
            .map_or("", |(_, i)| i.value())
    }

    #[cfg(test)]
    pub fn errors(&self) -> &DraftErrors {
        &self.errors
    }
}
