//! Bordered statistic card: a caption over one large value.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::theme;

pub struct StatCard<'a> {
    title: &'a str,
    value: String,
    accent: Color,
}

impl<'a> StatCard<'a> {
    pub fn new(title: &'a str, value: impl Into<String>, accent: Color) -> Self {
        Self {
            title,
            value: value.into(),
            accent,
        }
    }
}

impl Widget for StatCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(Line::from(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(theme::DIM_WHITE),
            )))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.accent));

        let inner = block.inner(area);
        block.render(area, buf);

        // Vertically center the value inside the card
        let y_offset = inner.height.saturating_sub(1) / 2;
        let value_area = Rect {
            x: inner.x,
            y: inner.y + y_offset,
            width: inner.width,
            height: 1.min(inner.height),
        };

        Paragraph::new(Line::from(Span::styled(
            self.value,
            Style::default().fg(self.accent).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(value_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_title_and_value() {
        let area = Rect::new(0, 0, 24, 5);
        let mut buf = Buffer::empty(area);
        StatCard::new("Out of Stock", "1", theme::ERROR_RED).render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Out of Stock"));
        assert!(text.contains('1'));
    }
}
