use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::status::QuestionStatus;
use crate::ui::theme::Theme;

const CELL_WIDTH: u16 = 5;
const LEGEND: [QuestionStatus; 4] = [
    QuestionStatus::Current,
    QuestionStatus::Answered,
    QuestionStatus::Visited,
    QuestionStatus::Upcoming,
];

/// Numbered cell per question, colored by status, with a legend underneath.
pub struct QuestionGrid<'a> {
    pub statuses: &'a [QuestionStatus],
    pub theme: &'a Theme,
}

impl<'a> QuestionGrid<'a> {
    pub fn new(statuses: &'a [QuestionStatus], theme: &'a Theme) -> Self {
        Self { statuses, theme }
    }

    pub fn columns(inner_width: u16) -> u16 {
        (inner_width / CELL_WIDTH).max(1)
    }

    /// Rows needed to show `len` cells inside a block of `outer_width`.
    pub fn rows_for(len: usize, outer_width: u16) -> u16 {
        let cols = Self::columns(outer_width.saturating_sub(2)) as usize;
        len.div_ceil(cols) as u16
    }

    fn cell_style(&self, status: QuestionStatus) -> Style {
        let colors = &self.theme.colors;
        let bg = colors.status_bg(status);
        let fg = match status {
            QuestionStatus::Current => colors.accent(),
            QuestionStatus::Visited => colors.bg(),
            QuestionStatus::Answered | QuestionStatus::Upcoming => colors.fg(),
        };
        let style = Style::default().fg(fg).bg(bg);
        if status == QuestionStatus::Current {
            style.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            style
        }
    }
}

impl Widget for QuestionGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Questions ")
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < CELL_WIDTH || inner.height == 0 {
            return;
        }

        let cols = Self::columns(inner.width);
        let grid_rows = (self.statuses.len() as u16).div_ceil(cols);
        let legend_rows = 2u16;
        let visible_rows = inner.height.saturating_sub(legend_rows).max(1).min(grid_rows);

        for (i, status) in self.statuses.iter().enumerate() {
            let row = i as u16 / cols;
            if row >= visible_rows {
                break;
            }
            let col = i as u16 % cols;
            let x = inner.x + col * CELL_WIDTH;
            let y = inner.y + row;
            let label = format!(" {:>2} ", i + 1);
            buf.set_string(x, y, &label, self.cell_style(*status));
        }

        let legend_y = inner.y + visible_rows + 1;
        if legend_y >= inner.y + inner.height {
            return;
        }
        let mut spans: Vec<Span> = Vec::new();
        for status in LEGEND {
            let swatch = match status {
                QuestionStatus::Upcoming => Style::default().fg(colors.border()).bg(colors.status_bg(status)),
                _ => Style::default().fg(Color::Reset).bg(colors.status_bg(status)),
            };
            spans.push(Span::styled("  ", swatch));
            spans.push(Span::styled(
                format!(" {} ", status.label()),
                Style::default().fg(colors.text_muted()),
            ));
        }
        let legend_area = Rect::new(inner.x, legend_y, inner.width, inner.height - (legend_y - inner.y));
        Paragraph::new(Line::from(spans))
            .wrap(Wrap { trim: true })
            .render(legend_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_cover_every_question() {
        // 30 wide, 28 inner, 5 columns
        assert_eq!(QuestionGrid::rows_for(12, 30), 3);
        assert_eq!(QuestionGrid::rows_for(10, 30), 2);
        assert_eq!(QuestionGrid::rows_for(3, 4), 3);
    }

    #[test]
    fn renders_numbers_and_legend() {
        let theme = Theme::default();
        let statuses = [
            QuestionStatus::Answered,
            QuestionStatus::Current,
            QuestionStatus::Upcoming,
        ];
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        QuestionGrid::new(&statuses, &theme).render(area, &mut buf);

        let row: String = (0..30u16).map(|x| buf[(x, 1u16)].symbol().to_string()).collect();
        assert!(row.contains(" 1 "));
        assert!(row.contains(" 3 "));
        let text: String = (0..8u16)
            .flat_map(|y| (0..30u16).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Current"));
    }
}
