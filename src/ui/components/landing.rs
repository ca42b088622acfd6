use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::app::LandingState;
use crate::ui::theme::Theme;

const TERMS: &[&str] = &[
    "Answer each question by choosing one option.",
    "The timer starts as soon as the test opens.",
    "You can move between questions and change answers until you submit.",
    "Submit is available on the last question.",
];

pub struct Landing<'a> {
    pub state: &'a LandingState,
    pub question_count: usize,
    pub duration: String,
    pub theme: &'a Theme,
}

impl Widget for Landing<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(6),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .split(inner);

        let title_lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "quizbox",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} questions \u{00B7} {} on the clock",
                    self.question_count, self.duration
                ),
                Style::default().fg(colors.fg()),
            )),
            Line::from(""),
        ];
        Paragraph::new(title_lines)
            .alignment(Alignment::Center)
            .render(layout[0], buf);

        let rules: Vec<Line> = TERMS
            .iter()
            .map(|t| {
                Line::from(vec![
                    Span::styled("  \u{2022} ", Style::default().fg(colors.accent())),
                    Span::styled(*t, Style::default().fg(colors.fg())),
                ])
            })
            .collect();
        Paragraph::new(rules)
            .wrap(Wrap { trim: false })
            .render(layout[1], buf);

        let checkbox = if self.state.accepted { "[x]" } else { "[ ]" };
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("  {checkbox} "),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "I accept the terms and conditions",
                Style::default().fg(colors.fg()),
            ),
        ]))
        .render(layout[2], buf);

        if self.state.show_error {
            Paragraph::new(Line::from(Span::styled(
                "  Please accept the terms and conditions to continue",
                Style::default().fg(colors.error()),
            )))
            .render(layout[3], buf);
        }

        Paragraph::new(Line::from(vec![
            Span::styled("  [Space] Accept terms  ", Style::default().fg(colors.accent())),
            Span::styled("[Enter] Get started  ", Style::default().fg(colors.accent())),
            Span::styled("[q] Quit", Style::default().fg(colors.accent())),
        ]))
        .render(layout[4], buf);
    }
}
