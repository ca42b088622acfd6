use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::app::FeedbackState;
use crate::session::result::QuizResult;
use crate::session::timer::format_clock;
use crate::ui::theme::Theme;

pub struct ResultPanel<'a> {
    pub result: &'a QuizResult,
    pub user_id: &'a str,
    pub feedback: &'a FeedbackState,
    pub status: Option<&'a str>,
    pub theme: &'a Theme,
}

impl<'a> ResultPanel<'a> {
    pub fn new(
        result: &'a QuizResult,
        user_id: &'a str,
        feedback: &'a FeedbackState,
        theme: &'a Theme,
    ) -> Self {
        Self {
            result,
            user_id,
            feedback,
            status: None,
            theme,
        }
    }

    pub fn status(mut self, status: Option<&'a str>) -> Self {
        self.status = status;
        self
    }
}

impl Widget for ResultPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(" Test Complete ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Min(5),
                Constraint::Length(2),
            ])
            .split(inner);

        Paragraph::new(Line::from(Span::styled(
            "Congratulations you have Successfully Completed The Test",
            Style::default()
                .fg(colors.success())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(layout[0], buf);

        let pct = self.result.percent();
        let score_color = if pct >= 80.0 {
            colors.success()
        } else if pct >= 50.0 {
            colors.warning()
        } else {
            colors.error()
        };
        let score_text = format!("{}/{}", self.result.score, self.result.total);
        let pct_text = format!("  ({pct:.0}%)");
        Paragraph::new(Line::from(vec![
            Span::styled("  Score:      ", Style::default().fg(colors.fg())),
            Span::styled(
                &*score_text,
                Style::default().fg(score_color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(&*pct_text, Style::default().fg(colors.text_muted())),
        ]))
        .render(layout[1], buf);

        let answered_text = format!(
            "{} answered, {} skipped",
            self.result.answered,
            self.result.unanswered()
        );
        Paragraph::new(Line::from(vec![
            Span::styled("  Questions:  ", Style::default().fg(colors.fg())),
            Span::styled(&*answered_text, Style::default().fg(colors.fg())),
        ]))
        .render(layout[2], buf);

        let time_text = format_clock(self.result.time_used_secs);
        Paragraph::new(Line::from(vec![
            Span::styled("  Time used:  ", Style::default().fg(colors.fg())),
            Span::styled(&*time_text, Style::default().fg(colors.fg())),
            Span::styled(
                format!("    ID: {}", self.user_id),
                Style::default().fg(colors.text_muted()),
            ),
        ]))
        .render(layout[3], buf);

        self.render_feedback(layout[5], buf);

        Paragraph::new(Line::from(vec![
            Span::styled("  [1-5] Rate  ", Style::default().fg(colors.accent())),
            Span::styled("[c] Comment  ", Style::default().fg(colors.accent())),
            Span::styled("[f] Submit Feedback  ", Style::default().fg(colors.accent())),
            Span::styled("[h] Back to home  ", Style::default().fg(colors.accent())),
            Span::styled("[x] Logout", Style::default().fg(colors.accent())),
        ]))
        .render(layout[6], buf);
    }
}

impl ResultPanel<'_> {
    fn render_feedback(&self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let block = Block::bordered()
            .title(" Feedback ")
            .border_style(Style::default().fg(if self.feedback.editing_comment {
                colors.border_focused()
            } else {
                colors.border()
            }));
        let inner = block.inner(area);
        block.render(area, buf);

        let rating = self.feedback.rating.unwrap_or(0);
        let stars: String = (1..=5u8)
            .map(|n| if n <= rating { '\u{2605}' } else { '\u{2606}' })
            .collect();

        let (before, cursor, after) = self.feedback.comment.render_parts();
        let mut comment_spans = vec![
            Span::styled("Comment: ", Style::default().fg(colors.text_muted())),
            Span::styled(before.to_string(), Style::default().fg(colors.fg())),
        ];
        if self.feedback.editing_comment {
            comment_spans.push(Span::styled(
                cursor.map_or(" ".to_string(), |c| c.to_string()),
                Style::default().fg(colors.bg()).bg(colors.fg()),
            ));
        } else if let Some(c) = cursor {
            comment_spans.push(Span::styled(c.to_string(), Style::default().fg(colors.fg())));
        }
        comment_spans.push(Span::styled(after.to_string(), Style::default().fg(colors.fg())));

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Rating:  ", Style::default().fg(colors.text_muted())),
                Span::styled(stars, Style::default().fg(colors.highlight())),
            ]),
            Line::from(comment_spans),
        ];
        if let Some(status) = self.status {
            let color = if self.feedback.sent {
                colors.success()
            } else {
                colors.warning()
            };
            lines.push(Line::from(Span::styled(status.to_string(), Style::default().fg(color))));
        }
        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn shows_score_and_user() {
        let result = QuizResult {
            score: 7,
            total: 10,
            answered: 9,
            time_used_secs: 125,
            completed_at: Utc::now(),
        };
        let feedback = FeedbackState::default();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        ResultPanel::new(&result, "guest-001", &feedback, &theme)
            .status(Some("Successfully sent"))
            .render(area, &mut buf);

        let text: String = (0..20u16)
            .flat_map(|y| (0..80u16).map(move |x| (x, y)))
            .map(|(x, y)| buf[(x, y)].symbol().to_string())
            .collect();
        assert!(text.contains("Congratulations"));
        assert!(text.contains("7/10"));
        assert!(text.contains("guest-001"));
        assert!(text.contains("2:05"));
        assert!(text.contains("Successfully sent"));
    }
}
