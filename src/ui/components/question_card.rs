use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::quiz::QuizSession;
use crate::ui::theme::Theme;

/// The current question with its lettered options. The selected option is
/// marked; correctness is never shown while the quiz is running.
pub struct QuestionCard<'a> {
    pub session: &'a QuizSession,
    pub theme: &'a Theme,
}

impl<'a> QuestionCard<'a> {
    pub fn new(session: &'a QuizSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }
}

pub fn option_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let session = self.session;
        let question = session.current_question();
        let selected = session.selected_answer();

        let mut block = Block::bordered()
            .title(format!(
                " Question {} of {} ",
                session.current_index() + 1,
                session.len()
            ))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        if session.is_bookmarked() {
            block = block.title_top(
                Line::from(Span::styled(
                    " \u{2605} Bookmarked ",
                    Style::default()
                        .fg(colors.bookmark())
                        .add_modifier(Modifier::BOLD),
                ))
                .right_aligned(),
            );
        }
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(Span::styled(
                question.text.clone(),
                Style::default().fg(colors.fg()).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, option) in question.options.iter().enumerate() {
            let is_selected = selected == Some(i);
            let marker = if is_selected { "\u{25C9}" } else { "\u{25CB}" };
            let style = if is_selected {
                Style::default()
                    .fg(colors.selected_option())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {marker} "), style),
                Span::styled(
                    format!("[{}] ", i + 1),
                    Style::default().fg(colors.text_muted()),
                ),
                Span::styled(format!("{}. {option}", option_letter(i)), style),
            ]));
            lines.push(Line::from(""));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questions::Question;

    fn render_text(session: &QuizSession) -> String {
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 14);
        let mut buf = Buffer::empty(area);
        QuestionCard::new(session, &theme).render(area, &mut buf);
        (0..14u16)
            .map(|y| {
                (0..60u16)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn session() -> QuizSession {
        QuizSession::new(
            vec![Question {
                id: 1,
                text: "Pick one".into(),
                options: vec!["red".into(), "green".into()],
                correct_option: 1,
            }],
            60,
        )
        .unwrap()
    }

    #[test]
    fn shows_question_and_options() {
        let text = render_text(&session());
        assert!(text.contains("Question 1 of 1"));
        assert!(text.contains("Pick one"));
        assert!(text.contains("A. red"));
        assert!(text.contains("B. green"));
        assert!(!text.contains("Bookmarked"));
    }

    #[test]
    fn shows_bookmark_badge() {
        let mut s = session();
        s.toggle_bookmark();
        assert!(render_text(&s).contains("Bookmarked"));
    }

    #[test]
    fn letters() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
    }
}
