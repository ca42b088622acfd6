use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::auth::validate::country_label;
use crate::store::schema::Identity;
use crate::ui::theme::Theme;

pub struct AppHeader<'a> {
    pub identity: Option<&'a Identity>,
    pub timer: Option<(String, bool)>,
    pub theme: &'a Theme,
}

impl<'a> AppHeader<'a> {
    pub fn new(identity: Option<&'a Identity>, theme: &'a Theme) -> Self {
        Self {
            identity,
            timer: None,
            theme,
        }
    }

    pub fn timer(mut self, display: String, expired: bool) -> Self {
        self.timer = Some((display, expired));
        self
    }
}

impl Widget for AppHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let bar = Style::default().fg(colors.header_fg()).bg(colors.header_bg());

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.border()))
            .style(bar);
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(Span::styled(
            " quizbox",
            bar.add_modifier(Modifier::BOLD),
        )))
        .render(inner, buf);

        let mut right: Vec<Span> = Vec::new();
        if let Some((display, expired)) = &self.timer {
            let style = if *expired {
                Style::default().fg(colors.header_fg()).bg(colors.error())
            } else {
                Style::default().fg(colors.timer_fg()).bg(colors.timer_bg())
            };
            right.push(Span::styled(
                format!(" \u{23F1} {display} "),
                style.add_modifier(Modifier::BOLD),
            ));
            right.push(Span::styled("  ", bar));
        }
        if let Some(identity) = self.identity {
            right.push(Span::styled(
                format!(" {} ", identity.initial()),
                Style::default()
                    .fg(colors.header_bg())
                    .bg(colors.header_fg())
                    .add_modifier(Modifier::BOLD),
            ));
            right.push(Span::styled(format!(" {} ", identity.full_name), bar));
        }
        Paragraph::new(Line::from(right))
            .alignment(Alignment::Right)
            .render(inner, buf);
    }
}

/// Popup card listing the user's details, anchored under the header.
pub struct ProfilePopup<'a> {
    pub identity: &'a Identity,
    pub theme: &'a Theme,
}

impl ProfilePopup<'_> {
    pub const WIDTH: u16 = 40;
    pub const HEIGHT: u16 = 8;
}

impl Widget for ProfilePopup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(" Profile ")
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()).fg(colors.fg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let muted = Style::default().fg(colors.text_muted());
        let lines = vec![
            Line::from(Span::styled(
                self.identity.full_name.clone(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("Phone  ", muted),
                Span::raw(self.identity.contact_line()),
                Span::styled(format!(" ({})", country_label(&self.identity.country_code)), muted),
            ]),
            Line::from(vec![
                Span::styled("Email  ", muted),
                Span::raw(if self.identity.email.is_empty() {
                    "-".to_string()
                } else {
                    self.identity.email.clone()
                }),
            ]),
            Line::from(vec![Span::styled("Status ", muted), Span::raw(self.identity.status.clone())]),
            Line::from(""),
            Line::from(Span::styled(
                "[x] Logout  [Esc] Close",
                Style::default().fg(colors.error()),
            )),
        ];
        Paragraph::new(lines).render(inner, buf);
    }
}
