use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::ui::form::{FieldKind, Form, FormField};
use crate::ui::theme::Theme;

const LABEL_WIDTH: usize = 15;

/// Renders a login or registration form: one line per field, its error
/// below it, and the form-level error or notice at the bottom.
pub struct FormView<'a> {
    pub form: &'a Form,
    pub notice: Option<&'a str>,
    pub hint: &'a str,
    pub theme: &'a Theme,
}

impl<'a> FormView<'a> {
    pub fn new(form: &'a Form, hint: &'a str, theme: &'a Theme) -> Self {
        Self {
            form,
            notice: None,
            hint,
            theme,
        }
    }

    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    /// Lines needed to lay the form out, borders included.
    pub fn height(form: &Form) -> u16 {
        form.fields.len() as u16 * 2 + 6
    }

    fn field_spans(&self, field: &FormField, focused: bool) -> Vec<Span<'static>> {
        let colors = &self.theme.colors;
        let text_style = Style::default().fg(colors.fg());
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());

        match field.kind {
            FieldKind::Choice(_) => {
                let arrows = if focused { ("\u{25C2} ", " \u{25B8}") } else { ("  ", "  ") };
                vec![
                    Span::styled(arrows.0, Style::default().fg(colors.accent())),
                    Span::styled(
                        field.value(),
                        text_style.add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(arrows.1, Style::default().fg(colors.accent())),
                ]
            }
            FieldKind::Text | FieldKind::Secret => {
                let (before, cursor, after) = if field.kind == FieldKind::Secret {
                    field.input.masked_parts('\u{2022}')
                } else {
                    let (b, c, a) = field.input.render_parts();
                    (b.to_string(), c, a.to_string())
                };
                let mut spans = vec![Span::styled(before, text_style)];
                if focused {
                    spans.push(Span::styled(
                        cursor.map_or(" ".to_string(), |c| c.to_string()),
                        cursor_style,
                    ));
                } else if let Some(c) = cursor {
                    spans.push(Span::styled(c.to_string(), text_style));
                }
                spans.push(Span::styled(after, text_style));
                spans
            }
        }
    }
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.form.title))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines: Vec<Line> = vec![Line::from("")];
        for (i, field) in self.form.fields.iter().enumerate() {
            let focused = i == self.form.focus;
            let label_style = if focused {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.text_muted())
            };
            let indicator = if focused { ">" } else { " " };
            let mut spans = vec![Span::styled(
                format!(" {indicator} {:<width$}", field.label, width = LABEL_WIDTH),
                label_style,
            )];
            spans.extend(self.field_spans(field, focused));
            lines.push(Line::from(spans));

            lines.push(match &field.error {
                Some(err) => Line::from(Span::styled(
                    format!("   {:<width$}{err}", "", width = LABEL_WIDTH),
                    Style::default().fg(colors.error()),
                )),
                None => Line::from(""),
            });
        }

        if let Some(err) = &self.form.general_error {
            lines.push(Line::from(Span::styled(
                format!("   {err}"),
                Style::default().fg(colors.error()).add_modifier(Modifier::BOLD),
            )));
        } else if let Some(notice) = self.notice {
            lines.push(Line::from(Span::styled(
                format!("   {notice}"),
                Style::default().fg(colors.success()),
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {}", self.hint),
            Style::default().fg(colors.accent()),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}
