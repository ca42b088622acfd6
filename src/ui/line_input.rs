use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// One editable line: form fields, the jump prompt and the feedback comment.
#[derive(Clone, Debug, Default)]
pub struct LineInput {
    text: String,
    /// Char index, `0..=char_count`.
    cursor: usize,
    max_chars: Option<usize>,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            cursor: text.chars().count(),
            max_chars: None,
        }
    }

    /// Further characters are dropped once the text holds `max` of them.
    pub fn with_max_chars(mut self, max: usize) -> Self {
        self.max_chars = Some(max);
        self
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn is_full(&self) -> bool {
        self.max_chars.is_some_and(|max| self.char_count() >= max)
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(b, _)| b)
    }

    /// Text split around the cursor. The middle part is `None` when the
    /// cursor sits past the last character.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let (before, rest) = self.text.split_at(self.byte_at(self.cursor));
        let mut tail = rest.chars();
        let under = tail.next();
        (before, under, tail.as_str())
    }

    /// `render_parts` for secrets: every character drawn as `mask`.
    pub fn masked_parts(&self, mask: char) -> (String, Option<char>, String) {
        let len = self.char_count();
        let under = (self.cursor < len).then_some(mask);
        let after = len.saturating_sub(self.cursor + 1);
        (
            std::iter::repeat_n(mask, self.cursor).collect(),
            under,
            std::iter::repeat_n(mask, after).collect(),
        )
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match (key.code, ctrl) {
            (KeyCode::Enter, _) => return InputResult::Submit,
            (KeyCode::Esc, _) => return InputResult::Cancel,
            (KeyCode::Left, _) => self.cursor = self.cursor.saturating_sub(1),
            (KeyCode::Right, _) => self.cursor = (self.cursor + 1).min(self.char_count()),
            (KeyCode::Home, _) | (KeyCode::Char('a'), true) => self.cursor = 0,
            (KeyCode::End, _) | (KeyCode::Char('e'), true) => self.cursor = self.char_count(),
            (KeyCode::Backspace, _) if self.cursor > 0 => {
                self.cursor -= 1;
                self.remove_range(self.cursor, self.cursor + 1);
            }
            (KeyCode::Delete, _) if self.cursor < self.char_count() => {
                self.remove_range(self.cursor, self.cursor + 1);
            }
            (KeyCode::Char('u'), true) => self.clear(),
            (KeyCode::Char('w'), true) => self.delete_word_back(),
            (KeyCode::Char(ch), false) if !self.is_full() => {
                let at = self.byte_at(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Removes chars in `start..end` (char indices).
    fn remove_range(&mut self, start: usize, end: usize) {
        let range = self.byte_at(start)..self.byte_at(end);
        self.text.replace_range(range, "");
    }

    /// Ctrl-W: trailing blanks first, then the word before them.
    fn delete_word_back(&mut self) {
        let before: Vec<char> = self.text.chars().take(self.cursor).collect();
        let blanks = before.iter().rev().take_while(|c| c.is_whitespace()).count();
        let word = before
            .iter()
            .rev()
            .skip(blanks)
            .take_while(|c| !c.is_whitespace())
            .count();
        let start = self.cursor - blanks - word;
        self.remove_range(start, self.cursor);
        self.cursor = start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut LineInput, code: KeyCode) -> InputResult {
        input.handle(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(input: &mut LineInput, text: &str) {
        for ch in text.chars() {
            press(input, KeyCode::Char(ch));
        }
    }

    fn ctrl(input: &mut LineInput, ch: char) {
        input.handle(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    #[test]
    fn phone_field_stops_at_fifteen_digits() {
        let mut phone = LineInput::new("").with_max_chars(15);
        type_str(&mut phone, "12345678901234567890");
        assert_eq!(phone.value(), "123456789012345");
        assert_eq!(phone.cursor, 15);
    }

    #[test]
    fn full_field_accepts_a_digit_after_a_deletion() {
        let mut phone = LineInput::new("").with_max_chars(10);
        type_str(&mut phone, "5550001111");
        press(&mut phone, KeyCode::Home);
        press(&mut phone, KeyCode::Char('9'));
        assert_eq!(phone.value(), "5550001111");

        press(&mut phone, KeyCode::Delete);
        press(&mut phone, KeyCode::Char('9'));
        assert_eq!(phone.value(), "9550001111");
        assert_eq!(phone.cursor, 1);
    }

    #[test]
    fn typo_fixed_in_the_middle_of_a_number() {
        let mut phone = LineInput::new("98765x4321");
        for _ in 0..4 {
            press(&mut phone, KeyCode::Left);
        }
        press(&mut phone, KeyCode::Backspace);
        assert_eq!(phone.value(), "987654321");
        assert_eq!(phone.cursor, 5);
        press(&mut phone, KeyCode::Char('0'));
        assert_eq!(phone.value(), "9876504321");
    }

    #[test]
    fn jump_prompt_holds_four_chars_and_submits() {
        let mut jump = LineInput::new("").with_max_chars(4);
        type_str(&mut jump, "12345");
        assert_eq!(jump.value(), "1234");
        press(&mut jump, KeyCode::Backspace);
        press(&mut jump, KeyCode::Backspace);
        assert_eq!(press(&mut jump, KeyCode::Enter), InputResult::Submit);
        assert_eq!(jump.value(), "12");
    }

    #[test]
    fn escape_leaves_the_text_alone() {
        let mut jump = LineInput::new("7");
        assert_eq!(press(&mut jump, KeyCode::Esc), InputResult::Cancel);
        assert_eq!(jump.value(), "7");
    }

    #[test]
    fn masked_password_tracks_the_cursor() {
        let mut password = LineInput::new("");
        type_str(&mut password, "texol123");
        assert_eq!(
            password.masked_parts('\u{2022}'),
            ("\u{2022}".repeat(8), None, String::new())
        );

        press(&mut password, KeyCode::Home);
        press(&mut password, KeyCode::Right);
        press(&mut password, KeyCode::Right);
        let (before, under, after) = password.masked_parts('*');
        assert_eq!((before.as_str(), under, after.as_str()), ("**", Some('*'), "*****"));

        press(&mut password, KeyCode::Backspace);
        assert_eq!(password.value(), "txol123");
        let (before, under, after) = password.masked_parts('*');
        assert_eq!((before.as_str(), under, after.as_str()), ("*", Some('*'), "*****"));
    }

    #[test]
    fn ctrl_u_wipes_a_password() {
        let mut password = LineInput::new("hunter22");
        press(&mut password, KeyCode::Left);
        ctrl(&mut password, 'u');
        assert_eq!(password.value(), "");
        assert_eq!(password.masked_parts('*'), (String::new(), None, String::new()));
    }

    #[test]
    fn comment_edits_keep_multibyte_chars_whole() {
        let mut comment = LineInput::new("très bien ");
        ctrl(&mut comment, 'w');
        assert_eq!(comment.value(), "très ");

        ctrl(&mut comment, 'a');
        press(&mut comment, KeyCode::Right);
        press(&mut comment, KeyCode::Right);
        assert_eq!(comment.render_parts(), ("tr", Some('è'), "s "));
        press(&mut comment, KeyCode::Delete);
        assert_eq!(comment.value(), "trs ");

        ctrl(&mut comment, 'e');
        type_str(&mut comment, "ok ✓");
        assert_eq!(comment.value(), "trs ok ✓");
        assert_eq!(comment.render_parts(), ("trs ok ✓", None, ""));
    }

    #[test]
    fn editing_keys_are_harmless_on_an_empty_field() {
        let mut field = LineInput::new("");
        press(&mut field, KeyCode::Backspace);
        press(&mut field, KeyCode::Delete);
        press(&mut field, KeyCode::Left);
        ctrl(&mut field, 'w');
        assert_eq!(field.value(), "");
        assert_eq!(field.cursor, 0);
    }
}
