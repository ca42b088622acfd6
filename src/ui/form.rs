use crossterm::event::{KeyCode, KeyEvent};

use crate::auth::validate::{COUNTRY_CODES, FieldErrors, LoginInput, Registration, USER_STATUSES};
use crate::ui::line_input::{InputResult, LineInput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    Choice(&'static [&'static str]),
}

#[derive(Clone, Debug)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub input: LineInput,
    pub choice: usize,
    pub error: Option<String>,
}

impl FormField {
    fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            input: LineInput::new(""),
            choice: 0,
            error: None,
        }
    }

    fn secret(name: &'static str, label: &'static str) -> Self {
        Self {
            kind: FieldKind::Secret,
            ..Self::text(name, label)
        }
    }

    fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [&'static str],
        default: &str,
    ) -> Self {
        Self {
            kind: FieldKind::Choice(options),
            choice: options.iter().position(|o| *o == default).unwrap_or(0),
            ..Self::text(name, label)
        }
    }

    fn with_max_chars(mut self, max: usize) -> Self {
        self.input = self.input.with_max_chars(max);
        self
    }

    pub fn value(&self) -> String {
        match self.kind {
            FieldKind::Choice(options) => options.get(self.choice).copied().unwrap_or("").to_string(),
            FieldKind::Text | FieldKind::Secret => self.input.value().to_string(),
        }
    }

    fn cycle(&mut self, forward: bool) {
        if let FieldKind::Choice(options) = self.kind {
            let n = options.len();
            if n == 0 {
                return;
            }
            self.choice = if forward {
                (self.choice + 1) % n
            } else {
                (self.choice + n - 1) % n
            };
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormEvent {
    Continue,
    Submit,
    Cancel,
}

/// Focusable list of fields with per-field and form-level messages.
#[derive(Clone, Debug)]
pub struct Form {
    pub title: &'static str,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub general_error: Option<String>,
}

impl Form {
    pub fn login() -> Self {
        Self {
            title: "Login",
            fields: vec![
                FormField::choice("country_code", "Country code", COUNTRY_CODES, "+91"),
                FormField::text("phone_number", "Phone number").with_max_chars(15),
                FormField::secret("password", "Password"),
            ],
            focus: 1,
            general_error: None,
        }
    }

    pub fn register() -> Self {
        Self {
            title: "Register",
            fields: vec![
                FormField::text("full_name", "Full name"),
                FormField::text("email", "Email"),
                FormField::choice("country_code", "Country code", COUNTRY_CODES, "+91"),
                FormField::text("phone_number", "Phone number").with_max_chars(15),
                FormField::choice("status", "Status", USER_STATUSES, "employee"),
                FormField::secret("password", "Password"),
            ],
            focus: 0,
            general_error: None,
        }
    }

    pub fn value(&self, name: &str) -> String {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(FormField::value)
            .unwrap_or_default()
    }

    pub fn login_input(&self) -> LoginInput {
        LoginInput {
            country_code: self.value("country_code"),
            phone_number: self.value("phone_number"),
            password: self.value("password"),
        }
    }

    pub fn registration(&self) -> Registration {
        Registration {
            full_name: self.value("full_name"),
            email: self.value("email"),
            country_code: self.value("country_code"),
            phone_number: self.value("phone_number"),
            status: self.value("status"),
            password: self.value("password"),
        }
    }

    pub fn set_errors(&mut self, errors: &FieldErrors) {
        for field in &mut self.fields {
            field.error = errors.get(field.name).map(str::to_string);
        }
        if let Some(first) = self.fields.iter().position(|f| f.error.is_some()) {
            self.focus = first;
        }
    }

    pub fn clear_errors(&mut self) {
        self.general_error = None;
        for field in &mut self.fields {
            field.error = None;
        }
    }

    pub fn focused(&self) -> &FormField {
        &self.fields[self.focus]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.fields.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    pub fn handle(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus_next();
                return FormEvent::Continue;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus_prev();
                return FormEvent::Continue;
            }
            _ => {}
        }

        let field = &mut self.fields[self.focus];
        if let FieldKind::Choice(_) = field.kind {
            match key.code {
                KeyCode::Left => field.cycle(false),
                KeyCode::Right | KeyCode::Char(' ') => field.cycle(true),
                KeyCode::Enter => return FormEvent::Submit,
                KeyCode::Esc => return FormEvent::Cancel,
                _ => return FormEvent::Continue,
            }
            field.error = None;
            return FormEvent::Continue;
        }

        match field.input.handle(key) {
            InputResult::Submit => FormEvent::Submit,
            InputResult::Cancel => FormEvent::Cancel,
            InputResult::Continue => {
                field.error = None;
                FormEvent::Continue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(form: &mut Form, s: &str) {
        for ch in s.chars() {
            form.handle(key(KeyCode::Char(ch)));
        }
    }

    #[test]
    fn login_form_defaults() {
        let form = Form::login();
        assert_eq!(form.focused().name, "phone_number");
        let input = form.login_input();
        assert_eq!(input.country_code, "+91");
        assert!(input.phone_number.is_empty());
    }

    #[test]
    fn typing_and_tabbing_fill_fields() {
        let mut form = Form::login();
        type_str(&mut form, "0987654321");
        form.handle(key(KeyCode::Tab));
        type_str(&mut form, "texol123");
        let input = form.login_input();
        assert_eq!(input.phone_number, "0987654321");
        assert_eq!(input.password, "texol123");
    }

    #[test]
    fn choice_field_cycles_and_wraps() {
        let mut form = Form::login();
        form.handle(key(KeyCode::BackTab));
        assert_eq!(form.focused().name, "country_code");
        form.handle(key(KeyCode::Right));
        assert_eq!(form.value("country_code"), "+1");
        form.handle(key(KeyCode::Right));
        assert_eq!(form.value("country_code"), "+44");
        form.handle(key(KeyCode::Right));
        assert_eq!(form.value("country_code"), "+91");
        form.handle(key(KeyCode::Left));
        assert_eq!(form.value("country_code"), "+44");
    }

    #[test]
    fn register_status_defaults_to_employee() {
        let form = Form::register();
        assert_eq!(form.registration().status, "employee");
    }

    #[test]
    fn errors_focus_first_invalid_field_and_clear_on_typing() {
        let mut form = Form::register();
        let mut errors = FieldErrors::default();
        errors.insert("email", "Invalid email address");
        errors.insert("password", "Password is required");
        form.set_errors(&errors);
        assert_eq!(form.focused().name, "email");
        assert_eq!(form.focused().error.as_deref(), Some("Invalid email address"));

        form.handle(key(KeyCode::Char('x')));
        assert!(form.focused().error.is_none());
        assert!(form.fields[5].error.is_some());
    }

    #[test]
    fn enter_submits_and_esc_cancels() {
        let mut form = Form::login();
        assert_eq!(form.handle(key(KeyCode::Enter)), FormEvent::Submit);
        assert_eq!(form.handle(key(KeyCode::Esc)), FormEvent::Cancel);
        form.focus = 0;
        assert_eq!(form.handle(key(KeyCode::Enter)), FormEvent::Submit);
    }
}
