//! Add/edit credential form.
//!
//! The form is a modal with six single-line fields. It never talks to the
//! vault itself: on Enter it validates its input and hands a
//! [`FormSubmission`] back to the event handler, which calls
//! [`AppState`](crate::app::AppState). Validation errors stay inside the form
//! and are shown inline.
//!
//! # Keys
//!
//! - `Tab` / `Down` and `Shift+Tab` / `Up` move between fields
//! - `Up` / `Down` on the Category field cycle through known categories
//! - `Enter` submits
//! - `Backspace` deletes, `Ctrl+U` clears the field
//! - `Ctrl+P` shows or hides the password
//!
//! # Editing
//!
//! The edit form is pre-filled from the selected credential. Username and
//! password are only sent when they changed and are non-empty; category, URL
//! and notes are always sent so they can be cleared.

use crate::domain::{
    category_from_label, CredentialMetadata, FieldUpdate, NewCredential, UpdateOptions,
    UNCATEGORIZED,
};
use crate::ui::components::modal_block;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Service,
    Username,
    Password,
    Category,
    Url,
    Notes,
}

impl Field {
    pub const ALL: [Self; 6] = [
        Self::Service,
        Self::Username,
        Self::Password,
        Self::Category,
        Self::Url,
        Self::Notes,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Service => "Service",
            Self::Username => "Username",
            Self::Password => "Password",
            Self::Category => "Category",
            Self::Url => "URL",
            Self::Notes => "Notes",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Service => 0,
            Self::Username => 1,
            Self::Password => 2,
            Self::Category => 3,
            Self::Url => 4,
            Self::Notes => 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FormKind {
    Add,
    Edit {
        original: CredentialMetadata,
        original_password: String,
    },
}

/// What the form wants done after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Pending,
    Submit(FormSubmission),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormSubmission {
    Add(NewCredential),
    Update {
        service: String,
        options: UpdateOptions,
    },
}

#[derive(Debug, Clone)]
pub struct CredentialForm {
    kind: FormKind,
    values: [String; 6],
    focus: Field,
    categories: Vec<String>,
    show_password: bool,
    error: Option<String>,
}

impl CredentialForm {
    /// Empty form for a new credential.
    ///
    /// `categories` are the known category labels offered on the Category
    /// field; "Uncategorized" is always offered first.
    #[must_use]
    pub fn add(categories: &[String]) -> Self {
        let mut values: [String; 6] = Default::default();
        values[Field::Category.index()] = UNCATEGORIZED.to_string();
        Self {
            kind: FormKind::Add,
            values,
            focus: Field::Service,
            categories: category_choices(categories),
            show_password: false,
            error: None,
        }
    }

    /// Form pre-filled from `original`, with its current `password`.
    #[must_use]
    pub fn edit(original: &CredentialMetadata, password: String, categories: &[String]) -> Self {
        let values = [
            original.service.clone(),
            original.username.clone(),
            password.clone(),
            original.category_label().to_string(),
            original.url.clone(),
            original.notes.clone(),
        ];
        Self {
            kind: FormKind::Edit {
                original: original.clone(),
                original_password: password,
            },
            values,
            focus: Field::Username,
            categories: category_choices(categories),
            show_password: false,
            error: None,
        }
    }

    #[must_use]
    pub const fn is_edit(&self) -> bool {
        matches!(self.kind, FormKind::Edit { .. })
    }

    #[must_use]
    pub const fn focus(&self) -> Field {
        self.focus
    }

    #[must_use]
    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn title(&self) -> String {
        match &self.kind {
            FormKind::Add => "Add Credential".to_string(),
            FormKind::Edit { original, .. } => format!("Edit Credential: {}", original.service),
        }
    }

    /// Shows a submission error returned by the vault.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    fn is_read_only(&self, field: Field) -> bool {
        field == Field::Service && self.is_edit()
    }

    fn next_field(&mut self) {
        let index = (self.focus.index() + 1) % Field::ALL.len();
        self.focus = Field::ALL[index];
        if self.is_read_only(self.focus) {
            self.next_field();
        }
    }

    fn previous_field(&mut self) {
        let index = (self.focus.index() + Field::ALL.len() - 1) % Field::ALL.len();
        self.focus = Field::ALL[index];
        if self.is_read_only(self.focus) {
            self.previous_field();
        }
    }

    fn cycle_category(&mut self, forward: bool) {
        if self.categories.is_empty() {
            return;
        }
        let current = self.value(Field::Category);
        let len = self.categories.len();
        let next = match self.categories.iter().position(|c| c == current) {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.values[Field::Category.index()] = self.categories[next].clone();
    }

    fn edit_focused(&mut self, f: impl FnOnce(&mut String)) {
        if self.is_read_only(self.focus) {
            return;
        }
        f(&mut self.values[self.focus.index()]);
        self.error = None;
    }

    /// Applies a key press. Esc is handled by the page manager, not here.
    pub fn handle_key(&mut self, key: KeyEvent) -> FormOutcome {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter => {
                return match self.submission() {
                    Ok(submission) => FormOutcome::Submit(submission),
                    Err(message) => {
                        self.error = Some(message);
                        FormOutcome::Pending
                    }
                };
            }
            KeyCode::Tab => self.next_field(),
            KeyCode::BackTab => self.previous_field(),
            KeyCode::Down if self.focus == Field::Category => self.cycle_category(true),
            KeyCode::Up if self.focus == Field::Category => self.cycle_category(false),
            KeyCode::Down => self.next_field(),
            KeyCode::Up => self.previous_field(),
            KeyCode::Char('p') if ctrl => self.show_password = !self.show_password,
            KeyCode::Char('u') if ctrl => self.edit_focused(String::clear),
            KeyCode::Backspace => self.edit_focused(|value| {
                value.pop();
            }),
            KeyCode::Char(c) if !ctrl => self.edit_focused(|value| value.push(c)),
            _ => {}
        }

        FormOutcome::Pending
    }

    /// Validates the input and builds the request for the vault.
    ///
    /// # Errors
    ///
    /// Returns a message for the first missing required field.
    pub fn submission(&self) -> Result<FormSubmission, String> {
        let service = self.value(Field::Service).trim();
        let username = self.value(Field::Username).trim();
        let password = self.value(Field::Password);
        let category = category_from_label(self.value(Field::Category));
        let url = self.value(Field::Url).trim().to_string();
        let notes = self.value(Field::Notes).to_string();

        if service.is_empty() {
            return Err("Service is required".to_string());
        }
        if username.is_empty() {
            return Err("Username is required".to_string());
        }

        match &self.kind {
            FormKind::Add => {
                if password.is_empty() {
                    return Err("Password is required".to_string());
                }
                Ok(FormSubmission::Add(NewCredential {
                    service: service.to_string(),
                    username: username.to_string(),
                    password: password.to_string(),
                    category,
                    url,
                    notes,
                }))
            }
            FormKind::Edit {
                original,
                original_password,
            } => {
                // Blank identity fields keep their value; the others may be cleared.
                let changed = |value: &str, before: &str| {
                    if value.is_empty() || value == before {
                        FieldUpdate::Keep
                    } else {
                        FieldUpdate::Set(value.to_string())
                    }
                };
                let replaced = |value: String, before: &str| {
                    if value == before {
                        FieldUpdate::Keep
                    } else {
                        FieldUpdate::Set(value)
                    }
                };
                Ok(FormSubmission::Update {
                    service: original.service.clone(),
                    options: UpdateOptions {
                        username: changed(username, &original.username),
                        password: changed(password, original_password),
                        category: replaced(category, &original.category),
                        url: replaced(url, &original.url),
                        notes: replaced(notes, &original.notes),
                    },
                })
            }
        }
    }

    pub fn render(&self, frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
        let mut lines = Vec::with_capacity(Field::ALL.len() * 2 + 3);

        for field in Field::ALL {
            let focused = field == self.focus;
            let mut value = self.value(field).to_string();
            if field == Field::Password && !self.show_password {
                value = "•".repeat(value.chars().count());
            }
            if focused {
                value.push('▏');
            }

            let label_style = if focused { theme.title() } else { theme.dim() };
            let value_style = if self.is_read_only(field) {
                theme.dim()
            } else if focused {
                theme.selection_style()
            } else {
                theme.text()
            };

            let hint = if field == Field::Category && focused {
                "  ↑/↓"
            } else {
                ""
            };

            lines.push(Line::from(vec![
                Span::styled(format!("{:<10}", field.label()), label_style),
                Span::styled(value, value_style),
                Span::styled(hint, theme.dim()),
            ]));
            lines.push(Line::from(""));
        }

        match &self.error {
            Some(error) => lines.push(Line::from(Span::styled(error.clone(), theme.error()))),
            None => lines.push(Line::from("")),
        }
        lines.push(Line::from(Span::styled(
            "enter: save | tab: next | ctrl+p: show password | esc: cancel",
            theme.dim(),
        )));

        let paragraph = Paragraph::new(lines).block(modal_block(&self.title(), theme));
        frame.render_widget(paragraph, area);
    }
}

/// "Uncategorized" followed by the other known labels, without duplicates.
fn category_choices(categories: &[String]) -> Vec<String> {
    std::iter::once(UNCATEGORIZED.to_string())
        .chain(categories.iter().filter(|c| c.as_str() != UNCATEGORIZED).cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut CredentialForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn add_requires_service_username_and_password() {
        let mut form = CredentialForm::add(&[]);
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Pending);
        assert_eq!(form.error(), Some("Service is required"));

        type_text(&mut form, "github");
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "octocat");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormOutcome::Pending);
        assert_eq!(form.error(), Some("Password is required"));

        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, "hunter2");
        match form.handle_key(key(KeyCode::Enter)) {
            FormOutcome::Submit(FormSubmission::Add(new)) => {
                assert_eq!(new.service, "github");
                assert_eq!(new.password, "hunter2");
                assert_eq!(new.category, "");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn category_field_cycles_known_labels() {
        let categories = vec!["Uncategorized".to_string(), "dev".to_string()];
        let mut form = CredentialForm::add(&categories);
        for _ in 0..3 {
            form.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(form.focus(), Field::Category);
        assert_eq!(form.value(Field::Category), "Uncategorized");

        form.handle_key(key(KeyCode::Down));
        assert_eq!(form.value(Field::Category), "dev");
        form.handle_key(key(KeyCode::Down));
        assert_eq!(form.value(Field::Category), "Uncategorized");
        form.handle_key(key(KeyCode::Up));
        assert_eq!(form.value(Field::Category), "dev");
    }

    #[test]
    fn edit_sends_only_changed_identity_fields() {
        let mut original = CredentialMetadata::new("github", "octocat", "dev");
        original.url = "https://github.com".into();
        let mut form = CredentialForm::edit(&original, "old".into(), &[]);
        assert_eq!(form.focus(), Field::Username);

        // Clear the URL.
        for _ in 0..3 {
            form.handle_key(key(KeyCode::Tab));
        }
        assert_eq!(form.focus(), Field::Url);
        form.handle_key(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));

        match form.submission() {
            Ok(FormSubmission::Update { service, options }) => {
                assert_eq!(service, "github");
                assert!(options.username.is_keep());
                assert!(options.password.is_keep());
                assert!(options.category.is_keep());
                assert_eq!(options.url, FieldUpdate::Set(String::new()));
                assert!(!options.is_empty());
            }
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn untouched_edit_submits_no_changes() {
        let mut original = CredentialMetadata::new("github", "octocat", "");
        original.notes = "2fa on".into();
        let form = CredentialForm::edit(&original, "pw".into(), &["dev".to_string()]);

        match form.submission() {
            Ok(FormSubmission::Update { options, .. }) => assert!(options.is_empty()),
            other => panic!("unexpected submission: {other:?}"),
        }
    }

    #[test]
    fn service_is_read_only_when_editing() {
        let original = CredentialMetadata::new("github", "octocat", "");
        let mut form = CredentialForm::edit(&original, "pw".into(), &[]);
        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), Field::Notes);
        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), Field::Username);
        assert_eq!(form.value(Field::Service), "github");
    }
}
