//! Event handling and screen coordination.
//!
//! [`App`] owns everything the terminal loop needs besides the terminal
//! itself: the shared [`AppState`], focus and layout managers, the page stack,
//! the UI components and the resolved keymap. It processes key presses,
//! drains [`UiEvent`]s forwarded from `AppState` callbacks, and draws frames.
//!
//! # Event Flow
//!
//! ```text
//! key press ─► App::handle_key ─► AppState::add/update/delete/...
//!                                        │
//!                                        ▼ (callback, no lock held)
//!                                  mpsc::Sender<UiEvent>
//!                                        │
//! next loop iteration ─► App::drain_events ─► component refresh ─► draw
//! ```
//!
//! # Key Routing
//!
//! 1. `Ctrl+C` always quits.
//! 2. With a modal open, the page manager gets `Esc` first; the top modal gets
//!    the rest. The quit key closes confirmation and help modals.
//! 3. In search mode, keys edit the query.
//! 4. Otherwise the keymap resolves an [`Action`]; unbound navigation keys go
//!    to the focused panel.
//!
//! # Example
//!
//! ```rust
//! use pass_tui::app::{connect_events, App, AppState};
//! use pass_tui::config::{Config, ValidationResult};
//! # use pass_tui::domain::{Credential, CredentialMetadata, NewCredential, PassTuiError, Result, UpdateOptions};
//! # use pass_tui::infrastructure::ClipboardSink;
//! # use pass_tui::storage::VaultService;
//! use std::sync::Arc;
//! # struct Empty;
//! # impl VaultService for Empty {
//! #     fn list(&self) -> Result<Vec<CredentialMetadata>> { Ok(Vec::new()) }
//! #     fn add(&self, _: &NewCredential) -> Result<()> { Ok(()) }
//! #     fn update(&self, _: &str, _: &UpdateOptions) -> Result<()> { Ok(()) }
//! #     fn delete(&self, _: &str) -> Result<()> { Ok(()) }
//! #     fn get(&self, s: &str, _: bool) -> Result<Credential> { Err(PassTuiError::NotFound(s.into())) }
//! # }
//! # struct NoClipboard;
//! # impl ClipboardSink for NoClipboard {
//! #     fn copy_secret(&mut self, _: &str) -> Result<()> { Ok(()) }
//! # }
//!
//! let state = Arc::new(AppState::new(Arc::new(Empty)));
//! let events = connect_events(&state);
//! let app = App::new(
//!     state,
//!     events,
//!     Config::default(),
//!     &ValidationResult::default(),
//!     Box::new(NoClipboard),
//! );
//! assert!(!app.should_quit());
//! ```

use crate::app::{Action, AppState, FocusTarget, InputMode, Keymap, NavigationState};
use crate::config::{Config, ValidationResult};
use crate::domain::PassTuiError;
use crate::infrastructure::ClipboardSink;
use crate::ui::components::{
    ConfirmDialog, ConfirmOutcome, CredentialForm, CredentialTable, DetailView, FormOutcome,
    FormSubmission, HelpView, Sidebar, StatusBar, StatusContext,
};
use crate::ui::layout::{LayoutManager, PanelSet};
use crate::ui::pages::{PageManager, CONFIRM_MODAL_SIZE, FORM_MODAL_SIZE, HELP_MODAL_SIZE};
use crate::ui::{renderer, Theme};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::Instant;

const MAIN_PAGE: &str = "main";
const FORM_MODAL: &str = "form";
const CONFIRM_MODAL: &str = "confirm";
const HELP_MODAL: &str = "help";

/// Notifications forwarded from [`AppState`] callbacks to the event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    CredentialsChanged,
    SelectionChanged,
    Error(String),
}

/// Content of a page or modal.
#[derive(Debug)]
pub enum Screen {
    Main,
    Form(CredentialForm),
    Confirm(ConfirmDialog),
    Help(HelpView),
}

/// Registers callbacks on `state` that forward every notification as a
/// [`UiEvent`], and returns the receiving end.
pub fn connect_events(state: &AppState) -> Receiver<UiEvent> {
    let (tx, rx) = mpsc::channel();

    let sender = tx.clone();
    state.on_credentials_changed(move || {
        let _ = sender.send(UiEvent::CredentialsChanged);
    });

    let sender = tx.clone();
    state.on_selection_changed(move || {
        let _ = sender.send(UiEvent::SelectionChanged);
    });

    state.on_error(move |err: &PassTuiError| {
        let _ = tx.send(UiEvent::Error(err.to_string()));
    });

    rx
}

pub struct App {
    state: Arc<AppState>,
    events: Receiver<UiEvent>,
    config: Config,
    theme: Theme,
    keymap: Keymap,
    navigation: NavigationState,
    layout: LayoutManager<FocusTarget>,
    pages: PageManager<Screen>,
    sidebar: Sidebar,
    table: CredentialTable,
    detail: DetailView,
    status: StatusBar,
    mode: InputMode,
    should_quit: bool,
}

impl App {
    /// Builds the application around an already-wired `state`.
    ///
    /// `issues` are the problems found while loading the configuration; the
    /// first one is shown in the status bar.
    #[must_use]
    pub fn new(
        state: Arc<AppState>,
        events: Receiver<UiEvent>,
        config: Config,
        issues: &ValidationResult,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        let mut layout = LayoutManager::new(PanelSet {
            sidebar: FocusTarget::Sidebar,
            table: FocusTarget::Table,
            detail: FocusTarget::Detail,
        });
        if let Err(err) = layout.set_breakpoints(
            config.layout.medium_breakpoint,
            config.layout.large_breakpoint,
        ) {
            tracing::warn!(error = %err, "keeping default layout breakpoints");
        }

        let mut pages = PageManager::new();
        pages.show_page(MAIN_PAGE, Screen::Main);

        let mut status = StatusBar::new();
        if let Some(error) = issues.errors.first() {
            status.error(format!("Config: {error} (using defaults)"));
        } else if let Some(warning) = issues.warnings.first() {
            status.info(format!("Config: {warning}"));
        }

        let mut app = Self {
            sidebar: Sidebar::new(Arc::clone(&state)),
            table: CredentialTable::new(Arc::clone(&state)),
            detail: DetailView::new(Arc::clone(&state), clipboard),
            theme: config.resolve_theme(),
            keymap: Keymap::from_bindings(&config.keybindings),
            state,
            events,
            config,
            navigation: NavigationState::new(),
            layout,
            pages,
            status,
            mode: InputMode::Normal,
            should_quit: false,
        };
        app.sync_focus_order();
        app
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    #[must_use]
    pub const fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    #[must_use]
    pub const fn keymap(&self) -> &Keymap {
        &self.keymap
    }

    #[must_use]
    pub const fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    #[must_use]
    pub const fn layout(&self) -> &LayoutManager<FocusTarget> {
        &self.layout
    }

    #[must_use]
    pub const fn pages(&self) -> &PageManager<Screen> {
        &self.pages
    }

    #[must_use]
    pub const fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }

    #[must_use]
    pub const fn table(&self) -> &CredentialTable {
        &self.table
    }

    #[must_use]
    pub const fn detail(&self) -> &DetailView {
        &self.detail
    }

    #[must_use]
    pub const fn status(&self) -> &StatusBar {
        &self.status
    }

    #[must_use]
    pub const fn mode(&self) -> InputMode {
        self.mode
    }

    /// Which hints the status bar should show.
    #[must_use]
    pub fn status_context(&self) -> StatusContext {
        match self.pages.top_modal() {
            Some(Screen::Form(_)) => StatusContext::Form,
            Some(Screen::Confirm(_)) => StatusContext::Confirm,
            Some(Screen::Help(_)) => StatusContext::Help,
            Some(Screen::Main) | None if self.mode.is_search() => StatusContext::Search,
            Some(Screen::Main) | None => match self.navigation.current_focus() {
                FocusTarget::Sidebar => StatusContext::Sidebar,
                FocusTarget::Table => StatusContext::Table,
                FocusTarget::Detail => StatusContext::Detail,
            },
        }
    }

    /// Applies all pending notifications from the shared state.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            tracing::trace!(event = ?event, "ui event");
            match event {
                UiEvent::CredentialsChanged => {
                    self.sidebar.refresh();
                    self.table.refresh();
                    self.detail.refresh();
                }
                UiEvent::SelectionChanged => {
                    self.table.refresh();
                    self.detail.refresh();
                }
                UiEvent::Error(message) => self.status.error(message),
            }
        }
    }

    /// Expires timed status messages.
    pub fn tick(&mut self) {
        self.status.tick(Instant::now());
    }

    /// Releases what must not outlive the process, such as a copied password.
    pub fn shutdown(&mut self) {
        if let Err(err) = self.detail.clear_clipboard() {
            tracing::warn!(error = %err, "failed to clear clipboard on exit");
        }
    }

    /// Records a terminal resize.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        if self.layout.handle_resize(width, height) {
            self.sync_focus_order();
        }
    }

    /// Draws one frame, first adapting the layout to the frame size.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let area = frame.size();
        if self.layout.observe(area.width, area.height) {
            self.sync_focus_order();
        }
        renderer::render(frame, self);
    }

    /// Makes the focus order match the visible panels, keeping the current
    /// focus when it is still on screen and preferring the table otherwise.
    fn sync_focus_order(&mut self) {
        let previous = self.navigation.current_focus();
        let visible = self.layout.visible_panels();
        let keep = if visible.contains(&previous) && !self.navigation.focus_order().is_empty() {
            previous
        } else {
            FocusTarget::Table
        };
        self.navigation.set_focus_order(visible);
        self.navigation.set_focus(keep);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let _span = tracing::debug_span!("handle_key", code = ?key.code).entered();

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.pages.has_modals() {
            if let Some(key) = self.pages.handle_key(key) {
                self.handle_modal_key(key);
            }
            return;
        }

        if self.mode.is_search() {
            self.handle_search_key(key);
            return;
        }

        if let Some(action) = self.keymap.resolve(&key) {
            self.run_action(action);
            return;
        }

        self.handle_panel_key(key);
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        let is_quit = self.keymap.resolve(&key) == Some(Action::Quit);

        match self.pages.top_modal_mut() {
            Some(Screen::Form(form)) => {
                if let FormOutcome::Submit(submission) = form.handle_key(key) {
                    self.submit(submission);
                }
            }
            Some(Screen::Confirm(dialog)) => {
                let outcome = if is_quit {
                    ConfirmOutcome::Cancelled
                } else {
                    dialog.handle_key(key)
                };
                let service = dialog.service.clone();
                match outcome {
                    ConfirmOutcome::Confirmed => self.delete(&service),
                    ConfirmOutcome::Cancelled => {
                        self.pages.close_modal(CONFIRM_MODAL);
                    }
                    ConfirmOutcome::Pending => {}
                }
            }
            Some(Screen::Help(help)) => {
                if is_quit || self.keymap.resolve(&key) == Some(Action::Help) {
                    self.pages.close_modal(HELP_MODAL);
                } else {
                    help.handle_key(key);
                }
            }
            Some(Screen::Main) | None => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.table.clear_query();
                self.mode = InputMode::Normal;
            }
            KeyCode::Enter => {
                self.mode = InputMode::Normal;
                self.table.select();
            }
            KeyCode::Backspace => self.table.pop_char(),
            KeyCode::Down => self.table.move_down(),
            KeyCode::Up => self.table.move_up(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.table.push_char(c);
            }
            _ => {}
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent) {
        let focus = self.navigation.current_focus();
        match (focus, key.code) {
            (FocusTarget::Sidebar, KeyCode::Down | KeyCode::Char('j')) => self.sidebar.move_down(),
            (FocusTarget::Sidebar, KeyCode::Up | KeyCode::Char('k')) => self.sidebar.move_up(),
            (FocusTarget::Sidebar, KeyCode::Home | KeyCode::Char('g')) => {
                self.sidebar.move_first();
            }
            (FocusTarget::Sidebar, KeyCode::End | KeyCode::Char('G')) => self.sidebar.move_last(),
            (FocusTarget::Sidebar, KeyCode::Enter) => self.sidebar.select(),
            (FocusTarget::Table, KeyCode::Down | KeyCode::Char('j')) => self.table.move_down(),
            (FocusTarget::Table, KeyCode::Up | KeyCode::Char('k')) => self.table.move_up(),
            (FocusTarget::Table, KeyCode::Home | KeyCode::Char('g')) => self.table.move_first(),
            (FocusTarget::Table, KeyCode::End | KeyCode::Char('G')) => self.table.move_last(),
            (FocusTarget::Table, KeyCode::Enter) => {
                self.table.select();
                self.navigation.set_focus(FocusTarget::Detail);
            }
            (FocusTarget::Detail, KeyCode::Enter) => self.toggle_password(),
            _ => {}
        }
    }

    fn run_action(&mut self, action: Action) {
        tracing::debug!(action = action.name(), "running action");

        if action.needs_selection() && self.state.selected_credential().is_none() {
            self.status.error("no credential selected");
            return;
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::NextFocus => self.navigation.cycle_forward(),
            Action::PreviousFocus => self.navigation.cycle_backward(),
            Action::Search => {
                self.navigation.set_focus(FocusTarget::Table);
                self.mode = InputMode::Search;
            }
            Action::Refresh => {
                if self.state.load().is_ok() {
                    self.status.success("Vault reloaded");
                }
            }
            Action::Help => {
                let (width, height) = HELP_MODAL_SIZE;
                let help = HelpView::new(&self.keymap);
                self.pages
                    .show_modal(HELP_MODAL, Screen::Help(help), width, height);
            }
            Action::AddCredential => {
                let form = CredentialForm::add(&self.state.categories());
                self.show_form(form);
            }
            Action::EditCredential => self.open_edit_form(),
            Action::DeleteCredential => {
                if let Some(selected) = self.state.selected_credential() {
                    let (width, height) = CONFIRM_MODAL_SIZE;
                    let dialog = ConfirmDialog::delete(&selected.service);
                    self.pages
                        .show_modal(CONFIRM_MODAL, Screen::Confirm(dialog), width, height);
                }
            }
            Action::TogglePassword => self.toggle_password(),
            Action::CopyPassword => self.copy_password(),
        }
    }

    fn show_form(&mut self, form: CredentialForm) {
        let (width, height) = FORM_MODAL_SIZE;
        self.pages
            .show_modal(FORM_MODAL, Screen::Form(form), width, height);
    }

    /// Pre-fills the edit form. The password is read without tracking usage.
    fn open_edit_form(&mut self) {
        let Some(selected) = self.state.selected_credential() else {
            return;
        };
        // Failures reach the status bar through the error callback.
        let Ok(credential) = self.state.get_full_credential(&selected.service, false) else {
            return;
        };
        let form = CredentialForm::edit(
            &credential.metadata,
            credential.password,
            &self.state.categories(),
        );
        self.show_form(form);
    }

    fn submit(&mut self, submission: FormSubmission) {
        if let FormSubmission::Update { options, .. } = &submission {
            if options.is_empty() {
                self.pages.close_modal(FORM_MODAL);
                self.status.info("No changes to save");
                return;
            }
        }

        let (result, message) = match &submission {
            FormSubmission::Add(new) => (self.state.add(new), format!("Added {}", new.service)),
            FormSubmission::Update { service, options } => (
                self.state.update(service, options),
                format!("Updated {service}"),
            ),
        };

        match result {
            Ok(()) => {
                self.pages.close_modal(FORM_MODAL);
                self.status.success(message);
            }
            Err(err) => {
                if let Some(Screen::Form(form)) = self.pages.top_modal_mut() {
                    form.set_error(err.root_cause().to_string());
                }
            }
        }
    }

    fn delete(&mut self, service: &str) {
        self.pages.close_modal(CONFIRM_MODAL);
        if self.state.delete(service).is_ok() {
            self.status.success(format!("Deleted {service}"));
        }
    }

    fn toggle_password(&mut self) {
        self.detail.refresh();
        match self.detail.toggle_password() {
            Ok(true) => self.status.info("Password revealed"),
            Ok(false) => {}
            Err(err) => tracing::debug!(error = %err, "reveal failed"),
        }
    }

    fn copy_password(&mut self) {
        self.detail.refresh();
        match self.detail.copy_password() {
            Ok(Some(service)) => self.status.success(format!(
                "Copied password for {service} (clears in {}s)",
                crate::infrastructure::CLIPBOARD_LIFETIME_SECS
            )),
            Ok(None) => {}
            Err(err @ PassTuiError::Clipboard(_)) => self.status.error(err.to_string()),
            Err(err) => tracing::debug!(error = %err, "copy failed"),
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("mode", &self.mode)
            .field("focus", &self.navigation.current_focus())
            .field("layout", &self.layout.mode())
            .field("modal", &self.pages.current_name())
            .field("should_quit", &self.should_quit)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Credential, CredentialMetadata, NewCredential, Result, UpdateOptions};
    use crate::storage::VaultService;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryVault {
        items: Mutex<Vec<(CredentialMetadata, String)>>,
    }

    impl VaultService for MemoryVault {
        fn list(&self) -> Result<Vec<CredentialMetadata>> {
            Ok(self.items.lock().unwrap().iter().map(|(m, _)| m.clone()).collect())
        }

        fn add(&self, c: &NewCredential) -> Result<()> {
            let mut meta = CredentialMetadata::new(&c.service, &c.username, &c.category);
            meta.url.clone_from(&c.url);
            self.items.lock().unwrap().push((meta, c.password.clone()));
            Ok(())
        }

        fn update(&self, service: &str, options: &UpdateOptions) -> Result<()> {
            let mut items = self.items.lock().unwrap();
            let (meta, password) = items
                .iter_mut()
                .find(|(m, _)| m.service == service)
                .ok_or_else(|| PassTuiError::NotFound(service.into()))?;
            options.username.apply_to(&mut meta.username);
            options.password.apply_to(password);
            options.category.apply_to(&mut meta.category);
            Ok(())
        }

        fn delete(&self, service: &str) -> Result<()> {
            self.items.lock().unwrap().retain(|(m, _)| m.service != service);
            Ok(())
        }

        fn get(&self, service: &str, _track: bool) -> Result<Credential> {
            self.items
                .lock()
                .unwrap()
                .iter()
                .find(|(m, _)| m.service == service)
                .map(|(m, p)| Credential {
                    metadata: m.clone(),
                    password: p.clone(),
                })
                .ok_or_else(|| PassTuiError::NotFound(service.into()))
        }
    }

    #[derive(Default, Clone)]
    struct RecordingClipboard(Arc<Mutex<Vec<String>>>);

    impl ClipboardSink for RecordingClipboard {
        fn copy_secret(&mut self, secret: &str) -> Result<()> {
            self.0.lock().unwrap().push(secret.to_string());
            Ok(())
        }

        fn clear_secret(&mut self) -> Result<()> {
            let mut copies = self.0.lock().unwrap();
            if copies.last().is_some_and(|last| !last.is_empty()) {
                copies.push(String::new());
            }
            Ok(())
        }
    }

    fn app_with(creds: &[(&str, &str)]) -> (App, RecordingClipboard) {
        let vault = Arc::new(MemoryVault::default());
        for (service, category) in creds {
            vault
                .add(&NewCredential {
                    service: (*service).into(),
                    username: "me".into(),
                    password: format!("{service}-pw"),
                    category: (*category).into(),
                    ..NewCredential::default()
                })
                .unwrap();
        }
        let state = Arc::new(AppState::new(vault));
        let events = connect_events(&state);
        state.load().unwrap();

        let clipboard = RecordingClipboard::default();
        let mut app = App::new(
            state,
            events,
            Config::default(),
            &ValidationResult::default(),
            Box::new(clipboard.clone()),
        );
        app.drain_events();
        (app, clipboard)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        app.drain_events();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn focus_order_follows_layout_mode() {
        let (mut app, _) = app_with(&[]);
        assert_eq!(app.navigation().focus_order(), &[FocusTarget::Table]);

        app.handle_resize(130, 40);
        assert_eq!(
            app.navigation().focus_order(),
            &[FocusTarget::Sidebar, FocusTarget::Table, FocusTarget::Detail]
        );
        assert_eq!(app.navigation().current_focus(), FocusTarget::Table);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.navigation().current_focus(), FocusTarget::Detail);

        app.handle_resize(90, 40);
        assert_eq!(app.navigation().current_focus(), FocusTarget::Table);
    }

    #[test]
    fn selection_actions_require_a_selection() {
        let (mut app, clipboard) = app_with(&[("github", "dev")]);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(
            app.status().message().map(|m| m.text.as_str()),
            Some("no credential selected")
        );

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(clipboard.0.lock().unwrap().as_slice(), ["github-pw"]);
    }

    #[test]
    fn add_form_creates_credential() {
        let (mut app, _) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        assert!(app.pages().is_modal_open(FORM_MODAL));

        type_text(&mut app, "gitlab");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "me");
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "secret");
        press(&mut app, KeyCode::Enter);

        assert!(!app.pages().has_modals());
        assert_eq!(app.table().rows().len(), 1);
        assert_eq!(app.state().categories().as_slice(), ["Uncategorized"]);
    }

    #[test]
    fn escape_closes_only_the_top_modal() {
        let (mut app, _) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.pages().has_modals());
        assert!(!app.should_quit());

        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.pages().has_modals());
        assert!(!app.should_quit());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn delete_requires_confirmation() {
        let (mut app, _) = app_with(&[("github", ""), ("gitlab", "")]);
        press(&mut app, KeyCode::Down);
        let selected = app.state().selected_credential().unwrap().service;

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.state().credentials().len(), 2);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.state().credentials().len(), 1);
        assert!(app.state().credentials().iter().all(|c| c.service != selected));
    }

    #[test]
    fn search_narrows_table_and_escape_clears() {
        let (mut app, _) = app_with(&[("github", ""), ("aws", "")]);
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.status_context(), StatusContext::Search);
        type_text(&mut app, "aws");
        assert_eq!(app.table().rows().len(), 1);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode(), InputMode::Normal);
        assert_eq!(app.table().rows().len(), 2);
    }

    #[test]
    fn unchanged_edit_closes_without_writing() {
        let (mut app, _) = app_with(&[("github", "dev")]);
        press(&mut app, KeyCode::Down);
        let before = app.state().credentials();

        press(&mut app, KeyCode::Char('e'));
        assert!(app.pages().is_modal_open(FORM_MODAL));
        press(&mut app, KeyCode::Enter);

        assert!(!app.pages().has_modals());
        assert_eq!(
            app.status().message().map(|m| m.text.as_str()),
            Some("No changes to save")
        );
        assert!(Arc::ptr_eq(&before, &app.state().credentials()));
    }

    #[test]
    fn shutdown_clears_copied_password() {
        let (mut app, clipboard) = app_with(&[("github", "")]);
        app.shutdown();
        assert!(clipboard.0.lock().unwrap().is_empty());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('c'));
        app.shutdown();
        assert_eq!(clipboard.0.lock().unwrap().as_slice(), ["github-pw", ""]);
    }

    #[test]
    fn ctrl_c_quits_even_with_modal() {
        let (mut app, _) = app_with(&[]);
        press(&mut app, KeyCode::Char('a'));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
