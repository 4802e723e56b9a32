use pass_tui::app::AppState;
use pass_tui::domain::{
    filter_by_category, Credential, CredentialMetadata, FieldUpdate, NewCredential, PassTuiError,
    Result, UpdateOptions,
};
use pass_tui::storage::{JsonVault, VaultService};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct MockVault {
    items: Mutex<Vec<CredentialMetadata>>,
    fail_list: AtomicBool,
    fail_writes: AtomicBool,
    list_calls: AtomicUsize,
}

impl MockVault {
    fn with(items: Vec<CredentialMetadata>) -> Arc<Self> {
        Arc::new(Self {
            items: Mutex::new(items),
            ..Self::default()
        })
    }

    fn snapshot(&self) -> Vec<CredentialMetadata> {
        self.items.lock().unwrap().clone()
    }

    fn check_write(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(PassTuiError::Storage("disk full".into()));
        }
        Ok(())
    }
}

impl VaultService for MockVault {
    fn list(&self) -> Result<Vec<CredentialMetadata>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(PassTuiError::Storage("unreadable".into()));
        }
        Ok(self.snapshot())
    }

    fn add(&self, c: &NewCredential) -> Result<()> {
        self.check_write()?;
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|m| m.service == c.service) {
            return Err(PassTuiError::AlreadyExists(c.service.clone()));
        }
        items.push(CredentialMetadata::new(&c.service, &c.username, &c.category));
        Ok(())
    }

    fn update(&self, service: &str, options: &UpdateOptions) -> Result<()> {
        self.check_write()?;
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|m| m.service == service)
            .ok_or_else(|| PassTuiError::NotFound(service.into()))?;
        options.username.apply_to(&mut item.username);
        options.category.apply_to(&mut item.category);
        Ok(())
    }

    fn delete(&self, service: &str) -> Result<()> {
        self.check_write()?;
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|m| m.service != service);
        if items.len() == before {
            return Err(PassTuiError::NotFound(service.into()));
        }
        Ok(())
    }

    fn get(&self, service: &str, _track: bool) -> Result<Credential> {
        self.snapshot()
            .into_iter()
            .find(|m| m.service == service)
            .map(|metadata| Credential {
                metadata,
                password: "secret".into(),
            })
            .ok_or_else(|| PassTuiError::NotFound(service.into()))
    }
}

fn meta(service: &str, category: &str) -> CredentialMetadata {
    CredentialMetadata::new(service, "user", category)
}

fn new_credential(service: &str, category: &str) -> NewCredential {
    NewCredential {
        service: service.into(),
        username: "user".into(),
        password: "pw".into(),
        category: category.into(),
        ..NewCredential::default()
    }
}

#[test]
fn load_derives_sorted_category_labels() {
    let vault = MockVault::with(vec![meta("AWS", ""), meta("GH", "dev")]);
    let state = AppState::new(vault);
    state.load().unwrap();

    assert_eq!(state.categories().as_slice(), ["Uncategorized", "dev"]);

    state.set_selected_category(Some("dev".into()));
    let visible = filter_by_category(&state.credentials(), state.selected_category().as_deref());
    let services: Vec<&str> = visible.iter().map(|c| c.service.as_str()).collect();
    assert_eq!(services, ["GH"]);
    assert_eq!(state.visible_credentials().len(), 1);
}

#[test]
fn categories_are_case_sensitive_and_grow_in_sorted_position() {
    let vault = MockVault::with(vec![meta("a", "work"), meta("b", "Dev"), meta("c", "work")]);
    let state = AppState::new(vault);
    state.load().unwrap();
    assert_eq!(state.categories().as_slice(), ["Dev", "work"]);

    state.add(&new_credential("d", "personal")).unwrap();
    assert_eq!(state.categories().as_slice(), ["Dev", "personal", "work"]);

    // Existing category: no growth.
    state.add(&new_credential("e", "work")).unwrap();
    assert_eq!(state.categories().len(), 3);
}

#[test]
fn cache_matches_vault_after_each_mutation() {
    let vault = MockVault::with(vec![meta("a", "")]);
    let state = AppState::new(vault.clone());
    state.load().unwrap();

    state.add(&new_credential("b", "dev")).unwrap();
    assert_eq!(*state.credentials(), vault.snapshot());

    let options = UpdateOptions {
        category: FieldUpdate::Set("ops".into()),
        ..UpdateOptions::default()
    };
    state.update("b", &options).unwrap();
    assert_eq!(*state.credentials(), vault.snapshot());
    assert!(state.categories().contains(&"ops".to_string()));

    state.delete("a").unwrap();
    assert_eq!(*state.credentials(), vault.snapshot());
    assert_eq!(state.categories().as_slice(), ["ops"]);
}

#[test]
fn callbacks_may_read_state_without_deadlock() {
    let vault = MockVault::with(vec![meta("a", "")]);
    let state = Arc::new(AppState::new(vault));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let observer = Arc::clone(&state);
    let record = Arc::clone(&seen);
    state.on_credentials_changed(move || {
        let count = observer.credentials().len();
        let _ = observer.categories();
        let _ = observer.selected_credential();
        record.lock().unwrap().push(count);
    });

    state.load().unwrap();
    state.add(&new_credential("b", "")).unwrap();

    assert_eq!(*seen.lock().unwrap(), [1, 2]);
}

#[test]
fn selection_callback_may_mutate_state() {
    let state = Arc::new(AppState::new(MockVault::with(vec![meta("a", "dev")])));
    state.load().unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let observer = Arc::clone(&state);
    let counter = Arc::clone(&calls);
    state.on_selection_changed(move || {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            observer.set_selected_category(observer.selected_credential().map(|c| c.category));
        }
    });

    state.set_selected_credential(state.credentials().first().cloned());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(state.selected_category().as_deref(), Some("dev"));
}

#[test]
fn selection_is_a_snapshot_independent_of_the_cache() {
    let vault = MockVault::with(vec![meta("a", ""), meta("b", "")]);
    let state = AppState::new(vault);
    state.load().unwrap();
    let before = state.credentials();

    let selected = before[0].clone();
    state.set_selected_credential(Some(selected.clone()));
    assert!(Arc::ptr_eq(&before, &state.credentials()));

    state.delete("a").unwrap();
    assert_eq!(state.credentials().len(), 1);
    assert_eq!(state.selected_credential(), Some(selected));

    // The earlier snapshot is unaffected by the reload.
    assert_eq!(before.len(), 2);
}

#[test]
fn failed_write_reports_error_and_keeps_cache() {
    let vault = MockVault::with(vec![meta("a", "")]);
    let state = AppState::new(vault.clone());
    state.load().unwrap();
    let before = state.credentials();

    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);
    state.on_error(move |err| sink.lock().unwrap().push(err.to_string()));
    let changes = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&changes);
    state.on_credentials_changed(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    vault.fail_writes.store(true, Ordering::SeqCst);
    let err = state.add(&new_credential("b", "")).unwrap_err();

    assert_eq!(err.to_string(), "failed to add credential: storage error: disk full");
    assert!(matches!(err.root_cause(), PassTuiError::Storage(_)));
    assert_eq!(errors.lock().unwrap().as_slice(), [err.to_string()]);
    assert_eq!(changes.load(Ordering::SeqCst), 0);
    assert_eq!(*state.credentials(), *before);
}

#[test]
fn failed_reload_is_reported_separately() {
    let vault = MockVault::with(Vec::new());
    let state = AppState::new(vault.clone());
    state.load().unwrap();

    vault.fail_list.store(true, Ordering::SeqCst);
    let err = state.add(&new_credential("a", "")).unwrap_err();
    assert!(err.to_string().starts_with("failed to reload credentials"));
    assert!(state.credentials().is_empty());
    assert_eq!(vault.snapshot().len(), 1);

    let err = state.load().unwrap_err();
    assert!(err.to_string().starts_with("failed to load credentials"));
}

#[test]
fn json_vault_round_trip_through_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.json");

    {
        let vault = JsonVault::open(path.clone()).unwrap();
        let state = AppState::new(Arc::new(vault));
        state.load().unwrap();
        state.add(&new_credential("github", "dev")).unwrap();
        state.add(&new_credential("aws", "")).unwrap();

        let credential = state.get_full_credential("github", true).unwrap();
        assert_eq!(credential.password, "pw");

        let err = state.add(&new_credential("github", "")).unwrap_err();
        assert!(matches!(err.root_cause(), PassTuiError::AlreadyExists(_)));
    }

    let vault = JsonVault::open(path).unwrap();
    let state = AppState::new(Arc::new(vault));
    state.load().unwrap();

    assert_eq!(state.categories().as_slice(), ["Uncategorized", "dev"]);
    let github = state
        .credentials()
        .iter()
        .find(|c| c.service == "github")
        .cloned()
        .unwrap();
    assert_eq!(github.usage_count, 1);
    assert!(github.last_accessed.is_some());
}

fn record_errors(state: &AppState) -> Arc<Mutex<Vec<String>>> {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);
    state.on_error(move |err| sink.lock().unwrap().push(err.to_string()));
    errors
}

#[test]
fn deleting_unknown_service_is_reported() {
    let vault = MockVault::with(vec![meta("a", "")]);
    let state = AppState::new(vault.clone());
    state.load().unwrap();
    let errors = record_errors(&state);

    let err = state.delete("missing").unwrap_err();

    assert_eq!(err.to_string(), "failed to delete credential: credential not found: missing");
    assert!(matches!(err.root_cause(), PassTuiError::NotFound(s) if s == "missing"));
    assert_eq!(errors.lock().unwrap().as_slice(), [err.to_string()]);
    assert_eq!(*state.credentials(), vault.snapshot());
}

#[test]
fn failed_fetch_of_full_credential_is_reported() {
    let state = AppState::new(MockVault::with(vec![meta("a", "")]));
    state.load().unwrap();
    let errors = record_errors(&state);

    assert_eq!(state.get_full_credential("a", false).unwrap().password, "secret");
    assert!(errors.lock().unwrap().is_empty());

    let err = state.get_full_credential("missing", true).unwrap_err();
    assert_eq!(err.to_string(), "failed to get credential: credential not found: missing");
    assert_eq!(errors.lock().unwrap().as_slice(), [err.to_string()]);
}

#[test]
fn concurrent_reads_and_adds_leave_cache_matching_vault() {
    let vault = MockVault::with(Vec::new());
    let state = AppState::new(vault.clone());
    state.load().unwrap();

    std::thread::scope(|scope| {
        for writer in 0..4 {
            let state = &state;
            scope.spawn(move || {
                for i in 0..10 {
                    let category = if i % 2 == 0 { "even" } else { "odd" };
                    state
                        .add(&new_credential(&format!("w{writer}-{i}"), category))
                        .unwrap();
                }
            });
        }
        for _ in 0..4 {
            let state = &state;
            scope.spawn(move || {
                for _ in 0..100 {
                    let credentials = state.credentials();
                    assert!(credentials.len() <= 40);
                    let categories = state.categories();
                    assert!(categories.windows(2).all(|pair| pair[0] < pair[1]));
                }
            });
        }
    });

    let mut cached = state.credentials().as_ref().clone();
    let mut stored = vault.snapshot();
    cached.sort_by(|a, b| a.service.cmp(&b.service));
    stored.sort_by(|a, b| a.service.cmp(&b.service));
    assert_eq!(cached.len(), 40);
    assert_eq!(cached, stored);
    assert_eq!(state.categories().as_slice(), ["even", "odd"]);
}

#[test]
fn failed_json_write_is_not_visible_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vault.json");
    let state = AppState::new(Arc::new(JsonVault::open(path.clone()).unwrap()));
    state.load().unwrap();

    // A directory in place of the temporary file makes every save fail.
    let blocker = path.with_extension("tmp");
    std::fs::create_dir(&blocker).unwrap();

    let err = state.add(&new_credential("gh", "dev")).unwrap_err();
    assert!(matches!(err.root_cause(), PassTuiError::Io(_)));
    state.load().unwrap();
    assert!(state.credentials().is_empty());

    std::fs::remove_dir(&blocker).unwrap();
    state.add(&new_credential("gh", "dev")).unwrap();
    assert_eq!(state.credentials().len(), 1);
}
