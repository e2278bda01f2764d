//! User management view state.
//!
//! An explicit state struct mutated only through the named transition
//! functions below, with no ambient globals. The view never discards the last
//! known good user list on failure; it degrades to showing an error message.

use std::sync::Arc;

use crate::api::{ApiError, UserApi};
use crate::model::{FieldError, User, validate_draft};

/// Outcome of a [`UserView::submit`] call.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The record was created or updated on the server.
    Saved(User),
    /// Field validation failed; no network call was made.
    Invalid(Vec<FieldError>),
    /// The server rejected the operation; the view's error message is set.
    Failed,
}

/// Observable view state.
#[derive(Debug, Default)]
pub struct ViewState {
    users: Vec<User>,
    loading: bool,
    error: Option<String>,
    selected: Option<User>,
    pending_delete: Option<u64>,
}

/// The view: observable state plus the transitions that drive it.
pub struct UserView {
    api: Arc<dyn UserApi>,
    state: ViewState,
}

/// User-visible message for a failed API call.
fn describe_failure(err: &ApiError) -> String {
    match err {
        ApiError::Status { .. } => err.to_string(),
        ApiError::Transport(_) => "Something went wrong talking to the server".to_owned(),
    }
}

impl UserView {
    /// Create a view over the given API client. Call [`Self::refresh`] to
    /// load the initial list.
    #[must_use]
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self {
            api,
            state: ViewState::default(),
        }
    }

    /// The current known user list.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.state.users
    }

    /// True while a list refresh is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.state.loading
    }

    /// The last user-visible failure, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// The record selected for editing; absent means create mode.
    #[must_use]
    pub const fn selected(&self) -> Option<&User> {
        self.state.selected.as_ref()
    }

    /// The id armed for deletion, awaiting confirmation.
    #[must_use]
    pub const fn pending_delete(&self) -> Option<u64> {
        self.state.pending_delete
    }

    /// Reload the list from the server.
    ///
    /// On success the list is replaced and any error cleared; on failure the
    /// previous list is kept and the error message set.
    pub async fn refresh(&mut self) {
        self.state.loading = true;
        match self.api.get_users().await {
            Ok(users) => {
                self.state.users = users;
                self.state.error = None;
            }
            Err(err) => {
                self.state.error = Some(describe_failure(&err));
            }
        }
        self.state.loading = false;
    }

    /// Validate the form input and create or update depending on whether a
    /// record is selected.
    ///
    /// Validation failures skip the network entirely. A successful save
    /// merges the result into the list (append for create, replace-by-id for
    /// update), clears the error, and returns to create mode.
    pub async fn submit(&mut self, name: &str, email: &str) -> SubmitOutcome {
        let draft = match validate_draft(name, email) {
            Ok(draft) => draft,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        let result = match &self.state.selected {
            Some(selected) => self.api.update_user(selected.id, &draft).await,
            None => self.api.create_user(&draft).await,
        };

        match result {
            Ok(saved) => {
                match self.state.users.iter().position(|u| u.id == saved.id) {
                    Some(index) => self.state.users[index] = saved.clone(),
                    None => self.state.users.push(saved.clone()),
                }
                self.state.error = None;
                self.state.selected = None;
                SubmitOutcome::Saved(saved)
            }
            Err(err) => {
                self.state.error = Some(describe_failure(&err));
                SubmitOutcome::Failed
            }
        }
    }

    /// Enter edit mode for the given id. Returns false when the id is not in
    /// the current list.
    pub fn select(&mut self, id: u64) -> bool {
        match self.state.users.iter().find(|u| u.id == id) {
            Some(user) => {
                self.state.selected = Some(user.clone());
                true
            }
            None => false,
        }
    }

    /// Leave edit mode and return to create mode.
    pub fn cancel_selection(&mut self) {
        self.state.selected = None;
    }

    /// Arm the delete confirmation gate. No network call happens until
    /// [`Self::confirm_delete`].
    pub fn request_delete(&mut self, id: u64) {
        self.state.pending_delete = Some(id);
    }

    /// Disarm the delete confirmation gate without deleting anything.
    pub fn cancel_delete(&mut self) {
        self.state.pending_delete = None;
    }

    /// Perform the armed deletion. Returns false when no deletion was armed.
    ///
    /// On success the record leaves the list and the selection is cleared if
    /// it matched; on failure the error message is set. Either way the gate
    /// is disarmed.
    pub async fn confirm_delete(&mut self) -> bool {
        let Some(id) = self.state.pending_delete.take() else {
            return false;
        };
        match self.api.delete_user(id).await {
            Ok(()) => {
                self.state.users.retain(|u| u.id != id);
                if self.state.selected.as_ref().is_some_and(|u| u.id == id) {
                    self.state.selected = None;
                }
                self.state.error = None;
            }
            Err(err) => {
                self.state.error = Some(describe_failure(&err));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rstest::{fixture, rstest};

    use crate::model::{Field, UserDraft};

    /// Deterministic in-memory double for [`UserApi`].
    #[derive(Default)]
    struct FakeApi {
        users: Mutex<Vec<User>>,
        next_id: AtomicUsize,
        calls: AtomicUsize,
        fail_with: Mutex<Option<(u16, String)>>,
    }

    impl FakeApi {
        fn with_users(users: Vec<User>) -> Self {
            let next = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
            let fake = Self::default();
            *fake.users.lock().expect("lock") = users;
            fake.next_id.store(next as usize, Ordering::SeqCst);
            fake
        }

        fn fail_next(&self, status: u16, body: &str) {
            *self.fail_with.lock().expect("lock") = Some((status, body.to_owned()));
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn take_failure(&self) -> Option<ApiError> {
            self.fail_with
                .lock()
                .expect("lock")
                .take()
                .map(|(status, body)| ApiError::Status { status, body })
        }
    }

    #[async_trait]
    impl UserApi for FakeApi {
        async fn get_users(&self) -> Result<Vec<User>, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            Ok(self.users.lock().expect("lock").clone())
        }

        async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            let id = self.next_id.fetch_add(1, Ordering::SeqCst) as u64;
            let user = User {
                id,
                name: draft.name.clone(),
                email: draft.email.clone(),
            };
            self.users.lock().expect("lock").push(user.clone());
            Ok(user)
        }

        async fn update_user(&self, id: u64, draft: &UserDraft) -> Result<User, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            let mut users = self.users.lock().expect("lock");
            let user = users
                .iter_mut()
                .find(|u| u.id == id)
                .ok_or(ApiError::Status {
                    status: 404,
                    body: "not found".to_owned(),
                })?;
            user.name = draft.name.clone();
            user.email = draft.email.clone();
            Ok(user.clone())
        }

        async fn delete_user(&self, id: u64) -> Result<(), ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(err) = self.take_failure() {
                return Err(err);
            }
            let mut users = self.users.lock().expect("lock");
            let len = users.len();
            users.retain(|u| u.id != id);
            if users.len() == len {
                return Err(ApiError::Status {
                    status: 404,
                    body: "not found".to_owned(),
                });
            }
            Ok(())
        }
    }

    fn user(id: u64, name: &str) -> User {
        User {
            id,
            name: name.to_owned(),
            email: format!("{}@example.com", name.to_lowercase()),
        }
    }

    #[fixture]
    fn two_users() -> Arc<FakeApi> {
        Arc::new(FakeApi::with_users(vec![user(1, "Ada"), user(2, "Grace")]))
    }

    #[rstest]
    #[tokio::test]
    async fn refresh_loads_the_list_and_clears_loading(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users);
        view.refresh().await;

        assert!(!view.loading());
        assert_eq!(view.users().len(), 2);
        assert!(view.error().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn refresh_failure_keeps_the_previous_list(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users.clone());
        view.refresh().await;

        two_users.fail_next(503, "unavailable");
        view.refresh().await;

        assert_eq!(view.users().len(), 2);
        assert!(view.error().is_some_and(|msg| msg.contains("503")));
    }

    #[rstest]
    #[tokio::test]
    async fn submit_with_empty_name_skips_the_network() {
        let api = Arc::new(FakeApi::default());
        let mut view = UserView::new(api.clone());

        let outcome = view.submit("", "ada@example.com").await;

        let SubmitOutcome::Invalid(errors) = outcome else {
            panic!("expected validation failure");
        };
        assert_eq!(errors[0].field, Field::Name);
        assert_eq!(errors[0].message, "Name is required");
        assert_eq!(api.calls(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn submit_in_create_mode_appends_the_result() {
        let api = Arc::new(FakeApi::default());
        let mut view = UserView::new(api);

        let outcome = view.submit("Ada", "ada@example.com").await;

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert_eq!(view.users().len(), 1);
        assert_eq!(view.users()[0].name, "Ada");
        assert!(view.error().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn submit_in_edit_mode_replaces_by_id(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users);
        view.refresh().await;
        assert!(view.select(1));

        let outcome = view.submit("Ada Lovelace", "lovelace@example.com").await;

        assert!(matches!(outcome, SubmitOutcome::Saved(_)));
        assert_eq!(view.users().len(), 2);
        assert_eq!(view.users()[0].name, "Ada Lovelace");
        assert!(view.selected().is_none(), "edit mode ends after save");
    }

    #[rstest]
    #[tokio::test]
    async fn failed_create_sets_error_and_leaves_users_unchanged(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users.clone());
        view.refresh().await;

        two_users.fail_next(500, "boom");
        let outcome = view.submit("Edsger", "edsger@example.com").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert!(view.error().is_some_and(|msg| msg.contains("boom")));
        assert_eq!(view.users().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_requires_the_confirmation_gate(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users.clone());
        view.refresh().await;
        let baseline = two_users.calls();

        view.request_delete(1);
        assert_eq!(two_users.calls(), baseline, "arming makes no network call");

        assert!(view.confirm_delete().await);
        assert_eq!(view.users().len(), 1);
        assert_eq!(view.users()[0].id, 2);
    }

    #[rstest]
    #[tokio::test]
    async fn cancel_delete_disarms_without_calling(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users.clone());
        view.refresh().await;
        let baseline = two_users.calls();

        view.request_delete(1);
        view.cancel_delete();
        assert!(!view.confirm_delete().await, "gate is disarmed");
        assert_eq!(two_users.calls(), baseline);
        assert_eq!(view.users().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_the_selected_user_clears_the_selection(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users);
        view.refresh().await;
        assert!(view.select(2));

        view.request_delete(2);
        view.confirm_delete().await;

        assert!(view.selected().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn failed_delete_surfaces_the_error(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users.clone());
        view.refresh().await;

        two_users.fail_next(404, "gone");
        view.request_delete(1);
        view.confirm_delete().await;

        assert!(view.error().is_some_and(|msg| msg.contains("404")));
        assert_eq!(view.users().len(), 2, "list untouched on failure");
    }

    #[rstest]
    #[tokio::test]
    async fn select_unknown_id_is_rejected(two_users: Arc<FakeApi>) {
        let mut view = UserView::new(two_users);
        view.refresh().await;

        assert!(!view.select(42));
        assert!(view.selected().is_none());
    }
}
