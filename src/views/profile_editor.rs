use crate::alert::Alert;
use crate::navigation::Route;
use crate::user::UserUpdate;
use crate::views::{ActionOutcome, ViewContext};

/// The inputs of the [`ProfileEditor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorField {
    Username,
    BirthDate,
}

/// Edits the username and birth date of a user
#[derive(Debug)]
pub struct ProfileEditor {
    ctx: ViewContext,
    user_id: String,
    username: Option<String>,
    birth_date: Option<String>,
}

impl ProfileEditor {

    pub fn new(ctx: ViewContext, user_id: impl Into<String>) -> Self {
        Self {
            ctx,
            user_id: user_id.into(),
            username: None,
            birth_date: None,
        }
    }

    /// Called whenever the user types into one of the inputs
    pub fn set_field(&mut self, field: EditorField, value: impl Into<String>) {
        let value = Some(value.into());
        match field {
            EditorField::Username => self.username = value,
            EditorField::BirthDate => self.birth_date = value,
        }
    }

    pub fn field(&self, field: EditorField) -> Option<&str> {
        match field {
            EditorField::Username => self.username.as_deref(),
            EditorField::BirthDate => self.birth_date.as_deref(),
        }
    }

    /// Updating requires a new username
    pub fn can_update(&self) -> bool {
        self.username.as_deref().is_some_and(|username| !username.is_empty())
    }

    /// Sends the entered values, together with the session token, to the backend. \
    /// Navigates back to the profile *before* the request is sent, so a failing request
    /// only results in an alert, on top of the profile.
    pub fn update(&self) -> ActionOutcome {
        if !self.can_update() {
            return ActionOutcome::Blocked;
        }
        let route = self.ctx.navigate(self.profile_route());
        let update = UserUpdate {
            username: self.username.clone(),
            birth_date: self.birth_date.clone(),
            token: self.ctx.session.token(),
        };
        match self.ctx.backend.update_user(&self.user_id, &update) {
            Ok(()) => ActionOutcome::Navigated(route),
            Err(err) => {
                let alert = self.ctx.show(Alert::from_error(&err, Alert::UpdateFailed));
                ActionOutcome::NavigatedWithAlert(route, alert)
            }
        }
    }

    /// Goes back to the profile, without saving anything
    pub fn cancel(&self) -> ActionOutcome {
        ActionOutcome::Navigated(self.ctx.navigate(self.profile_route()))
    }

    fn profile_route(&self) -> Route {
        Route::Profile { user_id: self.user_id.clone() }
    }

}


#[cfg(test)]
mod tests {
    use crate::views::testing::{harness, Call, FakeBackend};
    use super::*;

    #[test]
    fn test_update_disabled_until_username_entered() {
        let h = harness(FakeBackend::default(), Some("T"));
        let mut editor = ProfileEditor::new(h.ctx.clone(), "3");
        assert!(!editor.can_update());
        editor.set_field(EditorField::BirthDate, "2000-01-01");
        assert!(!editor.can_update());
        editor.set_field(EditorField::Username, "");
        assert!(!editor.can_update());
        assert_eq!(editor.update(), ActionOutcome::Blocked);
        assert!(h.backend.calls().is_empty());
        assert!(h.history.entries().is_empty());

        editor.set_field(EditorField::Username, "grace");
        assert!(editor.can_update());
        assert_eq!(editor.field(EditorField::Username), Some("grace"));
    }

    #[test]
    fn test_update_with_only_username() {
        let h = harness(FakeBackend::default(), Some("T"));
        let mut editor = ProfileEditor::new(h.ctx.clone(), "3");
        editor.set_field(EditorField::Username, "grace");

        let profile = Route::Profile { user_id: "3".to_string() };
        assert_eq!(editor.update(), ActionOutcome::Navigated(profile.clone()));
        assert_eq!(h.backend.calls(), vec![Call::Update {
            user_id: "3".to_string(),
            update: UserUpdate {
                username: Some("grace".to_string()),
                birth_date: None,
                token: Some("T".to_string()),
            },
        }]);
        assert_eq!(h.history.entries(), vec![profile]);
    }

    #[test]
    fn test_update_sends_birth_date_and_missing_token() {
        let h = harness(FakeBackend::default(), None);
        let mut editor = ProfileEditor::new(h.ctx.clone(), "3");
        editor.set_field(EditorField::Username, "grace");
        editor.set_field(EditorField::BirthDate, "1906-12-09");
        editor.update();
        let calls = h.backend.calls();
        let Some(Call::Update { update, .. }) = calls.first() else {
            panic!("Expected an update");
        };
        assert_eq!(update.birth_date.as_deref(), Some("1906-12-09"));
        assert_eq!(update.token, None);
    }

    #[test]
    fn test_failed_update_still_navigates() {
        let h = harness(FakeBackend::failing("Failed to fetch"), Some("T"));
        let mut editor = ProfileEditor::new(h.ctx.clone(), "3");
        editor.set_field(EditorField::Username, "grace");

        let profile = Route::Profile { user_id: "3".to_string() };
        assert_eq!(editor.update(), ActionOutcome::NavigatedWithAlert(profile.clone(), Alert::ServerUnreachable));
        assert_eq!(h.history.entries(), vec![profile]);
        assert_eq!(h.alerts.alerts(), vec![Alert::ServerUnreachable]);
    }

    #[test]
    fn test_other_update_failure() {
        let h = harness(FakeBackend::failing("builder error"), Some("T"));
        let mut editor = ProfileEditor::new(h.ctx.clone(), "3");
        editor.set_field(EditorField::Username, "grace");
        let ActionOutcome::NavigatedWithAlert(_, alert) = editor.update() else {
            panic!("Expected an alert");
        };
        assert_eq!(alert.to_string(), "Can't redirect!: builder error");
    }

    #[test]
    fn test_cancel() {
        let h = harness(FakeBackend::default(), Some("T"));
        let mut editor = ProfileEditor::new(h.ctx.clone(), "3");
        editor.set_field(EditorField::Username, "grace");
        assert_eq!(editor.cancel(), ActionOutcome::Navigated(Route::Profile { user_id: "3".to_string() }));
        assert!(h.backend.calls().is_empty());
    }
}
