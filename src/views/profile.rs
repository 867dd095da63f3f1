use crate::alert::Alert;
use crate::navigation::Route;
use crate::user::User;
use crate::views::{ActionOutcome, ViewContext};

/// Shows the profile of a single user
#[derive(Debug)]
pub struct ProfileView {
    ctx: ViewContext,
    /// The id from the route, this view was opened with
    user_id: String,
    user: User,
}

impl ProfileView {

    /// Creates the view with an empty [`User`]. \
    /// Call [`ProfileView::mount()`] to load the actual user.
    pub fn new(ctx: ViewContext, user_id: impl Into<String>) -> Self {
        Self {
            ctx,
            user_id: user_id.into(),
            user: User::default(),
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    /// Loads the user from the backend, replacing the shown record. \
    /// On failure the alert is shown and returned, the record stays as it was.
    pub fn mount(&mut self) -> Option<Alert> {
        let token = self.ctx.session.token();
        match self.ctx.backend.fetch_user(&self.user_id, token.as_deref()) {
            Ok(user) => {
                self.user = user;
                None
            }
            Err(err) => Some(self.ctx.show(Alert::from_error(&err, Alert::ProfileUnavailable))),
        }
    }

    /// The lines shown on the profile. Missing fields are left blank.
    pub fn labels(&self) -> Vec<String> {
        vec![
            format!("Username: {}", self.user.username.as_deref().unwrap_or_default()),
            format!("Status: {}", self.user.status.as_deref().unwrap_or_default()),
            format!("Date of creation: {}", self.user.creation_date.as_deref().unwrap_or_default()),
            format!("Date of birth: {}", self.user.birth_date.as_deref().unwrap_or_default()),
        ]
    }

    /// Only the user, the profile belongs to, may edit it. \
    /// Compares the stored session token with the token of the shown user.
    /// Two absent tokens do not match, so a logged out user can't edit an unloaded profile.
    pub fn can_edit(&self) -> bool {
        match (self.ctx.session.token(), self.user.token.as_deref()) {
            (Some(session_token), Some(user_token)) => session_token == user_token,
            _ => false,
        }
    }

    pub fn return_to_game(&self) -> ActionOutcome {
        ActionOutcome::Navigated(self.ctx.navigate(Route::Game))
    }

    pub fn edit_profile(&self) -> ActionOutcome {
        if !self.can_edit() {
            return ActionOutcome::Blocked;
        }
        let user_id = self.user.id
            .map(|id| id.to_string())
            .unwrap_or_else(|| self.user_id.clone());
        ActionOutcome::Navigated(self.ctx.navigate(Route::ProfileEditor { user_id }))
    }

}
