use serde_json::Value;
use crate::alert::Alert;
use crate::navigation::Route;
use crate::user::Registration;
use crate::views::{ActionOutcome, ViewContext};

/// The status, with which the backend reports an already taken username
const CONFLICT_STATUS: u64 = 409;

/// The inputs of the [`RegisterForm`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    Username,
    Name,
    BirthDate,
    Password,
    ConfirmPassword,
}

impl RegisterField {
    /// The fields, that have to be filled in, before registering is possible
    pub const REQUIRED: [RegisterField; 4] = [
        RegisterField::Username,
        RegisterField::Name,
        RegisterField::Password,
        RegisterField::ConfirmPassword,
    ];
}

/// Creates a new account
#[derive(Debug)]
pub struct RegisterForm {
    ctx: ViewContext,
    username: Option<String>,
    name: Option<String>,
    birth_date: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
}

impl RegisterForm {

    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            username: None,
            name: None,
            birth_date: None,
            password: None,
            confirm_password: None,
        }
    }

    /// Called whenever the user types into one of the inputs
    pub fn set_field(&mut self, field: RegisterField, value: impl Into<String>) {
        *self.field_mut(field) = Some(value.into());
    }

    pub fn field(&self, field: RegisterField) -> Option<&str> {
        match field {
            RegisterField::Username => self.username.as_deref(),
            RegisterField::Name => self.name.as_deref(),
            RegisterField::BirthDate => self.birth_date.as_deref(),
            RegisterField::Password => self.password.as_deref(),
            RegisterField::ConfirmPassword => self.confirm_password.as_deref(),
        }
    }

    fn field_mut(&mut self, field: RegisterField) -> &mut Option<String> {
        match field {
            RegisterField::Username => &mut self.username,
            RegisterField::Name => &mut self.name,
            RegisterField::BirthDate => &mut self.birth_date,
            RegisterField::Password => &mut self.password,
            RegisterField::ConfirmPassword => &mut self.confirm_password,
        }
    }

    /// Every [required](RegisterField::REQUIRED) field has to be non-empty
    pub fn can_submit(&self) -> bool {
        RegisterField::REQUIRED.iter()
            .all(|field| self.field(*field).is_some_and(|value| !value.is_empty()))
    }

    /// Registers the entered user. \
    /// Mismatching passwords are caught before anything is sent.
    /// A taken username results in an alert, everything else the backend answers leads to the login.
    pub fn submit(&self) -> ActionOutcome {
        if !self.can_submit() {
            return ActionOutcome::Blocked;
        }
        if self.password != self.confirm_password {
            return ActionOutcome::Alerted(self.ctx.show(Alert::PasswordMismatch));
        }
        let registration = Registration {
            username: self.username.clone(),
            password: self.password.clone(),
            name: self.name.clone(),
            birth_date: self.birth_date.clone(),
        };
        match self.ctx.backend.register_user(&registration) {
            Ok(reply) if is_conflict(&reply) => ActionOutcome::Alerted(self.ctx.show(Alert::UsernameTaken)),
            Ok(_) => ActionOutcome::Navigated(self.ctx.navigate(Route::Login)),
            Err(err) => ActionOutcome::Alerted(self.ctx.show(Alert::from_error(&err, Alert::RegistrationFailed))),
        }
    }

    pub fn login_instead(&self) -> ActionOutcome {
        ActionOutcome::Navigated(self.ctx.navigate(Route::Login))
    }

}

/// The backend reports conflicts in the body. A created user has a textual `status` instead.
fn is_conflict(reply: &Value) -> bool {
    reply.get("status").and_then(Value::as_u64) == Some(CONFLICT_STATUS)
}
