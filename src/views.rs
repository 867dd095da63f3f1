pub mod profile;
pub mod profile_editor;
pub mod register;

use std::sync::Arc;
use crate::alert::{Alert, Notifier};
use crate::api::UserBackend;
use crate::navigation::{Navigator, Route};
use crate::session::SessionStore;

pub use profile::ProfileView;
pub use profile_editor::{EditorField, ProfileEditor};
pub use register::{RegisterField, RegisterForm};

/// Everything a view depends on. Cheap to clone, all parts are shared.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub backend: Arc<dyn UserBackend>,
    pub session: Arc<dyn SessionStore>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
}

impl ViewContext {

    pub(crate) fn navigate(&self, route: Route) -> Route {
        self.navigator.push(route.clone());
        route
    }

    pub(crate) fn show(&self, alert: Alert) -> Alert {
        self.notifier.alert(&alert);
        alert
    }

}

/// What a user action ended in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The view navigated away
    Navigated(Route),
    /// An alert was shown, the view stays
    Alerted(Alert),
    /// The view navigated away and the request failed afterwards
    NavigatedWithAlert(Route, Alert),
    /// The control was disabled, nothing happened
    Blocked,
}
