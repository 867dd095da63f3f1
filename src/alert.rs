use std::fmt::{Debug, Display, Formatter};
use std::sync::Mutex;
use once_cell::sync::Lazy;
use regex::Regex;

/// Message attached to requests, that never reached the backend
pub(crate) const FAILED_TO_FETCH: &str = "Failed to fetch";

static UNREACHABLE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)failed to fetch").unwrap());

/// A blocking message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// The backend could not be reached at all
    ServerUnreachable,
    /// Loading a profile failed for another reason
    ProfileUnavailable(String),
    /// Submitting a profile update failed for another reason
    UpdateFailed(String),
    /// Registering failed for another reason
    RegistrationFailed(String),
    /// The backend rejected the registration, because the username exists
    UsernameTaken,
    /// The password and its confirmation differ
    PasswordMismatch,
}

impl Display for Alert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Alert::ServerUnreachable => write!(f, "The server cannot be reached. Did you start it?"),
            Alert::ProfileUnavailable(message) => write!(f, "Something went wrong during viewing the profile: {}", message),
            Alert::UpdateFailed(message) => write!(f, "Can't redirect!: {}", message),
            Alert::RegistrationFailed(message) => write!(f, "Something went wrong during the registration: {}", message),
            Alert::UsernameTaken => write!(f, "The username was already taken.\nPlease choose a different username."),
            Alert::PasswordMismatch => write!(f, "The passwords do not match! Please re-enter the passwords."),
        }
    }
}

impl Alert {

    /// Turns a failed request into an alert. \
    /// Unreachable backends get [`Alert::ServerUnreachable`], everything else is handed to `otherwise` with the error message.
    pub fn from_error(err: &anyhow::Error, otherwise: impl FnOnce(String) -> Alert) -> Alert {
        if is_unreachable(err) {
            Alert::ServerUnreachable
        } else {
            otherwise(format!("{:#}", err))
        }
    }

}

/// Checks if any message in the error chain says the request failed to fetch
pub fn is_unreachable(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| UNREACHABLE_PATTERN.is_match(&cause.to_string()))
}

/// Shows alerts to the user
pub trait Notifier: Debug + Send + Sync {
    fn alert(&self, alert: &Alert);
}

/// A [`Notifier`], that only writes alerts to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, alert: &Alert) {
        log::warn!("{}", alert);
    }
}

/// A [`Notifier`], that logs and keeps every alert, so that a frontend can drain them
#[derive(Debug, Default)]
pub struct AlertLog {
    alerts: Mutex<Vec<Alert>>,
}

impl AlertLog {

    /// All alerts shown so far
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock()
            .map(|alerts| (*alerts).clone())
            .unwrap_or_default()
    }

    /// Removes and returns all alerts shown so far
    pub fn take(&self) -> Vec<Alert> {
        self.alerts.lock()
            .map(|mut alerts| std::mem::take(&mut *alerts))
            .unwrap_or_default()
    }
}

impl Notifier for AlertLog {
    fn alert(&self, alert: &Alert) {
        log::warn!("{}", alert);
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert.clone());
        }
    }
}


#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};
    use super::*;

    #[test]
    fn test_unreachable_detection() {
        assert!(is_unreachable(&anyhow!("Failed to fetch")));
        assert!(is_unreachable(&anyhow!("TypeError: failed to fetch")));
        let wrapped = Err::<(), _>(anyhow!("Failed to fetch"))
            .context("Could not load user 3")
            .unwrap_err();
        assert!(is_unreachable(&wrapped));
        assert!(!is_unreachable(&anyhow!("Unexpected status: 500")));
    }

    #[test]
    fn test_from_error() {
        let alert = Alert::from_error(&anyhow!("Failed to fetch"), Alert::ProfileUnavailable);
        assert_eq!(alert, Alert::ServerUnreachable);
        let alert = Alert::from_error(&anyhow!("expected value"), Alert::RegistrationFailed);
        assert_eq!(alert, Alert::RegistrationFailed("expected value".to_string()));
    }

    #[test]
    fn test_messages() {
        assert_eq!(Alert::ServerUnreachable.to_string(), "The server cannot be reached. Did you start it?");
        assert_eq!(Alert::UpdateFailed("boom".to_string()).to_string(), "Can't redirect!: boom");
        assert_eq!(
            Alert::ProfileUnavailable("boom".to_string()).to_string(),
            "Something went wrong during viewing the profile: boom"
        );
        assert!(Alert::UsernameTaken.to_string().starts_with("The username was already taken."));
    }

    #[test]
    fn test_alert_log() {
        let log = AlertLog::default();
        log.alert(&Alert::PasswordMismatch);
        log.alert(&Alert::UsernameTaken);
        assert_eq!(log.alerts(), vec![Alert::PasswordMismatch, Alert::UsernameTaken]);
        assert_eq!(log.take().len(), 2);
        assert!(log.alerts().is_empty());
    }
}
