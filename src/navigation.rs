use std::fmt::{Debug, Display, Formatter};
use std::sync::Mutex;

/// The screens a view can navigate to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Game,
    Login,
    Profile { user_id: String },
    ProfileEditor { user_id: String },
}

impl Route {

    /// The client side path of the route
    pub fn path(&self) -> String {
        match self {
            Route::Game => "/game".to_string(),
            Route::Login => "/login".to_string(),
            Route::Profile { user_id } => format!("/user/{}/profile", user_id),
            Route::ProfileEditor { user_id } => format!("/user/{}/profile/edit", user_id),
        }
    }

}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.path())
    }
}

/// Performs client side navigation
pub trait Navigator: Debug + Send + Sync {
    fn push(&self, route: Route);
}

/// A [`Navigator`], that records every visited route
#[derive(Debug, Default)]
pub struct History {
    entries: Mutex<Vec<Route>>,
}

impl History {

    /// Every route pushed so far, oldest first
    pub fn entries(&self) -> Vec<Route> {
        self.entries.lock()
            .map(|entries| (*entries).clone())
            .unwrap_or_default()
    }

    /// The route pushed last
    pub fn current(&self) -> Option<Route> {
        self.entries.lock().ok()?.last().cloned()
    }
}

impl Navigator for History {
    fn push(&self, route: Route) {
        log::debug!("Navigating to {}", route);
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(route);
        }
    }
}
