//! Dashboard Router
//!
//! Route table for the dashboard views. Resolution is pure; the view layer
//! turns [`Navigation`] values into whatever "changing page" means for it.
//!
//! | Path                             | Result                                  |
//! |----------------------------------|-----------------------------------------|
//! | `/login`, `/signup`              | public pages                            |
//! | `/dashboard`                     | guarded, then replace to `/dashboard/reels` |
//! | `/dashboard/create`              | guarded                                 |
//! | `/dashboard/reels`               | guarded                                 |
//! | `/dashboard/submissions/:reelId` | guarded                                 |
//! | `/dashboard/connect-me`          | guarded                                 |
//! | anything else                    | replace to `/dashboard`                 |

use crate::application::session_store::SessionState;
use crate::domain::entity::user::User;
use crate::presentation::middleware::{GuardDecision, RouteGuard};

const DASHBOARD: &str = "dashboard";

/// A renderable page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Create,
    MyReels,
    Submissions { reel_id: String },
    ConnectMe,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Create => "/dashboard/create".to_string(),
            Route::MyReels => "/dashboard/reels".to_string(),
            Route::Submissions { reel_id } => format!("/dashboard/submissions/{reel_id}"),
            Route::ConnectMe => "/dashboard/connect-me".to_string(),
        }
    }

    /// Whether rendering requires a signed-in user
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login | Route::Signup)
    }
}

/// Abstract "go there" signal for the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub to: String,
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,
}

impl NavigationIntent {
    pub fn push(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: false,
        }
    }

    pub fn replace(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            replace: true,
        }
    }
}

/// Static meaning of a path, before any guard runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(Route),
    /// Redirect that only applies to a signed-in user (inside the dashboard)
    GuardedRedirect(NavigationIntent),
    Redirect(NavigationIntent),
}

/// What to do for a navigation given the current session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    /// Session still loading: show a neutral placeholder
    Placeholder,
    Redirect(NavigationIntent),
}

/// Look a path up in the route table
pub fn resolve(path: &str) -> Resolution {
    let segments = segments(path);

    match segments.as_slice() {
        ["login"] => Resolution::Page(Route::Login),
        ["signup"] => Resolution::Page(Route::Signup),
        [DASHBOARD, "create"] => Resolution::Page(Route::Create),
        [DASHBOARD, "reels"] => Resolution::Page(Route::MyReels),
        [DASHBOARD, "submissions", reel_id] => Resolution::Page(Route::Submissions {
            reel_id: (*reel_id).to_string(),
        }),
        [DASHBOARD, "connect-me"] => Resolution::Page(Route::ConnectMe),
        [DASHBOARD, ..] => Resolution::GuardedRedirect(NavigationIntent::replace(Route::MyReels.path())),
        _ => Resolution::Redirect(NavigationIntent::replace("/dashboard")),
    }
}

/// Resolve `path` and run the guard over protected destinations
pub fn navigate(path: &str, guard: &RouteGuard, session: &SessionState) -> Navigation {
    match resolve(path) {
        Resolution::Redirect(intent) => Navigation::Redirect(intent),
        Resolution::Page(route) if !route.is_protected() => Navigation::Render(route),
        Resolution::Page(route) => match guard.evaluate(session) {
            GuardDecision::Allow => Navigation::Render(route),
            GuardDecision::Pending => Navigation::Placeholder,
            GuardDecision::Redirect(intent) => Navigation::Redirect(intent),
        },
        Resolution::GuardedRedirect(target) => match guard.evaluate(session) {
            GuardDecision::Allow => Navigation::Redirect(target),
            GuardDecision::Pending => Navigation::Placeholder,
            GuardDecision::Redirect(intent) => Navigation::Redirect(intent),
        },
    }
}

/// Header breadcrumb: `Dashboard` or `Dashboard > Page`
pub fn breadcrumb(path: &str) -> String {
    let segments = segments(path);
    match segments.get(1) {
        Some(page) => format!("Dashboard > {}", capitalize(page)),
        None => "Dashboard".to_string(),
    }
}

/// Sidebar name and avatar initial for the signed-in user (if any)
pub fn sidebar_identity(user: Option<&User>) -> (String, char) {
    match user {
        Some(user) => (user.display_name().to_string(), user.initial()),
        None => ("Admin User".to_string(), 'A'),
    }
}

fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
