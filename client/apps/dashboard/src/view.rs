//! Terminal view layer
//!
//! Renders dashboard pages and flow notices as plain text. Every page visit
//! goes through the route table and guard first, exactly as a browser
//! navigation would.

use std::fmt::Write as _;

use auth::handlers::AuthAppState;
use auth::presentation::{breadcrumb, navigate, sidebar_identity};
use auth::{IdentityProvider, Navigation, Route, RouteGuard, User};
use kernel::id::UserId;
use kernel::notice::Notice;
use platform::task::{ScopedTask, ViewScope};
use reels::domain::repository::{ReelRepository, SubmissionRepository};
use reels::handlers::{self as reel_handlers, ReelView, ReelsAppState};
use reels::models::Submission;
use serde::Serialize;

/// Redirect hops followed before giving up on a path
const MAX_REDIRECTS: usize = 4;

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arrival {
    Page { path: String, route: Route },
    /// Session still loading
    Placeholder,
    /// Redirect chain did not settle
    Lost { path: String },
}

/// The dashboard as one process sees it
pub struct Dashboard<P, R> {
    pub auth: AuthAppState<P>,
    pub reels: ReelsAppState<R>,
    pub guard: RouteGuard,
    pub json: bool,
}

impl<P, R> Dashboard<P, R>
where
    P: IdentityProvider + Send + Sync + 'static,
    R: ReelRepository + SubmissionRepository + Send + Sync + 'static,
{
    /// Follow `path` through the route table and guard
    pub fn arrive(&self, path: &str) -> Arrival {
        let session = self.auth.store.snapshot();
        let mut path = path.to_string();

        for _ in 0..MAX_REDIRECTS {
            match navigate(&path, &self.guard, &session) {
                Navigation::Render(route) => return Arrival::Page { path, route },
                Navigation::Placeholder => return Arrival::Placeholder,
                Navigation::Redirect(intent) => {
                    tracing::debug!(from = %path, to = %intent.to, replace = intent.replace, "Redirect");
                    path = intent.to;
                }
            }
        }

        Arrival::Lost { path }
    }

    fn owner(&self) -> Option<UserId> {
        self.auth.store.snapshot().user().map(|u| u.id.clone())
    }

    /// Render the page a navigation arrived at
    pub async fn show(&self, arrival: Arrival) -> anyhow::Result<bool> {
        let (path, route) = match arrival {
            Arrival::Page { path, route } => (path, route),
            Arrival::Placeholder => {
                println!("Loading...");
                return Ok(true);
            }
            Arrival::Lost { path } => {
                tracing::warn!(%path, "Navigation did not settle");
                println!("{}", Notice::error(format!("Could not open {path}")));
                return Ok(false);
            }
        };

        if !route.is_protected() {
            println!("{}", public_page(&route));
            return Ok(true);
        }

        let session = self.auth.store.snapshot();
        println!("{}", header(&path, session.user()));

        let Some(owner) = session.user().map(|u| u.id.clone()) else {
            return Ok(false);
        };

        let scope = ViewScope::new(view_name(&route));
        match route {
            Route::MyReels => {
                let task = reel_handlers::open_my_reels(&scope, &self.reels, owner);
                self.present(&scope, task, render_reels).await
            }
            Route::Create => {
                let task = reel_handlers::open_owner_submissions(&scope, &self.reels, owner);
                self.present(&scope, task, render_submissions).await
            }
            Route::Submissions { reel_id } => {
                let task = reel_handlers::open_reel_submissions(&scope, &self.reels, reel_id);
                self.present(&scope, task, render_submissions).await
            }
            Route::ConnectMe => {
                println!("{}", connect_me());
                Ok(true)
            }
            Route::Login | Route::Signup => Ok(true),
        }
    }

    /// Submit the create form, then show the page it lives on
    pub async fn create(&self, url: &str) -> anyhow::Result<bool> {
        let arrival = self.arrive("/dashboard/create");
        if !matches!(arrival, Arrival::Page { route: Route::Create, .. }) {
            return self.show(arrival).await;
        }

        let owner = self.owner();
        let ok = match reel_handlers::create_reel(&self.reels, owner.as_ref(), url).await {
            Ok(created) => {
                println!("{}", created.notice);
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&CreatedJson::from(&created.reel))?);
                } else {
                    println!("ReelID:     {}", created.reel.reel_id);
                    println!("Share link: {}", created.reel.share_link);
                }
                true
            }
            Err(notice) => {
                println!("{notice}");
                false
            }
        };

        Ok(self.show(arrival).await? && ok)
    }

    /// Wait for a scoped fetch; Ctrl-C closes the view and drops its result
    async fn present<T, F>(
        &self,
        scope: &ViewScope,
        task: ScopedTask<Result<Vec<T>, Notice>>,
        text: F,
    ) -> anyhow::Result<bool>
    where
        T: Serialize,
        F: FnOnce(&[T]) -> String,
    {
        let result = tokio::select! {
            result = task.join() => result,
            _ = tokio::signal::ctrl_c() => {
                scope.close();
                None
            }
        };

        match result {
            Some(Ok(items)) if self.json => {
                println!("{}", serde_json::to_string_pretty(&items)?);
                Ok(true)
            }
            Some(Ok(items)) => {
                println!("{}", text(&items));
                Ok(true)
            }
            Some(Err(notice)) => {
                println!("{notice}");
                Ok(false)
            }
            None => {
                tracing::warn!(view = scope.view(), "View closed before its data arrived");
                Ok(false)
            }
        }
    }
}

#[derive(Serialize)]
struct CreatedJson<'a> {
    reel_id: &'a str,
    share_link: &'a str,
}

impl<'a> From<&'a reels::application::CreateReelOutput> for CreatedJson<'a> {
    fn from(output: &'a reels::application::CreateReelOutput) -> Self {
        Self {
            reel_id: output.reel_id.as_str(),
            share_link: &output.share_link,
        }
    }
}

/// `whoami` payload
#[derive(Debug, Serialize)]
pub struct Identity<'a> {
    pub user: Option<&'a User>,
    pub name: String,
    pub initial: char,
}

impl<'a> Identity<'a> {
    pub fn new(user: Option<&'a User>) -> Self {
        let (name, initial) = sidebar_identity(user);
        Self { user, name, initial }
    }
}

impl std::fmt::Display for Identity<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.user {
            Some(user) => write!(f, "[{}] {} <{}>", self.initial, self.name, user.email),
            None => f.write_str("Not signed in"),
        }
    }
}

fn view_name(route: &Route) -> &'static str {
    match route {
        Route::Login => "login",
        Route::Signup => "signup",
        Route::Create => "create",
        Route::MyReels => "reels",
        Route::Submissions { .. } => "submissions",
        Route::ConnectMe => "connect-me",
    }
}

/// Breadcrumb line plus sidebar identity
pub fn header(path: &str, user: Option<&User>) -> String {
    let (name, initial) = sidebar_identity(user);
    format!("{}    [{initial}] {name}", breadcrumb(path))
}

fn public_page(route: &Route) -> String {
    match route {
        Route::Signup => "Sign up: dashboard signup --email <EMAIL> --name <NAME>".to_string(),
        _ => "Log in: dashboard login --email <EMAIL>".to_string(),
    }
}

/// The route exists; its page content is not part of the dashboard
fn connect_me() -> String {
    "Connect Me".to_string()
}

pub fn render_reels(views: &[ReelView]) -> String {
    if views.is_empty() {
        return "No ReelIDs yet.".to_string();
    }

    let mut out = String::new();
    for view in views {
        let _ = writeln!(
            out,
            "{}  {}  ->  {}",
            view.reel.reel_id, view.share_link, view.reel.redirect_url
        );
    }
    out.trim_end().to_string()
}

pub fn render_submissions(submissions: &[Submission]) -> String {
    if submissions.is_empty() {
        return "No submissions yet.".to_string();
    }

    let mut out = String::new();
    for s in submissions {
        let _ = writeln!(
            out,
            "{}  {}  {}  {}",
            s.created_at.format("%Y-%m-%d %H:%M"),
            s.reel_id,
            s.name,
            s.username
        );
    }
    out.trim_end().to_string()
}
