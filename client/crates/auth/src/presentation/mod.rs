//! Presentation Layer
//!
//! Route table, route guard, and flow handlers for the view layer.

pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AuthAppState, Outcome};
pub use middleware::{GuardDecision, RouteGuard};
pub use router::{Navigation, NavigationIntent, Resolution, Route, breadcrumb, navigate, resolve, sidebar_identity};
