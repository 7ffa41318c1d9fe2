//! Application Configuration
//!
//! Configuration for the Auth application layer.

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Provider metadata key holding the display name
    pub display_name_key: String,
    /// Unauthenticated entry point
    pub login_path: String,
    /// Where a successful sign-in or sign-up lands
    pub home_path: String,
    /// Capacity of the provider's change-notification channel
    pub event_capacity: usize,
    /// Notice texts for the auth flows
    pub messages: AuthMessages,
}

/// Notice texts shown after each auth flow
#[derive(Debug, Clone)]
pub struct AuthMessages {
    pub signed_in: String,
    pub sign_in_failed: String,
    pub signed_up: String,
    pub sign_up_failed: String,
    pub signed_out: String,
    pub sign_out_failed: String,
}

impl Default for AuthMessages {
    fn default() -> Self {
        Self {
            signed_in: "Logged in successfully!".to_string(),
            sign_in_failed: "Failed to login.".to_string(),
            signed_up: "Account created successfully!".to_string(),
            sign_up_failed: "Failed to sign up.".to_string(),
            signed_out: "Logged out successfully!".to_string(),
            sign_out_failed: "Failed to logout.".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            display_name_key: "full_name".to_string(),
            login_path: "/login".to_string(),
            home_path: "/dashboard".to_string(),
            event_capacity: 16,
            messages: AuthMessages::default(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (roomier event buffer for chatty local stacks)
    pub fn development() -> Self {
        Self {
            event_capacity: 64,
            ..Default::default()
        }
    }
}
