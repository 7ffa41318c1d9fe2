//! Dashboard Entry Point
//!
//! Loads configuration, starts the session store, and runs one dashboard
//! interaction from the command line.
//! Uses `anyhow` for startup errors, but flow errors are shown as notices.

mod cli;
mod view;

use std::process::ExitCode;
use std::sync::Arc;

use auth::application::{SignInInput, SignUpInput};
use auth::handlers::{self as auth_handlers, AuthAppState};
use auth::{AuthConfig, GoTrueProvider, IdentityClient, RouteGuard, SessionStore};
use clap::Parser;
use kernel::error::app_error::{AppError, ResultExt};
use kernel::error::kind::ErrorKind;
use platform::client::ProviderClient;
use platform::{ProviderConfig, SessionTokens};
use reels::handlers::ReelsAppState;
use reels::{PostgrestRepository, ReelsConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Command};
use crate::view::{Dashboard, Identity};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dashboard=info,auth=info,reels=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Provider configuration
    let provider_config = ProviderConfig::from_env().map_err(|e| {
        AppError::configuration(e.to_string())
            .with_action("Set SUPABASE_URL and SUPABASE_ANON_KEY (a .env file works)")
            .with_source(e)
    })?;

    let tokens = match &provider_config.session_file {
        Some(path) => SessionTokens::persisted(path).await,
        None => SessionTokens::in_memory(),
    };

    let client = ProviderClient::new(&provider_config, tokens).map_app_err(
        ErrorKind::Configuration,
        "Could not build the provider HTTP client",
    )?;

    tracing::info!(provider = %provider_config.base_url, "Provider configured");

    // Auth
    let auth_config = Arc::new(if cfg!(debug_assertions) {
        AuthConfig::development()
    } else {
        AuthConfig::default()
    });

    let provider = Arc::new(GoTrueProvider::new(client.clone(), &auth_config));
    let identity = IdentityClient::new(provider, auth_config.clone());

    let store = SessionStore::start(&identity);
    store.follow(identity.on_auth_change());

    let mut transitions = store.subscribe();
    tokio::spawn(async move {
        while transitions.changed().await.is_ok() {
            let state = transitions.borrow_and_update().clone();
            tracing::debug!(
                loading = state.loading,
                authenticated = state.is_authenticated(),
                "Session state changed"
            );
        }
    });

    let session = store.settled().await;
    tracing::debug!(authenticated = session.is_authenticated(), "Session settled");

    // Reels
    let reels_config = Arc::new(ReelsConfig::from_env());
    let repo = Arc::new(PostgrestRepository::new(client));

    let dashboard = Dashboard {
        auth: AuthAppState {
            client: identity,
            store: store.clone(),
            config: auth_config.clone(),
        },
        reels: ReelsAppState {
            repo,
            config: reels_config,
        },
        guard: RouteGuard::new(&auth_config),
        json: cli.json,
    };

    let ok = run(&dashboard, cli.command).await;
    store.teardown();

    Ok(if ok? { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run(
    dashboard: &Dashboard<GoTrueProvider, PostgrestRepository>,
    command: Command,
) -> anyhow::Result<bool> {
    let path = command.path();

    match command {
        Command::Signup {
            email,
            password,
            display_name,
        } => {
            let input = SignUpInput {
                email,
                password,
                display_name,
            };
            let outcome = auth_handlers::sign_up(&dashboard.auth, input).await;
            println!("{}", outcome.notice);
            follow_outcome(dashboard, outcome.navigation.map(|n| n.to)).await?;
            Ok(outcome.value.is_some())
        }
        Command::Login { email, password } => {
            let outcome = auth_handlers::sign_in(&dashboard.auth, SignInInput { email, password }).await;
            println!("{}", outcome.notice);
            follow_outcome(dashboard, outcome.navigation.map(|n| n.to)).await?;
            Ok(outcome.value.is_some())
        }
        Command::Logout => {
            let outcome = auth_handlers::sign_out(&dashboard.auth).await;
            println!("{}", outcome.notice);
            Ok(outcome.is_success())
        }
        Command::Whoami => {
            let session = dashboard.auth.store.snapshot();
            let identity = Identity::new(session.user());
            if dashboard.json {
                println!("{}", serde_json::to_string_pretty(&identity)?);
            } else {
                println!("{identity}");
            }
            Ok(true)
        }
        Command::Create { url } => dashboard.create(&url).await,
        Command::Open { .. } | Command::Reels | Command::Submissions { .. } => {
            let Some(path) = path else {
                return Ok(false);
            };
            dashboard.show(dashboard.arrive(&path)).await
        }
    }
}

/// Land on the page a successful auth flow navigated to
async fn follow_outcome(
    dashboard: &Dashboard<GoTrueProvider, PostgrestRepository>,
    to: Option<String>,
) -> anyhow::Result<()> {
    if let Some(to) = to {
        dashboard.show(dashboard.arrive(&to)).await?;
    }
    Ok(())
}
