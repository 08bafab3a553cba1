use invsync_api::{Credentials, RegisterPayload};
use invsync_core::AppConfig;

/// Log in and print the captured session token so it can be exported as
/// `INVSYNC_SESSION_TOKEN` for later commands.
///
/// # Errors
///
/// Returns an error when the login call fails.
pub(crate) async fn run_login(
    config: &AppConfig,
    username: String,
    password: String,
) -> anyhow::Result<()> {
    let mut client = super::build_client(config)?;
    let message = client.login(&Credentials { username, password }).await?;
    println!("{message}");

    match client.session() {
        Some(token) => println!("export INVSYNC_SESSION_TOKEN={}", token.as_str()),
        None => tracing::warn!("login succeeded but no session token was returned"),
    }
    Ok(())
}

/// Register a user; credentials are forwarded as-is.
///
/// # Errors
///
/// Returns an error when the register call fails.
pub(crate) async fn run_register(
    config: &AppConfig,
    username: String,
    email: String,
    password: String,
) -> anyhow::Result<()> {
    let client = super::build_client(config)?;
    let message = client
        .register(&RegisterPayload {
            username,
            email,
            password,
        })
        .await?;
    println!("{message}");
    Ok(())
}

/// Log out, clearing the server session.
///
/// # Errors
///
/// Returns an error when the logout call fails.
pub(crate) async fn run_logout(config: &AppConfig) -> anyhow::Result<()> {
    let mut client = super::build_client(config)?;
    client.logout().await?;
    println!("Logged out");
    Ok(())
}
