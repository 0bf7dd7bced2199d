//! Handlers for `login` and `logout`.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password};

use crate::api::JournalClient;
use crate::error::Result;

use super::{output, LoginArgs};

/// Execute `tradelog login`.
pub async fn execute(client: &JournalClient, args: LoginArgs) -> Result<()> {
    let theme = ColorfulTheme::default();

    let email = match args.email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };
    let password = Password::with_theme(&theme)
        .with_prompt("Password")
        .interact()?;

    client.login(&email, &password).await?;
    output::success(format!("signed in as {email}"));
    Ok(())
}

/// Execute `tradelog logout`.
pub async fn execute_logout(client: &JournalClient) -> Result<()> {
    client.logout().await?;
    output::success("signed out");
    Ok(())
}
