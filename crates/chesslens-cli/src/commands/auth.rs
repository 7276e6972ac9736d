use crate::app::App;
use anyhow::Result;
use chesslens_core::auth::{AuthService, NewUser};
use colored::Colorize;

pub async fn login(app: &App, username: &str, password: &str) -> Result<()> {
    let credential = app.client.login(username, password).await?;
    app.credentials.save(&credential)?;
    app.session.login(credential);

    println!("{}", format!("Signed in as {username}").green());
    Ok(())
}

pub fn logout(app: &App) -> Result<()> {
    app.session.logout();
    if app.credentials.clear()? {
        println!("{}", "Signed out".green());
    } else {
        println!("Not signed in");
    }
    Ok(())
}

pub async fn register(app: &App, username: String, email: String, password: String) -> Result<()> {
    let user = app
        .client
        .register(&NewUser {
            username,
            email,
            password,
        })
        .await?;

    println!(
        "{}",
        format!("Registered {} <{}> (id {})", user.username, user.email, user.id).green()
    );
    println!("Run `chesslens login {}` to sign in.", user.username);
    Ok(())
}
