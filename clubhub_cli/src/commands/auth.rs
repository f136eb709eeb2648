use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::Args;
use clubhub_lib::types::{AdminCredentials, AdminRegistration};
use clubhub_lib::validation;
use clubhub_lib::CachedClient;

use crate::output::{print_admin, OutputFormat};

/// Read from the environment before falling back to a stdin prompt.
const PASSWORD_VAR: &str = "CLUBHUB_PASSWORD";

#[derive(Args)]
pub struct LoginArgs {
    /// Admin username
    #[arg(long)]
    pub username: String,

    /// Register a new admin account with this email before logging in
    #[arg(long)]
    pub register: Option<String>,
}

fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_VAR) {
        if !password.is_empty() {
            return Ok(password);
        }
    }
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        bail!("password must not be empty");
    }
    Ok(password)
}

pub async fn login(args: &LoginArgs, client: &CachedClient) -> Result<()> {
    let username = validation::validate_name(&args.username)?;
    let password = read_password()?;

    if let Some(ref email) = args.register {
        let email = validation::validate_email(email)?;
        let registered = client
            .register(&AdminRegistration {
                username: username.clone(),
                password: password.clone(),
                email,
            })
            .await?;
        eprintln!("{} (id {})", registered.message, registered.admin_id);
    }

    let session = client
        .login(&AdminCredentials { username, password })
        .await?;
    eprintln!("Logged in as {} <{}>", session.admin.username, session.admin.email);
    Ok(())
}

pub fn logout(client: &CachedClient) -> Result<()> {
    if client.is_logged_in() {
        client.logout();
        eprintln!("Logged out.");
    } else {
        eprintln!("No active session.");
    }
    Ok(())
}

pub async fn whoami(client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let admin = client.current_admin().await?;
    print_admin(&admin, format)
}
