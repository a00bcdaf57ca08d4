use anyhow::Result;

use crate::config::AppConfig;
use crate::session::{SessionStore, SESSION_COOKIE};

pub fn run_login(config: &AppConfig, user: &str) -> Result<()> {
    let user = user.trim();
    if user.is_empty() {
        anyhow::bail!("User name must not be empty");
    }

    let store = SessionStore::new(&config.data_dir)?;

    if let Some(existing) = store.get_session()? {
        println!(
            "Replacing the existing session for {} (created {}).",
            existing.user, existing.created_at
        );
    }

    let (session, token) = store.create_session(user)?;

    println!("Signed in as {}", session.user);
    println!("   Session: {}", session.id);
    println!("\nSet this cookie in your browser to use the session:");
    println!("   {}={}", SESSION_COOKIE, token);
    println!("\nThe token is not stored and cannot be shown again.");

    Ok(())
}
