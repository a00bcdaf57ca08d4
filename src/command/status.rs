use anyhow::Result;

use crate::config::AppConfig;
use crate::session::SessionStore;

pub fn run_status(config: &AppConfig) -> Result<()> {
    let store = SessionStore::new(&config.data_dir)?;

    match store.get_session()? {
        Some(session) => {
            println!("Logged in as {}", session.user);
            println!("   Session: {}", session.id);
            println!("   Created: {}", session.created_at);
            println!("   Stored in: {}", store.session_path().display());
        }
        None => {
            println!("Not logged in");
            println!("   Run 'scoopika login --user <name>' to create a session.");
        }
    }

    Ok(())
}
