use anyhow::Result;

use crate::config::AppConfig;
use crate::session::SessionStore;

pub fn run_logout(config: &AppConfig) -> Result<()> {
    let store = SessionStore::new(&config.data_dir)?;

    if !store.is_logged_in()? {
        println!("You are not logged in.");
        return Ok(());
    }

    store.remove_session()?;
    println!("Successfully logged out.");

    Ok(())
}
