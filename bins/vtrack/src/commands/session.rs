//! Session commands

use super::{print_json, Context};
use anyhow::{Context as _, Result};
use serde_json::json;
use std::path::PathBuf;
use tracing::info;
use vatavaran_cli::output::Status;
use vatavaran_core::session::{Role, Session, SessionStore, UserProfile};
use vatavaran_core::Error;

/// Session store at `file`, or at the default data location.
pub fn open_store(file: Option<PathBuf>) -> Result<vatavaran_core::session::FileStore> {
    use vatavaran_core::session::FileStore;

    match file {
        Some(path) => Ok(FileStore::new(path)),
        None => FileStore::default_location().context("no data directory available; pass --file"),
    }
}

/// Save a new session
pub fn login(ctx: &Context, store: &impl SessionStore, token: String, name: String, role: Role) -> Result<()> {
    let user = UserProfile {
        id: None,
        name,
        email: None,
        role,
    };
    let session = Session::new(token, user)?;
    store.save(&session)?;
    info!(role = %role, "signed in");

    if ctx.is_json() {
        return print_json(&json!({
            "user": session.user(),
            "redirect": session.landing_path(),
        }));
    }

    Status::success(&format!("Signed in as {} ({})", session.user().name, role));
    Status::info(&format!("Continue from {}", session.landing_path()));
    Ok(())
}

/// Forget the saved session
pub fn logout(ctx: &Context, store: &impl SessionStore) -> Result<()> {
    store.clear()?;

    if ctx.is_json() {
        return print_json(&json!({ "redirect": "/login" }));
    }

    Status::success("Signed out");
    Ok(())
}

/// Show the saved session
pub fn status(ctx: &Context, store: &impl SessionStore) -> Result<()> {
    let session = store.load()?;

    if ctx.is_json() {
        return print_json(&json!({
            "authenticated": session.is_some(),
            "user": session.as_ref().map(Session::user),
        }));
    }

    match session {
        Some(s) => Status::info(&format!("Signed in as {} ({})", s.user().name, s.role())),
        None => Status::info("Not signed in"),
    }
    Ok(())
}

/// Check the saved session against the roles a page allows
pub fn check(ctx: &Context, store: &impl SessionStore, allow: &[Role]) -> Result<()> {
    let session = store.load()?;

    match Session::require(session.as_ref(), allow) {
        Ok(s) => {
            if ctx.is_json() {
                return print_json(&json!({ "allowed": true, "role": s.role() }));
            }
            Status::success(&format!("{} may open this page", s.role()));
            Ok(())
        }
        Err(denied) => {
            if ctx.is_json() {
                print_json(&json!({ "allowed": false, "redirect": denied.redirect_path() }))?;
            }
            Err(Error::from(denied).into())
        }
    }
}
