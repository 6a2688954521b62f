//! Login sessions and role-based access
//!
//! A [`Session`] is an explicit value handed to whatever needs it; nothing in
//! this module keeps global state. Persistence goes through a
//! [`SessionStore`], with an in-memory store for tests and a JSON file store
//! for the command line.

use crate::error::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// User role, as issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Field staff logging pickups
    Staff,
    /// Reviews pickups
    Supervisor,
    /// Manages users and sees everything
    Admin,
}

impl Role {
    /// Landing page for the role.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::Staff => "/staff",
            Role::Supervisor => "/supervisor",
            Role::Admin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Staff => "STAFF",
            Role::Supervisor => "SUPERVISOR",
            Role::Admin => "ADMIN",
        };
        f.write_str(name)
    }
}

/// Profile returned by the backend at login.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Backend user id
    #[serde(default)]
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Login email
    #[serde(default)]
    pub email: Option<String>,
    /// Granted role
    pub role: Role,
}

/// An authenticated user.
///
/// Deserializing applies the same checks as [`Session::new`].
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSession")]
pub struct Session {
    token: String,
    user: UserProfile,
}

/// Unchecked wire form of [`Session`].
#[derive(Deserialize)]
struct RawSession {
    token: String,
    user: UserProfile,
}

impl TryFrom<RawSession> for Session {
    type Error = Error;

    fn try_from(raw: RawSession) -> Result<Self> {
        Session::new(raw.token, raw.user)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

/// Why a page refused to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// No session at all
    NotAuthenticated,
    /// Signed in, but the page is for other roles
    WrongRole(Role),
}

impl AccessDenied {
    /// Where the user should be sent instead.
    pub fn redirect_path(&self) -> &'static str {
        match self {
            AccessDenied::NotAuthenticated => "/login",
            AccessDenied::WrongRole(role) => role.dashboard_path(),
        }
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessDenied::NotAuthenticated => f.write_str("not signed in"),
            AccessDenied::WrongRole(role) => write!(f, "role {} may not open this page", role),
        }
    }
}

impl From<AccessDenied> for Error {
    fn from(denied: AccessDenied) -> Self {
        match denied {
            AccessDenied::NotAuthenticated => Error::not_authenticated(),
            AccessDenied::WrongRole(_) => Error::unauthorized(denied.to_string())
                .with_suggestion(format!("Continue from {}", denied.redirect_path())),
        }
    }
}

impl Session {
    /// Starts a session from a login response. The token must not be blank.
    pub fn new(token: impl Into<String>, user: UserProfile) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::validation("session token is empty"));
        }
        Ok(Self { token, user })
    }

    /// Access token issued at login.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Signed-in user.
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Role of the signed-in user.
    pub fn role(&self) -> Role {
        self.user.role
    }

    /// `Authorization` header value for backend requests.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// Page to open right after login.
    pub fn landing_path(&self) -> &'static str {
        self.role().dashboard_path()
    }

    /// Gatekeeper for a page restricted to `allowed` roles (any role when empty).
    ///
    /// # Example
    /// ```
    /// use vatavaran_core::session::{AccessDenied, Role, Session, UserProfile};
    ///
    /// let user = UserProfile { id: None, name: "Asha".into(), email: None, role: Role::Staff };
    /// let session = Session::new("token", user).unwrap();
    ///
    /// assert!(Session::require(Some(&session), &[Role::Staff]).is_ok());
    /// let denied = Session::require(Some(&session), &[Role::Admin]).unwrap_err();
    /// assert_eq!(denied.redirect_path(), "/staff");
    /// assert_eq!(Session::require(None, &[]).unwrap_err().redirect_path(), "/login");
    /// ```
    pub fn require<'a>(
        session: Option<&'a Session>,
        allowed: &[Role],
    ) -> std::result::Result<&'a Session, AccessDenied> {
        let session = session.ok_or(AccessDenied::NotAuthenticated)?;
        if allowed.is_empty() || allowed.contains(&session.role()) {
            Ok(session)
        } else {
            debug!(role = %session.role(), ?allowed, "access denied");
            Err(AccessDenied::WrongRole(session.role()))
        }
    }
}

/// Where sessions live between runs.
pub trait SessionStore {
    /// The saved session, if any.
    fn load(&self) -> Result<Option<Session>>;
    /// Replace the saved session.
    fn save(&self, session: &Session) -> Result<()>;
    /// Forget the saved session (logout).
    fn clear(&self) -> Result<()>;
}

/// Session kept in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    session: Mutex<Option<Session>>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Session>> {
        // A poisoned lock still holds a consistent Option.
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Session>> {
        Ok(self.slot().clone())
    }

    fn save(&self, session: &Session) -> Result<()> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}

/// Session persisted as a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/vatavaran/session.json`, if the platform has a data dir.
    pub fn default_location() -> Option<Self> {
        dirs::data_local_dir().map(|dir| Self::new(dir.join("vatavaran").join("session.json")))
    }

    /// File backing the store
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Result<Option<Session>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::from(e).with_context(format!("Reading {}", self.path.display())));
            }
        };
        let session: Session = serde_json::from_str(&content)
            .map_err(Error::from)
            .context(format!("Parsing session file {}", self.path.display()))?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)
            .map_err(Error::from)
            .context(format!("Writing {}", self.path.display()))?;
        debug!(path = %self.path.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::from(e)),
        }
    }
}
