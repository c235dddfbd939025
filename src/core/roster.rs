//! # Roster
//!
//! The list of known users that `@username` tokens resolve against.
//! The caller owns the roster and hands it to every segmentation call;
//! nothing here caches it between calls.
//!
//! Rosters usually come straight from the user-search API, so
//! `RosterUser` accepts that payload's field names (`_id`, `full_name`)
//! alongside its own.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RosterUser {
    #[serde(alias = "_id")]
    pub id: String,
    pub username: String,
    #[serde(default, alias = "full_name", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl RosterUser {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            display_name: None,
        }
    }

    /// Display name when present, otherwise the username.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// Username → user lookup table, built once per call.
///
/// Matching is exact and case-sensitive. If two entries share a username,
/// the first one in the slice wins.
#[derive(Debug, Default)]
pub struct Roster<'a> {
    by_username: HashMap<&'a str, &'a RosterUser>,
}

impl<'a> Roster<'a> {
    pub fn new(users: &'a [RosterUser]) -> Self {
        let mut by_username = HashMap::with_capacity(users.len());
        for user in users {
            by_username.entry(user.username.as_str()).or_insert(user);
        }
        Self { by_username }
    }

    pub fn get(&self, username: &str) -> Option<&'a RosterUser> {
        self.by_username.get(username).copied()
    }

    pub fn len(&self) -> usize {
        self.by_username.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_username.is_empty()
    }
}

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug)]
pub enum RosterError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::Io(e) => write!(f, "roster I/O error: {e}"),
            RosterError::Parse(e) => write!(f, "roster parse error: {e}"),
        }
    }
}

impl std::error::Error for RosterError {}

/// Either a bare array of users or the `{ "users": [...] }` search response.
#[derive(Deserialize)]
#[serde(untagged)]
enum RosterFile {
    Users(Vec<RosterUser>),
    Search { users: Vec<RosterUser> },
}

/// Parse a roster from JSON text.
pub fn parse_roster(json: &str) -> Result<Vec<RosterUser>, RosterError> {
    let users = match serde_json::from_str(json).map_err(RosterError::Parse)? {
        RosterFile::Users(users) | RosterFile::Search { users } => users,
    };
    debug!("Parsed roster with {} users", users.len());
    Ok(users)
}

/// Load a roster from a JSON file.
pub fn load_roster(path: &Path) -> Result<Vec<RosterUser>, RosterError> {
    let contents = fs::read_to_string(path).map_err(RosterError::Io)?;
    let users = parse_roster(&contents)?;
    info!("Loaded {} roster users from {}", users.len(), path.display());
    Ok(users)
}
