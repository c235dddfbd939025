//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::roster::RosterUser;

/// A roster user with no display name.
pub fn user(id: &str, username: &str) -> RosterUser {
    RosterUser::new(id, username)
}

/// alice (1), carol (2, "Carol King"), erin (3, "Erin Vega").
pub fn roster() -> Vec<RosterUser> {
    let mut carol = user("2", "carol");
    carol.display_name = Some("Carol King".to_string());
    let mut erin = user("3", "erin");
    erin.display_name = Some("Erin Vega".to_string());
    vec![user("1", "alice"), carol, erin]
}
