// SPDX-License-Identifier: MPL-2.0
//! Sign-in gate for interactive actions.
//!
//! An action runs right away for a signed-in user. Otherwise it is dropped
//! and the caller prompts for sign-in; nothing is replayed after login.

/// Outcome of a gated action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gated<T> {
    Ran(T),
    SignInRequired,
}

/// Runs `action` with the current user id, if there is one.
pub fn gate<T>(user_id: Option<&str>, action: impl FnOnce(&str) -> T) -> Gated<T> {
    match user_id {
        Some(user_id) => Gated::Ran(action(user_id)),
        None => Gated::SignInRequired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_in_action_runs_immediately() {
        let mut ran = false;
        let outcome = gate(Some("u1"), |user| {
            ran = true;
            user.to_string()
        });
        assert!(ran);
        assert_eq!(outcome, Gated::Ran("u1".to_string()));
    }

    #[test]
    fn signed_out_action_is_dropped() {
        let mut ran = false;
        let outcome = gate(None, |_| ran = true);
        assert!(!ran);
        assert_eq!(outcome, Gated::SignInRequired);
    }
}
