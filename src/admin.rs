//! Admin unlock state for one device.
//!
//! Two states: `Locked` and `Unlocked`. A device unlocks by answering the
//! challenge (Ctrl+Shift+L in the page) with the admin secret; the flag is
//! then remembered in the device's local storage with no expiry. There is
//! no lockout and no re-challenge.

use crate::auth::AdminSecret;
use crate::error::LocalStorageError;
use crate::local::LocalStorage;

/// Local storage key for the unlock flag.
pub const ADMIN_FLAG_KEY: &str = "admin_verified";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminState {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeOutcome {
    /// Correct answer; the device is now unlocked.
    Unlocked,
    /// Already unlocked, the answer was not checked.
    AlreadyUnlocked,
    Rejected,
    /// The prompt was cancelled without an answer.
    Dismissed,
}

#[derive(Debug, Clone, Copy)]
pub struct AdminSession {
    state: AdminState,
}

impl AdminSession {
    pub fn restore(storage: &dyn LocalStorage) -> Self {
        let state = match storage.get_item(ADMIN_FLAG_KEY).as_deref() {
            Some("true") => AdminState::Unlocked,
            _ => AdminState::Locked,
        };
        Self { state }
    }

    pub fn state(&self) -> AdminState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == AdminState::Unlocked
    }

    pub fn answer_challenge(
        &mut self,
        answer: Option<&str>,
        secret: &AdminSecret,
        storage: &dyn LocalStorage,
    ) -> Result<ChallengeOutcome, LocalStorageError> {
        if self.is_unlocked() {
            return Ok(ChallengeOutcome::AlreadyUnlocked);
        }

        let Some(answer) = answer else {
            return Ok(ChallengeOutcome::Dismissed);
        };

        if !secret.verify(answer) {
            tracing::warn!("admin unlock rejected");
            return Ok(ChallengeOutcome::Rejected);
        }

        storage.set_item(ADMIN_FLAG_KEY, "true")?;
        self.state = AdminState::Unlocked;
        tracing::info!("device unlocked for admin");
        Ok(ChallengeOutcome::Unlocked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::MemoryStorage;

    fn secret() -> AdminSecret {
        AdminSecret::from_secret(Some("lowkey2026")).unwrap()
    }

    #[test]
    fn test_starts_locked() {
        let storage = MemoryStorage::new();
        let session = AdminSession::restore(&storage);
        assert_eq!(session.state(), AdminState::Locked);
    }

    #[test]
    fn test_wrong_answers_never_unlock() {
        let secret = secret();
        let storage = MemoryStorage::new();
        let mut session = AdminSession::restore(&storage);

        for answer in ["", "lowkey", "LOWKEY2026", "lowkey2026 ", "admin"] {
            let outcome = session.answer_challenge(Some(answer), &secret, &storage).unwrap();
            assert_eq!(outcome, ChallengeOutcome::Rejected);
            assert!(!session.is_unlocked());
        }
        assert_eq!(storage.get_item(ADMIN_FLAG_KEY), None);
        assert!(!AdminSession::restore(&storage).is_unlocked());
    }

    #[test]
    fn test_dismissed_prompt_changes_nothing() {
        let secret = secret();
        let storage = MemoryStorage::new();
        let mut session = AdminSession::restore(&storage);

        let outcome = session.answer_challenge(None, &secret, &storage).unwrap();
        assert_eq!(outcome, ChallengeOutcome::Dismissed);
        assert!(!session.is_unlocked());
    }

    #[test]
    fn test_correct_answer_unlocks_once_and_persists() {
        let secret = secret();
        let storage = MemoryStorage::new();
        let mut session = AdminSession::restore(&storage);

        let first = session.answer_challenge(Some("lowkey2026"), &secret, &storage).unwrap();
        assert_eq!(first, ChallengeOutcome::Unlocked);
        let second = session.answer_challenge(Some("lowkey2026"), &secret, &storage).unwrap();
        assert_eq!(second, ChallengeOutcome::AlreadyUnlocked);

        // Reload
        let reloaded = AdminSession::restore(&storage);
        assert_eq!(reloaded.state(), AdminState::Unlocked);
    }

    #[test]
    fn test_cleared_flag_locks_again() {
        let storage = MemoryStorage::new();
        storage.set_item(ADMIN_FLAG_KEY, "true").unwrap();
        assert!(AdminSession::restore(&storage).is_unlocked());

        storage.remove_item(ADMIN_FLAG_KEY).unwrap();
        assert!(!AdminSession::restore(&storage).is_unlocked());
    }

    #[test]
    fn test_disabled_secret_keeps_device_locked() {
        let secret = AdminSecret::disabled();
        let storage = MemoryStorage::new();
        let mut session = AdminSession::restore(&storage);
        let outcome = session.answer_challenge(Some(""), &secret, &storage).unwrap();
        assert_eq!(outcome, ChallengeOutcome::Rejected);
    }
}
