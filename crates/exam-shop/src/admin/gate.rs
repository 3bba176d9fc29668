//! Password gate in front of the admin console.
//!
//! A client-side courtesy lock, not a security boundary: the secret ships with the client.

use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("wrong password, {remaining} attempt(s) left")]
    WrongPassword { remaining: u32 },

    #[error("too many failed attempts, try again in {} seconds", .retry_after.as_secs().max(1))]
    LockedOut { retry_after: Duration },

    #[error("admin login required")]
    NotAuthenticated,
}

#[derive(Debug)]
pub struct AdminGate {
    secret: String,
    max_attempts: u32,
    lockout: Duration,
    failures: u32,
    locked_until: Option<Instant>,
    authenticated: bool,
}

impl AdminGate {
    pub fn new(secret: impl Into<String>, max_attempts: u32, lockout: Duration) -> Self {
        Self {
            secret: secret.into(),
            max_attempts: max_attempts.max(1),
            lockout,
            failures: 0,
            locked_until: None,
            authenticated: false,
        }
    }

    /// Checks one password attempt.
    ///
    /// The attempt that exhausts the budget still reports `WrongPassword { remaining: 0 }`;
    /// later attempts see `LockedOut` until the window has passed, after which the counter
    /// starts over.
    pub fn authenticate(&mut self, attempt: &str) -> Result<(), GateError> {
        if let Some(until) = self.locked_until {
            let now = Instant::now();
            if now < until {
                return Err(GateError::LockedOut {
                    retry_after: until - now,
                });
            }
            info!("Admin lockout expired");
            self.locked_until = None;
            self.failures = 0;
        }

        if attempt == self.secret {
            self.authenticated = true;
            self.failures = 0;
            info!("Admin authenticated");
            return Ok(());
        }

        self.failures += 1;
        let remaining = self.max_attempts.saturating_sub(self.failures);
        warn!(failures = self.failures, remaining, "Admin password rejected");
        if remaining == 0 {
            self.locked_until = Some(Instant::now() + self.lockout);
            warn!(lockout_secs = self.lockout.as_secs(), "Admin login locked");
        }
        Err(GateError::WrongPassword { remaining })
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_locked(&self) -> bool {
        self.locked_until.is_some_and(|until| Instant::now() < until)
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
    }

    pub(crate) fn ensure_authenticated(&self) -> Result<(), GateError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(GateError::NotAuthenticated)
        }
    }
}
