//! Admin authorization for gated operations.
//!
//! The kiosk has a single shared admin password. Rather than an ambient
//! logged-in flag, verification produces an [`AdminAuth`] proof value that
//! admin-gated operations require by reference. A caller that does not hold
//! a proof cannot invoke them; the web layer maps its session check onto one
//! [`AdminCredentials::verify`] call per request.

use crate::config::KioskConfig;
use crate::error::{KioskError, KioskResult};

/// The configured admin password, resolved at startup.
#[derive(Clone)]
pub struct AdminCredentials {
    password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the password.
        f.debug_struct("AdminCredentials").finish_non_exhaustive()
    }
}

impl AdminCredentials {
    /// Builds credentials from the startup configuration.
    pub fn from_config(cfg: &KioskConfig) -> Self {
        Self {
            password: cfg.admin_password().to_owned(),
        }
    }

    /// Verifies the provided password.
    ///
    /// # Errors
    ///
    /// Returns `KioskError::Unauthorized` if the password does not match.
    pub fn verify(&self, provided: &str) -> KioskResult<AdminAuth> {
        if provided == self.password {
            Ok(AdminAuth { _proof: () })
        } else {
            Err(KioskError::Unauthorized)
        }
    }
}

/// Proof that the caller passed admin verification.
///
/// Only constructible through [`AdminCredentials::verify`].
#[derive(Debug, Clone, Copy)]
pub struct AdminAuth {
    _proof: (),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn credentials(password: &str) -> AdminCredentials {
        let cfg = KioskConfig::new(PathBuf::from("data"), password.into())
            .expect("KioskConfig::new should succeed");
        AdminCredentials::from_config(&cfg)
    }

    #[test]
    fn test_verify_accepts_matching_password() {
        let creds = credentials("letmein");

        assert!(creds.verify("letmein").is_ok());
    }

    #[test]
    fn test_verify_rejects_wrong_password() {
        let creds = credentials("letmein");

        let result = creds.verify("guess");

        assert!(matches!(result, Err(KioskError::Unauthorized)));
    }

    #[test]
    fn test_debug_does_not_leak_password() {
        let creds = credentials("letmein");

        let debug = format!("{:?}", creds);

        assert!(!debug.contains("letmein"));
    }
}
