use std::fmt;

/// Environment variable holding the aggregates API key.
pub const API_KEY_ENV: &str = "MASSIVE_API_KEY";

/// Placeholder shipped in `.env.example`; treated the same as a missing key.
pub const UNSET_SENTINEL: &str = "YOUR_API_KEY_HERE";

/// Why a credential is or is not usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    Missing,
    Placeholder,
    Configured,
}

/// API key passed through to the upstream service. `Debug` never prints the key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    value: String,
    status: CredentialStatus,
}

impl Credential {
    pub fn unset() -> Self {
        Self {
            value: UNSET_SENTINEL.to_string(),
            status: CredentialStatus::Missing,
        }
    }

    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Self::unset();
        }
        if trimmed == UNSET_SENTINEL {
            return Self {
                value: UNSET_SENTINEL.to_string(),
                status: CredentialStatus::Placeholder,
            };
        }
        Self {
            value: trimmed.to_string(),
            status: CredentialStatus::Configured,
        }
    }

    pub fn from_env() -> Self {
        match std::env::var(API_KEY_ENV) {
            Ok(value) => Self::new(value),
            Err(_) => Self::unset(),
        }
    }

    pub fn status(&self) -> CredentialStatus {
        self.status
    }

    pub fn is_configured(&self) -> bool {
        self.status == CredentialStatus::Configured
    }

    /// Raw value handed to the fetcher. Unset credentials yield the sentinel.
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// First 8 and last 4 characters, enough to tell keys apart in a terminal.
    pub fn preview(&self) -> String {
        mask_secret(&self.value)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("status", &self.status)
            .field("preview", &self.preview())
            .finish()
    }
}

/// True when `value` must not be sent upstream.
pub fn is_unset(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == UNSET_SENTINEL
}

fn mask_secret(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 12 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
