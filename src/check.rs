//! Validation of VAPID keys already present in the environment.

use std::fmt;

use tracing::{debug, warn};

use crate::{
    config::Config,
    error::KeyError,
    keys,
    output::{PRIVATE_KEY_VAR, PUBLIC_KEY_VAR},
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyStatus {
    Missing,
    Invalid(String),
    Valid,
}

impl fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyStatus::Missing => write!(f, "missing"),
            KeyStatus::Invalid(reason) => write!(f, "invalid ({reason})"),
            KeyStatus::Valid => write!(f, "valid"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct CheckReport {
    pub public_key: KeyStatus,
    pub private_key: KeyStatus,
    /// `None` unless both keys are valid.
    pub pair_matches: Option<bool>,
    pub subject: String,
    pub subject_warning: Option<String>,
}

impl CheckReport {
    pub fn is_ready(&self) -> bool {
        self.pair_matches == Some(true)
    }
}

impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{PUBLIC_KEY_VAR}: {}", self.public_key)?;
        writeln!(f, "{PRIVATE_KEY_VAR}: {}", self.private_key)?;
        match self.pair_matches {
            Some(true) => writeln!(f, "Key pair: match")?,
            Some(false) => writeln!(f, "Key pair: MISMATCH")?,
            None => writeln!(f, "Key pair: not checked")?,
        }
        writeln!(f, "VAPID_SUBJECT: {}", self.subject)?;
        if let Some(warning) = &self.subject_warning {
            writeln!(f, "  warning: {warning}")?;
        }
        let status = if self.is_ready() {
            "ready"
        } else {
            "not_configured"
        };
        write!(f, "Status: {status}")
    }
}

fn status_of<T>(value: Option<&str>, decode: impl Fn(&str) -> Result<T, KeyError>) -> KeyStatus {
    match value {
        None => KeyStatus::Missing,
        Some(v) => match decode(v) {
            Ok(_) => KeyStatus::Valid,
            Err(e) => KeyStatus::Invalid(e.to_string()),
        },
    }
}

/// Push services require a `mailto:` or `https:` contact (RFC 8292).
fn subject_warning(subject: &str) -> Option<String> {
    if subject.starts_with("mailto:") || subject.starts_with("https:") {
        None
    } else {
        Some("subject should be a mailto: or https: URI".to_string())
    }
}

pub fn check(config: &Config) -> CheckReport {
    let public = config.vapid_public_key.as_deref();
    let private = config.vapid_private_key.as_deref();

    let public_key = status_of(public, keys::decode_public_key);
    let private_key = status_of(private, keys::decode_private_key);

    let pair_matches = match (public, private) {
        (Some(p), Some(s)) if public_key == KeyStatus::Valid && private_key == KeyStatus::Valid => {
            Some(keys::verify_pair(p, s).is_ok())
        }
        _ => None,
    };

    let subject_warning = subject_warning(&config.vapid_subject);
    if let Some(w) = &subject_warning {
        warn!("{w}: {}", config.vapid_subject);
    }
    debug!("public key {public_key}, private key {private_key}");

    CheckReport {
        public_key,
        private_key,
        pair_matches,
        subject: config.vapid_subject.clone(),
        subject_warning,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SUBJECT;
    use rand::{rngs::StdRng, SeedableRng};

    fn config(public: Option<&str>, private: Option<&str>) -> Config {
        Config {
            vapid_public_key: public.map(str::to_string),
            vapid_private_key: private.map(str::to_string),
            vapid_subject: DEFAULT_SUBJECT.to_string(),
        }
    }

    #[test]
    fn missing_keys_are_not_ready() {
        let report = check(&config(None, None));
        assert_eq!(report.public_key, KeyStatus::Missing);
        assert_eq!(report.private_key, KeyStatus::Missing);
        assert_eq!(report.pair_matches, None);
        assert!(!report.is_ready());
        assert!(report.to_string().ends_with("Status: not_configured"));
    }

    #[test]
    fn generated_pair_is_ready() {
        let keys = keys::generate_with_rng(&mut StdRng::seed_from_u64(3)).unwrap();
        let report = check(&config(Some(&keys.public_key), Some(&keys.private_key)));
        assert!(report.is_ready());
        assert_eq!(report.subject_warning, None);
        assert!(report.to_string().ends_with("Status: ready"));
    }

    #[test]
    fn mismatched_pair_is_reported() {
        let a = keys::generate_with_rng(&mut StdRng::seed_from_u64(3)).unwrap();
        let b = keys::generate_with_rng(&mut StdRng::seed_from_u64(4)).unwrap();
        let report = check(&config(Some(&a.public_key), Some(&b.private_key)));
        assert_eq!(report.public_key, KeyStatus::Valid);
        assert_eq!(report.private_key, KeyStatus::Valid);
        assert_eq!(report.pair_matches, Some(false));
        assert!(report.to_string().contains("MISMATCH"));
    }

    #[test]
    fn wrong_length_public_key_is_invalid() {
        let report = check(&config(Some("AAAA"), None));
        match report.public_key {
            KeyStatus::Invalid(reason) => assert!(reason.contains("65 bytes"), "{reason}"),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn odd_subject_is_warned() {
        let mut cfg = config(None, None);
        cfg.vapid_subject = "admin@example.com".to_string();
        let report = check(&cfg);
        assert!(report.subject_warning.is_some());
    }

    #[test]
    fn https_subject_is_accepted() {
        let mut cfg = config(None, None);
        cfg.vapid_subject = "https://example.com".to_string();
        let report = check(&cfg);
        assert_eq!(report.subject_warning, None);
    }
}
