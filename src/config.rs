use crate::output::{PRIVATE_KEY_VAR, PUBLIC_KEY_VAR};

pub const DEFAULT_SUBJECT: &str = "mailto:admin@arbitrum-gov.app";

#[derive(Clone, Debug)]
pub struct Config {
    pub vapid_public_key: Option<String>,
    pub vapid_private_key: Option<String>,
    pub vapid_subject: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Config {
            vapid_public_key: var(PUBLIC_KEY_VAR),
            vapid_private_key: var(PRIVATE_KEY_VAR),
            vapid_subject: var("VAPID_SUBJECT").unwrap_or_else(|| DEFAULT_SUBJECT.to_string()),
        }
    }
}
