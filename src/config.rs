use std::{env, path::PathBuf};

use anyhow::{Result, bail};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "data";

/// Where the moderation credential comes from. There is no fallback value.
#[derive(Clone)]
pub enum CredentialSource {
    Plaintext(String),
    Argon2Hash(String),
}

impl std::fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialSource::Plaintext(_) => f.write_str("Plaintext(<redacted>)"),
            CredentialSource::Argon2Hash(_) => f.write_str("Argon2Hash(<redacted>)"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    pub credential: CredentialSource,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = non_blank("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_dir = non_blank("DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let credential = if let Some(hash) = non_blank("ADMIN_PASSWORD_HASH") {
            CredentialSource::Argon2Hash(hash.trim().to_string())
        } else if let Some(password) = lookup("ADMIN_PASSWORD").filter(|p| !p.trim().is_empty()) {
            CredentialSource::Plaintext(password)
        } else {
            bail!(
                "ADMIN_PASSWORD or ADMIN_PASSWORD_HASH must be set to a non-blank value"
            );
        };

        Ok(Self {
            port,
            data_dir,
            credential,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn refuses_to_start_without_credential() {
        let err = config_from(&[("PORT", "3000")]).expect_err("no credential");
        assert!(err.to_string().contains("ADMIN_PASSWORD"));

        assert!(config_from(&[("ADMIN_PASSWORD", "")]).is_err());
        assert!(config_from(&[("ADMIN_PASSWORD", "   ")]).is_err());
        assert!(config_from(&[("ADMIN_PASSWORD", "\t\n")]).is_err());
        assert!(config_from(&[("ADMIN_PASSWORD_HASH", "   ")]).is_err());
    }

    #[test]
    fn applies_defaults_for_port_and_data_dir() {
        let config = config_from(&[("ADMIN_PASSWORD", "s3cret")]).expect("config");
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(matches!(config.credential, CredentialSource::Plaintext(ref p) if p == "s3cret"));

        let config = config_from(&[
            ("ADMIN_PASSWORD", "s3cret"),
            ("PORT", "not-a-port"),
            ("DATA_DIR", "/srv/gazette"),
        ])
        .expect("config");
        assert_eq!(config.port, 8080);
        assert_eq!(config.data_dir, PathBuf::from("/srv/gazette"));
    }

    #[test]
    fn password_keeps_surrounding_whitespace() {
        let config = config_from(&[("ADMIN_PASSWORD", " s3cret ")]).expect("config");
        assert!(matches!(config.credential, CredentialSource::Plaintext(ref p) if p == " s3cret "));
    }

    #[test]
    fn hash_takes_precedence_over_plaintext() {
        let config = config_from(&[
            ("ADMIN_PASSWORD", "s3cret"),
            ("ADMIN_PASSWORD_HASH", "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA"),
            ("PORT", "9000"),
        ])
        .expect("config");
        assert_eq!(config.port, 9000);
        assert!(matches!(config.credential, CredentialSource::Argon2Hash(_)));
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
