use anyhow::{Result, anyhow};
use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand_core::OsRng;

use crate::config::CredentialSource;

/// The moderation credential, always held as an argon2 hash.
#[derive(Clone)]
pub struct AdminCredential {
    password_hash: String,
}

impl AdminCredential {
    pub fn from_source(source: &CredentialSource) -> Result<Self> {
        let password_hash = match source {
            CredentialSource::Plaintext(password) => hash_password(password)
                .map_err(|err| anyhow!("failed to hash moderation credential: {err}"))?,
            CredentialSource::Argon2Hash(hash) => {
                PasswordHash::new(hash).map_err(|err| {
                    anyhow!("ADMIN_PASSWORD_HASH is not a valid PHC string: {err}")
                })?;
                hash.clone()
            }
        };

        Ok(Self { password_hash })
    }

    pub fn verify(&self, candidate: &str) -> bool {
        verify_password(candidate, &self.password_hash)
    }
}

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    let parsed = PasswordHash::new(password_hash);
    match parsed {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(_) => false,
    }
}
