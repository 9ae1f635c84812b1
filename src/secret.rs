//! JWT secret provisioning for PostgREST.
//!
//! The secret is consumed by the API layer for token issuance, not by the
//! ingestion core itself.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use std::fs;
use std::io::Write;
use std::path::Path;

const ENV_KEY: &str = "POSTGREST_JWT_SECRET";

/// Generate a URL-safe secret from 64 random bytes.
pub fn generate_jwt_secret() -> String {
    let mut bytes = [0u8; 64];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Record `POSTGREST_JWT_SECRET=<secret>` in the env file unless the key
/// is already present. Returns whether the file was updated; a missing
/// file is created.
pub fn update_env_file(path: &Path, secret: &str) -> std::io::Result<bool> {
    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e),
    };

    let prefix = format!("{ENV_KEY}=");
    if existing.lines().any(|line| line.trim().starts_with(&prefix)) {
        return Ok(false);
    }

    let mut file = fs::OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "\n{ENV_KEY}={secret}")?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_is_urlsafe_and_64_bytes_long() {
        let secret = generate_jwt_secret();
        // 64 bytes of unpadded base64 encode to 86 characters.
        assert_eq!(secret.len(), 86);
        assert!(secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_consecutive_secrets_differ() {
        assert_ne!(generate_jwt_secret(), generate_jwt_secret());
    }

    #[test]
    fn test_update_creates_and_appends_once() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");

        let updated = update_env_file(&env_path, "first-secret").unwrap();
        assert!(updated);
        let content = fs::read_to_string(&env_path).unwrap();
        assert!(content.contains("POSTGREST_JWT_SECRET=first-secret"));

        // A second run must not replace the existing secret.
        let updated = update_env_file(&env_path, "second-secret").unwrap();
        assert!(!updated);
        let content = fs::read_to_string(&env_path).unwrap();
        assert!(content.contains("first-secret"));
        assert!(!content.contains("second-secret"));
    }

    #[test]
    fn test_update_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join(".env");
        fs::write(&env_path, "POSTGRES_USER=postgres\n").unwrap();

        update_env_file(&env_path, "secret").unwrap();
        let content = fs::read_to_string(&env_path).unwrap();
        assert!(content.contains("POSTGRES_USER=postgres"));
        assert!(content.contains("POSTGREST_JWT_SECRET=secret"));
    }
}
