use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::auth::token::TokenPair;
use crate::error::AppError;

pub const AUTH_FILE_NAME: &str = "auth.yml";

/// The four OAuth secrets kept in `auth.yml`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub token: String,
    pub token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .field("token", &self.token)
            .field("token_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn consumer(&self) -> TokenPair {
        TokenPair::new(&self.consumer_key, &self.consumer_secret)
    }

    pub fn access_token(&self) -> TokenPair {
        TokenPair::new(&self.token, &self.token_secret)
    }

    pub fn from_yaml(content: &str, path: &Path) -> Result<Self, AppError> {
        let credentials: Credentials =
            serde_yaml::from_str(content).map_err(|e| AppError::Credentials {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        credentials.validate(path)?;
        Ok(credentials)
    }

    fn validate(&self, path: &Path) -> Result<(), AppError> {
        let fields = [
            ("consumer_key", &self.consumer_key),
            ("consumer_secret", &self.consumer_secret),
            ("token", &self.token),
            ("token_secret", &self.token_secret),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::Credentials {
                    path: path.to_path_buf(),
                    message: format!("{name} must not be empty"),
                });
            }
        }
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Err(AppError::CredentialsNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path)?;
        let credentials = Self::from_yaml(&content, path)?;
        debug!("Loaded credentials from {:?}", path);
        Ok(credentials)
    }

    pub fn save(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        debug!("Wrote credentials to {:?}", path);
        Ok(())
    }
}

/// `auth.yml` in the directory holding the running executable.
pub fn executable_auth_path() -> Result<PathBuf, AppError> {
    let exe = env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(AUTH_FILE_NAME))
}

/// `auth.yml` under the per-user config directory, if the platform has one.
pub fn user_config_auth_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tdlive").join(AUTH_FILE_NAME))
}

/// Pick the credentials file: an explicit path wins, then the file next to
/// the executable, then the user config directory. When neither default
/// exists the executable location is returned.
pub fn resolve_auth_path(explicit: Option<&Path>) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let beside_exe = executable_auth_path()?;
    if beside_exe.exists() {
        return Ok(beside_exe);
    }
    if let Some(user_path) = user_config_auth_path().filter(|p| p.exists()) {
        return Ok(user_path);
    }
    Ok(beside_exe)
}

/// Consumer key and secret from env vars for `authorize`, or None if not set.
pub fn consumer_from_env() -> Option<TokenPair> {
    let key = env::var("TDLIVE_CONSUMER_KEY").ok()?;
    let secret = env::var("TDLIVE_CONSUMER_SECRET").ok()?;
    if key.is_empty() || secret.is_empty() {
        return None;
    }
    Some(TokenPair::new(key, secret))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
consumer_key: FEHUVEW84RAFR5SP22RABURUPHAFRUNU
consumer_secret: ZUXEVEGA9USTAZEWRETHAQUBUR69U6EF
token: 6f2c0bb5d5a4e9e8
token_secret: 9a7f3c1d2e
";

    #[test]
    fn test_parse_credentials() {
        let creds = Credentials::from_yaml(SAMPLE, Path::new("auth.yml")).unwrap();
        assert_eq!(creds.consumer_key, "FEHUVEW84RAFR5SP22RABURUPHAFRUNU");
        assert_eq!(creds.token_secret, "9a7f3c1d2e");
        assert_eq!(creds.access_token(), TokenPair::new("6f2c0bb5d5a4e9e8", "9a7f3c1d2e"));
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let content = "consumer_key: a\nconsumer_secret: b\ntoken: c\n";
        let err = Credentials::from_yaml(content, Path::new("auth.yml")).unwrap_err();
        assert!(matches!(err, AppError::Credentials { .. }));
        assert!(err.to_string().contains("token_secret"));
    }

    #[test]
    fn test_empty_value_is_rejected() {
        let content = "consumer_key: a\nconsumer_secret: ''\ntoken: c\ntoken_secret: d\n";
        let err = Credentials::from_yaml(content, Path::new("auth.yml")).unwrap_err();
        assert!(err.to_string().contains("consumer_secret must not be empty"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("auth.yml");
        let err = Credentials::load(&path).unwrap_err();
        assert!(matches!(err, AppError::CredentialsNotFound { .. }));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("auth.yml");
        let creds = Credentials::from_yaml(SAMPLE, &path).unwrap();
        creds.save(&path).unwrap();
        assert_eq!(Credentials::load(&path).unwrap(), creds);
    }

    #[test]
    fn test_explicit_path_wins() {
        let path = resolve_auth_path(Some(Path::new("/etc/tdlive/auth.yml"))).unwrap();
        assert_eq!(path, PathBuf::from("/etc/tdlive/auth.yml"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = Credentials::from_yaml(SAMPLE, Path::new("auth.yml")).unwrap();
        let shown = format!("{:?}", creds);
        assert!(!shown.contains("ZUXEVEGA9USTAZEWRETHAQUBUR69U6EF"));
        assert!(!shown.contains("9a7f3c1d2e"));
    }
}
