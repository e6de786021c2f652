//! Device-auth credentials.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::WorldInfoError;

/// Stored device authorization for the bot's Epic account.
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceAuth {
    pub account_id: String,
    pub device_id: String,
    pub secret: String,
}

impl std::fmt::Debug for DeviceAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceAuth")
            .field("account_id", &self.account_id)
            .field("device_id", &self.device_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl DeviceAuth {
    pub async fn load(path: &Path) -> Result<Self, WorldInfoError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| WorldInfoError::Credentials(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| WorldInfoError::Credentials(format!("{}: {e}", path.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[tokio::test]
    async fn loads_camel_case_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, r#"{"accountId":"a","deviceId":"d","secret":"s"}"#).unwrap();

        let auth = DeviceAuth::load(&path).await.unwrap();
        assert_eq!(auth.account_id, "a");
        assert!(!format!("{auth:?}").contains("\"s\""));
    }

    #[tokio::test]
    async fn missing_file_is_credentials_error() {
        let dir = tempfile::tempdir().unwrap();
        assert_matches!(
            DeviceAuth::load(&dir.path().join("nope.json")).await,
            Err(WorldInfoError::Credentials(_))
        );
    }
}
