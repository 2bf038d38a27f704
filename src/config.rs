use serde::Deserialize;

/// Application configuration, read from the environment (and a local
/// `.env` file when present).
#[derive(Debug, Deserialize)]
pub struct AppConfig {
    /// Gemini API key used for all generation requests
    pub gemini_api_key: String,

    /// Generation model name
    #[serde(default = "default_model")]
    pub gemini_model: String,
}

fn default_model() -> String {
    "gemini-2.5-flash-image-preview".to_string()
}

impl AppConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_defaults_when_absent() {
        let config: AppConfig =
            envy::from_iter([("GEMINI_API_KEY".to_string(), "test-key".to_string())]).unwrap();

        assert_eq!(config.gemini_api_key, "test-key");
        assert_eq!(config.gemini_model, "gemini-2.5-flash-image-preview");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let result = envy::from_iter::<_, AppConfig>(std::iter::empty::<(String, String)>());
        assert!(result.is_err());
    }
}
