use std::{collections::HashMap, fs};

/// Prediction service base URL used when nothing overrides it.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5001";

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.into(),
        }
    }
}

/// Resolution order: built-in default, then `newsverify.toml` in the working
/// directory, then environment. A `--server-url` flag is layered on top by
/// the caller.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("newsverify.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("NEWSVERIFY_SERVER_URL") {
        settings.server_url = v;
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(raw) {
        if let Some(v) = file_cfg.get("server_url") {
            settings.server_url = v.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_service() {
        assert_eq!(Settings::default().server_url, "http://127.0.0.1:5001");
    }

    #[test]
    fn file_config_overrides_server_url() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "server_url = \"https://verify.example.com\"\n");
        assert_eq!(settings.server_url, "https://verify.example.com");
    }

    #[test]
    fn unknown_keys_and_bad_toml_are_ignored() {
        let mut settings = Settings::default();
        apply_file_config(&mut settings, "answer = 42\nnot even toml [");
        assert_eq!(settings.server_url, DEFAULT_SERVER_URL);
    }
}
