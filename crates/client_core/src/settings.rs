use std::{collections::HashMap, fs, path::Path};

use anyhow::{anyhow, Context};
use shared::protocol::{DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS};
use url::Url;

pub const DEFAULT_SETTINGS_FILE: &str = "backoffice.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub auth_token: Option<String>,
    /// Destination shown when the session cannot be tied to a tenant.
    pub login_redirect: String,
    pub rows_per_page: u32,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3333".into(),
            auth_token: None,
            login_redirect: "/".into(),
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

impl ClientSettings {
    pub fn base_url(&self) -> anyhow::Result<Url> {
        parse_base_url(&self.api_base_url)
    }

    /// Absolute login destination; relative redirects resolve against the API host.
    pub fn login_url(&self) -> anyhow::Result<Url> {
        let base = self.base_url()?;
        base.join(self.login_redirect.trim())
            .with_context(|| format!("invalid login redirect '{}'", self.login_redirect))
    }
}

/// Loads settings from `path` (or `backoffice.toml` in the working directory)
/// and then applies environment overrides.
///
/// An explicitly requested file must exist; the default file is optional.
pub fn load_settings(path: Option<&Path>) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let (file, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (Path::new(DEFAULT_SETTINGS_FILE).to_path_buf(), false),
    };

    match fs::read_to_string(&file) {
        Ok(raw) => {
            apply_file(&mut settings, &raw)
                .with_context(|| format!("invalid settings file '{}'", file.display()))?;
        }
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", file.display()));
        }
        Err(_) => {}
    }

    apply_overrides(&mut settings, |name| std::env::var(name).ok());
    parse_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn apply_file(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file_cfg = toml::from_str::<HashMap<String, toml::Value>>(raw)?;
    let text = |key: &str| -> Option<String> {
        file_cfg.get(key).map(|value| match value {
            toml::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    };

    if let Some(v) = text("api_base_url") {
        settings.api_base_url = v;
    }
    if let Some(v) = text("auth_token") {
        settings.auth_token = non_empty(v);
    }
    if let Some(v) = text("login_redirect") {
        settings.login_redirect = v;
    }
    if let Some(v) = text("rows_per_page") {
        settings.rows_per_page = parse_rows_per_page(&v);
    }
    Ok(())
}

/// Environment overrides; the `APP__` spelling wins over the short one.
pub fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("BACKOFFICE_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("BACKOFFICE_TOKEN") {
        settings.auth_token = non_empty(v);
    }
    if let Some(v) = lookup("APP__AUTH_TOKEN") {
        settings.auth_token = non_empty(v);
    }

    if let Some(v) = lookup("APP__LOGIN_REDIRECT") {
        settings.login_redirect = v;
    }

    if let Some(v) = lookup("APP__ROWS_PER_PAGE") {
        settings.rows_per_page = parse_rows_per_page(&v);
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_rows_per_page(raw: &str) -> u32 {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|rows| ROWS_PER_PAGE_OPTIONS.contains(rows))
        .unwrap_or(DEFAULT_ROWS_PER_PAGE)
}

/// Parses the API base URL, requiring http(s) and normalizing a trailing `/`
/// so relative endpoint paths join underneath it.
pub fn parse_base_url(raw: &str) -> anyhow::Result<Url> {
    let raw = raw.trim();
    let mut url =
        Url::parse(raw).with_context(|| format!("invalid api base url '{raw}'"))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!("api base url must start with http:// or https://"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/settings_tests.rs"]
mod tests;
