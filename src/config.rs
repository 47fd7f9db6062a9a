use crate::errors::AppError;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_DB_PATH: &str = "mercadolibre.db";
pub const DEFAULT_MAP_PATH: &str = "mapa_inmuebles.html";
pub const DEFAULT_API_BASE_URL: &str = "https://api.mercadolibre.com";
pub const DEFAULT_SITE_ID: &str = "MLA";
pub const DEFAULT_COUNTRY_CODE: &str = "AR";
/// Root "Inmuebles" category; its children are the property subcategories.
pub const DEFAULT_ROOT_CATEGORY: &str = "MLA1459";
pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_MAX_PAGES: usize = 200;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Runtime settings handed to each component when it is built.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub map_output_path: PathBuf,
    pub api_base_url: String,
    pub site_id: String,
    pub country_code: String,
    pub root_category_id: String,
    pub page_size: usize,
    pub max_pages: usize,
    pub request_timeout: Duration,
    pub open_viewer: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            map_output_path: PathBuf::from(DEFAULT_MAP_PATH),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            site_id: DEFAULT_SITE_ID.to_string(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            root_category_id: DEFAULT_ROOT_CATEGORY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            open_viewer: true,
        }
    }
}

impl AppConfig {
    /// Reads `LISTINGS_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup. Unset keys keep their
    /// defaults; set keys that fail to parse are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("LISTINGS_DB_PATH") {
            config.db_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("LISTINGS_MAP_PATH") {
            config.map_output_path = PathBuf::from(path);
        }
        if let Some(url) = lookup("LISTINGS_API_BASE_URL") {
            config.api_base_url = url;
        }
        if let Some(site) = lookup("LISTINGS_SITE_ID") {
            config.site_id = site;
        }
        if let Some(country) = lookup("LISTINGS_COUNTRY") {
            config.country_code = country;
        }
        if let Some(category) = lookup("LISTINGS_ROOT_CATEGORY") {
            config.root_category_id = category;
        }
        if let Some(size) = parse_var::<usize, _>(&lookup, "LISTINGS_PAGE_SIZE")? {
            config.page_size = size;
        }
        if let Some(pages) = parse_var::<usize, _>(&lookup, "LISTINGS_MAX_PAGES")? {
            config.max_pages = pages;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "LISTINGS_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(raw) = lookup("LISTINGS_OPEN_VIEWER") {
            config.open_viewer = parse_flag(&raw).ok_or_else(|| {
                AppError::Config(format!("LISTINGS_OPEN_VIEWER must be a boolean, got '{raw}'"))
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.page_size == 0 {
            return Err(AppError::Config("page size must be greater than zero".into()));
        }
        if self.max_pages == 0 {
            return Err(AppError::Config("max pages must be greater than zero".into()));
        }
        if self.request_timeout.is_zero() {
            return Err(AppError::Config("request timeout must be greater than zero".into()));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{key}='{raw}': {e}"))),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
