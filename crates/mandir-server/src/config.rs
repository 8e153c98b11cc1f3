use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use mandir_payments::PAYMENT_WINDOW_SECS;

/// Placeholder JWT secrets that MUST NOT be used.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub jwt_secret: String,
    pub upi_id: String,
    pub merchant_name: String,
    pub payment_window_secs: u64,
    pub notify_webhook: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = get("MANDIR_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("MANDIR_JWT_SECRET is unset or still a placeholder; set it in your .env file");
        }

        let port = get("MANDIR_PORT")
            .unwrap_or_else(|| "3000".into())
            .parse()
            .context("MANDIR_PORT must be a port number")?;

        let payment_window_secs = match get("MANDIR_PAYMENT_WINDOW_SECS") {
            Some(v) => v.parse().context("MANDIR_PAYMENT_WINDOW_SECS must be a number of seconds")?,
            None => PAYMENT_WINDOW_SECS,
        };

        Ok(Self {
            host: get("MANDIR_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            db_path: get("MANDIR_DB_PATH").unwrap_or_else(|| "mandir.db".into()).into(),
            jwt_secret,
            upi_id: get("MANDIR_UPI_ID").unwrap_or_else(|| "shivtemple.gsfc@sbi".into()),
            merchant_name: get("MANDIR_MERCHANT_NAME").unwrap_or_else(|| "Shiv Temple GSFC".into()),
            payment_window_secs,
            notify_webhook: get("MANDIR_NOTIFY_WEBHOOK").filter(|v| !v.trim().is_empty()),
        })
    }
}
