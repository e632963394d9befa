use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Local directory reports are written to when S3 is not configured.
    pub report_dir: String,
    /// URL prefix the static file server exposes `report_dir` under.
    pub report_public_prefix: String,
    /// Setting S3_BUCKET switches report storage from disk to S3.
    pub s3_bucket: Option<String>,
    pub s3_endpoint: Option<String>,
    pub s3_region: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env if present

        Ok(Config {
            database_url: env::var("DATABASE_URL")
                .context("DATABASE_URL must be set")?,

            bind_addr: env::var("BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),

            report_dir: env::var("REPORT_DIR")
                .unwrap_or_else(|_| "public/bloodDonationReport".to_string()),

            report_public_prefix: env::var("REPORT_PUBLIC_PREFIX")
                .unwrap_or_else(|_| "/bloodDonationReport".to_string()),

            s3_bucket: env::var("S3_BUCKET").ok(),

            s3_endpoint: env::var("S3_ENDPOINT").ok(),

            s3_region: env::var("AWS_REGION")
                .unwrap_or_else(|_| "us-east-1".to_string()),
        })
    }
}
