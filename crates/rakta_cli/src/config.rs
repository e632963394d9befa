use std::env;

use anyhow::{Context, Result};
use dotenvy::dotenv;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub report_dir: String,
    pub report_public_prefix: String,
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
