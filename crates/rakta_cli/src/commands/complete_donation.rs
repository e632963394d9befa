use std::path::PathBuf;
use std::sync::Arc;

use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{config::Region, Client};
use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use rakta_db::PgStore;
use rakta_service::reports::{LocalReportStore, ReportStore, ReportUpload, S3ReportStore};
use rakta_service::DonationService;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct CompleteDonationArgs {
    /// The acceptance UUID from 'accept'
    #[arg(short, long)]
    pub id: Uuid,

    /// Path to the donation report (e.g. ./report.pdf)
    #[arg(short, long)]
    pub file: PathBuf,
}

pub async fn execute(
    pool: PgPool,
    config: Config,
    args: CompleteDonationArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("📎 Attaching Donation Report: {:?}", args.file);

    // 1. Read the report from disk
    let bytes = tokio::fs::read(&args.file).await?;
    let original_name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());

    // 2. Init the report store (S3 when a bucket is configured, disk otherwise)
    let reports: Arc<dyn ReportStore> = match &config.s3_bucket {
        Some(bucket) => {
            let region_provider = RegionProviderChain::default_provider()
                .or_else(Region::new(config.s3_region.clone()));
            let aws_config = aws_config::from_env().region(region_provider).load().await;
            let mut s3_config =
                aws_sdk_s3::config::Builder::from(&aws_config).force_path_style(true);
            if let Some(endpoint) = &config.s3_endpoint {
                s3_config = s3_config.endpoint_url(endpoint);
            }
            let client = Client::from_conf(s3_config.build());
            Arc::new(S3ReportStore::new(client, bucket.clone()))
        }
        None => Arc::new(LocalReportStore::new(
            &config.report_dir,
            config.report_public_prefix.clone(),
        )),
    };

    // 3. Delegate to the service
    let store = Arc::new(PgStore::new(pool));
    let service = DonationService::new(store, reports);

    let done = service
        .complete_donation(
            args.id,
            ReportUpload {
                bytes,
                original_name,
            },
        )
        .await?;

    println!("✅ Donation recorded.");
    println!("📄 Report: {}", done.report_url);
    println!("🔒 SHA-256: {}", done.report_checksum);

    Ok(())
}
