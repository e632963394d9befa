use std::sync::Arc;

use aws_config::meta::region::RegionProviderChain;
use aws_sdk_s3::{config::Region, Client as S3Client};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use rakta_api::config::Config;
use rakta_api::routes::app_router;
use rakta_api::AppState;
use rakta_db::PgStore;
use rakta_service::reports::{LocalReportStore, ReportStore, S3ReportStore};
use rakta_service::DonationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    let store = Arc::new(PgStore::new(pool));

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
            let client = S3Client::from_conf(s3_config.build());
            Arc::new(S3ReportStore::new(client, bucket.clone()))
        }
        None => Arc::new(LocalReportStore::new(
            &config.report_dir,
            config.report_public_prefix.clone(),
        )),
    };

    let state = AppState {
        service: DonationService::new(store, reports),
    };
    let app = app_router(state);

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
