use std::sync::Arc;

use clap::Args;
use sqlx::PgPool;
use uuid::Uuid;

use rakta_db::PgStore;
use rakta_service::reports::LocalReportStore;
use rakta_service::DonationService;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct AcceptArgs {
    /// The donor's user id
    #[arg(long)]
    pub donor: String,

    /// The blood request UUID being accepted
    #[arg(long)]
    pub request: Uuid,
}

pub async fn execute(
    pool: PgPool,
    config: Config,
    args: AcceptArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(PgStore::new(pool));
    let reports = Arc::new(LocalReportStore::new(
        &config.report_dir,
        config.report_public_prefix.clone(),
    ));
    let service = DonationService::new(store, reports);

    let acceptance = service.accept_request(&args.donor, args.request).await?;

    println!("🤝 Donation accepted.");
    println!("🔑 UUID: {}", acceptance.id);
    println!(
        "📝 Next: use 'complete-donation --id {} --file <report>' once the blood is drawn.",
        acceptance.id
    );

    Ok(())
}
