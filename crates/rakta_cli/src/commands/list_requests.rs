use std::sync::Arc;

use clap::Args;
use sqlx::PgPool;

use rakta_core::models::blood_type::BloodType;
use rakta_db::PgStore;
use rakta_service::reports::LocalReportStore;
use rakta_service::DonationService;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct ListRequestsArgs {
    /// Narrow to one blood type (e.g. "B-"); all types when omitted
    #[arg(long)]
    pub blood_type: Option<String>,

    /// Maximum rows to show
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}

pub async fn execute(
    pool: PgPool,
    config: Config,
    args: ListRequestsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(PgStore::new(pool));
    let reports = Arc::new(LocalReportStore::new(
        &config.report_dir,
        config.report_public_prefix.clone(),
    ));
    let service = DonationService::new(store, reports);

    let blood_type = match &args.blood_type {
        Some(label) => Some(label.parse::<BloodType>()?),
        None => None,
    };

    let requests = service.open_requests(blood_type, args.limit).await?;

    if requests.is_empty() {
        println!("📋 No open requests.");
        return Ok(());
    }

    println!("📋 Open Requests ({}):", requests.len());
    for request in requests {
        println!(
            "   {} | {} | {} | {}u | {} | until {}",
            request.id,
            request.blood_type,
            request.urgency.label(),
            request.units_needed,
            request.hospital,
            request.expires_at
        );
    }

    Ok(())
}
