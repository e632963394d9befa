use std::sync::Arc;

use clap::Args;
use sqlx::PgPool;

use rakta_core::models::blood_type::BloodType;
use rakta_db::PgStore;
use rakta_service::reports::LocalReportStore;
use rakta_service::DonationService;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct FindDonorsArgs {
    /// Blood type the patient needs (e.g. "AB-")
    #[arg(long)]
    pub blood_type: String,

    /// How many donors to look for
    #[arg(long, default_value_t = 5)]
    pub count: u32,
}

pub async fn execute(
    pool: PgPool,
    config: Config,
    args: FindDonorsArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let blood_type: BloodType = args.blood_type.parse()?;

    println!("🔍 Searching donors for {}...", blood_type);

    let store = Arc::new(PgStore::new(pool));
    let reports = Arc::new(LocalReportStore::new(
        &config.report_dir,
        config.report_public_prefix.clone(),
    ));
    let service = DonationService::new(store, reports);

    let donors = service.find_donors_for_type(blood_type, args.count).await?;

    if donors.is_empty() {
        println!("   No matching donors registered.");
        return Ok(());
    }

    for donor in donors {
        let donor_type = donor
            .blood_type
            .map(|bt| bt.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "   {} | {} | {} | {}",
            donor.id,
            donor_type,
            donor.display_name(),
            donor.address
        );
    }

    Ok(())
}
