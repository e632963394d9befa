use std::sync::Arc;

use clap::Args;
use sqlx::PgPool;

use rakta_core::models::request::RequestDraft;
use rakta_db::PgStore;
use rakta_service::reports::LocalReportStore;
use rakta_service::DonationService;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct CreateRequestArgs {
    /// Patient the blood is for
    #[arg(long)]
    pub patient: String,

    /// Blood type needed (e.g. "A+", "O-")
    #[arg(long)]
    pub blood_type: String,

    /// Units needed
    #[arg(long, default_value_t = 1)]
    pub units: i32,

    /// Urgency: 1=Critical, 2=Urgent, 3=Moderate, 4=Routine
    #[arg(long, default_value_t = 2)]
    pub urgency: i16,

    /// Hospital the patient is admitted to
    #[arg(long)]
    pub hospital: String,

    /// Contact person coordinating donors
    #[arg(long)]
    pub contact: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: String,

    /// City or district
    #[arg(long)]
    pub location: String,

    /// Medical condition needing the transfusion
    #[arg(long)]
    pub condition: String,

    /// Anything donors should know up front
    #[arg(long, default_value = "")]
    pub notes: String,
}

pub async fn execute(
    pool: PgPool,
    config: Config,
    args: CreateRequestArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("🩸 Filing Blood Request...");
    println!("   Patient: {}", args.patient);
    println!("   Type:    {}", args.blood_type);

    let store = Arc::new(PgStore::new(pool));
    let reports = Arc::new(LocalReportStore::new(
        &config.report_dir,
        config.report_public_prefix.clone(),
    ));
    let service = DonationService::new(store, reports);

    let draft = RequestDraft {
        patient_name: args.patient,
        blood_type: args.blood_type,
        units_needed: args.units,
        urgency: args.urgency,
        hospital: args.hospital,
        contact_person: args.contact,
        phone_number: args.phone,
        location: args.location,
        medical_condition: args.condition,
        additional_notes: args.notes,
    };

    let request = service.create_request(draft).await?;

    println!("✅ Request filed successfully.");
    println!("🔑 UUID: {}", request.id);
    println!(
        "⏳ {} priority, open until {}",
        request.urgency.label(),
        request.expires_at
    );

    Ok(())
}
