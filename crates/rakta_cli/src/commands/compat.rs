use clap::Args;

use rakta_core::compat::{can_donate_to, can_receive_from};
use rakta_core::models::blood_type::BloodType;

#[derive(Debug, Args)]
pub struct CompatArgs {
    /// Blood type to look up (e.g. "O-")
    #[arg(long)]
    pub blood_type: String,
}

pub fn execute(args: CompatArgs) -> Result<(), Box<dyn std::error::Error>> {
    let blood_type: BloodType = args.blood_type.parse()?;

    let donates: Vec<String> = can_donate_to(blood_type)
        .iter()
        .map(|bt| bt.to_string())
        .collect();
    let receives: Vec<String> = can_receive_from(blood_type)
        .iter()
        .map(|bt| bt.to_string())
        .collect();

    println!("🩸 {}", blood_type);
    println!("   Can donate to:    {}", donates.join(", "));
    println!("   Can receive from: {}", receives.join(", "));

    Ok(())
}
