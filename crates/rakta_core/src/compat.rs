//! The ABO/Rh compatibility fact table.
//!
//! This is transcribed clinical data, not derived from antigen rules; do not
//! "simplify" it. Each direction is its own table because donation is
//! asymmetric (O- gives to everyone, AB+ receives from everyone).

use crate::models::blood_type::BloodType;
use crate::models::blood_type::BloodType::*;

/// Recipients a donor with this type can give to.
pub fn can_donate_to(blood_type: BloodType) -> &'static [BloodType] {
    match blood_type {
        ONeg => &[ONeg, OPos, ANeg, APos, BNeg, BPos, AbNeg, AbPos],
        OPos => &[OPos, APos, BPos, AbPos],
        ANeg => &[ANeg, APos, AbNeg, AbPos],
        APos => &[APos, AbPos],
        BNeg => &[BNeg, BPos, AbNeg, AbPos],
        BPos => &[BPos, AbPos],
        AbNeg => &[AbNeg, AbPos],
        AbPos => &[AbPos],
    }
}

/// Donor types a patient with this type can receive from.
pub fn can_receive_from(blood_type: BloodType) -> &'static [BloodType] {
    match blood_type {
        ONeg => &[ONeg],
        OPos => &[ONeg, OPos],
        ANeg => &[ONeg, ANeg],
        APos => &[ONeg, OPos, ANeg, APos],
        BNeg => &[ONeg, BNeg],
        BPos => &[ONeg, OPos, BNeg, BPos],
        AbNeg => &[ONeg, ANeg, BNeg, AbNeg],
        AbPos => &[ONeg, OPos, ANeg, APos, BNeg, BPos, AbNeg, AbPos],
    }
}

/// String-keyed lookup for callers still holding a raw label. Unknown labels
/// get an empty slice, never an error.
pub fn compatible_recipients(label: &str) -> &'static [BloodType] {
    match label.parse::<BloodType>() {
        Ok(blood_type) => can_donate_to(blood_type),
        Err(_) => &[],
    }
}

/// String-keyed counterpart of [`can_receive_from`].
pub fn compatible_donors(label: &str) -> &'static [BloodType] {
    match label.parse::<BloodType>() {
        Ok(blood_type) => can_receive_from(blood_type),
        Err(_) => &[],
    }
}

/// The donor types a matcher falls back to when exact-type donors run out:
/// everything the patient can receive from, minus the exact type itself.
pub fn fallback_donor_types(blood_type: BloodType) -> Vec<BloodType> {
    can_receive_from(blood_type)
        .iter()
        .copied()
        .filter(|t| *t != blood_type)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::blood_type::ALL_BLOOD_TYPES;

    #[test]
    fn universal_donor_and_recipient() {
        assert_eq!(can_donate_to(ONeg).len(), 8);
        assert_eq!(can_receive_from(AbPos).len(), 8);
        assert_eq!(can_receive_from(ONeg), &[ONeg]);
        assert_eq!(can_donate_to(AbPos), &[AbPos]);
    }

    #[test]
    fn every_type_has_both_directions() {
        for bt in ALL_BLOOD_TYPES {
            assert!(!can_donate_to(bt).is_empty(), "{bt} has no recipients");
            assert!(!can_receive_from(bt).is_empty(), "{bt} has no donors");
            // A type is always compatible with itself
            assert!(can_donate_to(bt).contains(&bt));
            assert!(can_receive_from(bt).contains(&bt));
        }
    }

    #[test]
    fn directions_are_mirror_images() {
        for donor in ALL_BLOOD_TYPES {
            for recipient in ALL_BLOOD_TYPES {
                let gives = can_donate_to(donor).contains(&recipient);
                let takes = can_receive_from(recipient).contains(&donor);
                assert_eq!(gives, takes, "{donor} -> {recipient} tables disagree");
            }
        }
    }

    #[test]
    fn table_matches_clinical_chart() {
        assert_eq!(can_donate_to(OPos), &[OPos, APos, BPos, AbPos]);
        assert_eq!(can_donate_to(ANeg), &[ANeg, APos, AbNeg, AbPos]);
        assert_eq!(can_receive_from(APos), &[ONeg, OPos, ANeg, APos]);
        assert_eq!(can_receive_from(BPos), &[ONeg, OPos, BNeg, BPos]);
        assert_eq!(can_receive_from(AbNeg), &[ONeg, ANeg, BNeg, AbNeg]);
    }

    #[test]
    fn unknown_labels_get_empty_slices() {
        assert!(compatible_recipients("X+").is_empty());
        assert!(compatible_donors("").is_empty());
        assert_eq!(compatible_donors("B-"), can_receive_from(BNeg));
    }

    #[test]
    fn fallback_excludes_the_exact_type() {
        let fallback = fallback_donor_types(APos);
        assert_eq!(fallback, vec![ONeg, OPos, ANeg]);
        // O- patients have nowhere to fall back to
        assert!(fallback_donor_types(ONeg).is_empty());
    }
}
