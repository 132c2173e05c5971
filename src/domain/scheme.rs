// ==========================================
// O&M Readiness Tracker - Scheme
// ==========================================
// A water-supply project instance inside one district.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Three sequential sign-off dates gating the move into O&M
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationDates {
    pub agency_submitted: Option<NaiveDate>,
    pub third_party_verified: Option<NaiveDate>,
    pub engineer_verified: Option<NaiveDate>,
}

impl VerificationDates {
    /// Submitted by the agency; later milestones alone do not count
    pub fn is_under_verification(&self) -> bool {
        self.agency_submitted.is_some()
    }

    /// Returns the first pair of milestones recorded out of order.
    pub fn first_order_violation(&self) -> Option<(&'static str, &'static str)> {
        let ordered = [
            ("agency_submitted", self.agency_submitted),
            ("third_party_verified", self.third_party_verified),
            ("engineer_verified", self.engineer_verified),
        ];

        for (i, (earlier_name, earlier)) in ordered.iter().enumerate() {
            for (later_name, later) in ordered.iter().skip(i + 1) {
                if let (Some(a), Some(b)) = (earlier, later) {
                    if b < a {
                        return Some((earlier_name, later_name));
                    }
                }
            }
        }
        None
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheme {
    pub scheme_id: String,        // unique within district
    pub district_id: String,
    pub sr_no: Option<i64>,
    pub block: String,
    pub agency: String,
    pub scheme_name: String,
    pub has_secondary_site: bool, // TW-2
    pub verification: VerificationDates,
}
