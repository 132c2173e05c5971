// ==========================================
// O&M Readiness Tracker - District
// ==========================================
// A district isolates all scheme, progress and issue data.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct District {
    pub district_id: String,            // uuid v4
    pub district_name: String,
    pub district_code: String,          // unique login code, e.g. AYODHYA001
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

/// Input for district creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewDistrict {
    pub district_name: String,
    pub district_code: String,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
}
