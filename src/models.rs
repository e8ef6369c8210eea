use serde::{Deserialize, Serialize};

/// One registration row exactly as the sheet API delivers it. Every field is
/// a free-text string; absent columns deserialize to empty strings so a
/// malformed row never aborts the batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    pub timestamp: String,
    #[serde(rename = "fullNameArabic")]
    pub full_name_arabic: String,
    pub email: String,
    pub phone: String,
    pub governorate: String,
    pub university: String,
    pub faculty: String,
    pub year: String,
    pub committee: String,
    #[serde(rename = "hasVolunteered")]
    pub has_volunteered: String,
    #[serde(rename = "volunteerHistory")]
    pub volunteer_history: String,
    #[serde(rename = "acceptTerms")]
    pub accept_terms: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub value: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedShare {
    pub name: String,
    pub value: usize,
    pub percentage: f64,
}

/// One slot of the trailing 24-hour distribution. There are always exactly
/// 24 of these, one per hour of day, sparse data included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub count: usize,
}

/// Everything the presentation side consumes, derived fresh from one
/// snapshot of records. Nothing in here is mutated after creation.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub total_records: usize,
    pub returning_volunteers: usize,
    pub governorates: Vec<RankedShare>,
    pub universities: Vec<RankedShare>,
    pub hourly: Vec<HourBucket>,
}
