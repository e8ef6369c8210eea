use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDateTime, Timelike, Utc};

use crate::collapse;
use crate::models::{DashboardSummary, HourBucket, NamedCount, RankedShare, RawRecord};
use crate::normalize;

/// The "yes" token the registration form emits for returning volunteers.
const RETURNING_TOKEN: &str = "نعم";

/// Timestamp shapes seen in sheet exports, tried in order after RFC 3339.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// Groups records into counted buckets in a single pass. `key_fn` returning
/// `None` means the record has no usable value for this dimension; it is
/// skipped for this aggregation only and the skip is reported on the log.
///
/// Distinct keys keep first-occurrence order, so the same input always
/// produces the same output.
pub fn aggregate_by<F>(records: &[RawRecord], key_fn: F) -> Vec<NamedCount>
where
    F: Fn(&RawRecord) -> Option<String>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<NamedCount> = Vec::new();
    let mut skipped = 0usize;

    for record in records {
        let Some(key) = key_fn(record) else {
            skipped += 1;
            continue;
        };
        match positions.get(&key) {
            Some(&index) => counts[index].value += 1,
            None => {
                positions.insert(key.clone(), counts.len());
                counts.push(NamedCount {
                    name: key,
                    value: 1,
                });
            }
        }
    }

    if skipped > 0 {
        log::debug!("skipped {skipped} records without a usable key for this aggregation");
    }

    counts
}

pub fn governorate_counts(records: &[RawRecord]) -> Vec<NamedCount> {
    aggregate_by(records, |record| {
        let governorate = record.governorate.trim();
        if governorate.is_empty() {
            None
        } else {
            Some(governorate.to_string())
        }
    })
}

/// University buckets are keyed through the name normalizer, so spelling
/// and transliteration variants land in one bucket.
pub fn university_counts(records: &[RawRecord]) -> Vec<NamedCount> {
    aggregate_by(records, |record| {
        if record.university.trim().is_empty() {
            None
        } else {
            Some(normalize::normalize(&record.university))
        }
    })
}

/// Attaches percentages over the whole bucket set. A zero total defines
/// every percentage as 0 rather than dividing by zero.
pub fn ranked_shares(counts: &[NamedCount]) -> Vec<RankedShare> {
    let total: usize = counts.iter().map(|count| count.value).sum();

    counts
        .iter()
        .map(|count| RankedShare {
            name: count.name.clone(),
            value: count.value,
            percentage: if total == 0 {
                0.0
            } else {
                100.0 * count.value as f64 / total as f64
            },
        })
        .collect()
}

/// Parses a sheet timestamp, trying RFC 3339 first and then the known
/// export formats. Naive timestamps are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.and_utc());
        }
    }

    None
}

/// Buckets registrations from the trailing 24-hour window ending at `now`
/// by hour of day. Always returns exactly 24 buckets, oldest hour first and
/// the current hour last; hours with no registrations stay at zero.
///
/// Records whose timestamp does not parse are left out of this distribution
/// (and only this one) with a log diagnostic; they never fail the batch.
pub fn hourly_distribution(records: &[RawRecord], now: DateTime<Utc>) -> Vec<HourBucket> {
    let window_start = now - Duration::hours(24);

    let mut buckets: Vec<HourBucket> = (0..24i64)
        .map(|offset| HourBucket {
            hour: (now - Duration::hours(23 - offset)).hour(),
            count: 0,
        })
        .collect();

    let mut unparseable = 0usize;
    for record in records {
        let Some(parsed) = parse_timestamp(&record.timestamp) else {
            unparseable += 1;
            continue;
        };
        if parsed < window_start || parsed > now {
            continue;
        }
        if let Some(bucket) = buckets.iter_mut().find(|bucket| bucket.hour == parsed.hour()) {
            bucket.count += 1;
        }
    }

    if unparseable > 0 {
        log::warn!(
            "{unparseable} records had no parseable timestamp and were left out of the hourly distribution"
        );
    }

    buckets
}

/// Derives the full dashboard summary from one snapshot of records. Pure
/// over its inputs: the same records and `now` always produce the same
/// summary.
pub fn summarize(
    records: &[RawRecord],
    now: DateTime<Utc>,
    top: usize,
    min_share: f64,
) -> DashboardSummary {
    let mut governorates = ranked_shares(&governorate_counts(records));
    governorates.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let universities =
        collapse::collapse_to_top_n(&ranked_shares(&university_counts(records)), top, min_share);

    let returning_volunteers = records
        .iter()
        .filter(|record| record.has_volunteered.trim() == RETURNING_TOKEN)
        .count();

    DashboardSummary {
        total_records: records.len(),
        returning_volunteers,
        governorates,
        universities,
        hourly: hourly_distribution(records, now),
    }
}
