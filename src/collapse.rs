use crate::models::RankedShare;

/// Label for the synthetic bucket that absorbs everything below the cut.
pub const OTHER_LABEL: &str = "جامعات أخرى";

/// Collapses a bucket list to at most `n` leading entries plus one "other"
/// bucket, for legend-friendly charting.
///
/// Buckets are sorted descending by percentage with a stable sort, so ties
/// keep their incoming order (first-occurrence order from the aggregator)
/// and the legend order is deterministic. A bucket survives only if it
/// ranks within the first `n` and its share is at least `min_percentage`;
/// everything else is summed into the "other" bucket. When nothing gets
/// merged, no "other" row is emitted, so the result has at most `n + 1`
/// entries.
pub fn collapse_to_top_n(
    buckets: &[RankedShare],
    n: usize,
    min_percentage: f64,
) -> Vec<RankedShare> {
    let mut sorted: Vec<RankedShare> = buckets.to_vec();
    sorted.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut kept: Vec<RankedShare> = Vec::new();
    let mut other: Option<RankedShare> = None;

    for (rank, bucket) in sorted.into_iter().enumerate() {
        if rank < n && bucket.percentage >= min_percentage {
            kept.push(bucket);
            continue;
        }

        match other.as_mut() {
            Some(merged) => {
                merged.value += bucket.value;
                merged.percentage += bucket.percentage;
            }
            None => {
                other = Some(RankedShare {
                    name: OTHER_LABEL.to_string(),
                    value: bucket.value,
                    percentage: bucket.percentage,
                });
            }
        }
    }

    if let Some(merged) = other {
        kept.push(merged);
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn share(name: &str, value: usize, percentage: f64) -> RankedShare {
        RankedShare {
            name: name.to_string(),
            value,
            percentage,
        }
    }

    #[test]
    fn tail_buckets_merge_into_one_other_row() {
        let buckets = vec![
            share("A", 70, 70.0),
            share("B", 15, 15.0),
            share("C", 10, 10.0),
            share("D", 5, 5.0),
        ];

        let collapsed = collapse_to_top_n(&buckets, 2, 5.0);
        assert_eq!(collapsed.len(), 3);
        assert_eq!(collapsed[0].name, "A");
        assert_eq!(collapsed[1].name, "B");
        assert_eq!(collapsed[2].name, OTHER_LABEL);
        assert_eq!(collapsed[2].value, 15);
        assert!((collapsed[2].percentage - 15.0).abs() < 1e-9);
    }

    #[test]
    fn nothing_to_merge_means_no_other_row() {
        let buckets = vec![share("A", 12, 100.0)];

        let collapsed = collapse_to_top_n(&buckets, 5, 3.0);
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed[0].name, "A");
        assert!((collapsed[0].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn buckets_below_the_floor_collapse_even_inside_the_top_n() {
        let buckets = vec![
            share("A", 40, 80.0),
            share("B", 9, 18.0),
            share("C", 1, 2.0),
        ];

        let collapsed = collapse_to_top_n(&buckets, 5, 3.0);
        assert_eq!(collapsed.len(), 3);
        assert_eq!(collapsed[2].name, OTHER_LABEL);
        assert_eq!(collapsed[2].value, 1);
    }

    #[test]
    fn result_never_exceeds_n_plus_one_rows() {
        let buckets: Vec<RankedShare> = (0..12)
            .map(|i| share(&format!("u{i}"), 1, 100.0 / 12.0))
            .collect();

        let collapsed = collapse_to_top_n(&buckets, 4, 0.0);
        assert_eq!(collapsed.len(), 5);
        assert_eq!(collapsed[4].name, OTHER_LABEL);
        assert_eq!(collapsed[4].value, 8);
    }

    #[test]
    fn ties_keep_incoming_order() {
        let buckets = vec![
            share("first", 10, 25.0),
            share("second", 10, 25.0),
            share("third", 20, 50.0),
        ];

        let collapsed = collapse_to_top_n(&buckets, 3, 0.0);
        assert_eq!(collapsed[0].name, "third");
        assert_eq!(collapsed[1].name, "first");
        assert_eq!(collapsed[2].name, "second");
    }

    #[test]
    fn empty_input_collapses_to_nothing() {
        assert!(collapse_to_top_n(&[], 6, 3.0).is_empty());
    }

    #[test]
    fn collapsed_totals_preserve_the_input_sums() {
        let buckets = vec![
            share("A", 50, 50.0),
            share("B", 30, 30.0),
            share("C", 12, 12.0),
            share("D", 8, 8.0),
        ];

        let collapsed = collapse_to_top_n(&buckets, 2, 5.0);
        let value_sum: usize = collapsed.iter().map(|bucket| bucket.value).sum();
        let share_sum: f64 = collapsed.iter().map(|bucket| bucket.percentage).sum();
        assert_eq!(value_sum, 100);
        assert!((share_sum - 100.0).abs() < 1e-9);
    }
}
