//! Grouping and counting primitives shared by the analyses.
//!
//! Groups are kept in first-encounter order and every sort is stable, so
//! ties always resolve to the order in which values first appear in the
//! table.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;

/// A category and its aggregated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedGroup {
    pub name: String,
    pub value: f64,
}

/// Row count for one calendar month, keyed by its first day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: NaiveDate,
    pub count: usize,
}

/// Mean value for one calendar year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearMean {
    pub year: i32,
    pub mean: f64,
}

/// Occurrences of one verbatim string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCount {
    pub token: String,
    pub count: usize,
}

/// Accumulate `(sum, count)` per key, preserving first-encounter order.
///
/// NaN values register their key but add nothing to the sum or count, so a
/// group with only NaN values has a NaN mean and a zero sum.
fn group_totals<'a, I>(rows: I) -> Vec<(&'a str, f64, usize)>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut index: FxHashMap<&'a str, usize> = FxHashMap::default();
    let mut groups: Vec<(&'a str, f64, usize)> = Vec::new();

    for (key, value) in rows {
        let i = *index.entry(key).or_insert_with(|| {
            groups.push((key, 0.0, 0));
            groups.len() - 1
        });
        if !value.is_nan() {
            groups[i].1 += value;
            groups[i].2 += 1;
        }
    }

    groups
}

/// Stable descending sort by value with NaN last, then keep the first `n`.
fn take_top(mut groups: Vec<RankedGroup>, n: usize) -> Vec<RankedGroup> {
    groups.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or_else(|| a.value.is_nan().cmp(&b.value.is_nan()))
    });
    groups.truncate(n);
    groups
}

/// Top `n` groups by mean value.
pub fn top_n_by_mean<'a, I>(rows: I, n: usize) -> Vec<RankedGroup>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let groups = group_totals(rows)
        .into_iter()
        .map(|(name, sum, count)| RankedGroup {
            name: name.to_string(),
            value: sum / count as f64,
        })
        .collect();
    take_top(groups, n)
}

/// Top `n` groups by summed value.
pub fn top_n_by_sum<'a, I>(rows: I, n: usize) -> Vec<RankedGroup>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let groups = group_totals(rows)
        .into_iter()
        .map(|(name, sum, _)| RankedGroup {
            name: name.to_string(),
            value: sum,
        })
        .collect();
    take_top(groups, n)
}

/// Rows per calendar month, one entry per month present, ascending.
pub fn count_by_month<I>(timestamps: I) -> Vec<MonthCount>
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let mut months: BTreeMap<(i32, u32), usize> = BTreeMap::new();
    for ts in timestamps {
        *months.entry((ts.year(), ts.month())).or_insert(0) += 1;
    }

    months
        .into_iter()
        .filter_map(|((year, month), count)| {
            NaiveDate::from_ymd_opt(year, month, 1).map(|month| MonthCount { month, count })
        })
        .collect()
}

/// Mean value per calendar year, one entry per year present, ascending.
pub fn mean_by_year<I>(rows: I) -> Vec<YearMean>
where
    I: IntoIterator<Item = (NaiveDateTime, f64)>,
{
    let mut years: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for (ts, value) in rows {
        let entry = years.entry(ts.year()).or_insert((0.0, 0));
        if !value.is_nan() {
            entry.0 += value;
            entry.1 += 1;
        }
    }

    years
        .into_iter()
        .map(|(year, (sum, count))| YearMean {
            year,
            mean: sum / count as f64,
        })
        .collect()
}

/// Raw `(x, y)` pairs in row order.
pub fn pairs<I>(rows: I) -> Vec<(f64, f64)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    rows.into_iter().collect()
}

/// Occurrence count per distinct string, most frequent first.
pub fn frequency_table<'a, I>(values: I) -> Vec<TokenCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table: Vec<TokenCount> = group_totals(values.into_iter().map(|v| (v, 0.0)))
        .into_iter()
        .map(|(token, _, count)| TokenCount {
            token: token.to_string(),
            count,
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count));
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::fixtures::at;

    #[test]
    fn test_top_n_by_mean_tie_keeps_encounter_order() {
        let rows = [("A", 100.0), ("B", 200.0), ("A", 300.0)];
        let top = top_n_by_mean(rows, 10);

        assert_eq!(
            top,
            vec![
                RankedGroup {
                    name: "A".to_string(),
                    value: 200.0
                },
                RankedGroup {
                    name: "B".to_string(),
                    value: 200.0
                },
            ]
        );
    }

    #[test]
    fn test_top_n_by_sum_truncates_and_sorts() {
        let rows: Vec<(String, f64)> = (0..15).map(|i| (format!("artist{i}"), i as f64)).collect();
        let top = top_n_by_sum(rows.iter().map(|(k, v)| (k.as_str(), *v)), 10);

        assert_eq!(top.len(), 10);
        assert_eq!(top[0].name, "artist14");
        assert_eq!(top[9].name, "artist5");
        assert!(top.windows(2).all(|w| w[0].value >= w[1].value));
    }

    #[test]
    fn test_top_n_by_sum_accumulates_repeats() {
        let rows = [("X", 5.0), ("Y", 7.0), ("X", 5.0)];
        let top = top_n_by_sum(rows, 10);

        assert_eq!(top[0].name, "X");
        assert_eq!(top[0].value, 10.0);
        assert_eq!(top[1].value, 7.0);
    }

    #[test]
    fn test_top_n_empty() {
        assert!(top_n_by_mean(Vec::<(&str, f64)>::new(), 10).is_empty());
    }

    #[test]
    fn test_count_by_month_skips_absent_months() {
        let counts = count_by_month(vec![
            at(2017, 3, 5),
            at(2016, 11, 1),
            at(2017, 3, 30),
            at(2017, 1, 2),
        ]);

        let months: Vec<(i32, u32, usize)> = counts
            .iter()
            .map(|m| (m.month.year(), m.month.month(), m.count))
            .collect();
        assert_eq!(months, vec![(2016, 11, 1), (2017, 1, 1), (2017, 3, 2)]);
        assert_eq!(counts.iter().map(|m| m.count).sum::<usize>(), 4);
    }

    #[test]
    fn test_mean_by_year() {
        let means = mean_by_year(vec![
            (at(2015, 1, 1), 100.0),
            (at(2016, 6, 1), 180.0),
            (at(2015, 12, 31), 200.0),
        ]);

        assert_eq!(
            means,
            vec![
                YearMean {
                    year: 2015,
                    mean: 150.0
                },
                YearMean {
                    year: 2016,
                    mean: 180.0
                },
            ]
        );
    }

    #[test]
    fn test_top_n_by_mean_skips_nan_and_ranks_nan_last() {
        let rows = [
            ("Ghost", f64::NAN),
            ("A", 100.0),
            ("B", f64::NAN),
            ("B", 300.0),
            ("C", 200.0),
        ];
        let top = top_n_by_mean(rows, 10);

        let names: Vec<&str> = top.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C", "A", "Ghost"]);
        assert_eq!(top[0].value, 300.0);
        assert!(top[3].value.is_nan());

        // A NaN-only group never displaces a real one from the top n
        let top = top_n_by_mean(rows, 3);
        assert!(top.iter().all(|g| g.value.is_finite()));
    }

    #[test]
    fn test_top_n_by_sum_ignores_nan() {
        let top = top_n_by_sum([("X", f64::NAN), ("X", 4.0), ("Y", 1.0)], 10);
        assert_eq!(top[0].name, "X");
        assert_eq!(top[0].value, 4.0);
    }

    #[test]
    fn test_mean_by_year_skips_nan() {
        let means = mean_by_year(vec![(at(2015, 1, 1), f64::NAN), (at(2015, 6, 1), 120.0)]);
        assert_eq!(means, vec![YearMean { year: 2015, mean: 120.0 }]);
    }

    #[test]
    fn test_pairs_keep_row_order_and_duplicates() {
        let points = pairs(vec![(3.0, 1.0), (1.0, 2.0), (3.0, 1.0)]);
        assert_eq!(points, vec![(3.0, 1.0), (1.0, 2.0), (3.0, 1.0)]);
    }

    #[test]
    fn test_frequency_table_is_verbatim() {
        let table = frequency_table(["Hello", "hello", "Hello", "Hello ", "hello"]);

        assert_eq!(table.len(), 3);
        assert_eq!(table[0].token, "Hello");
        assert_eq!(table[0].count, 2);
        assert_eq!(table[1].token, "hello");
        assert_eq!(table[1].count, 2);
        assert_eq!(table[2].token, "Hello ");
        assert_eq!(table.iter().map(|t| t.count).sum::<usize>(), 5);
    }
}
