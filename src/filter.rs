//! Client-side filtering of already-fetched record collections.
//!
//! List commands fetch a full table into memory and narrow it here. All
//! stages are conjunctive; a stage whose criterion is still at its default
//! is a no-op. The engine is pure: no I/O, no shared state, recomputed from
//! scratch on every call.

use chrono::NaiveDate;

/// Status sentinel meaning "no status constraint".
pub const STATUS_ALL: &str = "all";

/// Row view the filter stages need. Every field except `id` may be absent;
/// an absent field is skipped by its stage and never fails a record out of
/// the result.
pub trait Filterable {
    fn id(&self) -> &str;
    fn subject(&self) -> &str;
    fn reference(&self) -> Option<&str>;
    fn status(&self) -> Option<&str>;
    fn due_date(&self) -> Option<NaiveDate>;
    fn amount(&self) -> Option<f64>;
}

// Allows re-filtering an already-filtered view (`Vec<&R>`).
impl<R: Filterable + ?Sized> Filterable for &R {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn subject(&self) -> &str {
        (**self).subject()
    }
    fn reference(&self) -> Option<&str> {
        (**self).reference()
    }
    fn status(&self) -> Option<&str> {
        (**self).status()
    }
    fn due_date(&self) -> Option<NaiveDate> {
        (**self).due_date()
    }
    fn amount(&self) -> Option<f64> {
        (**self).amount()
    }
}

/// Current filter state, owned by the presenting layer and never persisted.
/// Amount bounds are already-parsed numbers; free-form user input goes
/// through [`parse_amount`] first.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub text_query: String,
    pub status: String,
    pub due_from: Option<NaiveDate>,
    pub due_to: Option<NaiveDate>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            text_query: String::new(),
            status: STATUS_ALL.to_string(),
            due_from: None,
            due_to: None,
            amount_min: None,
            amount_max: None,
        }
    }
}

impl FilterCriteria {
    /// All fields back to their defaults, atomically. With reset criteria,
    /// [`filter`] is the identity.
    pub fn reset() -> Self {
        Self::default()
    }

    pub fn has_constraints(&self) -> bool {
        !self.text_query.is_empty()
            || !self.status.eq_ignore_ascii_case(STATUS_ALL)
            || self.due_from.is_some()
            || self.due_to.is_some()
            || self.amount_min.is_some()
            || self.amount_max.is_some()
    }
}

/// Single-record predicate behind [`filter`].
pub fn matches<R: Filterable>(record: &R, criteria: &FilterCriteria) -> bool {
    if !criteria.text_query.is_empty() {
        let q = criteria.text_query.to_lowercase();
        let hit = record.subject().to_lowercase().contains(&q)
            || record
                .reference()
                .map(|r| r.to_lowercase().contains(&q))
                .unwrap_or(false)
            || record.id().to_lowercase().contains(&q);
        if !hit {
            return false;
        }
    }

    if !criteria.status.eq_ignore_ascii_case(STATUS_ALL) {
        if let Some(status) = record.status() {
            if status.to_lowercase() != criteria.status.to_lowercase() {
                return false;
            }
        }
    }

    if let Some(from) = criteria.due_from {
        if let Some(due) = record.due_date() {
            if due < from {
                return false;
            }
        }
    }
    if let Some(to) = criteria.due_to {
        if let Some(due) = record.due_date() {
            if due > to {
                return false;
            }
        }
    }

    if let Some(min) = criteria.amount_min {
        if let Some(amount) = record.amount() {
            if amount < min {
                return false;
            }
        }
    }
    if let Some(max) = criteria.amount_max {
        if let Some(amount) = record.amount() {
            if amount > max {
                return false;
            }
        }
    }

    true
}

/// Stable filter: the result is a subset of `records` in their original
/// order, and the input is left untouched.
pub fn filter<'a, R: Filterable>(records: &'a [R], criteria: &FilterCriteria) -> Vec<&'a R> {
    records.iter().filter(|r| matches(*r, criteria)).collect()
}

/// Boundary parse for free-form amount input. Empty, non-numeric, and
/// non-finite input all deactivate the amount stage instead of erroring:
/// partial filter input must never hide the whole list.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Strict date parse for CLI flags (dates come from flags, not free text,
/// so a typo is an error rather than a silently inactive stage).
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date: {} (expected YYYY-MM-DD)", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: String,
        subject: String,
        reference: Option<String>,
        status: Option<String>,
        due: Option<NaiveDate>,
        amount: Option<f64>,
    }

    impl Filterable for Row {
        fn id(&self) -> &str {
            &self.id
        }
        fn subject(&self) -> &str {
            &self.subject
        }
        fn reference(&self) -> Option<&str> {
            self.reference.as_deref()
        }
        fn status(&self) -> Option<&str> {
            self.status.as_deref()
        }
        fn due_date(&self) -> Option<NaiveDate> {
            self.due
        }
        fn amount(&self) -> Option<f64> {
            self.amount
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn row(
        id: &str,
        subject: &str,
        reference: Option<&str>,
        status: Option<&str>,
        due: Option<NaiveDate>,
        amount: Option<f64>,
    ) -> Row {
        Row {
            id: id.to_string(),
            subject: subject.to_string(),
            reference: reference.map(str::to_string),
            status: status.map(str::to_string),
            due,
            amount,
        }
    }

    fn sample() -> Vec<Row> {
        vec![
            row(
                "1",
                "Acme Corp",
                Some("INV-001"),
                Some("Pendiente"),
                Some(d(2024, 1, 10)),
                Some(500.0),
            ),
            row(
                "2",
                "Beta LLC",
                Some("INV-002"),
                Some("Pagado"),
                Some(d(2024, 2, 15)),
                Some(1500.0),
            ),
        ]
    }

    fn ids(rows: &[&Row]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn default_criteria_is_identity() {
        let rows = sample();
        let out = filter(&rows, &FilterCriteria::default());
        assert_eq!(ids(&out), vec!["1", "2"]);
    }

    #[test]
    fn reset_restores_identity() {
        let rows = sample();
        let mut criteria = FilterCriteria {
            text_query: "acme".to_string(),
            amount_min: Some(10_000.0),
            ..Default::default()
        };
        assert!(filter(&rows, &criteria).len() < rows.len());
        criteria = FilterCriteria::reset();
        assert!(!criteria.has_constraints());
        assert_eq!(filter(&rows, &criteria).len(), rows.len());
    }

    #[test]
    fn filter_is_idempotent() {
        let rows = sample();
        let criteria = FilterCriteria {
            amount_min: Some(1000.0),
            ..Default::default()
        };
        let once = filter(&rows, &criteria);
        let twice = filter(&once, &criteria);
        assert_eq!(
            once.iter().map(|r| r.id()).collect::<Vec<_>>(),
            twice.iter().map(|r| r.id()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn result_preserves_input_order() {
        let mut rows = sample();
        rows.push(row(
            "3",
            "Acme Sur",
            None,
            Some("pendiente"),
            Some(d(2024, 3, 1)),
            Some(700.0),
        ));
        let criteria = FilterCriteria {
            text_query: "acme".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &criteria)), vec!["1", "3"]);
    }

    #[test]
    fn text_query_matches_subject_reference_and_id() {
        let rows = sample();
        let by_subject = FilterCriteria {
            text_query: "acme".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &by_subject)), vec!["1"]);

        let by_reference = FilterCriteria {
            text_query: "inv-002".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &by_reference)), vec!["2"]);

        let by_id = FilterCriteria {
            text_query: "2".to_string(),
            ..Default::default()
        };
        assert!(filter(&rows, &by_id).iter().any(|r| r.id() == "2"));
    }

    #[test]
    fn text_query_without_hits_returns_empty() {
        let rows = sample();
        let criteria = FilterCriteria {
            text_query: "zzz".to_string(),
            ..Default::default()
        };
        assert!(filter(&rows, &criteria).is_empty());
    }

    #[test]
    fn text_query_skips_absent_reference() {
        let rows = vec![row("7", "Gamma", None, None, None, None)];
        let criteria = FilterCriteria {
            text_query: "inv".to_string(),
            ..Default::default()
        };
        assert!(filter(&rows, &criteria).is_empty());
    }

    #[test]
    fn status_filter_is_case_insensitive() {
        let rows = sample();
        let criteria = FilterCriteria {
            status: "pagado".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &criteria)), vec!["2"]);

        let upper = FilterCriteria {
            status: "PENDIENTE".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &upper)), vec!["1"]);
    }

    #[test]
    fn all_sentinel_is_case_insensitive() {
        let rows = sample();
        let criteria = FilterCriteria {
            status: "All".to_string(),
            ..Default::default()
        };
        assert_eq!(filter(&rows, &criteria).len(), rows.len());
    }

    #[test]
    fn date_range_is_inclusive() {
        let rows = sample();
        let criteria = FilterCriteria {
            due_from: Some(d(2024, 2, 1)),
            due_to: Some(d(2024, 2, 28)),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &criteria)), vec!["2"]);

        let boundary = FilterCriteria {
            due_from: Some(d(2024, 1, 10)),
            due_to: Some(d(2024, 2, 15)),
            ..Default::default()
        };
        assert_eq!(filter(&rows, &boundary).len(), 2);
    }

    #[test]
    fn amount_bounds_narrow_the_result() {
        let rows = sample();
        let min = FilterCriteria {
            amount_min: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &min)), vec!["2"]);

        let max = FilterCriteria {
            amount_max: Some(1000.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &max)), vec!["1"]);
    }

    #[test]
    fn raising_amount_min_never_grows_the_result() {
        let rows = sample();
        let low = FilterCriteria {
            amount_min: Some(500.0),
            ..Default::default()
        };
        let high = FilterCriteria {
            amount_min: Some(1000.0),
            ..Default::default()
        };
        assert!(filter(&rows, &high).len() <= filter(&rows, &low).len());
    }

    #[test]
    fn missing_optional_fields_never_exclude() {
        let rows = vec![row("9", "Sin Datos SA", None, None, None, None)];
        let criteria = FilterCriteria {
            status: "pendiente".to_string(),
            due_from: Some(d(2024, 1, 1)),
            due_to: Some(d(2024, 12, 31)),
            amount_min: Some(100.0),
            amount_max: Some(900.0),
            ..Default::default()
        };
        assert_eq!(ids(&filter(&rows, &criteria)), vec!["9"]);
    }

    #[test]
    fn parse_amount_tolerates_malformed_input() {
        assert_eq!(parse_amount("1000"), Some(1000.0));
        assert_eq!(parse_amount(" 42.5 "), Some(42.5));
        assert_eq!(parse_amount("-3"), Some(-3.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("nan"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn malformed_amount_equals_unset() {
        let rows = sample();
        let malformed = FilterCriteria {
            amount_min: parse_amount("abc"),
            ..Default::default()
        };
        assert_eq!(
            filter(&rows, &malformed).len(),
            filter(&rows, &FilterCriteria::default()).len()
        );
    }

    #[test]
    fn parse_date_accepts_iso_and_rejects_garbage() {
        assert_eq!(parse_date("2024-02-15").unwrap(), d(2024, 2, 15));
        assert_eq!(parse_date(" 2024-02-15 ").unwrap(), d(2024, 2, 15));
        assert!(parse_date("15/02/2024").is_err());
        assert!(parse_date("not a date").is_err());
    }
}
