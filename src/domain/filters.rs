//! Shift listing filters: parsing, normalization and role scoping.
//!
//! A request goes through three stages before it reaches the store:
//!
//! 1. [`ShiftFilters::from_raw`] parses the query string, maps the legacy
//!    single `date` onto the range and puts reversed bounds back in order.
//! 2. [`ShiftFilters::scoped_for`] applies the actor's role, overriding
//!    whatever party filters the client sent.
//! 3. [`EffectiveFilters`] echoes the applied values back for the UI.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::policy::Actor;
use super::shift::{parse_date, parse_id, present, ServiceKind, ShiftStatus};
use super::user::UserRole;
use crate::config::DATE_FORMAT;
use crate::errors::FieldErrors;

/// Shift listing query string, exactly as sent.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RawShiftFilters {
    /// Inclusive lower bound (YYYY-MM-DD)
    pub date_from: Option<String>,
    /// Inclusive upper bound (YYYY-MM-DD)
    pub date_to: Option<String>,
    /// Single day; used only when neither bound is given
    pub date: Option<String>,
    pub service: Option<String>,
    pub status: Option<String>,
    pub customer_id: Option<String>,
    pub employee_id: Option<String>,
}

/// Parsed and normalized shift filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftFilters {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub service: Option<ServiceKind>,
    pub status: Option<ShiftStatus>,
    pub customer_id: Option<Uuid>,
    pub employee_id: Option<Uuid>,
}

impl ShiftFilters {
    /// Parse every field, then normalize the date range.
    ///
    /// All format errors are collected. Whether the party ids exist is left to
    /// the caller.
    pub fn from_raw(raw: &RawShiftFilters) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::new();

        let mut date = |field: &str, value: &Option<String>| {
            present(value).and_then(|v| parse_date(v).map_err(|m| errors.add(field, m)).ok())
        };
        let date_from = date("date_from", &raw.date_from);
        let date_to = date("date_to", &raw.date_to);
        let single = date("date", &raw.date);

        let service = present(&raw.service)
            .and_then(|v| v.parse::<ServiceKind>().map_err(|m| errors.add("service", m)).ok());
        let status = present(&raw.status)
            .and_then(|v| v.parse::<ShiftStatus>().map_err(|m| errors.add("status", m)).ok());
        let customer_id = present(&raw.customer_id).and_then(|v| {
            parse_id("customer_id", v)
                .map_err(|m| errors.add("customer_id", m))
                .ok()
        });
        let employee_id = present(&raw.employee_id).and_then(|v| {
            parse_id("employee_id", v)
                .map_err(|m| errors.add("employee_id", m))
                .ok()
        });

        if !errors.is_empty() {
            return Err(errors);
        }

        let mut filters = Self {
            date_from,
            date_to,
            service,
            status,
            customer_id,
            employee_id,
        };
        filters.apply_legacy_date(single);
        filters.order_range();
        Ok(filters)
    }

    /// A lone `date` stands for the range `[date, date]`.
    fn apply_legacy_date(&mut self, single: Option<NaiveDate>) {
        if let Some(day) = single {
            if self.date_from.is_none() && self.date_to.is_none() {
                self.date_from = Some(day);
                self.date_to = Some(day);
            }
        }
    }

    /// Reversed bounds are swapped, never rejected.
    fn order_range(&mut self) {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                self.date_from = Some(to);
                self.date_to = Some(from);
            }
        }
    }

    /// Restrict the filters to what the actor may see.
    pub fn scoped_for(mut self, actor: &Actor) -> Self {
        match actor.role {
            UserRole::Customer => {
                self.customer_id = Some(actor.id);
                self.employee_id = None;
            }
            UserRole::Employee => {
                self.employee_id = Some(actor.id);
                self.customer_id = None;
            }
            UserRole::Admin => {}
        }
        self
    }

    /// Party ids given as filters, with the field they came from.
    pub fn referenced_users(&self) -> Vec<(&'static str, Uuid)> {
        let mut refs = Vec::new();
        if let Some(id) = self.customer_id {
            refs.push(("customer_id", id));
        }
        if let Some(id) = self.employee_id {
            refs.push(("employee_id", id));
        }
        refs
    }
}

/// Applied filter values; absent ones echo as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct EffectiveFilters {
    pub date_from: String,
    pub date_to: String,
    pub service: String,
    pub status: String,
    pub customer_id: String,
    pub employee_id: String,
}

impl From<&ShiftFilters> for EffectiveFilters {
    fn from(filters: &ShiftFilters) -> Self {
        fn echo<T: ToString>(value: Option<T>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }

        Self {
            date_from: echo(filters.date_from.map(|d| d.format(DATE_FORMAT))),
            date_to: echo(filters.date_to.map(|d| d.format(DATE_FORMAT))),
            service: echo(filters.service),
            status: echo(filters.status),
            customer_id: echo(filters.customer_id),
            employee_id: echo(filters.employee_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn raw() -> RawShiftFilters {
        RawShiftFilters::default()
    }

    #[test]
    fn test_legacy_date_becomes_single_day_range() {
        let filters = ShiftFilters::from_raw(&RawShiftFilters {
            date: Some("2025-01-10".to_string()),
            ..raw()
        })
        .unwrap();

        assert_eq!(filters.date_from, Some(day("2025-01-10")));
        assert_eq!(filters.date_to, Some(day("2025-01-10")));

        let echoed = EffectiveFilters::from(&filters);
        assert_eq!(echoed.date_from, "2025-01-10");
        assert_eq!(echoed.date_to, "2025-01-10");
    }

    #[test]
    fn test_legacy_date_ignored_when_a_bound_is_given() {
        let filters = ShiftFilters::from_raw(&RawShiftFilters {
            date: Some("2025-01-10".to_string()),
            date_to: Some("2025-02-01".to_string()),
            ..raw()
        })
        .unwrap();

        assert_eq!(filters.date_from, None);
        assert_eq!(filters.date_to, Some(day("2025-02-01")));
    }

    #[test]
    fn test_reversed_range_is_swapped() {
        let filters = ShiftFilters::from_raw(&RawShiftFilters {
            date_from: Some("2025-03-31".to_string()),
            date_to: Some("2025-03-01".to_string()),
            ..raw()
        })
        .unwrap();

        assert_eq!(filters.date_from, Some(day("2025-03-01")));
        assert_eq!(filters.date_to, Some(day("2025-03-31")));
    }

    #[test]
    fn test_swap_invariant_holds_for_many_pairs() {
        let dates = ["2024-12-31", "2025-01-01", "2025-01-15", "2025-06-30"];
        for a in dates {
            for b in dates {
                let filters = ShiftFilters::from_raw(&RawShiftFilters {
                    date_from: Some(a.to_string()),
                    date_to: Some(b.to_string()),
                    ..raw()
                })
                .unwrap();
                assert!(filters.date_from <= filters.date_to, "{} / {}", a, b);
            }
        }
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let filters = ShiftFilters::from_raw(&RawShiftFilters {
            date_from: Some(String::new()),
            date_to: Some(String::new()),
            date: Some(String::new()),
            service: Some(String::new()),
            status: Some(String::new()),
            customer_id: Some(String::new()),
            employee_id: Some(String::new()),
        })
        .unwrap();

        assert_eq!(filters, ShiftFilters::default());
        assert_eq!(EffectiveFilters::from(&filters), EffectiveFilters::default());
    }

    #[test]
    fn test_invalid_values_are_reported_per_field() {
        let errors = ShiftFilters::from_raw(&RawShiftFilters {
            date_from: Some("10/01/2025".to_string()),
            service: Some("Yoga".to_string()),
            status: Some("pending".to_string()),
            customer_id: Some("42".to_string()),
            ..raw()
        })
        .unwrap_err();

        assert_eq!(
            errors.fields().collect::<Vec<_>>(),
            vec!["customer_id", "date_from", "service", "status"]
        );
    }

    #[test]
    fn test_cancel_filter_echoes_canonical_spelling() {
        let filters = ShiftFilters::from_raw(&RawShiftFilters {
            status: Some("cancel".to_string()),
            ..raw()
        })
        .unwrap();

        assert_eq!(filters.status, Some(ShiftStatus::Canceled));
        assert_eq!(EffectiveFilters::from(&filters).status, "canceled");
    }

    #[test]
    fn test_customer_scope_overrides_client_filters() {
        let me = Uuid::new_v4();
        let filters = ShiftFilters {
            customer_id: Some(Uuid::new_v4()),
            employee_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
        .scoped_for(&Actor::new(me, UserRole::Customer));

        assert_eq!(filters.customer_id, Some(me));
        assert_eq!(filters.employee_id, None);
    }

    #[test]
    fn test_employee_scope_overrides_client_filters() {
        let me = Uuid::new_v4();
        let filters = ShiftFilters {
            customer_id: Some(Uuid::new_v4()),
            ..Default::default()
        }
        .scoped_for(&Actor::new(me, UserRole::Employee));

        assert_eq!(filters.employee_id, Some(me));
        assert_eq!(filters.customer_id, None);
    }

    #[test]
    fn test_admin_scope_keeps_filters() {
        let customer = Uuid::new_v4();
        let employee = Uuid::new_v4();
        let filters = ShiftFilters {
            customer_id: Some(customer),
            employee_id: Some(employee),
            ..Default::default()
        };

        let scoped = filters.clone().scoped_for(&Actor::new(Uuid::new_v4(), UserRole::Admin));
        assert_eq!(scoped, filters);
        assert_eq!(
            scoped.referenced_users(),
            vec![("customer_id", customer), ("employee_id", employee)]
        );
    }
}
