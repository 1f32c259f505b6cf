//! Shift domain entity, enums and write-payload validation.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserSummary;
use crate::config::{
    DATE_FORMAT, SERVICE_HUDTERAPEUT, SERVICE_MASSOR, STATUS_BOOKED, STATUS_CANCELED,
    STATUS_CANCELED_LEGACY, STATUS_COMPLETED, STATUS_OPEN, TIME_FORMAT,
};
use crate::errors::FieldErrors;

/// Services offered by the business
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ServiceKind {
    Massor,
    Hudterapeut,
}

impl ServiceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Massor => SERVICE_MASSOR,
            ServiceKind::Hudterapeut => SERVICE_HUDTERAPEUT,
        }
    }
}

impl FromStr for ServiceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SERVICE_MASSOR => Ok(ServiceKind::Massor),
            SERVICE_HUDTERAPEUT => Ok(ServiceKind::Hudterapeut),
            _ => Err(format!(
                "service must be one of: {}, {}",
                SERVICE_MASSOR, SERVICE_HUDTERAPEUT
            )),
        }
    }
}

impl std::fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shift lifecycle status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShiftStatus {
    #[default]
    Open,
    Booked,
    Completed,
    Canceled,
}

impl ShiftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftStatus::Open => STATUS_OPEN,
            ShiftStatus::Booked => STATUS_BOOKED,
            ShiftStatus::Completed => STATUS_COMPLETED,
            ShiftStatus::Canceled => STATUS_CANCELED,
        }
    }
}

impl FromStr for ShiftStatus {
    type Err = String;

    /// Accepts the canonical names plus `cancel`, which maps to `Canceled`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_OPEN => Ok(ShiftStatus::Open),
            STATUS_BOOKED => Ok(ShiftStatus::Booked),
            STATUS_COMPLETED => Ok(ShiftStatus::Completed),
            STATUS_CANCELED | STATUS_CANCELED_LEGACY => Ok(ShiftStatus::Canceled),
            _ => Err(format!(
                "status must be one of: {}, {}, {}, {}",
                STATUS_OPEN, STATUS_BOOKED, STATUS_COMPLETED, STATUS_CANCELED
            )),
        }
    }
}

impl std::fmt::Display for ShiftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shift domain entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: Uuid,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub service: ServiceKind,
    pub status: ShiftStatus,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Flat shift row returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ShiftRecord {
    pub id: Uuid,
    /// ISO date
    #[schema(example = "2025-01-10")]
    pub date: Option<String>,
    #[schema(example = "09:00")]
    pub start_time: String,
    #[schema(example = "10:30")]
    pub end_time: String,
    pub service: ServiceKind,
    pub status: ShiftStatus,
    pub customer: Option<UserSummary>,
    pub employee: Option<UserSummary>,
}

impl ShiftRecord {
    /// Project a shift with its (possibly missing) parties.
    pub fn project(
        shift: &Shift,
        customer: Option<UserSummary>,
        employee: Option<UserSummary>,
    ) -> Self {
        Self {
            id: shift.id,
            date: Some(shift.date.format(DATE_FORMAT).to_string()),
            start_time: shift.start_time.format(TIME_FORMAT).to_string(),
            end_time: shift.end_time.format(TIME_FORMAT).to_string(),
            service: shift.service,
            status: shift.status,
            customer,
            employee,
        }
    }
}

/// Shift create/update payload as received.
///
/// Every field is optional text so that missing and malformed values are
/// reported together as field errors.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ShiftInput {
    #[schema(example = "2025-01-10")]
    pub date: Option<String>,
    #[schema(example = "09:00")]
    pub start_time: Option<String>,
    #[schema(example = "10:30")]
    pub end_time: Option<String>,
    #[schema(example = "Massor")]
    pub service: Option<String>,
    pub customer_id: Option<String>,
    pub employee_id: Option<String>,
    #[schema(example = "booked")]
    pub status: Option<String>,
}

/// Validated shift fields ready for the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftDraft {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub service: ServiceKind,
    pub status: ShiftStatus,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
}

impl ShiftInput {
    /// Check formats and the time window.
    ///
    /// Whether the referenced users exist (and have the right role) needs the
    /// store and is checked by the shift service.
    pub fn validate(&self) -> Result<ShiftDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let date = required(&mut errors, "date", &self.date)
            .and_then(|raw| parse_date(raw).map_err(|m| errors.add("date", m)).ok());
        let start_time = required(&mut errors, "start_time", &self.start_time)
            .and_then(|raw| parse_time(raw).map_err(|m| errors.add("start_time", m)).ok());
        let end_time = required(&mut errors, "end_time", &self.end_time)
            .and_then(|raw| parse_time(raw).map_err(|m| errors.add("end_time", m)).ok());

        if let (Some(start), Some(end)) = (start_time, end_time) {
            if end <= start {
                errors.add("end_time", "end_time must be after start_time");
            }
        }

        let service = required(&mut errors, "service", &self.service)
            .and_then(|raw| raw.parse::<ServiceKind>().map_err(|m| errors.add("service", m)).ok());
        let customer_id = required(&mut errors, "customer_id", &self.customer_id)
            .and_then(|raw| parse_id("customer_id", raw).map_err(|m| errors.add("customer_id", m)).ok());
        let employee_id = required(&mut errors, "employee_id", &self.employee_id)
            .and_then(|raw| parse_id("employee_id", raw).map_err(|m| errors.add("employee_id", m)).ok());

        let status = match present(&self.status) {
            Some(raw) => raw
                .parse::<ShiftStatus>()
                .map_err(|m| errors.add("status", m))
                .ok(),
            None => Some(ShiftStatus::default()),
        };

        match (date, start_time, end_time, service, status, customer_id, employee_id) {
            (
                Some(date),
                Some(start_time),
                Some(end_time),
                Some(service),
                Some(status),
                Some(customer_id),
                Some(employee_id),
            ) if errors.is_empty() => Ok(ShiftDraft {
                date,
                start_time,
                end_time,
                service,
                status,
                customer_id,
                employee_id,
            }),
            _ => Err(errors),
        }
    }
}

/// Trimmed value, with blank strings treated as absent.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(errors: &mut FieldErrors, field: &str, value: &'a Option<String>) -> Option<&'a str> {
    let value = present(value);
    if value.is_none() {
        errors.add(field, format!("{} is required", field));
    }
    value
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| "must be a valid date (YYYY-MM-DD)".to_string())
}

/// Strict `HH:mm`: two-digit hour and minute.
pub(crate) fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    let well_formed = raw.len() == 5 && raw.as_bytes()[2] == b':';
    well_formed
        .then(|| NaiveTime::parse_from_str(raw, TIME_FORMAT).ok())
        .flatten()
        .ok_or_else(|| "must be a time in HH:mm format".to_string())
}

pub(crate) fn parse_id(field: &str, raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw).map_err(|_| format!("{} must be a valid identifier", field))
}
