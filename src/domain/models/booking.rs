use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Package,
    Ride,
}

impl BookingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingKind::Package => "package",
            BookingKind::Ride => "ride",
        }
    }
}

impl FromStr for BookingKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "package" => Ok(BookingKind::Package),
            "ride" => Ok(BookingKind::Ride),
            other => Err(format!("unknown booking kind: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Approved => "approved",
            BookingStatus::Rejected => "rejected",
        }
    }

    /// Approved and rejected are terminal; only pending bookings may change.
    pub fn is_decided(&self) -> bool {
        !matches!(self, BookingStatus::Pending)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "approved" => Ok(BookingStatus::Approved),
            "rejected" => Ok(BookingStatus::Rejected),
            other => Err(format!("unknown booking status: {}", other)),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Oneway,
    Roundtrip,
    Hourly,
    Daily,
}

impl TripType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripType::Oneway => "oneway",
            TripType::Roundtrip => "roundtrip",
            TripType::Hourly => "hourly",
            TripType::Daily => "daily",
        }
    }
}

impl FromStr for TripType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "oneway" => Ok(TripType::Oneway),
            "roundtrip" => Ok(TripType::Roundtrip),
            "hourly" => Ok(TripType::Hourly),
            "daily" => Ok(TripType::Daily),
            other => Err(format!("unknown trip type: {}", other)),
        }
    }
}

/// A booking is common data plus exactly one variant. The variant fixes the
/// initial status: packages await an admin decision, rides are confirmed on
/// the spot and never carry an owner.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: Option<String>,
    pub total_amount: f64,
    pub status: BookingStatus,
    pub rejection_reason: Option<String>,
    #[serde(flatten)]
    pub details: BookingDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum BookingDetails {
    Package(PackageDetails),
    Ride(RideDetails),
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PackageDetails {
    pub customer_id: String,
    pub package_name: String,
    pub package_id: i64,
    pub travelers: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RideDetails {
    pub ride_type: String,
    pub ride_id: i64,
    pub pickup_location: String,
    pub destination: String,
    pub pickup_date: DateTime<Utc>,
    pub pickup_time: String,
    pub trip_type: TripType,
    pub passengers: i64,
}

pub struct NewBookingCommon {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: Option<String>,
    pub total_amount: f64,
}

impl Booking {
    pub fn package(common: NewBookingCommon, details: PackageDetails) -> Result<Self, AppError> {
        validate_common(&common)?;
        if details.package_name.trim().is_empty() {
            return Err(AppError::Validation("packageName is required".into()));
        }
        if details.travelers < 1 {
            return Err(AppError::Validation("travelers must be at least 1".into()));
        }

        Ok(Self::assemble(common, BookingStatus::Pending, BookingDetails::Package(details)))
    }

    pub fn ride(common: NewBookingCommon, details: RideDetails) -> Result<Self, AppError> {
        validate_common(&common)?;
        for (field, value) in [
            ("rideType", &details.ride_type),
            ("pickupLocation", &details.pickup_location),
            ("destination", &details.destination),
            ("pickupTime", &details.pickup_time),
        ] {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} is required", field)));
            }
        }
        if details.passengers < 1 {
            return Err(AppError::Validation("passengers must be at least 1".into()));
        }

        Ok(Self::assemble(common, BookingStatus::Approved, BookingDetails::Ride(details)))
    }

    fn assemble(common: NewBookingCommon, status: BookingStatus, details: BookingDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            full_name: common.full_name,
            email: common.email,
            phone: common.phone,
            special_requests: common.special_requests,
            total_amount: common.total_amount,
            status,
            rejection_reason: None,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn kind(&self) -> BookingKind {
        match self.details {
            BookingDetails::Package(_) => BookingKind::Package,
            BookingDetails::Ride(_) => BookingKind::Ride,
        }
    }

    pub fn package_details(&self) -> Option<&PackageDetails> {
        match &self.details {
            BookingDetails::Package(d) => Some(d),
            BookingDetails::Ride(_) => None,
        }
    }

    pub fn ride_details(&self) -> Option<&RideDetails> {
        match &self.details {
            BookingDetails::Ride(d) => Some(d),
            BookingDetails::Package(_) => None,
        }
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.package_details().map(|d| d.customer_id.as_str())
    }
}

fn validate_common(common: &NewBookingCommon) -> Result<(), AppError> {
    for (field, value) in [
        ("fullName", &common.full_name),
        ("email", &common.email),
        ("phone", &common.phone),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field)));
        }
    }
    if !common.total_amount.is_finite() || common.total_amount <= 0.0 {
        return Err(AppError::Validation("totalAmount must be a positive number".into()));
    }
    Ok(())
}

/// Flat persistence projection of a booking. Variant columns are nullable in
/// the store; conversion back into the sum type rejects corrupt rows.
#[derive(Debug, FromRow)]
pub struct BookingRow {
    pub id: String,
    pub kind: String,
    pub customer_id: Option<String>,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub special_requests: Option<String>,
    pub total_amount: f64,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub package_name: Option<String>,
    pub package_id: Option<i64>,
    pub travelers: Option<i64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub ride_type: Option<String>,
    pub ride_id: Option<i64>,
    pub pickup_location: Option<String>,
    pub destination: Option<String>,
    pub pickup_date: Option<DateTime<Utc>>,
    pub pickup_time: Option<String>,
    pub trip_type: Option<String>,
    pub passengers: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, AppError> {
        let status = row.status.parse::<BookingStatus>()
            .map_err(|e| corrupt_row(&row.id, &e))?;

        let kind = row.kind.parse::<BookingKind>()
            .map_err(|e| corrupt_row(&row.id, &e))?;

        let details = match kind {
            BookingKind::Package => BookingDetails::Package(PackageDetails {
                customer_id: row.customer_id
                    .ok_or_else(|| corrupt_row(&row.id, "package booking without customer_id"))?,
                package_name: row.package_name
                    .ok_or_else(|| corrupt_row(&row.id, "package booking without package_name"))?,
                package_id: row.package_id
                    .ok_or_else(|| corrupt_row(&row.id, "package booking without package_id"))?,
                travelers: row.travelers
                    .ok_or_else(|| corrupt_row(&row.id, "package booking without travelers"))?,
                start_date: row.start_date
                    .ok_or_else(|| corrupt_row(&row.id, "package booking without start_date"))?,
                end_date: row.end_date
                    .ok_or_else(|| corrupt_row(&row.id, "package booking without end_date"))?,
            }),
            BookingKind::Ride => BookingDetails::Ride(RideDetails {
                ride_type: row.ride_type
                    .ok_or_else(|| corrupt_row(&row.id, "ride booking without ride_type"))?,
                ride_id: row.ride_id
                    .ok_or_else(|| corrupt_row(&row.id, "ride booking without ride_id"))?,
                pickup_location: row.pickup_location
                    .ok_or_else(|| corrupt_row(&row.id, "ride booking without pickup_location"))?,
                destination: row.destination
                    .ok_or_else(|| corrupt_row(&row.id, "ride booking without destination"))?,
                pickup_date: row.pickup_date
                    .ok_or_else(|| corrupt_row(&row.id, "ride booking without pickup_date"))?,
                pickup_time: row.pickup_time
                    .ok_or_else(|| corrupt_row(&row.id, "ride booking without pickup_time"))?,
                trip_type: row.trip_type
                    .ok_or_else(|| corrupt_row(&row.id, "ride booking without trip_type"))?
                    .parse::<TripType>()
                    .map_err(|e| corrupt_row(&row.id, &e))?,
                passengers: row.passengers
                    .ok_or_else(|| corrupt_row(&row.id, "ride booking without passengers"))?,
            }),
        };

        Ok(Booking {
            id: row.id,
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
            special_requests: row.special_requests,
            total_amount: row.total_amount,
            status,
            rejection_reason: row.rejection_reason,
            details,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn corrupt_row(id: &str, detail: &str) -> AppError {
    AppError::InternalWithMsg(format!("corrupt booking row {}: {}", id, detail))
}

/// Minimal customer profile attached to a booking for the admin view.
#[derive(Debug, Serialize, Clone)]
pub struct OwnerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

pub struct BookingWithOwner {
    pub booking: Booking,
    pub owner: Option<OwnerProfile>,
}
