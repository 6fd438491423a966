use crate::domain::models::booking::{Booking, BookingStatus, OwnerProfile};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize)]
pub struct CustomerProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Serialize)]
pub struct CustomerAuthResponse {
    pub message: String,
    pub token: String,
    pub user: CustomerProfile,
}

#[derive(Serialize)]
pub struct AdminProfile {
    pub id: String,
    pub email: String,
}

#[derive(Serialize)]
pub struct AdminAuthResponse {
    pub message: String,
    pub token: String,
    pub admin: AdminProfile,
}

#[derive(Serialize)]
pub struct CustomerListResponse {
    pub users: Vec<CustomerProfile>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageBookingSummary {
    pub id: String,
    pub package_name: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RideBookingSummary {
    pub id: String,
    pub ride_type: String,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct PackageBookingCreated {
    pub message: String,
    pub booking: PackageBookingSummary,
}

#[derive(Serialize)]
pub struct RideBookingCreated {
    pub message: String,
    pub booking: RideBookingSummary,
}

#[derive(Serialize)]
pub struct MyBookingsResponse {
    pub bookings: Vec<Booking>,
}

/// One booking in the admin view: the record plus its owner profile, null
/// for ownerless ride bookings.
#[derive(Serialize)]
pub struct AdminBookingView {
    #[serde(flatten)]
    pub booking: Booking,
    pub user: Option<OwnerProfile>,
}

#[derive(Serialize)]
pub struct AllBookingsResponse {
    pub bookings: Vec<AdminBookingView>,
}

#[derive(Serialize)]
pub struct StatusUpdateResponse {
    pub message: String,
    pub booking: Booking,
}
