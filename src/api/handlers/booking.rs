use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::extractors::{admin::AuthAdmin, auth::AuthCustomer, maybe_auth::MaybeBearer};
use crate::api::dtos::requests::{CreateBookingRequest, UpdateBookingStatusRequest};
use crate::api::dtos::responses::{
    AdminBookingView, AllBookingsResponse, MyBookingsResponse, PackageBookingCreated,
    PackageBookingSummary, RideBookingCreated, RideBookingSummary, StatusUpdateResponse,
};
use crate::domain::models::booking::{
    Booking, BookingKind, BookingStatus, NewBookingCommon, PackageDetails, RideDetails, TripType,
};
use crate::error::AppError;
use std::sync::Arc;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    MaybeBearer(token): MaybeBearer,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let kind = resolve_kind(&payload)?;

    let common = NewBookingCommon {
        full_name: payload.full_name.clone().unwrap_or_default(),
        email: payload.email.clone().unwrap_or_default(),
        phone: payload.phone.clone().unwrap_or_default(),
        special_requests: payload.special_requests.clone(),
        total_amount: payload
            .total_amount
            .ok_or_else(|| AppError::Validation("totalAmount is required".into()))?,
    };

    match kind {
        BookingKind::Ride => {
            let details = RideDetails {
                ride_type: payload.ride_type.unwrap_or_default(),
                ride_id: payload.ride_id.unwrap_or(1),
                pickup_location: payload.pickup_location.unwrap_or_default(),
                destination: payload.destination.unwrap_or_default(),
                pickup_date: match payload.pickup_date {
                    Some(raw) => parse_flexible_date("pickupDate", &raw)?,
                    None => Utc::now(),
                },
                pickup_time: payload.pickup_time.unwrap_or_default(),
                trip_type: match payload.trip_type {
                    Some(raw) => raw
                        .parse::<TripType>()
                        .map_err(AppError::Validation)?,
                    None => TripType::Oneway,
                },
                passengers: payload.passengers.unwrap_or(1),
            };

            let booking = Booking::ride(common, details)?;
            let created = state.booking_repo.create(&booking).await?;

            info!("Ride booking confirmed: {}", created.id);

            let ride = created
                .ride_details()
                .ok_or(AppError::Internal)?;

            Ok((
                StatusCode::CREATED,
                Json(RideBookingCreated {
                    message: "Ride booking confirmed successfully".to_string(),
                    booking: RideBookingSummary {
                        id: created.id.clone(),
                        ride_type: ride.ride_type.clone(),
                        status: created.status,
                        created_at: created.created_at,
                    },
                }),
            ).into_response())
        }
        BookingKind::Package => {
            let token = token.ok_or_else(|| {
                AppError::Unauthorized("Access token required for package bookings".into())
            })?;
            let subject = state.token_service.verify_customer(&token)?;

            let now = Utc::now();
            let details = PackageDetails {
                customer_id: subject.id,
                package_name: payload.package_name.unwrap_or_default(),
                package_id: payload.package_id.unwrap_or(1),
                travelers: payload.travelers.unwrap_or(1),
                start_date: match payload.start_date {
                    Some(raw) => parse_flexible_date("startDate", &raw)?,
                    None => now,
                },
                end_date: match payload.end_date {
                    Some(raw) => parse_flexible_date("endDate", &raw)?,
                    None => now,
                },
            };

            let booking = Booking::package(common, details)?;
            let created = state.booking_repo.create(&booking).await?;

            info!("Package booking submitted: {}", created.id);

            let pkg = created
                .package_details()
                .ok_or(AppError::Internal)?;

            Ok((
                StatusCode::CREATED,
                Json(PackageBookingCreated {
                    message: "Package booking submitted successfully".to_string(),
                    booking: PackageBookingSummary {
                        id: created.id.clone(),
                        package_name: pkg.package_name.clone(),
                        status: created.status,
                        created_at: created.created_at,
                    },
                }),
            ).into_response())
        }
    }
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    AuthCustomer(subject): AuthCustomer,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_owner(&subject.id).await?;
    Ok(Json(MyBookingsResponse { bookings }))
}

pub async fn all_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AuthAdmin,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_all_with_owner().await?;

    let views = bookings
        .into_iter()
        .map(|b| AdminBookingView {
            booking: b.booking,
            user: b.owner,
        })
        .collect();

    Ok(Json(AllBookingsResponse { bookings: views }))
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    _admin: AuthAdmin,
    Path(booking_id): Path<String>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new_status = match payload.status.as_str() {
        "approved" => BookingStatus::Approved,
        "rejected" => BookingStatus::Rejected,
        other => {
            return Err(AppError::Validation(format!(
                "status must be approved or rejected, got: {}",
                other
            )))
        }
    };

    let booking = state.booking_repo.find_by_id(&booking_id).await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    // Decided bookings are terminal; re-applying the same decision stays
    // idempotent, flipping it is rejected.
    if booking.status.is_decided() && booking.status != new_status {
        return Err(AppError::Conflict(format!(
            "Booking has already been {}",
            booking.status.as_str()
        )));
    }

    let reason = if new_status == BookingStatus::Rejected {
        payload.rejection_reason.as_deref()
    } else {
        None
    };

    let updated = state.booking_repo.update_status(&booking_id, new_status, reason).await?
        .ok_or_else(|| AppError::NotFound("Booking not found".into()))?;

    info!("Booking {}: status set to {}", updated.id, updated.status.as_str());

    Ok(Json(StatusUpdateResponse {
        message: format!("Booking {} successfully", new_status.as_str()),
        booking: updated,
    }))
}

/// An explicit discriminator wins. Without one, the legacy inference
/// (rideType + pickupLocation present) picks ride, but a payload that also
/// names a package is rejected instead of silently misclassified.
fn resolve_kind(payload: &CreateBookingRequest) -> Result<BookingKind, AppError> {
    if let Some(raw) = &payload.kind {
        return raw.parse::<BookingKind>().map_err(AppError::Validation);
    }

    let looks_like_ride = payload.ride_type.is_some() && payload.pickup_location.is_some();

    if looks_like_ride && payload.package_name.is_some() {
        return Err(AppError::Validation(
            "Payload contains both package and ride fields; specify kind".into(),
        ));
    }

    if looks_like_ride {
        Ok(BookingKind::Ride)
    } else {
        Ok(BookingKind::Package)
    }
}

fn parse_flexible_date(field: &str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| Utc.from_utc_datetime(&d.and_hms_opt(0, 0, 0).unwrap()))
        .map_err(|_| AppError::Validation(format!("Invalid {} (expected YYYY-MM-DD or RFC 3339)", field)))
}
