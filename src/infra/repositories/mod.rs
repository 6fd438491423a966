pub mod postgres_admin_repo;
pub mod postgres_booking_repo;
pub mod postgres_customer_repo;
pub mod sqlite_admin_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_customer_repo;

use crate::domain::models::booking::{Booking, BookingRow, BookingWithOwner, OwnerProfile};
use crate::error::AppError;
use sqlx::FromRow;

/// Row shape of the admin list query: the full booking plus the joined
/// owner columns (null for ownerless ride bookings).
#[derive(FromRow)]
pub(crate) struct BookingOwnerJoinRow {
    #[sqlx(flatten)]
    pub booking: BookingRow,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,
}

pub(crate) fn into_booking_with_owner(row: BookingOwnerJoinRow) -> Result<BookingWithOwner, AppError> {
    let booking = Booking::try_from(row.booking)?;
    let owner = match (booking.customer_id(), row.owner_name, row.owner_email) {
        (Some(id), Some(name), Some(email)) => Some(OwnerProfile {
            id: id.to_string(),
            name,
            email,
        }),
        _ => None,
    };
    Ok(BookingWithOwner { booking, owner })
}
