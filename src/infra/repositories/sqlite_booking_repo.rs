use crate::domain::{
    models::booking::{Booking, BookingRow, BookingStatus, BookingWithOwner},
    ports::BookingRepository,
};
use crate::error::AppError;
use crate::infra::repositories::{into_booking_with_owner, BookingOwnerJoinRow};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError> {
        let pkg = booking.package_details();
        let ride = booking.ride_details();

        let created = sqlx::query_as::<_, BookingRow>(
            "INSERT INTO bookings (id, kind, customer_id, full_name, email, phone, special_requests, total_amount, status, rejection_reason,
                                   package_name, package_id, travelers, start_date, end_date,
                                   ride_type, ride_id, pickup_location, destination, pickup_date, pickup_time, trip_type, passengers,
                                   created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *",
        )
            .bind(&booking.id)
            .bind(booking.kind().as_str())
            .bind(booking.customer_id())
            .bind(&booking.full_name)
            .bind(&booking.email)
            .bind(&booking.phone)
            .bind(&booking.special_requests)
            .bind(booking.total_amount)
            .bind(booking.status.as_str())
            .bind(&booking.rejection_reason)
            .bind(pkg.map(|d| d.package_name.as_str()))
            .bind(pkg.map(|d| d.package_id))
            .bind(pkg.map(|d| d.travelers))
            .bind(pkg.map(|d| d.start_date))
            .bind(pkg.map(|d| d.end_date))
            .bind(ride.map(|d| d.ride_type.as_str()))
            .bind(ride.map(|d| d.ride_id))
            .bind(ride.map(|d| d.pickup_location.as_str()))
            .bind(ride.map(|d| d.destination.as_str()))
            .bind(ride.map(|d| d.pickup_date))
            .bind(ride.map(|d| d.pickup_time.as_str()))
            .bind(ride.map(|d| d.trip_type.as_str()))
            .bind(ride.map(|d| d.passengers))
            .bind(booking.created_at)
            .bind(booking.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Booking::try_from(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(Booking::try_from)
            .transpose()
    }

    async fn list_by_owner(&self, customer_id: &str) -> Result<Vec<Booking>, AppError> {
        let rows = sqlx::query_as::<_, BookingRow>(
            "SELECT * FROM bookings WHERE customer_id = ? ORDER BY created_at DESC",
        )
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    async fn list_all_with_owner(&self) -> Result<Vec<BookingWithOwner>, AppError> {
        let rows = sqlx::query_as::<_, BookingOwnerJoinRow>(
            "SELECT b.*, c.name AS owner_name, c.email AS owner_email
             FROM bookings b
             LEFT JOIN customers c ON c.id = b.customer_id
             ORDER BY b.created_at DESC",
        )
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        rows.into_iter().map(into_booking_with_owner).collect()
    }

    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, BookingRow>(
            "UPDATE bookings
             SET status = ?, rejection_reason = COALESCE(?, rejection_reason), updated_at = ?
             WHERE id = ?
             RETURNING *",
        )
            .bind(status.as_str())
            .bind(rejection_reason)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .map(Booking::try_from)
            .transpose()
    }
}
