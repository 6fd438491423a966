use crate::domain::models::{
    admin::Admin,
    booking::{Booking, BookingStatus, BookingWithOwner},
    customer::Customer,
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn create(&self, customer: &Customer) -> Result<Customer, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Customer>, AppError>;
    async fn list(&self) -> Result<Vec<Customer>, AppError>;
}

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, admin: &Admin) -> Result<Admin, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    /// Bookings owned by one customer, newest-created first.
    async fn list_by_owner(&self, customer_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Every booking with its owner profile joined, newest-created first.
    async fn list_all_with_owner(&self) -> Result<Vec<BookingWithOwner>, AppError>;
    async fn update_status(
        &self,
        id: &str,
        status: BookingStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<Booking>, AppError>;
}
