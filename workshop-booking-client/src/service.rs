use async_trait::async_trait;
use workshop_booking_ranking::models::{NewWorkshop, UserId, Workshop, WorkshopId};

use crate::error::ServiceError;

/// The workshop service endpoints the client consumes.
///
/// An `Ok` means the service acknowledged with `success: true`.
#[async_trait]
pub trait WorkshopService: Send + Sync {
    async fn fetch_all_workshops(&self) -> Result<Vec<Workshop>, ServiceError>;

    /// Returns the workshop as the service stored it after registering.
    async fn register_user(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<Workshop, ServiceError>;

    async fn deregister_user(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<Option<Workshop>, ServiceError>;

    async fn create_workshop(&self, workshop: &NewWorkshop) -> Result<(), ServiceError>;

    async fn update_workshop(&self, workshop: &Workshop) -> Result<(), ServiceError>;

    async fn delete_workshop(&self, workshop_id: &WorkshopId) -> Result<(), ServiceError>;

    async fn remove_feedback(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<(), ServiceError>;
}
