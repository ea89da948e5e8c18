//! Mutating workshop operations.
//!
//! Each one moves its status slot to `loading`, asks the service and then
//! lands in `success` or `error`. Only register and deregister touch the cache,
//! with the workshop the service sent back. Everything else needs a
//! [`WorkshopStore::fetch_all`] afterwards to show up.

use workshop_booking_ranking::models::{NewWorkshop, UserId, Workshop, WorkshopId};

use crate::clock::Clock;
use crate::service::WorkshopService;
use crate::status::{OperationKind, OperationStatus};
use crate::store::WorkshopStore;

impl<S: WorkshopService, C: Clock> WorkshopStore<S, C> {
    pub async fn register(&self, workshop_id: &WorkshopId, user_id: &UserId) -> OperationStatus {
        self.run(OperationKind::Register, Some(workshop_id), async {
            self.service()
                .register_user(workshop_id, user_id)
                .await
                .map(Some)
        })
        .await
    }

    pub async fn deregister(&self, workshop_id: &WorkshopId, user_id: &UserId) -> OperationStatus {
        self.run(OperationKind::Deregister, Some(workshop_id), async {
            self.service().deregister_user(workshop_id, user_id).await
        })
        .await
    }

    pub async fn create_workshop(&self, workshop: &NewWorkshop) -> OperationStatus {
        self.run(OperationKind::Create, None, async {
            self.service().create_workshop(workshop).await.map(|()| None)
        })
        .await
    }

    pub async fn update_workshop(&self, workshop: &Workshop) -> OperationStatus {
        self.run(OperationKind::Update, Some(&workshop.id), async {
            self.service().update_workshop(workshop).await.map(|()| None)
        })
        .await
    }

    pub async fn delete_workshop(&self, workshop_id: &WorkshopId) -> OperationStatus {
        self.run(OperationKind::Delete, Some(workshop_id), async {
            self.service()
                .delete_workshop(workshop_id)
                .await
                .map(|()| None)
        })
        .await
    }

    /// Shares the `update` slot.
    pub async fn remove_feedback(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> OperationStatus {
        self.run(OperationKind::Update, Some(workshop_id), async {
            self.service()
                .remove_feedback(workshop_id, user_id)
                .await
                .map(|()| None)
        })
        .await
    }
}
