use core::future::Future;
use core::time::Duration;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::watch;
use tracing::{debug, error, info, instrument, warn};
use workshop_booking_ranking::models::{RankedWorkshop, UserId, UserWorkshops, Workshop, WorkshopId};
use workshop_booking_ranking::{compute_view, WorkshopView};

use crate::clock::{Clock, LocalClock};
use crate::error::ServiceError;
use crate::service::WorkshopService;
use crate::status::{OperationError, OperationKind, OperationSlot, OperationSlots, OperationStatus};

/// Everything a view can observe. Cloning is cheap, the workshop data is shared.
#[derive(Clone, Debug, Default)]
pub struct StoreState {
    /// Workshops in the order the service returned them, ties are ranked by it.
    workshops: Arc<Vec<Workshop>>,
    view: Arc<WorkshopView>,
    fetched_at: Option<NaiveDateTime>,
    operations: OperationSlots,
}

impl StoreState {
    #[must_use]
    pub fn view(&self) -> &WorkshopView {
        &self.view
    }

    #[must_use]
    pub fn workshops(&self) -> &[Workshop] {
        &self.workshops
    }

    /// When the last full fetch happened, `None` before the first one.
    #[must_use]
    pub const fn fetched_at(&self) -> Option<NaiveDateTime> {
        self.fetched_at
    }

    #[must_use]
    pub const fn operations(&self) -> &OperationSlots {
        &self.operations
    }

    fn replace_workshop(&mut self, workshop: Workshop, now: NaiveDateTime) {
        let workshops = Arc::make_mut(&mut self.workshops);
        if let Some(cached) = workshops.iter_mut().find(|cached| cached.id == workshop.id) {
            *cached = workshop;
        } else {
            workshops.push(workshop);
        }
        self.view = Arc::new(compute_view(workshops.iter().cloned(), now));
    }
}

/// Client side cache of the workshop service.
///
/// Lookups never go to the network, call [`WorkshopStore::fetch_all`] first.
pub struct WorkshopStore<S, C = LocalClock> {
    service: S,
    clock: C,
    request_timeout: Duration,
    state: watch::Sender<StoreState>,
}

impl<S: WorkshopService> WorkshopStore<S> {
    pub fn new(service: S, request_timeout: Duration) -> Self {
        Self::with_clock(service, LocalClock, request_timeout)
    }
}

impl<S: WorkshopService, C: Clock> WorkshopStore<S, C> {
    pub fn with_clock(service: S, clock: C, request_timeout: Duration) -> Self {
        // nobody listens yet, send_modify and send_replace work regardless
        let (state, _) = watch::channel(StoreState::default());
        Self {
            service,
            clock,
            request_timeout,
            state,
        }
    }

    /// Notified after every change, full fetches and status transitions alike.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StoreState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn view(&self) -> Arc<WorkshopView> {
        Arc::clone(&self.state.borrow().view)
    }

    #[must_use]
    pub fn operation(&self, kind: OperationKind) -> OperationSlot {
        self.state.borrow().operations.get(kind).clone()
    }

    /// Fetches every workshop and replaces the cached view in one step.
    ///
    /// On failure the previous view stays in place.
    #[instrument(skip_all)]
    pub async fn fetch_all(&self) -> Result<(), ServiceError> {
        let workshops = match self.bounded(self.service.fetch_all_workshops()).await {
            Ok(workshops) => workshops,
            Err(error) => {
                error!(%error, "failed to fetch workshops");
                return Err(error);
            }
        };
        let now = self.clock.now();
        let view = compute_view(workshops.iter().cloned(), now);
        info!(
            current = view.current().len(),
            past = view.past().len(),
            "fetched workshops"
        );
        self.state.send_modify(|state| {
            state.workshops = Arc::new(workshops);
            state.view = Arc::new(view);
            state.fetched_at = Some(now);
        });
        Ok(())
    }

    #[must_use]
    pub fn find_by_id(&self, id: &WorkshopId) -> Option<RankedWorkshop> {
        self.state.borrow().view.find_current(id).cloned()
    }

    #[must_use]
    pub fn find_in_past(&self, id: &WorkshopId) -> Option<Workshop> {
        self.state.borrow().view.find_past(id).cloned()
    }

    /// The user's upcoming and attended workshops, derived from the cache on
    /// every call.
    #[must_use]
    pub fn for_user(&self, user_id: &UserId) -> UserWorkshops {
        self.state.borrow().view.for_user(user_id)
    }

    pub(crate) const fn service(&self) -> &S {
        &self.service
    }

    async fn bounded<T>(
        &self,
        request: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        tokio::time::timeout(self.request_timeout, request)
            .await
            .unwrap_or_else(|_| Err(ServiceError::Timeout(self.request_timeout)))
    }

    /// Runs one mutating request through its status slot.
    ///
    /// A workshop returned by the request replaces the cached one. Errors end
    /// up in the slot and are not passed on.
    pub(crate) async fn run(
        &self,
        kind: OperationKind,
        subject: Option<&WorkshopId>,
        request: impl Future<Output = Result<Option<Workshop>, ServiceError>>,
    ) -> OperationStatus {
        self.state
            .send_modify(|state| state.operations.get_mut(kind).start());
        debug!(%kind, subject = ?subject, "operation started");

        match self.bounded(request).await {
            Ok(workshop) => {
                let now = self.clock.now();
                self.state.send_modify(|state| {
                    state.operations.get_mut(kind).succeed();
                    if let Some(workshop) = workshop {
                        state.replace_workshop(workshop, now);
                    }
                });
                info!(%kind, subject = ?subject, "operation succeeded");
                OperationStatus::Success
            }
            Err(error) => {
                warn!(%kind, subject = ?subject, %error, "operation failed");
                let error = OperationError {
                    subject: subject.cloned(),
                    message: error.to_string(),
                };
                self.state
                    .send_modify(|state| state.operations.get_mut(kind).fail(error));
                OperationStatus::Error
            }
        }
    }
}
