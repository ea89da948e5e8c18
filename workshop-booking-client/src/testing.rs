use core::time::Duration;
use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use serde_json::Map;
use workshop_booking_ranking::models::{NewWorkshop, UserId, Workshop, WorkshopId};

use crate::error::ServiceError;
use crate::service::WorkshopService;

/// Workshop ending at 18:00 on the given day of October 2026.
pub fn workshop(id: &str, points: i64, day: u32) -> Workshop {
    Workshop {
        id: WorkshopId::from(id),
        title: format!("workshop {id}"),
        date: NaiveDate::from_ymd_opt(2026, 10, day).unwrap(),
        start_time: NaiveTime::from_hms_opt(16, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        points,
        users: Vec::new(),
        details: Map::new(),
    }
}

#[derive(Default)]
struct Behaviour {
    rejection: Option<String>,
    rejected_workshops: HashMap<WorkshopId, String>,
    hang: bool,
    delays: HashMap<WorkshopId, Duration>,
}

/// In-memory workshop service. Registering adds the user and a point.
#[derive(Default)]
pub struct FakeService {
    workshops: Mutex<Vec<Workshop>>,
    behaviour: Mutex<Behaviour>,
    created: Mutex<Vec<NewWorkshop>>,
    removed_feedback: Mutex<Vec<(WorkshopId, UserId)>>,
}

impl FakeService {
    pub fn with(workshops: Vec<Workshop>) -> Self {
        Self {
            workshops: Mutex::new(workshops),
            ..Self::default()
        }
    }

    pub fn set_workshops(&self, workshops: Vec<Workshop>) {
        *self.workshops.lock().unwrap() = workshops;
    }

    pub fn workshops(&self) -> Vec<Workshop> {
        self.workshops.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<NewWorkshop> {
        self.created.lock().unwrap().clone()
    }

    pub fn removed_feedback(&self) -> Vec<(WorkshopId, UserId)> {
        self.removed_feedback.lock().unwrap().clone()
    }

    /// Every following request fails with `message`.
    pub fn reject_with(&self, message: &str) {
        self.behaviour.lock().unwrap().rejection = Some(message.to_owned());
    }

    /// Requests about `workshop_id` fail with `message`.
    pub fn reject_workshop(&self, workshop_id: &str, message: &str) {
        self.behaviour
            .lock()
            .unwrap()
            .rejected_workshops
            .insert(WorkshopId::from(workshop_id), message.to_owned());
    }

    pub fn clear_rejections(&self) {
        let mut behaviour = self.behaviour.lock().unwrap();
        behaviour.rejection = None;
        behaviour.rejected_workshops.clear();
    }

    /// Every following request never answers.
    pub fn hang(&self) {
        self.behaviour.lock().unwrap().hang = true;
    }

    /// Requests about `workshop_id` take `delay` to answer.
    pub fn delay(&self, workshop_id: &str, delay: Duration) {
        self.behaviour
            .lock()
            .unwrap()
            .delays
            .insert(WorkshopId::from(workshop_id), delay);
    }

    async fn answer(&self, workshop_id: Option<&WorkshopId>) -> Result<(), ServiceError> {
        let (hang, delay, rejection) = {
            let behaviour = self.behaviour.lock().unwrap();
            let delay = workshop_id.and_then(|id| behaviour.delays.get(id).copied());
            let rejection = workshop_id
                .and_then(|id| behaviour.rejected_workshops.get(id).cloned())
                .or_else(|| behaviour.rejection.clone());
            (behaviour.hang, delay, rejection)
        };
        if hang {
            std::future::pending::<()>().await;
        }
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match rejection {
            Some(message) => Err(ServiceError::Rejected {
                status: 400,
                message,
            }),
            None => Ok(()),
        }
    }

    fn modify(
        &self,
        workshop_id: &WorkshopId,
        change: impl FnOnce(&mut Workshop),
    ) -> Result<Workshop, ServiceError> {
        let mut workshops = self.workshops.lock().unwrap();
        let workshop = workshops
            .iter_mut()
            .find(|workshop| &workshop.id == workshop_id)
            .ok_or_else(|| ServiceError::Rejected {
                status: 404,
                message: "Workshop not found.".to_owned(),
            })?;
        change(workshop);
        Ok(workshop.clone())
    }
}

#[async_trait]
impl WorkshopService for FakeService {
    async fn fetch_all_workshops(&self) -> Result<Vec<Workshop>, ServiceError> {
        self.answer(None).await?;
        Ok(self.workshops())
    }

    async fn register_user(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<Workshop, ServiceError> {
        self.answer(Some(workshop_id)).await?;
        self.modify(workshop_id, |workshop| {
            if !workshop.has_user(user_id) {
                workshop.users.push(user_id.clone());
                workshop.points += 1;
            }
        })
    }

    async fn deregister_user(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<Option<Workshop>, ServiceError> {
        self.answer(Some(workshop_id)).await?;
        self.modify(workshop_id, |workshop| {
            if workshop.has_user(user_id) {
                workshop.users.retain(|user| user != user_id);
                workshop.points -= 1;
            }
        })
        .map(Some)
    }

    async fn create_workshop(&self, workshop: &NewWorkshop) -> Result<(), ServiceError> {
        self.answer(None).await?;
        self.created.lock().unwrap().push(workshop.clone());
        Ok(())
    }

    async fn update_workshop(&self, workshop: &Workshop) -> Result<(), ServiceError> {
        self.answer(Some(&workshop.id)).await?;
        self.modify(&workshop.id, |cached| *cached = workshop.clone())?;
        Ok(())
    }

    async fn delete_workshop(&self, workshop_id: &WorkshopId) -> Result<(), ServiceError> {
        self.answer(Some(workshop_id)).await?;
        self.workshops
            .lock()
            .unwrap()
            .retain(|workshop| &workshop.id != workshop_id);
        Ok(())
    }

    async fn remove_feedback(
        &self,
        workshop_id: &WorkshopId,
        user_id: &UserId,
    ) -> Result<(), ServiceError> {
        self.answer(Some(workshop_id)).await?;
        self.removed_feedback
            .lock()
            .unwrap()
            .push((workshop_id.clone(), user_id.clone()));
        Ok(())
    }
}
