//! Per-operation status slots: `idle -> loading -> success | error`.

use core::fmt;

use workshop_booking_ranking::models::WorkshopId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Register,
    Deregister,
    Create,
    Update,
    Delete,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Register => "register",
            Self::Deregister => "deregister",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OperationStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// What went wrong, and for which workshop if there is one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationError {
    pub subject: Option<WorkshopId>,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationSlot {
    pub status: OperationStatus,
    pub error: Option<OperationError>,
}

impl OperationSlot {
    /// Starting always clears the previous error.
    pub fn start(&mut self) {
        self.status = OperationStatus::Loading;
        self.error = None;
    }

    pub fn succeed(&mut self) {
        self.status = OperationStatus::Success;
        self.error = None;
    }

    pub fn fail(&mut self, error: OperationError) {
        self.status = OperationStatus::Error;
        self.error = Some(error);
    }
}

/// One slot per operation kind. Two operations of the same kind share a slot
/// and the last one to change it wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OperationSlots {
    register: OperationSlot,
    deregister: OperationSlot,
    create: OperationSlot,
    update: OperationSlot,
    delete: OperationSlot,
}

impl OperationSlots {
    #[must_use]
    pub const fn get(&self, kind: OperationKind) -> &OperationSlot {
        match kind {
            OperationKind::Register => &self.register,
            OperationKind::Deregister => &self.deregister,
            OperationKind::Create => &self.create,
            OperationKind::Update => &self.update,
            OperationKind::Delete => &self.delete,
        }
    }

    pub fn get_mut(&mut self, kind: OperationKind) -> &mut OperationSlot {
        match kind {
            OperationKind::Register => &mut self.register,
            OperationKind::Deregister => &mut self.deregister,
            OperationKind::Create => &mut self.create,
            OperationKind::Update => &mut self.update,
            OperationKind::Delete => &mut self.delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_clears_a_stale_error() {
        let mut slot = OperationSlot::default();
        assert_eq!(slot.status, OperationStatus::Idle);

        slot.start();
        slot.fail(OperationError {
            subject: Some(WorkshopId::from("w1")),
            message: "Workshop is full".to_owned(),
        });
        assert_eq!(slot.status, OperationStatus::Error);
        assert!(slot.error.is_some());

        slot.start();
        assert_eq!(slot.status, OperationStatus::Loading);
        assert_eq!(slot.error, None);

        slot.succeed();
        assert_eq!(slot, OperationSlot {
            status: OperationStatus::Success,
            error: None,
        });
    }

    #[test]
    fn slots_are_independent() {
        let mut slots = OperationSlots::default();
        slots.get_mut(OperationKind::Register).start();
        slots.get_mut(OperationKind::Delete).succeed();

        assert_eq!(
            slots.get(OperationKind::Register).status,
            OperationStatus::Loading
        );
        assert_eq!(
            slots.get(OperationKind::Delete).status,
            OperationStatus::Success
        );
        for kind in [
            OperationKind::Deregister,
            OperationKind::Create,
            OperationKind::Update,
        ] {
            assert_eq!(slots.get(kind), &OperationSlot::default(), "{kind}");
        }
    }
}
