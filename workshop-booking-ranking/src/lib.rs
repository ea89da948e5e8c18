pub mod models;

use core::cmp::Reverse;

use chrono::NaiveDateTime;
use itertools::Itertools as _;
use tracing::debug;

use crate::models::{Rank, RankedWorkshop, UserId, UserWorkshops, Workshop, WorkshopId};

/// Workshops split at a reference time, current ones ranked by popularity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkshopView {
    current: Vec<RankedWorkshop>,
    past: Vec<Workshop>,
}

impl WorkshopView {
    /// Current workshops, most points first.
    #[must_use]
    pub fn current(&self) -> &[RankedWorkshop] {
        &self.current
    }

    /// Past workshops in the order the service returned them.
    #[must_use]
    pub fn past(&self) -> &[Workshop] {
        &self.past
    }

    /// The rank 1 workshop. Ties resolve to the one listed first.
    #[must_use]
    pub fn most_popular(&self) -> Option<&RankedWorkshop> {
        self.current.first()
    }

    #[must_use]
    pub fn find_current(&self, id: &WorkshopId) -> Option<&RankedWorkshop> {
        self.current.iter().find(|ranked| &ranked.workshop.id == id)
    }

    #[must_use]
    pub fn find_past(&self, id: &WorkshopId) -> Option<&Workshop> {
        self.past.iter().find(|workshop| &workshop.id == id)
    }

    #[must_use]
    pub fn for_user(&self, user_id: &UserId) -> UserWorkshops {
        UserWorkshops {
            upcoming: self
                .current
                .iter()
                .filter(|ranked| ranked.workshop.has_user(user_id))
                .cloned()
                .collect(),
            attended: self
                .past
                .iter()
                .filter(|workshop| workshop.has_user(user_id))
                .cloned()
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.current.len() + self.past.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.current.is_empty() && self.past.is_empty()
    }
}

/// Splits `workshops` into current and past relative to `now` and ranks the
/// current ones.
///
/// Current workshops are sorted by points, descending. The sort is stable, so
/// workshops with equal points keep their input order. Ranks are dense: equal
/// points share a rank and the next lower value gets the next integer
/// (`10, 10, 5, 5, 1` ranks as `1, 1, 2, 2, 3`).
pub fn compute_view<I>(workshops: I, now: NaiveDateTime) -> WorkshopView
where
    I: IntoIterator<Item = Workshop>,
{
    let (current, past): (Vec<Workshop>, Vec<Workshop>) = workshops
        .into_iter()
        .partition(|workshop| workshop.is_current_at(now));

    let current: Vec<RankedWorkshop> = current
        .into_iter()
        .sorted_by_key(|workshop| Reverse(workshop.points))
        .scan(None, |previous: &mut Option<(i64, Rank)>, workshop| {
            let rank = match *previous {
                Some((points, rank)) if points == workshop.points => rank,
                Some((_, Rank(rank))) => Rank(rank + 1),
                None => Rank(1),
            };
            *previous = Some((workshop.points, rank));
            Some(RankedWorkshop { rank, workshop })
        })
        .collect();

    debug!(
        current = current.len(),
        past = past.len(),
        %now,
        "computed workshop view"
    );

    WorkshopView { current, past }
}
