use chrono::{Local, NaiveDateTime};

/// Source of "now" for splitting workshops into current and past.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// The local wall clock, the same clock workshop dates are written in.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime + Send + Sync,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}
