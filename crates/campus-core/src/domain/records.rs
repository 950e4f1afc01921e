use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A record bound to a single owning identity via its RA.
///
/// Every protected row carries the owner's RA; repositories key listing
/// on it so nothing owned by another identity is ever materialized.
pub trait OwnedRecord {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn owner_ra(&self) -> &str;
}

/// Grade for one subject in one term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grade {
    pub id: i64,
    pub ra: String,
    pub subject_id: i64,
    pub term: u8,
    pub score: Option<f64>,
}

/// One weekday row of the owner's timetable, four lesson slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: i64,
    pub ra: String,
    pub weekday: u8,
    pub periods: [Option<i64>; 4],
}

/// Calendar event (class day, holiday, absence) on a given date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: i64,
    pub ra: String,
    pub date: NaiveDate,
    pub kind_id: i64,
}

/// Free-form personal note.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub ra: String,
    pub title: String,
    pub body: String,
    pub written_on: NaiveDate,
}

macro_rules! impl_owned_record {
    ($($entity:ty),+ $(,)?) => {
        $(
            impl OwnedRecord for $entity {
                fn id(&self) -> i64 {
                    self.id
                }

                fn set_id(&mut self, id: i64) {
                    self.id = id;
                }

                fn owner_ra(&self) -> &str {
                    &self.ra
                }
            }
        )+
    };
}

impl_owned_record!(Grade, ScheduleEntry, CalendarEvent, Note);
