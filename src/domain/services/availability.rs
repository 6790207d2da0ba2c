use crate::domain::models::clock::ClockTime;
use crate::domain::services::interval::WrapInterval;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotGrid {
    pub day_start: ClockTime,
    // latest allowed end of a selectable slot
    pub cutoff: ClockTime,
    pub duration_min: u32,
    pub step_min: u32,
    // None lists starts up to cutoff - duration
    pub latest_start: Option<ClockTime>,
}

impl Default for SlotGrid {
    fn default() -> Self {
        Self {
            day_start: ClockTime::from_minutes(8 * 60),
            cutoff: ClockTime::from_minutes(23 * 60),
            duration_min: 60,
            step_min: 60,
            latest_start: None,
        }
    }
}

impl SlotGrid {
    fn last_start_minute(&self) -> Option<u32> {
        match self.latest_start {
            Some(t) => Some(t.minutes()),
            None => self.cutoff.minutes().checked_sub(self.duration_min),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    Available,
    Occupied,
    NotSelectable,
}

impl SlotStatus {
    pub fn label(self) -> &'static str {
        match self {
            SlotStatus::Available => "Available",
            SlotStatus::Occupied => "Occupied",
            SlotStatus::NotSelectable => "Not selectable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub interval: WrapInterval,
    pub status: SlotStatus,
}

impl Slot {
    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }

    pub fn selection(&self) -> Option<(ClockTime, ClockTime)> {
        self.is_available()
            .then(|| (self.interval.start_clock(), self.interval.end_clock()))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.interval.start_clock(), self.interval.end_clock())
    }
}

pub fn generate_slots(grid: &SlotGrid, reservations: &[WrapInterval]) -> Vec<Slot> {
    let mut slots = Vec::new();
    if grid.duration_min == 0 || grid.step_min == 0 {
        return slots;
    }
    let Some(last_start) = grid.last_start_minute() else {
        return slots;
    };
    let cutoff = grid.cutoff.minutes();

    let mut cursor = grid.day_start.minutes();
    while cursor <= last_start {
        let interval = WrapInterval::starting_at(cursor, grid.duration_min);
        // occupied > not selectable > available
        let status = if reservations.iter().any(|r| interval.overlaps(r)) {
            SlotStatus::Occupied
        } else if interval.end() > cutoff {
            SlotStatus::NotSelectable
        } else {
            SlotStatus::Available
        };
        slots.push(Slot { interval, status });
        cursor += grid.step_min;
    }
    slots
}

pub fn suggest_end_time(start: ClockTime, duration_min: u32) -> ClockTime {
    ClockTime::from_minutes(start.minutes() + duration_min)
}
