use crate::domain::models::clock::{ClockTime, MINUTES_PER_DAY};

const DAY: i32 = MINUTES_PER_DAY as i32;

/// Half-open range `[start, end)` in minutes since midnight of the booking
/// date. An end at or before the start means the range runs into the next day,
/// so it is stored with one day added to the end. Price and overlap
/// calculations both go through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapInterval {
    start: i32,
    end: i32,
}

impl WrapInterval {
    /// `start` is expected in `[0, 1440)`. `end` may be given either as a time of
    /// day or already pushed past midnight.
    pub fn new(start: u32, end: u32) -> Self {
        let start = start as i32;
        let mut end = end as i32;
        if end <= start {
            end += DAY;
        }
        Self { start, end }
    }

    pub fn from_clock(start: ClockTime, end: ClockTime) -> Self {
        Self::new(start.minutes(), end.minutes())
    }

    pub fn starting_at(start: u32, duration_min: u32) -> Self {
        Self::new(start, start + duration_min)
    }

    pub fn start(&self) -> u32 {
        self.start as u32
    }

    pub fn end(&self) -> u32 {
        self.end as u32
    }

    pub fn duration_minutes(&self) -> u32 {
        (self.end - self.start) as u32
    }

    pub fn duration_hours(&self) -> f64 {
        f64::from(self.end - self.start) / 60.0
    }

    pub fn start_clock(&self) -> ClockTime {
        ClockTime::from_minutes(self.start())
    }

    pub fn end_clock(&self) -> ClockTime {
        ClockTime::from_minutes(self.end())
    }

    /// True when both ranges share an instant, comparing `other` as it is and
    /// moved one day back and forward.
    pub fn overlaps(&self, other: &WrapInterval) -> bool {
        [-DAY, 0, DAY].iter().any(|shift| {
            let (b_start, b_end) = (other.start + shift, other.end + shift);
            self.start < b_end && b_start < self.end
        })
    }
}

pub fn intervals_overlap(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    WrapInterval::new(a_start, a_end).overlaps(&WrapInterval::new(b_start, b_end))
}
