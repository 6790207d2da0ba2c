use crate::domain::models::clock::ClockTime;
use crate::domain::models::court::Court;
use crate::domain::models::price::Price;
use crate::domain::services::interval::WrapInterval;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceLine {
    pub unit_price: Price,
    pub quantity: u32,
}

/// Same formula the backend applies when it stores `precio_total`:
/// hours times the court rate, plus hours times the lighting rate when
/// lighting is on, plus every service line. Quantities below one count as one.
pub fn quote(
    hourly_price: Price,
    lighting_price: Price,
    interval: WrapInterval,
    lighting: bool,
    services: &[ServiceLine],
) -> f64 {
    let hours = interval.duration_hours();
    let mut total = hourly_price.value() * hours;
    if lighting {
        total += lighting_price.value() * hours;
    }
    for line in services {
        total += line.unit_price.value() * f64::from(line.quantity.max(1));
    }
    total
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceEstimate {
    pub total: f64,
    pub can_confirm: bool,
}

impl PriceEstimate {
    pub const INCOMPLETE: PriceEstimate = PriceEstimate { total: 0.0, can_confirm: false };

    pub fn display(&self) -> String {
        format!("{:.2}", self.total)
    }
}

/// A missing court or time bound gives `0.00` and keeps confirmation disabled.
pub fn estimate(
    court: Option<&Court>,
    start: Option<ClockTime>,
    end: Option<ClockTime>,
    lighting: bool,
    services: &[ServiceLine],
) -> PriceEstimate {
    let (Some(court), Some(start), Some(end)) = (court, start, end) else {
        return PriceEstimate::INCOMPLETE;
    };

    let raw = quote(
        court.hourly_price,
        court.lighting_price,
        WrapInterval::from_clock(start, end),
        lighting,
        services,
    );
    let total = if raw.is_finite() && raw > 0.0 { raw } else { 0.0 };

    PriceEstimate { total, can_confirm: true }
}
