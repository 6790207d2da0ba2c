use std::env;

use crate::domain::models::clock::ClockTime;
use crate::domain::services::availability::SlotGrid;
use crate::error::AppError;

#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub http_timeout_secs: u64,
    pub log_dir: String,
    pub slot_grid: SlotGrid,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = SlotGrid::default();

        let day_start = clock_var("SLOT_DAY_START", defaults.day_start)?;
        let cutoff = clock_var("SLOT_CUTOFF", defaults.cutoff)?;
        let duration_min = number_var("SLOT_DURATION_MIN", defaults.duration_min)?;
        let step_min = number_var("SLOT_STEP_MIN", defaults.step_min)?;

        if duration_min == 0 || step_min == 0 {
            return Err(AppError::Config("SLOT_DURATION_MIN and SLOT_STEP_MIN must be positive".into()));
        }
        if cutoff <= day_start {
            return Err(AppError::Config("SLOT_CUTOFF must be later than SLOT_DAY_START".into()));
        }

        Ok(Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:5000".to_string())
                .trim_end_matches('/')
                .to_string(),
            http_timeout_secs: number_var("HTTP_TIMEOUT_SECS", 10)?,
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "./logs".to_string()),
            slot_grid: SlotGrid {
                day_start,
                cutoff,
                duration_min,
                step_min,
                latest_start: None,
            },
        })
    }
}

fn clock_var(name: &str, default: ClockTime) -> Result<ClockTime, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be HH:MM, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}

fn number_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}
