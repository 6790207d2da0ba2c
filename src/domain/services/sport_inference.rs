use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::domain::models::court::Court;
use crate::domain::models::service::Service;
use crate::domain::models::sport::Sport;

/// Case-folded, trimmed name with diacritics removed ("  Fútbol " -> "futbol").
pub fn normalize_name(raw: &str) -> String {
    raw.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Alternative spellings tried when a court label does not match any sport
/// name directly. Keys are normalized labels, values are sport names as they
/// may appear in the catalog.
#[derive(Debug, Clone)]
pub struct SportAliases(HashMap<String, String>);

impl Default for SportAliases {
    fn default() -> Self {
        Self::from_pairs([("futbol", "fútbol"), ("padel", "pádel"), ("basquet", "básquet")])
    }
}

impl SportAliases {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(label, name)| (normalize_name(label), name.to_string()))
                .collect(),
        )
    }

    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    pub fn get(&self, normalized_label: &str) -> Option<&str> {
        self.0.get(normalized_label).map(String::as_str)
    }
}

/// Sports indexed by normalized name, used to attach a court to its sport when
/// the backend only gives the free-text label.
#[derive(Debug, Clone, Default)]
pub struct SportCatalog {
    by_name: HashMap<String, i64>,
    by_id: HashMap<i64, Sport>,
    aliases: SportAliases,
}

impl SportCatalog {
    pub fn new(sports: &[Sport], aliases: SportAliases) -> Self {
        let mut by_name = HashMap::new();
        let mut by_id = HashMap::new();
        for sport in sports {
            by_name.insert(normalize_name(&sport.name), sport.id);
            by_id.insert(sport.id, sport.clone());
        }
        Self { by_name, by_id, aliases }
    }

    pub fn from_sports(sports: &[Sport]) -> Self {
        Self::new(sports, SportAliases::default())
    }

    pub fn sport(&self, id: i64) -> Option<&Sport> {
        self.by_id.get(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn resolve_label(&self, label: &str) -> Option<i64> {
        let key = normalize_name(label);
        if key.is_empty() {
            return None;
        }
        if let Some(id) = self.by_name.get(&key) {
            return Some(*id);
        }
        self.aliases
            .get(&key)
            .and_then(|alt| self.by_name.get(&normalize_name(alt)).copied())
    }

    // explicit relation first
    pub fn resolve_court(&self, court: &Court) -> Option<i64> {
        court
            .direct_sport_id()
            .or_else(|| court.sport_label.as_deref().and_then(|l| self.resolve_label(l)))
    }
}

const DEFAULT_SESSION_MIN: u32 = 60;

fn label_duration(label: &str) -> Option<u32> {
    match label.trim().to_lowercase().as_str() {
        "padel" | "pádel" => Some(60),
        "tenis" => Some(120),
        "futbol" | "fútbol" => Some(90),
        "basket" | "basquet" | "baloncesto" => Some(60),
        _ => None,
    }
}

pub fn session_duration(court: &Court, catalog: &SportCatalog) -> u32 {
    if let Some(minutes) = court.sport.as_ref().and_then(|s| s.duration_min).filter(|m| *m > 0) {
        return minutes;
    }
    if let Some(sport) = catalog.resolve_court(court).and_then(|id| catalog.sport(id))
        && sport.duration_min > 0
    {
        return sport.duration_min;
    }
    court
        .sport_label
        .as_deref()
        .and_then(label_duration)
        .unwrap_or(DEFAULT_SESSION_MIN)
}

/// Services offered for a court: the sport's own list when it has one,
/// otherwise active global services that are unbound or bound to that sport.
pub fn services_for_court(sport_id: Option<i64>, sport_services: Vec<Service>, global: &[Service]) -> Vec<Service> {
    if !sport_services.is_empty() {
        return sport_services;
    }
    global
        .iter()
        .filter(|s| s.active && (s.sport_id.is_none() || s.sport_id == sport_id))
        .cloned()
        .collect()
}
