use colored::*;

use crate::domain::models::{
    client::Client, court::Court, payment::PaymentMethod, reservation::Reservation, service::Service,
    sport::Sport,
};
use crate::domain::services::availability::{Slot, SlotStatus};
use crate::domain::services::booking_controller::{DayView, SubmissionOutcome};
use crate::domain::services::pricing::PriceEstimate;
use crate::domain::services::sport_inference::SportCatalog;

fn rule(width: usize) {
    println!("{}", "-".repeat(width));
}

pub fn sports(sports: &[Sport]) {
    println!("{:<6} | {:<20} | {:<8} | {}", "ID", "Sport", "Minutes", "Services");
    rule(60);
    for s in sports {
        let services: Vec<String> = s.services.iter().map(|x| format!("{} ({})", x.name, x.unit_price)).collect();
        println!("{:<6} | {:<20} | {:<8} | {}", s.id, s.name, s.duration_min, services.join(", "));
    }
}

pub fn courts(courts: &[&Court], catalog: &SportCatalog) {
    println!(
        "{:<6} | {:<18} | {:<12} | {:>10} | {:>10} | {}",
        "ID", "Court", "Sport", "Hour", "Lighting", "Active"
    );
    rule(78);
    for c in courts {
        let sport = catalog
            .resolve_court(c)
            .and_then(|id| catalog.sport(id))
            .map(|s| s.name.clone())
            .or_else(|| c.sport_label.clone())
            .unwrap_or_else(|| "-".into());
        let active = if c.active { "yes".green() } else { "no".red() };
        println!(
            "{:<6} | {:<18} | {:<12} | {:>10} | {:>10} | {}",
            c.id, c.name, sport, c.hourly_price, c.lighting_price, active
        );
    }
}

pub fn services<'a>(services: impl IntoIterator<Item = &'a Service>) {
    println!("{:<6} | {:<24} | {:>10} | {:<8} | {}", "ID", "Service", "Price", "Sport", "Active");
    rule(66);
    for s in services {
        let sport = s.sport_id.map(|id| id.to_string()).unwrap_or_else(|| "any".into());
        let active = if s.active { "yes".green() } else { "no".red() };
        println!("{:<6} | {:<24} | {:>10} | {:<8} | {}", s.id, s.name, s.unit_price, sport, active);
    }
}

pub fn clients(clients: &[Client]) {
    println!("{:<6} | {:<12} | {:<28} | {}", "ID", "DNI", "Name", "Contact");
    rule(70);
    for c in clients {
        let contact = c.email.clone().or_else(|| c.phone.clone()).unwrap_or_default();
        println!(
            "{:<6} | {:<12} | {:<28} | {}",
            c.id,
            c.dni,
            format!("{} {}", c.first_name, c.last_name),
            contact
        );
    }
}

pub fn methods(methods: &[PaymentMethod]) {
    println!("{:<6} | {}", "ID", "Method");
    rule(30);
    for m in methods {
        println!("{:<6} | {}", m.id, m.name);
    }
}

pub fn reservations(reservations: &[Reservation]) {
    println!(
        "{:<6} | {:<20} | {:<6} | {:<10} | {:<13} | {:>10} | {}",
        "ID", "Client", "Court", "Date", "Time", "Total", "Paid"
    );
    rule(90);
    for r in reservations {
        let paid = match &r.payment {
            Some(p) if r.is_paid() => p.method_name.clone().unwrap_or_default().green(),
            _ => "pending".yellow(),
        };
        println!(
            "{:<6} | {:<20} | {:<6} | {:<10} | {:<13} | {:>10} | {}",
            r.id,
            r.client_name(),
            r.court_id,
            r.date,
            format!("{} - {}", r.start_time, r.end_time),
            r.total_price,
            paid
        );
    }
}

fn slot_status(slot: &Slot) -> ColoredString {
    match slot.status {
        SlotStatus::Available => slot.status.label().green(),
        SlotStatus::Occupied => slot.status.label().red(),
        SlotStatus::NotSelectable => slot.status.label().dimmed(),
    }
}

pub fn day(view: &DayView) {
    println!(
        "{}",
        format!("Court {} on {}", view.court_id, view.date).cyan().bold()
    );
    for slot in &view.slots {
        println!("  {:<15} {}", slot.to_string(), slot_status(slot));
    }
    if !view.reservations.is_empty() {
        println!();
        reservations(&view.reservations);
    }
}

pub fn estimate(estimate: &PriceEstimate) {
    if estimate.can_confirm {
        println!("Estimated total: {}", estimate.display().bold());
    } else {
        println!("Estimated total: {} {}", estimate.display(), "(incomplete booking)".yellow());
    }
}

pub fn submission(outcome: &SubmissionOutcome) {
    println!(
        "{}",
        format!(
            "Reservation {} created, total {}",
            outcome.created.id, outcome.created.total_price
        )
        .green()
    );
    if let Some(old) = outcome.replaced_reservation {
        println!("Original reservation {} removed", old);
    }
    if let Some(receipt) = &outcome.payment {
        println!("{}", format!("Payment {} registered: {}", receipt.id, receipt.amount).green());
    }
    for warning in &outcome.warnings {
        eprintln!("{}", warning.yellow());
    }
}

pub fn failure(message: &str) {
    eprintln!("{}", message.red().bold());
}
