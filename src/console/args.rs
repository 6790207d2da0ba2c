use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::domain::models::clock::ClockTime;

#[derive(Parser, Debug)]
#[command(author, version, about = "Console for the court booking backend", long_about = None)]
pub struct Cli {
    /// Overrides API_BASE_URL
    #[arg(long, global = true)]
    pub api: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(subcommand)]
    Sport(SportCommand),
    #[command(subcommand)]
    Court(CourtCommand),
    #[command(subcommand)]
    Service(ServiceCommand),
    #[command(subcommand)]
    Client(ClientCommand),
    /// Payment methods
    #[command(subcommand)]
    Method(MethodCommand),
    /// List reservations, optionally for one court and date
    Reservations {
        #[arg(long)]
        court: Option<i64>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show the slot board of a court for a date
    Slots {
        #[arg(long)]
        court: i64,
        #[arg(long)]
        date: NaiveDate,
    },
    /// Price estimate without booking
    Quote(BookingArgs),
    /// Book a court; `--replace` edits an existing reservation
    Book {
        #[command(flatten)]
        booking: BookingArgs,
        /// Taken from the replaced reservation when omitted
        #[arg(long)]
        client: Option<i64>,
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Pay right away with this payment method
        #[arg(long)]
        pay_with: Option<i64>,
        #[arg(long)]
        replace: Option<i64>,
    },
    /// Pay an existing reservation
    Pay {
        reservation_id: i64,
        #[arg(long)]
        method: i64,
        /// Defaults to the stored reservation total
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Delete a reservation
    Cancel { reservation_id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum SportCommand {
    List,
    Show { id: i64 },
    /// Create a sport, optionally with inline services (`--service "Pelota=500"`)
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value_t = 60)]
        duration: u32,
        #[arg(long = "service", value_parser = parse_named_price)]
        services: Vec<(String, f64)>,
    },
    /// Rename, change the session length or append services
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        duration: Option<u32>,
        #[arg(long = "service", value_parser = parse_named_price)]
        services: Vec<(String, f64)>,
    },
    Delete { id: i64 },
    /// Services offered for the sport
    Services { id: i64 },
    AddService {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
    },
}

#[derive(Subcommand, Debug)]
pub enum CourtCommand {
    List,
    Add(CourtFields),
    Edit {
        id: i64,
        #[command(flatten)]
        fields: CourtFields,
    },
    /// The backend deactivates the court
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CourtFields {
    #[arg(long)]
    pub name: Option<String>,
    /// Free-text sport label
    #[arg(long)]
    pub sport_label: Option<String>,
    #[arg(long)]
    pub sport_id: Option<i64>,
    #[arg(long)]
    pub surface: Option<String>,
    #[arg(long)]
    pub hourly_price: Option<f64>,
    #[arg(long)]
    pub lighting_price: Option<f64>,
    /// Whether the court has lights
    #[arg(long)]
    pub has_lighting: Option<bool>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommand {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        sport_id: Option<i64>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        active: Option<bool>,
    },
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    List,
    Show { id: i64 },
    Add {
        #[arg(long)]
        dni: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Edit {
        id: i64,
        #[arg(long)]
        dni: Option<String>,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// The backend deactivates the client
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
pub enum MethodCommand {
    List,
    Show { id: i64 },
    Add {
        #[arg(long)]
        name: String,
    },
    Edit {
        id: i64,
        #[arg(long)]
        name: String,
    },
    Delete { id: i64 },
}

#[derive(Args, Debug, Clone)]
pub struct BookingArgs {
    #[arg(long)]
    pub court: i64,
    #[arg(long)]
    pub start: ClockTime,
    /// Defaults to the start plus the sport's session length
    #[arg(long)]
    pub end: Option<ClockTime>,
    #[arg(long, overrides_with = "no_lighting")]
    pub lighting: bool,
    #[arg(long, overrides_with = "lighting")]
    pub no_lighting: bool,
    /// `id=quantity`, repeatable
    #[arg(long = "service", value_parser = parse_service_quantity)]
    pub services: Vec<(i64, u32)>,
}

impl BookingArgs {
    /// `None` keeps whatever the form already holds.
    pub fn lighting(&self) -> Option<bool> {
        match (self.lighting, self.no_lighting) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn parse_service_quantity(raw: &str) -> Result<(i64, u32), String> {
    let (id, qty) = raw.split_once('=').unwrap_or((raw, "1"));
    let id = id.trim().parse().map_err(|_| format!("invalid service id in {:?}", raw))?;
    let qty: u32 = qty.trim().parse().map_err(|_| format!("invalid quantity in {:?}", raw))?;
    if qty == 0 {
        return Err(format!("quantity must be at least 1 in {:?}", raw));
    }
    Ok((id, qty))
}

fn parse_named_price(raw: &str) -> Result<(String, f64), String> {
    let (name, price) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PRICE, got {:?}", raw))?;
    let price = price.trim().replace(',', ".");
    let price = price.parse().map_err(|_| format!("invalid price in {:?}", raw))?;
    Ok((name.trim().to_string(), price))
}
