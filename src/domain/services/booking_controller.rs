use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::domain::models::{
    client::Client,
    clock::ClockTime,
    court::Court,
    payment::{PaymentMethod, PaymentReceipt, PaymentRequest},
    price::Price,
    reservation::{NewReservation, Reservation, ReservationCreated, ReservationFilter, ReservedService},
    service::Service,
};
use crate::domain::services::availability::{Slot, SlotGrid, generate_slots, suggest_end_time};
use crate::domain::services::pricing::{PriceEstimate, ServiceLine, estimate};
use crate::domain::services::sport_inference::{SportAliases, SportCatalog, services_for_court, session_duration};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub client_id: Option<i64>,
    pub court_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub start: Option<ClockTime>,
    pub end: Option<ClockTime>,
    pub lighting: bool,
    pub services: BTreeMap<i64, u32>,
    pub editing_reservation_id: Option<i64>,
    pub pay_with: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct DayView {
    pub court_id: i64,
    pub date: NaiveDate,
    pub reservations: Vec<Reservation>,
    pub slots: Vec<Slot>,
}

#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub created: ReservationCreated,
    pub replaced_reservation: Option<i64>,
    pub payment: Option<PaymentReceipt>,
    /// Follow-up steps that failed after the reservation itself was created.
    pub warnings: Vec<String>,
}

/// Owns the catalogs fetched from the backend and the booking form, and runs
/// every booking action against the gateways in [`AppState`].
pub struct BookingController {
    state: Arc<AppState>,
    grid: SlotGrid,
    aliases: SportAliases,
    clients: Vec<Client>,
    courts_by_id: BTreeMap<i64, Court>,
    services_by_id: HashMap<i64, Service>,
    selectable_services: BTreeMap<i64, Service>,
    sports: SportCatalog,
    payment_methods: Vec<PaymentMethod>,
    form: BookingForm,
}

impl BookingController {
    pub fn new(state: Arc<AppState>) -> Self {
        let grid = state.config.slot_grid;
        Self {
            state,
            grid,
            aliases: SportAliases::default(),
            clients: Vec::new(),
            courts_by_id: BTreeMap::new(),
            services_by_id: HashMap::new(),
            selectable_services: BTreeMap::new(),
            sports: SportCatalog::default(),
            payment_methods: Vec::new(),
            form: BookingForm::default(),
        }
    }

    pub fn with_aliases(mut self, aliases: SportAliases) -> Self {
        self.aliases = aliases;
        self
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn courts(&self) -> impl Iterator<Item = &Court> {
        self.courts_by_id.values()
    }

    pub fn court(&self, id: i64) -> Option<&Court> {
        self.courts_by_id.get(&id)
    }

    pub fn sports(&self) -> &SportCatalog {
        &self.sports
    }

    pub fn payment_methods(&self) -> &[PaymentMethod] {
        &self.payment_methods
    }

    pub fn selectable_services(&self) -> impl Iterator<Item = &Service> {
        self.selectable_services.values()
    }

    /// Fetches every catalog the form needs. A missing sports catalog only
    /// disables sport inference.
    #[instrument(skip(self))]
    pub async fn load_catalogs(&mut self) -> Result<(), AppError> {
        self.clients = self.state.client_api.list().await?;
        self.courts_by_id = self
            .state
            .court_api
            .list()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        self.services_by_id = self
            .state
            .service_api
            .list()
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        self.sports = match self.state.sport_api.list().await {
            Ok(sports) => SportCatalog::new(&sports, self.aliases.clone()),
            Err(e) => {
                warn!("Sports could not be loaded, sport inference disabled: {}", e);
                SportCatalog::new(&[], self.aliases.clone())
            }
        };

        self.payment_methods = self.state.payment_api.list_methods().await?;

        info!(
            "Catalogs loaded: {} clients, {} courts, {} services, {} payment methods",
            self.clients.len(),
            self.courts_by_id.len(),
            self.services_by_id.len(),
            self.payment_methods.len()
        );
        Ok(())
    }

    pub fn set_client(&mut self, client_id: Option<i64>) {
        self.form.client_id = client_id;
    }

    pub fn set_date(&mut self, date: Option<NaiveDate>) {
        self.form.date = date;
    }

    pub fn set_lighting(&mut self, on: bool) {
        self.form.lighting = on;
    }

    pub fn set_pay_with(&mut self, method_id: Option<i64>) -> Result<(), AppError> {
        if let Some(id) = method_id
            && !self.payment_methods.is_empty()
            && !self.payment_methods.iter().any(|m| m.id == id)
        {
            return Err(AppError::Validation(format!("Unknown payment method {}", id)));
        }
        self.form.pay_with = method_id;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn select_court(&mut self, court_id: Option<i64>) -> Result<(), AppError> {
        self.form.court_id = court_id;
        let Some(id) = court_id else {
            self.selectable_services.clear();
            self.form.services.clear();
            return Ok(());
        };

        match self.state.court_api.find_by_id(id).await {
            Ok(Some(fresh)) => {
                self.courts_by_id.insert(id, fresh);
            }
            Ok(None) => {
                self.courts_by_id.remove(&id);
            }
            Err(e) => warn!("Could not refresh court {}, using cached copy: {}", id, e),
        }
        let Some(court) = self.courts_by_id.get(&id) else {
            self.form.court_id = None;
            return Err(AppError::NotFound(format!("Court {}", id)));
        };

        let sport_id = self.sports.resolve_court(court);
        debug!("Court {} resolved to sport {:?}", id, sport_id);

        let sport_services = match sport_id {
            Some(sid) => self.state.sport_api.list_services(sid).await.unwrap_or_else(|e| {
                warn!("Services of sport {} unavailable, using global list: {}", sid, e);
                Vec::new()
            }),
            None => Vec::new(),
        };

        let global: Vec<Service> = self.services_by_id.values().cloned().collect();
        self.selectable_services = services_for_court(sport_id, sport_services, &global)
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let offered = &self.selectable_services;
        self.form.services.retain(|sid, _| offered.contains_key(sid));
        Ok(())
    }

    pub fn session_minutes(&self) -> u32 {
        self.form
            .court_id
            .and_then(|id| self.courts_by_id.get(&id))
            .map(|c| session_duration(c, &self.sports))
            .unwrap_or(60)
    }

    // end follows the court's session length
    pub fn set_start_time(&mut self, start: Option<ClockTime>) {
        self.form.start = start;
        self.form.end = start.map(|s| suggest_end_time(s, self.session_minutes()));
    }

    pub fn set_time_range(&mut self, start: ClockTime, end: ClockTime) {
        self.form.start = Some(start);
        self.form.end = Some(end);
    }

    pub fn set_service_quantity(&mut self, service_id: i64, quantity: u32) -> Result<(), AppError> {
        if !self.selectable_services.contains_key(&service_id) {
            return Err(AppError::Validation(format!(
                "Service {} is not offered for the selected court",
                service_id
            )));
        }
        self.form.services.insert(service_id, quantity.max(1));
        Ok(())
    }

    pub fn deselect_service(&mut self, service_id: i64) {
        self.form.services.remove(&service_id);
    }

    pub fn clear_services(&mut self) {
        self.form.services.clear();
    }

    /// `None` until both a court and a date are chosen.
    #[instrument(skip(self))]
    pub async fn refresh_day(&self) -> Result<Option<DayView>, AppError> {
        let (Some(court_id), Some(date)) = (self.form.court_id, self.form.date) else {
            return Ok(None);
        };

        let filter = ReservationFilter { court_id: Some(court_id), date: Some(date) };
        let reservations = self.state.reservation_api.list(&filter).await?;
        let taken: Vec<_> = reservations.iter().map(Reservation::interval).collect();
        let slots = generate_slots(&self.grid, &taken);

        debug!("{} reservations, {} slots for court {} on {}", reservations.len(), slots.len(), court_id, date);
        Ok(Some(DayView { court_id, date, reservations, slots }))
    }

    pub fn choose_slot(&mut self, slot: &Slot) -> Result<(), AppError> {
        let (start, end) = slot.selection().ok_or_else(|| {
            AppError::Unavailable(format!("{} is {}", slot, slot.status.label().to_lowercase()))
        })?;
        self.set_time_range(start, end);
        Ok(())
    }

    pub fn estimate(&self) -> PriceEstimate {
        let court = self.form.court_id.and_then(|id| self.courts_by_id.get(&id));
        let lines: Vec<ServiceLine> = self
            .form
            .services
            .iter()
            .filter_map(|(id, qty)| {
                self.selectable_services
                    .get(id)
                    .map(|s| ServiceLine { unit_price: s.unit_price, quantity: *qty })
            })
            .collect();
        estimate(court, self.form.start, self.form.end, self.form.lighting, &lines)
    }

    fn build_request(&self) -> Result<NewReservation, AppError> {
        let f = &self.form;
        let (Some(client_id), Some(court_id), Some(date), Some(start_time), Some(end_time)) =
            (f.client_id, f.court_id, f.date, f.start, f.end)
        else {
            return Err(AppError::Validation(
                "Select a client, a court, a date and a time range before booking".into(),
            ));
        };

        Ok(NewReservation {
            client_id,
            court_id,
            date,
            start_time,
            end_time,
            uses_lighting: f.lighting,
            services: f
                .services
                .iter()
                .map(|(id, qty)| ReservedService { service_id: *id, quantity: (*qty).max(1) })
                .collect(),
        })
    }

    /// Checks availability, creates the reservation, removes the reservation
    /// being edited and charges the pay-now method. Only the first two steps can
    /// fail the submission.
    #[instrument(skip(self))]
    pub async fn submit(&mut self) -> Result<SubmissionOutcome, AppError> {
        let request = self.build_request()?;

        let check = self.state.reservation_api.check_availability(&(&request).into()).await?;
        if !check.available {
            let reason = check
                .reason
                .unwrap_or_else(|| "occupied or rejected by validation".to_string());
            warn!("Slot {}-{} unavailable: {}", request.start_time, request.end_time, reason);
            return Err(AppError::Unavailable(reason));
        }

        let created = self.state.reservation_api.create(&request).await?;
        let mut warnings = Vec::new();

        let mut replaced_reservation = None;
        if let Some(original) = self.form.editing_reservation_id.take() {
            match self.state.reservation_api.delete(original).await {
                Ok(()) => replaced_reservation = Some(original),
                Err(e) => {
                    warn!("Original reservation {} was not deleted: {}", original, e);
                    warnings.push(format!(
                        "Original reservation {} could not be deleted: {}",
                        original,
                        e.user_message()
                    ));
                }
            }
        }

        let mut payment = None;
        if let Some(method_id) = self.form.pay_with {
            let request = PaymentRequest { method_id, amount: created.total_price };
            match self.state.payment_api.pay_reservation(created.id, &request).await {
                Ok(receipt) => payment = Some(receipt),
                Err(e) => {
                    warn!("Payment for reservation {} failed: {}", created.id, e);
                    warnings.push(format!("Payment failed: {}", e.user_message()));
                }
            }
        }

        self.form.start = None;
        self.form.end = None;
        self.form.lighting = false;
        self.form.services.clear();
        self.form.pay_with = None;

        Ok(SubmissionOutcome { created, replaced_reservation, payment, warnings })
    }

    /// Loads an existing reservation into the form. Submitting then creates the
    /// replacement and deletes the original.
    #[instrument(skip(self))]
    pub async fn begin_edit(&mut self, reservation_id: i64) -> Result<(), AppError> {
        let reservation = self
            .state
            .reservation_api
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {}", reservation_id)))?;

        self.form.client_id = Some(reservation.client_id);
        self.form.date = Some(reservation.date);
        self.select_court(Some(reservation.court_id)).await?;
        self.set_time_range(reservation.start_time, reservation.end_time);
        self.form.lighting = reservation.uses_lighting;
        self.form.services.clear();
        for line in &reservation.services {
            if self.selectable_services.contains_key(&line.service_id) {
                self.form.services.insert(line.service_id, line.quantity.max(1));
            } else {
                warn!("Service {} of reservation {} is no longer offered", line.service_id, reservation_id);
            }
        }
        self.form.editing_reservation_id = Some(reservation_id);
        Ok(())
    }

    pub fn cancel_edit(&mut self) {
        self.form.editing_reservation_id = None;
    }

    /// Pays an existing reservation. Without an explicit amount the backend's
    /// stored total is sent, which is what the backend compares against.
    #[instrument(skip(self))]
    pub async fn pay_reservation(
        &self,
        reservation_id: i64,
        method_id: i64,
        amount: Option<Price>,
    ) -> Result<PaymentReceipt, AppError> {
        let reservation = self
            .state
            .reservation_api
            .find_by_id(reservation_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {}", reservation_id)))?;

        if reservation.is_paid() {
            return Err(AppError::Validation(format!("Reservation {} is already paid", reservation_id)));
        }

        let request = PaymentRequest {
            method_id,
            amount: amount.unwrap_or(reservation.total_price),
        };
        self.state.payment_api.pay_reservation(reservation_id, &request).await
    }

    #[instrument(skip(self))]
    pub async fn delete_reservation(&mut self, reservation_id: i64) -> Result<(), AppError> {
        self.state.reservation_api.delete(reservation_id).await?;
        if self.form.editing_reservation_id == Some(reservation_id) {
            self.form.editing_reservation_id = None;
        }
        Ok(())
    }
}
