use std::sync::Arc;

use tracing::info;

use crate::console::args::{
    BookingArgs, ClientCommand, Command, CourtCommand, CourtFields, MethodCommand, ServiceCommand, SportCommand,
};
use crate::console::render;
use crate::domain::models::{
    client::ClientPayload,
    court::CourtPayload,
    payment::PaymentMethodPayload,
    price::Price,
    reservation::ReservationFilter,
    service::NewService,
    sport::{NewSport, NewSportService, SportPatch},
};
use crate::domain::services::booking_controller::BookingController;
use crate::error::AppError;
use crate::state::AppState;

/// Runs one console command to completion.
pub async fn dispatch(command: Command, state: Arc<AppState>) -> Result<(), AppError> {
    match command {
        Command::Sport(cmd) => sport(cmd, &state).await?,
        Command::Court(cmd) => court(cmd, state).await?,
        Command::Service(cmd) => service(cmd, &state).await?,
        Command::Client(cmd) => client(cmd, &state).await?,
        Command::Method(cmd) => method(cmd, &state).await?,
        Command::Reservations { court, date } => {
            let filter = ReservationFilter { court_id: court, date };
            let reservations = state.reservation_api.list(&filter).await?;
            render::reservations(&reservations);
        }
        Command::Slots { court, date } => {
            let mut controller = BookingController::new(state);
            controller.select_court(Some(court)).await?;
            controller.set_date(Some(date));
            if let Some(view) = controller.refresh_day().await? {
                render::day(&view);
            }
        }
        Command::Quote(booking) => {
            let mut controller = BookingController::new(state);
            controller.load_catalogs().await?;
            fill_booking(&mut controller, &booking).await?;
            render::estimate(&controller.estimate());
        }
        Command::Book { booking, client, date, pay_with, replace } => {
            let mut controller = BookingController::new(state);
            controller.load_catalogs().await?;
            if let Some(original) = replace {
                controller.begin_edit(original).await?;
            }
            if client.is_some() {
                controller.set_client(client);
            }
            if date.is_some() {
                controller.set_date(date);
            }
            fill_booking(&mut controller, &booking).await?;
            controller.set_pay_with(pay_with)?;

            render::estimate(&controller.estimate());
            let outcome = controller.submit().await?;
            render::submission(&outcome);
        }
        Command::Pay { reservation_id, method, amount } => {
            let controller = BookingController::new(state);
            let receipt = controller
                .pay_reservation(reservation_id, method, amount.map(Price))
                .await?;
            println!("Payment {} registered for reservation {}: {}", receipt.id, receipt.reservation_id, receipt.amount);
        }
        Command::Cancel { reservation_id } => {
            let mut controller = BookingController::new(state);
            controller.delete_reservation(reservation_id).await?;
            println!("Reservation {} deleted", reservation_id);
        }
    }
    Ok(())
}

fn inline_services(services: Vec<(String, f64)>) -> Vec<NewSportService> {
    services
        .into_iter()
        .map(|(name, price)| NewSportService { name, price: Price(price) })
        .collect()
}

async fn sport(cmd: SportCommand, state: &AppState) -> Result<(), AppError> {
    match cmd {
        SportCommand::List => render::sports(&state.sport_api.list().await?),
        SportCommand::Show { id } => {
            let sport = state
                .sport_api
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Sport {}", id)))?;
            render::sports(std::slice::from_ref(&sport));
        }
        SportCommand::Add { name, duration, services } => {
            let sport = NewSport { name, duration_min: duration, services: inline_services(services) };
            let created = state.sport_api.create(&sport).await?;
            info!("Sport {} created", created.id);
            render::sports(std::slice::from_ref(&created));
        }
        SportCommand::Edit { id, name, duration, services } => {
            let patch = SportPatch { name, duration_min: duration, services: inline_services(services) };
            let updated = state.sport_api.update(id, &patch).await?;
            render::sports(std::slice::from_ref(&updated));
        }
        SportCommand::Delete { id } => {
            state.sport_api.delete(id).await?;
            println!("Sport {} deleted", id);
        }
        SportCommand::Services { id } => render::services(&state.sport_api.list_services(id).await?),
        SportCommand::AddService { id, name, price } => {
            let service = NewService { name, unit_price: Price(price), active: true, sport_id: Some(id) };
            let created = state.sport_api.create_service(id, &service).await?;
            render::services(std::slice::from_ref(&created));
        }
    }
    Ok(())
}

fn court_payload(fields: CourtFields) -> CourtPayload {
    CourtPayload {
        name: fields.name,
        sport_label: fields.sport_label,
        surface: fields.surface,
        hourly_price: fields.hourly_price.map(Price),
        lighting_price: fields.lighting_price.map(Price),
        has_lighting: fields.has_lighting,
        active: fields.active,
        sport_id: fields.sport_id,
    }
}

async fn court(cmd: CourtCommand, state: Arc<AppState>) -> Result<(), AppError> {
    match cmd {
        CourtCommand::List => {
            let mut controller = BookingController::new(state);
            controller.load_catalogs().await?;
            let courts: Vec<_> = controller.courts().collect();
            render::courts(&courts, controller.sports());
        }
        CourtCommand::Add(fields) => {
            let created = state.court_api.create(&court_payload(fields)).await?;
            println!("Court {} created", created.id);
        }
        CourtCommand::Edit { id, fields } => {
            let updated = state.court_api.update(id, &court_payload(fields)).await?;
            println!("Court {} updated", updated.id);
        }
        CourtCommand::Delete { id } => {
            state.court_api.delete(id).await?;
            println!("Court {} deactivated", id);
        }
    }
    Ok(())
}

async fn service(cmd: ServiceCommand, state: &AppState) -> Result<(), AppError> {
    match cmd {
        ServiceCommand::List => render::services(&state.service_api.list().await?),
        ServiceCommand::Add { name, price, sport_id } => {
            let service = NewService { name, unit_price: Price(price), active: true, sport_id };
            let created = state.service_api.create(&service).await?;
            render::services(std::slice::from_ref(&created));
        }
        ServiceCommand::Edit { id, name, price, active } => {
            // the backend replaces the whole record
            let current = state
                .service_api
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Service {}", id)))?;
            let service = NewService {
                name: name.unwrap_or(current.name),
                unit_price: price.map(Price).unwrap_or(current.unit_price),
                active: active.unwrap_or(current.active),
                sport_id: current.sport_id,
            };
            let updated = state.service_api.update(id, &service).await?;
            render::services(std::slice::from_ref(&updated));
        }
        ServiceCommand::Delete { id } => {
            state.service_api.delete(id).await?;
            println!("Service {} deleted", id);
        }
    }
    Ok(())
}

async fn client(cmd: ClientCommand, state: &AppState) -> Result<(), AppError> {
    match cmd {
        ClientCommand::List => render::clients(&state.client_api.list().await?),
        ClientCommand::Show { id } => {
            let client = state
                .client_api
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Client {}", id)))?;
            render::clients(std::slice::from_ref(&client));
        }
        ClientCommand::Add { dni, first_name, last_name, phone, email } => {
            let payload = ClientPayload {
                dni: Some(dni),
                first_name: Some(first_name),
                last_name: Some(last_name),
                phone,
                email,
            };
            let client = state.client_api.create(&payload).await?;
            render::clients(std::slice::from_ref(&client));
        }
        ClientCommand::Edit { id, dni, first_name, last_name, phone, email } => {
            let payload = ClientPayload { dni, first_name, last_name, phone, email };
            let client = state.client_api.update(id, &payload).await?;
            render::clients(std::slice::from_ref(&client));
        }
        ClientCommand::Delete { id } => {
            state.client_api.delete(id).await?;
            println!("Client {} deactivated", id);
        }
    }
    Ok(())
}

async fn method(cmd: MethodCommand, state: &AppState) -> Result<(), AppError> {
    match cmd {
        MethodCommand::List => render::methods(&state.payment_api.list_methods().await?),
        MethodCommand::Show { id } => {
            let method = state
                .payment_api
                .find_method(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Payment method {}", id)))?;
            render::methods(std::slice::from_ref(&method));
        }
        MethodCommand::Add { name } => {
            let created = state.payment_api.create_method(&PaymentMethodPayload { name }).await?;
            render::methods(std::slice::from_ref(&created));
        }
        MethodCommand::Edit { id, name } => {
            let updated = state.payment_api.update_method(id, &PaymentMethodPayload { name }).await?;
            render::methods(std::slice::from_ref(&updated));
        }
        MethodCommand::Delete { id } => {
            state.payment_api.delete_method(id).await?;
            println!("Payment method {} deleted", id);
        }
    }
    Ok(())
}

async fn fill_booking(controller: &mut BookingController, booking: &BookingArgs) -> Result<(), AppError> {
    controller.select_court(Some(booking.court)).await?;
    match booking.end {
        Some(end) => controller.set_time_range(booking.start, end),
        None => controller.set_start_time(Some(booking.start)),
    }
    if let Some(on) = booking.lighting() {
        controller.set_lighting(on);
    }
    // services given on the command line replace the ones of an edited reservation
    if !booking.services.is_empty() {
        controller.clear_services();
    }
    for (id, qty) in &booking.services {
        controller.set_service_quantity(*id, *qty)?;
    }
    Ok(())
}
