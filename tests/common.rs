use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use court_booking_client::{
    config::Config,
    domain::services::availability::SlotGrid,
    infra::factory::bootstrap_state,
    state::AppState,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory records served by the mock backend, stored in the backend's own
/// JSON shapes.
#[derive(Default)]
pub struct MockData {
    pub sports: Vec<Value>,
    pub courts: Vec<Value>,
    pub services: Vec<Value>,
    pub clients: Vec<Value>,
    pub reservations: Vec<Value>,
    pub methods: Vec<Value>,
    pub next_id: i64,
    pub fail_sports: bool,
}

impl MockData {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

type Db = Arc<Mutex<MockData>>;

#[allow(dead_code)]
pub struct TestApp {
    pub base_url: String,
    pub state: Arc<AppState>,
    pub db: Db,
}

fn test_config(base_url: &str) -> Config {
    Config {
        api_base_url: base_url.to_string(),
        http_timeout_secs: 5,
        log_dir: "./logs".to_string(),
        slot_grid: SlotGrid::default(),
    }
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db: Db = Arc::new(Mutex::new(seed()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().unwrap();
        let router = mock_router(db.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let base_url = format!("http://{}", addr);
        let state = Arc::new(bootstrap_state(&test_config(&base_url)));

        Self { base_url, state, db }
    }

    /// State pointing at a port nobody listens on.
    pub async fn unreachable_state() -> Arc<AppState> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        Arc::new(bootstrap_state(&test_config(&format!("http://{}", addr))))
    }

    pub fn reservation_count(&self) -> usize {
        self.db.lock().unwrap().reservations.len()
    }

    pub fn reservation(&self, id: i64) -> Option<Value> {
        find(&self.db.lock().unwrap().reservations, "id_reserva", id)
    }

    /// Direct access to the backend records, for seeding and assertions.
    pub fn with_data<R>(&self, f: impl FnOnce(&mut MockData) -> R) -> R {
        f(&mut self.db.lock().unwrap())
    }
}

fn seed() -> MockData {
    MockData {
        sports: vec![
            json!({"id_deporte": 1, "nombre": "Pádel", "duracion_minutos": 60, "servicios": [
                {"id_servicio": 11, "nombre": "Paleta", "precio_adicional": "30.00", "activo": true}
            ]}),
            json!({"id_deporte": 2, "nombre": "Fútbol", "duracion_minutos": 90, "servicios": []}),
            json!({"id_deporte": 3, "nombre": "Tenis", "duracion_minutos": 120, "servicios": []}),
        ],
        courts: vec![
            json!({"id_cancha": 1, "nombre": "Pádel 1", "tipo_deporte": "padel", "superficie": "césped",
                   "precio_hora": "100.00", "precio_iluminacion": "20.00", "iluminacion": true, "activa": true}),
            json!({"id_cancha": 2, "nombre": "F5 Norte", "tipo_deporte": "Futbol",
                   "precio_hora": "150.00", "precio_iluminacion": null, "activa": true}),
            json!({"id_cancha": 3, "nombre": "Central", "tipo_deporte": "Polvo de ladrillo",
                   "precio_hora": 80, "precio_iluminacion": "10.00", "activa": true,
                   "deporte": {"id_deporte": 3, "nombre": "Tenis", "duracion_minutos": 120}}),
        ],
        services: vec![
            json!({"id_servicio": 21, "nombre": "Pechera", "precio_adicional": "10.00", "activo": true, "id_deporte": null}),
            json!({"id_servicio": 22, "nombre": "Pelota", "precio_adicional": "25.00", "activo": true, "id_deporte": 2}),
            json!({"id_servicio": 23, "nombre": "Vestuario", "precio_adicional": "5.00", "activo": false, "id_deporte": null}),
            json!({"id_servicio": 24, "nombre": "Tubo de pelotas", "precio_adicional": "12.50", "activo": true, "id_deporte": 3}),
        ],
        clients: vec![json!({
            "id_cliente": 1, "dni": "30111222", "nombre": "Ana", "apellido": "Paz",
            "telefono": "1155550000", "email": "ana@example.com", "activo": true
        })],
        reservations: vec![json!({
            "id_reserva": 500, "id_cliente": 1, "cliente_nombre": "Ana", "cliente_apellido": "Paz",
            "id_cancha": 1, "fecha_reserva": "2025-03-10", "hora_inicio": "09:00", "hora_fin": "10:00",
            "precio_total": "100.00", "usa_iluminacion": false, "pago": null,
            "servicios_adicionales": [{"id_servicio": 11, "cantidad": 1}]
        })],
        methods: vec![
            json!({"id_metodo": 1, "nombre": "Efectivo"}),
            json!({"id_metodo": 2, "nombre": "Tarjeta"}),
        ],
        next_id: 1000,
        fail_sports: false,
    }
}

fn mock_router(db: Db) -> Router {
    Router::new()
        .route("/api/deportes", get(list_sports).post(create_sport))
        .route("/api/deportes/{id}", get(get_sport).put(update_sport).delete(delete_sport))
        .route("/api/deportes/{id}/servicios", get(sport_services).post(add_sport_service))
        .route("/api/canchas", get(list_courts).post(create_court))
        .route("/api/canchas/{id}", get(get_court).put(update_court).delete(deactivate_court))
        .route("/api/servicios", get(list_services).post(create_service))
        .route("/api/servicios/{id}", get(get_service).put(update_service).delete(delete_service))
        .route("/api/clientes", get(list_clients).post(create_client))
        .route("/api/clientes/{id}", get(get_client).put(update_client).delete(deactivate_client))
        .route("/api/metodos", get(list_methods).post(create_method))
        .route("/api/metodos/{id}", get(get_method).put(update_method).delete(delete_method))
        .route("/api/reservas", get(list_reservations).post(create_reservation))
        .route("/api/reservas/check", get(check_reservation))
        .route("/api/reservas/{id}", get(get_reservation).delete(delete_reservation))
        .route("/api/reservas/{id}/pagar", post(pay_reservation))
        .with_state(db)
}

fn find(items: &[Value], key: &str, id: i64) -> Option<Value> {
    items.iter().find(|v| v[key].as_i64() == Some(id)).cloned()
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn found(item: Option<Value>) -> Response {
    match item {
        Some(v) => Json(v).into_response(),
        None => fail(StatusCode::NOT_FOUND, "No encontrado"),
    }
}

fn merge(record: &mut Value, body: &Value) {
    if let (Some(record), Some(body)) = (record.as_object_mut(), body.as_object()) {
        for (k, v) in body {
            record.insert(k.clone(), v.clone());
        }
    }
}

fn update_in(items: &mut [Value], key: &str, id: i64, body: &Value) -> Response {
    match items.iter_mut().find(|v| v[key].as_i64() == Some(id)) {
        Some(record) => {
            merge(record, body);
            Json(record.clone()).into_response()
        }
        None => fail(StatusCode::NOT_FOUND, "No encontrado"),
    }
}

fn remove_from(items: &mut Vec<Value>, key: &str, id: i64, message: &str) -> Response {
    let before = items.len();
    items.retain(|v| v[key].as_i64() != Some(id));
    if items.len() == before {
        return fail(StatusCode::NOT_FOUND, "No encontrado");
    }
    Json(json!({ "message": message })).into_response()
}

/// Courts and clients are never removed, only flagged inactive.
fn deactivate_in(items: &mut [Value], key: &str, id: i64, flag: &str, message: &str) -> Response {
    match items.iter_mut().find(|v| v[key].as_i64() == Some(id)) {
        Some(record) => {
            record[flag] = json!(false);
            Json(json!({ "message": message })).into_response()
        }
        None => fail(StatusCode::NOT_FOUND, "No encontrado"),
    }
}

fn money(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().replace(',', ".").parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Minutes after midnight of an `HH:MM` or `HH:MM:SS` value.
fn minutes(v: &Value) -> Option<i64> {
    let mut parts = v.as_str()?.split(':');
    let h: i64 = parts.next()?.trim().parse().ok()?;
    let m: i64 = parts.next()?.trim().parse().ok()?;
    (h < 24 && m < 60).then_some(h * 60 + m)
}

/// `[start, end)` in minutes; an end at or before the start belongs to the next day.
fn span(start: &Value, end: &Value) -> Option<(i64, i64)> {
    let s = minutes(start)?;
    let mut e = minutes(end)?;
    if e <= s {
        e += 1440;
    }
    Some((s, e))
}

fn spans_overlap((a_s, a_e): (i64, i64), (b_s, b_e): (i64, i64)) -> bool {
    [-1440, 0, 1440].iter().any(|off| a_s < b_e + off && b_s + off < a_e)
}

/// First reservation on the same court and date overlapping the given times.
fn conflict(data: &MockData, court: i64, date: &str, wanted: (i64, i64)) -> Option<i64> {
    data.reservations
        .iter()
        .filter(|r| r["id_cancha"].as_i64() == Some(court) && r["fecha_reserva"] == date)
        .find(|r| span(&r["hora_inicio"], &r["hora_fin"]).is_some_and(|taken| spans_overlap(taken, wanted)))
        .and_then(|r| r["id_reserva"].as_i64())
}

fn sport_service(data: &mut MockData, item: &Value) -> Value {
    json!({
        "id_servicio": data.next_id(),
        "nombre": item["nombre"],
        "precio_adicional": format!("{:.2}", money(&item["precio_adicional"])),
        "activo": true,
    })
}

async fn list_sports(State(db): State<Db>) -> Response {
    let data = db.lock().unwrap();
    if data.fail_sports {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "DEPORTES: error interno");
    }
    Json(Value::Array(data.sports.clone())).into_response()
}

async fn get_sport(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(find(&db.lock().unwrap().sports, "id_deporte", id))
}

async fn sport_services(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    match find(&db.lock().unwrap().sports, "id_deporte", id) {
        Some(sport) => Json(sport["servicios"].clone()).into_response(),
        None => fail(StatusCode::NOT_FOUND, "Deporte no encontrado"),
    }
}

async fn create_sport(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    let name = body["nombre"].as_str().unwrap_or_default().trim().to_string();
    if name.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "El nombre es obligatorio");
    }
    let id = data.next_id();
    let items = body["servicios"].as_array().cloned().unwrap_or_default();
    let services: Vec<Value> = items.iter().map(|item| sport_service(&mut data, item)).collect();
    let sport = json!({
        "id_deporte": id,
        "nombre": name,
        "duracion_minutos": body["duracion_minutos"].as_u64().unwrap_or(60),
        "servicios": services,
    });
    data.sports.push(sport.clone());
    (StatusCode::CREATED, Json(sport)).into_response()
}

async fn update_sport(State(db): State<Db>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    if find(&data.sports, "id_deporte", id).is_none() {
        return fail(StatusCode::NOT_FOUND, "Deporte no encontrado");
    }
    // new services are appended, existing ones stay
    let items = body["servicios"].as_array().cloned().unwrap_or_default();
    let added: Vec<Value> = items.iter().map(|item| sport_service(&mut data, item)).collect();
    let mut fields = body.clone();
    if let Some(obj) = fields.as_object_mut() {
        obj.remove("servicios");
    }
    let Some(sport) = data.sports.iter_mut().find(|s| s["id_deporte"].as_i64() == Some(id)) else {
        return fail(StatusCode::NOT_FOUND, "Deporte no encontrado");
    };
    merge(sport, &fields);
    if let Some(services) = sport["servicios"].as_array_mut() {
        services.extend(added);
    }
    Json(sport.clone()).into_response()
}

async fn delete_sport(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    remove_from(&mut db.lock().unwrap().sports, "id_deporte", id, "Deporte eliminado")
}

async fn add_sport_service(State(db): State<Db>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    if find(&data.sports, "id_deporte", id).is_none() {
        return fail(StatusCode::NOT_FOUND, "Deporte no encontrado");
    }
    let service = sport_service(&mut data, &body);
    let Some(sport) = data.sports.iter_mut().find(|s| s["id_deporte"].as_i64() == Some(id)) else {
        return fail(StatusCode::NOT_FOUND, "Deporte no encontrado");
    };
    if let Some(services) = sport["servicios"].as_array_mut() {
        services.push(service.clone());
    }
    (StatusCode::CREATED, Json(service)).into_response()
}

async fn list_courts(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.lock().unwrap().courts.clone()))
}

async fn get_court(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(find(&db.lock().unwrap().courts, "id_cancha", id))
}

async fn create_court(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    let mut court = body.clone();
    court["id_cancha"] = json!(data.next_id());
    if court["activa"].is_null() {
        court["activa"] = json!(true);
    }
    data.courts.push(court.clone());
    (StatusCode::CREATED, Json(court)).into_response()
}

async fn update_court(State(db): State<Db>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    update_in(&mut db.lock().unwrap().courts, "id_cancha", id, &body)
}

async fn deactivate_court(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    deactivate_in(&mut db.lock().unwrap().courts, "id_cancha", id, "activa", "Cancha desactivada")
}

async fn list_services(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.lock().unwrap().services.clone()))
}

async fn get_service(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(find(&db.lock().unwrap().services, "id_servicio", id))
}

async fn create_service(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    let mut service = body.clone();
    service["id_servicio"] = json!(data.next_id());
    data.services.push(service.clone());
    (StatusCode::CREATED, Json(service)).into_response()
}

async fn update_service(State(db): State<Db>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    update_in(&mut db.lock().unwrap().services, "id_servicio", id, &body)
}

async fn delete_service(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    remove_from(&mut db.lock().unwrap().services, "id_servicio", id, "Servicio eliminado")
}

async fn list_clients(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.lock().unwrap().clients.clone()))
}

async fn get_client(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(find(&db.lock().unwrap().clients, "id_cliente", id))
}

async fn create_client(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    if data.clients.iter().any(|c| c["dni"] == body["dni"]) {
        return fail(StatusCode::CONFLICT, "CLIENTES: DNI ya registrado");
    }
    let id = data.next_id();
    let mut client = body.clone();
    client["id_cliente"] = json!(id);
    client["activo"] = json!(true);
    data.clients.push(client.clone());
    (StatusCode::CREATED, Json(client)).into_response()
}

async fn update_client(State(db): State<Db>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    update_in(&mut db.lock().unwrap().clients, "id_cliente", id, &body)
}

async fn deactivate_client(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    deactivate_in(&mut db.lock().unwrap().clients, "id_cliente", id, "activo", "Cliente desactivado")
}

async fn list_methods(State(db): State<Db>) -> Json<Value> {
    Json(Value::Array(db.lock().unwrap().methods.clone()))
}

async fn get_method(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(find(&db.lock().unwrap().methods, "id_metodo", id))
}

async fn create_method(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    let method = json!({ "id_metodo": data.next_id(), "nombre": body["nombre"] });
    data.methods.push(method.clone());
    (StatusCode::CREATED, Json(method)).into_response()
}

async fn update_method(State(db): State<Db>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    update_in(&mut db.lock().unwrap().methods, "id_metodo", id, &body)
}

async fn delete_method(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    remove_from(&mut db.lock().unwrap().methods, "id_metodo", id, "Método eliminado")
}

async fn list_reservations(State(db): State<Db>, Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let data = db.lock().unwrap();
    let court = q.get("id_cancha").and_then(|c| c.parse::<i64>().ok());
    let date = q.get("fecha_reserva");
    let items = data
        .reservations
        .iter()
        .filter(|r| court.is_none_or(|c| r["id_cancha"].as_i64() == Some(c)))
        .filter(|r| date.is_none_or(|d| r["fecha_reserva"] == d.as_str()))
        .cloned()
        .collect();
    Json(Value::Array(items))
}

async fn get_reservation(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    found(find(&db.lock().unwrap().reservations, "id_reserva", id))
}

async fn check_reservation(State(db): State<Db>, Query(q): Query<HashMap<String, String>>) -> Json<Value> {
    let data = db.lock().unwrap();
    let court = q.get("id_cancha").and_then(|c| c.parse::<i64>().ok()).unwrap_or_default();
    let date = q.get("fecha_reserva").cloned().unwrap_or_default();
    let start = json!(q.get("hora_inicio"));
    let end = json!(q.get("hora_fin"));
    let Some(wanted) = span(&start, &end) else {
        return Json(json!({"available": false, "reason": "HORARIO_INVALIDO"}));
    };
    match conflict(&data, court, &date, wanted) {
        Some(_) => Json(json!({"available": false, "reason": "RESERVA_SUPERPUESTA"})),
        None => Json(json!({"available": true})),
    }
}

async fn create_reservation(State(db): State<Db>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    let Some(client) = body["id_cliente"].as_i64().and_then(|id| find(&data.clients, "id_cliente", id)) else {
        return fail(StatusCode::BAD_REQUEST, "Cliente no existe");
    };
    let Some(court) = body["id_cancha"].as_i64().and_then(|id| find(&data.courts, "id_cancha", id)) else {
        return fail(StatusCode::BAD_REQUEST, "Cancha no existe");
    };
    let Some(wanted) = span(&body["hora_inicio"], &body["hora_fin"]) else {
        return fail(StatusCode::BAD_REQUEST, "Horario inválido");
    };
    let date = body["fecha_reserva"].as_str().unwrap_or_default().to_string();
    let court_id = court["id_cancha"].as_i64().unwrap_or_default();
    if conflict(&data, court_id, &date, wanted).is_some() {
        return fail(StatusCode::CONFLICT, "RESERVAS: Ya existe una reserva en ese horario");
    }

    let hours = (wanted.1 - wanted.0) as f64 / 60.0;
    let mut total = money(&court["precio_hora"]) * hours;
    if body["usa_iluminacion"].as_bool().unwrap_or(false) {
        total += money(&court["precio_iluminacion"]) * hours;
    }
    let lines = body["servicios_adicionales"].as_array().cloned().unwrap_or_default();
    for line in &lines {
        let id = line["id_servicio"].as_i64().unwrap_or_default();
        let qty = line["cantidad"].as_u64().unwrap_or(1).max(1) as f64;
        let unit = find(&data.services, "id_servicio", id)
            .or_else(|| {
                data.sports
                    .iter()
                    .filter_map(|s| s["servicios"].as_array())
                    .flatten()
                    .find(|s| s["id_servicio"].as_i64() == Some(id))
                    .cloned()
            })
            .map(|s| money(&s["precio_adicional"]))
            .unwrap_or(0.0);
        total += unit * qty;
    }

    let id = data.next_id();
    let total_text = format!("{:.2}", total);
    data.reservations.push(json!({
        "id_reserva": id,
        "id_cliente": client["id_cliente"],
        "cliente_nombre": client["nombre"],
        "cliente_apellido": client["apellido"],
        "id_cancha": court_id,
        "fecha_reserva": date,
        "hora_inicio": body["hora_inicio"],
        "hora_fin": body["hora_fin"],
        "precio_total": total_text,
        "usa_iluminacion": body["usa_iluminacion"],
        "pago": null,
        "servicios_adicionales": lines,
    }));
    (StatusCode::CREATED, Json(json!({"id_reserva": id, "precio_total": total_text}))).into_response()
}

async fn delete_reservation(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut data = db.lock().unwrap();
    let before = data.reservations.len();
    data.reservations.retain(|r| r["id_reserva"].as_i64() != Some(id));
    if data.reservations.len() == before {
        return fail(StatusCode::NOT_FOUND, "Reserva no encontrada");
    }
    Json(json!({"ok": true})).into_response()
}

async fn pay_reservation(State(db): State<Db>, Path(id): Path<i64>, Json(body): Json<Value>) -> Response {
    let mut data = db.lock().unwrap();
    let Some(method) = body["id_metodo"].as_i64().and_then(|m| find(&data.methods, "id_metodo", m)) else {
        return fail(StatusCode::BAD_REQUEST, "Método de pago no existe");
    };
    let payment_id = data.next_id();
    let Some(reservation) = data.reservations.iter_mut().find(|r| r["id_reserva"].as_i64() == Some(id)) else {
        return fail(StatusCode::NOT_FOUND, "Reserva no encontrada");
    };
    if !reservation["pago"].is_null() {
        return fail(StatusCode::CONFLICT, "PAGOS: La reserva ya está pagada");
    }
    let amount = money(&body["monto"]);
    if (amount - money(&reservation["precio_total"])).abs() > 0.009 {
        return fail(StatusCode::BAD_REQUEST, "PAGOS: El monto no coincide con el total");
    }
    let amount_text = format!("{:.2}", amount);
    reservation["pago"] = json!({
        "id_pago": payment_id,
        "id_metodo": method["id_metodo"],
        "metodo_nombre": method["nombre"],
        "monto": amount_text,
    });
    (
        StatusCode::CREATED,
        Json(json!({"id_pago": payment_id, "id_reserva": id, "monto": amount_text})),
    )
        .into_response()
}
