//! Single binary web server: tournament registration and fixture generation via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080). Log level via RUST_LOG.

use actix_web::{
    get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use tournament_fixtures::{
    generate_tournament_fixtures, list_fixtures, CompetitionType, FixtureError, Format,
    InMemoryStore, ParticipantId, Tournament, TournamentId, TournamentStore,
};

/// All tournaments, in memory.
type AppState = Data<InMemoryStore>;

/// Startup configuration read from the environment.
#[derive(Debug, Clone)]
struct ServerConfig {
    host: String,
    port: u16,
}

impl ServerConfig {
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or_else(default_port);
        Self { host, port }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    #[serde(default)]
    competition: CompetitionType,
    #[serde(default)]
    double_leg: bool,
}

#[derive(Deserialize)]
struct RegisterParticipantBody {
    name: String,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and participant id.
#[derive(Deserialize)]
struct TournamentParticipantPath {
    id: TournamentId,
    participant_id: ParticipantId,
}

/// Map a domain error to its HTTP status with a JSON `{ "error": ... }` body.
fn error_response(e: &FixtureError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        FixtureError::TournamentNotFound(_) | FixtureError::ParticipantNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        FixtureError::AlreadyGenerated | FixtureError::InvalidState => HttpResponse::Conflict().json(body),
        FixtureError::InsufficientParticipants { .. } => HttpResponse::UnprocessableEntity().json(body),
        FixtureError::PersistenceFailure(_) => HttpResponse::InternalServerError().json(body),
        FixtureError::DuplicateParticipantName | FixtureError::InvalidName => {
            HttpResponse::BadRequest().json(body)
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tournament-fixtures",
    })
}

/// Create a new tournament (returns it with id).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return error_response(&FixtureError::InvalidName);
    }
    let format = Format {
        competition: body.competition,
        double_leg: body.double_leg,
    };
    let tournament = Tournament::new(name, format);
    match state.insert(tournament.clone()) {
        Ok(()) => {
            log::info!("Created tournament {} ({:?})", tournament.id, format);
            HttpResponse::Ok().json(&tournament)
        }
        Err(e) => error_response(&e),
    }
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match state.load(path.id) {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(e) => error_response(&e),
    }
}

/// Register a participant (pending until approved; only before fixtures exist).
#[post("/api/tournaments/{id}/participants")]
async fn api_register_participant(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterParticipantBody>,
) -> HttpResponse {
    let result = state.update(path.id, |t| {
        t.register(body.name.as_str())?;
        Ok(t.clone())
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(e) => error_response(&e),
    }
}

/// Approve a registration.
#[put("/api/tournaments/{id}/participants/{participant_id}/approve")]
async fn api_approve_participant(state: AppState, path: Path<TournamentParticipantPath>) -> HttpResponse {
    let result = state.update(path.id, |t| {
        t.approve(path.participant_id)?;
        Ok(t.clone())
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(e) => error_response(&e),
    }
}

/// Reject a registration.
#[put("/api/tournaments/{id}/participants/{participant_id}/reject")]
async fn api_reject_participant(state: AppState, path: Path<TournamentParticipantPath>) -> HttpResponse {
    let result = state.update(path.id, |t| {
        t.reject(path.participant_id)?;
        Ok(t.clone())
    });
    match result {
        Ok(t) => HttpResponse::Ok().json(&t),
        Err(e) => error_response(&e),
    }
}

/// Generate all fixtures (409 if already generated, 422 with fewer than 2 approved participants).
#[post("/api/tournaments/{id}/matches/generate")]
async fn api_generate_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut rng = rand::thread_rng();
    match generate_tournament_fixtures(state.get_ref(), path.id, &mut rng) {
        Ok(records) => HttpResponse::Ok().json(&records),
        Err(e) => error_response(&e),
    }
}

/// Persisted fixtures, ordered by round then creation order.
#[get("/api/tournaments/{id}/matches")]
async fn api_list_matches(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    match list_fixtures(state.get_ref(), path.id) {
        Ok(records) => HttpResponse::Ok().json(&records),
        Err(e) => error_response(&e),
    }
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api_health)
        .service(api_create_tournament)
        .service(api_get_tournament)
        .service(api_register_participant)
        .service(api_approve_participant)
        .service(api_reject_participant)
        .service(api_generate_matches)
        .service(api_list_matches);
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);

    let state = Data::new(InMemoryStore::new());

    HttpServer::new(move || App::new().app_data(state.clone()).configure(routes))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
