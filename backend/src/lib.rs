pub mod config;
pub mod error;
pub mod logging;
mod note;
mod payload;
pub mod person;
pub mod store;

use actix_web::web;

pub use config::Config;
pub use person::PersonRepository;
pub use store::{MemoryNoteStore, NoteStore, PgNoteStore};

pub struct AppState {
    pub notes: Box<dyn NoteStore>,
    pub persons: PersonRepository,
}

impl AppState {
    /// Notes and persons both in memory, seeded with the demo data.
    pub fn in_memory() -> Self {
        Self::with_notes(Box::new(MemoryNoteStore::seeded()))
    }

    pub fn with_notes(notes: Box<dyn NoteStore>) -> Self {
        Self {
            notes,
            persons: PersonRepository::seeded(),
        }
    }
}

/// Routes, JSON error handling and the unknown-endpoint fallback for one
/// shared state. `PUT /api/notes/{id}` only exists when the note store
/// supports updates.
pub fn configure(app_state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let mut note_by_id = resource("/api/notes/{id}")
            .route(web::get().to(note::show))
            .route(web::delete().to(note::delete));
        if app_state.notes.supports_update() {
            note_by_id = note_by_id.route(web::put().to(note::update));
        }

        cfg.app_data(app_state)
            .app_data(web::PayloadConfig::new(payload::BODY_LIMIT))
            .app_data(
                web::JsonConfig::default()
                    .limit(payload::BODY_LIMIT)
                    .error_handler(error::json_error_handler),
            )
            .service(resource("/").route(web::get().to(hello)))
            .service(resource("/info").route(web::get().to(person::info)))
            .service(
                resource("/api/notes")
                    .route(web::get().to(note::index))
                    .route(web::post().to(note::create)),
            )
            .service(note_by_id)
            .service(
                resource("/api/persons")
                    .route(web::get().to(person::index))
                    .route(web::post().to(person::create)),
            )
            .service(
                resource("/api/persons/{id}")
                    .route(web::get().to(person::show))
                    .route(web::delete().to(person::delete)),
            )
            .default_service(web::to(unknown_endpoint));
    }
}

// A known path with an unsupported method is as unknown as an unknown path.
fn resource(path: &str) -> actix_web::Resource {
    web::resource(path).default_service(web::to(unknown_endpoint))
}

async fn hello() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body("<h1>Hello World!!</h1>")
}

async fn unknown_endpoint() -> actix_web::HttpResponse {
    actix_web::HttpResponse::NotFound().json(common::ErrorPayload::new("unknown endpoint"))
}
