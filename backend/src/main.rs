use anyhow::Context;

use backend::{AppState, Config, MemoryNoteStore, NoteStore, PgNoteStore};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let notes: Box<dyn NoteStore> = match &config.database_url {
        Some(database_url) => {
            let store = PgNoteStore::connect(database_url)
                .await
                .context("Could not connect to the DB")?;
            store
                .migrate()
                .await
                .context("Failed to run database migrations")?;
            log::info!("notes are stored in PostgreSQL");
            Box::new(store)
        }
        None => {
            log::info!("notes are kept in memory");
            Box::new(MemoryNoteStore::seeded())
        }
    };
    let app_state = actix_web::web::Data::new(AppState::with_notes(notes));
    let cors_origin = config.cors_origin.clone();

    log::info!("Server running on port {}", config.port);
    actix_web::HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => actix_cors::Cors::default()
                .allowed_origin(origin)
                .allow_any_method()
                .allow_any_header(),
            None => actix_cors::Cors::permissive(),
        };
        actix_web::App::new()
            .wrap(actix_web::middleware::from_fn(backend::logging::capture_body))
            .wrap(cors)
            .wrap(backend::logging::access_log())
            .configure(backend::configure(app_state.clone()))
    })
    .bind((config.bind_address.as_str(), config.port))
    .with_context(|| format!("Failed to bind {}:{}", config.bind_address, config.port))?
    .run()
    .await
    .context("Server error")?;

    Ok(())
}
