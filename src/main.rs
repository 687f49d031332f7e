use bento_service::{build_server, create_pool, run_migrations, AppState, Config, Repositories};
use dotenvy::dotenv;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let repos = match config.database_url.as_deref() {
        Some(url) => {
            let pool = match create_pool(url) {
                Ok(pool) => pool,
                Err(e) => {
                    log::error!("Failed to create connection pool: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = run_migrations(&pool) {
                log::error!("Failed to run database migrations: {e}");
                std::process::exit(1);
            }
            Repositories::postgres(pool)
        }
        None => {
            log::warn!("DATABASE_URL not set; keeping all state in memory");
            Repositories::in_memory()
        }
    };

    let state = AppState::new(repos, config.pricing);

    log::info!("Starting server at http://{}:{}", config.host, config.port);

    build_server(state, &config.host, config.port)?.await
}
