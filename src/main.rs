use actix_web::{middleware::Logger, web, App, HttpServer};

use quizfeed_server::{app_state::AppState, config::Config, handlers::quiz_handler};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if std::env::var("QF_PROD").is_ok() {
        config.validate_for_production();
    }

    let state = AppState::new(config.clone())
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    log::info!(
        "starting HTTP server on {}:{}",
        config.web_server_host,
        config.web_server_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Logger::default())
            .service(quiz_handler::list_quizzes)
            .service(quiz_handler::get_quiz)
            .service(quiz_handler::create_quiz)
            .service(quiz_handler::edit_quiz)
            .service(quiz_handler::toggle_publish_quiz)
    })
    .bind((config.web_server_host.as_str(), config.web_server_port))?
    .run()
    .await
}
