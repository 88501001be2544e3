use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use impressions_backend::config::{DATABASE_PATH, HOST, PORT};
use impressions_backend::db::Database;
use impressions_backend::services;
use log::info;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let database = Database::new(DATABASE_PATH);
    database.init().map_err(std::io::Error::other)?;

    info!("Server running at http://{}:{}", HOST, PORT);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(web::Data::new(database.clone()))
            .service(services::uploads::configure_routes())
    })
        .bind((HOST, PORT))?
        .run()
        .await
}
