pub mod config;
pub mod error;
pub mod routes;

use crate::config::Config;
use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::net::TcpListener;
use std::sync::Arc;
use stockgift::data::{Client as DataClient, Interface as DataInterface};
use stockgift::valuation::Service;

pub fn run(listener: TcpListener, config: Config) -> Result<Server> {
    let data_client = DataClient::new(config.api_key, &config.base_url, config.timeout)
        .context("Failed to create market data client")?;

    let data_client: Arc<dyn DataInterface> = Arc::new(data_client);

    let service = web::Data::new(Service::new(data_client));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(service.clone())
            .service(routes::index::handler)
            .service(routes::health::handler)
            .service(routes::valuation::handler)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
