use giftvaluation::config::Config;
use giftvaluation::run;
use log::info;
use std::net::TcpListener;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env()?;

    let listener = TcpListener::bind(("0.0.0.0", config.server_port))?;

    info!("Listening on {}", listener.local_addr()?);

    run(listener, config)?.await?;

    Ok(())
}
