use anyhow::{Context, Result};
use backend::{api, config::Config, db::Db, service::WeatherService, utils};

#[actix_web::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    log::debug!("{:?}", config);

    let db = Db::connect(&config.database_url)
        .with_context(|| format!("cannot open database {}", config.database_url))?;
    let service = WeatherService::new(db, utils::ms_since_epoch())?.into_shared();

    api::new_http_server(service, &config).await?;
    Ok(())
}
