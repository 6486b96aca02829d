use actix_cors::Cors;
use actix_web::{
    get,
    middleware::Logger,
    post,
    web::{self, Data},
    App, HttpResponse, HttpServer, Responder,
};
use common::req::{IngestResponse, NewReading};

use crate::config::Config;
use crate::error::ApiError;
use crate::service::{SharedService, WeatherService};
use crate::utils::ms_since_epoch;

/// Runs `f` on the blocking pool with the service locked.
async fn with_service<F, T>(service: &Data<SharedService>, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&mut WeatherService) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let service = SharedService::clone(service);
    web::block(move || {
        let mut service = service.lock().map_err(|_| ApiError::Poisoned)?;
        f(&mut *service).map_err(ApiError::from)
    })
    .await?
}

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("weather backend")
}

#[post("/api/weather")]
async fn api_ingest(
    reading: web::Json<NewReading>,
    service: Data<SharedService>,
) -> Result<impl Responder, ApiError> {
    let reading = reading.into_inner();
    with_service(&service, move |svc| {
        svc.ingest(&reading, ms_since_epoch())
    })
    .await?;
    Ok(web::Json(IngestResponse::ok()))
}

#[get("/api/weather")]
async fn api_current(service: Data<SharedService>) -> Result<impl Responder, ApiError> {
    let res = with_service(&service, |svc| svc.current()).await?;
    Ok(web::Json(res))
}

#[get("/api/weather/minmax")]
async fn api_history(service: Data<SharedService>) -> Result<impl Responder, ApiError> {
    let res = with_service(&service, |svc| svc.history(ms_since_epoch())).await?;
    Ok(web::Json(res))
}

#[get("/api/weather/summary")]
async fn api_summary(service: Data<SharedService>) -> Result<impl Responder, ApiError> {
    let res = with_service(&service, |svc| svc.summary(ms_since_epoch())).await?;
    Ok(web::Json(res))
}

#[get("/api/weather/info")]
async fn api_info(service: Data<SharedService>) -> Result<impl Responder, ApiError> {
    let res = with_service(&service, |svc| svc.info()).await?;
    Ok(web::Json(res))
}

/// Registers every route. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // readings are parsed as JSON whatever the declared content type
    cfg.app_data(web::JsonConfig::default().content_type_required(false))
        .service(hello)
        .service(api_ingest)
        .service(api_current)
        .service(api_history)
        .service(api_summary)
        .service(api_info);
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}

pub async fn new_http_server(service: SharedService, config: &Config) -> std::io::Result<()> {
    log::info!(
        "API listening on http://{}:{}",
        config.bind_address,
        config.port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(Data::new(service.clone()))
            .configure(configure)
            .wrap(cors())
            .wrap(Logger::default())
    })
    .bind((config.bind_address.as_str(), config.port))?
    .run()
    .await
}
