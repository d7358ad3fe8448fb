//! Application wiring for integration tests.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use medquiz::Trace;
use medquiz::inbound::http::health::HealthState;
use medquiz::inbound::http::router::configure;
use medquiz::inbound::http::state::HttpState;

/// The production route table over `state`, without CORS.
pub fn build_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(HealthState::new()))
        .wrap(Trace)
        .configure(configure)
}
