//! Route table for the HTTP adapter.
//!
//! Handlers read `web::Data<HttpState>` and `web::Data<HealthState>` from app
//! data; callers register both before calling [`configure`].

use actix_web::web;

use super::health::{live, ready};
use super::predict::predict;
use super::quizzes::{collection_documents, list_questions, list_quizzes, quiz_questions};
use super::webhooks::receive_webhook;

/// Register every endpoint on `cfg`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use medquiz::inbound::http::router::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    // The catch-all collection route must stay last in the scope.
    let api = web::scope("/api")
        .service(list_questions)
        .service(list_quizzes)
        .service(quiz_questions)
        .service(receive_webhook)
        .service(collection_documents);

    cfg.service(ready).service(live).service(predict).service(api);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WebhookOutcome;
    use crate::inbound::http::health::HealthState;
    use crate::inbound::http::test_utils::{
        RecordingQuizQuery, RecordingWebhookIngest, StateBuilder,
    };
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[case::questions("/api/questions", "questions")]
    #[case::quizzes("/api/quizzes", "quizzes")]
    #[case::quiz("/api/quizzes/quiz-renal", "quiz_questions:quiz-renal")]
    #[case::catch_all("/api/quiz-renal", "collection_documents:quiz-renal")]
    #[actix_web::test]
    async fn named_routes_win_over_catch_all(#[case] uri: &str, #[case] expected: &str) {
        let quizzes = RecordingQuizQuery::returning(Ok(Vec::new()));
        let state = StateBuilder::default().quizzes(quizzes.clone()).build();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::Data::new(HealthState::new()))
                .configure(configure),
        )
        .await;

        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
            .await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(quizzes.calls(), vec![expected.to_owned()]);
    }

    #[rstest]
    #[actix_web::test]
    async fn webhook_post_reaches_ingest() {
        let quizzes = RecordingQuizQuery::returning(Ok(Vec::new()));
        let webhooks = RecordingWebhookIngest::returning(Ok(WebhookOutcome::Ignored {
            kind: "session.created".to_owned(),
        }));
        let state = StateBuilder::default()
            .quizzes(quizzes.clone())
            .webhooks(webhooks.clone())
            .build();
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .app_data(web::Data::new(HealthState::new()))
                .configure(configure),
        )
        .await;

        let req = actix_test::TestRequest::post()
            .uri("/api/webhooks")
            .set_payload("{}")
            .to_request();
        let res = actix_test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(webhooks.deliveries().len(), 1);
        assert!(quizzes.calls().is_empty());
    }

    #[rstest]
    #[actix_web::test]
    async fn health_probes_are_mounted_at_root() {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(StateBuilder::default().build()))
                .app_data(web::Data::new(HealthState::new()))
                .configure(configure),
        )
        .await;

        let live_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/live").to_request(),
        )
        .await;
        let ready_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;

        assert_eq!(live_res.status(), StatusCode::OK);
        assert_eq!(ready_res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
