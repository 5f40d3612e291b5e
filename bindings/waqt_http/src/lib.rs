//! Thin HTTP transport over [`waqt_core::PrayerService`].

pub mod config;
pub mod error;
pub mod handlers;

use actix_web::{error::JsonPayloadError, web, HttpRequest};
use tracing_subscriber::EnvFilter;

pub use config::ServerConfig;
pub use error::ApiError;

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::BadRequest(format!("invalid JSON body: {}", err)).into()
}

/// Registers every route. The app must carry `web::Data<PrayerService>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .route("/wtimes", web::post().to(handlers::wtimes))
        .route("/wtimes/next", web::post().to(handlers::wtimes_next))
        .route("/locations/cities", web::get().to(handlers::cities));
}

/// Installs the `fmt` subscriber, honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::fs;
    use waqt_core::{PrayerService, ServiceConfig};

    const MAKKAH: &str = r#"{
        "06-15": ["04:30", "05:55", "12:22", "15:40", "18:50", "20:20"]
    }"#;

    fn dataset() -> tempfile::TempDir {
        let root = tempfile::tempdir().unwrap();
        let sa = root.path().join("SA");
        fs::create_dir_all(&sa).unwrap();
        fs::write(sa.join("wtimes-sa.makkah.js"), MAKKAH).unwrap();
        fs::write(sa.join("SA.js"), "var SA = [\n\"SA.MAKKAH.---\",\n\"SA.JEDDAH.WEST\"\n];").unwrap();
        root
    }

    fn service(root: &tempfile::TempDir) -> web::Data<PrayerService> {
        web::Data::new(PrayerService::new(
            &ServiceConfig::new().with_data_dir(root.path()).without_remote(),
        ))
    }

    #[actix_web::test]
    async fn test_post_wtimes_applies_offsets() {
        let root = dataset();
        let app = test::init_service(App::new().app_data(service(&root)).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/wtimes")
            .set_json(json!({"countryCode": "SA", "date": "2024-06-15", "offsets": {"fajr": 10}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["date"], "2024-06-15");
        assert_eq!(body["fajr"], "04:40");
        assert_eq!(body["sunrise"], "05:55");
        assert_eq!(body["dhuhr"], "12:22");
        assert_eq!(body["asr"], "15:40");
        assert_eq!(body["maghrib"], "18:50");
        assert_eq!(body["isha"], "20:20");
        assert_eq!(body["source"], "dataset");
    }

    #[actix_web::test]
    async fn test_post_wtimes_error_codes() {
        let root = dataset();
        let app = test::init_service(App::new().app_data(service(&root)).configure(configure)).await;

        for (payload, status) in [
            (json!({"date": "2024-06-15"}), StatusCode::BAD_REQUEST),
            (json!({"countryCode": "SAU"}), StatusCode::BAD_REQUEST),
            (json!({"countryCode": "QA", "date": "2024-06-15"}), StatusCode::NOT_FOUND),
            (json!({"countryCode": "SA", "date": "2024-01-01"}), StatusCode::NOT_FOUND),
        ] {
            let req = test::TestRequest::post().uri("/wtimes").set_json(payload).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), status);
            let body: Value = test::read_body_json(resp).await;
            assert!(body["error"].is_string());
        }

        let req = test::TestRequest::post()
            .uri("/wtimes")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_post_wtimes_next() {
        let root = dataset();
        let app = test::init_service(App::new().app_data(service(&root)).configure(configure)).await;
        let req = test::TestRequest::post()
            .uri("/wtimes/next")
            .set_json(json!({"countryCode": "SA", "date": "2024-06-15", "now": "21:00"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["next"]["name"], "Fajr");
        assert_eq!(body["next"]["timeUntilMinutes"], 450);
        assert_eq!(body["countdown"], "07:30");
        assert_eq!(body["isha"], "20:20");
    }

    #[actix_web::test]
    async fn test_get_cities() {
        let root = dataset();
        let app = test::init_service(App::new().app_data(service(&root)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/locations/cities?cc=sa").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["cc"], "SA");
        assert_eq!(body["cities"][0], json!({"code": "SA.MAKKAH", "city": "MAKKAH"}));
        assert_eq!(body["cities"][1]["extra"], "WEST");

        for (uri, status) in [
            ("/locations/cities", StatusCode::BAD_REQUEST),
            ("/locations/cities?cc=S", StatusCode::BAD_REQUEST),
            ("/locations/cities?cc=EG", StatusCode::NOT_FOUND),
        ] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), status, "{}", uri);
        }
    }
}
