use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_derive::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::errors::{Error, Result};
use crate::{import, write_objects, CancellationToken, ImportConfig, OutputFormat, VERSION};

/// Query parameters for `/api/import`; anything omitted takes its default.
#[derive(Debug, Default, Deserialize)]
struct RequestConfig {
    #[serde(default)]
    format: OutputFormat,
    border: Option<f64>,
    max_objects: Option<usize>,
    max_points: Option<usize>,
    batch_size: Option<usize>,
    seed: Option<u64>,
    #[serde(default)]
    placeholder: bool,
}

impl From<&RequestConfig> for ImportConfig {
    fn from(config: &RequestConfig) -> Self {
        let defaults = ImportConfig::default();
        ImportConfig {
            max_objects: config.max_objects.unwrap_or(defaults.max_objects),
            max_points_per_object: config.max_points.unwrap_or(defaults.max_points_per_object),
            batch_size: config.batch_size.unwrap_or(defaults.batch_size),
            seed: config.seed.unwrap_or(defaults.seed),
            placeholder_on_insufficient: config.placeholder,
            ..defaults
        }
    }
}

fn content_type(format: OutputFormat) -> &'static str {
    match format {
        OutputFormat::Json => "application/json",
        OutputFormat::Svg => "image/svg+xml",
        OutputFormat::Path => "text/plain",
    }
}

fn error_response(err: &Error) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}

async fn convert(config: &RequestConfig, input: String) -> Result<Vec<u8>> {
    let import_config = ImportConfig::from(config);
    let report = import(
        input.into(),
        &import_config,
        &CancellationToken::new(),
        &mut (),
    )
    .await?;
    for warning in &report.warnings {
        warn!("{warning}");
    }
    let mut output = Vec::new();
    write_objects(
        &report.objects,
        config.format,
        config.border.unwrap_or(5.),
        &mut output,
    )?;
    Ok(output)
}

async fn import_handler(Query(config): Query<RequestConfig>, input: String) -> Response {
    match convert(&config, input).await {
        Ok(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type(config.format))],
            output,
        )
            .into_response(),
        Err(err) => {
            warn!("import failed: {err}");
            error_response(&err)
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": VERSION }))
}

fn router() -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/import", post(import_handler))
}

pub async fn start_server(listen_addr: Option<&str>) -> Result<()> {
    let addr = listen_addr.unwrap_or("127.0.0.1:3003");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on: http://{addr}");
    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        String::from_utf8(bytes.to_vec()).expect("utf8")
    }

    #[tokio::test]
    async fn test_import_svg_output() {
        let config = RequestConfig {
            format: OutputFormat::Svg,
            border: Some(0.),
            ..Default::default()
        };
        let response = import_handler(Query(config), "M 0 0 L 10 10".to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "image/svg+xml"
        );
        let body = body_text(response).await;
        assert!(body.contains("viewBox=\"0 0 10 10\""));
    }

    #[tokio::test]
    async fn test_import_error_is_json() {
        let response = import_handler(Query(RequestConfig::default()), "???".to_string()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value =
            serde_json::from_str(&body_text(response).await).expect("json error body");
        assert!(body["error"]
            .as_str()
            .expect("error message")
            .starts_with("Unrecognized format"));
    }

    #[tokio::test]
    async fn test_start_server_bad_address() {
        assert!(start_server(Some("not an address")).await.is_err());
    }

    #[test]
    fn test_request_config_defaults() {
        let config = RequestConfig {
            max_objects: Some(2),
            ..Default::default()
        };
        let import: ImportConfig = (&config).into();
        assert_eq!(import.max_objects, 2);
        assert_eq!(import.batch_size, ImportConfig::default().batch_size);
    }
}
