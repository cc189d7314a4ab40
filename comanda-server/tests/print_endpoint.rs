//! End-to-end tests for the print endpoint, driven in-process through the
//! router with a recording printer in place of the USB device.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use comanda_printer::{PrintError, PrintResult, PrintSession, PrinterDevice};
use comanda_server::api::build_app;
use comanda_server::{Config, ServerState};
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Open,
    Write(Vec<u8>),
    Close,
}

#[derive(Clone, Default)]
struct RecordingPrinter {
    calls: Arc<Mutex<Vec<Call>>>,
    offline: bool,
}

struct RecordingSession {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl PrinterDevice for RecordingPrinter {
    type Session = RecordingSession;

    fn open(&self) -> PrintResult<RecordingSession> {
        if self.offline {
            return Err(PrintError::NotFound {
                vendor_id: 0x28E9,
                product_id: 0x0289,
            });
        }
        self.calls.lock().unwrap().push(Call::Open);
        Ok(RecordingSession {
            calls: self.calls.clone(),
        })
    }

    fn is_online(&self) -> bool {
        !self.offline
    }

    fn describe(&self) -> String {
        "28e9:0289".to_string()
    }
}

impl PrintSession for RecordingSession {
    fn write(&mut self, data: &[u8]) -> PrintResult<()> {
        self.calls.lock().unwrap().push(Call::Write(data.to_vec()));
        Ok(())
    }

    fn close(self) -> PrintResult<()> {
        self.calls.lock().unwrap().push(Call::Close);
        Ok(())
    }
}

fn app(printer: RecordingPrinter) -> axum::Router {
    build_app(ServerState::with_device(&Config::default(), printer))
}

async fn post(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/imprimir_comanda")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn text(data: &[u8]) -> String {
    String::from_utf8_lossy(data).into_owned()
}

#[tokio::test]
async fn test_prints_sample_order() {
    let printer = RecordingPrinter::default();
    let calls = printer.calls.clone();

    let body = json!({
        "numero_pedido": 42,
        "productos_detalle": [{"cantidad_producto": 2, "nombre_producto": "Empanada"}],
        "para_hora": "13:30"
    });
    let (status, json) = post(app(printer), body.to_string()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["code"], "E0000");
    assert_eq!(json["message"], "Comanda impresa exitosamente");
    assert_eq!(json["data"]["order_number"], "42");
    assert_eq!(json["data"]["items"], 1);

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 6, "open, 4 blocks, close: {:?}", calls);
    assert_eq!(calls[0], Call::Open);

    let Call::Write(headline) = &calls[1] else {
        panic!("expected headline write");
    };
    assert!(text(headline).contains("42"));

    let Call::Write(items) = &calls[2] else {
        panic!("expected items write");
    };
    assert!(text(items).contains("2 Empanada\n"));

    let Call::Write(time) = &calls[3] else {
        panic!("expected pickup time write");
    };
    assert!(text(time).contains("13:30"));

    let Call::Write(cut) = &calls[4] else {
        panic!("expected cut write");
    };
    assert_eq!(&cut[..2], &[0x1D, 0x56]);

    assert_eq!(calls[5], Call::Close);
}

#[tokio::test]
async fn test_items_printed_in_order() {
    let printer = RecordingPrinter::default();
    let calls = printer.calls.clone();

    let body = json!({
        "numero_pedido": "B-3",
        "productos_detalle": [
            {"cantidad_producto": "3", "nombre_producto": "Empanada de carne"},
            {"cantidad_producto": 1, "nombre_producto": "Milanesa"},
            {"cantidad_producto": 2.0, "nombre_producto": "Flan"}
        ],
        "para_hora": "21:45",
        "cliente": "Juan"
    });
    let (status, _) = post(app(printer), body.to_string()).await;
    assert_eq!(status, StatusCode::OK);

    let calls = calls.lock().unwrap();
    let Call::Write(items) = &calls[2] else {
        panic!("expected items write");
    };
    assert!(text(items).ends_with("3 Empanada de carne\n1 Milanesa\n2 Flan\n\n"));

    // customer is not printed by default
    let all: String = calls
        .iter()
        .filter_map(|c| match c {
            Call::Write(d) => Some(text(d)),
            _ => None,
        })
        .collect();
    assert!(!all.contains("Juan"));
}

#[tokio::test]
async fn test_empty_object_is_bad_request() {
    let printer = RecordingPrinter::default();
    let calls = printer.calls.clone();

    let (status, json) = post(app(printer), "{}").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "E0001");
    assert_eq!(json["message"], "No se recibieron datos para imprimir.");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_body_is_bad_request() {
    let printer = RecordingPrinter::default();
    let calls = printer.calls.clone();

    let (status, json) = post(app(printer), Body::empty()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "E0001");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_field_is_bad_request() {
    let printer = RecordingPrinter::default();
    let calls = printer.calls.clone();

    let body = json!({"numero_pedido": 5, "productos_detalle": []});
    let (status, json) = post(app(printer), body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "E0002");
    assert!(json["message"].as_str().unwrap().contains("para_hora"));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_numeric_quantity_is_server_error() {
    let printer = RecordingPrinter::default();
    let calls = printer.calls.clone();

    let body = json!({
        "numero_pedido": 9,
        "productos_detalle": [{"cantidad_producto": "dos", "nombre_producto": "Empanada"}],
        "para_hora": "12:00"
    });
    let (status, json) = post(app(printer), body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "E9003");
    assert!(json["message"].as_str().unwrap().contains("dos"));
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_printer_offline_is_server_error() {
    let printer = RecordingPrinter {
        offline: true,
        ..Default::default()
    };
    let calls = printer.calls.clone();

    let body = json!({
        "numero_pedido": 42,
        "productos_detalle": [{"cantidad_producto": 2, "nombre_producto": "Empanada"}],
        "para_hora": "13:30"
    });
    let (status, json) = post(app(printer), body.to_string()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "E9101");
    assert_eq!(
        json["message"],
        "Error al imprimir comanda: USB printer 28e9:0289 not found"
    );
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_request_id_header() {
    let request = Request::builder()
        .method("POST")
        .uri("/imprimir_comanda")
        .header("x-request-id", "pos-1234")
        .body(Body::from("{}"))
        .unwrap();

    let response = app(RecordingPrinter::default())
        .oneshot(request)
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "pos-1234");

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(RecordingPrinter::default())
        .oneshot(request)
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_health_reports_printer() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app(RecordingPrinter {
        offline: true,
        ..Default::default()
    })
    .oneshot(request)
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["printer"], "28e9:0289");
    assert_eq!(json["printer_online"], false);
}
