use crate::application::{LedgerProcessor, ProcessedLedger};
use crate::domain::error::{AppError, Result};
use crate::domain::ledger::{CleanTable, EXPORT_HEADERS};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::export::{to_csv_bytes, EXPORT_FILE_NAME, EXPORT_MIME};
use actix_cors::Cors;
use actix_web::http::header::ContentDisposition;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::{error, warn};
use uuid::Uuid;
use validator::Validate;

const INDEX_HTML: &str = include_str!("index.html");

const MAX_LOG_ENTRIES: usize = 100;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub processor: LedgerProcessor,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UploadQuery {
    #[validate(length(min = 1, max = 255, message = "A file name is required."))]
    pub filename: String,
}

#[derive(Debug, Serialize)]
pub struct ProcessResponse {
    pub file_name: String,
    pub columns: [&'static str; 5],
    pub rows: CleanTable,
    pub row_count: usize,
    pub dropped_rows: usize,
    pub processing_time_ms: u64,
}

impl From<ProcessedLedger> for ProcessResponse {
    fn from(processed: ProcessedLedger) -> Self {
        Self {
            file_name: processed.file_name,
            columns: EXPORT_HEADERS,
            row_count: processed.table.len(),
            rows: processed.table,
            dropped_rows: processed.dropped_rows,
            processing_time_ms: processed.processing_time_ms,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/process")]
async fn process(
    data: web::Data<HttpState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    let request_id = Uuid::new_v4();

    match run_processor(&data, &query, body, request_id).await {
        Ok(processed) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!(
                    "[{}] Processed {}: {} rows kept, {} dropped",
                    request_id,
                    processed.file_name,
                    processed.table.len(),
                    processed.dropped_rows
                ),
            );
            HttpResponse::Ok().json(ProcessResponse::from(processed))
        }
        Err(e) => error_response(&data.logs, request_id, &e),
    }
}

#[post("/export")]
async fn export(
    data: web::Data<HttpState>,
    query: web::Query<UploadQuery>,
    body: web::Bytes,
) -> impl Responder {
    let request_id = Uuid::new_v4();

    let csv = match run_processor(&data, &query, body, request_id).await {
        Ok(processed) => to_csv_bytes(&processed.table),
        Err(e) => Err(e),
    };

    match csv {
        Ok(bytes) => {
            add_log(
                &data.logs,
                "INFO",
                "HttpApi",
                &format!(
                    "[{}] Exported {} as {} ({} bytes)",
                    request_id,
                    query.filename,
                    EXPORT_FILE_NAME,
                    bytes.len()
                ),
            );
            HttpResponse::Ok()
                .content_type(EXPORT_MIME)
                .insert_header(ContentDisposition::attachment(EXPORT_FILE_NAME))
                .body(bytes)
        }
        Err(e) => error_response(&data.logs, request_id, &e),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    HttpResponse::Ok().json(&*logs)
}

async fn run_processor(
    data: &HttpState,
    query: &UploadQuery,
    body: web::Bytes,
    request_id: Uuid,
) -> Result<ProcessedLedger> {
    query
        .validate()
        .map_err(|_| AppError::ValidationError("A file name is required.".to_string()))?;

    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        &format!(
            "[{}] Received {} ({} bytes)",
            request_id,
            query.filename,
            body.len()
        ),
    );

    // Parsing is CPU-bound, keep it off the worker threads
    let processor = data.processor.clone();
    let file_name = query.filename.clone();
    web::block(move || processor.process(&file_name, &body))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}

fn error_response(logs: &Mutex<Vec<LogEntry>>, request_id: Uuid, err: &AppError) -> HttpResponse {
    let body = ErrorBody {
        error: err.user_message(),
    };

    if err.is_user_error() {
        warn!(%request_id, error = %err, "Upload rejected");
        add_log(logs, "WARN", "HttpApi", &format!("[{}] {}", request_id, err));
        HttpResponse::BadRequest().json(body)
    } else {
        error!(%request_id, error = %err, "Upload failed");
        add_log(logs, "ERROR", "HttpApi", &format!("[{}] {}", request_id, err));
        HttpResponse::InternalServerError().json(body)
    }
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    logs.push(entry.clone());
    if logs.len() > MAX_LOG_ENTRIES {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

/// Routes shared by the server and the handler tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index).service(
        web::scope("/api")
            .service(process)
            .service(export)
            .service(get_logs),
    );
}

pub fn start_server(
    config: &AppConfig,
    processor: LedgerProcessor,
    logs: Arc<Mutex<Vec<LogEntry>>>,
) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState { processor, logs });
    let upload_limit = config.server.max_upload_bytes;

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .app_data(web::PayloadConfig::new(upload_limit))
            .configure(configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run();

    Ok(server)
}
