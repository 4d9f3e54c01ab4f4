//! Tally Shell
//!
//! Line-delimited JSON-RPC 2.0 over stdio. One request per stdin line, one
//! response per stdout line; notifications get no response. Logs go to
//! stderr.
//!
//! Methods:
//! - initialize, ping
//! - press {key}: press a key by label
//! - keyboard {key}: press the key bound to a keyboard key
//! - state: current calculator snapshot
//! - converters/list
//! - converters/populate {name}
//! - converters/calculate {name, fields}

mod config;

use std::io::{self, BufRead, Write};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tally::Tally;
use tally_core::TallyError;
use tally_plugin::Fields;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use config::ShellConfig;

const SERVER_NAME: &str = "tally";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const PARSE_ERROR: i32 = -32700;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<JsonValue>,
    method: String,
    #[serde(default)]
    params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,
}

impl RpcError {
    fn invalid_params(message: impl Into<String>) -> Self {
        Self { code: INVALID_PARAMS, message: message.into(), data: None }
    }
}

impl From<TallyError> for RpcError {
    fn from(err: TallyError) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: err.to_string(),
            data: serde_json::to_value(&err).ok(),
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn create_tally(config: &ShellConfig) -> Tally {
    let tally = Tally::with_standard_library().with_angle_mode(config.angle_mode);
    match config.today {
        Some(today) => tally.with_today(today),
        None => tally,
    }
}

fn main() {
    init_logging();

    let config = match ShellConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    let mut tally = create_tally(&config);

    info!(version = SERVER_VERSION, angle_mode = %config.angle_mode, "Tally shell started");
    info!(converters = tally.converters().len(), "converter pages loaded");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let response = match serde_json::from_str::<RpcRequest>(line) {
                    Ok(request) => {
                        debug!(method = %request.method, "processing");
                        let response = handle_request(&mut tally, &request);
                        // Notifications (no id) get no response
                        if request.id.is_none() {
                            debug!(method = %request.method, "notification processed");
                            continue;
                        }
                        response
                    }
                    Err(e) => {
                        warn!(error = %e, "unparseable request");
                        error_response(None, RpcError {
                            code: PARSE_ERROR,
                            message: format!("Parse error: {}", e),
                            data: None,
                        })
                    }
                };

                if let Err(e) = write_response(&response) {
                    error!(error = %e, "error writing response");
                    break;
                }
            }
            Err(e) => {
                error!(error = %e, "error reading input");
                break;
            }
        }
    }

    info!("shell shutting down");
}

fn write_response(response: &RpcResponse) -> io::Result<()> {
    let json = serde_json::to_string(response)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()
}

fn error_response(id: Option<JsonValue>, error: RpcError) -> RpcResponse {
    RpcResponse { jsonrpc: "2.0".to_string(), id, result: None, error: Some(error) }
}

fn handle_request(tally: &mut Tally, request: &RpcRequest) -> RpcResponse {
    let params = &request.params;
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(tally),
        "initialized" | "ping" => Ok(json!({})),

        // Calculator
        "press" => handle_press(tally, params),
        "keyboard" => handle_keyboard(tally, params),
        "state" => snapshot(tally),

        // Converter grid
        "converters/list" => handle_converters_list(tally),
        "converters/populate" => handle_populate(tally, params),
        "converters/calculate" => handle_calculate(tally, params),

        _ => Err(RpcError {
            code: METHOD_NOT_FOUND,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => RpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => error_response(request.id.clone(), e),
    }
}

fn string_param<'a>(params: &'a Option<JsonValue>, name: &str) -> Result<&'a str, RpcError> {
    params.as_ref()
        .and_then(|p| p.get(name))
        .and_then(|v| v.as_str())
        .ok_or_else(|| RpcError::invalid_params(format!("Missing '{}' parameter", name)))
}

fn to_json<T: Serialize>(value: &T) -> Result<JsonValue, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError {
        code: -32603,
        message: format!("Internal error: {}", e),
        data: None,
    })
}

fn snapshot(tally: &Tally) -> Result<JsonValue, RpcError> {
    to_json(&tally.snapshot())
}

fn handle_initialize(tally: &Tally) -> Result<JsonValue, RpcError> {
    Ok(json!({
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Scientific calculator and unit converter"
        },
        "capabilities": {
            "calculator": true,
            "converters": tally.converters().len()
        }
    }))
}

fn handle_press(tally: &mut Tally, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let key = string_param(params, "key")?;
    tally.press_label(key)?;
    snapshot(tally)
}

fn handle_keyboard(tally: &mut Tally, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let key = string_param(params, "key")?;
    tally.keyboard(key);
    snapshot(tally)
}

fn handle_converters_list(tally: &Tally) -> Result<JsonValue, RpcError> {
    Ok(json!({ "converters": to_json(&tally.converters())? }))
}

fn handle_populate(tally: &Tally, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let name = string_param(params, "name")?;
    let fields = tally.populate(name)?;
    Ok(json!({ "name": name, "fields": to_json(&fields)? }))
}

fn handle_calculate(tally: &Tally, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
    let name = string_param(params, "name")?;
    let fields: Fields = match params.as_ref().and_then(|p| p.get("fields")) {
        Some(raw) => serde_json::from_value(raw.clone())
            .map_err(|e| RpcError::invalid_params(format!("Invalid 'fields': {}", e)))?,
        None => Fields::new(),
    };
    let text = tally.calculate(name, &fields)?;
    Ok(json!({ "name": name, "text": text }))
}
