//! Unitconv Server
//!
//! Line-delimited JSON-RPC 2.0 over stdio. Logs go to stderr.
//!
//! Methods:
//! - ping: Liveness check
//! - units: List the selectable units with their categories
//! - pairs: List every registered (source, destination) pair
//! - convert: Convert `input` from `source` to `destination`
//!
//! Environment:
//! - UNITCONV_LOG: Log filter (falls back to RUST_LOG, then "info")
//! - UNITCONV_RULES: Optional JSON file of extra affine rules

mod config;
mod handler;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;
use unitconv_units::{build_registry, ConversionRegistry, UnitCatalog};

use crate::config::{ConfigError, ServerConfig};
use crate::handler::{Converter, RpcRequest, RpcResponse, PARSE_ERROR};

const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter for `directive`, or "info" plus the parse error when it is invalid
fn log_filter(directive: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new("info"), Some(e)),
    }
}

fn init_logging(config: &ServerConfig) {
    let (filter, rejected) = log_filter(&config.log_filter);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    if let Some(e) = rejected {
        warn!(directive = %config.log_filter, error = %e, "invalid log filter, using \"info\"");
    }
}

/// Seed registry plus any extra rules from the config
fn create_registry(config: &ServerConfig) -> Result<ConversionRegistry, ConfigError> {
    let mut registry = build_registry();

    if let Some(path) = &config.rules_path {
        let defs = config::load_rules(path)?;
        let added = config::apply_rules(&mut registry, &defs)?;
        info!(path = %path.display(), added, "loaded extra rules");
    }

    Ok(registry)
}

fn write_response<W: Write>(writer: &mut W, response: &RpcResponse) -> io::Result<()> {
    let response_json = serde_json::to_string(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", response_json)?;
    writer.flush()
}

/// Answer requests line by line until EOF.
///
/// Bad lines (invalid UTF-8, malformed JSON) get a parse error response and
/// the loop carries on. Only a read or write failure ends it early.
fn serve<R: BufRead, W: Write>(converter: &Converter, mut reader: R, mut writer: W) -> io::Result<()> {
    info!("server ready, waiting for requests");

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            info!("client disconnected (EOF)");
            return Ok(());
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                warn!(error = %e, "request is not valid UTF-8");
                write_response(&mut writer, &RpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e)))?;
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let request: RpcRequest = match serde_json::from_str(line) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "malformed request");
                write_response(&mut writer, &RpcResponse::error(None, PARSE_ERROR, format!("Parse error: {}", e)))?;
                continue;
            }
        };

        debug!(method = %request.method, "processing");
        let response = converter.handle(&request);

        // Notifications (no id) get no response
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            continue;
        }

        write_response(&mut writer, &response)?;
    }
}

fn main() -> ExitCode {
    let config = ServerConfig::from_env();
    init_logging(&config);

    info!(version = SERVER_VERSION, "unitconv server starting");

    let registry = match create_registry(&config) {
        Ok(r) => r,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };
    info!(rules = registry.len(), "registry ready");

    let converter = Converter::new(registry, UnitCatalog::standard());

    let stdin = io::stdin();
    match serve(&converter, stdin.lock(), io::stdout().lock()) {
        Ok(()) => {
            info!("server shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "i/o failure");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as JsonValue};
    use std::io::Cursor;
    use unitconv_units::labels;

    fn run(input: &[u8]) -> Vec<JsonValue> {
        let converter = Converter::new(build_registry(), UnitCatalog::standard());
        let mut output = Vec::new();
        serve(&converter, Cursor::new(input.to_vec()), &mut output).unwrap();

        String::from_utf8(output).unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_invalid_utf8_does_not_stop_the_loop() {
        let mut input = b"\xff\xfe garbage\n".to_vec();
        input.extend_from_slice(b"{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n");

        let responses = run(&input);
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert_eq!(responses[1]["id"], 1);
        assert_eq!(responses[1]["result"], json!({}));
    }

    #[test]
    fn test_malformed_json_gets_parse_error() {
        let responses = run(b"{not json\n{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"ping\"}\n");
        assert_eq!(responses.len(), 2);
        assert_eq!(responses[0]["error"]["code"], PARSE_ERROR);
        assert!(responses[0].get("id").is_none());
        assert_eq!(responses[1]["id"], 2);
    }

    #[test]
    fn test_notification_gets_no_response() {
        let responses = run(b"{\"jsonrpc\":\"2.0\",\"method\":\"ping\"}\n");
        assert!(responses.is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let responses = run(b"\n   \r\n{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n\n");
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["id"], 3);
    }

    #[test]
    fn test_convert_over_the_wire() {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 4,
            "method": "convert",
            "params": {
                "source": labels::CELSIUS,
                "destination": labels::FAHRENHEIT,
                "input": "100"
            }
        });
        // Last line without a trailing newline is still answered
        let responses = run(request.to_string().as_bytes());
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["result"]["output"], "212");
    }

    #[test]
    fn test_log_filter_fallback() {
        let (_, rejected) = log_filter("unitconv_units=trace,info");
        assert!(rejected.is_none());

        let (_, rejected) = log_filter("unitconv_units=loudest");
        assert!(rejected.is_some());
    }

    #[test]
    fn test_empty_input() {
        assert!(run(b"").is_empty());
    }
}
