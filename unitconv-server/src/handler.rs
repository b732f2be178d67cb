//! JSON-RPC request handling

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};
use unitconv_core::ErrorReport;
use unitconv_units::{convert, ConversionRegistry, UnitCatalog};

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
}

impl RpcResponse {
    pub fn error(id: Option<JsonValue>, code: i32, message: impl Into<String>) -> Self {
        RpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(RpcError { code, message: message.into() }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    source: String,
    destination: String,
    input: String,
}

/// Registry and catalog shared by every request
pub struct Converter {
    registry: ConversionRegistry,
    catalog: UnitCatalog,
}

impl Converter {
    pub fn new(registry: ConversionRegistry, catalog: UnitCatalog) -> Self {
        Self { registry, catalog }
    }

    pub fn handle(&self, request: &RpcRequest) -> RpcResponse {
        let result = match request.method.as_str() {
            "ping" => Ok(json!({})),
            "units" => Ok(self.handle_units()),
            "pairs" => Ok(self.handle_pairs()),
            "convert" => self.handle_convert(&request.params),
            _ => Err(RpcError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", request.method),
            }),
        };

        match result {
            Ok(r) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id.clone(),
                result: Some(r),
                error: None,
            },
            Err(e) => RpcResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id.clone(),
                result: None,
                error: Some(e),
            },
        }
    }

    fn handle_units(&self) -> JsonValue {
        json!({ "units": self.catalog.units() })
    }

    fn handle_pairs(&self) -> JsonValue {
        json!({ "pairs": self.registry.keys() })
    }

    fn handle_convert(&self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let params: ConvertParams = params.clone()
            .ok_or_else(|| "missing params".to_string())
            .and_then(|p| serde_json::from_value(p).map_err(|e| e.to_string()))
            .map_err(|e| RpcError {
                code: INVALID_PARAMS,
                message: format!("Invalid params: {}", e),
            })?;

        // Conversion failures are ordinary results, not protocol errors
        match convert(&self.registry, &params.source, &params.destination, &params.input) {
            Ok(output) => {
                info!(source = %params.source, destination = %params.destination, %output, "conversion");
                Ok(json!({ "output": output }))
            }
            Err(e) => {
                debug!(error = %e, "conversion failed");
                Ok(json!({ "error": ErrorReport::from(&e) }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitconv_units::{build_registry, labels};

    fn converter() -> Converter {
        Converter::new(build_registry(), UnitCatalog::standard())
    }

    fn request(method: &str, params: Option<JsonValue>) -> RpcRequest {
        RpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    fn call(method: &str, params: Option<JsonValue>) -> JsonValue {
        let response = converter().handle(&request(method, params));
        serde_json::to_value(&response).unwrap()
    }

    #[test]
    fn test_ping() {
        let response = call("ping", None);
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"], json!({}));
    }

    #[test]
    fn test_convert_success() {
        let response = call("convert", Some(json!({
            "source": labels::INCHES,
            "destination": labels::CENTIMETERS,
            "input": "10"
        })));
        assert_eq!(response["result"]["output"], "25.4");
        assert!(response.get("error").is_none());
    }

    #[test]
    fn test_convert_unsupported_is_a_result() {
        let response = call("convert", Some(json!({
            "source": labels::INCHES,
            "destination": labels::KILOGRAMS,
            "input": "5"
        })));
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["error"]["code"], "UNSUPPORTED_CONVERSION");
    }

    #[test]
    fn test_convert_parse_error_is_a_result() {
        let response = call("convert", Some(json!({
            "source": labels::CELSIUS,
            "destination": labels::FAHRENHEIT,
            "input": "abc"
        })));
        assert_eq!(response["result"]["error"]["code"], "PARSE_ERROR");
        assert!(response["result"]["error"]["message"].as_str().unwrap().contains("abc"));
    }

    #[test]
    fn test_convert_invalid_params() {
        let response = call("convert", Some(json!({ "source": labels::INCHES })));
        assert_eq!(response["error"]["code"], INVALID_PARAMS);

        let response = call("convert", None);
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[test]
    fn test_units() {
        let response = call("units", None);
        let units = response["result"]["units"].as_array().unwrap();
        assert_eq!(units.len(), 6);
        assert_eq!(units[0], json!({ "label": labels::INCHES, "category": "length" }));
    }

    #[test]
    fn test_pairs() {
        let response = call("pairs", None);
        let pairs = response["result"]["pairs"].as_array().unwrap();
        assert_eq!(pairs.len(), 6);
        assert!(pairs.contains(&json!({ "source": labels::POUNDS, "destination": labels::KILOGRAMS })));
    }

    #[test]
    fn test_unknown_method() {
        let response = call("tools/list", None);
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
        assert!(response.get("result").is_none());
    }
}
