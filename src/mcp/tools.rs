//! Tool definitions and dispatch for the interaction checker.
//!
//! Each tool maps to an `RxCheck` operation. Tool definitions include JSON
//! Schema descriptions so that clients can discover available capabilities.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{Result, RxCheckError};
use crate::report::{
    format_drug_list, format_side_effects_as_json, format_side_effects_as_markdown,
    format_verdict_as_json, format_verdict_as_markdown, format_verdicts_as_json,
    format_verdicts_as_markdown,
};
use crate::service::RxCheck;
use crate::types::{Category, MedicalCondition, OutputFormat, PatientProfile, Sex};

/// A tool definition exposed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema describing the tool's input parameters.
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Returns the list of all tool definitions exposed by this server.
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "rxcheck_check".to_string(),
            description: "Check two or more drugs for interactions. Returns severity, confidence, mechanism, affected systems, monitoring and a recommendation for every pair.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "drugs": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Drug names, matched exactly (at least two distinct names)"
                    },
                    "format": {
                        "type": "string",
                        "enum": ["markdown", "json"],
                        "description": "Output format (default: from config)"
                    }
                },
                "required": ["drugs"]
            }),
        },
        ToolDefinition {
            name: "rxcheck_classify".to_string(),
            description: "Classify a single drug into its therapeutic category and report how the category was determined.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "drug": {
                        "type": "string",
                        "description": "Drug name, matched exactly"
                    }
                },
                "required": ["drug"]
            }),
        },
        ToolDefinition {
            name: "rxcheck_drugs".to_string(),
            description: "List known drug names, optionally filtered by category or by a case-insensitive search term.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "description": "Category label such as 'cardiovascular' or 'painkillers'"
                    },
                    "search": {
                        "type": "string",
                        "description": "Substring to match against drug names"
                    }
                }
            }),
        },
        ToolDefinition {
            name: "rxcheck_side_effects".to_string(),
            description: "Predict side effects for a set of drugs, tiered by the patient's age, weight and medical conditions.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "drugs": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Drug names, matched exactly"
                    },
                    "age": { "type": "integer", "minimum": 0, "description": "Age in whole years" },
                    "weight_kg": { "type": "number", "description": "Body weight in kilograms" },
                    "height_cm": { "type": "number", "description": "Height in centimetres" },
                    "sex": { "type": "string", "enum": ["male", "female", "other"] },
                    "conditions": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": ["diabetes", "hypertension", "heart_disease", "kidney_disease", "liver_disease"]
                        }
                    },
                    "format": {
                        "type": "string",
                        "enum": ["markdown", "json"]
                    }
                },
                "required": ["drugs", "age"]
            }),
        },
        ToolDefinition {
            name: "rxcheck_status".to_string(),
            description: "Return statistics about the loaded reference tables and the server.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Dispatches a tool call to the appropriate handler.
///
/// `server_stats` is merged into the `rxcheck_status` output when present.
pub fn handle_tool_call(
    rx: &RxCheck,
    tool_name: &str,
    args: Value,
    server_stats: Option<Value>,
) -> Result<Value> {
    match tool_name {
        "rxcheck_check" => handle_check(rx, args),
        "rxcheck_classify" => handle_classify(rx, args),
        "rxcheck_drugs" => handle_drugs(rx, args),
        "rxcheck_side_effects" => handle_side_effects(rx, args),
        "rxcheck_status" => handle_status(rx, server_stats),
        _ => Err(RxCheckError::InvalidInput {
            message: format!("unknown tool: {}", tool_name),
        }),
    }
}

/// Truncates a string to `max_chars`, appending a truncation notice if
/// necessary.
fn truncate_response(s: &str, max_chars: usize) -> String {
    if s.len() <= max_chars {
        s.to_string()
    } else {
        let mut end = max_chars;
        while !s.is_char_boundary(end) && end > 0 {
            end -= 1;
        }
        format!("{}\n\n[... truncated at {} chars]", &s[..end], end)
    }
}

fn text_result(rx: &RxCheck, output: &str) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": truncate_response(output, rx.config().max_response_chars)
        }]
    })
}

fn required_str<'v>(args: &'v Value, key: &str) -> Result<&'v str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| RxCheckError::InvalidInput {
            message: format!("missing required parameter: {}", key),
        })
}

fn string_list<'v>(args: &'v Value, key: &str) -> Result<Vec<&'v str>> {
    let items = args
        .get(key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| RxCheckError::InvalidInput {
            message: format!("missing required parameter: {}", key),
        })?;

    items
        .iter()
        .map(|item| {
            item.as_str().ok_or_else(|| RxCheckError::InvalidInput {
                message: format!("'{}' must contain only strings", key),
            })
        })
        .collect()
}

fn output_format(rx: &RxCheck, args: &Value) -> Result<OutputFormat> {
    match args.get("format").and_then(|v| v.as_str()) {
        None => Ok(rx.config().output_format),
        Some(s) => OutputFormat::from_str(s).ok_or_else(|| RxCheckError::InvalidInput {
            message: format!("unknown format: {}", s),
        }),
    }
}

/// Handles `rxcheck_check` tool calls.
fn handle_check(rx: &RxCheck, args: Value) -> Result<Value> {
    let drugs = string_list(&args, "drugs")?;
    let format = output_format(rx, &args)?;

    let output = if drugs.len() == 2 {
        let verdict = rx.resolve(drugs[0], drugs[1])?;
        match format {
            OutputFormat::Markdown => format_verdict_as_markdown(&verdict),
            OutputFormat::Json => format_verdict_as_json(&verdict),
        }
    } else {
        let verdicts = rx.resolve_all(&drugs)?;
        match format {
            OutputFormat::Markdown => format_verdicts_as_markdown(&verdicts),
            OutputFormat::Json => format_verdicts_as_json(&verdicts),
        }
    };

    Ok(text_result(rx, &output))
}

/// Handles `rxcheck_classify` tool calls.
fn handle_classify(rx: &RxCheck, args: Value) -> Result<Value> {
    let drug = required_str(&args, "drug")?;
    let classification = rx.classify(drug)?;
    let output = serde_json::to_string_pretty(&classification).unwrap_or_default();
    Ok(text_result(rx, &output))
}

/// Handles `rxcheck_drugs` tool calls.
fn handle_drugs(rx: &RxCheck, args: Value) -> Result<Value> {
    let mut names = match args.get("category").and_then(|v| v.as_str()) {
        Some(label) => {
            let category =
                Category::from_str(label).ok_or_else(|| RxCheckError::InvalidInput {
                    message: format!("unknown category: {}", label),
                })?;
            rx.drugs_in(category)?
        }
        None => rx.drug_names()?,
    };

    if let Some(term) = args.get("search").and_then(|v| v.as_str()) {
        let matches = rx.search(term)?;
        names.retain(|name| matches.contains(name));
    }

    Ok(text_result(rx, &format_drug_list(&names)))
}

/// Handles `rxcheck_side_effects` tool calls.
fn handle_side_effects(rx: &RxCheck, args: Value) -> Result<Value> {
    let drugs = string_list(&args, "drugs")?;
    let format = output_format(rx, &args)?;

    let age = match args.get("age") {
        None | Some(Value::Null) => {
            return Err(RxCheckError::InvalidInput {
                message: "missing required parameter: age".to_string(),
            })
        }
        Some(value) => value
            .as_u64()
            .and_then(|age| u32::try_from(age).ok())
            .ok_or_else(|| RxCheckError::InvalidInput {
                message: format!("age must be a non-negative integer, got {}", value),
            })?,
    };

    let sex = match args.get("sex").and_then(|v| v.as_str()) {
        Some(s) => Sex::from_str(s).ok_or_else(|| RxCheckError::InvalidInput {
            message: format!("unknown sex: {}", s),
        })?,
        None => Sex::default(),
    };

    let conditions = match args.get("conditions") {
        Some(_) => string_list(&args, "conditions")?
            .into_iter()
            .map(|c| {
                MedicalCondition::from_str(c).ok_or_else(|| RxCheckError::InvalidInput {
                    message: format!("unknown condition: {}", c),
                })
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    let profile = PatientProfile {
        age,
        sex,
        weight_kg: args.get("weight_kg").and_then(|v| v.as_f64()),
        height_cm: args.get("height_cm").and_then(|v| v.as_f64()),
        conditions,
    };

    let effects = rx.predict_side_effects(&drugs, &profile)?;
    let output = match format {
        OutputFormat::Markdown => format_side_effects_as_markdown(&effects),
        OutputFormat::Json => format_side_effects_as_json(&effects),
    };

    Ok(text_result(rx, &output))
}

/// Handles `rxcheck_status` tool calls.
fn handle_status(rx: &RxCheck, server_stats: Option<Value>) -> Result<Value> {
    let stats = rx.stats()?;
    let mut status = json!({
        "knowledge": stats,
        "strict_classification": rx.config().strict_classification,
    });
    if let Some(server) = server_stats {
        status["server"] = server;
    }
    let output = serde_json::to_string_pretty(&status).unwrap_or_default();
    Ok(text_result(rx, &output))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definitions_complete() {
        let tools = get_tool_definitions();
        assert_eq!(tools.len(), 5);

        let tool_names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert!(tool_names.contains(&"rxcheck_check"));
        assert!(tool_names.contains(&"rxcheck_classify"));
        assert!(tool_names.contains(&"rxcheck_drugs"));
        assert!(tool_names.contains(&"rxcheck_side_effects"));
        assert!(tool_names.contains(&"rxcheck_status"));
    }

    #[test]
    fn test_tool_definitions_have_schemas() {
        for tool in &get_tool_definitions() {
            assert!(!tool.description.is_empty());
            assert_eq!(tool.input_schema["type"], "object");
        }
    }

    #[test]
    fn test_truncate_short_response() {
        assert_eq!(truncate_response("hello world", 100), "hello world");
    }

    #[test]
    fn test_truncate_long_response() {
        let long = "x".repeat(20_000);
        let result = truncate_response(&long, 15_000);
        assert!(result.len() < 20_000);
        assert!(result.contains("[... truncated at 15000 chars]"));
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        let s = "é".repeat(10);
        let result = truncate_response(&s, 5);
        assert!(result.starts_with("éé\n"));
    }
}
