use crate::error::EditError;
use crate::flow::BranchStep;
use crate::verb::Params;
use serde_json::Value;

/// The parsed result of the three text fields of a node edit.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct ParsedEdit {
    pub params: Params,
    pub on_success: Vec<BranchStep>,
    pub on_failure: Vec<BranchStep>,
}

/// Parses all three fragments, reporting the first one that fails.
///
/// Nothing is applied here; the caller only mutates once every fragment parsed.
pub(super) fn parse_edit(
    node_id: &str,
    params: &str,
    on_success: &str,
    on_failure: &str,
) -> Result<ParsedEdit, EditError> {
    let params = parse_params(params).map_err(|message| EditError::ParamsParse {
        node_id: node_id.to_string(),
        message,
    })?;
    let on_success = parse_steps(on_success).map_err(|message| EditError::SuccessBranchParse {
        node_id: node_id.to_string(),
        message,
    })?;
    let on_failure = parse_steps(on_failure).map_err(|message| EditError::FailureBranchParse {
        node_id: node_id.to_string(),
        message,
    })?;
    Ok(ParsedEdit {
        params,
        on_success,
        on_failure,
    })
}

fn parse_params(text: &str) -> Result<Params, String> {
    match serde_json::from_str::<Value>(text).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected a JSON object, found {}", kind_of(&other))),
    }
}

fn parse_steps(text: &str) -> Result<Vec<BranchStep>, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
