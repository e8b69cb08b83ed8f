use crate::scanner::Plan;
use serde_json::json;

/// Pretty JSON of the whole plan, newline terminated
pub fn render_json(plan: &Plan) -> String {
    let body = serde_json::to_string_pretty(plan)
        .unwrap_or_else(|e| json!({ "error": e.to_string() }).to_string());
    body + "\n"
}
