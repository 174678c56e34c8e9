//! JSON rendering of an evaluation tree.
//!
//! Wire shape, field names fixed for existing consumers:
//! ```text
//! { "status": "...", "components": { name: { status, details? } | nested } }
//! ```
//! A synthetic `flat` component is appended at the root: the flat summary
//! of the same evaluation, so the compact view and the tree can never
//! disagree.

use serde_json::{json, Map, Value};

use crate::engine::flatten::{flatten, overall_status, FlatEntry};
use crate::tree::EvaluationTree;

/// Render the full response body for one evaluation.
pub fn render(tree: &EvaluationTree) -> Value {
    let mut root = render_node(tree);
    if let Some(components) = root
        .as_object_mut()
        .and_then(|obj| obj.get_mut("components"))
        .and_then(Value::as_object_mut)
    {
        components.insert("flat".to_string(), render_flat(tree));
    }
    root
}

fn render_node(tree: &EvaluationTree) -> Value {
    match tree {
        EvaluationTree::Leaf { result, .. } => {
            let mut details = result.details.clone();
            details.insert(
                "latencyMs".to_string(),
                (result.latency.as_millis() as u64).into(),
            );
            let mut obj = Map::new();
            obj.insert("status".to_string(), result.status.as_code().into());
            if !details.is_empty() {
                obj.insert("details".to_string(), Value::Object(details));
            }
            Value::Object(obj)
        }
        EvaluationTree::Composite {
            status, children, ..
        } => {
            let mut obj = Map::new();
            obj.insert("status".to_string(), status.as_code().into());
            if !children.is_empty() {
                let mut nested = Map::new();
                for child in children {
                    nested.insert(child.name().to_string(), render_node(child));
                }
                obj.insert("components".to_string(), Value::Object(nested));
            }
            Value::Object(obj)
        }
    }
}

fn render_flat(tree: &EvaluationTree) -> Value {
    let entries = flatten(tree);
    let items: Vec<Value> = entries.iter().map(render_flat_entry).collect();
    json!({
        "status": overall_status(&entries).as_code(),
        "details": {
            "component": "flat",
            "items": items,
        },
    })
}

fn render_flat_entry(entry: &FlatEntry) -> Value {
    let mut item = Map::new();
    item.insert("name".to_string(), entry.path.clone().into());
    let check_type = entry
        .details
        .get("type")
        .cloned()
        .unwrap_or_else(|| infer_type(&entry.path).into());
    item.insert("type".to_string(), check_type);
    item.insert("status".to_string(), entry.status.as_code().into());
    item.insert(
        "latencyMs".to_string(),
        (entry.latency.as_millis() as u64).into(),
    );
    for key in ["route", "nodeCount", "firstCollection", "error"] {
        if let Some(value) = entry.details.get(key) {
            item.insert(key.to_string(), value.clone());
        }
    }
    Value::Object(item)
}

/// Fallback check type for leaves that did not report one.
fn infer_type(path: &str) -> &'static str {
    if path.starts_with("db") {
        "database"
    } else if path.starts_with("kafka") {
        "kafka"
    } else if path.starts_with("mongo") {
        "mongo"
    } else if path.starts_with("external") {
        "external"
    } else if path.starts_with("endpoints") {
        "endpoints"
    } else {
        "custom"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{Details, ProbeFailure};
    use crate::tree::CheckResult;
    use std::time::Duration;

    fn sample_tree() -> EvaluationTree {
        let mut db_details = Details::new();
        db_details.insert("component".into(), "database".into());
        db_details.insert("type".into(), "database".into());
        EvaluationTree::composite(
            "custom",
            vec![
                EvaluationTree::Leaf {
                    name: "db".into(),
                    result: CheckResult::up(db_details, Duration::from_millis(5)),
                },
                EvaluationTree::composite(
                    "external",
                    vec![EvaluationTree::Leaf {
                        name: "svcA".into(),
                        result: CheckResult::down(
                            ProbeFailure::unreachable("refused"),
                            Duration::from_millis(3),
                        ),
                    }],
                ),
            ],
        )
    }

    #[test]
    fn root_reflects_worst_status() {
        let body = render(&sample_tree());
        assert_eq!(body["status"], "DOWN");
        assert_eq!(body["components"]["db"]["status"], "UP");
        assert_eq!(body["components"]["external"]["status"], "DOWN");
        assert_eq!(
            body["components"]["external"]["components"]["svcA"]["status"],
            "DOWN"
        );
    }

    #[test]
    fn leaf_details_include_latency() {
        let body = render(&sample_tree());
        let details = &body["components"]["db"]["details"];
        assert_eq!(details["type"], "database");
        assert!(details["latencyMs"].is_u64());
    }

    #[test]
    fn flat_component_agrees_with_root() {
        let body = render(&sample_tree());
        let flat = &body["components"]["flat"];
        assert_eq!(flat["status"], body["status"]);
        let items = flat["details"]["items"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], "db");
        assert_eq!(items[1]["name"], "external.svcA");
        assert_eq!(items[1]["error"], "refused");
        assert_eq!(items[1]["type"], "external");
    }

    #[test]
    fn empty_root_renders_without_components() {
        let body = render(&EvaluationTree::composite("custom", vec![]));
        assert_eq!(body["status"], "UP");
        assert!(body.get("components").is_none());
    }
}
