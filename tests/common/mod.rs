pub mod fixtures;

use quire::{ContainerKind, DocumentPass, DocumentRecords, Node, PassConfig, PassError, PassOutput};
use serde_json::Value;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Runs a pass over a JSON document with the default configuration.
pub fn run_document(document: &Value) -> Result<PassOutput, PassError> {
    run_document_with(document, &PassConfig::default())
}

pub fn run_document_with(document: &Value, config: &PassConfig) -> Result<PassOutput, PassError> {
    let records = DocumentRecords::from_json(&document.to_string())?;
    DocumentPass::new(&records, config).run()
}

fn tag(kind: &ContainerKind) -> &'static str {
    match kind {
        ContainerKind::Unordered => "UL",
        ContainerKind::Ordered => "OL",
        ContainerKind::NestedOrdered => "NOL",
    }
}

/// Compact rendering of the block and list structure, ignoring inline content.
pub fn shape(nodes: &[Node]) -> String {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Block { .. } => Some("P".to_string()),
            Node::Item { children, .. } => {
                let inner = shape(children);
                Some(if inner.is_empty() {
                    "I".to_string()
                } else {
                    format!("I[{inner}]")
                })
            }
            Node::Container { kind, children, .. } => {
                Some(format!("{}[{}]", tag(kind), shape(children)))
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Compact rendering of inline content: wrappers as `{key=value;..}[..]`,
/// text verbatim.
pub fn inline(nodes: &[Node]) -> String {
    nodes
        .iter()
        .filter_map(|node| match node {
            Node::Text { text } => Some(text.clone()),
            Node::Wrapper {
                properties,
                children,
            } => {
                let props = properties
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(";");
                Some(format!("{{{props}}}[{}]", inline(children)))
            }
            _ => None,
        })
        .collect()
}
