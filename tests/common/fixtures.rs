//! Reusable JSON documents.

use serde_json::{Value, json};

/// Styles shared by most fixtures.
pub fn styles() -> Value {
    json!([
        { "id": "Normal", "declarations": [["font-family", "Times"], ["color", "black"]] },
        { "id": "ListParagraph", "parent": "Normal" },
        { "id": "Heading1", "parent": "Normal", "declarations": [["font-size", "16pt"]] },
        { "id": "Strong", "kind": "character", "declarations": [["font-weight", "bold"]] },
        { "id": "Emphasis", "kind": "character", "declarations": [["font-style", "italic"]] }
    ])
}

/// A two-level decimal list and a bulleted list, indented 18pt and 54pt.
pub fn abstract_lists() -> Value {
    json!([
        {
            "id": "Decimal",
            "levels": [
                { "format": "decimal", "template": "%1.",
                  "declarations": [["margin-left", "36pt"], ["text-indent", "-18pt"]] },
                { "format": "lowerLetter", "template": "%2.",
                  "declarations": [["margin-left", "72pt"], ["text-indent", "-18pt"]] }
            ]
        },
        {
            "id": "Bullets",
            "levels": [
                { "format": "bullet", "template": "\u{f0b7}",
                  "declarations": [["margin-left", "36pt"], ["text-indent", "-18pt"]] }
            ]
        },
        { "id": "DecimalAlias", "alias": "Decimal" }
    ])
}

pub fn list_instances() -> Value {
    json!([
        { "id": "1", "abstractId": "Decimal" },
        { "id": "2", "abstractId": "Bullets" },
        { "id": "3", "abstractId": "DecimalAlias", "overrides": [ { "start": 5 } ] }
    ])
}

pub fn text(text: &str) -> Value {
    json!({ "text": text })
}

pub fn styled(text: &str, style: &str) -> Value {
    json!({ "text": text, "style": style })
}

pub fn paragraph(style: &str, runs: Vec<Value>) -> Value {
    json!({ "style": style, "runs": runs })
}

pub fn list_paragraph(instance: &str, level: usize, marker: &str, runs: Vec<Value>) -> Value {
    json!({
        "style": "ListParagraph",
        "declarations": [["-list-instance", instance], ["-list-level", level.to_string()]],
        "marker": marker,
        "runs": runs
    })
}

pub fn document(paragraphs: Vec<Value>) -> Value {
    json!({
        "styles": styles(),
        "abstractLists": abstract_lists(),
        "listInstances": list_instances(),
        "paragraphs": paragraphs
    })
}

/// A heading, a two-level numbered list and a closing paragraph.
pub fn report() -> Value {
    document(vec![
        paragraph("Heading1", vec![text("Report")]),
        list_paragraph("1", 0, "1.\t", vec![text("First "), styled("point", "Strong")]),
        list_paragraph("1", 1, "a.\t", vec![text("Detail")]),
        list_paragraph("1", 0, "2.\t", vec![text("Second  ")]),
        paragraph("Normal", vec![text("After")]),
    ])
}
