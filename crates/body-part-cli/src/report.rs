//! Plain-text and JSON reports.

use std::collections::HashSet;

use body_part_index::BodyPart;

/// One-line summary: `"<id>: <description> [<n> descendants]"`.
pub fn summary(part: &BodyPart<'_>) -> String {
    format!("{} [{} descendants]", part, part.descendant_count())
}

/// Summary of `part` followed by one indented line per direct child,
/// sorted by id.
pub fn render_lookup(part: &BodyPart<'_>) -> String {
    let mut out = summary(part);
    out.push('\n');

    for child in sorted(part.children()) {
        out.push_str(&format!("  {}\n", summary(&child)));
    }
    out
}

/// One summary line per hit, sorted by id.
pub fn render_search(hits: HashSet<BodyPart<'_>>) -> String {
    sorted(hits)
        .iter()
        .map(|hit| format!("{}\n", summary(hit)))
        .collect()
}

/// The record behind `part` as pretty-printed JSON, using document field names.
pub fn render_json(part: &BodyPart<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(part.record())
}

fn sorted<'a>(parts: HashSet<BodyPart<'a>>) -> Vec<BodyPart<'a>> {
    let mut parts: Vec<_> = parts.into_iter().collect();
    parts.sort_by(|a, b| a.id.cmp(&b.id));
    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use body_part_index::{BodyPartIndex, IndexConfig};

    const DOCUMENT: &str = r#"{"bodyParts": [
        {"radlexId": "RID39569", "description": "whole body", "containedById": "RID39569"},
        {"radlexId": "RID56", "description": "abdomen", "containedById": "RID39569",
         "codes": [{"system": "SNOMED", "code": "818983003"}]},
        {"radlexId": "RID2507", "description": "pelvis", "containedById": "RID39569"},
        {"radlexId": "RID294", "description": "uterine adnexa", "containedById": "RID2507"}
    ]}"#;

    fn make_index() -> BodyPartIndex {
        BodyPartIndex::from_json_str(DOCUMENT, IndexConfig::default()).unwrap()
    }

    #[test]
    fn test_render_lookup() {
        let index = make_index();
        let report = render_lookup(&index.root());
        assert_eq!(
            report,
            "RID39569: whole body [3 descendants]\n\
             \x20 RID2507: pelvis [1 descendants]\n\
             \x20 RID56: abdomen [0 descendants]\n"
        );
    }

    #[test]
    fn test_render_search() {
        let index = make_index();
        assert_eq!(
            render_search(index.search("RID2")),
            "RID2507: pelvis [1 descendants]\nRID294: uterine adnexa [0 descendants]\n"
        );
        assert_eq!(render_search(index.search("kidney")), "");
    }

    #[test]
    fn test_render_json_uses_document_names() {
        let index = make_index();
        let json = render_json(&index.get("818983003").unwrap()).unwrap();
        assert!(json.contains("\"radlexId\": \"RID56\""));
        assert!(json.contains("\"containedById\": \"RID39569\""));
        assert!(!json.contains("synonyms"));
    }
}
