//! Catalog-level behaviour against the sample body part document.

use std::collections::HashSet;
use std::path::PathBuf;

use body_part_index::well_known::{
    FMA_SYSTEM, MESH_SYSTEM, SNOMED_SYSTEM, UMLS_SYSTEM, WHOLE_BODY_ID,
};
use body_part_index::{BodyPart, BodyPartIndex, Code, IndexConfig, IndexError, SexSpecific};
use serde_json::{json, Value};

const ABDOMEN_ID: &str = "RID56";
const PELVIS_ID: &str = "RID2507";
const THORAX_ID: &str = "RID1243";
const FEMALE_GENITAL_SYSTEM_ID: &str = "RID270";
const UTERINE_ADNEXA_ID: &str = "RID294";
const LEFT_UTERINE_ADNEXA_ID: &str = "RID294_RID5824";
const RIGHT_UTERINE_ADNEXA_ID: &str = "RID294_RID5825";
const OVARIAN_ARTERY_ID: &str = "RID38068";
const RIGHT_OVARIAN_ARTERY_ID: &str = "RID38069";
const MALE_BREAST_ID: &str = "RID29898";
const AREOLA_OF_MALE_BREAST_ID: &str = "RID29914";
const NIPPLE_OF_MALE_BREAST_ID: &str = "RID29903";

const ABDOMEN_SNOMED_CODE: &str = "818983003";

fn sample_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join("sample_body_parts.json")
}

fn sample_document() -> Value {
    body_part_index::read_document(sample_path()).unwrap()
}

fn sample_index() -> BodyPartIndex {
    BodyPartIndex::from_path(sample_path(), IndexConfig::default()).unwrap()
}

fn ids<'a>(parts: impl IntoIterator<Item = BodyPart<'a>>) -> HashSet<String> {
    parts.into_iter().map(|p| p.id.clone()).collect()
}

fn id_set(ids: &[&str]) -> HashSet<String> {
    ids.iter().map(|id| id.to_string()).collect()
}

/// Sample document with `edit` applied to its record array.
fn edited_document(edit: impl FnOnce(&mut Vec<Value>)) -> Value {
    let mut document = sample_document();
    let records = document["bodyParts"].as_array_mut().unwrap();
    edit(records);
    document
}

#[test]
fn test_initialize_from_file_and_value() {
    let from_file = sample_index();
    let from_value = BodyPartIndex::from_value(&sample_document(), IndexConfig::default()).unwrap();
    let file = std::fs::File::open(sample_path()).unwrap();
    let from_reader = BodyPartIndex::from_reader(file, IndexConfig::default()).unwrap();

    assert_eq!(from_file.len(), 13);
    assert_eq!(from_value.len(), 13);
    assert_eq!(ids(from_reader.get_all()), ids(from_file.get_all()));
    assert_eq!(from_file.stats().max_depth, 4);
}

#[test]
fn test_get_all() {
    let index = sample_index();
    let expected = id_set(&[
        WHOLE_BODY_ID,
        ABDOMEN_ID,
        PELVIS_ID,
        FEMALE_GENITAL_SYSTEM_ID,
        UTERINE_ADNEXA_ID,
        LEFT_UTERINE_ADNEXA_ID,
        RIGHT_UTERINE_ADNEXA_ID,
        OVARIAN_ARTERY_ID,
        RIGHT_OVARIAN_ARTERY_ID,
        THORAX_ID,
        MALE_BREAST_ID,
        AREOLA_OF_MALE_BREAST_ID,
        NIPPLE_OF_MALE_BREAST_ID,
    ]);
    assert_eq!(ids(index.get_all()), expected);
    assert_eq!(index.get_all().next().unwrap().id, WHOLE_BODY_ID);
}

#[test]
fn test_get_by_id_returns_requested_id() {
    let index = sample_index();
    for part in index.get_all() {
        assert_eq!(index.get_by_id(&part.id).unwrap().id, part.id);
    }

    let root = index.get_by_id(WHOLE_BODY_ID).unwrap();
    assert_eq!(root.description, "whole body");
    assert!(matches!(
        index.get_by_id("RID0"),
        Err(IndexError::NotFound { .. })
    ));
}

#[test]
fn test_basic_properties() {
    let index = sample_index();
    for (id, description, contained_by_id) in [
        (PELVIS_ID, "pelvis", WHOLE_BODY_ID),
        (WHOLE_BODY_ID, "whole body", WHOLE_BODY_ID),
        (ABDOMEN_ID, "abdomen", WHOLE_BODY_ID),
        (UTERINE_ADNEXA_ID, "uterine adnexa", PELVIS_ID),
    ] {
        let part = index.get_by_id(id).unwrap();
        assert_eq!(
            (part.id.as_str(), part.description.as_str(), part.contained_by_id.as_str()),
            (id, description, contained_by_id)
        );
    }
}

#[test]
fn test_synonyms_codes_and_sex() {
    let index = sample_index();
    let pelvis = index.get_by_id(PELVIS_ID).unwrap();

    assert_eq!(pelvis.synonyms, vec!["lesser pelvis", "pelvis minor", "true pelvis"]);
    assert_eq!(
        pelvis.codes,
        vec![
            Code::new(FMA_SYSTEM, "9578"),
            Code::new(SNOMED_SYSTEM, "12921003"),
            Code::new(MESH_SYSTEM, "A01.923.600"),
            Code::new(UMLS_SYSTEM, "C0030797"),
        ]
    );
    assert_eq!(pelvis.sex_specific, None);

    let breast = index.get_by_id(MALE_BREAST_ID).unwrap();
    assert_eq!(breast.sex_specific, Some(SexSpecific::Male));
    assert!(index.get_by_id(NIPPLE_OF_MALE_BREAST_ID).unwrap().synonyms.is_empty());
}

#[test]
fn test_get_by_code_and_bare_code_agree() {
    let index = sample_index();

    let by_code = index.get_by_code("SNOMED", ABDOMEN_SNOMED_CODE).unwrap();
    let by_text = index.get(ABDOMEN_SNOMED_CODE).unwrap();
    assert_eq!(by_code, by_text);
    assert_eq!(by_code.id, ABDOMEN_ID);
    assert_eq!(by_code.description, "abdomen");

    assert!(index.get_by_code("FMA", ABDOMEN_SNOMED_CODE).is_none());
}

#[test]
fn test_get_prefers_id() {
    let index = sample_index();
    let pelvis = index.get(PELVIS_ID).unwrap();
    assert_eq!(pelvis.description, "pelvis");
    assert_eq!(index.get("9578").unwrap().id, PELVIS_ID);
    assert!(index.get("no such thing").is_none());
}

#[test]
fn test_parents() {
    let index = sample_index();
    let pelvis = index.get_by_id(PELVIS_ID).unwrap();
    assert_eq!(pelvis.contained_by(), index.get_by_id(WHOLE_BODY_ID).unwrap());
    assert_eq!(pelvis.part_of(), None);

    let adnexa = index.get_by_id(UTERINE_ADNEXA_ID).unwrap();
    assert_eq!(
        adnexa.part_of(),
        Some(index.get_by_id(FEMALE_GENITAL_SYSTEM_ID).unwrap())
    );
}

#[test]
fn test_sidedness() {
    let index = sample_index();
    let unsided = index.get_by_id(UTERINE_ADNEXA_ID).unwrap();
    let left = index.get_by_id(LEFT_UTERINE_ADNEXA_ID).unwrap();
    let right = index.get_by_id(RIGHT_UTERINE_ADNEXA_ID).unwrap();

    assert_eq!(unsided.left(), Some(left));
    assert_eq!(unsided.right(), Some(right));
    assert_eq!(unsided.unsided(), None);
    assert_eq!(left.left(), None);
    assert_eq!(left.right(), Some(right));
    assert_eq!(left.unsided(), Some(unsided));
    assert_eq!(right.left(), Some(left));
    assert_eq!(right.right(), None);
    assert_eq!(right.unsided(), Some(unsided));
}

#[test]
fn test_sidedness_symmetry_holds_everywhere() {
    let index = sample_index();
    for part in index.get_all().filter(|p| !p.is_sided()) {
        if let Some(left) = part.left() {
            assert!(left.is_sided());
            assert_eq!(left.unsided(), Some(part));
        }
        if let Some(right) = part.right() {
            assert!(right.is_sided());
            assert_eq!(right.unsided(), Some(part));
        }
        if let (Some(left), Some(right)) = (part.left(), part.right()) {
            assert_eq!(left.right(), Some(right));
        }
    }
}

#[test]
fn test_children() {
    let index = sample_index();
    let root = index.get_by_id(WHOLE_BODY_ID).unwrap();
    assert_eq!(ids(root.children()), id_set(&[ABDOMEN_ID, PELVIS_ID, THORAX_ID]));
    assert!(index.get_by_id(NIPPLE_OF_MALE_BREAST_ID).unwrap().children().is_empty());
}

#[test]
fn test_descendants() {
    let index = sample_index();
    let pelvis = index.get_by_id(PELVIS_ID).unwrap();
    assert_eq!(
        ids(pelvis.descendants()),
        id_set(&[
            FEMALE_GENITAL_SYSTEM_ID,
            UTERINE_ADNEXA_ID,
            LEFT_UTERINE_ADNEXA_ID,
            RIGHT_UTERINE_ADNEXA_ID,
        ])
    );

    let root = index.root();
    assert_eq!(root.descendants().len(), index.len() - 1);
    assert!(!root.descendants().contains(&root));
}

#[test]
fn test_every_record_is_a_child_and_descendant_of_its_parent() {
    let index = sample_index();
    assert!(index.root().ancestors().is_empty());

    for part in index.get_all().filter(|p| !p.is_root()) {
        let parent = part.contained_by();
        assert!(parent.children().contains(&part));
        assert!(parent.descendants().contains(&part));
        assert!(parent.is_child(&part));
        assert_eq!(part.ancestors().last(), Some(&index.root()));
    }
}

#[test]
fn test_ancestors_and_is_contained() {
    let index = sample_index();
    let nipple = index.get_by_id(NIPPLE_OF_MALE_BREAST_ID).unwrap();
    let chain: Vec<String> = nipple.ancestors().iter().map(|a| a.id.clone()).collect();
    assert_eq!(
        chain,
        vec![AREOLA_OF_MALE_BREAST_ID, MALE_BREAST_ID, THORAX_ID, WHOLE_BODY_ID]
    );

    let abdomen = index.get_by_id(ABDOMEN_ID).unwrap();
    let root = index.get_by_id(WHOLE_BODY_ID).unwrap();
    let right_adnexa = index.get_by_id(RIGHT_UTERINE_ADNEXA_ID).unwrap();
    assert!(abdomen.is_contained(&root));
    assert!(!abdomen.is_contained(&right_adnexa));
    assert!(!root.is_contained(&abdomen));
    assert!(!abdomen.is_contained(&abdomen));
}

#[test]
fn test_snomed_code_fallbacks() {
    let index = sample_index();
    let code = |id: &str| index.get_by_id(id).unwrap().snomed_code();

    assert_eq!(code(RIGHT_UTERINE_ADNEXA_ID), Some("110634007"));
    assert_eq!(code(RIGHT_OVARIAN_ARTERY_ID), Some("12052000"));
    assert_eq!(code(AREOLA_OF_MALE_BREAST_ID), Some("67770001"));
    assert_eq!(code(NIPPLE_OF_MALE_BREAST_ID), None);
}

#[test]
fn test_search() {
    let index = sample_index();

    assert_eq!(ids(index.search("abdomen")), id_set(&[ABDOMEN_ID]));
    assert_eq!(ids(index.search("true pelvis")), id_set(&[PELVIS_ID]));
    assert_eq!(
        ids(index.search("adnexa")),
        id_set(&[UTERINE_ADNEXA_ID, LEFT_UTERINE_ADNEXA_ID, RIGHT_UTERINE_ADNEXA_ID])
    );
    assert_eq!(ids(index.search("12921")), id_set(&[PELVIS_ID]));
    assert!(index.search("kidney").is_empty());
    assert!(index.search("Abdomen").is_empty());
}

#[test]
fn test_rebuild_is_deterministic() {
    let first = sample_index();
    let second = BodyPartIndex::from_value(&sample_document(), IndexConfig::default()).unwrap();

    assert_eq!(ids(first.get_all()), ids(second.get_all()));
    for part in first.get_all() {
        let other = second.get_by_id(&part.id).unwrap();
        assert_eq!(ids(part.descendants()), ids(other.descendants()));
    }
}

#[test]
fn test_rejects_duplicate_id() {
    let document = edited_document(|records| {
        records.push(json!({"radlexId": ABDOMEN_ID, "description": "abdomen", "containedById": WHOLE_BODY_ID}));
    });
    assert!(matches!(
        BodyPartIndex::from_value(&document, IndexConfig::default()),
        Err(IndexError::DuplicateId { id }) if id == ABDOMEN_ID
    ));
}

#[test]
fn test_rejects_duplicate_code() {
    let document = edited_document(|records| {
        records.push(json!({
            "radlexId": "RID1", "description": "somewhere", "containedById": WHOLE_BODY_ID,
            "codes": [{"system": "SNOMED", "code": ABDOMEN_SNOMED_CODE}]
        }));
    });
    assert!(matches!(
        BodyPartIndex::from_value(&document, IndexConfig::default()),
        Err(IndexError::DuplicateCode { existing, .. }) if existing == ABDOMEN_ID
    ));
}

#[test]
fn test_rejects_unresolved_containment() {
    let document = edited_document(|records| {
        records.push(json!({"radlexId": "RID1", "description": "somewhere", "containedById": "RID0"}));
    });
    assert!(matches!(
        BodyPartIndex::from_value(&document, IndexConfig::default()),
        Err(IndexError::UnresolvedReference { id, target, .. }) if id == "RID1" && target == "RID0"
    ));
}

#[test]
fn test_rejects_unresolved_left_id() {
    let document = edited_document(|records| {
        let adnexa = records
            .iter_mut()
            .find(|r| r["radlexId"] == UTERINE_ADNEXA_ID)
            .unwrap();
        adnexa["leftId"] = json!("RID0");
    });

    let err = BodyPartIndex::from_value(&document, IndexConfig::default()).unwrap_err();
    assert!(matches!(
        &err,
        IndexError::UnresolvedReference { id, field: "leftId", target }
            if id == UTERINE_ADNEXA_ID && target == "RID0"
    ));
    assert_eq!(err.to_string(), "Unresolved reference: RID294.leftId = RID0");
}

#[test]
fn test_rejects_malformed_record() {
    let document = edited_document(|records| {
        records.push(json!({"radlexId": "RID1", "containedById": WHOLE_BODY_ID}));
    });
    assert!(matches!(
        BodyPartIndex::from_value(&document, IndexConfig::default()),
        Err(IndexError::MalformedRecord { position: 13, field, .. }) if field == "description"
    ));
}

#[test]
fn test_rejects_inconsistent_sidedness() {
    let document = edited_document(|records| {
        let right_artery = records
            .iter_mut()
            .find(|r| r["radlexId"] == RIGHT_OVARIAN_ARTERY_ID)
            .unwrap();
        right_artery["unsidedId"] = json!(UTERINE_ADNEXA_ID);
    });

    assert!(matches!(
        BodyPartIndex::from_value(&document, IndexConfig::default()),
        Err(IndexError::InconsistentSidedness { .. })
    ));
}

#[test]
fn test_index_is_shareable_across_threads() {
    let index = sample_index();
    std::thread::scope(|scope| {
        for query in ["adnexa", "pelvis", "breast"] {
            let index = &index;
            scope.spawn(move || assert!(!index.search(query).is_empty()));
        }
    });
}
