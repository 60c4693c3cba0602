//! Body part record parser.
//!
//! Converts untyped JSON records from a body part document into normalized
//! [`BodyPartRecord`]s. Only per-record validation happens here; cross-record
//! checks belong to the index builder.

use body_part_types::{BodyPartRecord, Code, SexSpecific};
use serde_json::{Map, Value};

use crate::types::{IndexError, IndexResult};

/// Top-level document key holding the record array.
pub const BODY_PARTS_KEY: &str = "bodyParts";

/// Trait for types that can be parsed from a JSON document record.
pub trait JsonRecord: Sized {
    /// Parses a record found at `position` in the document.
    fn from_json(position: usize, value: &Value) -> IndexResult<Self>;
}

impl JsonRecord for BodyPartRecord {
    fn from_json(position: usize, value: &Value) -> IndexResult<Self> {
        let object = value.as_object().ok_or_else(|| IndexError::MalformedRecord {
            position,
            id: "?".to_string(),
            field: BODY_PARTS_KEY.to_string(),
            reason: "entry is not an object".to_string(),
        })?;

        let mut ctx = FieldContext {
            position,
            id: "?".to_string(),
            object,
        };
        let id = ctx.required("radlexId")?;
        ctx.id = id.clone();

        Ok(BodyPartRecord {
            description: ctx.required("description")?,
            contained_by_id: ctx.required("containedById")?,
            codes: ctx.codes()?,
            synonyms: ctx.string_list("synonyms")?,
            unsided_id: ctx.optional("unsidedId")?,
            left_id: ctx.optional("leftId")?,
            right_id: ctx.optional("rightId")?,
            part_of_id: ctx.optional("partOfId")?,
            sex_specific: ctx.sex_specific()?,
            id,
        })
    }
}

/// Parses every record of a body part document, in document order.
///
/// The first malformed record aborts parsing.
pub fn parse_document(document: &Value) -> IndexResult<Vec<BodyPartRecord>> {
    let entries = document
        .get(BODY_PARTS_KEY)
        .and_then(Value::as_array)
        .ok_or(IndexError::MissingBodyParts)?;

    entries
        .iter()
        .enumerate()
        .map(|(position, entry)| BodyPartRecord::from_json(position, entry))
        .collect()
}

/// Field accessors for one record, carrying enough context to name the
/// offending record in errors.
struct FieldContext<'a> {
    position: usize,
    id: String,
    object: &'a Map<String, Value>,
}

impl FieldContext<'_> {
    fn malformed(&self, field: impl Into<String>, reason: &str) -> IndexError {
        IndexError::MalformedRecord {
            position: self.position,
            id: self.id.clone(),
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    /// A field that must be a non-empty string.
    fn required(&self, field: &str) -> IndexResult<String> {
        self.required_as(field, field)
    }

    /// Like [`required`](Self::required), reporting errors under `label`.
    fn required_as(&self, field: &str, label: &str) -> IndexResult<String> {
        match self.object.get(field) {
            None | Some(Value::Null) => Err(self.malformed(label, "is missing")),
            Some(Value::String(s)) if s.is_empty() => Err(self.malformed(label, "is empty")),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(self.malformed(label, "is not a string")),
        }
    }

    /// A field that may be absent; an empty string counts as absent.
    fn optional(&self, field: &str) -> IndexResult<Option<String>> {
        match self.object.get(field) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.malformed(field, "is not a string")),
        }
    }

    fn string_list(&self, field: &str) -> IndexResult<Vec<String>> {
        let items = match self.object.get(field) {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(self.malformed(field, "is not an array")),
        };

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.malformed(format!("{field}[{i}]"), "is not a string"))
            })
            .collect()
    }

    fn codes(&self) -> IndexResult<Vec<Code>> {
        let items = match self.object.get("codes") {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(self.malformed("codes", "is not an array")),
        };

        let mut codes = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            let entry = item
                .as_object()
                .ok_or_else(|| self.malformed(format!("codes[{i}]"), "is not an object"))?;
            let nested = FieldContext {
                position: self.position,
                id: self.id.clone(),
                object: entry,
            };
            let system = nested.required_as("system", &format!("codes[{i}].system"))?;
            let code = nested.required_as("code", &format!("codes[{i}].code"))?;
            codes.push(Code { system, code });
        }
        Ok(codes)
    }

    fn sex_specific(&self) -> IndexResult<Option<SexSpecific>> {
        match self.optional("sexSpecific")? {
            None => Ok(None),
            Some(label) => SexSpecific::from_label(&label)
                .map(Some)
                .ok_or_else(|| self.malformed("sexSpecific", "is not 'Female' or 'Male'")),
        }
    }
}
