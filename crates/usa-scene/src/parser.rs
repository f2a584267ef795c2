//! Record parser
//!
//! A Unity scene is a multi-document YAML stream:
//!
//! ```text
//! %YAML 1.1
//! %TAG !u! tag:unity3d.com,2011:
//! --- !u!1 &300
//! GameObject:
//!   m_Name: Player
//! --- !u!4 &200
//! Transform:
//!   m_GameObject: {fileID: 300}
//!   m_Children: []
//! ```
//!
//! Each document is handled on its own: the header line yields class and
//! identity, the class-name line is dropped, and the indented body goes
//! through `serde_yaml`. A record that cannot be read is skipped; the rest
//! of the scene still parses.

use crate::error::RecordError;
use crate::object::{ClassId, ObjectId, SceneObject};
use crate::property::PropertyStore;
use crate::registry::ObjectRegistry;
use serde_yaml::Value;

/// Token that separates records
pub const DOCUMENT_SEPARATOR: &str = "---";

/// Header line, class-name line, and at least one body line
const MIN_RECORD_LINES: usize = 3;

/// Index of the first body line within a record
const BODY_START: usize = 2;

/// UTF-8 byte-order mark some editors prepend
const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Scene text → object registry
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordParser;

impl RecordParser {
    /// Create new parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse every record of a scene into a registry
    ///
    /// Malformed records are dropped; later records replace earlier ones
    /// with the same identity. A leading byte-order mark is ignored.
    #[must_use]
    pub fn parse(&self, text: &str) -> ObjectRegistry {
        let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
        let mut registry = ObjectRegistry::new();
        let mut dropped = 0usize;

        for (index, record) in split_records(text).into_iter().enumerate() {
            match parse_record(record) {
                Ok(object) => {
                    if let Some(previous) = registry.insert(object) {
                        tracing::debug!(id = %previous.id(), "record identity reused, keeping later record");
                    }
                }
                Err(e) => {
                    dropped += 1;
                    tracing::debug!(record = index, "dropping record: {}", e);
                }
            }
        }

        tracing::debug!(objects = registry.len(), dropped, "parsed scene records");
        registry
    }
}

/// Split scene text into record segments
///
/// The separator counts only at the start of a line. Text before the first
/// separator is the preamble and is not returned.
#[must_use]
pub fn split_records(text: &str) -> Vec<&str> {
    let starts: Vec<usize> = text
        .match_indices(DOCUMENT_SEPARATOR)
        .map(|(index, _)| index)
        .filter(|&index| index == 0 || text.as_bytes()[index - 1] == b'\n')
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(text.len());
            &text[start + DOCUMENT_SEPARATOR.len()..end]
        })
        .collect()
}

/// Parse one record segment (text after the separator)
///
/// # Errors
/// - `RecordError::TooFewLines` for degenerate records
/// - `RecordError::MalformedHeader` if the header lacks tag or identity
/// - `RecordError::InvalidIdentity` if the identity is not an integer
/// - `RecordError::Body` if the body is not valid YAML
pub fn parse_record(record: &str) -> Result<SceneObject, RecordError> {
    let lines: Vec<&str> = record.lines().collect();
    if lines.len() < MIN_RECORD_LINES {
        return Err(RecordError::TooFewLines {
            lines: lines.len(),
            min: MIN_RECORD_LINES,
        });
    }

    let header = lines[0];
    let mut tokens = header.split_whitespace();
    let (Some(tag), Some(anchor)) = (tokens.next(), tokens.next()) else {
        return Err(RecordError::MalformedHeader(header.trim().to_string()));
    };

    let class = ClassId::from_tag(tag);
    let id = ObjectId::parse_anchor(anchor)
        .ok_or_else(|| RecordError::InvalidIdentity(anchor.to_string()))?;

    let body = lines[BODY_START..].join("\n");
    let properties = parse_body(&body)?;

    Ok(SceneObject::new(id, class, properties))
}

/// Deserialize a record body; anything but a mapping is an empty store
fn parse_body(body: &str) -> Result<PropertyStore, RecordError> {
    match serde_yaml::from_str::<Value>(body)? {
        Value::Mapping(map) => Ok(PropertyStore::from(map)),
        _ => Ok(PropertyStore::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREAMBLE: &str = "%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n";

    #[test]
    fn split_discards_preamble() {
        let text = format!("{PREAMBLE}--- !u!1 &1\nA:\n  x: 1\n--- !u!4 &2\nB:\n  y: 2\n");
        let records = split_records(&text);

        assert_eq!(records.len(), 2);
        assert!(records[0].starts_with(" !u!1 &1"));
        assert!(records[1].starts_with(" !u!4 &2"));
    }

    #[test]
    fn split_ignores_inline_separator() {
        let text = "--- !u!1 &1\nGameObject:\n  m_Name: a---b\n";
        let records = split_records(text);

        assert_eq!(records.len(), 1);
        assert!(records[0].contains("a---b"));
    }

    #[test]
    fn byte_order_mark_before_first_record() {
        let text = "\u{FEFF}--- !u!1 &300\nGameObject:\n  m_Name: Player\n--- !u!4 &200\nTransform:\n  m_GameObject: {fileID: 300}\n  m_Children: []\n";
        let registry = RecordParser::new().parse(text);

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(ObjectId(300)));
        assert!(registry.contains(ObjectId(200)));
    }

    #[test]
    fn split_without_separator() {
        assert!(split_records("just a preamble\n").is_empty());
        assert!(split_records("").is_empty());
    }

    #[test]
    fn parse_transform_record() {
        let record = " !u!4 &400\nTransform:\n  m_GameObject: {fileID: 300}\n  m_Children:\n  - {fileID: 401}\n  - {fileID: 402}\n";
        let object = parse_record(record).unwrap();

        assert_eq!(object.id(), ObjectId(400));
        assert_eq!(object.class(), ClassId::Transform);
        assert_eq!(object.properties().reference("m_GameObject"), Some(ObjectId(300)));
        assert_eq!(
            object.properties().references("m_Children"),
            vec![ObjectId(401), ObjectId(402)]
        );
    }

    #[test]
    fn parse_stripped_header() {
        let record = " !u!1 &55 stripped\nGameObject:\n  m_Name: Prefab\n";
        let object = parse_record(record).unwrap();
        assert_eq!(object.id(), ObjectId(55));
        assert_eq!(object.properties().text("m_Name"), Some("Prefab"));
    }

    #[test]
    fn unknown_class_still_parses() {
        let object = parse_record(" !u!114 &9\nMonoBehaviour:\n  m_Enabled: 1\n").unwrap();
        assert_eq!(object.class(), ClassId::Unknown);
        assert_eq!(object.properties().integer("m_Enabled"), Some(1));
    }

    #[test]
    fn too_few_lines() {
        let err = parse_record(" !u!1 &1\nGameObject:\n").unwrap_err();
        assert!(matches!(err, RecordError::TooFewLines { lines: 2, .. }));
    }

    #[test]
    fn single_token_header() {
        let err = parse_record(" !u!1\nGameObject:\n  m_Name: x\n").unwrap_err();
        assert!(matches!(err, RecordError::MalformedHeader(_)));
    }

    #[test]
    fn invalid_identity() {
        let err = parse_record(" !u!1 &abc\nGameObject:\n  m_Name: x\n").unwrap_err();
        assert!(matches!(err, RecordError::InvalidIdentity(ref token) if token == "&abc"));
    }

    #[test]
    fn invalid_body() {
        let err = parse_record(" !u!1 &1\nGameObject:\n  m_Name: [unterminated\n").unwrap_err();
        assert!(matches!(err, RecordError::Body(_)));
    }

    #[test]
    fn scalar_body_is_empty_store() {
        let object = parse_record(" !u!1 &1\nGameObject:\n  just text\n").unwrap();
        assert!(object.properties().is_empty());
    }

    #[test]
    fn crlf_records() {
        let text = "--- !u!1 &7\r\nGameObject:\r\n  m_Name: Win\r\n";
        let registry = RecordParser::new().parse(text);
        let object = registry.get(ObjectId(7)).unwrap();
        assert_eq!(object.properties().text("m_Name"), Some("Win"));
    }

    #[test]
    fn parse_keeps_good_records() {
        let text = format!(
            "{PREAMBLE}--- !u!1 &1\nGameObject:\n  m_Name: A\n\
             --- !u!1\nGameObject:\n  m_Name: B\n\
             --- !u!4 &2\nTransform:\n  m_Children: []\n\
             --- !u!4 &x3\nTransform:\n  m_Children: []\n\
             --- !u!4 &4\n"
        );
        let registry = RecordParser::new().parse(&text);

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(ObjectId(1)));
        assert!(registry.contains(ObjectId(2)));
    }

    #[test]
    fn later_duplicate_wins() {
        let text = "--- !u!1 &5\nGameObject:\n  m_Name: First\n--- !u!4 &5\nTransform:\n  m_Children: []\n";
        let registry = RecordParser::new().parse(text);

        assert_eq!(registry.len(), 1);
        let object = registry.get(ObjectId(5)).unwrap();
        assert_eq!(object.class(), ClassId::Transform);
        assert_eq!(object.properties().text("m_Name"), None);
        assert!(object.properties().get("m_Children").is_some());
    }
}
