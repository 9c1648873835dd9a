//! JSON backups: every record field plus a synthetic `exportDate`.

use chrono::{DateTime, SecondsFormat, Utc};
use mala_counter_core::{CounterRecord, SparseFieldMap, UnknownKeys};
use serde::Serialize;
use serde_json::Value;

use super::{ExportError, ImportError};

#[derive(Serialize)]
struct StructuredBackup<'a> {
    #[serde(flatten)]
    record: &'a CounterRecord,
    #[serde(rename = "exportDate")]
    export_date: String,
}

/// Pretty-printed JSON of the whole record, stamped with `exported_at`.
pub fn export_structured(
    record: &CounterRecord,
    exported_at: DateTime<Utc>,
) -> Result<String, ExportError> {
    let backup = StructuredBackup {
        record,
        export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
    };
    Ok(serde_json::to_string_pretty(&backup)?)
}

/// Parse a backup and keep only recognized, well-typed counter fields.
///
/// Identity fields, `exportDate` and any other unknown key are dropped. The
/// result may be empty; the caller decides how to report that.
/// Bytes that are not UTF-8 fail the same way as malformed JSON.
pub fn import_structured(payload: impl AsRef<[u8]>) -> Result<SparseFieldMap, ImportError> {
    let value: Value = serde_json::from_slice(payload.as_ref())?;
    Ok(SparseFieldMap::from_json(&value, UnknownKeys::Drop)?)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mala_counter_core::{CounterField, CoreError, TrackedItem};

    use super::*;

    fn populated() -> CounterRecord {
        let mut record = CounterRecord::anonymous();
        record.current_count = 61;
        for (n, item) in (0_u64..).zip(TrackedItem::ALL) {
            let tally = record.tally_mut(item);
            tally.completed_malas = n * 3;
            tally.total_recitations = n * 3 * 108;
        }
        record.tally_mut(TrackedItem::WhiteTara).image_url = "data:image/png;base64,iVBORw0KGgo=".to_owned();
        record
    }

    #[test]
    fn test_export_contains_every_field_and_date() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let text = export_structured(&populated(), at).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 37);
        assert_eq!(object["exportDate"], "2026-10-19T08:30:00.000Z");
        assert_eq!(object["currentCount"], 61);
        assert_eq!(object["id"], 0);
        for field in CounterField::all() {
            assert!(object.contains_key(field.name()), "missing {field}");
        }
    }

    #[test]
    fn test_round_trip_onto_fresh_record() {
        let record = populated();
        let text = export_structured(&record, Utc::now()).unwrap();

        let map = import_structured(&text).unwrap();
        let mut restored = CounterRecord::anonymous();
        restored.merge(&map);

        assert_eq!(map.len(), 34);
        assert_eq!(restored, record);
    }

    #[test]
    fn test_import_filters_unknown_keys() {
        let map = import_structured(r#"{"unknownField": 5, "completedMalas": 3}"#).unwrap();
        assert_eq!(map.field_names(), vec!["completedMalas"]);
        assert_eq!(map.count(TrackedItem::PRIMARY.completed_field()), Some(3));
    }

    #[test]
    fn test_import_with_no_recognized_fields_is_empty() {
        let map = import_structured(r#"{"id": 0, "exportDate": "2026-01-01T00:00:00.000Z"}"#)
            .unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_import_malformed_text() {
        assert!(matches!(import_structured("{not json"), Err(ImportError::Malformed(_))));
        assert!(matches!(import_structured(""), Err(ImportError::Malformed(_))));
        assert!(matches!(
            import_structured(b"{\"completedMalas\": 3, \"x\": \"\xff\xfe\"}"),
            Err(ImportError::Malformed(_))
        ));
    }

    #[test]
    fn test_import_non_object() {
        assert!(matches!(import_structured("[1, 2, 3]"), Err(ImportError::NotAnObject)));
        assert!(matches!(import_structured("42"), Err(ImportError::NotAnObject)));
    }

    #[test]
    fn test_import_rejects_ill_typed_recognized_field() {
        let err = import_structured(r#"{"greenTaraCompletedMalas": "lots"}"#).unwrap_err();
        assert!(matches!(
            err,
            ImportError::InvalidValue(CoreError::InvalidValue { field: "greenTaraCompletedMalas", .. })
        ));
    }
}
