use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::metrics::{
    COL_CHAR_ACCURACY, COL_CHAR_QUALITY, COL_FSCORE, COL_PRECISION, COL_QUALITY, COL_RECALL,
    COL_TIGHTNESS,
};
use crate::types::ImageId;

/// Scalar metrics reported for one submission or one image.
///
/// Every field is optional: a key absent from the source document
/// deserializes to `None`, the explicit missing-value marker. Downstream
/// tables surface these as sparse cells rather than failing the load.
/// The character-level pair is only ever populated for task 4.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    /// Panoptic quality.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<f64>,
    /// Detection tightness.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tightness: Option<f64>,
    /// F-score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fscore: Option<f64>,
    /// Precision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<f64>,
    /// Recall.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<f64>,
    /// Character-level quality (task 4 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_quality: Option<f64>,
    /// Character-level accuracy (task 4 only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_accuracy: Option<f64>,
}

impl MetricSet {
    /// Look up a metric by its table column name.
    ///
    /// Returns `None` both for a missing value and for a name outside the
    /// fixed column set, which is what column-driven report writers want.
    pub fn value(&self, column: &str) -> Option<f64> {
        match column {
            COL_QUALITY => self.quality,
            COL_TIGHTNESS => self.tightness,
            COL_FSCORE => self.fscore,
            COL_PRECISION => self.precision,
            COL_RECALL => self.recall,
            COL_CHAR_QUALITY => self.char_quality,
            COL_CHAR_ACCURACY => self.char_accuracy,
            _ => None,
        }
    }
}

/// One submission's scored evaluation: aggregate metrics plus a per-image
/// breakdown keyed by image id, in the document's own key order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EvaluationDocument {
    /// Aggregate metrics over the whole `(task, subset)` slice.
    pub results: MetricSet,
    /// Per-image metrics, preserving document order.
    #[serde(default)]
    pub images: IndexMap<ImageId, MetricSet>,
}

/// One annotated image in a subset's ground-truth document.
///
/// Only the image reference is interpreted here; the annotation payload
/// (label groups, geometry) is kept verbatim for callers that need it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GroundTruthEntry {
    /// Image reference of the form `{subset-subdir}/{split}/{name}.{ext}`.
    pub image: ImageId,
    /// The remainder of the annotation object, untouched.
    #[serde(flatten)]
    pub annotation: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_document_parses_full_metric_shape() {
        let body = r#"{
            "results": {"quality": 0.8, "tightness": 0.7, "fscore": 0.9,
                        "precision": 0.95, "recall": 0.85,
                        "char_quality": 0.6, "char_accuracy": 0.65},
            "images": {"rumsey/test/a.png": {"quality": 0.5}}
        }"#;
        let doc: EvaluationDocument = serde_json::from_str(body).unwrap();
        assert_eq!(doc.results.quality, Some(0.8));
        assert_eq!(doc.results.char_accuracy, Some(0.65));
        assert_eq!(doc.images["rumsey/test/a.png"].quality, Some(0.5));
        assert_eq!(doc.images["rumsey/test/a.png"].recall, None);
    }

    #[test]
    fn missing_metric_keys_become_none_not_errors() {
        let doc: EvaluationDocument = serde_json::from_str(r#"{"results": {}}"#).unwrap();
        assert_eq!(doc.results.quality, None);
        assert!(doc.images.is_empty());
    }

    #[test]
    fn unknown_metric_keys_are_ignored() {
        let body = r#"{"results": {"quality": 0.1, "experimental": 1.0}, "images": {}}"#;
        let doc: EvaluationDocument = serde_json::from_str(body).unwrap();
        assert_eq!(doc.results.quality, Some(0.1));
    }

    #[test]
    fn image_map_preserves_document_key_order() {
        let body = r#"{"results": {}, "images": {"z.png": {}, "a.png": {}, "m.png": {}}}"#;
        let doc: EvaluationDocument = serde_json::from_str(body).unwrap();
        let order: Vec<&str> = doc.images.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["z.png", "a.png", "m.png"]);
    }

    #[test]
    fn metric_lookup_by_column_name() {
        let metrics = MetricSet {
            quality: Some(0.4),
            ..MetricSet::default()
        };
        assert_eq!(metrics.value("quality"), Some(0.4));
        assert_eq!(metrics.value("recall"), None);
        assert_eq!(metrics.value("not_a_column"), None);
    }

    #[test]
    fn ground_truth_entry_keeps_annotation_payload() {
        let body = r#"{"image": "rumsey/test/a.png", "groups": [[0, 1]], "width": 2048}"#;
        let entry: GroundTruthEntry = serde_json::from_str(body).unwrap();
        assert_eq!(entry.image, "rumsey/test/a.png");
        assert!(entry.annotation.contains_key("groups"));
        assert_eq!(entry.annotation["width"], serde_json::json!(2048));
    }
}
