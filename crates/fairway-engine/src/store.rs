//! Per-hole calibration persistence.
//!
//! Records are keyed by [`HoleKey`] and hold the anchors, the target and its
//! active flag. Coordinates are clamped into `[0, 1]` on the way in and
//! sanitized again on the way out, so a hand-edited or stale file can never
//! put an anchor off the image.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use fairway_core::types::{HoleKey, NormPoint};
use fairway_overlay::{Calibration, Target};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access hole store at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("hole store at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize hole store: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Saved calibration for one hole, in the on-disk layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HoleRecord {
    #[serde(rename = "A", default, deserialize_with = "lenient_point")]
    pub tee: Option<NormPoint>,
    #[serde(rename = "C", default, deserialize_with = "lenient_point")]
    pub green: Option<NormPoint>,
    #[serde(rename = "B", default, deserialize_with = "lenient_point")]
    pub target: Option<NormPoint>,
    #[serde(rename = "Bactive", default, deserialize_with = "lenient_flag")]
    pub target_active: bool,
}

impl HoleRecord {
    /// Record for the current calibration and target, clamped.
    pub fn capture(calibration: &Calibration, target: &Target) -> Self {
        Self {
            tee: Some(calibration.tee),
            green: Some(calibration.green),
            target: Some(target.point),
            target_active: target.active,
        }
        .sanitized()
    }

    /// Same record with every present coordinate clamped into `[0, 1]`.
    /// Points with a non-finite coordinate are dropped.
    pub fn sanitized(self) -> Self {
        let clean = |p: Option<NormPoint>| p.and_then(|p| NormPoint::try_new(p.x, p.y));
        Self {
            tee: clean(self.tee),
            green: clean(self.green),
            target: clean(self.target),
            target_active: self.target_active,
        }
    }

    /// Decode one stored entry. Anything other than a JSON object counts as
    /// no record.
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        serde_json::from_value(value).ok()
    }

    /// Rebuild session state. Missing anchors fall back to `defaults`; a
    /// missing target falls back to the midpoint of the restored anchors.
    pub fn restore(&self, defaults: &Calibration) -> (Calibration, Target) {
        let record = self.sanitized();
        let calibration = Calibration::new(
            record.tee.unwrap_or(defaults.tee),
            record.green.unwrap_or(defaults.green),
        );
        let point = record
            .target
            .unwrap_or_else(|| calibration.tee.midpoint(&calibration.green));
        let target = Target {
            point,
            active: record.target_active,
        };
        (calibration, target)
    }
}

/// Accept anything for a point; keep it only if both coordinates are numbers.
fn lenient_point<'de, D>(deserializer: D) -> Result<Option<NormPoint>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let x = value.get("x").and_then(Value::as_f64);
    let y = value.get("y").and_then(Value::as_f64);
    Ok(match (x, y) {
        (Some(x), Some(y)) => NormPoint::try_new(x, y),
        _ => None,
    })
}

/// Truthiness of whatever was stored: `1`, `"yes"` and `true` are set;
/// `0`, `""`, `null` and `false` are not.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

/// Key-value storage for hole records.
pub trait HoleStore {
    /// Stored record for `key`, if any.
    fn get(&self, key: &HoleKey) -> Result<Option<HoleRecord>, StoreError>;
    /// Replace the record for `key`.
    fn set(&mut self, key: &HoleKey, record: HoleRecord) -> Result<(), StoreError>;
}

/// Read a hole's defaults. The result is always sanitized.
pub fn get_hole_defaults<S: HoleStore + ?Sized>(
    store: &S,
    key: &HoleKey,
) -> Result<Option<HoleRecord>, StoreError> {
    Ok(store.get(key)?.map(HoleRecord::sanitized))
}

/// Write a hole's defaults. Coordinates are clamped before they are stored.
pub fn set_hole_defaults<S: HoleStore + ?Sized>(
    store: &mut S,
    key: &HoleKey,
    record: HoleRecord,
) -> Result<(), StoreError> {
    store.set(key, record.sanitized())
}

/// In-process store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<HoleKey, HoleRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl HoleStore for MemoryStore {
    fn get(&self, key: &HoleKey) -> Result<Option<HoleRecord>, StoreError> {
        Ok(self.records.get(key).copied())
    }

    fn set(&mut self, key: &HoleKey, record: HoleRecord) -> Result<(), StoreError> {
        self.records.insert(key.clone(), record);
        Ok(())
    }
}

/// All hole records in one pretty-printed JSON object, keyed by hole key.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every readable record. A missing file is an empty store; entries
    /// that are not objects are skipped.
    pub fn read_all(&self) -> Result<BTreeMap<HoleKey, HoleRecord>, StoreError> {
        Ok(self
            .read_raw()?
            .into_iter()
            .filter_map(|(key, value)| {
                HoleRecord::from_value(value).map(|record| (HoleKey::from_raw(key), record))
            })
            .collect())
    }

    /// The file as an untyped object. Only bytes that are not a JSON object
    /// are a parse error.
    fn read_raw(&self) -> Result<Map<String, Value>, StoreError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if json.trim().is_empty() {
            return Ok(Map::new());
        }
        serde_json::from_str(&json).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_raw(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| StoreError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

impl HoleStore for JsonFileStore {
    fn get(&self, key: &HoleKey) -> Result<Option<HoleRecord>, StoreError> {
        Ok(self
            .read_raw()?
            .remove(key.as_str())
            .and_then(HoleRecord::from_value))
    }

    /// Read-modify-write of the whole file. Other holes' entries are written
    /// back untouched. A file that is not JSON is reported, not overwritten.
    fn set(&mut self, key: &HoleKey, record: HoleRecord) -> Result<(), StoreError> {
        let mut entries = self.read_raw()?;
        entries.insert(key.as_str().to_string(), serde_json::to_value(record)?);
        self.write_raw(&entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u32) -> HoleKey {
        HoleKey::new("Belle Glades", "Calusa", n)
    }

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        dir.join("hole_defaults.json")
    }

    #[test]
    fn test_set_clamps_out_of_range() {
        let mut store = MemoryStore::new();
        let record = HoleRecord {
            tee: Some(NormPoint { x: 1.4, y: 0.8 }),
            green: Some(NormPoint { x: 0.5, y: -0.2 }),
            target: None,
            target_active: false,
        };
        set_hole_defaults(&mut store, &key(1), record).unwrap();

        let back = get_hole_defaults(&store, &key(1)).unwrap().unwrap();
        assert_eq!(back.tee, Some(NormPoint::new(1.0, 0.8)));
        assert_eq!(back.green, Some(NormPoint::new(0.5, 0.0)));
    }

    #[test]
    fn test_missing_key() {
        let store = MemoryStore::new();
        assert!(get_hole_defaults(&store, &key(4)).unwrap().is_none());
    }

    #[test]
    fn test_wire_format() {
        let json = r#"{"A":{"x":0.4,"y":0.9},"C":{"x":0.6,"y":0.1},"B":{"x":0.5,"y":0.5},"Bactive":true}"#;
        let record: HoleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.tee, Some(NormPoint::new(0.4, 0.9)));
        assert!(record.target_active);

        let out = serde_json::to_value(record).unwrap();
        assert!(out.get("A").is_some());
        assert!(out.get("Bactive").is_some());
    }

    #[test]
    fn test_lenient_read() {
        let json = r#"{"A":{"x":"left","y":0.9},"C":{"x":3.0,"y":0.1},"B":null}"#;
        let record: HoleRecord = serde_json::from_str(json).unwrap();
        assert!(record.tee.is_none());
        assert_eq!(record.green, Some(NormPoint::new(1.0, 0.1)));
        assert!(record.target.is_none());
        assert!(!record.target_active);
    }

    #[test]
    fn test_truthy_active_flag() {
        let on: HoleRecord = serde_json::from_str(r#"{"Bactive":1}"#).unwrap();
        let off: HoleRecord = serde_json::from_str(r#"{"Bactive":0}"#).unwrap();
        let null: HoleRecord = serde_json::from_str(r#"{"Bactive":null}"#).unwrap();
        let word: HoleRecord = serde_json::from_str(r#"{"Bactive":"yes"}"#).unwrap();
        assert!(on.target_active);
        assert!(!off.target_active);
        assert!(!null.target_active);
        assert!(word.target_active);
        assert!(HoleRecord::from_value(Value::Null).is_none());
        assert!(HoleRecord::from_value(serde_json::json!([1, 2])).is_none());
    }

    #[test]
    fn test_bad_entry_does_not_poison_other_holes() {
        let path = scratch("fairway_test_store_bad_entry");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let json = r#"{
            "BelleGlades-Calusa-01": {"A":{"x":0.4,"y":0.9},"C":{"x":0.6,"y":0.1},"Bactive":false},
            "BelleGlades-Calusa-02": {"A":{"x":0.5,"y":0.8},"Bactive":1},
            "BelleGlades-Calusa-03": null,
            "BelleGlades-Calusa-04": "junk"
        }"#;
        fs::write(&path, json).unwrap();

        let mut store = JsonFileStore::new(&path);
        let first = store.get(&key(1)).unwrap().unwrap();
        assert_eq!(first.tee, Some(NormPoint::new(0.4, 0.9)));
        assert!(store.get(&key(2)).unwrap().unwrap().target_active);
        assert!(store.get(&key(3)).unwrap().is_none());
        assert!(store.get(&key(4)).unwrap().is_none());
        assert_eq!(store.read_all().unwrap().len(), 2);

        set_hole_defaults(&mut store, &key(5), HoleRecord::default()).unwrap();
        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["BelleGlades-Calusa-02"]["Bactive"], serde_json::json!(1));
        assert_eq!(raw["BelleGlades-Calusa-04"], serde_json::json!("junk"));
        assert!(store.get(&key(5)).unwrap().is_some());

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_restore_falls_back() {
        let record = HoleRecord {
            tee: None,
            green: Some(NormPoint::new(0.5, 0.05)),
            target: None,
            target_active: true,
        };
        let (cal, target) = record.restore(&Calibration::default());
        assert_eq!(cal.tee, Calibration::default().tee);
        assert_eq!(cal.green, NormPoint::new(0.5, 0.05));
        assert!(target.point.distance_to(&NormPoint::new(0.5, 0.4)) < 1e-12);
        assert!(target.active);
    }

    #[test]
    fn test_file_store_roundtrip() {
        let path = scratch("fairway_test_store_roundtrip");
        let mut store = JsonFileStore::new(&path);
        assert!(store.get(&key(1)).unwrap().is_none());

        let cal = Calibration::new(NormPoint::new(0.45, 0.8), NormPoint::new(0.55, 0.2));
        let target = Target {
            point: NormPoint::new(0.5, 0.5),
            active: true,
        };
        set_hole_defaults(&mut store, &key(1), HoleRecord::capture(&cal, &target)).unwrap();
        set_hole_defaults(&mut store, &key(2), HoleRecord::default()).unwrap();

        let reopened = JsonFileStore::new(&path);
        let back = get_hole_defaults(&reopened, &key(1)).unwrap().unwrap();
        assert_eq!(back.restore(&Calibration::default()), (cal, target));
        assert_eq!(reopened.read_all().unwrap().len(), 2);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_corrupt_file_is_reported_not_overwritten() {
        let path = scratch("fairway_test_store_corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::new(&path);
        assert!(matches!(store.get(&key(1)), Err(StoreError::Parse { .. })));
        assert!(store.set(&key(1), HoleRecord::default()).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
