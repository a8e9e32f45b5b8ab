use std::path::Path;

use anyhow::Context;
use bezier_profile::{CurveDescription, GapRow, ProfileDescription, SampleRow};
use serde::{Deserialize, Serialize};

/// What an editor file holds: one curve, or an upper and a lower curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    Pair(ProfileDescription),
    Single(CurveDescription),
}

/// The rows produced by the last resample.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Rows {
    Single(Vec<SampleRow>),
    Pair(Vec<GapRow>),
}

impl Document {
    pub fn from_json(bytes: &[u8]) -> anyhow::Result<Document> {
        serde_json::from_slice(bytes).context("not a curve or curve pair description")
    }

    pub fn load(path: &Path) -> anyhow::Result<Document> {
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        let doc = Document::from_json(&bytes)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        log::info!("loaded {}", path.display());
        Ok(doc)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize curves")
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("saved curves to {}", path.display());
        Ok(())
    }

    pub fn curve_count(&self) -> usize {
        match self {
            Document::Pair(_) => 2,
            Document::Single(_) => 1,
        }
    }
}

impl Default for Rows {
    fn default() -> Self {
        Rows::Single(Vec::new())
    }
}

impl Rows {
    pub fn len(&self) -> usize {
        match self {
            Rows::Single(rows) => rows.len(),
            Rows::Pair(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The normalized x of every row.
    pub fn xs(&self) -> Vec<f64> {
        match self {
            Rows::Single(rows) => rows.iter().map(|r| r.x).collect(),
            Rows::Pair(rows) => rows.iter().map(|r| r.x).collect(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string(self).context("failed to serialize rows")
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("saved {} rows to {}", self.len(), path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_document_kind() {
        let single = br#"[{"pt":[0,0]},{"cp1":[1,1],"cp2":[2,2],"pt":[3,3]}]"#;
        let doc = Document::from_json(single).unwrap();
        assert_eq!(doc.curve_count(), 1);

        let pair = br#"{"curve1":[{"pt":[0,0]}],"curve2":[{"pt":[0,100]}]}"#;
        let doc = Document::from_json(pair).unwrap();
        assert_eq!(doc.curve_count(), 2);

        assert!(Document::from_json(b"{\"curve1\": 3}").is_err());
    }

    #[test]
    fn document_json_round_trip() {
        let pair = br#"{"curve1":[{"pt":[0,0]}],"curve2":[{"pt":[0,100]}]}"#;
        let doc = Document::from_json(pair).unwrap();
        let again = Document::from_json(doc.to_json().unwrap().as_bytes()).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn rows_serialize_as_plain_arrays() {
        let rows = Rows::Pair(vec![GapRow {
            x: 0.0,
            y: 0.5,
            y2: 0.75,
            gap: 125.0,
        }]);
        assert_eq!(rows.to_json().unwrap(), r#"[{"x":0.0,"y":0.5,"y2":0.75,"gap":125.0}]"#);
        assert_eq!(rows.xs(), vec![0.0]);
        assert!(Rows::default().is_empty());
    }

    #[test]
    fn save_writes_what_load_reads() {
        let dir = std::env::temp_dir().join(format!("profiletoy-save-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let doc = Document::from_json(br#"[{"pt":[0,0]},{"cp1":[1,1],"cp2":[2,2],"pt":[3,3]}]"#).unwrap();
        let file = dir.join("curve.json");
        doc.save(&file).unwrap();
        assert_eq!(Document::load(&file).unwrap(), doc);

        let rows = Rows::Single(vec![SampleRow { x: 0.0, y: 0.5 }]);
        let file = dir.join("rows.json");
        rows.save(&file).unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), rows.to_json().unwrap());
        assert!(Document::load(&dir.join("missing.json")).is_err());
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
