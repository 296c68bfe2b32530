//! Seed data for the in-memory patient store.
//!
//! The seed file is a JSON document of the form:
//!
//! ```text
//! {
//!   "diagnoses": [ { "code": "M24.2", "name": "Disorder of ligament", "latin": "..." } ],
//!   "patients":  [ { "id": "...", "name": "...", "dateOfBirth": "...", "ssn": "...",
//!                    "gender": "male", "occupation": "...", "entries": [ ... ] } ]
//! }
//! ```
//!
//! Both keys are optional. Seeded entries are trusted as stored records and are not passed
//! through the entry parser.

use crate::diagnosis::Diagnosis;
use crate::patient::Patient;
use crate::{PatientError, PatientResult};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedData {
    #[serde(default)]
    pub diagnoses: Vec<Diagnosis>,
    #[serde(default)]
    pub patients: Vec<Patient>,
}

impl SeedData {
    /// Parse seed data from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::Translation`] naming the failing path when the document does
    /// not match the seed schema, [`PatientError::SeedParse`] when it is not JSON, or
    /// [`PatientError::InvalidInput`] when two patients share an identifier.
    pub fn from_json(json_text: &str) -> PatientResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(json_text);
        let seed: SeedData = match serde_path_to_error::deserialize(&mut deserializer) {
            Ok(seed) => seed,
            Err(err) if err.inner().is_syntax() || err.inner().is_eof() => {
                return Err(PatientError::SeedParse(err.into_inner()));
            }
            Err(err) => return Err(PatientError::from_path_error(err)),
        };
        deserializer.end().map_err(PatientError::SeedParse)?;

        let mut seen = HashSet::new();
        if let Some(dup) = seed.patients.iter().find(|p| !seen.insert(p.id)) {
            return Err(PatientError::InvalidInput(format!(
                "duplicate patient id in seed data: {}",
                dup.id
            )));
        }

        Ok(seed)
    }

    /// Read and parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::SeedRead`] if the file cannot be read, otherwise whatever
    /// [`SeedData::from_json`] returns.
    pub fn load(path: &Path) -> PatientResult<Self> {
        let text = std::fs::read_to_string(path).map_err(PatientError::SeedRead)?;
        let seed = Self::from_json(&text)?;
        tracing::info!(
            "loaded seed file {}: {} patients, {} diagnoses",
            path.display(),
            seed.patients.len(),
            seed.diagnoses.len()
        );
        Ok(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SEED: &str = r#"{
  "diagnoses": [
    { "code": "M24.2", "name": "Disorder of ligament", "latin": "Morbositas ligamenti" },
    { "code": "Z57.1", "name": "Occupational exposure to radiation" }
  ],
  "patients": [
    {
      "id": "d2773336-f723-11e9-8f0b-362b9e155667",
      "name": "John McClane",
      "dateOfBirth": "1986-07-09",
      "ssn": "090786-122X",
      "gender": "male",
      "occupation": "New york city cop",
      "entries": [
        {
          "id": "d811e46d-70b3-4d90-b090-4535c7cf8fb1",
          "date": "2015-01-02",
          "type": "Hospital",
          "specialist": "MD House",
          "diagnosisCodes": ["S62.5"],
          "description": "Healing time appr. 2 weeks. patient doesn't remember how he got the injury.",
          "discharge": { "date": "2015-01-16", "criteria": "Thumb has healed." }
        }
      ]
    }
  ]
}"#;

    #[test]
    fn parses_sample_seed() {
        let seed = SeedData::from_json(SEED).expect("valid seed");
        assert_eq!(seed.diagnoses.len(), 2);
        assert_eq!(seed.diagnoses[1].latin, None);
        assert_eq!(seed.patients.len(), 1);
        assert_eq!(seed.patients[0].entries.len(), 1);
    }

    #[test]
    fn empty_object_is_an_empty_seed() {
        let seed = SeedData::from_json("{}").expect("empty seed");
        assert!(seed.diagnoses.is_empty());
        assert!(seed.patients.is_empty());
    }

    #[test]
    fn rejects_bad_patient_with_path() {
        let err = SeedData::from_json(
            r#"{ "patients": [ { "id": "not-an-id", "name": "x", "dateOfBirth": "1986-07-09",
                 "ssn": "1", "gender": "male", "occupation": "cop" } ] }"#,
        )
        .expect_err("bad id");
        match err {
            PatientError::Translation { path, .. } => assert!(path.starts_with("patients[0]")),
            other => panic!("expected Translation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        let err = SeedData::from_json("{ \"patients\": [").expect_err("truncated");
        assert!(matches!(err, PatientError::SeedParse(_)));
    }

    #[test]
    fn rejects_duplicate_patient_ids() {
        let patient = r#"{ "id": "d2773336-f723-11e9-8f0b-362b9e155667", "name": "x",
            "dateOfBirth": "1986-07-09", "ssn": "1", "gender": "other", "occupation": "cop" }"#;
        let text = format!(r#"{{ "patients": [ {patient}, {patient} ] }}"#);

        let err = SeedData::from_json(&text).expect_err("duplicate ids");
        assert!(matches!(err, PatientError::InvalidInput(msg) if msg.contains("duplicate")));
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(SEED.as_bytes()).expect("write seed");

        let seed = SeedData::load(file.path()).expect("load seed");
        assert_eq!(seed.patients[0].name, "John McClane");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = SeedData::load(&dir.path().join("missing.json")).expect_err("missing");
        assert!(matches!(err, PatientError::SeedRead(_)));
    }
}
