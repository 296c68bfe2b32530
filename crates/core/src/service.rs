//! In-memory patient store.
//!
//! [`PatientService`] owns the patient list and the diagnosis catalog for the lifetime of the
//! process. It is cheap to clone; clones share the same underlying store, so one instance can
//! be handed to every request handler.

use crate::config::CoreConfig;
use crate::diagnosis::Diagnosis;
use crate::patient::{Entry, NewPatient, NonSensitivePatient, Patient};
use crate::seed::SeedData;
use crate::{PatientError, PatientResult};
use entries::NewEntry;
use patientor_uuid::RecordId;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Pure patient data operations - no API concerns
#[derive(Clone, Debug, Default)]
pub struct PatientService {
    patients: Arc<RwLock<Vec<Patient>>>,
    diagnoses: Arc<Vec<Diagnosis>>,
}

impl PatientService {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given seed data.
    pub fn from_seed(seed: SeedData) -> Self {
        Self {
            patients: Arc::new(RwLock::new(seed.patients)),
            diagnoses: Arc::new(seed.diagnoses),
        }
    }

    /// Creates a store from configuration, loading the seed file if one is configured.
    ///
    /// # Errors
    ///
    /// Returns whatever [`SeedData::load`] returns for the configured seed file.
    pub fn from_config(cfg: &CoreConfig) -> PatientResult<Self> {
        match cfg.seed_file() {
            Some(path) => Ok(Self::from_seed(SeedData::load(path)?)),
            None => Ok(Self::new()),
        }
    }

    /// Returns the diagnosis catalog.
    pub fn diagnoses(&self) -> &[Diagnosis] {
        &self.diagnoses
    }

    /// Lists every patient with all fields.
    pub fn list_patients(&self) -> PatientResult<Vec<Patient>> {
        Ok(self.read()?.clone())
    }

    /// Lists every patient without `ssn` and entries.
    pub fn list_non_sensitive(&self) -> PatientResult<Vec<NonSensitivePatient>> {
        Ok(self.read()?.iter().map(NonSensitivePatient::from).collect())
    }

    /// Looks up a patient by identifier.
    pub fn patient_by_id(&self, id: &RecordId) -> PatientResult<Option<Patient>> {
        Ok(self.read()?.iter().find(|p| p.id == *id).cloned())
    }

    /// Stores a new patient under a freshly generated identifier.
    ///
    /// # Returns
    ///
    /// The stored patient, with an empty entry list.
    pub fn add_patient(&self, new_patient: NewPatient) -> PatientResult<Patient> {
        let patient = new_patient.into_patient();
        self.write()?.push(patient.clone());
        tracing::info!("added patient {}", patient.id);
        Ok(patient)
    }

    /// Appends an entry to a patient's record under a freshly generated identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PatientError::PatientNotFound`] if no patient has `patient_id`.
    pub fn add_entry(&self, patient_id: &RecordId, new_entry: NewEntry) -> PatientResult<Entry> {
        let mut patients = self.write()?;
        let patient = patients
            .iter_mut()
            .find(|p| p.id == *patient_id)
            .ok_or(PatientError::PatientNotFound(*patient_id))?;

        let entry = Entry::assign(new_entry);
        patient.entries.push(entry.clone());
        tracing::info!(
            "added {} entry {} to patient {}",
            entry.entry.entry_type(),
            entry.id,
            patient_id
        );
        Ok(entry)
    }

    fn read(&self) -> PatientResult<RwLockReadGuard<'_, Vec<Patient>>> {
        self.patients.read().map_err(|_| PatientError::StorePoisoned)
    }

    fn write(&self) -> PatientResult<RwLockWriteGuard<'_, Vec<Patient>>> {
        self.patients.write().map_err(|_| PatientError::StorePoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patient::Gender;
    use entries::{BaseEntry, Discharge};

    fn new_patient(name: &str) -> NewPatient {
        NewPatient {
            name: name.into(),
            date_of_birth: "1979-01-30".into(),
            ssn: "300179-77A".into(),
            gender: Gender::Female,
            occupation: "Technician".into(),
        }
    }

    fn hospital_entry() -> NewEntry {
        NewEntry::Hospital {
            base: BaseEntry {
                description: "Healing time appr. 2 weeks.".into(),
                date: "2015-01-02".into(),
                specialist: "MD House".into(),
                diagnosis_codes: vec!["S62.5".into()],
            },
            discharge: Discharge {
                date: "2015-01-16".into(),
                criteria: "Thumb has healed.".into(),
            },
        }
    }

    #[test]
    fn add_patient_assigns_id_and_stores() {
        let service = PatientService::new();
        let patient = service.add_patient(new_patient("Dana Scully")).expect("add patient");

        assert!(patient.entries.is_empty());
        let found = service
            .patient_by_id(&patient.id)
            .expect("lookup")
            .expect("patient exists");
        assert_eq!(found, patient);
    }

    #[test]
    fn add_entry_appends_to_owning_patient() {
        let service = PatientService::new();
        let first = service.add_patient(new_patient("Dana Scully")).expect("add");
        let second = service.add_patient(new_patient("Fox Mulder")).expect("add");

        let entry = service
            .add_entry(&second.id, hospital_entry())
            .expect("add entry");
        assert_eq!(entry.entry, hospital_entry());

        let stored = service.patient_by_id(&second.id).expect("lookup").expect("exists");
        assert_eq!(stored.entries, vec![entry]);

        let untouched = service.patient_by_id(&first.id).expect("lookup").expect("exists");
        assert!(untouched.entries.is_empty());
    }

    #[test]
    fn add_entry_to_unknown_patient_fails() {
        let service = PatientService::new();
        let missing = RecordId::new();

        let err = service
            .add_entry(&missing, hospital_entry())
            .expect_err("unknown patient");
        assert!(matches!(err, PatientError::PatientNotFound(id) if id == missing));
    }

    #[test]
    fn clones_share_the_store() {
        let service = PatientService::new();
        let clone = service.clone();
        clone.add_patient(new_patient("Walter Skinner")).expect("add");

        assert_eq!(service.list_patients().expect("list").len(), 1);
    }

    #[test]
    fn non_sensitive_listing_matches_patients() {
        let service = PatientService::new();
        let patient = service.add_patient(new_patient("Dana Scully")).expect("add");

        let listed = service.list_non_sensitive().expect("list");
        assert_eq!(listed, vec![NonSensitivePatient::from(&patient)]);
    }

    #[test]
    fn from_seed_exposes_patients_and_diagnoses() {
        let seed = SeedData::from_json(
            r#"{ "diagnoses": [ { "code": "J10.1", "name": "Influenza" } ],
                 "patients": [ { "id": "d2773336-f723-11e9-8f0b-362b9e155667", "name": "John McClane",
                   "dateOfBirth": "1986-07-09", "ssn": "090786-122X", "gender": "male",
                   "occupation": "New york city cop" } ] }"#,
        )
        .expect("seed");

        let service = PatientService::from_seed(seed);
        assert_eq!(service.diagnoses()[0].code, "J10.1");

        let id = RecordId::parse("d2773336-f723-11e9-8f0b-362b9e155667").expect("id");
        assert!(service.patient_by_id(&id).expect("lookup").is_some());
    }

    #[test]
    fn from_config_without_seed_is_empty() {
        let cfg = CoreConfig::new("127.0.0.1:0".into(), None).expect("config");
        let service = PatientService::from_config(&cfg).expect("service");
        assert!(service.list_patients().expect("list").is_empty());
        assert!(service.diagnoses().is_empty());
    }
}
