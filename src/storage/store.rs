//! In-memory employee store
//!
//! The store owns the ordered list of records. Insertion order is the
//! persisted order and the display order. Every mutation rewrites the
//! backing file; if that write fails the mutation stays applied in memory
//! and the error is returned so the caller can report it. A mutation that
//! could never be written (unstorable text, no IDs left) is rejected before
//! it touches memory.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::codec::{self, CodecError};
use super::file::{LoadError, LoadPolicy, Loaded, RecordFile, SkippedLine};
use crate::domain::{Employee, EmployeeId, EmployeeUpdate, NewEmployee};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Employee not found: {0}")]
    NotFound(EmployeeId),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot store employee {id}: {source}")]
    Encode {
        id: EmployeeId,
        #[source]
        source: CodecError,
    },

    #[error("No employee IDs left to assign")]
    IdsExhausted,
}

impl StoreError {
    /// Returns true if the error is a missing record rather than a failed save
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// How new records get their IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdPolicy {
    /// Monotonic counter starting after the highest loaded ID
    #[default]
    Sequential,
    /// Number of records held plus one; may reuse a live ID after a delete
    Count,
}

/// What happened while opening a store
#[derive(Debug, Default)]
pub struct LoadReport {
    /// False when there was no backing file yet
    pub existed: bool,

    /// Malformed lines dropped by a lenient load
    pub skipped: Vec<SkippedLine>,
}

/// Ordered collection of employees backed by a [`RecordFile`]
#[derive(Debug)]
pub struct EmployeeStore {
    employees: Vec<Employee>,
    file: RecordFile,
    id_policy: IdPolicy,
    /// `None` once the largest ID has been handed out or loaded
    next_id: Option<EmployeeId>,
}

impl EmployeeStore {
    /// Creates a store over an initial set of records
    pub fn new(file: RecordFile, employees: Vec<Employee>, id_policy: IdPolicy) -> Self {
        let next_id = employees
            .iter()
            .map(|e| e.id)
            .max()
            .map_or(Some(EmployeeId::first()), |id| id.next());

        Self {
            employees,
            file,
            id_policy,
            next_id,
        }
    }

    /// Loads the backing file and creates a store over its records
    pub fn open(
        file: RecordFile,
        id_policy: IdPolicy,
        load_policy: LoadPolicy,
    ) -> Result<(Self, LoadReport), LoadError> {
        let Loaded {
            employees,
            skipped,
            existed,
        } = file.load(load_policy)?;

        let store = Self::new(file, employees, id_policy);
        Ok((store, LoadReport { existed, skipped }))
    }

    /// Returns the backing file
    pub fn file(&self) -> &RecordFile {
        &self.file
    }

    /// Returns the ID policy in use
    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the store holds no records
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Creates a record at the end of the collection and saves
    pub fn create(&mut self, fields: NewEmployee) -> Result<Employee, StoreError> {
        let id = self.candidate_id().ok_or(StoreError::IdsExhausted)?;
        let employee = Employee::new(id, fields);
        ensure_storable(&employee)?;

        self.advance_past(id);
        self.employees.push(employee.clone());
        self.save()?;
        Ok(employee)
    }

    /// Finds the first record with the given ID
    pub fn find_by_id(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Updates a record in place and saves
    pub fn update(&mut self, id: EmployeeId, update: EmployeeUpdate) -> Result<Employee, StoreError> {
        let index = self
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let mut updated = self.employees[index].clone();
        updated.apply(update);
        ensure_storable(&updated)?;

        self.employees[index] = updated.clone();
        self.save()?;
        Ok(updated)
    }

    /// Removes the first record with the given ID and saves
    pub fn delete(&mut self, id: EmployeeId) -> Result<Employee, StoreError> {
        let index = self
            .employees
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.employees.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Returns all records in store order
    pub fn list_all(&self) -> &[Employee] {
        &self.employees
    }

    /// Returns records whose name contains the query, ignoring case
    pub fn search_by_name(&self, query: &str) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|e| e.name_contains(query))
            .collect()
    }

    /// Writes the current state to the backing file
    pub fn save(&self) -> Result<(), StoreError> {
        self.file.save(&self.employees)
    }

    fn candidate_id(&self) -> Option<EmployeeId> {
        match self.id_policy {
            IdPolicy::Sequential => self.next_id,
            IdPolicy::Count => EmployeeId::following_count(self.employees.len()),
        }
    }

    fn advance_past(&mut self, id: EmployeeId) {
        self.next_id = match (self.next_id, id.next()) {
            (Some(current), Some(after)) => Some(current.max(after)),
            _ => None,
        };
    }
}

fn ensure_storable(employee: &Employee) -> Result<(), StoreError> {
    codec::encode(employee)
        .map(|_| ())
        .map_err(|source| StoreError::Encode {
            id: employee.id,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashSet;
    use std::fs;
    use tempfile::TempDir;

    fn fields(name: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            department: "Operations".to_string(),
            position: "Analyst".to_string(),
            salary: 48000.0,
            date_of_hire: NaiveDate::from_ymd_opt(2023, 9, 4).unwrap(),
        }
    }

    fn empty_store(dir: &TempDir, policy: IdPolicy) -> EmployeeStore {
        let file = RecordFile::new(dir.path().join("employees.csv"));
        EmployeeStore::new(file, Vec::new(), policy)
    }

    fn id(value: u32) -> EmployeeId {
        EmployeeId::new(value).unwrap()
    }

    #[test]
    fn create_assigns_positive_unique_ids() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);

        for name in ["Ann", "Ben", "Cat", "Dan"] {
            store.create(fields(name)).unwrap();
        }

        let ids: HashSet<_> = store.list_all().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), 4);
        assert_eq!(store.list_all()[0].id, id(1));
        assert_eq!(store.list_all()[3].id, id(4));
    }

    #[test]
    fn create_persists_immediately() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);

        store.create(fields("Ann")).unwrap();

        let content = fs::read_to_string(dir.path().join("employees.csv")).unwrap();
        assert_eq!(content, "1,Ann,Operations,Analyst,48000,2023-09-04\n");
    }

    #[test]
    fn sequential_ids_survive_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);

        store.create(fields("Ann")).unwrap();
        store.create(fields("Ben")).unwrap();
        store.create(fields("Cat")).unwrap();
        store.delete(id(2)).unwrap();

        let created = store.create(fields("Dan")).unwrap();
        assert_eq!(created.id, id(4));

        let ids: HashSet<_> = store.list_all().iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), store.len());
    }

    #[test]
    fn count_policy_reuses_live_id_after_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Count);

        store.create(fields("Ann")).unwrap();
        store.create(fields("Ben")).unwrap();
        store.create(fields("Cat")).unwrap();
        store.delete(id(2)).unwrap();

        let created = store.create(fields("Dan")).unwrap();
        assert_eq!(created.id, id(3));

        let with_id_3: Vec<_> = store
            .list_all()
            .iter()
            .filter(|e| e.id == id(3))
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(with_id_3, vec!["Cat", "Dan"]);

        // Lookups see the first match only
        assert_eq!(store.find_by_id(id(3)).unwrap().name, "Cat");
    }

    #[test]
    fn sequential_counter_starts_after_loaded_max() {
        let dir = TempDir::new().unwrap();
        let file = RecordFile::new(dir.path().join("employees.csv"));
        let existing = vec![
            Employee::new(id(7), fields("Ann")),
            Employee::new(id(2), fields("Ben")),
        ];
        let mut store = EmployeeStore::new(file, existing, IdPolicy::Sequential);

        assert_eq!(store.create(fields("Cat")).unwrap().id, id(8));
    }

    #[test]
    fn find_by_id_missing() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir, IdPolicy::Sequential);
        assert!(store.find_by_id(id(1)).is_none());
    }

    #[test]
    fn delete_then_find_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);
        store.create(fields("Ann")).unwrap();
        store.create(fields("Ben")).unwrap();
        store.create(fields("Cat")).unwrap();

        let removed = store.delete(id(2)).unwrap();
        assert_eq!(removed.name, "Ben");
        assert!(store.find_by_id(id(2)).is_none());

        let names: Vec<_> = store.list_all().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Ann", "Cat"]);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);
        store.create(fields("Ann")).unwrap();

        let err = store.delete(id(9)).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_salary_keeps_other_fields() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);
        store.create(fields("Ann")).unwrap();
        store.create(fields("Ben")).unwrap();
        let before = store.find_by_id(id(2)).unwrap().clone();

        store
            .update(
                id(2),
                EmployeeUpdate {
                    salary: Some(51500.5),
                    ..Default::default()
                },
            )
            .unwrap();

        let after = store.find_by_id(id(2)).unwrap();
        assert_eq!(after.salary, 51500.5);
        assert_eq!(after.name, before.name);
        assert_eq!(after.department, before.department);
        assert_eq!(after.position, before.position);
        assert_eq!(after.date_of_hire, before.date_of_hire);

        // Position in the collection is unchanged
        assert_eq!(store.list_all()[1].id, id(2));
    }

    #[test]
    fn update_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);

        let err = store.update(id(1), EmployeeUpdate::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id(1)));
        assert!(!dir.path().join("employees.csv").exists());
    }

    #[test]
    fn search_is_case_insensitive_and_ordered() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);
        store.create(fields("Alice")).unwrap();
        store.create(fields("Bob")).unwrap();
        store.create(fields("alicia")).unwrap();

        let names: Vec<_> = store
            .search_by_name("ali")
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alice", "alicia"]);

        assert!(store.search_by_name("zoe").is_empty());
    }

    #[test]
    fn search_matches_filtered_list() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);
        for name in ["Maria", "MARK", "Omar", "Jo"] {
            store.create(fields(name)).unwrap();
        }

        let expected: Vec<_> = store
            .list_all()
            .iter()
            .filter(|e| e.name.to_lowercase().contains("mar"))
            .collect();
        assert_eq!(store.search_by_name("MaR"), expected);
    }

    #[test]
    fn empty_store_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let store = empty_store(&dir, IdPolicy::Sequential);
        assert!(store.is_empty());
        assert!(store.list_all().is_empty());
        assert!(store.search_by_name("a").is_empty());
    }

    #[test]
    fn open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let file = RecordFile::new(dir.path().join("employees.csv"));

        let (store, report) =
            EmployeeStore::open(file, IdPolicy::Sequential, LoadPolicy::Strict).unwrap();
        assert!(store.is_empty());
        assert!(!report.existed);
    }

    #[test]
    fn save_then_open_round_trips() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir, IdPolicy::Sequential);
        store.create(fields("Ann")).unwrap();
        store.create(fields("Ben")).unwrap();
        store
            .update(
                id(1),
                EmployeeUpdate {
                    position: Some("Lead".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let (reopened, report) = EmployeeStore::open(
            store.file().clone(),
            IdPolicy::Sequential,
            LoadPolicy::Strict,
        )
        .unwrap();
        assert!(report.existed);
        assert_eq!(reopened.list_all(), store.list_all());
    }

    #[test]
    fn unstorable_create_is_rejected_without_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employees.csv");
        let mut store = empty_store(&dir, IdPolicy::Sequential);
        store.create(fields("Ann")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = store.create(fields("Doe, Jane")).unwrap_err();
        assert!(matches!(err, StoreError::Encode { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        // The rejected record did not use up an ID, and saving still works
        let created = store.create(fields("Ben")).unwrap();
        assert_eq!(created.id, id(2));
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "1,Ann,Operations,Analyst,48000,2023-09-04\n2,Ben,Operations,Analyst,48000,2023-09-04\n"
        );
    }

    #[test]
    fn unstorable_update_is_rejected_without_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employees.csv");
        let mut store = empty_store(&dir, IdPolicy::Sequential);
        store.create(fields("Ann")).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let err = store
            .update(
                id(1),
                EmployeeUpdate {
                    department: Some("R&D\nLabs".to_string()),
                    salary: Some(1.0),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Encode { .. }));

        let ann = store.find_by_id(id(1)).unwrap();
        assert_eq!(ann.department, "Operations");
        assert_eq!(ann.salary, 48000.0);
        assert_eq!(fs::read_to_string(&path).unwrap(), before);

        store.create(fields("Ben")).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn sequential_ids_exhausted_after_largest() {
        let dir = TempDir::new().unwrap();
        let file = RecordFile::new(dir.path().join("employees.csv"));
        let existing = vec![Employee::new(id(u32::MAX), fields("Max"))];
        let mut store = EmployeeStore::new(file, existing, IdPolicy::Sequential);

        let err = store.create(fields("New")).unwrap_err();
        assert!(matches!(err, StoreError::IdsExhausted));
        assert_eq!(store.len(), 1);
        assert!(!dir.path().join("employees.csv").exists());

        // Other operations are unaffected
        store.delete(id(u32::MAX)).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn failed_save_keeps_memory_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("employees.csv");
        fs::create_dir_all(path.join("occupied")).unwrap();
        let mut store = EmployeeStore::new(RecordFile::new(&path), Vec::new(), IdPolicy::Sequential);

        let err = store.create(fields("Ann")).unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.list_all()[0].name, "Ann");
    }
}
