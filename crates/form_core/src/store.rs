//! Session-scoped in-memory record store.

use shared::domain::{Person, PersonFields, PersonId};
use tracing::debug;

/// Ordered sequence of person records, exclusively owned by the store.
///
/// Callers refer to records by `PersonId`, assigned from a monotonically
/// increasing counter at append time and never reused within a session.
/// Operations on a missing id are no-ops, not errors.
#[derive(Debug, Default)]
pub struct RecordStore {
    persons: Vec<Person>,
    next_id: i64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new record and returns its freshly assigned id.
    pub fn append(&mut self, fields: PersonFields) -> PersonId {
        let id = PersonId(self.next_id);
        self.next_id += 1;
        debug!(id = id.0, name = %fields.name, "appended person record");
        self.persons.push(Person { id, fields });
        id
    }

    /// Removes every record whose id matches, in a single call. Returns
    /// the number of records removed; 0 for an unknown id.
    pub fn remove_all(&mut self, id: PersonId) -> usize {
        let before = self.persons.len();
        self.persons.retain(|person| person.id != id);
        let removed = before - self.persons.len();
        if removed > 0 {
            debug!(id = id.0, removed, "removed person records");
        }
        removed
    }

    /// Overwrites the fields of the record with the given id, keeping its
    /// position in the list. Returns `false` for an unknown id.
    pub fn update_in_place(&mut self, id: PersonId, fields: PersonFields) -> bool {
        match self.persons.iter_mut().find(|person| person.id == id) {
            Some(person) => {
                person.fields = fields;
                debug!(id = id.0, "updated person record in place");
                true
            }
            None => false,
        }
    }

    pub fn list(&self) -> &[Person] {
        &self.persons
    }

    pub fn get(&self, id: PersonId) -> Option<&Person> {
        self.persons.iter().find(|person| person.id == id)
    }

    pub fn len(&self) -> usize {
        self.persons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.persons.is_empty()
    }
}
