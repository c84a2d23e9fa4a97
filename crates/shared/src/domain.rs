use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(PersonId);

/// Upper bound for the age field, inclusive.
pub const MAX_AGE: u8 = 125;

/// Required length of a national id, in characters.
pub const NATIONAL_ID_LEN: usize = 9;

/// The seven editable attributes of a person, without identity.
///
/// This is the value object the store accepts for both append and in-place
/// update; a `PersonFields` is only ever built from a draft that passed
/// validation, so stored records are well-formed by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonFields {
    pub name: String,
    pub surname: String,
    pub age: u8,
    pub national_id: String,
    pub birthdate: NaiveDate,
    pub favorite_color: String,
    pub sex: String,
}

/// A stored record. Identity is the generated id, never field equality:
/// two persons with identical fields are distinct records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    #[serde(flatten)]
    pub fields: PersonFields,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fields.name, self.fields.surname)
    }
}
