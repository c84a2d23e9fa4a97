//! Form draft buffers and field-local validation.

use chrono::NaiveDate;
use shared::domain::{Person, PersonFields, MAX_AGE, NATIONAL_ID_LEN};
use shared::error::{Field, FieldError};

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_COLOR_LEN: usize = 3;

const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// The form's edit buffers, held as text exactly as typed. Age and
/// birthdate only become typed values when validation succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonDraft {
    pub name: String,
    pub surname: String,
    pub age: String,
    pub national_id: String,
    pub birthdate: String,
    pub favorite_color: String,
    pub sex: String,
}

/// Per-field validation outcome for a draft; `None` means the field passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftValidation {
    pub name: Option<FieldError>,
    pub surname: Option<FieldError>,
    pub age: Option<FieldError>,
    pub national_id: Option<FieldError>,
    pub birthdate: Option<FieldError>,
    pub favorite_color: Option<FieldError>,
    pub sex: Option<FieldError>,
}

impl DraftValidation {
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        match field {
            Field::Name => self.name.as_ref(),
            Field::Surname => self.surname.as_ref(),
            Field::Age => self.age.as_ref(),
            Field::NationalId => self.national_id.as_ref(),
            Field::Birthdate => self.birthdate.as_ref(),
            Field::FavoriteColor => self.favorite_color.as_ref(),
            Field::Sex => self.sex.as_ref(),
        }
    }

    pub fn is_valid(&self) -> bool {
        Field::ALL.iter().all(|field| self.error_for(*field).is_none())
    }
}

fn required_with_min(value: &str, min: usize) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(FieldError::Required)
    } else if trimmed.chars().count() < min {
        Some(FieldError::TooShort { min })
    } else {
        None
    }
}

fn validate_age(value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(FieldError::Required);
    }
    match trimmed.parse::<i64>() {
        Ok(age) if (0..=MAX_AGE as i64).contains(&age) => None,
        _ => Some(FieldError::OutOfRange {
            min: 0,
            max: MAX_AGE as i64,
        }),
    }
}

fn validate_national_id(value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Some(FieldError::Required)
    } else if trimmed.chars().count() != NATIONAL_ID_LEN {
        Some(FieldError::WrongLength {
            expected: NATIONAL_ID_LEN,
        })
    } else {
        None
    }
}

fn validate_birthdate(value: &str) -> Option<FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(FieldError::Required);
    }
    match NaiveDate::parse_from_str(trimmed, BIRTHDATE_FORMAT) {
        Ok(_) => None,
        Err(_) => Some(FieldError::InvalidDate),
    }
}

fn required(value: &str) -> Option<FieldError> {
    if value.trim().is_empty() {
        Some(FieldError::Required)
    } else {
        None
    }
}

impl PersonDraft {
    /// Runs every field-local check. Field order mirrors the form layout.
    pub fn validate(&self) -> DraftValidation {
        DraftValidation {
            name: required_with_min(&self.name, MIN_NAME_LEN),
            surname: required_with_min(&self.surname, MIN_NAME_LEN),
            age: validate_age(&self.age),
            national_id: validate_national_id(&self.national_id),
            birthdate: validate_birthdate(&self.birthdate),
            favorite_color: required_with_min(&self.favorite_color, MIN_COLOR_LEN),
            sex: required(&self.sex),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    /// Converts the buffers into typed field values, or `None` when any
    /// check fails. Text fields are committed trimmed.
    pub fn to_fields(&self) -> Option<PersonFields> {
        if !self.is_valid() {
            return None;
        }
        let age = self.age.trim().parse::<u8>().ok()?;
        let birthdate = NaiveDate::parse_from_str(self.birthdate.trim(), BIRTHDATE_FORMAT).ok()?;
        Some(PersonFields {
            name: self.name.trim().to_string(),
            surname: self.surname.trim().to_string(),
            age,
            national_id: self.national_id.trim().to_string(),
            birthdate,
            favorite_color: self.favorite_color.trim().to_string(),
            sex: self.sex.trim().to_string(),
        })
    }

    /// Fills the buffers from a stored record's current values.
    pub fn populate_from(&mut self, person: &Person) {
        self.name = person.fields.name.clone();
        self.surname = person.fields.surname.clone();
        self.age = person.fields.age.to_string();
        self.national_id = person.fields.national_id.clone();
        self.birthdate = person.fields.birthdate.format(BIRTHDATE_FORMAT).to_string();
        self.favorite_color = person.fields.favorite_color.clone();
        self.sex = person.fields.sex.clone();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
