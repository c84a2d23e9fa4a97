use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The form fields a validation failure can be attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Surname,
    Age,
    NationalId,
    Birthdate,
    FavoriteColor,
    Sex,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Surname,
        Field::Age,
        Field::NationalId,
        Field::Birthdate,
        Field::FavoriteColor,
        Field::Sex,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Surname => "Surname",
            Field::Age => "Age",
            Field::NationalId => "National ID",
            Field::Birthdate => "Birthdate",
            Field::FavoriteColor => "Favorite color",
            Field::Sex => "Sex",
        }
    }
}

/// Field-local validation failure. Surfaced as an inline form hint, never
/// as an `Err` from a controller operation: invalid input refuses the
/// action silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required")]
    Required,
    #[error("must be at least {min} characters")]
    TooShort { min: usize },
    #[error("must be exactly {expected} characters")]
    WrongLength { expected: usize },
    #[error("must be a whole number between {min} and {max}")]
    OutOfRange { min: i64, max: i64 },
    #[error("must be a date in YYYY-MM-DD form")]
    InvalidDate,
}
