//! Synchronous validation rules for product fields
//!
//! Rules never fail the caller: every check produces a list of structured
//! violations, empty when the value is acceptable.

use super::aggregate::{format_iso_date, Product};
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

// ============================================================================
// Fields
// ============================================================================

/// Editable fields of the product form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductField {
    Id,
    Name,
    Description,
    Logo,
    DateRelease,
    DateRevision,
}

impl ProductField {
    pub const ALL: [ProductField; 6] = [
        ProductField::Id,
        ProductField::Name,
        ProductField::Description,
        ProductField::Logo,
        ProductField::DateRelease,
        ProductField::DateRevision,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Id => "id",
            ProductField::Name => "name",
            ProductField::Description => "description",
            ProductField::Logo => "logo",
            ProductField::DateRelease => "date_release",
            ProductField::DateRevision => "date_revision",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProductField::Id => "ID",
            ProductField::Name => "Name",
            ProductField::Description => "Description",
            ProductField::Logo => "Logo",
            ProductField::DateRelease => "Release date",
            ProductField::DateRevision => "Revision date",
        }
    }

    /// Read the field value from a product
    pub fn get<'a>(&self, product: &'a Product) -> &'a str {
        match self {
            ProductField::Id => &product.id,
            ProductField::Name => &product.name,
            ProductField::Description => &product.description,
            ProductField::Logo => &product.logo,
            ProductField::DateRelease => &product.date_release,
            ProductField::DateRevision => &product.date_revision,
        }
    }

    /// Write the field value into a product
    pub fn set(&self, product: &mut Product, value: String) {
        match self {
            ProductField::Id => product.id = value,
            ProductField::Name => product.name = value,
            ProductField::Description => product.description = value,
            ProductField::Logo => product.logo = value,
            ProductField::DateRelease => product.date_release = value,
            ProductField::DateRevision => product.date_revision = value,
        }
    }
}

impl std::fmt::Display for ProductField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// Violations
// ============================================================================

/// Structured violation of a field constraint
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("This field is required.")]
    Required,

    #[error("Must contain at least {required} characters (currently {actual}).")]
    MinLength { required: usize, actual: usize },

    #[error("Must not exceed {required} characters (currently {actual}).")]
    MaxLength { required: usize, actual: usize },

    #[error("The date must be {required_min_date} or later.")]
    MinDate {
        required_min_date: String,
        actual_date: String,
    },

    #[error("This ID is already registered.")]
    IdNotUnique,
}

impl FieldError {
    /// Stable identifier of the violated constraint
    pub fn key(&self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::MinLength { .. } => "minlength",
            FieldError::MaxLength { .. } => "maxlength",
            FieldError::MinDate { .. } => "minDate",
            FieldError::IdNotUnique => "idNotUnique",
        }
    }
}

// ============================================================================
// Rules
// ============================================================================

/// Validation rules for a single field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationRules {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    /// Earliest accepted ISO date, captured when the rules were built
    pub min_date: Option<String>,
}

impl ValidationRules {
    pub const fn required() -> Self {
        Self {
            required: true,
            min_length: None,
            max_length: None,
            min_date: None,
        }
    }

    /// Required with inclusive length bounds
    pub const fn length(min: usize, max: usize) -> Self {
        Self {
            required: true,
            min_length: Some(min),
            max_length: Some(max),
            min_date: None,
        }
    }

    pub fn with_min_date(mut self, min_date: impl Into<String>) -> Self {
        self.min_date = Some(min_date.into());
        self
    }

    /// Check a value against the rules.
    ///
    /// An empty value only ever reports `Required`; the length and date
    /// constraints apply to non-empty values.
    pub fn check(&self, value: &str) -> Vec<FieldError> {
        let mut errors = Vec::new();

        if value.is_empty() {
            if self.required {
                errors.push(FieldError::Required);
            }
            return errors;
        }

        let actual = value.chars().count();
        if let Some(min) = self.min_length {
            if actual < min {
                errors.push(FieldError::MinLength {
                    required: min,
                    actual,
                });
            }
        }
        if let Some(max) = self.max_length {
            if actual > max {
                errors.push(FieldError::MaxLength {
                    required: max,
                    actual,
                });
            }
        }

        // Fixed-width YYYY-MM-DD sorts like the date itself
        if let Some(min_date) = &self.min_date {
            if value < min_date.as_str() {
                errors.push(FieldError::MinDate {
                    required_min_date: min_date.clone(),
                    actual_date: value.to_string(),
                });
            }
        }

        errors
    }
}

/// Rule set of the product form.
///
/// The minimum release date is fixed when the set is built so that
/// validation stays deterministic for the whole editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRules {
    min_release_date: String,
}

impl ProductRules {
    pub const ID_LENGTH: (usize, usize) = (3, 10);
    pub const NAME_LENGTH: (usize, usize) = (6, 100);
    pub const DESCRIPTION_LENGTH: (usize, usize) = (10, 200);

    pub fn new(today: NaiveDate) -> Self {
        Self {
            min_release_date: format_iso_date(today),
        }
    }

    /// Rules anchored at the calendar date of `now` in its own time zone
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::new(now.date_naive())
    }

    /// Rules anchored at the user's local calendar date
    pub fn for_today() -> Self {
        Self::at(&Local::now())
    }

    pub fn min_release_date(&self) -> &str {
        &self.min_release_date
    }

    pub fn rules_for(&self, field: ProductField) -> ValidationRules {
        match field {
            ProductField::Id => ValidationRules::length(Self::ID_LENGTH.0, Self::ID_LENGTH.1),
            ProductField::Name => {
                ValidationRules::length(Self::NAME_LENGTH.0, Self::NAME_LENGTH.1)
            }
            ProductField::Description => {
                ValidationRules::length(Self::DESCRIPTION_LENGTH.0, Self::DESCRIPTION_LENGTH.1)
            }
            ProductField::Logo | ProductField::DateRevision => ValidationRules::required(),
            ProductField::DateRelease => {
                ValidationRules::required().with_min_date(self.min_release_date.clone())
            }
        }
    }

    pub fn validate_field(&self, field: ProductField, value: &str) -> Vec<FieldError> {
        self.rules_for(field).check(value)
    }
}
