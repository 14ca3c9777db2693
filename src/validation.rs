//! Declarative field constraints.
//!
//! A schema is a list of fields, each with its rules. [`validate`] walks the schema over anything
//! implementing [`FieldSource`] and collects every violation in a [`ValidationErrors`], which
//! serializes as `{"field": [{"code": .., "message": .., "params": {..}}]}`.
//!
//! Rules of a field are checked in order and the first violated one is reported, so an empty
//! title is reported as `required` only, not also as too short.

use std::borrow::Cow;

use validator::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present and non empty
    Required,
    /// At least this many characters
    MinLength(usize),
    /// One of the listed values, compared exactly
    OneOf(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSchema {
    pub name: &'static str,
    pub rules: &'static [Rule],
}

/// Gives access to the textual value of a field by its name
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl Rule {
    pub fn is_satisfied_by(&self, value: Option<&str>) -> bool {
        match (self, value) {
            (Rule::Required, value) => value.map(|x| !x.is_empty()).unwrap_or(false),
            (Rule::MinLength(min), Some(value)) => value.chars().count() >= *min,
            (Rule::OneOf(values), Some(value)) => values.contains(&value),
            (_, None) => false,
        }
    }

    pub fn violation(&self) -> ValidationError {
        match self {
            Rule::Required => {
                let mut error = ValidationError::new("required");
                error.message = Some(Cow::from("this field is required"));
                error
            }
            Rule::MinLength(min) => {
                let mut error = ValidationError::new("min_length");
                error.message = Some(Cow::from(format!("must be at least {min} characters long")));
                error.add_param(Cow::from("min"), min);
                error
            }
            Rule::OneOf(values) => {
                let mut error = ValidationError::new("one_of");
                error.message = Some(Cow::from(format!("must be one of {}", values.join(", "))));
                error.add_param(Cow::from("values"), values);
                error
            }
        }
    }
}

/// Check every field of the schema against the source
pub fn validate<S>(schema: &[FieldSchema], source: &S) -> Result<(), ValidationErrors>
where
    S: FieldSource + ?Sized,
{
    let mut errors = ValidationErrors::new();

    for field in schema {
        let value = source.field(field.name);
        if let Some(rule) = field.rules.iter().find(|rule| !rule.is_satisfied_by(value)) {
            errors.add(field.name, rule.violation());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Errors holding a single violation
pub fn rejection(field: &'static str, rule: &Rule) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, rule.violation());
    errors
}
