//! Declarative validation of untyped request input.
//!
//! A [`Validator`] is an immutable registry of named body schemas and
//! per-parameter path rules, assembled once with [`ValidatorBuilder`] and
//! shared read-only afterwards. Validation never fails as such: every failing
//! rule becomes a [`ValidationError`] value and the whole batch is returned,
//! so callers can report all problems at once.
//!
//! ```
//! use std::collections::HashMap;
//!
//! use board::domain::validation::{BodySchema, FieldSpec, Rule, Validator};
//!
//! let validator = Validator::builder()
//!     .register_body_schema(
//!         "Greeting",
//!         BodySchema::new().field(
//!             FieldSpec::required("name").rule(Rule::non_empty("name must be a non-empty string")),
//!         ),
//!     )
//!     .build();
//!
//! let input = HashMap::from([("name".to_owned(), String::new())]);
//! let errors = validator.validate_body("Greeting", &input);
//! assert_eq!(errors.len(), 1);
//! assert_eq!(errors[0].message, "name must be a non-empty string");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub mod schemas;

/// Message reported for a required body field that is absent.
pub const REQUIRED_MESSAGE: &str = "field is required";

/// Untyped key/value input handed to [`Validator::validate_body`].
pub type FieldMap = HashMap<String, String>;

type Predicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A single check: a human-readable description and the predicate it names.
#[derive(Clone)]
pub struct Rule {
    description: String,
    predicate: Predicate,
}

impl Rule {
    /// Build a rule from a description and predicate.
    pub fn new(
        description: impl Into<String>,
        predicate: impl Fn(&str) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// Rule accepting any non-empty value.
    pub fn non_empty(description: impl Into<String>) -> Self {
        Self::new(description, |value| !value.is_empty())
    }

    /// Rule accepting only the listed values.
    pub fn one_of(description: impl Into<String>, allowed: &'static [&'static str]) -> Self {
        Self::new(description, move |value| {
            allowed.iter().any(|candidate| *candidate == value)
        })
    }

    /// Message reported when the rule fails.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether `value` passes.
    pub fn check(&self, value: &str) -> bool {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Declaration of one body field.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    required: bool,
    rules: Vec<Rule>,
}

impl FieldSpec {
    /// A field that must be present.
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            rules: Vec::new(),
        }
    }

    /// A field whose absence is tolerated; its rules still run against the
    /// empty string.
    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name)
        }
    }

    /// Append a rule. Rules run in the order they were added.
    #[must_use]
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Field name as it appears in the input.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether absence is an error.
    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Ordered set of field declarations registered under a schema name.
#[derive(Debug, Clone, Default)]
pub struct BodySchema {
    fields: Vec<FieldSpec>,
}

impl BodySchema {
    /// Empty schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field declaration.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Declared fields, in evaluation order.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }
}

/// Where the offending value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    /// A field of the JSON request body.
    Body,
    /// A parameter of the request path.
    Path,
}

impl Location {
    /// Wire name of the location.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Path => "path",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One failing rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("validation error: location: {location}, param: {param}, value: {value}, message: {message}")]
pub struct ValidationError {
    /// Body or path.
    pub location: Location,
    /// Field or path parameter name.
    pub param: String,
    /// Offending value; empty when the field was absent.
    pub value: String,
    /// Rule description, or [`REQUIRED_MESSAGE`].
    pub message: String,
}

impl ValidationError {
    fn new(location: Location, param: &str, value: &str, message: &str) -> Self {
        Self {
            location,
            param: param.to_owned(),
            value: value.to_owned(),
            message: message.to_owned(),
        }
    }
}

/// Collects schemas and path rules before freezing them into a [`Validator`].
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    bodies: HashMap<String, BodySchema>,
    paths: HashMap<String, Vec<Rule>>,
}

impl ValidatorBuilder {
    /// Register `schema` under `name`, replacing any earlier registration.
    #[must_use]
    pub fn register_body_schema(mut self, name: impl Into<String>, schema: BodySchema) -> Self {
        self.bodies.insert(name.into(), schema);
        self
    }

    /// Register the rules checked for path parameter `param`.
    #[must_use]
    pub fn register_path_rule(mut self, param: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.paths.insert(param.into(), rules);
        self
    }

    /// Freeze the registry.
    pub fn build(self) -> Validator {
        Validator {
            bodies: Arc::new(self.bodies),
            paths: Arc::new(self.paths),
        }
    }
}

/// Immutable validation registry. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Validator {
    bodies: Arc<HashMap<String, BodySchema>>,
    paths: Arc<HashMap<String, Vec<Rule>>>,
}

impl Validator {
    /// Start assembling a registry.
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// Whether a body schema is registered under `name`.
    pub fn has_body_schema(&self, name: &str) -> bool {
        self.bodies.contains_key(name)
    }

    /// Whether rules are registered for path parameter `param`.
    pub fn has_path_rule(&self, param: &str) -> bool {
        self.paths.contains_key(param)
    }

    /// Check `input` against the schema registered as `schema`.
    ///
    /// Fields absent from the schema are ignored. An absent required field
    /// yields exactly one error and skips that field's rules; every other
    /// declared field has each rule evaluated. An unknown schema name yields
    /// no errors.
    pub fn validate_body(&self, schema: &str, input: &FieldMap) -> Vec<ValidationError> {
        let Some(body) = self.bodies.get(schema) else {
            warn!(schema, "validation requested for unregistered body schema");
            return Vec::new();
        };

        let mut errors = Vec::new();
        for field in body.fields() {
            let value = input.get(field.name());
            if value.is_none() && field.is_required() {
                errors.push(ValidationError::new(
                    Location::Body,
                    field.name(),
                    "",
                    REQUIRED_MESSAGE,
                ));
                continue;
            }
            let value = value.map_or("", String::as_str);
            errors.extend(
                field
                    .rules
                    .iter()
                    .filter(|rule| !rule.check(value))
                    .map(|rule| {
                        ValidationError::new(Location::Body, field.name(), value, rule.description())
                    }),
            );
        }
        errors
    }

    /// Check a single path parameter value.
    pub fn validate_path_value(&self, param: &str, value: &str) -> Vec<ValidationError> {
        let Some(rules) = self.paths.get(param) else {
            warn!(param, "validation requested for unregistered path parameter");
            return Vec::new();
        };

        rules
            .iter()
            .filter(|rule| !rule.check(value))
            .map(|rule| ValidationError::new(Location::Path, param, value, rule.description()))
            .collect()
    }
}
