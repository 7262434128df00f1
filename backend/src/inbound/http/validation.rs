//! Shared validation helpers for inbound HTTP adapters.
//!
//! Bodies arrive as flat JSON objects of strings and are checked against the
//! validator registry before any domain call. Every failing rule is reported
//! together in one unprocessable-entity response.

use tracing::debug;

use crate::domain::validation::{FieldMap, ValidationError, Validator};
use crate::domain::{BoardError, Error, HexId, validation_failure};

/// Decode a request body into untyped string fields.
///
/// Anything other than a JSON object whose values are all strings is a
/// parse failure.
pub(crate) fn parse_fields(body: &[u8]) -> Result<FieldMap, Error> {
    serde_json::from_slice(body).map_err(|error| {
        BoardError::RequestNotParsed {
            message: error.to_string(),
        }
        .into()
    })
}

/// Turn a non-empty batch into an unprocessable-entity error.
pub(crate) fn ensure_valid(errors: Vec<ValidationError>) -> Result<(), Error> {
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        debug!(%error, "request failed validation");
    }
    Err(validation_failure(errors))
}

/// Check `fields` against the schema registered as `schema`.
pub(crate) fn validate_body(
    validator: &Validator,
    schema: &str,
    fields: &FieldMap,
) -> Result<(), Error> {
    ensure_valid(validator.validate_body(schema, fields))
}

/// Check and parse a hexadecimal identifier taken from the path.
pub(crate) fn path_hex_id(validator: &Validator, param: &str, value: &str) -> Result<HexId, Error> {
    ensure_valid(validator.validate_path_value(param, value))?;
    hex_id_after_validation(value)
}

/// Parse an identifier that already passed its path rule.
pub(crate) fn hex_id_after_validation(value: &str) -> Result<HexId, Error> {
    HexId::new(value).map_err(|error| Error::internal(format!("validated id rejected: {error}")))
}

/// Take a field that already passed validation.
pub(crate) fn take_field(fields: &mut FieldMap, name: &str) -> String {
    fields.remove(name).unwrap_or_default()
}
