use {
    crate::api::RestError,
    time::{
        format_description::well_known::Rfc3339,
        OffsetDateTime,
    },
};

/// Parses an RFC3339 timestamp taken from a request path.
pub fn parse_timestamp(field: &str, value: &str) -> Result<OffsetDateTime, RestError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RestError::BadParameters(format!("{} is required", field)));
    }
    OffsetDateTime::parse(value, &Rfc3339).map_err(|err| {
        RestError::BadParameters(format!(
            "{} must be an RFC3339 timestamp: {}",
            field, err
        ))
    })
}

/// Trims an identifier taken from a request path and rejects it when empty.
pub fn parse_id(field: &str, value: &str) -> Result<String, RestError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RestError::BadParameters(format!("{} is required", field)));
    }
    Ok(value.to_string())
}
