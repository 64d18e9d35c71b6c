/// Date-times that may be unset.
///
/// On the way in, `null`, an absent field and the legacy zero time `0001-01-01T00:00:00Z`
/// all decode to `None`. On the way out `None` is always written as `null`.
pub mod nullable_datetime {
    use {
        serde::{
            de::Error,
            ser,
            Deserialize,
            Deserializer,
            Serializer,
        },
        time::{
            format_description::well_known::Rfc3339,
            OffsetDateTime,
        },
    };

    /// Unix timestamp of `0001-01-01T00:00:00Z`.
    const UNSET_SENTINEL_UNIX_TIMESTAMP: i64 = -62_135_596_800;

    pub fn is_unset_sentinel(value: &OffsetDateTime) -> bool {
        value.unix_timestamp() == UNSET_SENTINEL_UNIX_TIMESTAMP && value.nanosecond() == 0
    }

    pub fn serialize<S>(b: &Option<OffsetDateTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match b {
            Some(b) => {
                let formatted = b.format(&Rfc3339).map_err(ser::Error::custom)?;
                s.serialize_str(formatted.as_str())
            }
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<OffsetDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Deserialize::deserialize(d)?;
        match s {
            Some(s) => OffsetDateTime::parse(s.as_str(), &Rfc3339)
                .map(|value| (!is_unset_sentinel(&value)).then_some(value))
                .map_err(|err| D::Error::custom(err.to_string())),
            None => Ok(None),
        }
    }
}

/// Identifiers that may be unset. The empty string decodes to `None`.
pub mod nullable_id {
    use serde::{
        Deserialize,
        Deserializer,
        Serializer,
    };

    pub fn serialize<S>(b: &Option<String>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match b {
            Some(b) => s.serialize_str(b),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(d: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: Option<String> = Deserialize::deserialize(d)?;
        Ok(s.filter(|s| !s.trim().is_empty()))
    }
}
