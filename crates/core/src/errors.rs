use thiserror::Error;

/// Failure to turn a matched text fragment into a calendar value.
///
/// These never leave the engine: every call site logs them and skips the
/// fragment that produced them.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TemporalParseError {
    #[error("unknown month name `{0}`")]
    UnknownMonth(String),
    #[error("`{0}` is not a valid calendar date")]
    InvalidDate(String),
    #[error("unsupported year `{0}`")]
    InvalidYear(String),
    #[error("`{0}` is not a valid clock time")]
    InvalidTime(String),
    #[error("local time `{0}` does not exist in timezone {1}")]
    NonexistentLocalTime(String, String),
    #[error("malformed temporal fragment `{0}`")]
    Malformed(String),
}

impl TemporalParseError {
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::UnknownMonth(_) => "unknown_month",
            Self::InvalidDate(_) => "invalid_date",
            Self::InvalidYear(_) => "invalid_year",
            Self::InvalidTime(_) => "invalid_time",
            Self::NonexistentLocalTime(..) => "nonexistent_local_time",
            Self::Malformed(_) => "malformed",
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::TemporalParseError;

    #[test]
    fn messages_name_the_offending_fragment() {
        let error = TemporalParseError::InvalidDate("31/02/2025".to_owned());
        assert_eq!(error.to_string(), "`31/02/2025` is not a valid calendar date");

        let error = TemporalParseError::NonexistentLocalTime(
            "30/03/2025 02:30".to_owned(),
            "Europe/London".to_owned(),
        );
        assert!(error.to_string().contains("Europe/London"));
    }

    #[test]
    fn error_class_is_stable_for_logging() {
        assert_eq!(TemporalParseError::UnknownMonth("smarch".to_owned()).error_class(), "unknown_month");
        assert_eq!(TemporalParseError::InvalidTime("25pm".to_owned()).error_class(), "invalid_time");
        assert_eq!(TemporalParseError::Malformed("1/2".to_owned()).error_class(), "malformed");
    }
}
