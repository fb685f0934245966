//! Domain error types.

/// Top-level error type for signalpro.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown risk preset '{name}'")]
    UnknownPreset { name: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SignalError {
    pub(crate) fn data_source(reason: impl Into<String>) -> Self {
        SignalError::DataSource {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        SignalError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<csv::Error> for SignalError {
    fn from(err: csv::Error) -> Self {
        SignalError::data_source(format!("CSV error: {err}"))
    }
}

impl From<&SignalError> for std::process::ExitCode {
    fn from(err: &SignalError) -> Self {
        let code: u8 = match err {
            SignalError::Io(_) => 1,
            SignalError::ConfigParse { .. }
            | SignalError::ConfigMissing { .. }
            | SignalError::ConfigInvalid { .. } => 2,
            SignalError::DataSource { .. } => 3,
            SignalError::UnknownPreset { .. } => 4,
            SignalError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = SignalError::ConfigMissing {
            section: "planner".into(),
            key: "account_size".into(),
        };
        assert_eq!(err.to_string(), "missing config key [planner] account_size");

        let err = SignalError::UnknownPreset {
            name: "Moonshot".into(),
        };
        assert_eq!(err.to_string(), "unknown risk preset 'Moonshot'");
    }

    #[test]
    fn exit_codes_by_class() {
        use std::process::ExitCode;

        let cases = [
            (SignalError::Io(std::io::Error::other("x")), ExitCode::from(1)),
            (SignalError::invalid("planner", "account_size", "bad"), ExitCode::from(2)),
            (SignalError::data_source("down"), ExitCode::from(3)),
            (SignalError::UnknownPreset { name: "x".into() }, ExitCode::from(4)),
            (SignalError::NoData { symbol: "BTC".into() }, ExitCode::from(5)),
        ];
        for (err, expected) in cases {
            assert_eq!(format!("{:?}", ExitCode::from(&err)), format!("{expected:?}"));
        }
    }
}
