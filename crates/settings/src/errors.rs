use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("section '{section}' does not fit its type: {source}")]
    Mismatch {
        section: &'static str,
        #[source]
        source: Box<SettingsError>,
    },

    #[error("section not registered")]
    NotRegistered,

    #[error("invalid: {0}")]
    Invalid(&'static str),
}
