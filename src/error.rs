use thiserror::Error;

/// Failures of the dispatch transport. Domain outcomes (denied permission,
/// unknown bridge payloads) are not errors and never show up here.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("invalid_json:{0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("unknown_action:{0}")]
    UnknownAction(String),

    #[error("missing_field:{0}")]
    MissingField(&'static str),

    #[error("invalid_config:{0}")]
    Config(String),

    #[error("jni:{0}")]
    Jni(#[from] jni::errors::Error),

    #[error("qr_decode_failed:{0}")]
    Decode(String),
}

pub type ShellResult<T> = Result<T, ShellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_keep_snake_case_codes() {
        assert_eq!(
            ShellError::UnknownAction("fly".into()).to_string(),
            "unknown_action:fly"
        );
        assert_eq!(ShellError::MissingField("data").to_string(), "missing_field:data");
    }

    #[test]
    fn serde_errors_convert() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let shell: ShellError = err.into();
        assert!(shell.to_string().starts_with("invalid_json:"));
    }
}
