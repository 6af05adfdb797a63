use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrafthubError {
    #[error("Missing publish credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<&'static str>),

    #[error("Failed to publish {title}: {}", describe_remote(.status, .message))]
    RemoteWriteFailure {
        title: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Failed to fetch {path}: {}", describe_remote(.status, .message))]
    RemoteReadFailure {
        path: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Backing store unavailable: {0}")]
    BackingStoreUnavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

fn describe_remote(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("{} - {}", code, message),
        None => message.to_string(),
    }
}

pub type Result<T> = std::result::Result<T, DrafthubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_write_failure_names_title_and_status() {
        let err = DrafthubError::RemoteWriteFailure {
            title: "My Post".into(),
            status: Some(409),
            message: "conflict".into(),
        };
        assert_eq!(err.to_string(), "Failed to publish My Post: 409 - conflict");
    }

    #[test]
    fn transport_failure_has_no_status_prefix() {
        let err = DrafthubError::RemoteWriteFailure {
            title: "My Post".into(),
            status: None,
            message: "timed out".into(),
        };
        assert_eq!(err.to_string(), "Failed to publish My Post: timed out");
    }

    #[test]
    fn missing_credentials_lists_parts() {
        let err = DrafthubError::MissingCredentials(vec!["repository", "token"]);
        assert_eq!(
            err.to_string(),
            "Missing publish credentials: repository, token"
        );
    }
}
