use thiserror::Error;

/// Console error types
///
/// None of these are fatal to the process; every variant is recoverable at
/// the screen level.
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Backing service unreachable or answered with a non-success status
    #[error("Request failed{}: {}", status_suffix(.status), .message)]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// Response body did not have the expected shape
    #[error("Malformed response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid input: {0}")]
    MalformedInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" ({s})")).unwrap_or_default()
}

impl ConsoleError {
    pub fn transport(status: Option<u16>, message: impl Into<String>) -> Self {
        ConsoleError::Transport {
            status,
            message: message.into(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, source: serde_json::Error) -> Self {
        ConsoleError::Decode {
            endpoint: endpoint.into(),
            source,
        }
    }

    /// HTTP status carried by a transport error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ConsoleError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        ConsoleError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

/// Result type alias for the console
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Helper trait for converting Option to ConsoleError::MalformedInput
pub trait OptionExt<T> {
    fn ok_or_malformed(self, msg: impl Into<String>) -> ConsoleResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_malformed(self, msg: impl Into<String>) -> ConsoleResult<T> {
        self.ok_or_else(|| ConsoleError::MalformedInput(msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_display() {
        let err = ConsoleError::transport(Some(503), "backend down");
        assert_eq!(err.to_string(), "Request failed (503): backend down");
        assert_eq!(err.status(), Some(503));

        let err = ConsoleError::transport(None, "connection refused");
        assert_eq!(err.to_string(), "Request failed: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_decode_display() {
        let source = serde_json::from_str::<Vec<i64>>("{").unwrap_err();
        let err = ConsoleError::decode("/org/units", source);
        assert!(err.to_string().starts_with("Malformed response from /org/units"));
    }

    #[test]
    fn test_option_ext() {
        let opt: Option<i64> = None;
        let result = opt.ok_or_malformed("unit id is not an integer");
        assert!(matches!(result, Err(ConsoleError::MalformedInput(_))));
    }
}
