use thiserror::Error;

/// Failures raised while applying a single action.
///
/// Every variant is fatal for the offending action: `apply` never returns a
/// partially updated state alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// An action arrived before something it structurally depends on.
    #[error("{action} received before {requirement}")]
    Sequencing {
        action: &'static str,
        requirement: &'static str,
    },
    /// A field required at this point is missing or out of range.
    #[error("invalid {field} on {action}: {detail}")]
    InvalidInput {
        action: &'static str,
        field: &'static str,
        detail: String,
    },
    #[error("unknown variant: {0}")]
    UnknownVariant(String),
}

impl ReduceError {
    pub fn invalid_suit(action: &'static str, suit_index: Option<usize>, num_suits: usize) -> Self {
        let detail = match suit_index {
            Some(index) => format!("suit index {index} is out of range for {num_suits} suits"),
            None => "suit index is unknown".to_string(),
        };
        ReduceError::InvalidInput {
            action,
            field: "suit_index",
            detail,
        }
    }
}

/// Failures while replaying a whole action log.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("action #{seq} was rejected: {source}")]
    Rejected {
        seq: u64,
        #[source]
        source: ReduceError,
    },
    #[error(transparent)]
    Reduce(#[from] ReduceError),
}

/// Failures while reading or writing an action log.
#[derive(Debug, Error)]
pub enum ActionLogError {
    #[error("action log i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("action log line {line} is malformed: {source}")]
    Malformed {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("action log encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}
