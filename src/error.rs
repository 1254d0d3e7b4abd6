use crate::types::Scope;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fatal errors. None of these are retried; `main` reports them and exits 1.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// Credentials could not be located, read or parsed.
    #[error("error building kubeconfig: {0}")]
    Config(#[source] BoxError),

    /// The client handle could not be built from the configuration.
    #[error("error creating Kubernetes client: {0}")]
    Client(#[source] kube::Error),

    /// The list request never got an answer from the API server.
    #[error("error connecting to the cluster while listing pods in {scope}: {source}")]
    Connection {
        scope: Scope,
        #[source]
        source: kube::Error,
    },

    /// The API server rejected the list request.
    #[error("error listing pods in {scope}: {source}")]
    Query {
        scope: Scope,
        #[source]
        source: kube::Error,
    },
}

impl SummaryError {
    pub fn config(err: impl Into<BoxError>) -> Self {
        SummaryError::Config(err.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("invalid quantity '{0}'")]
    Invalid(String),

    #[error("quantity '{0}' is out of range")]
    OutOfRange(String),
}
