use crate::error::SummaryError;
use crate::types::Scope;
use k8s_openapi::api::core::v1::Pod;
use kube::api::ListParams;
use kube::{Api, Client, config};
use std::path::Path;
use tracing::{debug, info};

/// Resolve cluster access configuration.
///
/// An explicit kubeconfig path wins. Without one, a named context is looked up
/// in the default kubeconfig; with neither, the usual inference applies
/// (`$KUBECONFIG`, `~/.kube/config`, then in-cluster).
pub async fn load_config(
    kubeconfig: Option<&Path>,
    context: Option<&str>,
) -> Result<config::Config, SummaryError> {
    let options = config::KubeConfigOptions {
        context: context.map(str::to_string),
        ..Default::default()
    };

    let config = match (kubeconfig, context) {
        (Some(path), _) => {
            debug!("Reading kubeconfig from {}", path.display());
            let kubeconfig = config::Kubeconfig::read_from(path).map_err(SummaryError::config)?;
            config::Config::from_custom_kubeconfig(kubeconfig, &options)
                .await
                .map_err(SummaryError::config)?
        }
        (None, Some(ctx)) => config::Config::from_kubeconfig(&options)
            .await
            .map_err(|e| {
                SummaryError::config(format!("context '{}' not found in kubeconfig: {}", ctx, e))
            })?,
        (None, None) => config::Config::infer().await.map_err(SummaryError::config)?,
    };

    info!("Using cluster: {}", config.cluster_url);
    Ok(config)
}

/// Build the client handle passed to [`list_pods`].
pub fn connect(config: config::Config) -> Result<Client, SummaryError> {
    Client::try_from(config).map_err(SummaryError::Client)
}

/// List every pod in `scope` with a single request.
pub async fn list_pods(client: &Client, scope: &Scope) -> Result<Vec<Pod>, SummaryError> {
    let api: Api<Pod> = match scope {
        Scope::AllNamespaces => Api::all(client.clone()),
        Scope::Namespace(ns) => Api::namespaced(client.clone(), ns),
    };

    let pods = api
        .list(&ListParams::default())
        .await
        .map_err(|e| classify_list_error(e, scope))?;

    debug!("Listed {} pods in {}", pods.items.len(), scope);
    Ok(pods.items)
}

/// A `Status` response means the server saw and refused the request; anything
/// else never got that far.
fn classify_list_error(err: kube::Error, scope: &Scope) -> SummaryError {
    match err {
        kube::Error::Api(_) => SummaryError::Query {
            scope: scope.clone(),
            source: err,
        },
        other => SummaryError::Connection {
            scope: scope.clone(),
            source: other,
        },
    }
}
