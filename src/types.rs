use k8s_openapi::api::core::v1::Pod;
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const BYTES_PER_MEBIBYTE: i64 = 1024 * 1024;

/// Which pods to list: every namespace, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    AllNamespaces,
    Namespace(String),
}

impl Scope {
    /// An empty `-n` value means all namespaces.
    pub fn from_flag(namespace: &str) -> Self {
        if namespace.is_empty() {
            Scope::AllNamespaces
        } else {
            Scope::Namespace(namespace.to_string())
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::AllNamespaces => write!(f, "all namespaces"),
            Scope::Namespace(ns) => write!(f, "namespace '{}'", ns),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Running,
    Pending,
    Failed,
    /// Succeeded, Unknown, missing, or anything the API adds later.
    Other(String),
}

impl From<&str> for Phase {
    fn from(phase: &str) -> Self {
        match phase {
            "Running" => Phase::Running,
            "Pending" => Phase::Pending,
            "Failed" => Phase::Failed,
            other => Phase::Other(other.to_string()),
        }
    }
}

/// Requested resources of one container. Either key may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceRequest {
    pub cpu: Option<Quantity>,
    pub memory: Option<Quantity>,
}

/// The parts of a pod the summary looks at.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadUnit {
    pub namespace: String,
    pub phase: Phase,
    /// One entry per regular container; `None` when it declares no requests.
    pub containers: Vec<Option<ResourceRequest>>,
}

impl From<&Pod> for WorkloadUnit {
    fn from(pod: &Pod) -> Self {
        let namespace = pod.metadata.namespace.clone().unwrap_or_default();
        let phase = pod
            .status
            .as_ref()
            .and_then(|s| s.phase.as_deref())
            .map(Phase::from)
            .unwrap_or_else(|| Phase::Other(String::new()));
        let containers: Vec<Option<ResourceRequest>> = pod
            .spec
            .as_ref()
            .map(|spec| {
                spec.containers
                    .iter()
                    .map(|c| {
                        c.resources
                            .as_ref()
                            .and_then(|r| r.requests.as_ref())
                            .map(|requests| ResourceRequest {
                                cpu: requests.get("cpu").cloned(),
                                memory: requests.get("memory").cloned(),
                            })
                    })
                    .collect()
            })
            .unwrap_or_default();

        WorkloadUnit {
            namespace,
            phase,
            containers,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NamespaceSummary {
    pub pods: usize,
    pub running: usize,
    pub pending: usize,
    pub failed: usize,
    pub cpu_millis: i64,
    pub memory_bytes: i64,
}

impl NamespaceSummary {
    /// Whole mebibytes, truncated.
    pub fn memory_mebibytes(&self) -> i64 {
        self.memory_bytes / BYTES_PER_MEBIBYTE
    }
}

/// Namespace name to summary, iterated in lexicographic order.
pub type SummaryTable = BTreeMap<String, NamespaceSummary>;
