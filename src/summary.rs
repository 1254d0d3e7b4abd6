use crate::error::QuantityError;
use crate::quantity;
use crate::types::{NamespaceSummary, Phase, ResourceRequest, SummaryTable, WorkloadUnit};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use tracing::{debug, warn};

/// Fold pods into per-namespace summaries in one pass.
///
/// Every step is a commutative addition, so input order never changes the result.
pub fn summarize(units: impl IntoIterator<Item = WorkloadUnit>) -> SummaryTable {
    let mut table = SummaryTable::new();
    for unit in units {
        table.entry(unit.namespace.clone()).or_default().record(&unit);
    }
    debug!("Summarized {} namespaces", table.len());
    table
}

impl NamespaceSummary {
    /// Add one pod. Phase counts and resource totals are independent: a
    /// failed pod still adds its requests.
    pub fn record(&mut self, unit: &WorkloadUnit) {
        self.pods += 1;
        match &unit.phase {
            Phase::Running => self.running += 1,
            Phase::Pending => self.pending += 1,
            Phase::Failed => self.failed += 1,
            Phase::Other(phase) => {
                debug!("Untracked phase '{}' in namespace {}", phase, unit.namespace)
            }
        }

        for request in unit.containers.iter().flatten() {
            self.add_request(&unit.namespace, request);
        }
    }

    fn add_request(&mut self, namespace: &str, request: &ResourceRequest) {
        let cpu = to_integer(namespace, "cpu", request.cpu.as_ref(), quantity::cpu_millis);
        let memory = to_integer(
            namespace,
            "memory",
            request.memory.as_ref(),
            quantity::memory_bytes,
        );
        accumulate(&mut self.cpu_millis, cpu, namespace, "cpu");
        accumulate(&mut self.memory_bytes, memory, namespace, "memory");
    }
}

/// Totals saturate at the i64 bounds instead of wrapping.
fn accumulate(total: &mut i64, amount: i64, namespace: &str, resource: &str) {
    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => {
            warn!(
                "Total {} requests in namespace {} overflow; capping the value",
                resource, namespace
            );
            *total = total.saturating_add(amount);
        }
    }
}

/// Absent and unparseable quantities both count as zero.
fn to_integer(
    namespace: &str,
    resource: &str,
    value: Option<&Quantity>,
    convert: fn(&Quantity) -> Result<i64, QuantityError>,
) -> i64 {
    let Some(value) = value else {
        return 0;
    };
    match convert(value) {
        Ok(n) => n,
        Err(e) => {
            warn!(
                "Ignoring {} request in namespace {}: {}",
                resource, namespace, e
            );
            0
        }
    }
}
