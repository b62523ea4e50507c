//! Process resource metrics.
//!
//! # Metrics
//! - `process_cpu_usage_percent` (gauge): CPU used since the previous refresh
//! - `process_memory_resident_bytes` (gauge)
//! - `process_memory_virtual_bytes` (gauge)
//! - `process_threads` (gauge): thread count, where the platform reports it
//! - `process_uptime_seconds` (gauge)
//!
//! Refreshed by the metrics upkeep task, so values are at most one upkeep
//! interval old when scraped.

use metrics::Unit;
use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System};

pub const PROCESS_CPU_USAGE: &str = "process_cpu_usage_percent";
pub const PROCESS_MEMORY_RESIDENT: &str = "process_memory_resident_bytes";
pub const PROCESS_MEMORY_VIRTUAL: &str = "process_memory_virtual_bytes";
pub const PROCESS_THREADS: &str = "process_threads";
pub const PROCESS_UPTIME: &str = "process_uptime_seconds";

/// Samples this process and publishes the samples as gauges.
pub struct ProcessCollector {
    system: System,
    pid: Pid,
}

impl ProcessCollector {
    /// `None` when the platform cannot identify the current process.
    pub fn new() -> Option<Self> {
        match sysinfo::get_current_pid() {
            Ok(pid) => Some(Self {
                system: System::new(),
                pid,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Process metrics unavailable");
                None
            }
        }
    }

    pub fn describe() {
        metrics::describe_gauge!(PROCESS_CPU_USAGE, Unit::Percent, "Process CPU usage");
        metrics::describe_gauge!(PROCESS_MEMORY_RESIDENT, Unit::Bytes, "Resident memory");
        metrics::describe_gauge!(PROCESS_MEMORY_VIRTUAL, Unit::Bytes, "Virtual memory");
        metrics::describe_gauge!(PROCESS_THREADS, Unit::Count, "Process threads");
        metrics::describe_gauge!(PROCESS_UPTIME, Unit::Seconds, "Process uptime");
    }

    /// Refresh the process sample and set the gauges.
    pub fn collect(&mut self) {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[self.pid]),
            true,
            ProcessRefreshKind::everything(),
        );

        let Some(process) = self.system.process(self.pid) else {
            tracing::debug!(pid = %self.pid, "Current process not found in sample");
            return;
        };

        metrics::gauge!(PROCESS_CPU_USAGE).set(f64::from(process.cpu_usage()));
        metrics::gauge!(PROCESS_MEMORY_RESIDENT).set(process.memory() as f64);
        metrics::gauge!(PROCESS_MEMORY_VIRTUAL).set(process.virtual_memory() as f64);
        metrics::gauge!(PROCESS_UPTIME).set(process.run_time() as f64);
        if let Some(tasks) = process.tasks() {
            metrics::gauge!(PROCESS_THREADS).set(tasks.len() as f64);
        }
    }
}
