//! Metrics module for the application.
//!
//! - This module contains the global Prometheus registry.
//! - Defines the balance tracking metrics and the host metrics refreshed on scrape.

pub mod server;

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Gauge, Opts, Registry, TextEncoder};
use sysinfo::{Disks, System};

use crate::models::BalanceDirection;

lazy_static! {
	/// Global Prometheus registry.
	pub static ref REGISTRY: Registry = Registry::new();

	/// Gauge for CPU usage percentage.
	pub static ref CPU_USAGE: Gauge = {
		let gauge = Gauge::new("cpu_usage_percentage", "Current CPU usage percentage").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	/// Gauge for memory usage in bytes.
	pub static ref MEMORY_USAGE: Gauge = {
		let gauge = Gauge::new("memory_usage_bytes", "Memory usage in bytes").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	/// Gauge for memory usage percentage.
	pub static ref MEMORY_USAGE_PERCENT: Gauge = {
		let gauge = Gauge::new("memory_usage_percentage", "Memory usage percentage").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	/// Gauge for used disk space in bytes, summed over all mounted filesystems.
	pub static ref DISK_USAGE: Gauge = {
		let gauge = Gauge::new("disk_usage_bytes", "Used disk space in bytes").unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	/// Number of accounts with a running balance subscription.
	pub static ref SUBSCRIPTIONS_ACTIVE: Gauge = {
		let gauge = Gauge::new(
			"balance_subscriptions_active",
			"Number of accounts with an active balance subscription"
		).unwrap();
		REGISTRY.register(Box::new(gauge.clone())).unwrap();
		gauge
	};

	/// Balance changes detected, before the notification policy is applied.
	pub static ref CHANGES_DETECTED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("balance_changes_detected_total", "Balance changes detected"),
			&["network", "direction"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Balance changes dropped by the notification policy.
	pub static ref NOTIFICATIONS_SUPPRESSED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("balance_notifications_suppressed_total", "Balance change notifications suppressed by policy"),
			&["network", "direction"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Balance change notifications accepted by the notifier.
	pub static ref NOTIFICATIONS_DELIVERED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("balance_notifications_delivered_total", "Balance change notifications delivered"),
			&["network", "direction"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};

	/// Balance change notifications the notifier failed to deliver.
	pub static ref NOTIFICATIONS_FAILED: CounterVec = {
		let counter = CounterVec::new(
			Opts::new("balance_notifications_failed_total", "Balance change notifications that failed delivery"),
			&["network", "direction"]
		).unwrap();
		REGISTRY.register(Box::new(counter.clone())).unwrap();
		counter
	};
}

/// Which stage of the pipeline a balance change reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOutcome {
	Detected,
	Suppressed,
	Delivered,
	Failed,
}

/// Counts a balance change at the given stage for a network and direction.
pub fn record_change(outcome: ChangeOutcome, network: &str, direction: BalanceDirection) {
	let counter = match outcome {
		ChangeOutcome::Detected => &*CHANGES_DETECTED,
		ChangeOutcome::Suppressed => &*NOTIFICATIONS_SUPPRESSED,
		ChangeOutcome::Delivered => &*NOTIFICATIONS_DELIVERED,
		ChangeOutcome::Failed => &*NOTIFICATIONS_FAILED,
	};
	counter
		.with_label_values(&[network, direction.as_str()])
		.inc();
}

/// Gather all metrics and encode them in the Prometheus text format.
pub fn gather_metrics() -> Result<Vec<u8>, Box<dyn std::error::Error>> {
	let encoder = TextEncoder::new();
	let metric_families = REGISTRY.gather();
	let mut buffer = Vec::new();
	encoder.encode(&metric_families, &mut buffer)?;
	Ok(buffer)
}

/// Updates the host metrics for CPU, memory and disk usage.
pub fn update_system_metrics() {
	let mut sys = System::new_all();
	sys.refresh_all();

	CPU_USAGE.set(sys.global_cpu_usage() as f64);

	let total_memory = sys.total_memory();
	let used_memory = sys.used_memory();
	MEMORY_USAGE.set(used_memory as f64);
	MEMORY_USAGE_PERCENT.set(if total_memory > 0 {
		(used_memory as f64 / total_memory as f64) * 100.0
	} else {
		0.0
	});

	let disks = Disks::new_with_refreshed_list();
	let used_disk_space: u64 = disks
		.list()
		.iter()
		.map(|disk| disk.total_space().saturating_sub(disk.available_space()))
		.sum();
	DISK_USAGE.set(used_disk_space as f64);
}
