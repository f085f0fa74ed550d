//! In-memory diagnostic sink retaining records for tests and embedders.

// self
use crate::{
	_prelude::*,
	obs::{DiagnosticRecord, DiagnosticSink},
};

/// Thread-safe sink retaining every record in emission order.
///
/// Clones share the same backing storage, so a test can keep one handle while the
/// client holds another.
#[derive(Clone, Debug, Default)]
pub struct MemorySink(Arc<Mutex<Vec<DiagnosticRecord>>>);
impl MemorySink {
	/// Creates an empty sink.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a snapshot of the retained records.
	pub fn records(&self) -> Vec<DiagnosticRecord> {
		self.0.lock().clone()
	}

	/// Removes and returns all retained records.
	pub fn drain(&self) -> Vec<DiagnosticRecord> {
		std::mem::take(&mut *self.0.lock())
	}

	/// Returns the number of retained records.
	pub fn len(&self) -> usize {
		self.0.lock().len()
	}

	/// Returns true when no record has been retained.
	pub fn is_empty(&self) -> bool {
		self.0.lock().is_empty()
	}
}
impl DiagnosticSink for MemorySink {
	fn record(&self, record: DiagnosticRecord) {
		self.0.lock().push(record);
	}
}
