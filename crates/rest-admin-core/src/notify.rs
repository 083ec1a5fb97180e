//! Render-complete notifications.

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Sent after every list render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRendered {
	/// Number of rows in the rendered list
	pub rows: usize,
	/// Rendered HTML
	pub html: String,
}

/// Receiver of [`ListRendered`] notifications.
pub type ListListener = Arc<dyn Fn(&ListRendered) + Send + Sync>;

/// Listeners connected to one widget.
///
/// Clones share the same listener list.
#[derive(Clone, Default)]
pub struct ListListeners {
	listeners: Arc<RwLock<Vec<ListListener>>>,
}

impl ListListeners {
	/// Creates an empty listener list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Connects a listener.
	pub fn connect<F>(&self, listener: F)
	where
		F: Fn(&ListRendered) + Send + Sync + 'static,
	{
		self.listeners.write().push(Arc::new(listener));
	}

	/// Number of connected listeners.
	pub fn len(&self) -> usize {
		self.listeners.read().len()
	}

	/// Returns true if nothing is connected.
	pub fn is_empty(&self) -> bool {
		self.listeners.read().is_empty()
	}

	/// Delivers `event` to every listener, in connection order.
	pub fn emit(&self, event: &ListRendered) {
		// Listeners may connect further listeners, so call them unlocked.
		let listeners: Vec<ListListener> = self.listeners.read().clone();
		for listener in listeners {
			listener(event);
		}
	}
}

impl fmt::Debug for ListListeners {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ListListeners")
			.field("count", &self.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[rstest]
	fn test_emit_reaches_every_listener() {
		let listeners = ListListeners::new();
		let total = Arc::new(AtomicUsize::new(0));
		for _ in 0..2 {
			let total = total.clone();
			listeners.connect(move |event| {
				total.fetch_add(event.rows, Ordering::SeqCst);
			});
		}
		listeners.emit(&ListRendered {
			rows: 3,
			html: String::new(),
		});
		assert_eq!(total.load(Ordering::SeqCst), 6);
	}
}
