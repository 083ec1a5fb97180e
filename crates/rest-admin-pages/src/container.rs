//! Render targets.

use crate::view::View;
use parking_lot::RwLock;
use std::sync::Arc;

/// Where a widget writes its current screen.
///
/// Each call to [`Container::mount`] replaces whatever was shown before.
pub trait Container: Send + Sync {
	/// Replaces the container contents with `view`.
	fn mount(&self, view: &View);
}

/// In-memory container that keeps the last mounted view and its HTML.
///
/// Clones share the same contents, so an embedder can keep a handle and
/// read what the widget rendered.
#[derive(Debug, Clone, Default)]
pub struct HtmlContainer {
	inner: Arc<RwLock<Mounted>>,
}

#[derive(Debug, Default)]
struct Mounted {
	view: Option<View>,
	html: String,
	mounts: usize,
}

impl HtmlContainer {
	/// Creates an empty container.
	pub fn new() -> Self {
		Self::default()
	}

	/// HTML of the last mounted view.
	pub fn html(&self) -> String {
		self.inner.read().html.clone()
	}

	/// The last mounted view.
	pub fn view(&self) -> Option<View> {
		self.inner.read().view.clone()
	}

	/// How many times a view was mounted.
	pub fn mount_count(&self) -> usize {
		self.inner.read().mounts
	}

	/// Empties the container.
	pub fn clear(&self) {
		let mut mounted = self.inner.write();
		mounted.view = None;
		mounted.html.clear();
	}
}

impl Container for HtmlContainer {
	fn mount(&self, view: &View) {
		let html = view.render_to_string();
		let mut mounted = self.inner.write();
		mounted.view = Some(view.clone());
		mounted.html = html;
		mounted.mounts += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::view::{ElementView, IntoView};
	use rstest::rstest;

	#[rstest]
	fn test_mount_replaces_contents() {
		let container = HtmlContainer::new();
		let handle = container.clone();

		container.mount(&ElementView::new("p").child("one").into_view());
		container.mount(&ElementView::new("p").child("two").into_view());

		assert_eq!(handle.html(), "<p>two</p>");
		assert_eq!(handle.mount_count(), 2);
		assert_eq!(handle.view().map(|v| v.text_content()), Some("two".to_string()));
	}

	#[rstest]
	fn test_clear() {
		let container = HtmlContainer::new();
		container.mount(&View::text("x"));
		container.clear();
		assert_eq!(container.html(), "");
		assert!(container.view().is_none());
	}
}
