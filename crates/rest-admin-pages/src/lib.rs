//! # rest-admin-pages
//!
//! Headless view layer for rest-admin.
//!
//! Widgets describe their output as a [`View`] tree. A view renders to an
//! HTML string with attribute and text escaping, and can be queried by
//! `data-*` attributes, which is how embedders and tests locate rows,
//! buttons and fields. A [`Container`] is the render target a widget writes
//! its current screen into.
//!
//! ## Example
//!
//! ```rust
//! use rest_admin_pages::{Container, ElementView, HtmlContainer, IntoView};
//!
//! let view = ElementView::new("button")
//!     .attr("data-role", "new")
//!     .child("New")
//!     .into_view();
//!
//! let container = HtmlContainer::new();
//! container.mount(&view);
//! assert_eq!(container.html(), "<button data-role=\"new\">New</button>");
//! ```

#![warn(missing_docs)]

pub mod container;
pub mod view;

pub use container::{Container, HtmlContainer};
pub use view::{ElementView, IntoView, View};
