//! View tree and HTML serialization.

use std::borrow::Cow;
use std::fmt;

type Text = Cow<'static, str>;

/// Tags rendered without children or a closing tag.
const VOID_TAGS: &[&str] = &[
	"area", "br", "col", "hr", "img", "input", "link", "meta", "wbr",
];

/// A renderable node.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
	/// An element with attributes and children.
	Element(ElementView),
	/// A text node.
	Text(Text),
	/// Several views without a wrapper element.
	Fragment(Vec<View>),
	/// Renders nothing.
	Empty,
}

/// An element in the view tree.
///
/// Built with chained calls; attributes keep their insertion order, which
/// is also their rendering order.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementView {
	tag: Text,
	attrs: Vec<(Text, Text)>,
	children: Vec<View>,
}

impl ElementView {
	/// Creates an element.
	pub fn new(tag: impl Into<Text>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			children: Vec::new(),
		}
	}

	/// Sets an attribute. Setting the same name again overwrites the value
	/// in place.
	pub fn attr(mut self, name: impl Into<Text>, value: impl Into<Text>) -> Self {
		let (name, value) = (name.into(), value.into());
		if let Some(slot) = self.attrs.iter_mut().find(|(n, _)| *n == name) {
			slot.1 = value;
		} else {
			self.attrs.push((name, value));
		}
		self
	}

	/// Sets an attribute when `condition` holds.
	pub fn attr_if(self, condition: bool, name: impl Into<Text>, value: impl Into<Text>) -> Self {
		if condition { self.attr(name, value) } else { self }
	}

	/// Sets the `class` attribute.
	pub fn class(self, class: impl Into<Text>) -> Self {
		self.attr("class", class)
	}

	/// Appends a child.
	pub fn child(mut self, child: impl IntoView) -> Self {
		self.children.push(child.into_view());
		self
	}

	/// Appends several children.
	pub fn children(mut self, children: impl IntoIterator<Item = impl IntoView>) -> Self {
		self.children.extend(children.into_iter().map(IntoView::into_view));
		self
	}

	/// Inserts a child before the existing ones.
	pub fn prepend(mut self, child: impl IntoView) -> Self {
		self.children.insert(0, child.into_view());
		self
	}

	/// Tag name.
	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	/// Attributes in rendering order.
	pub fn attrs(&self) -> &[(Text, Text)] {
		&self.attrs
	}

	/// Value of attribute `name`.
	pub fn attr_value(&self, name: &str) -> Option<&str> {
		self.attrs
			.iter()
			.find_map(|(n, v)| (n == name).then_some(v.as_ref()))
	}

	/// Returns true if the class list contains `class`.
	pub fn has_class(&self, class: &str) -> bool {
		self.attr_value("class")
			.is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
	}

	/// Children.
	pub fn child_views(&self) -> &[View] {
		&self.children
	}

	/// Returns true for tags such as `input` that have no closing tag.
	pub fn is_void(&self) -> bool {
		VOID_TAGS.contains(&self.tag.as_ref())
	}

	/// Concatenated text of the element's descendants.
	pub fn text_content(&self) -> String {
		let mut text = String::new();
		for child in &self.children {
			child.push_text(&mut text);
		}
		text
	}

	/// Descendant elements carrying `data-role="<role>"`.
	pub fn find_by_role(&self, role: &str) -> Vec<&ElementView> {
		let mut found = Vec::new();
		for child in &self.children {
			child.collect(&|el| el.attr_value("data-role") == Some(role), &mut found);
		}
		found
	}
}

impl View {
	/// Creates an element.
	pub fn element(tag: impl Into<Text>) -> ElementView {
		ElementView::new(tag)
	}

	/// Creates a text node.
	pub fn text(content: impl Into<Text>) -> Self {
		View::Text(content.into())
	}

	/// Groups views without a wrapper.
	pub fn fragment(children: impl IntoIterator<Item = impl IntoView>) -> Self {
		View::Fragment(children.into_iter().map(IntoView::into_view).collect())
	}

	/// A view that renders nothing.
	pub fn empty() -> Self {
		View::Empty
	}

	/// The element, if this view is one.
	pub fn as_element(&self) -> Option<&ElementView> {
		if let View::Element(el) = self { Some(el) } else { None }
	}

	/// Direct child nodes of elements and fragments.
	fn nodes(&self) -> &[View] {
		match self {
			View::Element(el) => &el.children,
			View::Fragment(children) => children,
			View::Text(_) | View::Empty => &[],
		}
	}

	/// Renders the view as HTML with text and attribute values escaped.
	pub fn render_to_string(&self) -> String {
		self.to_string()
	}

	/// Concatenated text of every text node, unescaped.
	pub fn text_content(&self) -> String {
		let mut text = String::new();
		self.push_text(&mut text);
		text
	}

	fn push_text(&self, text: &mut String) {
		match self {
			View::Text(content) => text.push_str(content),
			_ => self.nodes().iter().for_each(|node| node.push_text(text)),
		}
	}

	/// Every element matching `predicate`, in document order.
	pub fn find_all<'a>(&'a self, predicate: &dyn Fn(&ElementView) -> bool) -> Vec<&'a ElementView> {
		let mut found = Vec::new();
		self.collect(predicate, &mut found);
		found
	}

	fn collect<'a>(&'a self, predicate: &dyn Fn(&ElementView) -> bool, found: &mut Vec<&'a ElementView>) {
		if let View::Element(el) = self {
			if predicate(el) {
				found.push(el);
			}
		}
		for node in self.nodes() {
			node.collect(predicate, found);
		}
	}

	/// Every element whose attribute `name` equals `value`.
	pub fn find_by_attr(&self, name: &str, value: &str) -> Vec<&ElementView> {
		self.find_all(&|el| el.attr_value(name) == Some(value))
	}

	/// Every element carrying `data-role="<role>"`.
	pub fn find_by_role(&self, role: &str) -> Vec<&ElementView> {
		self.find_by_attr("data-role", role)
	}
}

impl fmt::Display for View {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			View::Element(el) => fmt::Display::fmt(el, f),
			View::Text(content) => fmt::Display::fmt(&Escaped(content), f),
			View::Fragment(children) => children
				.iter()
				.try_for_each(|child| fmt::Display::fmt(child, f)),
			View::Empty => Ok(()),
		}
	}
}

impl fmt::Display for ElementView {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "<{}", self.tag)?;
		for (name, value) in &self.attrs {
			write!(f, " {}=\"{}\"", name, Escaped(value))?;
		}
		if self.is_void() {
			return f.write_str(" />");
		}
		f.write_str(">")?;
		for child in &self.children {
			fmt::Display::fmt(child, f)?;
		}
		write!(f, "</{}>", self.tag)
	}
}

/// Writes a string with HTML special characters replaced by entities.
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut rest = self.0;
		while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
			f.write_str(&rest[..pos])?;
			f.write_str(match rest.as_bytes()[pos] {
				b'&' => "&amp;",
				b'<' => "&lt;",
				b'>' => "&gt;",
				b'"' => "&quot;",
				_ => "&#x27;",
			})?;
			rest = &rest[pos + 1..];
		}
		f.write_str(rest)
	}
}

/// Conversion into a [`View`], accepted wherever a child is expected.
pub trait IntoView {
	/// Converts into a view.
	fn into_view(self) -> View;
}

impl IntoView for View {
	fn into_view(self) -> View {
		self
	}
}

impl IntoView for ElementView {
	fn into_view(self) -> View {
		View::Element(self)
	}
}

impl IntoView for String {
	fn into_view(self) -> View {
		View::text(self)
	}
}

impl IntoView for &'static str {
	fn into_view(self) -> View {
		View::text(self)
	}
}

impl<T: IntoView> IntoView for Option<T> {
	fn into_view(self) -> View {
		self.map_or(View::Empty, IntoView::into_view)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn table() -> View {
		let row = |id: &'static str, title: &'static str| {
			ElementView::new("tr")
				.attr("data-role", "row")
				.attr("data-id", id)
				.child(ElementView::new("td").class("title").child(title))
		};
		ElementView::new("table")
			.child(row("1", "Hello"))
			.child(row("2", "World"))
			.into_view()
	}

	#[rstest]
	fn test_nested_markup() {
		let view = ElementView::new("p")
			.child("Saved ")
			.child(ElementView::new("em").child("3"))
			.child(" rows")
			.into_view();
		assert_eq!(view.render_to_string(), "<p>Saved <em>3</em> rows</p>");
	}

	#[rstest]
	#[case("input", "<input type=\"text\" />")]
	#[case("textarea", "<textarea type=\"text\"></textarea>")]
	fn test_void_tags(#[case] tag: &'static str, #[case] expected: &str) {
		let view = ElementView::new(tag).attr("type", "text").into_view();
		assert_eq!(view.render_to_string(), expected);
	}

	#[rstest]
	fn test_attr_replaces_previous_value() {
		let el = ElementView::new("i").class("a").class("b");
		assert_eq!(el.attrs().len(), 1);
		assert!(el.has_class("b"));
		assert!(!el.has_class("a"));
	}

	#[rstest]
	fn test_escaping() {
		let view = ElementView::new("td")
			.attr("data-id", "a\"b")
			.child("<b>Tom & Jerry's</b>")
			.into_view();
		assert_eq!(
			view.render_to_string(),
			"<td data-id=\"a&quot;b\">&lt;b&gt;Tom &amp; Jerry&#x27;s&lt;/b&gt;</td>"
		);
		assert_eq!(view.text_content(), "<b>Tom & Jerry's</b>");
	}

	#[rstest]
	fn test_find_by_role() {
		let view = table();
		let rows = view.find_by_role("row");
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[1].attr_value("data-id"), Some("2"));
		assert_eq!(rows[0].text_content(), "Hello");
		assert_eq!(view.find_by_attr("class", "title").len(), 2);
	}

	#[rstest]
	fn test_prepend_and_fragment() {
		let label = ElementView::new("label").child("Done").prepend(ElementView::new("input"));
		assert_eq!(
			label.into_view().render_to_string(),
			"<label><input />Done</label>"
		);
		assert_eq!(View::fragment(["A", "B"]).render_to_string(), "AB");
		assert_eq!(None::<String>.into_view().render_to_string(), "");
	}
}
