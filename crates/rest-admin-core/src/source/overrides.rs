use super::DataSource;
use async_trait::async_trait;
use futures::future::BoxFuture;
use rest_admin_types::{AdminResult, Collection, Record, Value};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// Replacement for `create` or `update`.
pub type RecordAction = Arc<dyn Fn(Record) -> BoxFuture<'static, AdminResult<Record>> + Send + Sync>;

/// Replacement for `remove`.
pub type RemoveAction = Arc<dyn Fn(Record) -> BoxFuture<'static, AdminResult<()>> + Send + Sync>;

/// Replacement for `rank`.
pub type RankAction = Arc<dyn Fn(Vec<Value>) -> BoxFuture<'static, AdminResult<()>> + Send + Sync>;

/// Replacement for `load_data`.
pub type LoadAction = Arc<dyn Fn() -> BoxFuture<'static, AdminResult<Vec<Record>>> + Send + Sync>;

/// Replacement for `refresh_data`; receives the collection to fill.
pub type RefreshAction =
	Arc<dyn Fn(Collection) -> BoxFuture<'static, AdminResult<()>> + Send + Sync>;

/// Per-action replacements. Unset actions fall through to the base source.
///
/// # Example
///
/// ```rust
/// use rest_admin_core::source::ActionOverrides;
/// use rest_admin_types::Record;
///
/// let overrides = ActionOverrides::new().create(|mut record: Record| async move {
///     record.set("id", 42);
///     Ok(record)
/// });
/// assert!(!overrides.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct ActionOverrides {
	create: Option<RecordAction>,
	update: Option<RecordAction>,
	remove: Option<RemoveAction>,
	rank: Option<RankAction>,
	load_data: Option<LoadAction>,
	refresh_data: Option<RefreshAction>,
}

impl ActionOverrides {
	/// Creates an empty set of overrides.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns true if no action is overridden.
	pub fn is_empty(&self) -> bool {
		self.create.is_none()
			&& self.update.is_none()
			&& self.remove.is_none()
			&& self.rank.is_none()
			&& self.load_data.is_none()
			&& self.refresh_data.is_none()
	}

	/// Replaces `create`.
	pub fn create<F, Fut>(mut self, f: F) -> Self
	where
		F: Fn(Record) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = AdminResult<Record>> + Send + 'static,
	{
		self.create = Some(Arc::new(move |record| Box::pin(f(record))));
		self
	}

	/// Replaces `update`.
	pub fn update<F, Fut>(mut self, f: F) -> Self
	where
		F: Fn(Record) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = AdminResult<Record>> + Send + 'static,
	{
		self.update = Some(Arc::new(move |record| Box::pin(f(record))));
		self
	}

	/// Replaces `remove`.
	pub fn remove<F, Fut>(mut self, f: F) -> Self
	where
		F: Fn(Record) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = AdminResult<()>> + Send + 'static,
	{
		self.remove = Some(Arc::new(move |record| Box::pin(f(record))));
		self
	}

	/// Replaces `rank`.
	pub fn rank<F, Fut>(mut self, f: F) -> Self
	where
		F: Fn(Vec<Value>) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = AdminResult<()>> + Send + 'static,
	{
		self.rank = Some(Arc::new(move |order| Box::pin(f(order))));
		self
	}

	/// Replaces `load_data`.
	///
	/// For a remote source this also changes what a refresh fetches.
	pub fn load_data<F, Fut>(mut self, f: F) -> Self
	where
		F: Fn() -> Fut + Send + Sync + 'static,
		Fut: Future<Output = AdminResult<Vec<Record>>> + Send + 'static,
	{
		self.load_data = Some(Arc::new(move || Box::pin(f())));
		self
	}

	/// Replaces `refresh_data`.
	pub fn refresh_data<F, Fut>(mut self, f: F) -> Self
	where
		F: Fn(Collection) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = AdminResult<()>> + Send + 'static,
	{
		self.refresh_data = Some(Arc::new(move |collection| Box::pin(f(collection))));
		self
	}
}

impl fmt::Debug for ActionOverrides {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ActionOverrides")
			.field("create", &self.create.is_some())
			.field("update", &self.update.is_some())
			.field("remove", &self.remove.is_some())
			.field("rank", &self.rank.is_some())
			.field("load_data", &self.load_data.is_some())
			.field("refresh_data", &self.refresh_data.is_some())
			.finish()
	}
}

/// A source with some actions replaced.
pub struct OverriddenSource {
	base: Box<dyn DataSource>,
	overrides: ActionOverrides,
}

impl OverriddenSource {
	/// Wraps `base`.
	pub fn new(base: Box<dyn DataSource>, overrides: ActionOverrides) -> Self {
		Self { base, overrides }
	}
}

#[async_trait]
impl DataSource for OverriddenSource {
	fn collection(&self) -> Collection {
		self.base.collection()
	}

	fn is_local(&self) -> bool {
		self.base.is_local()
	}

	async fn load(&self) -> AdminResult<Vec<Record>> {
		match &self.overrides.load_data {
			Some(load) => load().await,
			None => self.base.load().await,
		}
	}

	async fn refresh(&self) -> AdminResult<()> {
		if let Some(refresh) = &self.overrides.refresh_data {
			return refresh(self.base.collection()).await;
		}
		match &self.overrides.load_data {
			Some(load) if !self.base.is_local() => {
				let records = load().await?;
				self.base.collection().replace_all(records);
				Ok(())
			}
			_ => self.base.refresh().await,
		}
	}

	async fn create(&self, record: Record) -> AdminResult<Record> {
		match &self.overrides.create {
			Some(create) => create(record).await,
			None => self.base.create(record).await,
		}
	}

	async fn update(&self, record: Record) -> AdminResult<Record> {
		match &self.overrides.update {
			Some(update) => update(record).await,
			None => self.base.update(record).await,
		}
	}

	async fn remove(&self, record: &Record) -> AdminResult<()> {
		match &self.overrides.remove {
			Some(remove) => remove(record.clone()).await,
			None => self.base.remove(record).await,
		}
	}

	async fn reorder(&self, order: &[Value]) -> AdminResult<()> {
		match &self.overrides.rank {
			Some(rank) => rank(order.to_vec()).await,
			None => self.base.reorder(order).await,
		}
	}
}

impl fmt::Debug for OverriddenSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("OverriddenSource")
			.field("local", &self.base.is_local())
			.field("overrides", &self.overrides)
			.finish_non_exhaustive()
	}
}
