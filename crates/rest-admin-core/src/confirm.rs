//! Deletion confirmation.

/// Message shown before deleting a record unless configured otherwise.
pub const DEFAULT_REMOVE_CONFIRM: &str = "Are you sure you want to delete this item?";

/// Asks the user to confirm a destructive action.
pub trait ConfirmPrompt: Send + Sync {
	/// Returns true if the user agrees.
	fn confirm(&self, message: &str) -> bool;
}

/// Prompt that always agrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
	fn confirm(&self, _message: &str) -> bool {
		true
	}
}

impl<F> ConfirmPrompt for F
where
	F: Fn(&str) -> bool + Send + Sync,
{
	fn confirm(&self, message: &str) -> bool {
		self(message)
	}
}
