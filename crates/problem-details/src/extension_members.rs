//! The [`ExtensionMembers`] type.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use serde::Serialize;

type Fields = serde_json::Map<String, serde_json::Value>;

/// Extra fields to include in [`ProblemDetails`].
///
/// This corresponds to [Section 3.2] of the [RFC].
///
/// [`ProblemDetails`]: crate::ProblemDetails
/// [Section 3.2]: https://www.rfc-editor.org/rfc/rfc9457.html#section-3.2
/// [RFC]: https://www.rfc-editor.org/rfc/rfc9457.html
#[derive(Default, Clone, PartialEq, Eq)]
pub struct ExtensionMembers
{
	fields: Fields,
}

/// An iterator over the members stored in [`ExtensionMembers`].
pub type Iter<'a> = serde_json::map::Iter<'a>;

impl ExtensionMembers
{
	/// Creates a new empty [`ExtensionMembers`].
	pub fn new() -> Self
	{
		Self::default()
	}

	/// Returns the number of extension members.
	pub fn count(&self) -> usize
	{
		self.fields.len()
	}

	/// Returns the value of the extension member with the given `name`, if any.
	pub fn get<Q>(&self, name: &Q) -> Option<&serde_json::Value>
	where
		String: Borrow<Q>,
		Q: Eq + Ord + Hash + ?Sized,
	{
		self.fields.get(name)
	}

	/// Adds a new extension member.
	///
	/// If there was already a member for the given `name`, its old value will be returned.
	pub fn add<V>(
		&mut self,
		name: impl Into<String>,
		value: &V,
	) -> Result<Option<serde_json::Value>, serde_json::Error>
	where
		V: Serialize + ?Sized,
	{
		serde_json::to_value(value).map(|value| self.fields.insert(name.into(), value))
	}

	/// Returns an iterator over the members stored in `self`.
	pub fn iter(&self) -> Iter<'_>
	{
		self.fields.iter()
	}
}

impl fmt::Debug for ExtensionMembers
{
	fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt.debug_map().entries(&self.fields).finish()
	}
}

impl<'a> IntoIterator for &'a ExtensionMembers
{
	type Item = (&'a String, &'a serde_json::Value);
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Self::IntoIter
	{
		self.iter()
	}
}
