//! This module contains the [`ExtensionMembers`] struct.
//!
//! It represents arbitrary additional fields to add to an error response.

use std::fmt;

use serde::Serialize;

/// Extra top-level fields of an error response body.
#[derive(Default, Serialize)]
#[serde(transparent)]
pub struct ExtensionMembers
{
	/// JSON object that encodes the extra values.
	obj: serde_json::Map<String, serde_json::Value>,
}

impl ExtensionMembers
{
	/// Creates a new, empty, [`ExtensionMembers`].
	pub fn new() -> Self
	{
		Self::default()
	}

	/// Adds an extension member.
	///
	/// Values that fail to serialize are dropped.
	pub fn add<N, V>(&mut self, name: N, value: &V)
	where
		N: Into<String>,
		V: Serialize + ?Sized,
	{
		let name = name.into();

		match serde_json::to_value(value) {
			Ok(value) => {
				self.obj.insert(name, value);
			}
			Err(error) => {
				tracing::warn!(%name, %error, "dropping unserializable extension member");
			}
		}
	}

	pub fn is_empty(&self) -> bool
	{
		self.obj.is_empty()
	}
}

impl fmt::Debug for ExtensionMembers
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		fmt::Debug::fmt(&self.obj, f)
	}
}
