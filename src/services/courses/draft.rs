//! The [`CourseDraft`] type and the storage limits of its fields.

/// Maximum lengths of course fields, in characters.
pub mod limits
{
	/// Maximum length of a SKU.
	pub const SKU: usize = 50;

	/// Maximum length of a title.
	pub const TITLE: usize = 250;

	/// Maximum length of a description.
	pub const DESCRIPTION: usize = 2000;

	/// Maximum length of an author list.
	pub const AUTHOR: usize = 200;

	/// Maximum length of a subject.
	pub const MAIN_SUBJECT: usize = 95;

	/// Maximum length of a file URL.
	pub const URL: usize = 255;

	/// Maximum length of a credit's course number.
	pub const COURSE_NUMBER: usize = 50;
}

/// The textual fields of a course that is about to be created.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CourseDraft
{
	pub sku: String,
	pub title: String,
	pub description: String,
	pub author: String,
	pub main_subject: String,
	pub table_of_contents_url: String,
	pub course_content_url: String,
}

impl CourseDraft
{
	/// Truncates every field to its storage limit.
	pub fn truncated(self) -> Self
	{
		Self {
			sku: truncate(&self.sku, limits::SKU),
			title: truncate(&self.title, limits::TITLE),
			description: truncate(&self.description, limits::DESCRIPTION),
			author: truncate(&self.author, limits::AUTHOR),
			main_subject: truncate(&self.main_subject, limits::MAIN_SUBJECT),
			table_of_contents_url: truncate(&self.table_of_contents_url, limits::URL),
			course_content_url: truncate(&self.course_content_url, limits::URL),
		}
	}
}

/// Cuts `value` down to at most `max` characters.
///
/// Never splits a code point.
pub fn truncate(value: &str, max: usize) -> String
{
	let mut value = value.to_owned();

	if let Some((end, _)) = value.char_indices().nth(max) {
		value.truncate(end);
	}

	value
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	#[test]
	fn truncate_counts_characters() -> color_eyre::Result<()>
	{
		testing::assert_eq!(truncate("héllo", 2), "hé");
		testing::assert_eq!(truncate("short", 50), "short");
		testing::assert_eq!(truncate("", 3), "");

		Ok(())
	}

	#[test]
	fn truncated_drafts_respect_limits() -> color_eyre::Result<()>
	{
		let long = "ü".repeat(5000);
		let draft = CourseDraft {
			sku: long.clone(),
			title: long.clone(),
			description: long.clone(),
			author: long.clone(),
			main_subject: long.clone(),
			table_of_contents_url: long.clone(),
			course_content_url: long,
		}
		.truncated();

		testing::assert_eq!(draft.sku.chars().count(), limits::SKU);
		testing::assert_eq!(draft.title.chars().count(), limits::TITLE);
		testing::assert_eq!(draft.description.chars().count(), limits::DESCRIPTION);
		testing::assert_eq!(draft.author.chars().count(), limits::AUTHOR);
		testing::assert_eq!(draft.main_subject.chars().count(), limits::MAIN_SUBJECT);
		testing::assert_eq!(draft.table_of_contents_url.chars().count(), limits::URL);
		testing::assert_eq!(draft.course_content_url.chars().count(), limits::URL);

		Ok(())
	}
}
