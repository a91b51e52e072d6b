//! Finding semantic fields in an [`ImportRow`].
//!
//! None of these functions fail. A field that cannot be found resolves to
//! `None`, which callers treat as "omitted".

use super::spreadsheet::ImportRow;
use super::vocabulary::FieldAliases;

/// Returns the first non-empty value among the `candidates` headers.
///
/// Headers are matched exactly, in the order given.
pub fn resolve_field<'row>(row: &'row ImportRow, candidates: &[&str]) -> Option<&'row str>
{
	candidates
		.iter()
		.filter_map(|header| row.get(header))
		.find(|value| !value.is_empty())
}

/// Returns the first non-empty value whose header contains `partial`.
///
/// The first pass compares case-insensitively. The second pass also ignores
/// punctuation and whitespace on both sides, so `course number` matches
/// `Course_Number`.
pub fn resolve_field_by_partial_name<'row>(row: &'row ImportRow, partial: &str) -> Option<&'row str>
{
	let partial_lower = partial.to_lowercase();
	let partial_normalized = normalize(partial);

	let contains_lower = |header: &str| header.to_lowercase().contains(&partial_lower);
	let contains_normalized = |header: &str| {
		!partial_normalized.is_empty() && normalize(header).contains(&partial_normalized)
	};

	find_non_empty(row, contains_lower).or_else(|| find_non_empty(row, contains_normalized))
}

/// Resolves a field through its exact aliases, then its partial name.
pub fn resolve<'row>(row: &'row ImportRow, aliases: &FieldAliases) -> Option<&'row str>
{
	resolve_field(row, aliases.exact).or_else(|| {
		let partial = aliases.partial?;
		let value = resolve_field_by_partial_name(row, partial)?;

		tracing::trace!(%partial, %value, "resolved field by partial name");

		Some(value)
	})
}

/// Returns the first non-empty value whose header satisfies `matches`.
fn find_non_empty<'row, F>(row: &'row ImportRow, matches: F) -> Option<&'row str>
where
	F: Fn(&str) -> bool,
{
	row.cells()
		.find(|(header, value)| !value.is_empty() && matches(*header))
		.map(|(_, value)| value)
}

/// Lowercases and strips everything but letters and digits.
fn normalize(value: &str) -> String
{
	value
		.chars()
		.filter(|c| c.is_alphanumeric())
		.flat_map(char::to_lowercase)
		.collect()
}

#[cfg(test)]
mod tests
{
	use super::*;
	use crate::testing;

	fn row() -> ImportRow
	{
		ImportRow::new([
			("SKU", ""),
			("sku", "A-1"),
			("Course Description (long)", "An introduction."),
			("CPA_Course_Number", "CPA-77"),
		])
	}

	#[test]
	fn exact_candidates_skip_empty_values() -> color_eyre::Result<()>
	{
		testing::assert_eq!(resolve_field(&row(), &["SKU", "sku"]), Some("A-1"));
		testing::assert_eq!(resolve_field(&row(), &["Title"]), None);

		Ok(())
	}

	#[test]
	fn partial_names_match_case_insensitively() -> color_eyre::Result<()>
	{
		testing::assert_eq!(
			resolve_field_by_partial_name(&row(), "description"),
			Some("An introduction.")
		);

		Ok(())
	}

	#[test]
	fn partial_names_ignore_punctuation() -> color_eyre::Result<()>
	{
		testing::assert_eq!(resolve_field_by_partial_name(&row(), "cpa course number"), Some("CPA-77"));
		testing::assert_eq!(resolve_field_by_partial_name(&row(), "cfp course number"), None);

		Ok(())
	}

	#[test]
	fn aliases_fall_back_to_partial_names() -> color_eyre::Result<()>
	{
		let aliases = FieldAliases::with_partial(&["Description"], "description");

		testing::assert_eq!(resolve(&row(), &aliases), Some("An introduction."));
		testing::assert_eq!(resolve(&row(), &FieldAliases::exact(&["Description"])), None);

		Ok(())
	}
}
