//! The column names we look for when importing courses.
//!
//! Spreadsheets exported from different systems name their columns
//! differently. Every semantic field therefore has an ordered list of exact
//! header spellings, and free-text fields additionally have a partial name
//! that is matched fuzzily if none of the exact spellings are present.

use cpe::{CourseFormat, CreditType, StateTable};

/// How to find one semantic field in a row.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases
{
	/// Exact header spellings, in order of preference.
	pub exact: &'static [&'static str],

	/// A fragment of the header name used as a fallback.
	pub partial: Option<&'static str>,
}

impl FieldAliases
{
	/// Aliases without a fuzzy fallback.
	pub const fn exact(exact: &'static [&'static str]) -> Self
	{
		Self { exact, partial: None }
	}

	/// Aliases with a fuzzy fallback.
	pub const fn with_partial(exact: &'static [&'static str], partial: &'static str) -> Self
	{
		Self { exact, partial: Some(partial) }
	}
}

/// Aliases for the textual course fields.
#[derive(Debug, Clone, Copy)]
#[allow(clippy::missing_docs_in_private_items)]
pub struct CourseFields
{
	pub sku: FieldAliases,
	pub title: FieldAliases,
	pub description: FieldAliases,
	pub author: FieldAliases,
	pub main_subject: FieldAliases,
	pub table_of_contents_url: FieldAliases,
	pub course_content_url: FieldAliases,
	pub states: FieldAliases,
}

/// Columns holding the price of a format.
#[derive(Debug, Clone, Copy)]
pub struct FormatColumns
{
	/// The format.
	pub format: CourseFormat,

	/// Where to find the price.
	pub price: FieldAliases,
}

/// Columns holding the credits of a credit type.
#[derive(Debug, Clone, Copy)]
pub struct CreditColumns
{
	/// The credit type.
	pub credit_type: CreditType,

	/// Where to find the amount of credits.
	pub amount: FieldAliases,

	/// Partial header name of the matching course number column.
	pub course_number: &'static str,
}

/// Everything the importer needs to know about the shape of a spreadsheet.
#[derive(Debug, Clone, Copy)]
pub struct ImportVocabulary
{
	/// Textual fields.
	pub fields: CourseFields,

	/// Price columns per format.
	pub formats: &'static [FormatColumns],

	/// Credit columns per credit type.
	pub credits: &'static [CreditColumns],

	/// State names we understand.
	pub states: StateTable,
}

impl ImportVocabulary
{
	/// The vocabulary of US course spreadsheets.
	pub const US: Self = Self {
		fields: COURSE_FIELDS,
		formats: &FORMAT_COLUMNS,
		credits: &CREDIT_COLUMNS,
		states: StateTable::US,
	};
}

impl Default for ImportVocabulary
{
	fn default() -> Self
	{
		Self::US
	}
}

const COURSE_FIELDS: CourseFields = CourseFields {
	sku: FieldAliases::exact(&[
		"SKU",
		"sku",
		"Sku",
		"Course SKU",
		"course_sku",
		"Course Code",
		"course_code",
		"Product Code",
	]),
	title: FieldAliases::exact(&[
		"Title",
		"title",
		"Course Title",
		"course_title",
		"Course Name",
		"course_name",
		"Name",
		"name",
	]),
	description: FieldAliases::with_partial(
		&["Description", "description", "Course Description", "course_description"],
		"description",
	),
	author: FieldAliases::with_partial(
		&["Author", "author", "Authors", "authors", "Author(s)", "Instructor"],
		"author",
	),
	main_subject: FieldAliases::with_partial(
		&["Main Subject", "main_subject", "Subject", "subject", "Category", "category"],
		"subject",
	),
	table_of_contents_url: FieldAliases::with_partial(
		&[
			"Table of Contents URL",
			"table_of_contents_url",
			"Table Of Contents",
			"TOC URL",
			"toc_url",
		],
		"table of contents",
	),
	course_content_url: FieldAliases::with_partial(
		&[
			"Course Content URL",
			"course_content_url",
			"Content URL",
			"content_url",
			"Course PDF",
		],
		"content url",
	),
	states: FieldAliases::with_partial(
		&["States", "states", "State", "state", "Approved States", "approved_states"],
		"state",
	),
};

const FORMAT_COLUMNS: [FormatColumns; 3] = [
	FormatColumns {
		format: CourseFormat::Online,
		price: FieldAliases::exact(&[
			"Online Price",
			"online_price",
			"Online price",
			"online price",
			"Online",
			"online",
			"Price",
			"price",
		]),
	},
	FormatColumns {
		format: CourseFormat::Hardcopy,
		price: FieldAliases::exact(&[
			"Hardcopy Price",
			"hardcopy_price",
			"Hard Copy Price",
			"hard_copy_price",
			"Hardcopy price",
			"hardcopy price",
			"Hardcopy",
			"hardcopy",
		]),
	},
	FormatColumns {
		format: CourseFormat::Video,
		price: FieldAliases::exact(&[
			"Video Price",
			"video_price",
			"Video price",
			"video price",
			"Video",
			"video",
		]),
	},
];

const CREDIT_COLUMNS: [CreditColumns; 5] = [
	CreditColumns {
		credit_type: CreditType::Cpa,
		amount: FieldAliases::exact(&[
			"CPA Credits",
			"cpa_credits",
			"CPA credits",
			"CPA Credit",
			"CPA",
			"cpa",
		]),
		course_number: "cpa course number",
	},
	CreditColumns {
		credit_type: CreditType::Cfp,
		amount: FieldAliases::exact(&[
			"CFP Credits",
			"cfp_credits",
			"CFP credits",
			"CFP Credit",
			"CFP",
			"cfp",
		]),
		course_number: "cfp course number",
	},
	CreditColumns {
		credit_type: CreditType::EaOtrp,
		amount: FieldAliases::exact(&[
			"EA/OTRP Credits",
			"ea_otrp_credits",
			"EA OTRP Credits",
			"EA/OTRP credits",
			"EA Credits",
			"EA/OTRP",
			"ea/otrp",
		]),
		course_number: "ea/otrp course number",
	},
	CreditColumns {
		credit_type: CreditType::Erpa,
		amount: FieldAliases::exact(&[
			"ERPA Credits",
			"erpa_credits",
			"ERPA credits",
			"ERPA Credit",
			"ERPA",
			"erpa",
		]),
		course_number: "erpa course number",
	},
	CreditColumns {
		credit_type: CreditType::Cdfa,
		amount: FieldAliases::exact(&[
			"CDFA Credits",
			"cdfa_credits",
			"CDFA credits",
			"CDFA Credit",
			"CDFA",
			"cdfa",
		]),
		course_number: "cdfa course number",
	},
];
