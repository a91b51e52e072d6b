//! Extracting prices and credits from an [`ImportRow`].

use cpe::CourseFormat;

use super::resolver::{resolve, resolve_field_by_partial_name};
use super::spreadsheet::ImportRow;
use super::vocabulary::ImportVocabulary;
use crate::services::courses::draft::{limits, truncate};
use crate::services::courses::{CreditEntry, FormatEntry, DEFAULT_ONLINE_PRICE};

/// Builds the formats a row's course is sold in.
///
/// Formats are only included if their price is positive, except for online
/// delivery, which is always included and falls back to
/// [`DEFAULT_ONLINE_PRICE`].
pub fn extract_formats(row: &ImportRow, vocabulary: &ImportVocabulary) -> Vec<FormatEntry>
{
	vocabulary
		.formats
		.iter()
		.filter_map(|columns| {
			let price = resolve(row, &columns.price)
				.map(parse_amount)
				.filter(|price| *price > 0.0);

			match (columns.format, price) {
				(format, Some(price)) => Some(FormatEntry { format, price }),
				(CourseFormat::Online, None) => Some(FormatEntry {
					format: CourseFormat::Online,
					price: DEFAULT_ONLINE_PRICE,
				}),
				(_, None) => None,
			}
		})
		.collect()
}

/// Builds the credits a row's course awards.
///
/// Credit types with no positive amount are left out.
pub fn extract_credits(row: &ImportRow, vocabulary: &ImportVocabulary) -> Vec<CreditEntry>
{
	vocabulary
		.credits
		.iter()
		.filter_map(|columns| {
			let amount = resolve(row, &columns.amount)
				.map(parse_amount)
				.filter(|amount| *amount > 0.0)?;

			let course_number = resolve_field_by_partial_name(row, columns.course_number)
				.map(|number| truncate(number, limits::COURSE_NUMBER))
				.unwrap_or_default();

			Some(CreditEntry { credit_type: columns.credit_type, amount, course_number })
		})
		.collect()
}

/// Parses a price or credit amount.
///
/// A leading `$` and thousands separators are accepted. Anything that does
/// not parse into a finite number counts as zero.
pub fn parse_amount(raw: &str) -> f64
{
	let cleaned = raw.trim().trim_start_matches('$').replace(',', "");

	cleaned
		.trim()
		.parse::<f64>()
		.ok()
		.filter(|value| value.is_finite())
		.unwrap_or_default()
}

#[cfg(test)]
mod tests
{
	use cpe::CreditType;

	use super::*;
	use crate::testing;

	fn formats(cells: &[(&str, &str)]) -> Vec<FormatEntry>
	{
		extract_formats(&ImportRow::new(cells.iter().copied()), &ImportVocabulary::US)
	}

	fn credits(cells: &[(&str, &str)]) -> Vec<CreditEntry>
	{
		extract_credits(&ImportRow::new(cells.iter().copied()), &ImportVocabulary::US)
	}

	#[test]
	fn explicit_online_price() -> color_eyre::Result<()>
	{
		testing::assert_eq!(formats(&[("Online Price", "25")]), [FormatEntry {
			format: CourseFormat::Online,
			price: 25.0,
		}]);

		Ok(())
	}

	#[test]
	fn online_price_defaults_to_15() -> color_eyre::Result<()>
	{
		let expected = [FormatEntry { format: CourseFormat::Online, price: DEFAULT_ONLINE_PRICE }];

		testing::assert_eq!(formats(&[("Title", "Ethics")]), expected);
		testing::assert_eq!(formats(&[("Online Price", "free")]), expected);
		testing::assert_eq!(formats(&[("Online Price", "0")]), expected);

		Ok(())
	}

	#[test]
	fn other_formats_need_a_positive_price() -> color_eyre::Result<()>
	{
		let formats = formats(&[("Hardcopy Price", "$1,250.50"), ("Video Price", "0")]);

		testing::assert_eq!(formats, [
			FormatEntry { format: CourseFormat::Online, price: DEFAULT_ONLINE_PRICE },
			FormatEntry { format: CourseFormat::Hardcopy, price: 1250.5 },
		]);

		Ok(())
	}

	#[test]
	fn zero_credits_are_left_out() -> color_eyre::Result<()>
	{
		testing::assert!(credits(&[("CPA Credits", "0")]).is_empty());

		Ok(())
	}

	#[test]
	fn credits_carry_their_course_number() -> color_eyre::Result<()>
	{
		let credits = credits(&[
			("CPA Credits", "4"),
			("CPA Course Number", "CPA-1234"),
			("CFP Credits", "2.5"),
		]);

		testing::assert_eq!(credits, [
			CreditEntry {
				credit_type: CreditType::Cpa,
				amount: 4.0,
				course_number: String::from("CPA-1234"),
			},
			CreditEntry {
				credit_type: CreditType::Cfp,
				amount: 2.5,
				course_number: String::new(),
			},
		]);

		Ok(())
	}

	#[test]
	fn unparsable_amounts_count_as_zero() -> color_eyre::Result<()>
	{
		testing::assert_eq!(parse_amount("abc"), 0.0);
		testing::assert_eq!(parse_amount(""), 0.0);
		testing::assert_eq!(parse_amount("NaN"), 0.0);
		testing::assert_eq!(parse_amount(" $ 12 "), 12.0);

		Ok(())
	}
}
