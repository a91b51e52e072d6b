//! Reading uploaded spreadsheets into [`ImportRow`]s.
//!
//! Two formats are understood: XLSX workbooks, of which only the first
//! worksheet is read, and CSV. Anything that is not an `.xlsx` file is read as
//! CSV. The first row holds the column headers in both cases.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, XlsxError};
use thiserror::Error;

/// One data row of a spreadsheet, keyed by column header.
///
/// Cells keep the column order of the file. Numbers are stringified and empty
/// cells are empty strings.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportRow
{
	/// `(header, value)` pairs.
	cells: Vec<(String, String)>,
}

impl ImportRow
{
	/// Creates a row out of `(header, value)` pairs.
	pub fn new<I, H, V>(cells: I) -> Self
	where
		I: IntoIterator<Item = (H, V)>,
		H: Into<String>,
		V: Into<String>,
	{
		Self {
			cells: cells
				.into_iter()
				.map(|(header, value)| (header.into(), value.into()))
				.collect(),
		}
	}

	/// Pairs `values` up with `headers` by position.
	///
	/// Missing trailing values become empty strings; surplus values and
	/// columns without a header are dropped.
	fn zip<'a, I>(headers: &[String], values: I) -> Self
	where
		I: IntoIterator<Item = &'a str>,
	{
		let mut values = values.into_iter();
		let cells = headers
			.iter()
			.map(|header| (header, values.next().unwrap_or_default()))
			.filter(|(header, _)| !header.is_empty())
			.map(|(header, value)| (header.clone(), value.trim().to_owned()))
			.collect();

		Self { cells }
	}

	/// Returns the value of the column with exactly this header.
	pub fn get(&self, header: &str) -> Option<&str>
	{
		self.cells
			.iter()
			.find(|(candidate, _)| candidate == header)
			.map(|(_, value)| value.as_str())
	}

	/// Iterates over `(header, value)` pairs in column order.
	pub fn cells(&self) -> impl Iterator<Item = (&str, &str)>
	{
		self.cells
			.iter()
			.map(|(header, value)| (header.as_str(), value.as_str()))
	}

	/// Whether every cell of this row is empty.
	pub fn is_blank(&self) -> bool
	{
		self.cells.iter().all(|(_, value)| value.is_empty())
	}
}

/// The file formats we can import from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat
{
	/// An Office Open XML workbook.
	Xlsx,

	/// Comma separated values.
	Csv,
}

impl SpreadsheetFormat
{
	/// Picks the format based on a (lowercase) file extension.
	///
	/// Unknown extensions are treated as CSV.
	pub fn from_extension(extension: Option<&str>) -> Self
	{
		match extension {
			Some("xlsx") => Self::Xlsx,
			_ => Self::Csv,
		}
	}
}

/// Error that can occur while decoding a spreadsheet.
#[derive(Debug, Error)]
pub enum SpreadsheetError
{
	/// The file is not a valid XLSX workbook.
	#[error("failed to read workbook: {0}")]
	Xlsx(#[from] XlsxError),

	/// The workbook has no worksheets.
	#[error("workbook does not contain any worksheets")]
	NoWorksheet,

	/// The file is not valid CSV.
	#[error("failed to read csv: {0}")]
	Csv(#[from] csv::Error),
}

/// Decodes a spreadsheet into its data rows.
///
/// Blank rows are skipped. Either the whole file is decoded or an error is
/// returned.
#[tracing::instrument(level = "debug", skip(bytes), fields(len = bytes.len()), err(Debug))]
pub fn read_rows(bytes: &[u8], format: SpreadsheetFormat)
-> Result<Vec<ImportRow>, SpreadsheetError>
{
	let rows = match format {
		SpreadsheetFormat::Xlsx => read_xlsx(bytes)?,
		SpreadsheetFormat::Csv => read_csv(bytes)?,
	};

	tracing::debug!(rows = rows.len(), "decoded spreadsheet");

	Ok(rows)
}

/// Reads the first worksheet of an XLSX workbook.
fn read_xlsx(bytes: &[u8]) -> Result<Vec<ImportRow>, SpreadsheetError>
{
	let mut workbook = Xlsx::new(Cursor::new(bytes))?;
	let range = workbook
		.worksheet_range_at(0)
		.ok_or(SpreadsheetError::NoWorksheet)??;

	let mut rows = range.rows();
	let Some(headers) = rows.next() else {
		return Ok(Vec::new());
	};

	let headers = headers.iter().map(cell_to_string).collect::<Vec<_>>();
	let rows = rows
		.map(|row| {
			let values = row.iter().map(cell_to_string).collect::<Vec<_>>();
			ImportRow::zip(&headers, values.iter().map(String::as_str))
		})
		.filter(|row| !row.is_blank())
		.collect();

	Ok(rows)
}

/// Stringifies a single XLSX cell.
///
/// Integral numbers are written without a fractional part.
fn cell_to_string(cell: &Data) -> String
{
	match cell {
		Data::Empty => String::new(),
		Data::String(value) => value.trim().to_owned(),
		Data::Float(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
			format!("{value:.0}")
		}
		other => other.to_string(),
	}
}

/// Reads CSV text.
///
/// Invalid UTF-8 is replaced rather than rejected. Quoted fields may contain
/// separators and line breaks. Only blank lines are skipped; a line made of
/// separators is still a (empty) data row.
fn read_csv(bytes: &[u8]) -> Result<Vec<ImportRow>, SpreadsheetError>
{
	let text = String::from_utf8_lossy(bytes);
	let text = text.trim_start_matches('\u{feff}');

	let mut reader = csv::ReaderBuilder::new()
		.has_headers(true)
		.flexible(true)
		.trim(csv::Trim::All)
		.from_reader(text.as_bytes());

	let headers = reader
		.headers()?
		.iter()
		.map(ToOwned::to_owned)
		.collect::<Vec<_>>();

	let mut rows = Vec::new();

	for record in reader.records() {
		let record = record?;

		if is_blank_line(&record) {
			continue;
		}

		rows.push(ImportRow::zip(&headers, record.iter()));
	}

	Ok(rows)
}

/// Whether a CSV record came from a line without any separators or content.
fn is_blank_line(record: &csv::StringRecord) -> bool
{
	record.len() <= 1 && record.iter().all(str::is_empty)
}
