use std::result::Result as StdResult;

use thiserror::Error as ThisError;

pub type Result<T> = StdResult<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Hash, ThisError)]
pub enum Error
{
	#[error("`{}` is not a valid credit type.{}", input, match reason {
		None => String::new(),
		Some(reason) => format!(" ({reason})"),
	})]
	InvalidCreditType
	{
		input: String,
		reason: Option<String>,
	},

	#[error("`{}` is not a valid course format.{}", input, match reason {
		None => String::new(),
		Some(reason) => format!(" ({reason})"),
	})]
	InvalidCourseFormat
	{
		input: String,
		reason: Option<String>,
	},

	#[error("`{}` is not a valid state code.{}", input, match reason {
		None => String::new(),
		Some(reason) => format!(" ({reason})"),
	})]
	InvalidStateCode
	{
		input: String,
		reason: Option<String>,
	},
}
