//! Delivery formats a course can be sold in.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Error, Result};

/// A delivery medium for a course. Each format is priced independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum CourseFormat
{
	Online,
	Hardcopy,
	Video,
}

impl CourseFormat
{
	pub const ALL: [Self; 3] = [Self::Online, Self::Hardcopy, Self::Video];

	pub const fn api(&self) -> &'static str
	{
		match self {
			Self::Online => "online",
			Self::Hardcopy => "hardcopy",
			Self::Video => "video",
		}
	}
}

impl Display for CourseFormat
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.api())
	}
}

impl FromStr for CourseFormat
{
	type Err = Error;

	fn from_str(input: &str) -> Result<Self>
	{
		let trimmed = input.trim();

		if trimmed.eq_ignore_ascii_case("online") {
			return Ok(Self::Online);
		}

		if trimmed.eq_ignore_ascii_case("hardcopy") || trimmed.eq_ignore_ascii_case("hard copy") {
			return Ok(Self::Hardcopy);
		}

		if trimmed.eq_ignore_ascii_case("video") {
			return Ok(Self::Video);
		}

		Err(Error::InvalidCourseFormat { input: input.to_owned(), reason: None })
	}
}

#[cfg(test)]
mod tests
{
	use color_eyre::Result;
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn parse_works() -> Result<()>
	{
		assert_eq!("Online".parse::<CourseFormat>()?, CourseFormat::Online);
		assert_eq!("hard copy".parse::<CourseFormat>()?, CourseFormat::Hardcopy);
		assert_eq!("VIDEO".parse::<CourseFormat>()?, CourseFormat::Video);
		assert!("audio".parse::<CourseFormat>().is_err(), "audio is not a format");

		Ok(())
	}
}
