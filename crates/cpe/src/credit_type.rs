//! Continuing-education credit types.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Error, Result};

/// A regulatory credit type a course can award credits for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum CreditType
{
	/// Certified Public Accountant.
	#[cfg_attr(feature = "serde", serde(rename = "CPA"))]
	Cpa,

	/// Certified Financial Planner.
	#[cfg_attr(feature = "serde", serde(rename = "CFP"))]
	Cfp,

	/// Enrolled Agent / Oregon Tax Return Preparer.
	#[cfg_attr(feature = "serde", serde(rename = "EA/OTRP"))]
	EaOtrp,

	/// Enrolled Retirement Plan Agent.
	#[cfg_attr(feature = "serde", serde(rename = "ERPA"))]
	Erpa,

	/// Certified Divorce Financial Analyst.
	#[cfg_attr(feature = "serde", serde(rename = "CDFA"))]
	Cdfa,
}

impl CreditType
{
	/// Every credit type, in the order they are presented to users.
	pub const ALL: [Self; 5] = [Self::Cpa, Self::Cfp, Self::EaOtrp, Self::Erpa, Self::Cdfa];

	/// The canonical name used by the API and the database.
	pub const fn api(&self) -> &'static str
	{
		match self {
			Self::Cpa => "CPA",
			Self::Cfp => "CFP",
			Self::EaOtrp => "EA/OTRP",
			Self::Erpa => "ERPA",
			Self::Cdfa => "CDFA",
		}
	}
}

impl Display for CreditType
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.api())
	}
}

impl FromStr for CreditType
{
	type Err = Error;

	fn from_str(input: &str) -> Result<Self>
	{
		let normalized = input
			.chars()
			.filter(char::is_ascii_alphanumeric)
			.collect::<String>()
			.to_ascii_uppercase();

		match normalized.as_str() {
			"CPA" => Ok(Self::Cpa),
			"CFP" => Ok(Self::Cfp),
			"EAOTRP" | "EA" | "OTRP" => Ok(Self::EaOtrp),
			"ERPA" => Ok(Self::Erpa),
			"CDFA" => Ok(Self::Cdfa),
			_ => Err(Error::InvalidCreditType { input: input.to_owned(), reason: None }),
		}
	}
}
