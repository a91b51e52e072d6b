//! US postal state codes.
//!
//! Courses are approved per jurisdiction. Jurisdictions are identified by
//! their two-letter postal code, and the [`StateTable`] maps full state names
//! onto those codes.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::{Error, Result};

/// A two-letter, uppercase, postal state code.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateCode([u8; 2]);

impl StateCode
{
	/// Creates a [`StateCode`] from a two-letter token.
	///
	/// The token is uppercased. It is not checked against any [`StateTable`].
	pub fn new(token: &str) -> Result<Self>
	{
		let invalid = |reason: &str| Error::InvalidStateCode {
			input: token.to_owned(),
			reason: Some(reason.to_owned()),
		};

		let [first, second] = <[u8; 2]>::try_from(token.as_bytes())
			.map_err(|_| invalid("must be exactly two characters"))?;

		if !first.is_ascii_alphabetic() || !second.is_ascii_alphabetic() {
			return Err(invalid("must only contain ascii letters"));
		}

		Ok(Self([first.to_ascii_uppercase(), second.to_ascii_uppercase()]))
	}

	/// The code as a string slice.
	pub fn as_str(&self) -> &str
	{
		match std::str::from_utf8(&self.0) {
			Ok(code) => code,
			Err(_) => unreachable!("state codes only ever contain ascii letters"),
		}
	}
}

impl fmt::Debug for StateCode
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.debug_tuple("StateCode").field(&self.as_str()).finish()
	}
}

impl Display for StateCode
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
	{
		f.write_str(self.as_str())
	}
}

impl FromStr for StateCode
{
	type Err = Error;

	fn from_str(input: &str) -> Result<Self>
	{
		Self::new(input.trim())
	}
}

/// Lookup table from full jurisdiction names to [`StateCode`]s.
#[derive(Debug, Clone, Copy)]
pub struct StateTable
{
	/// `(lowercase name, code)` pairs.
	entries: &'static [(&'static str, &'static str)],
}

impl StateTable
{
	/// The 50 US states plus the District of Columbia.
	pub const US: Self = Self { entries: &US_STATES };

	/// Creates a custom table.
	///
	/// Names are matched case-insensitively; codes must be valid [`StateCode`]s
	/// or they will never be returned from [`StateTable::lookup()`].
	pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self
	{
		Self { entries }
	}

	/// Looks up the code for a full jurisdiction name.
	pub fn lookup(&self, name: &str) -> Option<StateCode>
	{
		let name = name.trim();

		self.entries
			.iter()
			.find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
			.and_then(|(_, code)| StateCode::new(code).ok())
	}

	pub fn len(&self) -> usize
	{
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool
	{
		self.entries.is_empty()
	}
}

impl Default for StateTable
{
	fn default() -> Self
	{
		Self::US
	}
}

#[cfg(feature = "serde")]
mod serde_impls
{
	use serde::{Deserialize, Deserializer, Serialize, Serializer};

	use super::StateCode;

	impl Serialize for StateCode
	{
		fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error>
		{
			self.as_str().serialize(serializer)
		}
	}

	impl<'de> Deserialize<'de> for StateCode
	{
		fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error>
		{
			<&str as Deserialize<'de>>::deserialize(deserializer)?
				.parse()
				.map_err(serde::de::Error::custom)
		}
	}
}

static US_STATES: [(&str, &str); 51] = [
	("alabama", "AL"),
	("alaska", "AK"),
	("arizona", "AZ"),
	("arkansas", "AR"),
	("california", "CA"),
	("colorado", "CO"),
	("connecticut", "CT"),
	("delaware", "DE"),
	("district of columbia", "DC"),
	("florida", "FL"),
	("georgia", "GA"),
	("hawaii", "HI"),
	("idaho", "ID"),
	("illinois", "IL"),
	("indiana", "IN"),
	("iowa", "IA"),
	("kansas", "KS"),
	("kentucky", "KY"),
	("louisiana", "LA"),
	("maine", "ME"),
	("maryland", "MD"),
	("massachusetts", "MA"),
	("michigan", "MI"),
	("minnesota", "MN"),
	("mississippi", "MS"),
	("missouri", "MO"),
	("montana", "MT"),
	("nebraska", "NE"),
	("nevada", "NV"),
	("new hampshire", "NH"),
	("new jersey", "NJ"),
	("new mexico", "NM"),
	("new york", "NY"),
	("north carolina", "NC"),
	("north dakota", "ND"),
	("ohio", "OH"),
	("oklahoma", "OK"),
	("oregon", "OR"),
	("pennsylvania", "PA"),
	("rhode island", "RI"),
	("south carolina", "SC"),
	("south dakota", "SD"),
	("tennessee", "TN"),
	("texas", "TX"),
	("utah", "UT"),
	("vermont", "VT"),
	("virginia", "VA"),
	("washington", "WA"),
	("west virginia", "WV"),
	("wisconsin", "WI"),
	("wyoming", "WY"),
];
