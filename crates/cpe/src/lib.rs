//! Core types shared by the CPE marketplace API.
//!
//! These describe the vocabulary of continuing-education courses: the delivery
//! formats a course can be sold in, the regulatory credit types it can award,
//! and the US jurisdictions it is approved for.

mod error;
pub use error::{Error, Result};

pub mod credit_type;
pub use credit_type::CreditType;

pub mod course_format;
pub use course_format::CourseFormat;

pub mod state_code;
pub use state_code::{StateCode, StateTable};

#[cfg(test)]
mod test_setup
{
	#[ctor::ctor]
	fn test_setup()
	{
		color_eyre::install().expect("Failed to setup color-eyre.");
	}
}
