//! Normalizing free-text state lists into postal codes.

use cpe::{StateCode, StateTable};

use crate::services::courses::StateEntry;

/// Turns a list of states into [`StateEntry`]s.
///
/// The list may be separated by `|` or `,` and may contain the token `All`,
/// which is ignored. Two-letter tokens are taken as postal codes; anything
/// longer is looked up by name in `table`. Tokens we cannot make sense of are
/// dropped with a warning.
///
/// Order is preserved and duplicates are kept.
pub fn extract_states(raw: &str, table: &StateTable) -> Vec<StateEntry>
{
	raw.split(['|', ','])
		.map(|token| token.trim().to_lowercase())
		.filter(|token| !token.is_empty() && token != "all")
		.filter_map(|token| {
			let state_code = if token.chars().count() == 2 {
				StateCode::new(&token).ok()
			} else {
				table.lookup(&token)
			};

			if state_code.is_none() {
				tracing::warn!(%token, "dropping unrecognized state");
			}

			state_code
		})
		.map(|state_code| StateEntry { state_code })
		.collect()
}
