use serde_json::Value;

use super::Document;

/// Restrictions applied when listing records.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordFilter
{
	search: Option<String>,
	levels: Vec<String>,
}

impl RecordFilter
{
	/// Creates a new filter from the raw `search` and `filter` query parameters.
	///
	/// `filter` is a comma-separated list of levels. Every segment counts, so `junior,` also
	/// accepts records whose level is the empty string. An empty `filter` or search text is the
	/// same as leaving it out.
	pub fn new(search: Option<String>, filter: Option<&str>) -> Self
	{
		let search = search.filter(|search| !search.is_empty());
		let levels = filter
			.filter(|filter| !filter.is_empty())
			.into_iter()
			.flat_map(|filter| filter.split(','))
			.map(String::from)
			.collect();

		Self { search, levels }
	}

	/// The text that has to be contained in either `name` or `position`.
	pub fn search(&self) -> Option<&str>
	{
		self.search.as_deref()
	}

	/// The set of accepted levels.
	///
	/// An empty set does not restrict anything.
	pub fn levels(&self) -> &[String]
	{
		&self.levels
	}

	/// Checks whether `document` satisfies this filter.
	///
	/// Search text is matched literally and case-insensitively; only string values can match.
	pub fn matches(&self, document: &Document) -> bool
	{
		let string_field = |name: &str| document.get(name).and_then(Value::as_str);

		let search_matches = self.search.as_deref().is_none_or(|search| {
			let needle = search.to_lowercase();

			["name", "position"]
				.into_iter()
				.filter_map(string_field)
				.any(|value| value.to_lowercase().contains(&needle))
		});

		let level_matches = self.levels.is_empty()
			|| string_field("level").is_some_and(|level| self.levels.iter().any(|l| l == level));

		search_matches && level_matches
	}
}
