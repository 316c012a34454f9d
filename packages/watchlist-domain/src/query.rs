use regex::Regex;

/// Minimum query length, after trimming, for a name search. Shorter inputs
/// would force a full-collection fetch for little selectivity.
pub const MIN_NAME_QUERY_CHARS: usize = 3;

// NIC format: 9-12 digits with an optional trailing check letter.
const ID_PATTERN: &str = r"^[0-9]{9,12}[vVxX]?$";
// Passport format: one letter followed by 6-8 digits.
const PASSPORT_PATTERN: &str = r"^[A-Za-z][0-9]{6,8}$";

/// The retrieval strategy a query maps to. Shapes are mutually exclusive;
/// precedence is ID, then passport, then name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryShape {
	IdLike,
	PassportLike,
	NameLike,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidQueryReason {
	Empty,
	TooShort,
}

/// Classifies a raw query into exactly one [`QueryShape`], or rejects it.
/// Pure; the caller decides how to retrieve for each shape.
pub fn classify(raw: &str) -> Result<QueryShape, InvalidQueryReason> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return Err(InvalidQueryReason::Empty);
	}
	if shape_matches(ID_PATTERN, trimmed) {
		return Ok(QueryShape::IdLike);
	}
	if shape_matches(PASSPORT_PATTERN, trimmed) {
		return Ok(QueryShape::PassportLike);
	}
	if trimmed.chars().count() < MIN_NAME_QUERY_CHARS {
		return Err(InvalidQueryReason::TooShort);
	}

	Ok(QueryShape::NameLike)
}

fn shape_matches(pattern: &str, text: &str) -> bool {
	Regex::new(pattern).map(|re| re.is_match(text)).unwrap_or(false)
}
