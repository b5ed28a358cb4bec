//! Strict translation of untyped OMDb payloads into typed results.
//!
//! Each operation declares the fields it needs as an ordered [`FieldSpec`]
//! table. A payload is walked against that table in order; every field is
//! looked up, shape-checked and converted before the next one is touched, and
//! the first failure aborts the translation. Nothing is defaulted.

use super::{
    OmdbError, Result,
    decode::DecodedPayload,
    types::{MovieDetail, MovieSummary, Operation, SearchResult},
};
use serde_json::{Map, Value};

/// What a field must look like and what it converts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// JSON string, kept as is
    String,
    /// JSON string holding an unsigned base-10 number
    Count,
    /// JSON array of objects, each checked against the nested table
    List(&'static [FieldSpec]),
}

/// A required field in an OMDb object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub shape: Shape,
}

impl FieldSpec {
    const fn string(name: &'static str) -> Self {
        Self {
            name,
            shape: Shape::String,
        }
    }

    const fn count(name: &'static str) -> Self {
        Self {
            name,
            shape: Shape::Count,
        }
    }

    const fn list(name: &'static str, element: &'static [FieldSpec]) -> Self {
        Self {
            name,
            shape: Shape::List(element),
        }
    }
}

const TOTAL_RESULTS: &str = "totalResults";
const SEARCH: &str = "Search";

/// Each element of `Search`
pub const MOVIE_SUMMARY_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("imdbID"),
    FieldSpec::string("Title"),
    FieldSpec::string("Year"),
    FieldSpec::string("Type"),
    FieldSpec::string("Poster"),
];

/// Top level of a search response
pub const SEARCH_RESULT_FIELDS: &[FieldSpec] = &[
    FieldSpec::count(TOTAL_RESULTS),
    FieldSpec::list(SEARCH, MOVIE_SUMMARY_FIELDS),
];

/// Top level of a by-id response
pub const MOVIE_DETAIL_FIELDS: &[FieldSpec] = &[
    FieldSpec::string("Title"),
    FieldSpec::string("Year"),
    FieldSpec::string("Rated"),
    FieldSpec::string("Genre"),
    FieldSpec::string("Plot"),
    FieldSpec::string("Director"),
    FieldSpec::string("Actors"),
    FieldSpec::string("Language"),
    FieldSpec::string("Country"),
    FieldSpec::string("Type"),
    FieldSpec::string("Poster"),
];

/// A field value after its shape check and conversion
enum Field<'a> {
    Text(&'a str),
    Count(u64),
    Records(Vec<Record<'a>>),
}

/// Converted fields of one object, in table order
struct Record<'a> {
    operation: Operation,
    prefix: String,
    fields: Vec<(&'static str, Field<'a>)>,
}

impl<'a> Record<'a> {
    fn walk(
        object: &'a Map<String, Value>,
        specs: &'static [FieldSpec],
        operation: Operation,
        prefix: &str,
    ) -> Result<Self> {
        let mut fields = Vec::with_capacity(specs.len());

        for spec in specs {
            let path = format!("{prefix}{}", spec.name);
            let Some(value) = object.get(spec.name) else {
                return Err(OmdbError::MissingField {
                    operation,
                    field: path,
                });
            };

            let field = match (spec.shape, value) {
                (Shape::String, Value::String(text)) => Field::Text(text),
                (Shape::Count, Value::String(raw)) => match parse_count(raw) {
                    Some(count) => Field::Count(count),
                    None => {
                        return Err(OmdbError::UnparseableNumericField {
                            operation,
                            field: path,
                            value: raw.clone(),
                        });
                    }
                },
                (Shape::List(element), Value::Array(items)) => Field::Records(
                    items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            Self::element(item, element, operation, &format!("{path}[{index}]"))
                        })
                        .collect::<Result<_>>()?,
                ),
                _ => {
                    return Err(OmdbError::UnexpectedFieldType {
                        operation,
                        field: path,
                        value: value.to_string(),
                    });
                }
            };

            fields.push((spec.name, field));
        }

        Ok(Self {
            operation,
            prefix: prefix.to_string(),
            fields,
        })
    }

    fn element(
        item: &'a Value,
        specs: &'static [FieldSpec],
        operation: Operation,
        path: &str,
    ) -> Result<Self> {
        let Some(object) = item.as_object() else {
            return Err(OmdbError::UnexpectedFieldType {
                operation,
                field: path.to_string(),
                value: item.to_string(),
            });
        };
        Self::walk(object, specs, operation, &format!("{path}."))
    }

    /// Find a converted field. Only fails if `name` is absent from the table
    /// this record was walked with.
    fn get<T>(&self, name: &str, pick: impl FnOnce(&Field<'a>) -> Option<T>) -> Result<T> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .and_then(|(_, field)| pick(field))
            .ok_or_else(|| OmdbError::MissingField {
                operation: self.operation,
                field: format!("{}{name}", self.prefix),
            })
    }

    fn text(&self, name: &str) -> Result<String> {
        self.get(name, |field| match field {
            Field::Text(text) => Some((*text).to_string()),
            _ => None,
        })
    }

    fn count(&self, name: &str) -> Result<u64> {
        self.get(name, |field| match field {
            Field::Count(count) => Some(*count),
            _ => None,
        })
    }

    fn records(&self, name: &str) -> Result<&[Record<'a>]> {
        self.fields
            .iter()
            .find_map(|(field, value)| match value {
                Field::Records(records) if *field == name => Some(records.as_slice()),
                _ => None,
            })
            .ok_or_else(|| OmdbError::MissingField {
                operation: self.operation,
                field: format!("{}{name}", self.prefix),
            })
    }
}

/// Unwrap the payload object, surfacing an in-band upstream error first
fn payload_object(payload: DecodedPayload, operation: Operation) -> Result<Map<String, Value>> {
    match payload {
        DecodedPayload::UpstreamError(message) => {
            Err(OmdbError::UpstreamReported { operation, message })
        }
        DecodedPayload::Payload(object) => Ok(object),
    }
}

/// Unsigned base-10 digits only; no sign, no whitespace
fn parse_count(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn split_actors(raw: &str) -> Vec<String> {
    raw.split(", ").map(str::to_string).collect()
}

/// Translate a decoded search response
pub fn translate_search_result(payload: DecodedPayload) -> Result<SearchResult> {
    let operation = Operation::SearchMovies;
    let object = payload_object(payload, operation)?;
    let top = Record::walk(&object, SEARCH_RESULT_FIELDS, operation, "")?;

    let movies = top
        .records(SEARCH)?
        .iter()
        .map(|record| -> Result<MovieSummary> {
            Ok(MovieSummary {
                id: record.text("imdbID")?,
                title: record.text("Title")?,
                year: record.text("Year")?,
                kind: record.text("Type")?,
                poster_url: record.text("Poster")?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SearchResult {
        total_results: top.count(TOTAL_RESULTS)?,
        movies,
    })
}

/// Translate a decoded by-id response.
///
/// The returned identifier is the one that was asked for; OMDb's own
/// `imdbID` is not consulted.
pub fn translate_movie_detail(id: &str, payload: DecodedPayload) -> Result<MovieDetail> {
    let operation = Operation::GetMovieById;
    let object = payload_object(payload, operation)?;
    let record = Record::walk(&object, MOVIE_DETAIL_FIELDS, operation, "")?;

    Ok(MovieDetail {
        id: id.to_string(),
        title: record.text("Title")?,
        year: record.text("Year")?,
        rated: record.text("Rated")?,
        genre: record.text("Genre")?,
        plot: record.text("Plot")?,
        director: record.text("Director")?,
        actors: split_actors(&record.text("Actors")?),
        language: record.text("Language")?,
        country: record.text("Country")?,
        kind: record.text("Type")?,
        poster_url: record.text("Poster")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("0"), Some(0));
        assert_eq!(parse_count("4821"), Some(4821));
        assert_eq!(parse_count(""), None);
        assert_eq!(parse_count("+5"), None);
        assert_eq!(parse_count("-1"), None);
        assert_eq!(parse_count(" 5"), None);
        assert_eq!(parse_count("1.0"), None);
        assert_eq!(parse_count("99999999999999999999999"), None);
    }

    #[test]
    fn test_split_actors() {
        assert_eq!(
            split_actors("Tom Hardy, Anne Hathaway"),
            vec!["Tom Hardy", "Anne Hathaway"]
        );
        assert_eq!(split_actors("Keanu Reeves"), vec!["Keanu Reeves"]);
        assert_eq!(split_actors(""), vec![""]);
        // Only comma+space separates.
        assert_eq!(split_actors("A,B, C"), vec!["A,B", "C"]);
    }

    #[test]
    fn test_field_tables_have_unique_names() {
        for table in [SEARCH_RESULT_FIELDS, MOVIE_SUMMARY_FIELDS, MOVIE_DETAIL_FIELDS] {
            for (i, spec) in table.iter().enumerate() {
                assert!(
                    table[i + 1..].iter().all(|other| other.name != spec.name),
                    "duplicate field {}",
                    spec.name
                );
            }
        }
    }

    #[test]
    fn test_walk_converts_each_shape() {
        let object = json!({
            "totalResults": "7",
            "Search": [{"imdbID": "a", "Title": "b", "Year": "c", "Type": "d", "Poster": "e"}]
        });
        let object = object.as_object().unwrap();
        let record =
            Record::walk(object, SEARCH_RESULT_FIELDS, Operation::SearchMovies, "").unwrap();

        assert_eq!(record.count(TOTAL_RESULTS).unwrap(), 7);
        let movies = record.records(SEARCH).unwrap();
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].text("Poster").unwrap(), "e");
        // Asking for a converted field as the wrong kind finds nothing.
        assert!(record.text(TOTAL_RESULTS).is_err());
    }

    #[test]
    fn test_count_fails_before_later_fields_are_checked() {
        let object = json!({"totalResults": "many", "Search": "not a list"});
        let err = Record::walk(
            object.as_object().unwrap(),
            SEARCH_RESULT_FIELDS,
            Operation::SearchMovies,
            "",
        )
        .err()
        .unwrap();
        assert!(matches!(err, OmdbError::UnparseableNumericField { .. }));
    }
}
