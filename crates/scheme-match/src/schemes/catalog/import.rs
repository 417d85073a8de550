use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};
use std::io::Read;

use super::record::SchemeRecord;

/// Parse a flat scheme table (one row per scheme, `min_*`/`max_*` columns for
/// ranges, `a|b` for allow-lists) into raw records.
pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<SchemeRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for row in csv_reader.deserialize::<SchemeRow>() {
        records.push(row?.into_record());
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct SchemeRow {
    #[serde(default)]
    id: String,
    #[serde(default, alias = "scheme_name")]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    ministry: String,
    #[serde(default)]
    benefits: String,
    #[serde(
        default,
        rename = "type",
        alias = "scheme_type",
        deserialize_with = "empty_string_as_none"
    )]
    scheme_type: Option<String>,
    #[serde(default)]
    category: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_age: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_income: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_income: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    gender: Option<String>,
    #[serde(default, alias = "caste_category", deserialize_with = "empty_string_as_none")]
    caste: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    occupation: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    disability: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    min_household: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    max_household: Option<String>,
}

impl SchemeRow {
    fn into_record(self) -> SchemeRecord {
        SchemeRecord {
            id: self.id,
            title: self.title,
            description: self.description,
            ministry: self.ministry,
            benefits: self.benefits,
            scheme_type: self.scheme_type,
            category: self.category,
            age_range: range_cell(self.min_age, self.max_age),
            income_range: range_cell(self.min_income, self.max_income),
            gender: self.gender.map(|cell| categorical_cell(&cell)),
            caste_category: self.caste.map(|cell| categorical_cell(&cell)),
            state: self.state.map(|cell| categorical_cell(&cell)),
            occupation: self.occupation.map(|cell| categorical_cell(&cell)),
            disability: self.disability.map(|cell| categorical_cell(&cell)),
            household_size: range_cell(self.min_household, self.max_household),
        }
    }
}

/// Both bounds `any` collapse to the wildcard; a single missing bound is kept
/// so validation can report the incomplete range.
fn range_cell(min: Option<String>, max: Option<String>) -> Option<Value> {
    if min.is_none() && max.is_none() {
        return None;
    }

    let wildcard = matches!(
        (min.as_deref(), max.as_deref()),
        (Some(low), Some(high))
            if low.eq_ignore_ascii_case("any") && high.eq_ignore_ascii_case("any")
    );
    if wildcard {
        return Some(Value::String("any".to_string()));
    }

    let mut bounds = Map::new();
    if let Some(low) = min {
        bounds.insert("min".to_string(), scalar_cell(&low));
    }
    if let Some(high) = max {
        bounds.insert("max".to_string(), scalar_cell(&high));
    }
    Some(Value::Object(bounds))
}

fn categorical_cell(cell: &str) -> Value {
    if cell.contains('|') {
        Value::Array(cell.split('|').map(scalar_cell).collect())
    } else {
        scalar_cell(cell)
    }
}

fn scalar_cell(cell: &str) -> Value {
    let trimmed = cell.trim();
    match trimmed.parse::<i64>() {
        Ok(number) => Value::Number(Number::from(number)),
        Err(_) => Value::String(trimmed.to_string()),
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
