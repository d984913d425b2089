//! Dog records and the shapes handed to a [`DogStore`](crate::DogStore).

use std::fmt;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// Store-assigned identifier of a dog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DogId(pub i64);

impl fmt::Display for DogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a path segment could not address a dog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidId {
    #[error("dog id {raw:?} is not a number")]
    NotANumber { raw: String },
    /// Numeric, but fractional, infinite or outside the `i64` range.
    #[error("dog id {raw:?} is not a whole number in range")]
    Unaddressable { raw: String },
}

impl InvalidId {
    pub fn is_not_a_number(&self) -> bool {
        matches!(self, InvalidId::NotANumber { .. })
    }
}

/// Coerce a path segment to a number the way JSON clients do with `Number(s)`.
///
/// Surrounding whitespace is ignored and a blank segment is zero. Decimal,
/// exponent, `Infinity` and `0x`/`0o`/`0b` forms are accepted.
fn to_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return Some(0.0);
    }

    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = s.strip_prefix(prefix) {
            if digits.is_empty() {
                return None;
            }
            return digits.chars().try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix)
                    .map(|d| acc * f64::from(radix) + f64::from(d))
            });
        }
    }

    let unsigned = s.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(s);
    if unsigned == "Infinity" {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    // f64::from_str also knows "inf" and "nan"; those are not numbers here.
    let numeric_start = unsigned.starts_with(|c: char| c.is_ascii_digit() || c == '.');
    let numeric_body = unsigned
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !numeric_start || !numeric_body {
        return None;
    }
    s.parse::<f64>().ok()
}

/// Parse a raw path segment into a [`DogId`].
///
/// Plain integers parse exactly. Other segments are coerced to a number first;
/// a number that is not a whole `i64` is [`InvalidId::Unaddressable`],
/// anything else [`InvalidId::NotANumber`].
pub fn parse_id(raw: &str) -> std::result::Result<DogId, InvalidId> {
    if let Ok(id) = raw.trim().parse::<i64>() {
        return Ok(DogId(id));
    }

    let Some(n) = to_number(raw) else {
        return Err(InvalidId::NotANumber { raw: raw.to_string() });
    };

    // i64::MAX as f64 rounds up to 2^63, which does not fit.
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        Ok(DogId(n as i64))
    } else {
        Err(InvalidId::Unaddressable { raw: raw.to_string() })
    }
}

// Largest f64 below which every whole number is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

// Whole ages go back out as JSON integers: 3, not 3.0.
fn serialize_age<S>(age: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if age.fract() == 0.0 && age.abs() < MAX_EXACT_INTEGER {
        serializer.serialize_i64(*age as i64)
    } else {
        serializer.serialize_f64(*age)
    }
}

/// A persisted dog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dog {
    pub id: DogId,
    pub name: String,
    pub breed: String,
    #[serde(serialize_with = "serialize_age")]
    pub age: f64,
    pub description: String,
}

/// Everything `create` needs; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub age: f64,
    pub description: String,
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DogChanges {
    pub name: Option<String>,
    pub breed: Option<String>,
    pub age: Option<f64>,
    pub description: Option<String>,
}

fn text(field: &str, value: &Value) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| anyhow!("'{field}' cannot be stored as text: {value}"))
}

fn number(field: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| anyhow!("'{field}' cannot be stored as a number: {value}"))
}

impl NewDog {
    /// Build the create payload from submitted fields.
    ///
    /// Expects fields that already passed strict validation; fails on anything
    /// the store could not hold.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self> {
        static MISSING: Value = Value::Null;
        let get = |key: &str| fields.get(key).unwrap_or(&MISSING);

        Ok(Self {
            name: text("name", get("name"))?,
            breed: text("breed", get("breed"))?,
            age: number("age", get("age"))?,
            description: text("description", get("description"))?,
        })
    }
}

impl DogChanges {
    /// Build an update from submitted fields; absent keys stay `None`.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            name: fields.get("name").map(|v| text("name", v)).transpose()?,
            breed: fields.get("breed").map(|v| text("breed", v)).transpose()?,
            age: fields.get("age").map(|v| number("age", v)).transpose()?,
            description: fields
                .get("description")
                .map(|v| text("description", v))
                .transpose()?,
        })
    }

    /// Apply the set fields onto an existing record.
    pub fn apply_to(&self, dog: &mut Dog) {
        if let Some(name) = &self.name {
            dog.name = name.clone();
        }
        if let Some(breed) = &self.breed {
            dog.breed = breed.clone();
        }
        if let Some(age) = self.age {
            dog.age = age;
        }
        if let Some(description) = &self.description {
            dog.description = description.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    fn fields(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    fn rex(age: f64) -> Dog {
        Dog {
            id: DogId(1),
            name: "Rex".into(),
            breed: "Lab".into(),
            age,
            description: "Good boy".into(),
        }
    }

    #[test]
    fn parse_id_accepts_integers_and_trims() {
        assert_eq!(parse_id("42"), Ok(DogId(42)));
        assert_eq!(parse_id(" 7 "), Ok(DogId(7)));
        assert_eq!(parse_id("-3"), Ok(DogId(-3)));
        assert_eq!(parse_id("+5"), Ok(DogId(5)));
    }

    #[test]
    fn parse_id_coerces_other_numeric_forms() {
        assert_eq!(parse_id("1e2"), Ok(DogId(100)));
        assert_eq!(parse_id("0x10"), Ok(DogId(16)));
        assert_eq!(parse_id("0b101"), Ok(DogId(5)));
        assert_eq!(parse_id("2.0"), Ok(DogId(2)));
    }

    #[test]
    fn parse_id_separates_non_numbers_from_unaddressable_numbers() {
        for raw in ["abc", "12abc", "nan", "inf", "0x", "0xZZ", "1e", "."] {
            assert_eq!(parse_id(raw), Err(InvalidId::NotANumber { raw: raw.to_string() }), "{raw}");
        }

        for raw in ["1.5", "Infinity", "-Infinity", "1e300", "9223372036854775808"] {
            let err = parse_id(raw).unwrap_err();
            assert!(!err.is_not_a_number(), "{raw}");
        }
    }

    #[test]
    fn parse_id_rejects_two_to_the_63() {
        assert_eq!(parse_id("9223372036854775807"), Ok(DogId(i64::MAX)));
        assert!(matches!(
            parse_id("9.223372036854775808e18"),
            Err(InvalidId::Unaddressable { .. })
        ));
    }

    #[test]
    fn dog_serializes_with_bare_id_and_whole_age() {
        assert_eq!(
            serde_json::to_value(rex(3.0)).unwrap(),
            json!({"id": 1, "name": "Rex", "breed": "Lab", "age": 3, "description": "Good boy"})
        );
        assert_eq!(serde_json::to_value(rex(3.5)).unwrap()["age"], json!(3.5));
    }

    #[test]
    fn new_dog_keeps_fractional_ages() {
        let dog = NewDog::from_fields(&fields(json!({
            "name": "Rex", "breed": "Lab", "age": 3.5, "description": "Good boy"
        })))
        .unwrap();
        assert_eq!(dog.age, 3.5);

        let dog = NewDog::from_fields(&fields(json!({
            "name": "Rex", "breed": "Lab", "age": 3, "description": "Good boy"
        })))
        .unwrap();
        assert_eq!(dog.age, 3.0);
    }

    #[test]
    fn new_dog_rejects_missing_fields() {
        assert!(NewDog::from_fields(&fields(json!({"name": "Rex"}))).is_err());
    }

    #[test]
    fn changes_only_carry_submitted_fields() {
        let changes = DogChanges::from_fields(&fields(json!({"age": 0, "name": ""}))).unwrap();
        assert_eq!(changes.name.as_deref(), Some(""));
        assert_eq!(changes.age, Some(0.0));
        assert!(changes.breed.is_none());
        assert!(changes.description.is_none());
    }

    #[test]
    fn changes_reject_values_the_store_cannot_hold() {
        assert!(DogChanges::from_fields(&fields(json!({"name": null}))).is_err());
        assert!(DogChanges::from_fields(&fields(json!({"breed": false}))).is_err());
        assert!(DogChanges::from_fields(&fields(json!({"age": "old"}))).is_err());
    }

    #[test]
    fn apply_to_leaves_unset_fields() {
        let mut dog = rex(3.0);
        DogChanges {
            age: Some(4.5),
            ..DogChanges::default()
        }
        .apply_to(&mut dog);

        assert_eq!(dog.age, 4.5);
        assert_eq!(dog.name, "Rex");
        assert_eq!(dog.id, DogId(1));
    }

    proptest! {
        #[test]
        fn every_i64_parses_to_itself(n in any::<i64>()) {
            prop_assert_eq!(parse_id(&n.to_string()), Ok(DogId(n)));
        }

        #[test]
        fn alphabetic_ids_are_not_numbers(raw in "[a-zA-Z_][a-zA-Z0-9_]{0,12}") {
            prop_assume!(raw != "Infinity");
            prop_assert!(parse_id(&raw).unwrap_err().is_not_a_number());
        }

        #[test]
        fn fractional_ids_are_numbers_but_unaddressable(
            whole in -1_000_000i64..1_000_000,
            frac in 1u32..1000,
        ) {
            let raw = format!("{whole}.{frac:03}");
            let err = parse_id(&raw).unwrap_err();
            prop_assert!(!err.is_not_a_number());
        }

        #[test]
        fn any_number_survives_from_fields(
            age in any::<f64>().prop_filter("finite", |f| f.is_finite()),
        ) {
            let body = json!({"name": "Rex", "breed": "Lab", "age": age, "description": "x"});
            let dog = NewDog::from_fields(body.as_object().unwrap()).unwrap();
            prop_assert_eq!(dog.age, age);
        }
    }
}
