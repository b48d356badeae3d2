//! Render-time value trees
//!
//! An [`Instance`] mirrors the shape of a [`TypeDescriptor`](super::schema::TypeDescriptor)
//! tree. Instances are built fresh for every render call.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Decimal
// ============================================================================

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid decimal literal: '{0}'")]
pub struct InvalidDecimal(pub String);

/// Exact decimal value kept in its canonical textual form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal(String);

impl Decimal {
    /// Convert a float; `None` for NaN and infinities
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Decimal(value.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Decimal {
    type Err = InvalidDecimal;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        let valid = all_digits(int_part)
            && frac_part.map_or(true, |f| !f.is_empty() && all_digits(f))
            && !int_part.is_empty();

        if valid {
            Ok(Decimal(s.to_string()))
        } else {
            Err(InvalidDecimal(s.to_string()))
        }
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal(value.to_string())
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Instance
// ============================================================================

/// A runtime value matching a declared type
#[derive(Clone, Debug, PartialEq)]
pub enum Instance {
    /// Absent value, valid for any declared type
    Null,
    Text(String),
    Decimal(Decimal),
    Boolean(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    Integer(i64),
    Record(RecordInstance),
    Array(Vec<Instance>),
}

impl Instance {
    /// Short name of the variant, used in mismatch diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Instance::Null => "null",
            Instance::Text(_) => "text",
            Instance::Decimal(_) => "decimal",
            Instance::Boolean(_) => "boolean",
            Instance::Date(_) => "date",
            Instance::Time(_) => "time",
            Instance::DateTime(_) => "datetime",
            Instance::Integer(_) => "integer",
            Instance::Record(_) => "record",
            Instance::Array(_) => "array",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Instance::Null)
    }
}

impl From<&str> for Instance {
    fn from(value: &str) -> Self {
        Instance::Text(value.to_string())
    }
}

impl From<String> for Instance {
    fn from(value: String) -> Self {
        Instance::Text(value)
    }
}

impl From<bool> for Instance {
    fn from(value: bool) -> Self {
        Instance::Boolean(value)
    }
}

impl From<i64> for Instance {
    fn from(value: i64) -> Self {
        Instance::Integer(value)
    }
}

impl From<i32> for Instance {
    fn from(value: i32) -> Self {
        Instance::Integer(i64::from(value))
    }
}

impl From<Decimal> for Instance {
    fn from(value: Decimal) -> Self {
        Instance::Decimal(value)
    }
}

impl From<NaiveDate> for Instance {
    fn from(value: NaiveDate) -> Self {
        Instance::Date(value)
    }
}

impl From<NaiveTime> for Instance {
    fn from(value: NaiveTime) -> Self {
        Instance::Time(value)
    }
}

impl From<NaiveDateTime> for Instance {
    fn from(value: NaiveDateTime) -> Self {
        Instance::DateTime(value)
    }
}

impl From<RecordInstance> for Instance {
    fn from(value: RecordInstance) -> Self {
        Instance::Record(value)
    }
}

impl<T: Into<Instance>> From<Option<T>> for Instance {
    fn from(value: Option<T>) -> Self {
        value.map_or(Instance::Null, Into::into)
    }
}

impl<T: Into<Instance>> From<Vec<T>> for Instance {
    fn from(value: Vec<T>) -> Self {
        Instance::Array(value.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Record Instance
// ============================================================================

/// Field values of a record, keyed by field name
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordInstance {
    fields: Vec<(String, Instance)>,
}

impl RecordInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Instance>) -> Self {
        self.set(name, value);
        self
    }

    /// Set a field, replacing any previous value under the same name
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Instance>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Instance> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_parse() {
        assert_eq!("0.1".parse::<Decimal>().unwrap().as_str(), "0.1");
        assert_eq!("-12".parse::<Decimal>().unwrap().as_str(), "-12");
        assert!("1.".parse::<Decimal>().is_err());
        assert!(".5".parse::<Decimal>().is_err());
        assert!("abc".parse::<Decimal>().is_err());
        assert!("".parse::<Decimal>().is_err());
    }

    #[test]
    fn test_decimal_from_f64() {
        assert_eq!(Decimal::from_f64(3.1415).unwrap().as_str(), "3.1415");
        assert!(Decimal::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn test_record_instance_set_replaces() {
        let mut rec = RecordInstance::new().with("i", 1).with("s", "a");
        rec.set("i", 2);
        assert_eq!(rec.len(), 2);
        assert_eq!(rec.get("i"), Some(&Instance::Integer(2)));
        assert_eq!(rec.names().collect::<Vec<_>>(), vec!["i", "s"]);
    }

    #[test]
    fn test_option_into_instance() {
        let none: Option<i64> = None;
        assert_eq!(Instance::from(none), Instance::Null);
        assert_eq!(Instance::from(Some(5i64)), Instance::Integer(5));
    }
}
