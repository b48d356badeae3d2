//! Widget Registry
//!
//! Fixed mapping from a scalar type descriptor to the control it renders as.
//! The formats here are relied on by existing clients and must not drift:
//! dates are `YYYY-MM-DD`, times `HH:MM:SS`, datetimes ISO-8601.

use crate::domain::instance::Instance;
use crate::domain::path::RenderPath;
use crate::domain::schema::{TypeDescriptor, TypeKind, UiOverride};

use super::error::{RenderError, RenderResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M:%S";
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// How the instance value is carried by the control
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueEncoding {
    /// `value="..."`, omitted entirely for null
    Attribute,
    /// Never serialized (password inputs)
    Suppressed,
    /// `checked` present iff the value is true
    CheckedFlag,
}

/// Value formatting rule, one per scalar kind
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueFormat {
    Text,
    Decimal,
    Boolean,
    Date,
    Time,
    DateTime,
    Integer,
}

/// Client-side behaviour a control needs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScriptHook {
    /// Picker initialised by element id, seeded with the ISO value
    DateTimePicker,
}

/// Markup shape and value handling of a scalar control
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WidgetRule {
    pub tag: &'static str,
    pub input_type: &'static str,
    pub step: Option<String>,
    pub encoding: ValueEncoding,
    pub format: ValueFormat,
    pub script: Option<ScriptHook>,
}

/// Formatted instance value, ready to be attached to a control
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormattedValue {
    Absent,
    Value(String),
    Checked(bool),
}

impl WidgetRule {
    fn input(input_type: &'static str, format: ValueFormat) -> Self {
        Self {
            tag: "input",
            input_type,
            step: None,
            encoding: ValueEncoding::Attribute,
            format,
            script: None,
        }
    }

    /// Format `instance` according to this rule.
    ///
    /// Null always yields [`FormattedValue::Absent`] (or an unchecked box);
    /// a value of the wrong kind is an [`RenderError::InstanceMismatch`].
    pub fn format_value(&self, instance: &Instance, path: &RenderPath) -> RenderResult<FormattedValue> {
        if self.encoding == ValueEncoding::Suppressed {
            return Ok(FormattedValue::Absent);
        }

        let text = match (self.format, instance) {
            (_, Instance::Null) => None,
            (ValueFormat::Text, Instance::Text(s)) => Some(s.clone()),
            (ValueFormat::Decimal, Instance::Decimal(d)) => Some(d.to_string()),
            (ValueFormat::Decimal, Instance::Integer(i)) => Some(i.to_string()),
            (ValueFormat::Integer, Instance::Integer(i)) => Some(i.to_string()),
            (ValueFormat::Boolean, Instance::Boolean(b)) => Some(b.to_string()),
            (ValueFormat::Date, Instance::Date(d)) => Some(d.format(DATE_FORMAT).to_string()),
            (ValueFormat::Time, Instance::Time(t)) => Some(t.format(TIME_FORMAT).to_string()),
            (ValueFormat::DateTime, Instance::DateTime(dt)) => {
                Some(dt.format(DATETIME_FORMAT).to_string())
            }
            (format, other) => {
                return Err(RenderError::InstanceMismatch {
                    path: path.describe(),
                    expected: format!("{:?}", format).to_lowercase(),
                    found: other.kind_name().to_string(),
                })
            }
        };

        Ok(match (self.encoding, text) {
            (ValueEncoding::CheckedFlag, text) => {
                FormattedValue::Checked(text.as_deref() == Some("true"))
            }
            (_, Some(text)) => FormattedValue::Value(text),
            (_, None) => FormattedValue::Absent,
        })
    }
}

/// Largest fraction digit count that maps to its own `step` value
pub const MAX_FRACTION_DIGITS: u32 = 28;

/// `step` attribute for a decimal with `digits` fraction digits (4 -> "0.0001").
///
/// Counts above [`MAX_FRACTION_DIGITS`] are clamped.
pub fn decimal_step(digits: u32) -> String {
    match digits.min(MAX_FRACTION_DIGITS) {
        0 => "1".to_string(),
        n => format!("0.{}1", "0".repeat(n as usize - 1)),
    }
}

/// Look up the widget rule for a scalar type.
///
/// Records and arrays have no widget of their own and fail here, as does a
/// password override on anything but text.
pub fn widget_for(ty: &TypeDescriptor, path: &RenderPath) -> RenderResult<WidgetRule> {
    let unsupported = |type_name: String| RenderError::UnsupportedType {
        type_name,
        path: path.describe(),
    };

    let mut rule = match &ty.kind {
        TypeKind::Text => WidgetRule::input("text", ValueFormat::Text),
        TypeKind::Decimal { fraction_digits } => {
            let mut rule = WidgetRule::input("number", ValueFormat::Decimal);
            rule.step = Some(fraction_digits.map_or_else(|| "any".to_string(), decimal_step));
            rule
        }
        TypeKind::Boolean => {
            let mut rule = WidgetRule::input("checkbox", ValueFormat::Boolean);
            rule.encoding = ValueEncoding::CheckedFlag;
            rule
        }
        TypeKind::Date => WidgetRule::input("date", ValueFormat::Date),
        TypeKind::Time => WidgetRule::input("time", ValueFormat::Time),
        TypeKind::DateTime => {
            let mut rule = WidgetRule::input("text", ValueFormat::DateTime);
            rule.script = Some(ScriptHook::DateTimePicker);
            rule
        }
        TypeKind::Integer => WidgetRule::input("number", ValueFormat::Integer),
        TypeKind::Record(_) | TypeKind::Array(_) => {
            return Err(unsupported(ty.type_name().to_string()))
        }
    };

    match ty.ui {
        None => {}
        Some(UiOverride::Password) => {
            if !matches!(ty.kind, TypeKind::Text) {
                return Err(unsupported(format!("{} with password widget", ty.type_name())));
            }
            rule.input_type = "password";
            rule.encoding = ValueEncoding::Suppressed;
        }
        Some(UiOverride::Hidden) => {
            rule.input_type = "hidden";
            rule.encoding = ValueEncoding::Attribute;
            rule.step = None;
            rule.script = None;
        }
    }

    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::instance::Decimal;
    use crate::domain::schema::RecordSchema;
    use chrono::{NaiveDate, NaiveTime};

    fn root() -> RenderPath {
        RenderPath::root().extend("f")
    }

    #[test]
    fn test_decimal_step_clamps_huge_digit_counts() {
        assert_eq!(decimal_step(0), "1");
        assert_eq!(decimal_step(4), "0.0001");
        assert_eq!(decimal_step(u32::MAX), decimal_step(MAX_FRACTION_DIGITS));
        assert_eq!(decimal_step(u32::MAX).len(), MAX_FRACTION_DIGITS as usize + 2);
    }

    #[test]
    fn test_text_rule() {
        let rule = widget_for(&TypeDescriptor::text(), &root()).unwrap();
        assert_eq!(rule.tag, "input");
        assert_eq!(rule.input_type, "text");
        assert_eq!(
            rule.format_value(&Instance::from("foo"), &root()).unwrap(),
            FormattedValue::Value("foo".to_string())
        );
    }

    #[test]
    fn test_password_suppresses_value() {
        let rule = widget_for(&TypeDescriptor::text().password(), &root()).unwrap();
        assert_eq!(rule.input_type, "password");
        assert_eq!(
            rule.format_value(&Instance::from("secret"), &root()).unwrap(),
            FormattedValue::Absent
        );
    }

    #[test]
    fn test_password_on_integer_is_unsupported() {
        let err = widget_for(&TypeDescriptor::integer().password(), &root()).unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedType { .. }));
        assert!(err.to_string().contains("integer with password widget"));
    }

    #[test]
    fn test_decimal_steps() {
        let any = widget_for(&TypeDescriptor::decimal(), &root()).unwrap();
        assert_eq!(any.step.as_deref(), Some("any"));

        let four = widget_for(&TypeDescriptor::decimal_with_digits(4), &root()).unwrap();
        assert_eq!(four.step.as_deref(), Some("0.0001"));

        assert_eq!(decimal_step(0), "1");
        assert_eq!(decimal_step(1), "0.1");
    }

    #[test]
    fn test_decimal_value() {
        let rule = widget_for(&TypeDescriptor::decimal(), &root()).unwrap();
        let value = Instance::Decimal("0.1".parse::<Decimal>().unwrap());
        assert_eq!(
            rule.format_value(&value, &root()).unwrap(),
            FormattedValue::Value("0.1".to_string())
        );
    }

    #[test]
    fn test_boolean_checked_flag() {
        let rule = widget_for(&TypeDescriptor::boolean(), &root()).unwrap();
        assert_eq!(rule.input_type, "checkbox");
        assert_eq!(
            rule.format_value(&Instance::Boolean(true), &root()).unwrap(),
            FormattedValue::Checked(true)
        );
        assert_eq!(
            rule.format_value(&Instance::Boolean(false), &root()).unwrap(),
            FormattedValue::Checked(false)
        );
        assert_eq!(
            rule.format_value(&Instance::Null, &root()).unwrap(),
            FormattedValue::Checked(false)
        );
    }

    #[test]
    fn test_date_and_time_formats() {
        let date = widget_for(&TypeDescriptor::date(), &root()).unwrap();
        let d = NaiveDate::from_ymd_opt(2013, 12, 11).unwrap();
        assert_eq!(
            date.format_value(&Instance::Date(d), &root()).unwrap(),
            FormattedValue::Value("2013-12-11".to_string())
        );

        let time = widget_for(&TypeDescriptor::time(), &root()).unwrap();
        let t = NaiveTime::from_hms_opt(10, 9, 8).unwrap();
        assert_eq!(
            time.format_value(&Instance::Time(t), &root()).unwrap(),
            FormattedValue::Value("10:09:08".to_string())
        );
    }

    #[test]
    fn test_datetime_has_script_hook() {
        let rule = widget_for(&TypeDescriptor::datetime(), &root()).unwrap();
        assert_eq!(rule.script, Some(ScriptHook::DateTimePicker));
    }

    #[test]
    fn test_integer_null_is_absent() {
        let rule = widget_for(&TypeDescriptor::integer(), &root()).unwrap();
        assert_eq!(
            rule.format_value(&Instance::Null, &root()).unwrap(),
            FormattedValue::Absent
        );
    }

    #[test]
    fn test_mismatch_names_path() {
        let rule = widget_for(&TypeDescriptor::integer(), &root()).unwrap();
        let err = rule.format_value(&Instance::from("x"), &root()).unwrap_err();
        match err {
            RenderError::InstanceMismatch { path, expected, found } => {
                assert_eq!(path, "f");
                assert_eq!(expected, "integer");
                assert_eq!(found, "text");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_record_has_no_widget() {
        let ty = TypeDescriptor::record(RecordSchema::new("Inner", vec![]));
        let err = widget_for(&ty, &root()).unwrap_err();
        assert!(err.to_string().contains("Inner"));
    }

    #[test]
    fn test_hidden_override_keeps_value() {
        let rule = widget_for(
            &TypeDescriptor::integer().with_ui(UiOverride::Hidden),
            &root(),
        )
        .unwrap();
        assert_eq!(rule.input_type, "hidden");
        assert_eq!(
            rule.format_value(&Instance::Integer(7), &root()).unwrap(),
            FormattedValue::Value("7".to_string())
        );
    }
}
