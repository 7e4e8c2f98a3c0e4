use std::fmt;
use std::str::FromStr;

/// A decoded tag value, before it is stringified into the raw tag map.
#[derive(Debug, Clone, PartialEq)]
pub enum TagValue {
    /// Rational encoded as numerator / denominator.
    Fraction(i64, i64),
    Integer(i64),
    Decimal(f64),
    Text(String),
    Sequence(Vec<TagValue>),
}

/// Result of numeric coercion.
///
/// A sequence keeps one slot per input element; a slot is `None` when that
/// element could not be coerced.
#[derive(Debug, Clone, PartialEq)]
pub enum Numeric {
    Scalar(f64),
    Sequence(Vec<Option<Numeric>>),
}

impl Numeric {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Numeric::Scalar(v) => Some(*v),
            Numeric::Sequence(_) => None,
        }
    }

    /// Flatten a sequence into its scalar slots. Nested sequences and
    /// uncoercible slots become `None`; a scalar yields a single slot.
    pub fn components(&self) -> Vec<Option<f64>> {
        match self {
            Numeric::Scalar(v) => vec![Some(*v)],
            Numeric::Sequence(items) => items
                .iter()
                .map(|item| item.as_ref().and_then(Numeric::as_scalar))
                .collect(),
        }
    }
}

/// Coerce a tag value into a float or a sequence of floats.
///
/// A zero denominator yields `0.0` rather than a failure: malformed tag
/// blocks do encode `n/0` and the value is still rendered downstream.
pub fn coerce(value: &TagValue) -> Option<Numeric> {
    match value {
        TagValue::Fraction(num, den) => {
            if *den == 0 {
                return Some(Numeric::Scalar(0.0));
            }
            finite(*num as f64 / *den as f64)
        }
        TagValue::Integer(v) => finite(*v as f64),
        TagValue::Decimal(v) => finite(*v),
        TagValue::Text(s) => s.trim().parse::<f64>().ok().and_then(finite),
        TagValue::Sequence(items) => Some(Numeric::Sequence(items.iter().map(coerce).collect())),
    }
}

fn finite(v: f64) -> Option<Numeric> {
    v.is_finite().then_some(Numeric::Scalar(v))
}

impl fmt::Display for TagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagValue::Fraction(num, 1) => write!(f, "{num}"),
            TagValue::Fraction(num, den) => write!(f, "{num}/{den}"),
            TagValue::Integer(v) => write!(f, "{v}"),
            TagValue::Decimal(v) => write!(f, "{v}"),
            TagValue::Text(s) => f.write_str(s),
            TagValue::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl TagValue {
    /// Classify a single numeric token. Anything that is not a fraction,
    /// integer or decimal is kept as text.
    pub fn from_token(s: &str) -> Self {
        let token = s.trim();
        if let Some((num, den)) = token.split_once('/') {
            if let (Ok(num), Ok(den)) = (num.trim().parse::<i64>(), den.trim().parse::<i64>()) {
                return TagValue::Fraction(num, den);
            }
            return TagValue::Text(token.to_string());
        }
        if let Ok(v) = token.parse::<i64>() {
            return TagValue::Integer(v);
        }
        match token.parse::<f64>() {
            Ok(v) if v.is_finite() => TagValue::Decimal(v),
            _ => TagValue::Text(token.to_string()),
        }
    }
}

impl FromStr for TagValue {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TagValue::from_token(s))
    }
}
