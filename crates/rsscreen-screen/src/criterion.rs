//! Screening criteria.
//!
//! Criteria arrive as plain configuration (`field`, `comparator`, `operand`)
//! and are compiled once against the run's [`RowSchema`]. All name and type
//! checks happen at compile time, so evaluation itself cannot fail.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use rsscreen_core::ConfigError;
use serde::{Deserialize, Serialize};

use crate::row::{Field, FieldKind, FieldValue, RankedRow, RowSchema};

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `==`
    Eq,
    /// `>=`
    Ge,
    /// `<=`
    Le,
}

impl Comparator {
    /// Operator symbol.
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Eq => "==",
            Self::Ge => ">=",
            Self::Le => "<=",
        }
    }

    /// Whether the operator is defined for a field type. Ordering operators
    /// apply to numbers only.
    pub const fn applies_to(&self, kind: FieldKind) -> bool {
        matches!((self, kind), (Self::Eq, _) | (_, FieldKind::Number))
    }

    /// Applies the operator to an ordering of `lhs` relative to `rhs`.
    pub const fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Gt => matches!(ordering, Ordering::Greater),
            Self::Lt => matches!(ordering, Ordering::Less),
            Self::Eq => matches!(ordering, Ordering::Equal),
            Self::Ge => !matches!(ordering, Ordering::Less),
            Self::Le => !matches!(ordering, Ordering::Greater),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            ">" => Ok(Self::Gt),
            "<" => Ok(Self::Lt),
            "==" => Ok(Self::Eq),
            ">=" => Ok(Self::Ge),
            "<=" => Ok(Self::Le),
            other => Err(ConfigError::UnsupportedComparator(other.to_string())),
        }
    }
}

/// Right-hand side of a criterion: a literal or another field.
///
/// In JSON a field reference is written `{"field": "RS_12M"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    /// Another field of the same row.
    Field {
        /// Referenced field name.
        field: String,
    },
    /// Boolean literal.
    Bool(bool),
    /// Numeric literal.
    Number(f64),
    /// Text literal.
    Text(String),
}

impl Operand {
    /// Reference to another field.
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field { field: name.into() }
    }

    fn describe(&self) -> String {
        match self {
            Self::Field { field } => format!("field '{field}'"),
            Self::Bool(_) => FieldKind::Flag.to_string(),
            Self::Number(_) => FieldKind::Number.to_string(),
            Self::Text(_) => FieldKind::Text.to_string(),
        }
    }
}

/// A filter criterion as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningCriterion {
    /// Field the criterion tests.
    pub field: String,
    /// One of `>`, `<`, `==`, `>=`, `<=`.
    pub comparator: String,
    /// Literal or field reference.
    pub operand: Operand,
}

impl ScreeningCriterion {
    /// Creates a criterion.
    pub fn new(field: impl Into<String>, comparator: impl Into<String>, operand: Operand) -> Self {
        Self {
            field: field.into(),
            comparator: comparator.into(),
            operand,
        }
    }

    /// Resolves names and checks types against a schema.
    ///
    /// # Errors
    ///
    /// Fails on an unknown field, an unsupported comparator, a comparator that
    /// does not apply to the field's type, or an operand of a different type.
    pub fn compile(&self, schema: &RowSchema) -> Result<CompiledCriterion, ConfigError> {
        let field = schema.resolve(&self.field)?;
        let comparator: Comparator = self.comparator.parse()?;
        let kind = field.kind();

        if !comparator.applies_to(kind) {
            return Err(ConfigError::ComparatorNotApplicable {
                field: self.field.clone(),
                comparator: comparator.to_string(),
                kind: kind.to_string(),
            });
        }

        let operand = match &self.operand {
            Operand::Field { field: other } => CompiledOperand::Field(schema.resolve(other)?),
            Operand::Bool(b) => CompiledOperand::Literal(FieldValue::Flag(*b)),
            Operand::Number(n) => CompiledOperand::Literal(FieldValue::Number(*n)),
            Operand::Text(t) => CompiledOperand::Literal(FieldValue::Text(t.clone())),
        };

        if operand.kind() != kind {
            return Err(ConfigError::OperandMismatch {
                field: self.field.clone(),
                expected: kind.to_string(),
                found: self.operand.describe(),
            });
        }

        Ok(CompiledCriterion {
            field,
            comparator,
            operand,
        })
    }
}

/// A resolved operand.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledOperand {
    /// Another field.
    Field(Field),
    /// A literal value.
    Literal(FieldValue),
}

impl CompiledOperand {
    fn kind(&self) -> FieldKind {
        match self {
            Self::Field(f) => f.kind(),
            Self::Literal(v) => v.kind(),
        }
    }
}

/// A criterion checked against a schema, ready to evaluate.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledCriterion {
    field: Field,
    comparator: Comparator,
    operand: CompiledOperand,
}

impl CompiledCriterion {
    /// Tests a row. A missing value on either side fails the criterion.
    pub fn matches(&self, row: &RankedRow) -> bool {
        let Some(lhs) = row.value(&self.field) else {
            return false;
        };
        let rhs = match &self.operand {
            CompiledOperand::Field(f) => match row.value(f) {
                Some(v) => v,
                None => return false,
            },
            CompiledOperand::Literal(v) => v.clone(),
        };

        compare(&lhs, &rhs).is_some_and(|ordering| self.comparator.holds(ordering))
    }

    /// The tested field.
    pub const fn field(&self) -> Field {
        self.field
    }

    /// The operator.
    pub const fn comparator(&self) -> Comparator {
        self.comparator
    }
}

/// Orders two values of the same type.
pub(crate) fn compare(lhs: &FieldValue, rhs: &FieldValue) -> Option<Ordering> {
    match (lhs, rhs) {
        (FieldValue::Number(a), FieldValue::Number(b)) => a.partial_cmp(b),
        (FieldValue::Flag(a), FieldValue::Flag(b)) => Some(a.cmp(b)),
        (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::WindowFigures;
    use rsscreen_core::WindowCatalog;
    use rsscreen_metrics::TrendFlag;

    fn schema() -> RowSchema {
        let catalog = WindowCatalog::new([("1M", 21), ("12M", 252)]).unwrap();
        RowSchema::new(&catalog, vec!["Above200MA".to_string()]).unwrap()
    }

    fn row(rs_1m: Option<f64>, rs_12m: Option<f64>, above: Option<bool>) -> RankedRow {
        RankedRow {
            symbol: "XLE".to_string(),
            close: 90.0,
            history: 260,
            ytd: Some(4.0),
            windows: vec![
                WindowFigures {
                    window: "1M".to_string(),
                    performance: Some(1.0),
                    rating: rs_1m,
                },
                WindowFigures {
                    window: "12M".to_string(),
                    performance: Some(8.0),
                    rating: rs_12m,
                },
            ],
            flags: vec![TrendFlag {
                name: "Above200MA".to_string(),
                value: above,
            }],
        }
    }

    fn compile(field: &str, cmp: &str, operand: Operand) -> Result<CompiledCriterion, ConfigError> {
        ScreeningCriterion::new(field, cmp, operand).compile(&schema())
    }

    #[test]
    fn test_comparators() {
        let r = row(Some(80.0), Some(50.0), Some(true));
        assert!(compile("RS_1M", ">", Operand::Number(79.9)).unwrap().matches(&r));
        assert!(!compile("RS_1M", ">", Operand::Number(80.0)).unwrap().matches(&r));
        assert!(compile("RS_1M", ">=", Operand::Number(80.0)).unwrap().matches(&r));
        assert!(compile("RS_1M", "==", Operand::Number(80.0)).unwrap().matches(&r));
        assert!(compile("RS_1M", "<", Operand::Number(81.0)).unwrap().matches(&r));
        assert!(compile("RS_1M", "<=", Operand::Number(80.0)).unwrap().matches(&r));
        assert!(!compile("RS_1M", "<", Operand::Number(80.0)).unwrap().matches(&r));
    }

    #[test]
    fn test_field_reference() {
        let c = compile("RS_1M", ">", Operand::field("RS_12M")).unwrap();
        assert!(c.matches(&row(Some(80.0), Some(50.0), None)));
        assert!(!c.matches(&row(Some(40.0), Some(50.0), None)));
        assert!(!c.matches(&row(Some(80.0), None, None)));
    }

    #[test]
    fn test_missing_fails_closed() {
        let above = compile("Above200MA", "==", Operand::Bool(false)).unwrap();
        assert!(!above.matches(&row(None, None, None)));
        assert!(above.matches(&row(None, None, Some(false))));

        let rs = compile("RS_12M", "<", Operand::Number(100.0)).unwrap();
        assert!(!rs.matches(&row(None, None, None)));
    }

    #[test]
    fn test_text_field() {
        let c = compile("Symbol", "==", Operand::Text("XLE".to_string())).unwrap();
        assert!(c.matches(&row(None, None, None)));
    }

    #[test]
    fn test_unknown_field() {
        let result = compile("RS_6M", ">", Operand::Number(1.0));
        assert!(matches!(result, Err(ConfigError::UnknownField(_))));

        let result = compile("RS_1M", ">", Operand::field("Nope"));
        assert!(matches!(result, Err(ConfigError::UnknownField(_))));
    }

    #[test]
    fn test_unsupported_comparator() {
        for cmp in ["!=", "=", "=>", "contains"] {
            let result = compile("RS_1M", cmp, Operand::Number(1.0));
            assert!(matches!(result, Err(ConfigError::UnsupportedComparator(_))), "{cmp}");
        }
    }

    #[test]
    fn test_type_checks() {
        assert!(matches!(
            compile("Above200MA", ">", Operand::Bool(true)),
            Err(ConfigError::ComparatorNotApplicable { .. })
        ));
        assert!(matches!(
            compile("Above200MA", "==", Operand::Number(1.0)),
            Err(ConfigError::OperandMismatch { .. })
        ));
        assert!(matches!(
            compile("RS_1M", ">", Operand::field("Above200MA")),
            Err(ConfigError::OperandMismatch { .. })
        ));
    }

    #[test]
    fn test_deserialize_criteria() {
        let json = r#"[
            {"field": "Above200MA", "comparator": "==", "operand": true},
            {"field": "RS_1M", "comparator": ">=", "operand": 80},
            {"field": "RS_1M", "comparator": ">", "operand": {"field": "RS_12M"}}
        ]"#;
        let criteria: Vec<ScreeningCriterion> = serde_json::from_str(json).unwrap();
        assert_eq!(criteria[0].operand, Operand::Bool(true));
        assert_eq!(criteria[1].operand, Operand::Number(80.0));
        assert_eq!(criteria[2].operand, Operand::field("RS_12M"));
    }
}
