//! Filter representations accepted by the search read path.
//!
//! Two forms coexist: the flat `field:value` token that the query builder
//! consumes, and the structured [`SearchFilter`] input which carries a
//! comparison operator. Only equality can be expressed as a token.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An exact-match constraint parsed from a `field:value` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterToken {
    /// The document field to match.
    pub field: String,
    /// The exact value the field must hold.
    pub value: String,
}

impl FilterToken {
    /// Parse a `field:value` token, splitting at the first colon.
    ///
    /// Returns `None` when the token has no colon. The value may itself
    /// contain colons; there is no escaping.
    pub fn parse(token: &str) -> Option<Self> {
        let (field, value) = token.split_once(':')?;
        Some(Self {
            field: field.to_string(),
            value: value.to_string(),
        })
    }

    /// Parse every token in `tokens`, dropping the ones without a colon.
    pub fn parse_all<S: AsRef<str>>(tokens: &[S]) -> Vec<Self> {
        tokens
            .iter()
            .filter_map(|token| Self::parse(token.as_ref()))
            .collect()
    }
}

impl fmt::Display for FilterToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}

/// Comparison operator carried by a structured filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    #[default]
    Eq,
    Ne,
    Gt,
    Lt,
    Gte,
    Lte,
    Contains,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Gt => "gt",
            Self::Lt => "lt",
            Self::Gte => "gte",
            Self::Lte => "lte",
            Self::Contains => "contains",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an operator name is not one of the known operators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOperatorError(pub String);

impl fmt::Display for ParseOperatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown filter operator: {}", self.0)
    }
}

impl std::error::Error for ParseOperatorError {}

impl FromStr for FilterOperator {
    type Err = ParseOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(Self::Eq),
            "ne" => Ok(Self::Ne),
            "gt" => Ok(Self::Gt),
            "lt" => Ok(Self::Lt),
            "gte" => Ok(Self::Gte),
            "lte" => Ok(Self::Lte),
            "contains" => Ok(Self::Contains),
            other => Err(ParseOperatorError(other.to_string())),
        }
    }
}

/// Structured filter input.
///
/// The operator defaults to `eq` when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    pub field: String,
    pub value: String,
    #[serde(default)]
    pub operator: FilterOperator,
}

impl SearchFilter {
    /// Create an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator: FilterOperator::Eq,
        }
    }

    /// The equivalent `field:value` token, if the operator is `eq`.
    ///
    /// Other operators have no token form and yield `None`.
    pub fn to_token(&self) -> Option<FilterToken> {
        match self.operator {
            FilterOperator::Eq => Some(FilterToken {
                field: self.field.clone(),
                value: self.value.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_splits_at_first_colon() {
        let token = FilterToken::parse("url:https://example.com").unwrap();
        assert_eq!(token.field, "url");
        assert_eq!(token.value, "https://example.com");
    }

    #[test]
    fn test_parse_token_without_colon() {
        assert!(FilterToken::parse("type").is_none());
        assert!(FilterToken::parse("").is_none());
    }

    #[test]
    fn test_parse_token_empty_parts_are_kept() {
        let token = FilterToken::parse(":report").unwrap();
        assert_eq!(token.field, "");
        assert_eq!(token.value, "report");

        let token = FilterToken::parse("type:").unwrap();
        assert_eq!(token.field, "type");
        assert_eq!(token.value, "");
    }

    #[test]
    fn test_parse_all_drops_invalid_tokens() {
        let tokens = ["type:report", "garbage", "region:emea"];
        let parsed = FilterToken::parse_all(&tokens);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].to_string(), "type:report");
        assert_eq!(parsed[1].to_string(), "region:emea");
    }

    #[test]
    fn test_operator_from_str() {
        assert_eq!("gte".parse::<FilterOperator>().unwrap(), FilterOperator::Gte);
        assert_eq!(
            "contains".parse::<FilterOperator>().unwrap(),
            FilterOperator::Contains
        );
        assert!("between".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn test_structured_filter_defaults_to_eq() {
        let filter: SearchFilter =
            serde_json::from_str(r#"{"field": "type", "value": "report"}"#).unwrap();
        assert_eq!(filter.operator, FilterOperator::Eq);
        assert_eq!(filter.to_token().unwrap().to_string(), "type:report");
    }

    #[test]
    fn test_structured_filter_non_eq_has_no_token() {
        let filter: SearchFilter =
            serde_json::from_str(r#"{"field": "year", "value": "2020", "operator": "gt"}"#)
                .unwrap();
        assert_eq!(filter.operator, FilterOperator::Gt);
        assert!(filter.to_token().is_none());
    }
}
