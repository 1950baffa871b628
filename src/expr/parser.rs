//! Parser for restricted DNF concept expressions.
//!
//! Whitespace and parentheses are dropped first; parentheses only group
//! visually and never nest semantically. The remaining text is split on `⊔`,
//! each segment on `⊓`, and each token is classified by its leading operator.

use crate::error::{ExprError, ExprResult};

use super::{ALL, AND, Conjunction, EXISTS, Expression, Literal, NOT, OR};

fn is_operator(c: char) -> bool {
    matches!(c, NOT | ALL | EXISTS | AND | OR)
}

/// Parse a concept expression. Pure: names are not resolved against any store.
pub fn parse(expression: &str) -> ExprResult<Expression> {
    let cleaned: String = expression
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '(' && *c != ')')
        .collect();
    if cleaned.is_empty() {
        return Err(ExprError::Empty);
    }

    cleaned
        .split(OR)
        .map(|segment| parse_conjunction(segment, &cleaned))
        .collect::<ExprResult<Vec<_>>>()
        .map(Expression)
}

fn parse_conjunction(segment: &str, expression: &str) -> ExprResult<Conjunction> {
    if segment.is_empty() {
        return Err(ExprError::EmptySegment {
            operator: OR,
            expression: expression.to_string(),
        });
    }
    segment
        .split(AND)
        .map(|token| {
            if token.is_empty() {
                Err(ExprError::EmptySegment {
                    operator: AND,
                    expression: expression.to_string(),
                })
            } else {
                parse_literal(token)
            }
        })
        .collect::<ExprResult<Vec<_>>>()
        .map(Conjunction)
}

fn parse_literal(token: &str) -> ExprResult<Literal> {
    let mut chars = token.chars();
    match chars.next() {
        Some(ALL) => {
            let (role, name) = restriction(token, chars.as_str())?;
            Ok(Literal::All { role, name })
        }
        Some(EXISTS) => {
            let (role, name) = restriction(token, chars.as_str())?;
            Ok(Literal::Exists { role, name })
        }
        Some(NOT) => Ok(Literal::Not {
            name: operand(token, chars.as_str())?,
        }),
        _ => Ok(Literal::Atomic {
            name: identifier(token, token)?,
        }),
    }
}

/// Split `role.Concept` after a quantifier.
fn restriction(token: &str, rest: &str) -> ExprResult<(String, String)> {
    let parts: Vec<&str> = rest.split('.').collect();
    match parts.as_slice() {
        [role, name] => Ok((operand(token, role)?, operand(token, name)?)),
        _ => Err(ExprError::MalformedRestriction {
            token: token.to_string(),
            parts: parts.len(),
        }),
    }
}

/// The argument of `¬`, `∀` or `∃`: must be a bare identifier.
fn operand(token: &str, name: &str) -> ExprResult<String> {
    if name.chars().any(is_operator) {
        return Err(ExprError::NestedOperator {
            token: token.to_string(),
        });
    }
    identifier(token, name)
}

fn identifier(token: &str, name: &str) -> ExprResult<String> {
    if name.is_empty() || name.chars().any(is_operator) {
        return Err(ExprError::InvalidIdentifier {
            token: token.to_string(),
        });
    }
    Ok(name.to_string())
}
