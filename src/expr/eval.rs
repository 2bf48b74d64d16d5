//! Numeric evaluation of expression trees
//!
//! Evaluation never panics: every point either yields a finite number or an
//! [`Undefined`] reason, and undefined points are simply left out of the plot.

use super::{BinaryOp, Builtin, Node, UnaryOp};
use std::collections::HashMap;
use thiserror::Error;

/// Why an expression has no finite value at a point
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Undefined {
    #[error("division by zero")]
    DivisionByZero,
    #[error("{0} is undefined for this argument")]
    Domain(Builtin),
    #[error("zero raised to a negative power")]
    ZeroToNegativePower,
    #[error("power has no real value")]
    NonRealPower,
    #[error("result is not finite")]
    NonFinite,
    #[error("parameter `{0}` has no value")]
    UnboundParameter(String),
}

/// Source of parameter values during evaluation
pub trait ParameterLookup {
    fn value_of(&self, name: &str) -> Option<f64>;
}

/// No parameters bound
impl ParameterLookup for () {
    fn value_of(&self, _name: &str) -> Option<f64> {
        None
    }
}

impl<'a> ParameterLookup for [(&'a str, f64)] {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
    }
}

impl ParameterLookup for HashMap<String, f64> {
    fn value_of(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

pub(super) fn evaluate<P: ParameterLookup + ?Sized>(
    node: &Node,
    x: f64,
    params: &P,
) -> Result<f64, Undefined> {
    let value = eval_node(node, x, params)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Undefined::NonFinite)
    }
}

fn eval_node<P: ParameterLookup + ?Sized>(node: &Node, x: f64, params: &P) -> Result<f64, Undefined> {
    match node {
        Node::Number(value) => Ok(*value),
        Node::Constant(constant) => Ok(constant.value()),
        Node::Axis => Ok(x),
        Node::Parameter(name) => params
            .value_of(name)
            .ok_or_else(|| Undefined::UnboundParameter(name.clone())),
        Node::Unary(UnaryOp::Neg, operand) => Ok(-eval_node(operand, x, params)?),
        Node::Binary(lhs, op, rhs) => {
            let a = eval_node(lhs, x, params)?;
            let b = eval_node(rhs, x, params)?;
            apply_binary(*op, a, b)
        }
        Node::Call(Builtin::Zero, _) => Ok(0.0),
        Node::Call(builtin, args) => {
            let arg = args.first().ok_or(Undefined::Domain(*builtin))?;
            apply_builtin(*builtin, eval_node(arg, x, params)?)
        }
    }
}

fn apply_binary(op: BinaryOp, a: f64, b: f64) -> Result<f64, Undefined> {
    match op {
        BinaryOp::Add => Ok(a + b),
        BinaryOp::Sub => Ok(a - b),
        BinaryOp::Mul => Ok(a * b),
        BinaryOp::Div => {
            if b == 0.0 {
                Err(Undefined::DivisionByZero)
            } else {
                Ok(a / b)
            }
        }
        BinaryOp::Pow => {
            if a == 0.0 && b < 0.0 {
                Err(Undefined::ZeroToNegativePower)
            } else if a < 0.0 && b.fract() != 0.0 {
                Err(Undefined::NonRealPower)
            } else {
                Ok(a.powf(b))
            }
        }
    }
}

fn apply_builtin(builtin: Builtin, v: f64) -> Result<f64, Undefined> {
    let value = match builtin {
        Builtin::Sin => v.sin(),
        Builtin::Cos => v.cos(),
        Builtin::Tan => v.tan(),
        Builtin::Arcsin | Builtin::Arccos if !(-1.0..=1.0).contains(&v) => {
            return Err(Undefined::Domain(builtin))
        }
        Builtin::Arcsin => v.asin(),
        Builtin::Arccos => v.acos(),
        Builtin::Arctan => v.atan(),
        Builtin::Sinh => v.sinh(),
        Builtin::Cosh => v.cosh(),
        Builtin::Tanh => v.tanh(),
        Builtin::Exp => v.exp(),
        Builtin::Log if v <= 0.0 => return Err(Undefined::Domain(builtin)),
        Builtin::Log => v.ln(),
        Builtin::Sqrt if v < 0.0 => return Err(Undefined::Domain(builtin)),
        Builtin::Sqrt => v.sqrt(),
        Builtin::Abs => v.abs(),
        Builtin::Rect => {
            if v * v <= 1.0 {
                1.0
            } else {
                0.0
            }
        }
        Builtin::Zero => 0.0,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::super::Expression;
    use super::*;

    fn eval(src: &str, x: f64) -> Result<f64, Undefined> {
        Expression::parse(src).unwrap().eval(x, &())
    }

    #[test]
    fn test_square() {
        assert_eq!(eval("x^2", 3.0), Ok(9.0));
    }

    #[test]
    fn test_division_by_zero_is_undefined() {
        assert_eq!(eval("1/x", 0.0), Err(Undefined::DivisionByZero));
        assert_eq!(eval("1/x", 4.0), Ok(0.25));
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(eval("log(x)", 0.0), Err(Undefined::Domain(Builtin::Log)));
        assert_eq!(eval("sqrt(x)", -1.0), Err(Undefined::Domain(Builtin::Sqrt)));
        assert_eq!(eval("arcsin(x)", 1.5), Err(Undefined::Domain(Builtin::Arcsin)));
        assert_eq!(eval("acos(x)", -2.0), Err(Undefined::Domain(Builtin::Arccos)));
    }

    #[test]
    fn test_powers() {
        assert_eq!(eval("x^-1", 0.0), Err(Undefined::ZeroToNegativePower));
        assert_eq!(eval("x^0.5", -4.0), Err(Undefined::NonRealPower));
        assert_eq!(eval("x^3", -2.0), Ok(-8.0));
        assert_eq!(eval("x^0", 0.0), Ok(1.0));
    }

    #[test]
    fn test_overflow_is_undefined() {
        assert_eq!(eval("exp(x)", 1000.0), Err(Undefined::NonFinite));
        assert_eq!(eval("exp(x) - exp(x)", 1000.0), Err(Undefined::NonFinite));
    }

    #[test]
    fn test_rect_and_zero() {
        assert_eq!(eval("rect(x)", 0.5), Ok(1.0));
        assert_eq!(eval("rect(x)", -1.0), Ok(1.0));
        assert_eq!(eval("rect(x)", 1.5), Ok(0.0));
        assert_eq!(eval("zero(x)", 1.0 / 3.0), Ok(0.0));
        assert_eq!(eval("zero(1/x)", 0.0), Ok(0.0));
    }

    #[test]
    fn test_parameters() {
        let expr = Expression::parse("a*x + b").unwrap();
        assert_eq!(expr.eval(2.0, &[("a", 3.0), ("b", 1.0)][..]), Ok(7.0));
        assert_eq!(
            expr.eval(2.0, &[("a", 3.0)][..]),
            Err(Undefined::UnboundParameter("b".to_string()))
        );

        let mut values = HashMap::new();
        values.insert("a".to_string(), -1.0);
        values.insert("b".to_string(), 0.5);
        assert_eq!(expr.eval(2.0, &values), Ok(-1.5));
    }

    #[test]
    fn test_constants() {
        let value = eval("cos(pi*x)", 1.0).unwrap();
        assert!((value + 1.0).abs() < 1e-12);
        let value = eval("log(E*x)", 1.0).unwrap();
        assert!((value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_malformed_call_does_not_panic() {
        let node = Node::Call(Builtin::Sin, Vec::new());
        assert_eq!(evaluate(&node, 0.0, &()), Err(Undefined::Domain(Builtin::Sin)));
    }
}
