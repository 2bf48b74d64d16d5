//! Suggested starting values for parameters
//!
//! A parameter that scales something depending on `x` (an amplitude, a
//! wavenumber, a width) starts at 1 so the curve is visible; every other
//! parameter (offsets, phases) starts at 0. In `a*sin(k*(x - phi)) + c`
//! that gives `a = 1`, `k = 1`, `phi = 0`, `c = 0`.

use super::{BinaryOp, Builtin, Expression, Node};

/// Default values for every parameter of `expr`, in parameter order
pub fn suggested_defaults(expr: &Expression) -> Vec<(String, f64)> {
    expr.parameters()
        .iter()
        .map(|name| (name.clone(), suggested_value(expr.root(), name)))
        .collect()
}

/// 1.0 if `name` multiplies an `x`-dependent sub-expression, else 0.0
pub fn suggested_value(root: &Node, name: &str) -> f64 {
    if scales_axis_term(root, name) {
        1.0
    } else {
        0.0
    }
}

/// Whether `name` appears as a factor of a product or quotient whose other
/// side depends on `x`, anywhere along the `x`-dependent part of the tree.
fn scales_axis_term(node: &Node, name: &str) -> bool {
    if let Node::Binary(lhs, BinaryOp::Mul | BinaryOp::Div, rhs) = node {
        if (lhs.contains_axis() && is_factor(rhs, name))
            || (rhs.contains_axis() && is_factor(lhs, name))
        {
            return true;
        }
    }

    match node {
        Node::Unary(_, operand) => operand.contains_axis() && scales_axis_term(operand, name),
        Node::Binary(lhs, _, rhs) => [lhs, rhs]
            .into_iter()
            .any(|side| side.contains_axis() && scales_axis_term(side, name)),
        Node::Call(_, args) => args
            .iter()
            .any(|arg| arg.contains_axis() && scales_axis_term(arg, name)),
        Node::Number(_) | Node::Constant(_) | Node::Axis | Node::Parameter(_) => false,
    }
}

/// Whether `name` enters `node` multiplicatively: directly, through a
/// product or quotient, as a term of an `x`-free sum, or anywhere inside a
/// power.
fn is_factor(node: &Node, name: &str) -> bool {
    match node {
        Node::Parameter(p) => p == name,
        Node::Unary(_, operand) => is_factor(operand, name),
        Node::Binary(lhs, BinaryOp::Mul | BinaryOp::Div, rhs) => {
            is_factor(lhs, name) || is_factor(rhs, name)
        }
        // In `x*(b^2 + c)` both terms set the scale of `x`
        Node::Binary(lhs, BinaryOp::Add | BinaryOp::Sub, rhs) if !node.contains_axis() => {
            is_factor(lhs, name) || is_factor(rhs, name)
        }
        Node::Binary(_, BinaryOp::Pow, _) => node.contains_parameter(name),
        Node::Call(Builtin::Sqrt, _) => node.contains_parameter(name),
        _ => false,
    }
}
