//! Expression trees for plotted functions
//!
//! A function such as `a*sin(k*(x - phi)) + c` is parsed into an immutable
//! [`Expression`]: a tree of [`Node`]s plus the ordered list of parameter
//! names it references. The identifier `x` is the plot axis; `pi` and `E` are
//! constants; every other bare identifier is a parameter.
//!
//! # Main Types
//!
//! - [`Expression`] - Parsed function with its source text and parameters
//! - [`Node`] - One node of the expression tree
//! - [`Builtin`] - Named functions callable from expressions
//! - [`ParseError`] - Parse failure with the offending span
//! - [`Undefined`] - Reason a point could not be evaluated
//!
//! # Example
//!
//! ```
//! use plotty_rs::expr::Expression;
//!
//! let expr = Expression::parse("x^2").unwrap();
//! assert_eq!(expr.eval(3.0, &()), Ok(9.0));
//! ```

pub mod defaults;
mod eval;
mod lexer;
mod parser;

pub use eval::{ParameterLookup, Undefined};
pub use parser::{parse, ParseError, ParseErrorKind};

use std::collections::HashMap;
use std::fmt;

/// Name of the independent variable plotted on the horizontal axis
pub const AXIS_VARIABLE: &str = "x";

/// Titles longer than this are replaced by a plain `f(x)`
pub const MAX_TITLE_LEN: usize = 150;

/// Function plotted when the entry box is left blank
pub const BLANK_EXPRESSION: &str = "zero(x)";

/// Named mathematical constants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Constant::Pi),
            "E" => Some(Constant::E),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "E",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Add | BinaryOp::Sub => 1,
            BinaryOp::Mul | BinaryOp::Div => 2,
            BinaryOp::Pow => 4,
        }
    }
}

/// Functions that can be called by name inside an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Arcsin,
    Arccos,
    Arctan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Log,
    Sqrt,
    Abs,
    /// `rect(t)` is 1 when `t^2 <= 1`, otherwise 0
    Rect,
    /// Always 0, whatever its arguments
    Zero,
}

impl Builtin {
    /// Look up a builtin by any of its accepted spellings
    pub fn from_name(name: &str) -> Option<Self> {
        let builtin = match name {
            "sin" => Builtin::Sin,
            "cos" => Builtin::Cos,
            "tan" => Builtin::Tan,
            "arcsin" | "asin" => Builtin::Arcsin,
            "arccos" | "acos" => Builtin::Arccos,
            "arctan" | "atan" => Builtin::Arctan,
            "sinh" => Builtin::Sinh,
            "cosh" => Builtin::Cosh,
            "tanh" => Builtin::Tanh,
            "exp" => Builtin::Exp,
            "log" | "ln" => Builtin::Log,
            "sqrt" => Builtin::Sqrt,
            "abs" => Builtin::Abs,
            "rect" => Builtin::Rect,
            "zero" | "zeros" => Builtin::Zero,
            _ => return None,
        };
        Some(builtin)
    }

    /// Canonical name used when displaying expressions
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Tan => "tan",
            Builtin::Arcsin => "arcsin",
            Builtin::Arccos => "arccos",
            Builtin::Arctan => "arctan",
            Builtin::Sinh => "sinh",
            Builtin::Cosh => "cosh",
            Builtin::Tanh => "tanh",
            Builtin::Exp => "exp",
            Builtin::Log => "log",
            Builtin::Sqrt => "sqrt",
            Builtin::Abs => "abs",
            Builtin::Rect => "rect",
            Builtin::Zero => "zero",
        }
    }

    /// Required argument count, `None` for variadic builtins
    pub fn arity(self) -> Option<usize> {
        match self {
            Builtin::Zero => None,
            _ => Some(1),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A node of the expression tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Constant(Constant),
    /// The plot axis variable `x`
    Axis,
    Parameter(String),
    Unary(UnaryOp, Box<Node>),
    Binary(Box<Node>, BinaryOp, Box<Node>),
    Call(Builtin, Vec<Node>),
}

impl Node {
    pub fn binary(lhs: Node, op: BinaryOp, rhs: Node) -> Self {
        Node::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    pub fn neg(operand: Node) -> Self {
        Node::Unary(UnaryOp::Neg, Box::new(operand))
    }

    /// Whether the axis variable occurs anywhere below this node
    pub fn contains_axis(&self) -> bool {
        self.any(&|node| matches!(node, Node::Axis))
    }

    /// Whether the named parameter occurs anywhere below this node
    pub fn contains_parameter(&self, name: &str) -> bool {
        self.any(&|node| matches!(node, Node::Parameter(p) if p == name))
    }

    fn any(&self, pred: &dyn Fn(&Node) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        match self {
            Node::Number(_) | Node::Constant(_) | Node::Axis | Node::Parameter(_) => false,
            Node::Unary(_, operand) => operand.any(pred),
            Node::Binary(lhs, _, rhs) => lhs.any(pred) || rhs.any(pred),
            Node::Call(_, args) => args.iter().any(|arg| arg.any(pred)),
        }
    }

    fn substitute(&self, values: &HashMap<&str, f64>) -> Node {
        match self {
            Node::Parameter(name) => match values.get(name.as_str()) {
                Some(value) => Node::Number(*value),
                None => self.clone(),
            },
            Node::Unary(op, operand) => Node::Unary(*op, Box::new(operand.substitute(values))),
            Node::Binary(lhs, op, rhs) => Node::Binary(
                Box::new(lhs.substitute(values)),
                *op,
                Box::new(rhs.substitute(values)),
            ),
            Node::Call(builtin, args) => {
                Node::Call(*builtin, args.iter().map(|a| a.substitute(values)).collect())
            }
            Node::Number(_) | Node::Constant(_) | Node::Axis => self.clone(),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Node::Binary(_, op, _) => op.precedence(),
            Node::Unary(..) => 3,
            Node::Number(v) if v.is_sign_negative() => 3,
            _ => 5,
        }
    }

    fn fmt_child(&self, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(v) => write!(f, "{}", v),
            Node::Constant(c) => f.write_str(c.name()),
            Node::Axis => f.write_str(AXIS_VARIABLE),
            Node::Parameter(name) => f.write_str(name),
            Node::Unary(UnaryOp::Neg, operand) => {
                f.write_str("-")?;
                operand.fmt_child(f, operand.precedence() <= 3)
            }
            Node::Binary(lhs, op, rhs) => {
                let prec = op.precedence();
                // `^` is right associative, everything else left associative
                let (left_parens, right_parens) = if *op == BinaryOp::Pow {
                    (lhs.precedence() <= prec, rhs.precedence() < prec)
                } else {
                    (lhs.precedence() < prec, rhs.precedence() <= prec)
                };
                lhs.fmt_child(f, left_parens)?;
                match op {
                    BinaryOp::Pow => f.write_str(op.symbol())?,
                    _ => write!(f, " {} ", op.symbol())?,
                }
                rhs.fmt_child(f, right_parens)
            }
            Node::Call(builtin, args) => {
                write!(f, "{}(", builtin)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

/// A parsed function of the axis variable and zero or more parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
    parameters: Vec<String>,
}

impl Expression {
    pub(crate) fn new(source: impl Into<String>, root: Node, parameters: Vec<String>) -> Self {
        Self {
            source: source.into(),
            root,
            parameters,
        }
    }

    /// Parse a function definition. See [`parse`].
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        parse(source)
    }

    /// The constant zero function, `zero(x)`
    pub fn zero() -> Self {
        Expression::new(
            BLANK_EXPRESSION,
            Node::Call(Builtin::Zero, vec![Node::Axis]),
            Vec::new(),
        )
    }

    /// The text this expression was parsed from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Parameter names in order of first appearance
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Evaluate at axis value `x` with the given parameter values
    pub fn eval<P: ParameterLookup + ?Sized>(&self, x: f64, params: &P) -> Result<f64, Undefined> {
        eval::evaluate(&self.root, x, params)
    }

    /// Replace every bound parameter by its current value.
    ///
    /// Parameters without a value are left symbolic.
    pub fn substitute<P: ParameterLookup + ?Sized>(&self, params: &P) -> Expression {
        let values: HashMap<&str, f64> = self
            .parameters
            .iter()
            .filter_map(|name| params.value_of(name).map(|v| (name.as_str(), v)))
            .collect();
        let root = self.root.substitute(&values);
        let parameters = self
            .parameters
            .iter()
            .filter(|name| !values.contains_key(name.as_str()))
            .cloned()
            .collect();
        Expression::new(root.to_string(), root, parameters)
    }

    /// Plot title, e.g. `f(x) = a*sin(x)`
    pub fn title(&self) -> String {
        let rendered = self.root.to_string();
        if rendered.len() > MAX_TITLE_LEN {
            "f(x)".to_string()
        } else {
            format!("f(x) = {}", rendered)
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}

impl std::str::FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
