//! Recursive descent parser for function definitions
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | '+' unary | power
//! power   := call (('^' | '**') unary)?
//! call    := IDENT '(' expr (',' expr)* ')' | primary
//! primary := NUMBER | IDENT | '(' expr ')'
//! ```
//!
//! The parser holds no state beyond the input it is given and returns an
//! owned, immutable [`Expression`]. Trees deeper than [`MAX_DEPTH`] are
//! rejected so that parsing and evaluation stay within the stack.

use super::lexer::{tokenize, Token, TokenKind};
use super::{BinaryOp, Builtin, Constant, Expression, Node, AXIS_VARIABLE};
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Deepest expression tree accepted, counting nested groups, calls, signs,
/// exponents and links of `+ - * /` chains
pub const MAX_DEPTH: usize = 256;

/// What went wrong while parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character")]
    UnexpectedCharacter,
    #[error("malformed number")]
    InvalidNumber,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unbalanced parenthesis")]
    UnbalancedParenthesis,
    #[error("unknown function `{0}`")]
    UnknownFunction(String),
    #[error("`{0}` must be called with arguments")]
    MissingArguments(String),
    #[error("`{name}` takes {expected} argument(s), got {found}")]
    WrongArgumentCount {
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("unexpected trailing input")]
    TrailingInput,
    #[error("the function must depend on `x`")]
    AxisVariableMissing,
    #[error("expression is nested too deeply")]
    NestingTooDeep,
}

/// A parse failure and the part of the input responsible for it
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte range of the offending text in the input
    pub span: Range<usize>,
    /// The offending text itself
    pub snippet: String,
}

impl ParseError {
    pub(crate) fn new(kind: ParseErrorKind, source: &str, span: Range<usize>) -> Self {
        let snippet = source.get(span.clone()).unwrap_or_default().to_string();
        Self {
            kind,
            span,
            snippet,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.snippet.is_empty() {
            write!(f, "{} at position {}", self.kind, self.span.start)
        } else {
            write!(
                f,
                "{} at position {}: `{}`",
                self.kind, self.span.start, self.snippet
            )
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse a function of `x` into an [`Expression`].
///
/// Rejects input that does not mention the axis variable.
pub fn parse(source: &str) -> Result<Expression, ParseError> {
    if source.trim().is_empty() {
        return Err(ParseError::new(
            ParseErrorKind::Empty,
            source,
            0..source.len(),
        ));
    }

    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        parameters: Vec::new(),
        uses_axis: false,
        depth: 0,
    };

    let root = parser.expression()?;
    let next = parser.peek();
    match next.kind {
        TokenKind::Eof => {}
        TokenKind::RParen => {
            return Err(parser.error(ParseErrorKind::UnbalancedParenthesis, next.span.clone()))
        }
        _ => {
            let span = next.span.start..source.len();
            return Err(parser.error(ParseErrorKind::TrailingInput, span));
        }
    }

    if !parser.uses_axis {
        return Err(parser.error(ParseErrorKind::AxisVariableMissing, 0..source.len()));
    }

    Ok(Expression::new(source, root, parser.parameters))
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    parameters: Vec<String>,
    uses_axis: bool,
    /// Depth of the subtree under construction
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        // tokenize always terminates the stream with Eof, and advance never moves past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn error(&self, kind: ParseErrorKind, span: Range<usize>) -> ParseError {
        ParseError::new(kind, self.source, span)
    }

    /// Go one level deeper, failing at the token that crosses [`MAX_DEPTH`]
    fn descend(&mut self, span: &Range<usize>) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep, span.clone()));
        }
        self.depth += 1;
        Ok(())
    }

    // Chains build left-leaning trees, so every link counts towards the depth
    // until the chain is finished.

    fn expression(&mut self) -> Result<Node, ParseError> {
        let base = self.depth;
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => {
                    self.depth = base;
                    return Ok(lhs);
                }
            };
            let token = self.advance();
            self.descend(&token.span)?;
            let rhs = self.term()?;
            lhs = Node::binary(lhs, op, rhs);
        }
    }

    fn term(&mut self) -> Result<Node, ParseError> {
        let base = self.depth;
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => {
                    self.depth = base;
                    return Ok(lhs);
                }
            };
            let token = self.advance();
            self.descend(&token.span)?;
            let rhs = self.unary()?;
            lhs = Node::binary(lhs, op, rhs);
        }
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        let negate = match self.peek().kind {
            TokenKind::Minus => true,
            TokenKind::Plus => false,
            _ => return self.power(),
        };
        let token = self.advance();
        self.descend(&token.span)?;
        let operand = self.unary()?;
        self.depth -= 1;
        Ok(if negate { Node::neg(operand) } else { operand })
    }

    fn power(&mut self) -> Result<Node, ParseError> {
        let base = self.primary()?;
        if self.peek().kind == TokenKind::Caret {
            let token = self.advance();
            self.descend(&token.span)?;
            let exponent = self.unary()?;
            self.depth -= 1;
            return Ok(Node::binary(base, BinaryOp::Pow, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(value) => Ok(Node::Number(value)),
            TokenKind::Ident(name) => {
                if self.peek().kind == TokenKind::LParen {
                    self.call(name, token.span)
                } else {
                    self.identifier(name, token.span)
                }
            }
            TokenKind::LParen => {
                self.descend(&token.span)?;
                let inner = self.expression()?;
                self.expect_closing(&token.span)?;
                self.depth -= 1;
                Ok(inner)
            }
            TokenKind::RParen => Err(self.error(ParseErrorKind::UnbalancedParenthesis, token.span)),
            TokenKind::Eof => Err(self.error(ParseErrorKind::UnexpectedEnd, token.span)),
            _ => Err(self.error(ParseErrorKind::UnexpectedToken, token.span)),
        }
    }

    /// Consume the `)` matching the `(` at `open`, returning its span
    fn expect_closing(&mut self, open: &Range<usize>) -> Result<Range<usize>, ParseError> {
        let token = self.advance();
        match token.kind {
            TokenKind::RParen => Ok(token.span),
            TokenKind::Eof => Err(self.error(ParseErrorKind::UnbalancedParenthesis, open.clone())),
            _ => Err(self.error(ParseErrorKind::UnexpectedToken, token.span)),
        }
    }

    fn call(&mut self, name: String, name_span: Range<usize>) -> Result<Node, ParseError> {
        let builtin = Builtin::from_name(&name)
            .ok_or_else(|| self.error(ParseErrorKind::UnknownFunction(name.clone()), name_span.clone()))?;

        let open = self.advance().span;
        self.descend(&open)?;
        let mut args = Vec::new();
        if self.peek().kind != TokenKind::RParen {
            loop {
                args.push(self.expression()?);
                if self.peek().kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        let close = self.expect_closing(&open)?;
        self.depth -= 1;

        if let Some(expected) = builtin.arity() {
            if args.len() != expected {
                return Err(self.error(
                    ParseErrorKind::WrongArgumentCount {
                        name,
                        expected,
                        found: args.len(),
                    },
                    name_span.start..close.end,
                ));
            }
        }

        Ok(Node::Call(builtin, args))
    }

    fn identifier(&mut self, name: String, span: Range<usize>) -> Result<Node, ParseError> {
        if name == AXIS_VARIABLE {
            self.uses_axis = true;
            return Ok(Node::Axis);
        }
        if let Some(constant) = Constant::from_name(&name) {
            return Ok(Node::Constant(constant));
        }
        if Builtin::from_name(&name).is_some() {
            return Err(self.error(ParseErrorKind::MissingArguments(name), span));
        }
        if !self.parameters.contains(&name) {
            self.parameters.push(name.clone());
        }
        Ok(Node::Parameter(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(source: &str) -> ParseError {
        parse(source).unwrap_err()
    }

    #[test]
    fn test_precedence() {
        let expr = parse("1 + 2*x^2").unwrap();
        assert_eq!(
            *expr.root(),
            Node::binary(
                Node::Number(1.0),
                BinaryOp::Add,
                Node::binary(
                    Node::Number(2.0),
                    BinaryOp::Mul,
                    Node::binary(Node::Axis, BinaryOp::Pow, Node::Number(2.0)),
                ),
            )
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse("x^2^3").unwrap();
        assert_eq!(
            *expr.root(),
            Node::binary(
                Node::Axis,
                BinaryOp::Pow,
                Node::binary(Node::Number(2.0), BinaryOp::Pow, Node::Number(3.0)),
            )
        );
    }

    #[test]
    fn test_negation_binds_looser_than_power() {
        let expr = parse("-x^2").unwrap();
        assert_eq!(
            *expr.root(),
            Node::neg(Node::binary(Node::Axis, BinaryOp::Pow, Node::Number(2.0)))
        );
    }

    #[test]
    fn test_negative_exponent() {
        let expr = parse("x^-1").unwrap();
        assert_eq!(
            *expr.root(),
            Node::binary(Node::Axis, BinaryOp::Pow, Node::neg(Node::Number(1.0)))
        );
    }

    #[test]
    fn test_constants_are_not_parameters() {
        let expr = parse("pi*x + E").unwrap();
        assert!(expr.parameters().is_empty());
    }

    #[test]
    fn test_zero_is_variadic() {
        assert!(parse("zero(x)").is_ok());
        assert!(parse("zeros(x, a, b)").is_ok());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_err("   ").kind, ParseErrorKind::Empty);
    }

    #[test]
    fn test_missing_axis_variable() {
        let err = parse_err("a*sin(k) + c");
        assert_eq!(err.kind, ParseErrorKind::AxisVariableMissing);
        assert_eq!(err.snippet, "a*sin(k) + c");

        assert_eq!(parse_err("2 + 3").kind, ParseErrorKind::AxisVariableMissing);
    }

    #[test]
    fn test_unknown_function() {
        let err = parse_err("2*gamma(x)");
        assert_eq!(err.kind, ParseErrorKind::UnknownFunction("gamma".to_string()));
        assert_eq!(err.span, 2..7);
        assert_eq!(err.snippet, "gamma");
    }

    #[test]
    fn test_wrong_argument_count() {
        let err = parse_err("sin(x, 2)");
        assert_eq!(
            err.kind,
            ParseErrorKind::WrongArgumentCount {
                name: "sin".to_string(),
                expected: 1,
                found: 2,
            }
        );
        assert_eq!(err.snippet, "sin(x, 2)");
    }

    #[test]
    fn test_unclosed_parenthesis() {
        let err = parse_err("sin(x");
        assert_eq!(err.kind, ParseErrorKind::UnbalancedParenthesis);
        assert_eq!(err.snippet, "(");

        let err = parse_err("(x + 1");
        assert_eq!(err.kind, ParseErrorKind::UnbalancedParenthesis);
        assert_eq!(err.span, 0..1);
    }

    #[test]
    fn test_stray_closing_parenthesis() {
        let err = parse_err("x + 1)");
        assert_eq!(err.kind, ParseErrorKind::UnbalancedParenthesis);
        assert_eq!(err.snippet, ")");
    }

    #[test]
    fn test_trailing_input() {
        let err = parse_err("2x");
        assert_eq!(err.kind, ParseErrorKind::TrailingInput);
        assert_eq!(err.snippet, "x");
    }

    #[test]
    fn test_dangling_operator() {
        let err = parse_err("x +");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert_eq!(err.span, 3..3);
    }

    #[test]
    fn test_unexpected_token() {
        let err = parse_err("x * / 2");
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.snippet, "/");
    }

    #[test]
    fn test_bare_builtin_name() {
        let err = parse_err("sin + x");
        assert_eq!(err.kind, ParseErrorKind::MissingArguments("sin".to_string()));
    }

    #[test]
    fn test_error_display_names_offending_text() {
        let err = parse_err("x $ 1");
        assert_eq!(err.to_string(), "unexpected character at position 2: `$`");

        let err = parse_err("x +");
        assert_eq!(err.to_string(), "unexpected end of input at position 3");
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let deep = format!("{}x{}", "(".repeat(20_000), ")".repeat(20_000));
        let err = parse_err(&deep);
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep);
        assert_eq!(err.span, MAX_DEPTH..MAX_DEPTH + 1);
        assert_eq!(err.snippet, "(");

        let at_limit = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse(&at_limit).is_ok());
    }

    #[test]
    fn test_deep_signs_calls_and_powers_are_rejected() {
        let signs = format!("{}x", "-".repeat(20_000));
        assert_eq!(parse_err(&signs).kind, ParseErrorKind::NestingTooDeep);

        let calls = format!("{}x{}", "sin(".repeat(5_000), ")".repeat(5_000));
        assert_eq!(parse_err(&calls).kind, ParseErrorKind::NestingTooDeep);

        let powers = format!("x{}", "^2".repeat(5_000));
        assert_eq!(parse_err(&powers).kind, ParseErrorKind::NestingTooDeep);
    }

    #[test]
    fn test_long_chains_are_bounded() {
        let sum = format!("x{}", " + x".repeat(100));
        assert!(parse(&sum).is_ok());

        let huge = format!("x{}", "*x".repeat(50_000));
        assert_eq!(parse_err(&huge).kind, ParseErrorKind::NestingTooDeep);
    }

    #[test]
    fn test_presets_parse() {
        for preset in crate::presets::BUILTIN_PRESETS {
            assert!(parse(preset.expression).is_ok(), "{}", preset.name);
        }
    }
}
