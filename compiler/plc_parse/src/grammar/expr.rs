//! Expressions.
//!
//! Four left-associative binary levels, loosest first:
//! logical (`&& ||`), comparison (`< > == !=`), additive (`+ -`),
//! multiplicative (`* / ^`). `^` binds like `*` and associates left.

use plc_ir::ast::{Expr, ExprKind, Literal};
use plc_ir::{BinaryOp, TokenKind};
use plc_stack::ensure_sufficient_stack;

use crate::{literal, ParseError, Parser};

const LOGICAL: &[BinaryOp] = &[BinaryOp::And, BinaryOp::Or];
const COMPARISON: &[BinaryOp] = &[BinaryOp::Lt, BinaryOp::Gt, BinaryOp::Eq, BinaryOp::NotEq];
const ADDITIVE: &[BinaryOp] = &[BinaryOp::Add, BinaryOp::Sub];
const MULTIPLICATIVE: &[BinaryOp] = &[BinaryOp::Mul, BinaryOp::Div, BinaryOp::Pow];

type Production<'a> = fn(&mut Parser<'a>) -> Result<Expr, ParseError>;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_logical())
    }

    fn parse_logical(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(LOGICAL, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(COMPARISON, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(ADDITIVE, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(MULTIPLICATIVE, Self::parse_primary)
    }

    /// `operand (op operand)*`, folded to the left.
    fn parse_binary_level(
        &mut self,
        ops: &[BinaryOp],
        operand: Production<'a>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;
        while let Some(op) = self.match_binary_op(ops) {
            let right = operand(self)?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    /// Consume the current token if it is one of `ops`.
    fn match_binary_op(&mut self, ops: &[BinaryOp]) -> Option<BinaryOp> {
        let token = self.cursor.current()?;
        if token.kind != TokenKind::Operator {
            return None;
        }
        let op = BinaryOp::from_symbol(&token.literal).filter(|op| ops.contains(op))?;
        self.cursor.advance();
        Some(op)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        if self.eat("NIL") {
            return Ok(Expr::literal(Literal::Nil));
        }
        if self.eat("TRUE") {
            return Ok(Expr::literal(Literal::Boolean(true)));
        }
        if self.eat("FALSE") {
            return Ok(Expr::literal(Literal::Boolean(false)));
        }
        if let Some(token) = self.cursor.eat(TokenKind::Integer) {
            return Ok(Expr::literal(Literal::Integer(literal::integer(token)?)));
        }
        if let Some(token) = self.cursor.eat(TokenKind::Decimal) {
            return Ok(Expr::literal(Literal::Decimal(literal::decimal(token)?)));
        }
        if let Some(token) = self.cursor.eat(TokenKind::Character) {
            return Ok(Expr::literal(Literal::Character(literal::character(token)?)));
        }
        if let Some(token) = self.cursor.eat(TokenKind::String) {
            return Ok(Expr::literal(Literal::String(literal::string(token)?)));
        }
        if self.eat("(") {
            let inner = self.parse_expression()?;
            self.expect(")")?;
            return Ok(Expr::new(ExprKind::Group(Box::new(inner))));
        }
        if let Some(token) = self.cursor.eat(TokenKind::Identifier) {
            let name = token.literal.clone();
            if self.eat("(") {
                let arguments = self.parse_arguments()?;
                return Ok(Expr::call(name, arguments));
            }
            if self.eat("[") {
                let offset = self.parse_expression()?;
                self.expect("]")?;
                return Ok(Expr::access(name, Some(offset)));
            }
            return Ok(Expr::access(name, None));
        }
        Err(self.cursor.error(match self.cursor.current() {
            Some(token) => format!("expected expression, found '{}'", token.literal),
            None => "expected expression, found end of input".to_string(),
        }))
    }

    /// Arguments after the opening `(`, through the closing `)`.
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut arguments = Vec::new();
        if !self.check(")") {
            loop {
                arguments.push(self.parse_expression()?);
                if !self.eat(",") {
                    break;
                }
            }
        }
        self.expect(")")?;
        Ok(arguments)
    }
}
