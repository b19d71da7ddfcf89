//! Top-level items: globals and functions.

use plc_ir::ast::{Expr, ExprKind, Function, Global};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `global ::= (list | mutable | immutable) ';'`
    pub(crate) fn parse_global(&mut self) -> Result<Global, ParseError> {
        let global = if self.eat("LIST") {
            self.parse_list()?
        } else if self.eat("VAR") {
            self.parse_mutable()?
        } else {
            self.expect("VAL")?;
            self.parse_immutable()?
        };
        self.expect(";")?;
        Ok(global)
    }

    /// `'LIST' identifier ':' identifier '=' '[' expression (',' expression)* ']'`
    fn parse_list(&mut self) -> Result<Global, ParseError> {
        let name = self.expect_identifier()?;
        self.expect(":")?;
        let type_name = self.expect_identifier()?;
        self.expect("=")?;
        self.expect("[")?;
        let mut elements = vec![self.parse_expression()?];
        while self.eat(",") {
            elements.push(self.parse_expression()?);
        }
        self.expect("]")?;

        Ok(Global {
            name,
            type_name: Some(type_name),
            mutable: true,
            value: Some(Expr::new(ExprKind::List(elements))),
            variable: None,
        })
    }

    /// `'VAR' identifier (':' identifier)? ('=' expression)?`
    fn parse_mutable(&mut self) -> Result<Global, ParseError> {
        let name = self.expect_identifier()?;
        let type_name = self.parse_type_annotation()?;
        let value = if self.eat("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        Ok(Global {
            name,
            type_name,
            mutable: true,
            value,
            variable: None,
        })
    }

    /// `'VAL' identifier (':' identifier)? '=' expression`
    fn parse_immutable(&mut self) -> Result<Global, ParseError> {
        let name = self.expect_identifier()?;
        let type_name = self.parse_type_annotation()?;
        self.expect("=")?;
        let value = self.parse_expression()?;
        Ok(Global {
            name,
            type_name,
            mutable: false,
            value: Some(value),
            variable: None,
        })
    }

    /// `'FUN' identifier '(' (param (',' param)*)? ')' (':' identifier)? 'DO' block 'END'`
    pub(crate) fn parse_function(&mut self) -> Result<Function, ParseError> {
        self.expect("FUN")?;
        let name = self.expect_identifier()?;
        self.expect("(")?;

        let mut parameters = Vec::new();
        let mut parameter_type_names = Vec::new();
        if !self.check(")") {
            loop {
                parameters.push(self.expect_identifier()?);
                self.expect(":")?;
                parameter_type_names.push(self.expect_identifier()?);
                if !self.eat(",") {
                    break;
                }
            }
        }
        self.expect(")")?;

        let return_type_name = self.parse_type_annotation()?;
        self.expect("DO")?;
        let statements = self.parse_block()?;
        self.expect("END")?;

        Ok(Function {
            name,
            parameters,
            parameter_type_names,
            return_type_name,
            statements,
            function: None,
        })
    }

    /// `(':' identifier)?`
    pub(crate) fn parse_type_annotation(&mut self) -> Result<Option<String>, ParseError> {
        if self.eat(":") {
            self.expect_identifier().map(Some)
        } else {
            Ok(None)
        }
    }
}
