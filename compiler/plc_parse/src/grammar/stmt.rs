//! Statements and blocks.

use plc_ir::ast::{Case, Declaration, Stmt};

use crate::{ParseError, Parser};

/// Keywords that close a block.
const BLOCK_TERMINATORS: &[&str] = &["END", "ELSE", "CASE", "DEFAULT"];

impl Parser<'_> {
    /// `block ::= statement*`, stopping before a terminator keyword or at
    /// end of input. The enclosing construct checks for its closer.
    pub(crate) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();
        while !self.cursor.is_at_end() && !self.cursor.check_any(BLOCK_TERMINATORS) {
            statements.push(self.parse_statement()?);
        }
        Ok(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        if self.eat("LET") {
            self.parse_declaration()
        } else if self.eat("SWITCH") {
            self.parse_switch()
        } else if self.eat("IF") {
            self.parse_if()
        } else if self.eat("WHILE") {
            self.parse_while()
        } else if self.eat("RETURN") {
            let value = self.parse_expression()?;
            self.expect(";")?;
            Ok(Stmt::Return { value })
        } else {
            self.parse_expression_statement()
        }
    }

    /// `'LET' identifier (':' identifier)? ('=' expression)? ';'`
    fn parse_declaration(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect_identifier()?;
        let type_name = self.parse_type_annotation()?;
        let value = if self.eat("=") {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.expect(";")?;
        Ok(Stmt::Declaration(Declaration {
            name,
            type_name,
            value,
            variable: None,
        }))
    }

    /// `'SWITCH' expression ('CASE' expression ':' block)* 'DEFAULT' block 'END'`
    fn parse_switch(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.parse_expression()?;

        let mut cases = Vec::new();
        while self.eat("CASE") {
            let value = self.parse_expression()?;
            self.expect(":")?;
            let statements = self.parse_block()?;
            cases.push(Case {
                value: Some(value),
                statements,
            });
        }

        self.expect("DEFAULT")?;
        let statements = self.parse_block()?;
        cases.push(Case {
            value: None,
            statements,
        });
        self.expect("END")?;

        Ok(Stmt::Switch { condition, cases })
    }

    /// `'IF' expression 'DO' block ('ELSE' block)? 'END'`
    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.parse_expression()?;
        self.expect("DO")?;
        let then_statements = self.parse_block()?;
        let else_statements = if self.eat("ELSE") {
            self.parse_block()?
        } else {
            Vec::new()
        };
        self.expect("END")?;
        Ok(Stmt::If {
            condition,
            then_statements,
            else_statements,
        })
    }

    /// `'WHILE' expression 'DO' block 'END'`
    fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let condition = self.parse_expression()?;
        self.expect("DO")?;
        let statements = self.parse_block()?;
        self.expect("END")?;
        Ok(Stmt::While {
            condition,
            statements,
        })
    }

    /// `expression ('=' expression)? ';'`
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let expr = self.parse_expression()?;
        let stmt = if self.eat("=") {
            Stmt::Assignment {
                receiver: expr,
                value: self.parse_expression()?,
            }
        } else {
            Stmt::Expression(expr)
        };
        self.expect(";")?;
        Ok(stmt)
    }
}
