use num_complex::Complex64;

use crate::error::FractalError;
use crate::expr::ast::{BinaryOp, Expr, Func};
use crate::expr::token::{Token, TokenKind};

/// Analyseur par descente récursive de la grammaire d'expression.
///
/// Précédences, de la plus lâche à la plus serrée, calquées sur les
/// expressions de style numpy de la galerie d'exemples :
///
/// ```text
/// expression := terme (('+'|'-') terme)*
/// terme      := unaire (('*'|'/') unaire)*
/// unaire     := '-' unaire | puissance
/// puissance  := atome ('**' unaire)?          // associatif à droite
/// atome      := nombre | imaginaire | 'z' | fonction '(' expression ')'
///             | '(' expression ')'
/// ```
///
/// `-z**2` se lit donc `-(z**2)` et `z**-1` est accepté, comme en Python.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    pub fn parse(mut self) -> Result<Expr, FractalError> {
        let expr = self.parse_expression()?;
        match self.peek().kind {
            TokenKind::Eof => Ok(expr),
            _ => Err(self.error_here("jeton inattendu après la fin de l'expression")),
        }
    }

    fn parse_expression(&mut self) -> Result<Expr, FractalError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, FractalError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, FractalError> {
        if matches!(self.peek().kind, TokenKind::Minus) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        if matches!(self.peek().kind, TokenKind::Plus) {
            // `+z` est accepté et sans effet
            self.advance();
            return self.parse_unary();
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Expr, FractalError> {
        let base = self.parse_atom()?;
        if matches!(self.peek().kind, TokenKind::DoubleStar) {
            self.advance();
            // Exposant en `unaire` : associativité à droite et signe permis.
            let exponent = self.parse_unary()?;
            return Ok(Expr::Binary {
                op: BinaryOp::Pow,
                lhs: Box::new(base),
                rhs: Box::new(exponent),
            });
        }
        Ok(base)
    }

    fn parse_atom(&mut self) -> Result<Expr, FractalError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number(v) => {
                self.advance();
                Ok(Expr::Constant(Complex64::new(v, 0.0)))
            }
            TokenKind::Imaginary(v) => {
                self.advance();
                Ok(Expr::Constant(Complex64::new(0.0, v)))
            }
            TokenKind::Ident(ref name) if name == "z" => {
                self.advance();
                Ok(Expr::Z)
            }
            TokenKind::Ident(ref name) => match Func::from_name(name) {
                Some(func) => {
                    self.advance();
                    self.expect(
                        |k| matches!(k, TokenKind::OpenParen),
                        &format!("'(' attendu après la fonction '{name}'"),
                    )?;
                    let arg = self.parse_expression()?;
                    self.expect(
                        |k| matches!(k, TokenKind::CloseParen),
                        &format!("')' attendu pour fermer l'appel à '{name}'"),
                    )?;
                    Ok(Expr::Call {
                        func,
                        arg: Box::new(arg),
                    })
                }
                None => Err(FractalError::InvalidExpression {
                    message: format!(
                        "identifiant inconnu '{name}' (variable 'z' ou fonction autorisée attendue)"
                    ),
                    position: token.pos,
                }),
            },
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(
                    |k| matches!(k, TokenKind::CloseParen),
                    "')' attendu pour fermer la parenthèse",
                )?;
                Ok(inner)
            }
            TokenKind::Eof => Err(self.error_here("fin d'expression inattendue")),
            _ => Err(self.error_here("début d'expression invalide")),
        }
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn advance(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect(
        &mut self,
        pred: impl Fn(&TokenKind) -> bool,
        message: &str,
    ) -> Result<(), FractalError> {
        if pred(&self.peek().kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    fn error_here(&self, message: &str) -> FractalError {
        FractalError::InvalidExpression {
            message: message.to_string(),
            position: self.peek().pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::Lexer;

    fn parse(src: &str) -> Result<Expr, FractalError> {
        Parser::new(Lexer::new(src).tokenize()?).parse()
    }

    #[test]
    fn test_parse_default_expression() {
        let expr = parse("sin(z**4 + 1.41)").unwrap();
        match expr {
            Expr::Call { func, .. } => assert_eq!(func, Func::Sin),
            other => panic!("attendu un appel sin, reçu {other:?}"),
        }
    }

    #[test]
    fn test_power_binds_tighter_than_unary_minus() {
        // -z**2 == -(z**2)
        let expr = parse("-z**2").unwrap();
        match expr {
            Expr::Neg(inner) => match *inner {
                Expr::Binary {
                    op: BinaryOp::Pow, ..
                } => {}
                other => panic!("attendu une puissance sous la négation, reçu {other:?}"),
            },
            other => panic!("attendu une négation, reçu {other:?}"),
        }
    }

    #[test]
    fn test_power_is_right_associative() {
        // 2**3**2 == 2**(3**2) == 512
        let expr = parse("2**3**2").unwrap();
        let v = expr.eval(Complex64::new(0.0, 0.0));
        assert!((v.re - 512.0).abs() < 1e-9);
        assert!(v.im.abs() < 1e-9);
    }

    #[test]
    fn test_negative_exponent_is_allowed() {
        let expr = parse("z**-1").unwrap();
        let v = expr.eval(Complex64::new(2.0, 0.0));
        assert!((v.re - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_identifiers_are_rejected() {
        for src in [
            "import os",
            "__import__('os')",
            "open('/etc/passwd')",
            "w**2",
            "sqrt(z)",
            "lambda z",
            "eval(z)",
        ] {
            assert!(
                matches!(parse(src), Err(FractalError::InvalidExpression { .. })),
                "'{src}' aurait dû être refusé"
            );
        }
    }

    #[test]
    fn test_malformed_syntax_is_rejected() {
        for src in ["", "sin", "sin z", "(z", "z z", "z +", "* z", "sin()"] {
            assert!(
                matches!(parse(src), Err(FractalError::InvalidExpression { .. })),
                "'{src}' aurait dû être refusé"
            );
        }
    }

    #[test]
    fn test_error_position_points_at_offender() {
        match parse("z + q") {
            Err(FractalError::InvalidExpression { position, .. }) => {
                assert_eq!(position, 4)
            }
            other => panic!("attendu InvalidExpression, reçu {other:?}"),
        }
    }
}
