//! Langage d'expression restreint pour les fonctions génératrices Julia.
//!
//! Le texte utilisateur n'est jamais exécuté comme du code : il est analysé
//! sous une grammaire arithmétique fermée (opérateurs `+ - * / **`,
//! littéraux réels et imaginaires `1J`, la variable `z` et une liste fixe
//! de fonctions transcendantes). Tout le reste est refusé avant la moindre
//! évaluation.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

use num_complex::Complex64;

use crate::error::FractalError;
use ast::Expr;
use lexer::Lexer;
use parser::Parser;

/// Fonction génératrice compilée depuis une expression source.
///
/// L'évaluation est une marche d'arbre pure : déterministe, sans état et
/// partageable entre threads.
#[derive(Clone, Debug)]
pub struct CompiledFunction {
    source: String,
    expr: Expr,
}

impl CompiledFunction {
    /// Expression source telle que fournie par l'utilisateur.
    #[allow(dead_code)]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Applique la fonction à une valeur d'orbite.
    pub fn eval(&self, z: Complex64) -> Complex64 {
        self.expr.eval(z)
    }

    /// Vue fermeture, pour le moteur escape-time.
    pub fn as_fn(&self) -> impl Fn(Complex64) -> Complex64 + Sync + '_ {
        move |z| self.eval(z)
    }
}

/// Compile une expression de la grammaire restreinte.
pub fn parse(source: &str) -> Result<CompiledFunction, FractalError> {
    let tokens = Lexer::new(source).tokenize()?;
    let expr = Parser::new(tokens).parse()?;
    Ok(CompiledFunction {
        source: source.to_string(),
        expr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_and_eval_default_expression() {
        let f = parse("sin(z**4 + 1.41)").unwrap();
        assert_eq!(f.source(), "sin(z**4 + 1.41)");
        let v = f.eval(Complex64::new(0.0, 0.0));
        // sin(1.41) réel pur
        assert!((v.re - 1.41_f64.sin()).abs() < 1e-12);
        assert!(v.im.abs() < 1e-12);
    }

    #[test]
    fn test_identity_expression() {
        let f = parse("z").unwrap();
        let z = Complex64::new(0.3, -1.2);
        assert_eq!(f.eval(z), z);
    }

    #[test]
    fn test_imaginary_rotation() {
        // exp(2.5*1J) est sur le cercle unité
        let f = parse("z + exp(2.5*1J)").unwrap();
        let v = f.eval(Complex64::new(0.0, 0.0));
        assert!((v.norm() - 1.0).abs() < 1e-12);
        assert!((v.re - 2.5_f64.cos()).abs() < 1e-12);
        assert!((v.im - 2.5_f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn test_eval_is_deterministic() {
        let f = parse("cos(cosh(z**3) - sinh(z**2) + tanh(z**4))**2").unwrap();
        let z = Complex64::new(0.42, 0.17);
        let a = f.eval(z);
        let b = f.eval(z);
        assert_eq!(a, b);
    }
}
