/// Jetons de la grammaire d'expression restreinte.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Littéral réel (`1.41`, `0.7`, `2e-3`).
    Number(f64),
    /// Littéral imaginaire, suffixe `j`/`J` numpy (`1J`, `2.5j`).
    Imaginary(f64),
    /// Identifiant : la variable `z` ou un nom de fonction autorisé.
    Ident(String),

    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    DoubleStar, // **
    OpenParen,  // (
    CloseParen, // )

    Eof,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Position (octets) du début du jeton dans la source.
    pub pos: usize,
}

impl Token {
    pub fn new(kind: TokenKind, pos: usize) -> Self {
        Token { kind, pos }
    }
}
