use crate::error::FractalError;
use crate::expr::token::{Token, TokenKind};

/// Lexeur de la grammaire d'expression restreinte.
///
/// Toute la surface acceptée est énumérée ici : nombres (réels ou
/// imaginaires suffixés `j`/`J`), identifiants ASCII, `+ - * / **` et les
/// parenthèses. Tout autre caractère est refusé avec sa position : la
/// première barrière contre l'injection de code par le texte utilisateur.
pub struct Lexer<'a> {
    src: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(src: &'a str) -> Self {
        Lexer {
            src,
            chars: src.char_indices().peekable(),
        }
    }

    /// Consomme toute la source et produit la liste de jetons, terminée
    /// par `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, FractalError> {
        let mut tokens = Vec::new();
        while let Some(&(pos, c)) = self.chars.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.chars.next();
                }
                '0'..='9' | '.' => tokens.push(self.lex_number(pos)?),
                'a'..='z' | 'A'..='Z' | '_' => tokens.push(self.lex_ident(pos)),
                '+' => tokens.push(self.single(TokenKind::Plus, pos)),
                '-' => tokens.push(self.single(TokenKind::Minus, pos)),
                '/' => tokens.push(self.single(TokenKind::Slash, pos)),
                '(' => tokens.push(self.single(TokenKind::OpenParen, pos)),
                ')' => tokens.push(self.single(TokenKind::CloseParen, pos)),
                '*' => {
                    self.chars.next();
                    if matches!(self.chars.peek(), Some(&(_, '*'))) {
                        self.chars.next();
                        tokens.push(Token::new(TokenKind::DoubleStar, pos));
                    } else {
                        tokens.push(Token::new(TokenKind::Star, pos));
                    }
                }
                '^' => {
                    return Err(FractalError::InvalidExpression {
                        message: "'^' n'est pas supporté, écrire '**' pour la puissance"
                            .into(),
                        position: pos,
                    });
                }
                _ => {
                    return Err(FractalError::InvalidExpression {
                        message: format!("caractère inattendu '{c}'"),
                        position: pos,
                    });
                }
            }
        }
        tokens.push(Token::new(TokenKind::Eof, self.src.len()));
        Ok(tokens)
    }

    fn single(&mut self, kind: TokenKind, pos: usize) -> Token {
        self.chars.next();
        Token::new(kind, pos)
    }

    fn lex_number(&mut self, start: usize) -> Result<Token, FractalError> {
        let mut end = start;
        let mut seen_dot = false;
        while let Some(&(pos, c)) = self.chars.peek() {
            match c {
                '0'..='9' => {
                    end = pos + c.len_utf8();
                    self.chars.next();
                }
                '.' if !seen_dot => {
                    seen_dot = true;
                    end = pos + c.len_utf8();
                    self.chars.next();
                }
                // Exposant décimal : `e`/`E`, signe optionnel, au moins un chiffre.
                'e' | 'E' => {
                    let mut lookahead = self.chars.clone();
                    lookahead.next();
                    let after_sign = match lookahead.peek() {
                        Some(&(_, '+')) | Some(&(_, '-')) => {
                            lookahead.next();
                            lookahead.peek().copied()
                        }
                        other => other.copied(),
                    };
                    match after_sign {
                        Some((_, '0'..='9')) => {
                            self.chars.next();
                            if let Some(&(p, s @ ('+' | '-'))) = self.chars.peek() {
                                end = p + s.len_utf8();
                                self.chars.next();
                            }
                            while let Some(&(p, d)) = self.chars.peek() {
                                if d.is_ascii_digit() {
                                    end = p + d.len_utf8();
                                    self.chars.next();
                                } else {
                                    break;
                                }
                            }
                            break;
                        }
                        _ => break,
                    }
                }
                _ => break,
            }
        }

        let text = &self.src[start..end];
        let value: f64 = text.parse().map_err(|_| FractalError::InvalidExpression {
            message: format!("nombre invalide '{text}'"),
            position: start,
        })?;

        // Suffixe imaginaire numpy.
        if let Some(&(_, 'j')) | Some(&(_, 'J')) = self.chars.peek() {
            self.chars.next();
            return Ok(Token::new(TokenKind::Imaginary(value), start));
        }
        Ok(Token::new(TokenKind::Number(value), start))
    }

    fn lex_ident(&mut self, start: usize) -> Token {
        let mut end = start;
        while let Some(&(pos, c)) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                end = pos + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        Token::new(TokenKind::Ident(self.src[start..end].to_string()), start)
    }
}
