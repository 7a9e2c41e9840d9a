#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LeftParen,
    RightParen
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    kind: TokenKind,
    position: usize
}

impl Token {
    pub fn new(kind: TokenKind, position: usize) -> Token {
        Token { kind, position }
    }

    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// 可作為隱式乘法右運算元開頭的 token
    pub fn starts_operand(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Number(_) | TokenKind::Identifier(_) | TokenKind::LeftParen
        )
    }
}
