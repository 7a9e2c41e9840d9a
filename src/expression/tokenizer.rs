use crate::expression::compileerror::CompileError;
use crate::expression::token::{
    Token,
    TokenKind
};

/// 大小寫正規化並移除所有空白。
///
/// 之後的 tokenizer 與錯誤位置皆以此字串為準。
pub fn fold_text(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

pub struct Tokenizer {
    chars: Vec<char>,
    cursor: usize
}

impl Tokenizer {
    pub fn new(folded: &str) -> Tokenizer {
        Tokenizer { chars: folded.chars().collect(), cursor: 0 }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, CompileError> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek(0) {
            let start = self.cursor;
            let kind = match c {
                '0'..='9' | '.' => self.number()?,
                'a'..='z' => self.identifier(),
                '+' => self.single(TokenKind::Plus),
                '-' => self.single(TokenKind::Minus),
                '/' => self.single(TokenKind::Slash),
                '^' => self.single(TokenKind::Caret),
                '(' => self.single(TokenKind::LeftParen),
                ')' => self.single(TokenKind::RightParen),
                '*' => {
                    // `**` 與 `^` 同義
                    if self.peek(1) == Some('*') {
                        self.cursor += 2;
                        TokenKind::Caret
                    } else {
                        self.single(TokenKind::Star)
                    }
                },
                other => {
                    return Err(CompileError::syntax(format!("unexpected character '{}'", other), start));
                }
            };
            tokens.push(Token::new(kind, start));
        }
        Ok(tokens)
    }

    fn peek(&self, offset: usize) -> Option<char> {
        self.chars.get(self.cursor + offset).copied()
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor += 1;
        kind
    }

    fn take_digits(&mut self) -> usize {
        let mut count = 0;
        while let Some('0'..='9') = self.peek(0) {
            self.cursor += 1;
            count += 1;
        }
        count
    }

    /// 十進位數字，可帶小數與指數：`12`、`1.5`、`.5`、`2e-3`。
    /// `e` 後面不是數字時不視為指數，例如 `2e` 是 2·e。
    fn number(&mut self) -> Result<TokenKind, CompileError> {
        let start = self.cursor;
        let mut digits = self.take_digits();
        if self.peek(0) == Some('.') {
            self.cursor += 1;
            digits += self.take_digits();
        }
        if digits == 0 {
            return Err(CompileError::syntax("malformed number", start));
        }

        if self.peek(0) == Some('e') {
            let exponent_digits_at = match self.peek(1) {
                Some('+') | Some('-') => 2,
                _ => 1
            };
            if let Some('0'..='9') = self.peek(exponent_digits_at) {
                self.cursor += exponent_digits_at;
                self.take_digits();
            }
        }

        let literal: String = self.chars[start..self.cursor].iter().collect();
        let value = literal
            .parse::<f64>()
            .map_err(|error| CompileError::syntax(format!("malformed number '{}': {}", literal, error), start))?;
        if !value.is_finite() {
            return Err(CompileError::syntax(format!("number '{}' is out of range", literal), start));
        }
        Ok(TokenKind::Number(value))
    }

    fn identifier(&mut self) -> TokenKind {
        let start = self.cursor;
        while let Some('a'..='z') = self.peek(0) {
            self.cursor += 1;
        }
        let mut name: String = self.chars[start..self.cursor].iter().collect();

        // log10(…) 是 log(…) 的正規化寫法，需能重新編譯
        if name == "log" && self.peek(0) == Some('1') && self.peek(1) == Some('0') && self.peek(2) == Some('(') {
            self.cursor += 2;
            name.push_str("10");
        }
        TokenKind::Identifier(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        Tokenizer::new(&fold_text(text))
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|token| token.kind().clone())
            .collect()
    }

    #[test]
    fn folds_case_and_whitespace() {
        assert_eq!(fold_text(" Sin( X ) "), "sin(x)");
        assert_eq!(fold_text("2 3"), "23");
    }

    #[test]
    fn numbers_and_identifiers() {
        assert_eq!(
            kinds("2x"),
            vec![TokenKind::Number(2.0), TokenKind::Identifier("x".to_owned())]
        );
        assert_eq!(kinds("2e-3"), vec![TokenKind::Number(0.002)]);
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number(2.0), TokenKind::Identifier("e".to_owned())]
        );
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
    }

    #[test]
    fn overflowing_literal_is_rejected() {
        let error = Tokenizer::new("2+1e999").tokenize().unwrap_err();
        assert_eq!(error, CompileError::syntax("number '1e999' is out of range", 2));
        assert_eq!(kinds("1e308"), vec![TokenKind::Number(1e308)]);
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(
            kinds("x**2"),
            vec![TokenKind::Identifier("x".to_owned()), TokenKind::Caret, TokenKind::Number(2.0)]
        );
    }

    #[test]
    fn log10_is_one_identifier() {
        assert_eq!(
            kinds("log10(x)")[0],
            TokenKind::Identifier("log10".to_owned())
        );
        // 不接括號時 10 仍是隱式乘法的數字
        assert_eq!(
            kinds("log10"),
            vec![TokenKind::Identifier("log".to_owned()), TokenKind::Number(10.0)]
        );
    }

    #[test]
    fn rejects_unknown_characters() {
        let error = Tokenizer::new("x$2").tokenize().unwrap_err();
        assert_eq!(error, CompileError::syntax("unexpected character '$'", 1));
        assert!(Tokenizer::new(".").tokenize().is_err());
    }
}
