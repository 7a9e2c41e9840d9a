use crate::expression::compileerror::CompileError;
use crate::expression::expressiontree::{
    BinaryOperator,
    Constant,
    ExpressionTree,
    Function
};
use crate::expression::token::{
    Token,
    TokenKind
};

// ─────────────────────────────────────────────────────────────────────────────
// Recursive-descent parser
// ─────────────────────────────────────────────────────────────────────────────
//
//   expression := term (('+' | '-') term)*
//   term       := unary (('*' | '/') unary | power)*      後者為隱式乘法
//   unary      := ('-' | '+') unary | power
//   power      := primary ('^' unary)?                    右結合
//   primary    := number | 'x' | 'e' | 'pi'
//               | function '(' expression ')'
//               | '(' expression ')'
//
// `e^y` 直接解析為 exp(y)。

pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    end_position: usize
}

enum Identifier {
    Variable,
    Constant(Constant),
    Function(Function),
    Reciprocal(Function)
}

fn resolve_identifier(name: &str) -> Option<Identifier> {
    let identifier = match name {
        "x" => Identifier::Variable,
        "e" => Identifier::Constant(Constant::E),
        "pi" => Identifier::Constant(Constant::Pi),
        "sin" => Identifier::Function(Function::Sin),
        "cos" => Identifier::Function(Function::Cos),
        "tan" => Identifier::Function(Function::Tan),
        "csc" => Identifier::Reciprocal(Function::Sin),
        "sec" => Identifier::Reciprocal(Function::Cos),
        "cot" => Identifier::Reciprocal(Function::Tan),
        "asin" | "arcsin" => Identifier::Function(Function::Asin),
        "acos" | "arccos" => Identifier::Function(Function::Acos),
        "atan" | "arctan" => Identifier::Function(Function::Atan),
        "sinh" => Identifier::Function(Function::Sinh),
        "cosh" => Identifier::Function(Function::Cosh),
        "tanh" => Identifier::Function(Function::Tanh),
        "sqrt" => Identifier::Function(Function::Sqrt),
        "abs" => Identifier::Function(Function::Abs),
        "exp" => Identifier::Function(Function::Exp),
        "ln" => Identifier::Function(Function::Ln),
        "log" | "log10" => Identifier::Function(Function::Log10),
        _ => return None
    };
    Some(identifier)
}

impl Parser {
    pub fn new(tokens: Vec<Token>, end_position: usize) -> Parser {
        Parser { tokens, cursor: 0, end_position }
    }

    pub fn parse(mut self) -> Result<ExpressionTree, CompileError> {
        if self.tokens.is_empty() {
            return Err(CompileError::syntax("empty expression", 0));
        }
        let tree = self.expression()?;
        match self.peek() {
            None => Ok(tree),
            Some(token) => Err(CompileError::syntax(
                format!("unexpected {}", describe(token.kind())),
                token.position()
            ))
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn position(&self) -> usize {
        self.peek().map_or(self.end_position, |token| token.position())
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().map(|token| token.kind()) == Some(kind) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), CompileError> {
        if self.eat(&kind) {
            Ok(())
        } else {
            let found = self.peek().map_or("end of input".to_owned(), |token| describe(token.kind()));
            Err(CompileError::syntax(
                format!("expected {} but found {}", describe(&kind), found),
                self.position()
            ))
        }
    }

    fn expression(&mut self) -> Result<ExpressionTree, CompileError> {
        let mut lhs = self.term()?;
        loop {
            let operator = if self.eat(&TokenKind::Plus) {
                BinaryOperator::Add
            } else if self.eat(&TokenKind::Minus) {
                BinaryOperator::Sub
            } else {
                return Ok(lhs);
            };
            let rhs = self.term()?;
            lhs = ExpressionTree::binary(operator, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<ExpressionTree, CompileError> {
        let mut lhs = self.unary()?;
        loop {
            let (operator, rhs) = if self.eat(&TokenKind::Star) {
                (BinaryOperator::Mul, self.unary()?)
            } else if self.eat(&TokenKind::Slash) {
                (BinaryOperator::Div, self.unary()?)
            } else if self.peek().is_some_and(|token| token.starts_operand()) {
                (BinaryOperator::Mul, self.power()?)
            } else {
                return Ok(lhs);
            };
            lhs = ExpressionTree::binary(operator, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<ExpressionTree, CompileError> {
        if self.eat(&TokenKind::Minus) {
            Ok(ExpressionTree::Negate(Box::new(self.unary()?)))
        } else if self.eat(&TokenKind::Plus) {
            self.unary()
        } else {
            self.power()
        }
    }

    fn power(&mut self) -> Result<ExpressionTree, CompileError> {
        let base = self.primary()?;
        if !self.eat(&TokenKind::Caret) {
            return Ok(base);
        }
        let exponent = self.unary()?;
        if base == ExpressionTree::Constant(Constant::E) {
            Ok(ExpressionTree::call(Function::Exp, exponent))
        } else {
            Ok(ExpressionTree::binary(BinaryOperator::Pow, base, exponent))
        }
    }

    fn primary(&mut self) -> Result<ExpressionTree, CompileError> {
        let position = self.position();
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => return Err(CompileError::syntax("unexpected end of input", position))
        };
        self.cursor += 1;

        match token.kind() {
            TokenKind::Number(value) => Ok(ExpressionTree::Number(*value)),
            TokenKind::LeftParen => {
                let inner = self.expression()?;
                self.expect(TokenKind::RightParen)?;
                Ok(inner)
            },
            TokenKind::Identifier(name) => match resolve_identifier(name) {
                Some(Identifier::Variable) => Ok(ExpressionTree::Variable),
                Some(Identifier::Constant(constant)) => Ok(ExpressionTree::Constant(constant)),
                Some(Identifier::Function(function)) => {
                    let argument = self.call_argument(name)?;
                    Ok(ExpressionTree::call(function, argument))
                },
                Some(Identifier::Reciprocal(function)) => {
                    let argument = self.call_argument(name)?;
                    Ok(ExpressionTree::binary(
                        BinaryOperator::Div,
                        ExpressionTree::Number(1.0),
                        ExpressionTree::call(function, argument)
                    ))
                },
                None => Err(CompileError::syntax(format!("unknown identifier '{}'", name), position))
            },
            other => Err(CompileError::syntax(format!("unexpected {}", describe(other)), position))
        }
    }

    fn call_argument(&mut self, name: &str) -> Result<ExpressionTree, CompileError> {
        if !self.eat(&TokenKind::LeftParen) {
            return Err(CompileError::syntax(
                format!("function '{}' must be followed by '('", name),
                self.position()
            ));
        }
        let argument = self.expression()?;
        self.expect(TokenKind::RightParen)?;
        Ok(argument)
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(value) => format!("number {}", value),
        TokenKind::Identifier(name) => format!("identifier '{}'", name),
        TokenKind::Plus => "'+'".to_owned(),
        TokenKind::Minus => "'-'".to_owned(),
        TokenKind::Star => "'*'".to_owned(),
        TokenKind::Slash => "'/'".to_owned(),
        TokenKind::Caret => "'^'".to_owned(),
        TokenKind::LeftParen => "'('".to_owned(),
        TokenKind::RightParen => "')'".to_owned()
    }
}
