use std::fmt;

use crate::math::realfunction::EvaluationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    E,
    Pi
}

impl Constant {
    pub fn value(&self) -> f64 {
        match self {
            Constant::E => std::f64::consts::E,
            Constant::Pi => std::f64::consts::PI
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Constant::E => "e",
            Constant::Pi => "pi"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow
}

impl BinaryOperator {
    fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Pow => "^"
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            BinaryOperator::Add | BinaryOperator::Sub => 1,
            BinaryOperator::Mul | BinaryOperator::Div => 2,
            BinaryOperator::Pow => 4
        }
    }
}

/// 可呼叫的數學函數。同義字（arcsin/asin…）在解析時合併，
/// 倒數三角函數（csc/sec/cot）則展開為 `1/f(x)`，不在此列。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Abs,
    Exp,
    Ln,
    Log10
}

impl Function {
    pub fn name(&self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Sqrt => "sqrt",
            Function::Abs => "abs",
            Function::Exp => "exp",
            Function::Ln => "ln",
            Function::Log10 => "log10"
        }
    }

    fn apply(&self, argument: f64) -> Result<f64, EvaluationError> {
        let name = self.name();
        let domain_error = || EvaluationError::Domain { function: name, argument };
        let value = match self {
            Function::Sin => argument.sin(),
            Function::Cos => argument.cos(),
            Function::Tan => argument.tan(),
            Function::Asin | Function::Acos if argument.abs() > 1.0 => return Err(domain_error()),
            Function::Asin => argument.asin(),
            Function::Acos => argument.acos(),
            Function::Atan => argument.atan(),
            Function::Sinh => argument.sinh(),
            Function::Cosh => argument.cosh(),
            Function::Tanh => argument.tanh(),
            Function::Sqrt if argument < 0.0 => return Err(domain_error()),
            Function::Sqrt => argument.sqrt(),
            Function::Abs => argument.abs(),
            Function::Exp => argument.exp(),
            Function::Ln | Function::Log10 if argument <= 0.0 => return Err(domain_error()),
            Function::Ln => argument.ln(),
            Function::Log10 => argument.log10()
        };
        EvaluationError::check(name, value)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ExpressionTree
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionTree {
    Number(f64),
    Variable,
    Constant(Constant),
    Negate(Box<ExpressionTree>),
    Binary {
        operator: BinaryOperator,
        lhs: Box<ExpressionTree>,
        rhs: Box<ExpressionTree>
    },
    Call {
        function: Function,
        argument: Box<ExpressionTree>
    }
}

const NEGATE_PRECEDENCE: u8 = 3;
const ATOM_PRECEDENCE: u8 = 5;

impl ExpressionTree {
    pub fn binary(operator: BinaryOperator, lhs: ExpressionTree, rhs: ExpressionTree) -> ExpressionTree {
        ExpressionTree::Binary { operator, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn call(function: Function, argument: ExpressionTree) -> ExpressionTree {
        ExpressionTree::Call { function, argument: Box::new(argument) }
    }

    pub fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        match self {
            ExpressionTree::Number(value) => Ok(*value),
            ExpressionTree::Variable => Ok(x),
            ExpressionTree::Constant(constant) => Ok(constant.value()),
            ExpressionTree::Negate(operand) => Ok(-operand.evaluate(x)?),
            ExpressionTree::Call { function, argument } => function.apply(argument.evaluate(x)?),
            ExpressionTree::Binary { operator, lhs, rhs } => {
                let l = lhs.evaluate(x)?;
                let r = rhs.evaluate(x)?;
                match operator {
                    BinaryOperator::Add => EvaluationError::check("addition", l + r),
                    BinaryOperator::Sub => EvaluationError::check("subtraction", l - r),
                    BinaryOperator::Mul => EvaluationError::check("multiplication", l * r),
                    BinaryOperator::Div => {
                        if r == 0.0 {
                            Err(EvaluationError::DivisionByZero)
                        } else {
                            EvaluationError::check("division", l / r)
                        }
                    },
                    BinaryOperator::Pow => {
                        if l == 0.0 && r < 0.0 {
                            Err(EvaluationError::DivisionByZero)
                        } else {
                            EvaluationError::check("power", l.powf(r))
                        }
                    }
                }
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            ExpressionTree::Binary { operator, .. } => operator.precedence(),
            ExpressionTree::Negate(_) => NEGATE_PRECEDENCE,
            _ => ATOM_PRECEDENCE
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// 正規化文字：最少括號、顯式 `*`、`^` 表示次方。
impl fmt::Display for ExpressionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionTree::Number(value) => write!(f, "{}", value),
            ExpressionTree::Variable => write!(f, "x"),
            ExpressionTree::Constant(constant) => write!(f, "{}", constant.name()),
            ExpressionTree::Negate(operand) => {
                write!(f, "-")?;
                operand.fmt_operand(f, operand.precedence() < NEGATE_PRECEDENCE)
            },
            ExpressionTree::Call { function, argument } => write!(f, "{}({})", function.name(), argument),
            ExpressionTree::Binary { operator, lhs, rhs } => {
                let precedence = operator.precedence();
                // 次方右結合，其餘左結合
                let (lhs_parens, rhs_parens) = if *operator == BinaryOperator::Pow {
                    (lhs.precedence() <= precedence, rhs.precedence() < precedence)
                } else {
                    (lhs.precedence() < precedence, rhs.precedence() <= precedence)
                };
                lhs.fmt_operand(f, lhs_parens)?;
                write!(f, "{}", operator.symbol())?;
                rhs.fmt_operand(f, rhs_parens)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_squared_plus_one() -> ExpressionTree {
        ExpressionTree::binary(
            BinaryOperator::Add,
            ExpressionTree::binary(BinaryOperator::Pow, ExpressionTree::Variable, ExpressionTree::Number(2.0)),
            ExpressionTree::Number(1.0)
        )
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(x_squared_plus_one().evaluate(3.0), Ok(10.0));
    }

    #[test]
    fn domain_errors_are_reported() {
        let log = ExpressionTree::call(Function::Ln, ExpressionTree::Variable);
        assert_eq!(
            log.evaluate(-1.0),
            Err(EvaluationError::Domain { function: "ln", argument: -1.0 })
        );
        let reciprocal = ExpressionTree::binary(BinaryOperator::Div, ExpressionTree::Number(1.0), ExpressionTree::Variable);
        assert_eq!(reciprocal.evaluate(0.0), Err(EvaluationError::DivisionByZero));
        let root = ExpressionTree::binary(BinaryOperator::Pow, ExpressionTree::Variable, ExpressionTree::Number(0.5));
        assert_eq!(root.evaluate(-4.0), Err(EvaluationError::NotANumber("power")));
        let exp = ExpressionTree::call(Function::Exp, ExpressionTree::Variable);
        assert_eq!(exp.evaluate(1000.0), Err(EvaluationError::Overflow("exp")));
    }

    #[test]
    fn display_uses_minimal_parentheses() {
        assert_eq!(x_squared_plus_one().to_string(), "x^2+1");

        let nested = ExpressionTree::binary(
            BinaryOperator::Sub,
            ExpressionTree::Number(1.0),
            ExpressionTree::binary(BinaryOperator::Sub, ExpressionTree::Variable, ExpressionTree::Number(2.0))
        );
        assert_eq!(nested.to_string(), "1-(x-2)");

        let negated_power = ExpressionTree::Negate(Box::new(
            ExpressionTree::binary(BinaryOperator::Pow, ExpressionTree::Variable, ExpressionTree::Number(2.0))
        ));
        assert_eq!(negated_power.to_string(), "-x^2");

        let power_of_negation = ExpressionTree::binary(
            BinaryOperator::Pow,
            ExpressionTree::Negate(Box::new(ExpressionTree::Variable)),
            ExpressionTree::Number(2.0)
        );
        assert_eq!(power_of_negation.to_string(), "(-x)^2");
    }
}
