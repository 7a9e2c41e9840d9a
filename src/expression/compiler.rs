use log::debug;

use crate::expression::compileerror::CompileError;
use crate::expression::expressiontree::ExpressionTree;
use crate::expression::parser::Parser;
use crate::expression::tokenizer::{
    fold_text,
    Tokenizer
};
use crate::math::realfunction::{
    EvaluationError,
    RealFunction
};

/// 編譯後驗證用的探測點；至少一點得到有限值才算編譯成功
pub const PROBE_POINTS: [f64; 5] = [0.1, 1.0, 2.0, 3.0, 5.0];

// ─────────────────────────────────────────────────────────────────────────────
// CompiledExpression
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    raw: String,
    normalized: String,
    tree: ExpressionTree
}

impl CompiledExpression {
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn tree(&self) -> &ExpressionTree {
        &self.tree
    }
}

impl RealFunction for CompiledExpression {
    fn evaluate(&self, x: f64) -> Result<f64, EvaluationError> {
        self.tree.evaluate(x)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ExpressionCompiler
// ─────────────────────────────────────────────────────────────────────────────

pub struct ExpressionCompiler {
    probes: Vec<f64>
}

impl Default for ExpressionCompiler {
    fn default() -> Self {
        ExpressionCompiler::new(PROBE_POINTS.to_vec())
    }
}

impl ExpressionCompiler {
    pub fn new(probes: Vec<f64>) -> ExpressionCompiler {
        ExpressionCompiler { probes }
    }

    pub fn probes(&self) -> &[f64] {
        &self.probes
    }

    /// 以預設探測點編譯
    pub fn compile_text(text: &str) -> Result<CompiledExpression, CompileError> {
        ExpressionCompiler::default().compile(text)
    }

    pub fn compile(&self, text: &str) -> Result<CompiledExpression, CompileError> {
        let folded = fold_text(text);
        let tokens = Tokenizer::new(&folded).tokenize()?;
        let tree = Parser::new(tokens, folded.chars().count()).parse()?;
        let normalized = tree.to_string();

        let finite_probe = self.probes
            .iter()
            .find(|&&probe| tree.evaluate(probe).is_ok());

        match finite_probe {
            Some(probe) => {
                debug!("compiled '{}' as '{}' (validated at x = {})", text, normalized, probe);
                Ok(CompiledExpression { raw: text.to_owned(), normalized, tree })
            },
            None => {
                debug!("'{}' failed at every probe point {:?}", normalized, self.probes);
                Err(CompileError::Domain { normalized })
            }
        }
    }
}
