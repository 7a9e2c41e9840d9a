use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// 文字無法解析成運算式
    #[error("syntax error at position {position}: {message}")]
    Syntax {
        message: String,
        position: usize
    },
    /// 可解析，但所有探測點都無法得到有限值
    #[error("expression '{normalized}' is not finite at any probe point")]
    Domain {
        normalized: String
    }
}

impl CompileError {
    pub fn syntax(message: impl Into<String>, position: usize) -> CompileError {
        CompileError::Syntax { message: message.into(), position }
    }

    pub fn is_syntax(&self) -> bool {
        matches!(self, CompileError::Syntax { .. })
    }

    pub fn is_domain(&self) -> bool {
        matches!(self, CompileError::Domain { .. })
    }
}
