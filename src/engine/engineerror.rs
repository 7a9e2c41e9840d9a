use thiserror::Error;

use crate::expression::compileerror::CompileError;
use crate::manager::managererror::ManagerError;
use crate::quadrature::quadratureerror::ParameterError;

/// 使整個計算失敗的錯誤；單一規則的失敗不在此列
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    #[error(transparent)]
    Manager(#[from] ManagerError)
}
