use std::rc::Rc;

use crate::function::predefinedfunction::{
    PredefinedFunction,
    BUILTIN_FUNCTIONS,
    BUILTIN_SINGULARITIES
};
use crate::manager::manager::Manager;
use crate::manager::managererror::ManagerError;


fn get_predefined_function_from_json(json_value: serde_json::Value) -> Result<Rc<PredefinedFunction>, ManagerError> {
    PredefinedFunction::from_json(json_value).map(Rc::new)
}


pub struct PredefinedFunctionManager;


impl PredefinedFunctionManager {
    pub fn new() -> Manager<Rc<PredefinedFunction>> {
        Manager::new(get_predefined_function_from_json)
    }

    /// 已載入全部內建函數的 manager
    pub fn with_builtin_functions() -> Result<Manager<Rc<PredefinedFunction>>, ManagerError> {
        let manager = PredefinedFunctionManager::new();
        for (id, label, expression, antiderivative, description) in BUILTIN_FUNCTIONS {
            let singularities = BUILTIN_SINGULARITIES
                .iter()
                .find(|(name, _)| *name == id)
                .map_or(&[][..], |(_, points)| *points);
            let function = PredefinedFunction::new(id, label, expression, antiderivative, description)?
                .with_singularities(singularities);
            manager.insert(id, Rc::new(function));
        }
        Ok(manager)
    }
}
