use std::cell::{
    Cell,
    RefCell,
    RefMut
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::rc::Rc;

use log::info;
use serde::{
    Serialize,
    Deserialize
};

use crate::analysis::convergenceanalyzer::ConvergenceSettings;
use crate::engine::calculationreport::DEFAULT_REPORT_DIGITS;
use crate::function::predefinedfunction::PredefinedFunction;
use crate::function::predefinedfunctionmanager::PredefinedFunctionManager;
use crate::manager::managererror::ManagerError;
use crate::manager::manager::{
    IManager,
    Manager
};


#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub convergence: ConvergenceSettings,
    /// `None` 時 Monte Carlo 使用系統亂數
    pub monte_carlo_seed: Option<u64>,
    pub report_digits: u32
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            convergence: ConvergenceSettings::default(),
            monte_carlo_seed: None,
            report_digits: DEFAULT_REPORT_DIGITS
        }
    }
}


#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    engine: Option<EngineSettings>,
    #[serde(default)]
    functions: Vec<serde_json::Value>
}

pub struct Configuration {
    engine_settings_cell: Cell<EngineSettings>,
    predefined_function_manager_cell: RefCell<Manager<Rc<PredefinedFunction>>>
}


impl Configuration {
    /// 預設設定，並載入全部內建函數
    pub fn new() -> Result<Configuration, ManagerError> {
        let predefined_function_manager = PredefinedFunctionManager::with_builtin_functions()?;
        Ok(Configuration {
            engine_settings_cell: Cell::new(EngineSettings::default()),
            predefined_function_manager_cell: RefCell::new(predefined_function_manager)
        })
    }

    pub fn engine_settings(&self) -> EngineSettings {
        self.engine_settings_cell.get()
    }

    pub fn set_engine_settings(&self, settings: EngineSettings) {
        self.engine_settings_cell.set(settings);
    }

    pub fn predefined_function_manager(&self) -> RefMut<'_, Manager<Rc<PredefinedFunction>>> {
        self.predefined_function_manager_cell.borrow_mut()
    }

    pub fn from_reader<P: AsRef<Path>>(&self, file_path: P) -> Result<(), ManagerError> {
        let path = file_path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        self.apply(json_prop)?;
        info!("configuration loaded from {}", path.display());
        Ok(())
    }

    pub fn from_json_str(&self, text: &str) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(text)?;
        self.apply(json_prop)
    }

    fn apply(&self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        if let Some(settings) = json_prop.engine {
            self.set_engine_settings(settings);
        }
        let predefined_function_manager = self.predefined_function_manager_cell.borrow_mut();
        predefined_function_manager.insert_obj_from_json_vec(&json_prop.functions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_a_file() {
        let config = Configuration::new().unwrap();
        let settings = config.engine_settings();
        assert_eq!(settings.convergence, ConvergenceSettings { start: 2, end: 50, step: 2 });
        assert_eq!(settings.monte_carlo_seed, None);
        assert!(config.predefined_function_manager().contains("square"));
    }

    #[test]
    fn json_overrides_settings_and_adds_functions() {
        let config = Configuration::new().unwrap();
        config.from_json_str(r#"{
            "engine": {"convergence": {"end": 20}, "monte_carlo_seed": 42},
            "functions": [{"name": "quartic", "expression": "x^4", "antiderivative": "x^5/5"}]
        }"#).unwrap();
        let settings = config.engine_settings();
        assert_eq!(settings.convergence, ConvergenceSettings { start: 2, end: 20, step: 2 });
        assert_eq!(settings.monte_carlo_seed, Some(42));
        assert_eq!(settings.report_digits, DEFAULT_REPORT_DIGITS);
        assert!(config.predefined_function_manager().get("quartic").is_ok());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let config = Configuration::new().unwrap();
        assert!(matches!(config.from_reader("/nonexistent/compquad.json"), Err(ManagerError::IOError(_))));
    }
}
