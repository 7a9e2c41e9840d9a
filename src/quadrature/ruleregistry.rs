use std::cell::{
    Ref,
    RefCell
};
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::quadrature::midpoint::Midpoint;
use crate::quadrature::montecarlo::MonteCarlo;
use crate::quadrature::quadraturerule::QuadratureRule;
use crate::quadrature::ruleid::RuleId;
use crate::quadrature::simpsononethird::SimpsonOneThird;
use crate::quadrature::simpsonthreeeighths::SimpsonThreeEighths;
use crate::quadrature::trapezoidal::Trapezoidal;

/// 依 `RuleId` 取得規則實例。
///
/// Monte Carlo 規則帶有可變狀態，registry 之間不共用實例；
/// 需要跨執行緒時，每個執行緒各自建立一個 registry。
pub struct RuleRegistry {
    map_cell: RefCell<BTreeMap<RuleId, Rc<dyn QuadratureRule>>>
}

impl RuleRegistry {
    pub fn new() -> RuleRegistry {
        RuleRegistry { map_cell: RefCell::new(BTreeMap::new()) }
    }

    /// 註冊全部五種規則；`seed` 為 `None` 時 Monte Carlo 使用系統亂數
    pub fn with_default_rules(seed: Option<u64>) -> RuleRegistry {
        let registry = RuleRegistry::new();
        let monte_carlo = seed.map_or_else(MonteCarlo::new, MonteCarlo::with_seed);
        registry.insert(Rc::new(Trapezoidal::new()));
        registry.insert(Rc::new(Midpoint::new()));
        registry.insert(Rc::new(SimpsonOneThird::new()));
        registry.insert(Rc::new(SimpsonThreeEighths::new()));
        registry.insert(Rc::new(monte_carlo));
        registry
    }

    fn map(&self) -> Ref<'_, BTreeMap<RuleId, Rc<dyn QuadratureRule>>> {
        self.map_cell.borrow()
    }

    /// 以同一 id 註冊時取代舊規則
    pub fn insert(&self, rule: Rc<dyn QuadratureRule>) {
        self.map_cell.borrow_mut().insert(rule.id(), rule);
    }

    pub fn get(&self, id: RuleId) -> Option<Rc<dyn QuadratureRule>> {
        self.map().get(&id).cloned()
    }

    pub fn ids(&self) -> Vec<RuleId> {
        self.map().keys().copied().collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        RuleRegistry::with_default_rules(None)
    }
}
