use serde::{
    Serialize,
    Deserialize
};

/// 只讀取 JSON 物件中的 `name` 欄位，作為 manager 的鍵
#[derive(Clone, Serialize, Deserialize)]
pub struct NamedJsonObject {
    name: String
}


impl NamedJsonObject {
    pub fn new(name: String) -> NamedJsonObject {
        NamedJsonObject { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
