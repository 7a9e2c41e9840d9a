use std::cell::{
    RefCell,
    RefMut
};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::debug;

use super::managererror::ManagerError;
use super::namedobject::NamedJsonObject;


pub trait IManager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        let map = self.map();
        map.get(name)
            .cloned()
            .ok_or_else(|| ManagerError::map_elem_not_found(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.map().contains_key(name)
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert_obj_from_json_vec(&self, json_vec: &[serde_json::Value]) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone())?;
        }
        Ok(())
    }

    /// 檔案內容可為單一物件或物件陣列
    fn from_reader<P: AsRef<Path>>(&self, file_path: P) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        if json_value.is_array() {
            let json_array: Vec<serde_json::Value> = ManagerError::from_json_or_json_parse_error(json_value)?;
            self.insert_obj_from_json_vec(&json_array)
        } else {
            self.insert_obj_from_json(json_value)
        }
    }
}


/// 以名稱為鍵的物件表；物件由 `get_obj_from_json` 從 JSON 建構。
pub struct Manager<V> {
    map_cell: RefCell<HashMap<String, V>>,
    get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>
}


impl<V> Manager<V> where
    V: Clone {
    pub fn new(get_obj_from_json: fn(serde_json::Value) -> Result<V, ManagerError>) -> Manager<V> {
        Manager { map_cell: RefCell::new(HashMap::new()), get_obj_from_json }
    }

    pub fn insert(&self, name: &str, value: V) {
        self.map().insert(name.to_owned(), value);
    }
}

impl<V> IManager<V> for Manager<V> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>> {
        self.map_cell.borrow_mut()
    }

    fn insert_obj_from_json(&self, json_value: serde_json::Value) -> Result<(), ManagerError> {
        let named_object: NamedJsonObject = ManagerError::from_json_or_json_parse_error(json_value.clone())?;
        let v = (self.get_obj_from_json)(json_value)?;
        debug!("registered '{}'", named_object.name());
        self.insert(named_object.name(), v);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn number_from_json(json_value: serde_json::Value) -> Result<f64, ManagerError> {
        #[derive(serde::Deserialize)]
        struct Prop {
            value: f64
        }
        let prop: Prop = ManagerError::from_json_or_json_parse_error(json_value)?;
        Ok(prop.value)
    }

    #[test]
    fn inserts_named_objects() {
        let manager = Manager::new(number_from_json);
        manager
            .insert_obj_from_json_vec(&[json!({"name": "a", "value": 1.5}), json!({"name": "b", "value": 2.0})])
            .unwrap();
        assert_eq!(manager.get("a").unwrap(), 1.5);
        assert_eq!(manager.names(), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn missing_name_and_bad_json() {
        let manager = Manager::new(number_from_json);
        assert!(matches!(manager.get("missing"), Err(ManagerError::NameNotFoundError(name)) if name == "missing"));
        assert!(matches!(
            manager.insert_obj_from_json(json!({"value": 1.0})),
            Err(ManagerError::JsonParseError(_))
        ));
        assert!(matches!(
            manager.insert_obj_from_json(json!({"name": "c"})),
            Err(ManagerError::JsonParseError(_))
        ));
    }
}
