//! 咖啡业务服务
//!
//! 所有操作都在同一把锁内完成"检查后修改"，失败时集合保持不变。

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use super::model::{Cafe, CafeId};
use crate::core::error::CoreError;

pub const DUPLICATE_ID_MESSAGE: &str = "Ya existe un cafe con ese id";
pub const ID_MISMATCH_MESSAGE: &str =
    "El id del parámetro no coincide con el id del café recibido";
pub const UPDATE_NOT_FOUND_MESSAGE: &str = "No se encontró ningún café con ese id";
pub const NOT_FOUND_MESSAGE: &str = "No se encontró ningún cafe con ese id";

#[derive(Clone)]
pub struct CafeService {
    cafes: Arc<Mutex<Vec<Cafe>>>,
}

impl CafeService {
    /// 用初始数据创建服务，初始数据由配置层校验
    pub fn new(seed: Vec<Cafe>) -> Self {
        info!("已初始化 {} 个咖啡", seed.len());
        Self {
            cafes: Arc::new(Mutex::new(seed)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Cafe>>, CoreError> {
        self.cafes
            .lock()
            .map_err(|e| CoreError::Internal(format!("lock poisoned: {}", e)))
    }

    pub fn list(&self) -> Result<Vec<Cafe>, CoreError> {
        Ok(self.lock()?.clone())
    }

    pub fn get(&self, id: Option<CafeId>) -> Result<Cafe, CoreError> {
        let cafes = self.lock()?;
        id.and_then(|id| cafes.iter().find(|c| c.id == id))
            .cloned()
            .ok_or_else(|| CoreError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    pub fn create(&self, cafe: Cafe) -> Result<Vec<Cafe>, CoreError> {
        let mut cafes = self.lock()?;
        if cafes.iter().any(|c| c.id == cafe.id) {
            return Err(CoreError::BadRequest(DUPLICATE_ID_MESSAGE.to_string()));
        }

        debug!("creating cafe {}", cafe.id);
        cafes.push(cafe);
        Ok(cafes.clone())
    }

    /// 路径 id 与请求体 id 不一致的检查先于存在性检查
    pub fn update(&self, path_id: Option<CafeId>, cafe: Cafe) -> Result<Vec<Cafe>, CoreError> {
        if path_id != Some(cafe.id) {
            return Err(CoreError::BadRequest(ID_MISMATCH_MESSAGE.to_string()));
        }

        let mut cafes = self.lock()?;
        let slot = cafes
            .iter_mut()
            .find(|c| c.id == cafe.id)
            .ok_or_else(|| CoreError::NotFound(UPDATE_NOT_FOUND_MESSAGE.to_string()))?;

        debug!("updating cafe {}", cafe.id);
        *slot = cafe;
        Ok(cafes.clone())
    }

    pub fn delete(&self, id: Option<CafeId>) -> Result<Vec<Cafe>, CoreError> {
        let mut cafes = self.lock()?;
        let index = id
            .and_then(|id| cafes.iter().position(|c| c.id == id))
            .ok_or_else(|| CoreError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        let removed = cafes.remove(index);
        debug!("deleted cafe {}", removed.id);
        Ok(cafes.clone())
    }
}
