//! 咖啡集合：模型、服务与处理器

pub mod handler;
pub mod model;
pub mod service;

pub use handler::AppState;
pub use model::Cafe;
pub use service::CafeService;
