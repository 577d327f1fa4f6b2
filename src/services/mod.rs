//! 业务逻辑服务模块
//! 
//! 封装数据获取、导出和展示逻辑

pub mod display;  // 控制台表格
pub mod export;   // JSON / CSV 导出
pub mod listing;  // 榜单数据获取
