//! 浏览器接入层
//!
//! chromiumoxide 的启动配置，以及 PageDriver / SessionDriver 的真实实现。
//! 核心流程不直接使用本模块的类型，只通过 infrastructure 层的 trait。

pub mod headless;
pub mod session;

pub use headless::launch_headless_browser;
pub use session::{ChromePage, ChromeSession};
