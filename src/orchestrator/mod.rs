//! 编排层
//!
//! 会话级调度：登录 → 主题遍历 → connect 报表。
//! 只做调度和统计，不做具体业务判断。

pub mod session_runner;

pub use session_runner::SessionRunner;
