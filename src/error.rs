//! 浏览器驱动层错误类型
//!
//! 服务层统一使用 anyhow 传播，驱动层用具体枚举，
//! 便于在需要区分"等待超时"时做局部判断。

use std::time::Duration;

use thiserror::Error;

pub type BrowserResult<T> = Result<T, BrowserError>;

/// 浏览器驱动错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {0}")]
    Launch(String),

    /// CDP 协议错误
    #[error("CDP 错误: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    /// 等待元素超时
    #[error("等待元素 {selector} 超时 ({timeout:?})")]
    WaitTimeout { selector: String, timeout: Duration },

    /// 导航失败
    #[error("导航到 {url} 失败: {reason}")]
    Navigation { url: String, reason: String },

    /// 执行脚本失败
    #[error("执行脚本失败: {0}")]
    Script(String),

    /// 其他错误
    #[error("意外错误: {0}")]
    Unexpected(String),
}

impl BrowserError {
    /// 是否为"等待元素超时"
    ///
    /// 登录流程中探测第三方登录弹窗时，超时代表弹窗不存在，
    /// 不算错误，需要单独识别。
    pub fn is_wait_timeout(&self) -> bool {
        matches!(self, BrowserError::WaitTimeout { .. })
    }
}
