//! 页面驱动能力 - 基础设施层
//!
//! 核心流程只依赖这两个 trait，不依赖具体的浏览器实现，
//! 测试中可以用内存实现替换真实浏览器。

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::BrowserResult;

/// 单个页面的驱动能力
#[async_trait(?Send)]
pub trait PageDriver {
    /// 导航到指定 URL
    async fn goto(&self, url: &str) -> BrowserResult<()>;

    /// 等待网络活动平息（页面完全加载）
    async fn wait_until_idle(&self) -> BrowserResult<()>;

    /// 等待元素出现，超时返回 `BrowserError::WaitTimeout`
    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> BrowserResult<()>;

    /// 点击第一个匹配的元素
    async fn click(&self, selector: &str) -> BrowserResult<()>;

    /// 向第一个匹配的输入框填入文本
    async fn fill(&self, selector: &str, value: &str) -> BrowserResult<()>;

    /// 执行 JS 并返回 JSON 结果
    async fn eval(&self, js: &str) -> BrowserResult<JsonValue>;

    /// 当前页面 URL
    async fn current_url(&self) -> BrowserResult<String>;

    /// 关闭页面
    async fn close(&self) -> BrowserResult<()>;
}

/// 浏览器会话能力：在同一个已认证的上下文中打开新页面
#[async_trait(?Send)]
pub trait SessionDriver {
    async fn open_page(&self) -> BrowserResult<Box<dyn PageDriver>>;
}

/// 执行 JS 并反序列化为指定类型
pub async fn eval_as<T: DeserializeOwned>(page: &dyn PageDriver, js: &str) -> anyhow::Result<T> {
    let value = page.eval(js).await?;
    let typed = serde_json::from_value(value)?;
    Ok(typed)
}
