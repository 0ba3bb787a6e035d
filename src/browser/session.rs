//! chromiumoxide 会话与页面驱动实现

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::{Browser, Page};
use serde_json::Value as JsonValue;
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::browser::launch_headless_browser;
use crate::config::Config;
use crate::error::{BrowserError, BrowserResult};
use crate::infrastructure::{PageDriver, SessionDriver};

/// 元素轮询间隔
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// 浏览器会话
///
/// 持有 Browser 句柄，整个运行期间唯一；
/// 每次主题访问通过 open_page 在同一上下文中开新页面。
pub struct ChromeSession {
    browser: Browser,
}

impl ChromeSession {
    pub async fn launch(config: &Config) -> BrowserResult<Self> {
        let browser = launch_headless_browser(config).await?;
        Ok(Self { browser })
    }
}

#[async_trait(?Send)]
impl SessionDriver for ChromeSession {
    async fn open_page(&self) -> BrowserResult<Box<dyn PageDriver>> {
        let page = self.browser.new_page("about:blank").await?;
        debug!("已打开新页面");
        Ok(Box::new(ChromePage { page }))
    }
}

/// 单个页面的 chromiumoxide 驱动
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }
}

#[async_trait(?Send)]
impl PageDriver for ChromePage {
    async fn goto(&self, url: &str) -> BrowserResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn wait_until_idle(&self) -> BrowserResult<()> {
        self.page.wait_for_navigation().await?;
        // CDP 没有 networkidle 事件，导航完成后再留一段静默期
        sleep(Duration::from_millis(500)).await;
        Ok(())
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> BrowserResult<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(BrowserError::WaitTimeout {
                    selector: selector.to_string(),
                    timeout,
                });
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn click(&self, selector: &str) -> BrowserResult<()> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        Ok(())
    }

    async fn fill(&self, selector: &str, value: &str) -> BrowserResult<()> {
        let element = self.page.find_element(selector).await?;
        element.click().await?;
        element.type_str(value).await?;
        Ok(())
    }

    async fn eval(&self, js: &str) -> BrowserResult<JsonValue> {
        let result = self.page.evaluate(js.to_string()).await?;
        result
            .into_value()
            .map_err(|e| BrowserError::Script(e.to_string()))
    }

    async fn current_url(&self) -> BrowserResult<String> {
        Ok(self.page.url().await?.unwrap_or_default())
    }

    async fn close(&self) -> BrowserResult<()> {
        self.page.clone().close().await?;
        Ok(())
    }
}
