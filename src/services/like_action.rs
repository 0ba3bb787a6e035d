//! 点赞动作 - 业务能力层
//!
//! 找到第一个"未点赞"按钮则点击并短暂停顿；找不到视为已点过。
//! 本操作的任何错误都就地吞掉，绝不中断外层的主题访问。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{error, info};

use crate::infrastructure::{eval_as, PageDriver, RandomSource};

/// 未点赞的反应按钮；已点过的帖子上没有这个标记
const UNLIKED_BUTTON: &str = r#".discourse-reactions-reaction-button[title="点赞此帖子"]"#;
const UNLIKED_PROBE: &str = r#"document.querySelector('.discourse-reactions-reaction-button[title="点赞此帖子"]') !== null"#;

/// 点击后的停顿范围（秒），避免显得过于机械
const PAUSE_SECS: (f64, f64) = (1.0, 2.0);

pub struct LikeAction {
    random: Arc<dyn RandomSource>,
}

impl LikeAction {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// 尝试点赞；错误只记录日志，不向外传播
    pub async fn try_like(&self, page: &dyn PageDriver) {
        if let Err(e) = self.click_first_unliked(page).await {
            error!("点赞失败: {}", e);
        }
    }

    async fn click_first_unliked(&self, page: &dyn PageDriver) -> Result<()> {
        let found: bool = eval_as(page, UNLIKED_PROBE).await?;
        if found {
            info!("找到未点赞的帖子，准备点赞");
            page.click(UNLIKED_BUTTON).await?;
            info!("点赞成功");
            let pause = self.random.float_between(PAUSE_SECS.0, PAUSE_SECS.1);
            sleep(Duration::from_secs_f64(pause)).await;
        } else {
            info!("帖子可能已经点过赞了");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BrowserError, BrowserResult};
    use async_trait::async_trait;
    use serde_json::Value as JsonValue;
    use std::cell::Cell;

    struct FixedRandom;

    impl RandomSource for FixedRandom {
        fn int_between(&self, lo: u32, _hi: u32) -> u32 {
            lo
        }

        fn float_between(&self, lo: f64, _hi: f64) -> f64 {
            lo
        }

        fn roll(&self, _probability: f64) -> bool {
            false
        }
    }

    struct MockReactionPage {
        has_unliked_button: bool,
        probe_fails: bool,
        click_fails: bool,
        clicks: Cell<u32>,
    }

    impl MockReactionPage {
        fn new(has_unliked_button: bool) -> Self {
            Self {
                has_unliked_button,
                probe_fails: false,
                click_fails: false,
                clicks: Cell::new(0),
            }
        }
    }

    #[async_trait(?Send)]
    impl PageDriver for MockReactionPage {
        async fn goto(&self, _url: &str) -> BrowserResult<()> {
            Ok(())
        }

        async fn wait_until_idle(&self) -> BrowserResult<()> {
            Ok(())
        }

        async fn wait_for_selector(
            &self,
            _selector: &str,
            _timeout: Duration,
        ) -> BrowserResult<()> {
            Ok(())
        }

        async fn click(&self, _selector: &str) -> BrowserResult<()> {
            if self.click_fails {
                return Err(BrowserError::Unexpected("点击失败".to_string()));
            }
            self.clicks.set(self.clicks.get() + 1);
            Ok(())
        }

        async fn fill(&self, _selector: &str, _value: &str) -> BrowserResult<()> {
            Ok(())
        }

        async fn eval(&self, _js: &str) -> BrowserResult<JsonValue> {
            if self.probe_fails {
                return Err(BrowserError::Script("执行出错".to_string()));
            }
            Ok(JsonValue::Bool(self.has_unliked_button))
        }

        async fn current_url(&self) -> BrowserResult<String> {
            Ok("https://linux.do/t/topic/1".to_string())
        }

        async fn close(&self) -> BrowserResult<()> {
            Ok(())
        }
    }

    fn action() -> LikeAction {
        LikeAction::new(Arc::new(FixedRandom))
    }

    #[tokio::test(start_paused = true)]
    async fn test_clicks_unliked_button() {
        let page = MockReactionPage::new(true);

        action().try_like(&page).await;

        assert_eq!(page.clicks.get(), 1);
    }

    #[tokio::test]
    async fn test_skips_when_already_liked() {
        let page = MockReactionPage::new(false);

        action().try_like(&page).await;

        assert_eq!(page.clicks.get(), 0);
    }

    #[tokio::test]
    async fn test_probe_error_is_absorbed() {
        // 探测出错不能影响外层流程
        let mut page = MockReactionPage::new(true);
        page.probe_fails = true;

        action().try_like(&page).await;

        assert_eq!(page.clicks.get(), 0);
    }

    #[tokio::test]
    async fn test_click_error_is_absorbed() {
        let mut page = MockReactionPage::new(true);
        page.click_fails = true;

        action().try_like(&page).await;

        assert_eq!(page.clicks.get(), 0);
    }
}
