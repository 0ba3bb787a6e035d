//! 阅读模拟 - 业务能力层
//!
//! 模拟人浏览主题帖：随机滚动、随机提前离开、到底退出。
//! 迭代次数有硬上限，无论页面状态如何都保证结束。

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::info;

use crate::infrastructure::{eval_as, PageDriver, RandomSource};

/// 单次访问最多滚动的轮数（安全上限，不是目标值）
const MAX_SCROLL_ROUNDS: usize = 10;
/// 每轮滚动距离范围（像素）
const SCROLL_DISTANCE: (u32, u32) = (550, 650);
/// 每轮随机提前退出的概率
const EARLY_EXIT_PROBABILITY: f64 = 0.03;
/// 两轮之间的等待范围（秒）
const WAIT_SECS: (f64, f64) = (2.0, 4.0);

/// 当前滚动位置是否已到内容底部
const AT_BOTTOM_PROBE: &str =
    "window.scrollY + window.innerHeight >= document.body.scrollHeight";

pub struct ScrollReader {
    random: Arc<dyn RandomSource>,
}

impl ScrollReader {
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// 在页面上模拟阅读
    ///
    /// 到底退出只在 URL 与上一轮一致时生效，
    /// 防止导航或动态加载途中对过期内容误判底部。
    pub async fn browse(&self, page: &dyn PageDriver) -> Result<()> {
        let mut prev_url: Option<String> = None;

        for _ in 0..MAX_SCROLL_ROUNDS {
            let distance = self
                .random
                .int_between(SCROLL_DISTANCE.0, SCROLL_DISTANCE.1);
            page.eval(&format!("window.scrollBy(0, {})", distance))
                .await?;
            info!("向下滚动 {} 像素...", distance);

            let current_url = page.current_url().await?;
            info!("已加载页面: {}", current_url);

            if self.random.roll(EARLY_EXIT_PROBABILITY) {
                info!("✓ 随机退出浏览");
                return Ok(());
            }

            let at_bottom: bool = eval_as(page, AT_BOTTOM_PROBE).await?;
            match prev_url.as_deref() {
                Some(prev) if prev == current_url => {
                    if at_bottom {
                        info!("✓ 已到达页面底部，退出浏览");
                        return Ok(());
                    }
                }
                _ => prev_url = Some(current_url),
            }

            let wait_time = self.random.float_between(WAIT_SECS.0, WAIT_SECS.1);
            info!("等待 {:.2} 秒...", wait_time);
            sleep(Duration::from_secs_f64(wait_time)).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BrowserResult;
    use async_trait::async_trait;
    use serde_json::Value as JsonValue;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// 脚本化随机源：roll 按队列出值（耗尽后 false），区间取值固定取下界
    struct ScriptedRandom {
        rolls: RefCell<VecDeque<bool>>,
    }

    impl ScriptedRandom {
        fn new(rolls: Vec<bool>) -> Self {
            Self {
                rolls: RefCell::new(rolls.into()),
            }
        }

        fn never() -> Self {
            Self::new(Vec::new())
        }
    }

    impl RandomSource for ScriptedRandom {
        fn int_between(&self, lo: u32, _hi: u32) -> u32 {
            lo
        }

        fn float_between(&self, lo: f64, _hi: f64) -> f64 {
            lo
        }

        fn roll(&self, _probability: f64) -> bool {
            self.rolls.borrow_mut().pop_front().unwrap_or(false)
        }
    }

    /// 模拟主题页面：记录滚动次数，URL 按队列依次返回
    struct MockTopicPage {
        scrolls: Cell<usize>,
        at_bottom: bool,
        urls: RefCell<VecDeque<String>>,
        fallback_url: String,
    }

    impl MockTopicPage {
        fn new(at_bottom: bool, urls: Vec<&str>) -> Self {
            Self {
                scrolls: Cell::new(0),
                at_bottom,
                urls: RefCell::new(urls.into_iter().map(String::from).collect()),
                fallback_url: "https://linux.do/t/topic/1".to_string(),
            }
        }
    }

    #[async_trait(?Send)]
    impl PageDriver for MockTopicPage {
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
            Ok(())
        }

        async fn fill(&self, _selector: &str, _value: &str) -> BrowserResult<()> {
            Ok(())
        }

        async fn eval(&self, js: &str) -> BrowserResult<JsonValue> {
            if js.contains("scrollBy") {
                self.scrolls.set(self.scrolls.get() + 1);
                Ok(JsonValue::Null)
            } else if js == AT_BOTTOM_PROBE {
                Ok(JsonValue::Bool(self.at_bottom))
            } else {
                Ok(JsonValue::Null)
            }
        }

        async fn current_url(&self) -> BrowserResult<String> {
            Ok(self
                .urls
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| self.fallback_url.clone()))
        }

        async fn close(&self) -> BrowserResult<()> {
            Ok(())
        }
    }

    fn reader(random: ScriptedRandom) -> ScrollReader {
        ScrollReader::new(Arc::new(random))
    }

    #[tokio::test(start_paused = true)]
    async fn test_cap_terminates_loop() {
        // 永远不到底、永远不随机退出：恰好滚动 10 次后正常结束
        let page = MockTopicPage::new(false, vec![]);

        reader(ScriptedRandom::never()).browse(&page).await.unwrap();

        assert_eq!(page.scrolls.get(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_random_early_exit() {
        // 第 2 轮触发随机退出：恰好滚动 2 次
        let page = MockTopicPage::new(false, vec![]);

        reader(ScriptedRandom::new(vec![false, true]))
            .browse(&page)
            .await
            .unwrap();

        assert_eq!(page.scrolls.get(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bottom_with_changing_url_keeps_scrolling() {
        // 底部信号为真但每轮 URL 都在变（导航进行中）：不得提前终止
        let urls = vec![
            "https://linux.do/t/topic/1",
            "https://linux.do/t/topic/1/2",
            "https://linux.do/t/topic/1/3",
            "https://linux.do/t/topic/1/4",
            "https://linux.do/t/topic/1/5",
            "https://linux.do/t/topic/1/6",
            "https://linux.do/t/topic/1/7",
            "https://linux.do/t/topic/1/8",
            "https://linux.do/t/topic/1/9",
            "https://linux.do/t/topic/1/10",
        ];
        let page = MockTopicPage::new(true, urls);

        reader(ScriptedRandom::never()).browse(&page).await.unwrap();

        assert_eq!(page.scrolls.get(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bottom_with_stable_url_terminates() {
        // URL 稳定且已到底：第 2 轮即退出
        let page = MockTopicPage::new(true, vec![]);

        reader(ScriptedRandom::never()).browse(&page).await.unwrap();

        assert_eq!(page.scrolls.get(), 2);
    }
}
