//! 单个主题的访问流程 - 流程层
//!
//! 打开页面 → 概率点赞 → 模拟阅读 → 关闭页面，严格按此顺序。
//! 页面在所有退出路径上都会关闭，包括失败触发外层重试的路径。

use std::sync::Arc;

use anyhow::Result;
use tracing::warn;

use crate::infrastructure::{PageDriver, RandomSource, SessionDriver};
use crate::services::{LikeAction, ScrollReader};

/// 每个主题尝试点赞的概率
const LIKE_PROBABILITY: f64 = 0.3;

pub struct TopicVisitFlow {
    session: Arc<dyn SessionDriver>,
    scroll_reader: ScrollReader,
    like_action: LikeAction,
    random: Arc<dyn RandomSource>,
}

impl TopicVisitFlow {
    pub fn new(session: Arc<dyn SessionDriver>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            session,
            scroll_reader: ScrollReader::new(random.clone()),
            like_action: LikeAction::new(random.clone()),
            random,
        }
    }

    /// 完整访问一个主题
    ///
    /// 任何失败原样抛出供外层重试，重试会重新执行整个访问。
    pub async fn visit(&self, topic_url: &str) -> Result<()> {
        let page = self.session.open_page().await?;
        let outcome = self.visit_with_page(page.as_ref(), topic_url).await;
        // 无论访问成败都关闭页面，关闭失败不覆盖访问结果
        if let Err(e) = page.close().await {
            warn!("关闭页面失败: {}", e);
        }
        outcome
    }

    async fn visit_with_page(&self, page: &dyn PageDriver, topic_url: &str) -> Result<()> {
        page.goto(topic_url).await?;
        if self.random.roll(LIKE_PROBABILITY) {
            self.like_action.try_like(page).await;
        }
        self.scroll_reader.browse(page).await
    }
}
