//! 会话编排 - 编排层
//!
//! 登录（带重试）→ 按发现顺序遍历主题 → 抓取 connect 状态表。
//! 只依赖能力 trait，不认识具体的浏览器实现。

use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{info, warn};
use url::Url;

use crate::config::{Config, Credentials};
use crate::infrastructure::{eval_as, PageDriver, RandomSource, SessionDriver};
use crate::services::{connect_report, LoginFlow, StatusRow};
use crate::utils::RetryPolicy;
use crate::workflow::TopicVisitFlow;

/// 登录是整个运行的单点，失败重试次数高于默认值
const LOGIN_ATTEMPTS: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// 抓取主题列表中所有链接
const TOPIC_LINKS_JS: &str = r#"
(() => Array.from(document.querySelectorAll('#list-area .title'))
    .map(el => el.getAttribute('href'))
    .filter(href => href))()
"#;

pub struct SessionRunner {
    config: Config,
    session: Arc<dyn SessionDriver>,
    landing: Box<dyn PageDriver>,
    login_flow: LoginFlow,
    visit_flow: TopicVisitFlow,
}

impl SessionRunner {
    pub fn new(
        config: Config,
        credentials: Credentials,
        session: Arc<dyn SessionDriver>,
        landing: Box<dyn PageDriver>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            login_flow: LoginFlow::new(credentials),
            visit_flow: TopicVisitFlow::new(session.clone(), random),
            session,
            landing,
        }
    }

    /// 跑完整个会话，返回抓到的状态行
    ///
    /// 登录重试耗尽是致命错误；单个主题重试耗尽只跳过该主题，
    /// 运行整体仍然成功。
    pub async fn run(&self) -> Result<Vec<StatusRow>> {
        let login_policy = RetryPolicy::new(LOGIN_ATTEMPTS, RETRY_DELAY);
        let authenticated = login_policy
            .run("登录", || self.login_flow.run(self.landing.as_ref()))
            .await;
        if authenticated.is_none() {
            bail!("登录失败，程序终止");
        }

        self.browse_topics().await?;
        self.collect_connect_info().await
    }

    /// 按发现顺序依次访问主题，不去重，不并行
    async fn browse_topics(&self) -> Result<()> {
        let refs: Vec<String> = eval_as(self.landing.as_ref(), TOPIC_LINKS_JS).await?;
        info!("发现 {} 个主题帖", refs.len());

        let policy = RetryPolicy::default();
        for href in &refs {
            let topic_url = resolve_topic_url(&self.config.home_url, href)?;
            if policy
                .run("浏览主题帖", || self.visit_flow.visit(&topic_url))
                .await
                .is_none()
            {
                warn!("跳过主题: {}", topic_url);
            }
        }
        Ok(())
    }

    async fn collect_connect_info(&self) -> Result<Vec<StatusRow>> {
        let page = self.session.open_page().await?;
        let outcome = connect_report::collect(page.as_ref(), &self.config.connect_url).await;
        if let Err(e) = page.close().await {
            warn!("关闭页面失败: {}", e);
        }
        outcome
    }
}

/// 把主题的相对链接解析成完整 URL
fn resolve_topic_url(base: &str, href: &str) -> Result<String> {
    let url = Url::parse(base)?.join(href)?;
    Ok(url.to_string())
}
