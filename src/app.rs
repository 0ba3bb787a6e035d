use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::browser::ChromeSession;
use crate::config::{Config, Credentials};
use crate::infrastructure::{PageDriver, RandomSource, SessionDriver, ThreadRandom};
use crate::orchestrator::SessionRunner;
use crate::services::connect_report;

/// 应用主结构
///
/// 持有真实浏览器资源，把 chromiumoxide 驱动接到编排层上。
pub struct App {
    runner: SessionRunner,
}

impl App {
    /// 初始化应用：启动浏览器、打开首页并等待加载完成
    pub async fn initialize(config: Config, credentials: Credentials) -> Result<Self> {
        log_startup(&config);

        let session = Arc::new(ChromeSession::launch(&config).await?);
        let landing = session.open_page().await?;
        landing.goto(&config.home_url).await?;
        landing.wait_until_idle().await?;
        info!("已导航到: {}", config.home_url);

        let random: Arc<dyn RandomSource> = Arc::new(ThreadRandom);
        let runner = SessionRunner::new(config, credentials, session, landing, random);
        Ok(Self { runner })
    }

    /// 运行完整会话并打印最终报表
    pub async fn run(&self) -> Result<()> {
        let rows = self.runner.run().await?;
        connect_report::print_report(&rows);
        log_finished();
        Ok(())
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 论坛自动浏览");
    info!(
        "启动时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("🏠 目标站点: {}", config.home_url);
    info!("{}", "=".repeat(60));
}

fn log_finished() {
    info!("{}", "=".repeat(60));
    info!("✅ 全部浏览完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
}
