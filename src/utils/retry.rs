//! 重试策略 - 通用容错包装
//!
//! 对任何可能失败的异步操作套用固定次数 + 固定间隔的重试。
//! 重试耗尽时返回 None，失败不会越过策略边界向外抛出。

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, warn};

/// 重试策略
///
/// 每个调用点可以有自己的次数与间隔；
/// 登录是全局单点，使用更高的次数（5 次）。
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// 最大尝试次数
    pub attempts: u32,
    /// 两次尝试之间的固定等待
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// 执行操作，最多 attempts 次
    ///
    /// 成功立即返回 Some；前 N-1 次失败记录 warn 并等待固定间隔，
    /// 第 N 次失败记录 error 并返回 None。
    /// 间隔只出现在两次尝试之间，最后一次失败后不再等待。
    pub async fn run<T, F, Fut>(&self, op_name: &str, mut operation: F) -> Option<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        for attempt in 1..=self.attempts {
            match operation().await {
                Ok(value) => return Some(value),
                Err(e) => {
                    if attempt == self.attempts {
                        error!("{} 最终执行失败: {}", op_name, e);
                    } else {
                        warn!(
                            "{} 第 {}/{} 次尝试失败: {}",
                            op_name, attempt, self.attempts, e
                        );
                        sleep(self.delay).await;
                    }
                }
            }
        }
        None
    }
}
