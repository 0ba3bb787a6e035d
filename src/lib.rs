//! # linuxdo_browse
//!
//! 模拟真人浏览 linux.do 论坛的自动化工具：
//! 登录 → 遍历主题帖（概率点赞 + 模拟阅读）→ 抓取 connect 状态表。
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 能力抽象：`PageDriver` / `SessionDriver` / `RandomSource`
//! - `browser/` - chromiumoxide 真实驱动实现，只有这里认识 CDP
//!
//! ### ② 业务能力层（Services）
//! - `LoginFlow` - 登录状态机
//! - `ScrollReader` - 阅读模拟（随机滚动 / 随机退出 / 到底检测）
//! - `LikeAction` - 点赞能力（错误就地吞掉）
//! - `connect_report` - connect 状态表抓取与渲染
//!
//! ### ③ 流程层（Workflow）
//! - `TopicVisitFlow` - 单个主题：打开 → 概率点赞 → 阅读 → 关闭
//!
//! ### ④ 编排层（Orchestration）
//! - `SessionRunner` - 登录（重试 5 次）→ 主题遍历（每个重试 3 次）→ 报表
//! - `App` - 持有浏览器资源，接驳真实驱动
//!
//! ## 模块结构

pub mod app;
pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::{Config, Credentials};
pub use error::{BrowserError, BrowserResult};
pub use infrastructure::{eval_as, PageDriver, RandomSource, SessionDriver, ThreadRandom};
pub use orchestrator::SessionRunner;
pub use services::{LikeAction, LoginFlow, LoginState, ScrollReader, StatusRow};
pub use utils::RetryPolicy;
pub use workflow::TopicVisitFlow;
