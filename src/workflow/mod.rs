//! 流程层
//!
//! 定义"一个主题帖"的完整访问流程。

pub mod topic_visit;

pub use topic_visit::TopicVisitFlow;
