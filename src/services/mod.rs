//! 业务能力层
//!
//! 每个服务只描述一种能力，只处理单个页面，
//! 不持有浏览器资源，也不关心整体流程顺序。

pub mod connect_report;
pub mod like_action;
pub mod login_flow;
pub mod scroll_reader;

pub use connect_report::StatusRow;
pub use like_action::LikeAction;
pub use login_flow::{LoginFlow, LoginState};
pub use scroll_reader::ScrollReader;
