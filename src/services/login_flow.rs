//! 登录流程 - 业务能力层
//!
//! 驱动论坛登录的状态机。任何一步超时或出错都原样向外抛出，
//! 由外层 RetryPolicy 从 NotStarted 重启整个流程，不做部分续跑。

use std::time::Duration;

use anyhow::{bail, Result};
use tracing::{debug, info, warn};

use crate::config::Credentials;
use crate::infrastructure::{eval_as, PageDriver};

const LOGIN_BUTTON: &str = ".login-button .d-button-label";
const EXTERNAL_DIALOG: &str = r#"iframe[title="Sign in with Google Dialog"]"#;
const USERNAME_INPUT: &str = "#login-account-name";
const PASSWORD_INPUT: &str = "#login-account-password";
const SUBMIT_BUTTON: &str = "#login-button";
const CURRENT_USER: &str = "#current-user";

/// 只有登录成功后 #current-user 才会出现
const CURRENT_USER_PROBE: &str = "document.querySelector('#current-user') !== null";

const LOGIN_BUTTON_TIMEOUT: Duration = Duration::from_secs(60);
const DIALOG_TIMEOUT: Duration = Duration::from_secs(10);
const FORM_TIMEOUT: Duration = Duration::from_secs(30);
const VERIFY_TIMEOUT: Duration = Duration::from_secs(30);

/// 登录状态机的状态
///
/// 初始 NotStarted，终态 Authenticated / Failed。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    NotStarted,
    AwaitingLoginButton,
    AwaitingCredentialForm,
    CredentialsSubmitted,
    VerifyingSession,
    Authenticated,
    Failed,
}

/// 登录流程
pub struct LoginFlow {
    credentials: Credentials,
}

impl LoginFlow {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    /// 从 NotStarted 跑到终态
    ///
    /// 到达 Authenticated 返回 Ok；任何一步出错（超时、元素缺失）
    /// 状态机落入 Failed，并把原始错误抛给调用方。
    pub async fn run(&self, page: &dyn PageDriver) -> Result<()> {
        info!("开始登录");
        let mut state = LoginState::NotStarted;
        while state != LoginState::Authenticated {
            match self.step(page, state).await {
                Ok(next) => {
                    debug!("登录状态: {:?} -> {:?}", state, next);
                    state = next;
                }
                Err(e) => {
                    debug!("登录状态: {:?} -> {:?}", state, LoginState::Failed);
                    return Err(e);
                }
            }
        }
        info!("登录成功");
        Ok(())
    }

    async fn step(&self, page: &dyn PageDriver, state: LoginState) -> Result<LoginState> {
        let next = match state {
            LoginState::NotStarted => LoginState::AwaitingLoginButton,
            LoginState::AwaitingLoginButton => {
                page.wait_for_selector(LOGIN_BUTTON, LOGIN_BUTTON_TIMEOUT)
                    .await?;
                page.click(LOGIN_BUTTON).await?;
                self.detect_external_dialog(page).await?;
                LoginState::AwaitingCredentialForm
            }
            LoginState::AwaitingCredentialForm => {
                page.wait_for_selector(USERNAME_INPUT, FORM_TIMEOUT).await?;
                page.fill(USERNAME_INPUT, &self.credentials.username).await?;
                page.wait_for_selector(PASSWORD_INPUT, FORM_TIMEOUT).await?;
                page.fill(PASSWORD_INPUT, &self.credentials.password).await?;
                page.wait_for_selector(SUBMIT_BUTTON, FORM_TIMEOUT).await?;
                page.click(SUBMIT_BUTTON).await?;
                LoginState::CredentialsSubmitted
            }
            LoginState::CredentialsSubmitted => {
                page.wait_until_idle().await?;
                page.wait_for_selector(CURRENT_USER, VERIFY_TIMEOUT).await?;
                LoginState::VerifyingSession
            }
            LoginState::VerifyingSession => {
                let found: bool = eval_as(page, CURRENT_USER_PROBE).await?;
                if !found {
                    // 等待成功但查询为空，是逻辑失败而不是超时
                    bail!("登录失败: 用户元素未找到");
                }
                LoginState::Authenticated
            }
            LoginState::Authenticated | LoginState::Failed => state,
        };
        Ok(next)
    }

    /// 探测第三方登录弹窗
    ///
    /// 弹窗出现只记录日志；等待超时代表没有弹窗，照常继续。
    async fn detect_external_dialog(&self, page: &dyn PageDriver) -> Result<()> {
        match page.wait_for_selector(EXTERNAL_DIALOG, DIALOG_TIMEOUT).await {
            Ok(()) => warn!("检测到 Google 登录对话框，正在等待..."),
            Err(e) if e.is_wait_timeout() => info!("未检测到额外对话框，继续操作。"),
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}
