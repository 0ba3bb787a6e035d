use serde::Deserialize;
use tracing::warn;

/// 程序配置
///
/// 优先级：默认值 < config.toml < 环境变量。
/// 启动时构造一次，之后只读。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 论坛首页 URL
    pub home_url: String,
    /// Connect 信息页 URL
    pub connect_url: String,
    /// 浏览器可执行文件路径（不设置则使用系统默认 Chrome）
    pub chrome_executable: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_url: "https://linux.do/".to_string(),
            connect_url: "https://connect.linux.do/".to_string(),
            chrome_executable: None,
        }
    }
}

impl Config {
    /// 加载配置：config.toml（如存在）+ 环境变量覆盖
    pub fn load() -> Self {
        let base = match std::fs::read_to_string("config.toml") {
            Ok(text) => match toml::from_str(&text) {
                Ok(config) => config,
                Err(e) => {
                    warn!("解析 config.toml 失败，使用默认配置: {}", e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        };
        base.apply_env()
    }

    fn apply_env(self) -> Self {
        Self {
            home_url: std::env::var("HOME_URL").unwrap_or(self.home_url),
            connect_url: std::env::var("CONNECT_URL").unwrap_or(self.connect_url),
            chrome_executable: std::env::var("CHROME_EXECUTABLE")
                .ok()
                .or(self.chrome_executable),
        }
    }
}

/// 登录凭据
///
/// 启动时从环境变量读取一次，整个运行期间只读。
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// 从 USERNAME / PASSWORD 环境变量读取，空字符串视为未设置
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("USERNAME").ok().filter(|v| !v.is_empty())?;
        let password = std::env::var("PASSWORD").ok().filter(|v| !v.is_empty())?;
        Some(Self { username, password })
    }
}
