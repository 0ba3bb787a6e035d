use anyhow::Result;
use linuxdo_browse::{logger, App, Config, Credentials};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logger::init();

    // 加载配置与凭据
    let config = Config::load();
    let Some(credentials) = Credentials::from_env() else {
        eprintln!("Please set USERNAME and PASSWORD");
        std::process::exit(1);
    };

    // 初始化并运行应用
    App::initialize(config, credentials).await?.run().await
}
