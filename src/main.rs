use anyhow::Result;
use quizwiz::utils::logging;
use quizwiz::{App, Command, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(&config);

    let command = Command::parse(std::env::args().skip(1))?;

    // 初始化并运行应用
    let mut app = App::initialize(config).await?;
    app.run(command).await?;

    Ok(())
}
