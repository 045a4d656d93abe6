use cafes::{app_from_config, infrastructure::Logger, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load()?;
    Logger::init(&config.logging);

    info!("启动咖啡集合服务...");

    let app = app_from_config(&config)?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 服务运行在 http://{}", addr);
    info!("📖 API 端点:");
    info!("   GET    /cafes      - 获取所有咖啡");
    info!("   POST   /cafes      - 创建咖啡");
    info!("   GET    /cafes/:id  - 获取特定咖啡");
    info!("   PUT    /cafes/:id  - 更新咖啡");
    info!("   DELETE /cafes/:id  - 删除咖啡 (需要 Authorization header)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("无法监听关闭信号: {}", e);
    }
}
