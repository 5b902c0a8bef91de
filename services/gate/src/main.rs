//! Gate 二进制入口：仅负责启动应用。

mod api;
mod app;
mod auth;
mod banner;
mod cli;
mod config;
mod logging;
mod state;

#[tokio::main]
/// 启动 Gate 服务。
async fn main() -> anyhow::Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    match cli::dispatch(&args)? {
        cli::CliDispatch::Run => {}
        cli::CliDispatch::Exit => return Ok(()),
    }

    let _log_runtime = logging::init("gate")?;
    app::run().await
}
