//! 트레이딩 봇 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 인자로 시장가 주문
//! trader order --symbol BTCUSDT --side BUY --order-type MARKET --quantity 0.01
//!
//! # 누락된 값은 프롬프트로 입력 (LIMIT이면 가격도 묻습니다)
//! trader order --order-type LIMIT
//!
//! # HTTP 서버 시작
//! trader serve --port 8000
//! ```

use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing::error;
use trader_cli::{run_order, run_serve, OrderArgs};
use trader_core::{init_logging, AppConfig, LogConfig};

#[derive(Parser)]
#[command(name = "trader")]
#[command(about = "Binance Futures CLI Trading Bot", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 주문 실행 (MARKET 또는 LIMIT)
    Order(OrderArgs),

    /// HTTP API 서버 시작
    Serve {
        /// 바인드 포트 (기본: 설정 파일의 server.port)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = AppConfig::load_default()?;
    init_logging(LogConfig::from_logging_config(&config.logging)?)?;

    match cli.command {
        Commands::Order(args) => match run_order(&config.exchange, args).await {
            Ok(true) => Ok(ExitCode::SUCCESS),
            Ok(false) => Ok(ExitCode::FAILURE),
            Err(e) => {
                error!(error = %e, "CLI encountered an error");
                eprintln!("Fatal CLI Error: {}", e);
                Ok(ExitCode::FAILURE)
            }
        },
        Commands::Serve { port } => {
            run_serve(&config, port).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
