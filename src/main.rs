/*
 * Responsibility
 * - tokio runtime エントリ
 * - app::run() を呼ぶだけ (ロジックは置かない)
 */
use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    task_gateway::app::run().await
}
