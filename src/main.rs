/*
 * Responsibility
 * - tokio runtime startup
 * - calls app::run() (no logic here)
 */
use anyhow::Result;

use ambulance_api::app;

#[tokio::main]
async fn main() -> Result<()> {
    app::run().await
}
