//! `steptrace server` — Start the steptrace HTTP server.

pub async fn run(host: String, port: u16) -> Result<(), String> {
    let config = steptrace_server::ServerConfig {
        host: host.clone(),
        port,
    };

    println!("Starting steptrace server on {}:{}...", host, port);

    let addr = steptrace_server::start_server(config).await?;
    println!("steptrace server listening on http://{}", addr);

    // Keep the process running until interrupted
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| format!("Failed to listen for Ctrl+C: {}", e))?;

    println!("\nShutting down...");
    Ok(())
}
