//! Line-delimited transport over any async reader/writer.

use super::rpc::ToolServer;
use std::error::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// Serve requests until EOF, returns the number of lines handled.
pub async fn serve<R, W>(
    reader: R,
    mut writer: W,
    server: &ToolServer,
) -> Result<usize, Box<dyn Error>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled = 0;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        handled += 1;

        if let Some(response) = server.handle_line(&line) {
            let mut out = serde_json::to_string(&response)?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
            writer.flush().await?;
        }
    }

    log::info!("EOF after {handled} request(s)");
    Ok(handled)
}

/// Serve on the process stdin/stdout.
pub async fn serve_stdio(server: ToolServer) -> Result<usize, Box<dyn Error>> {
    log::info!("Starting Subnet Calculator tool server in stdio mode");
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve(stdin, stdout, &server).await.map_err(|e| {
        log::error!("stdio server stopped: {e}");
        e
    })
}
