//! JSON-lines bridge to the renderer.
//!
//! One `PlayerEvent` per input line, one `EngineMessage` per output line.
//! The first message is the frame of the scene the session starts in.
//! Logging goes to stderr, so the output stream carries protocol only.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use sceneforge_shared::{EngineMessage, PlayerEvent};

use crate::use_cases::EventRouter;

/// Run the event loop until the input closes.
pub async fn serve<R, W>(router: &EventRouter, input: R, mut output: W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    send(&mut output, &router.current_frame().await).await?;

    let mut lines = input.lines();
    let mut handled = 0usize;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let message = match serde_json::from_str::<PlayerEvent>(line) {
            Ok(event) => {
                tracing::debug!(?event, "Player event");
                router.handle(event).await
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse player event");
                EngineMessage::error(format!("Invalid message format: {e}"))
            }
        };
        send(&mut output, &message).await?;
        handled += 1;
    }

    tracing::info!(events = handled, "Input closed, ending session");
    Ok(())
}

async fn send<W>(output: &mut W, message: &EngineMessage) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut json = serde_json::to_string(message).map_err(io::Error::other)?;
    json.push('\n');
    output.write_all(json.as_bytes()).await?;
    output.flush().await
}
