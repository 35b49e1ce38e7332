use knock_common::error::SendError;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Sends `greeting` with a single write, then closes the stream.
///
/// A write that takes fewer bytes than offered is reported as [`SendError::Short`] and is
/// not completed. The stream is closed on every path.
pub async fn greet<S>(mut stream: S, greeting: &[u8]) -> Result<(), SendError>
where
    S: AsyncWrite + Unpin,
{
    let outcome = match stream.write(greeting).await {
        Ok(sent) if sent == greeting.len() => Ok(()),
        Ok(sent) => Err(SendError::Short {
            sent,
            expected: greeting.len(),
        }),
        Err(err) => Err(SendError::Io(err)),
    };
    drop(stream);
    outcome
}
