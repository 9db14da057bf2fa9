// Line-oriented chat loop shared by the `chat` command and its tests
use crate::application::relay::{ChatEvent, Relay, Reply};
use std::future::Future;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatExit {
    /// Input reached end of file
    Eof,
    /// `shutdown` resolved, possibly while a message was in flight
    Interrupted,
}

/// Feed every non-blank line of `input` to the relay as a message from `user`.
///
/// `shutdown` is polled for the whole session, so it can interrupt both the
/// read and a slow translation.
pub async fn run_chat<R, S, F>(
    relay: &Relay,
    user: &str,
    input: R,
    shutdown: S,
    mut on_reply: F,
) -> std::io::Result<ChatExit>
where
    R: AsyncBufRead + Unpin,
    S: Future,
    F: FnMut(&Reply),
{
    tokio::pin!(shutdown);
    let mut lines = input.lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut shutdown => return Ok(ChatExit::Interrupted),
        };
        let Some(line) = line else {
            return Ok(ChatExit::Eof);
        };
        if line.trim().is_empty() {
            continue;
        }

        let event = ChatEvent::text(user, &line);
        let reply = tokio::select! {
            reply = relay.handle(&event) => reply,
            _ = &mut shutdown => return Ok(ChatExit::Interrupted),
        };
        if let Some(reply) = reply {
            on_reply(&reply);
        }
    }
}
