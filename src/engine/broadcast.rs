use std::future::Future;

/// Best-effort fan-out over the tracked recipient list. Sends are sequential,
/// the invoking chat is skipped, and one recipient failing (blocked bot,
/// deleted chat, transport hiccup) never stops the rest. Failed sends are not
/// retried within an invocation.
pub async fn fanout<F, Fut>(targets: Vec<i64>, source_chat: i64, mut send: F) -> (u32, u32)
where
    F: FnMut(i64) -> Fut,
    Fut: Future<Output = anyhow::Result<()>>,
{
    let mut sent = 0_u32;
    let mut failed = 0_u32;
    for chat_id in targets {
        if chat_id == source_chat {
            continue;
        }
        match send(chat_id).await {
            Ok(()) => sent += 1,
            Err(e) => {
                log::warn!("broadcast to chat {chat_id} failed: {e}");
                failed += 1;
            }
        }
    }
    (sent, failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn one_failure_does_not_abort_the_rest() {
        let attempts = AtomicUsize::new(0);
        let (sent, failed) = fanout(vec![1, 2, 3], 99, |chat_id| {
            attempts.fetch_add(1, Ordering::SeqCst);
            async move {
                if chat_id == 2 {
                    Err(anyhow!("bot was blocked"))
                } else {
                    Ok(())
                }
            }
        })
        .await;
        assert_eq!((sent, failed), (2, 1));
        assert_eq!(attempts.load(Ordering::SeqCst), 3, "target 3 must still be attempted");
    }

    #[tokio::test]
    async fn source_chat_is_skipped() {
        let (sent, failed) = fanout(vec![5, 7], 5, |_| async { Ok(()) }).await;
        assert_eq!((sent, failed), (1, 0));
    }

    #[tokio::test]
    async fn empty_list_sends_nothing() {
        let (sent, failed) = fanout(vec![], 1, |_| async { Ok(()) }).await;
        assert_eq!((sent, failed), (0, 0));
    }
}
