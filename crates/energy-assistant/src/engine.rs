//! Async assistant engine.
//!
//! Runs the [`Responder`] in a tokio task, receiving questions through one
//! `mpsc` channel and sending replies back through another, so the chat view
//! can keep drawing a typing indicator without any shared mutable state.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;

use crate::responder::Responder;

/// Delay between receiving a question and sending the reply, imitating a
/// human-paced typing indicator.
pub const TYPING_DELAY: Duration = Duration::from_millis(1500);

// ── Public types ──────────────────────────────────────────────────────────────

/// A completed answer forwarded to the UI layer.
#[derive(Debug, Clone)]
pub struct AssistantReply {
    /// The question as asked.
    pub question: String,
    /// The rendered answer.
    pub answer: String,
}

// ── AssistantEngine ───────────────────────────────────────────────────────────

/// Background question-answering coordinator.
///
/// Call [`AssistantEngine::start`] to spin up the answer loop in a dedicated
/// tokio task and receive the channel endpoints.
pub struct AssistantEngine {
    responder: Responder,
    typing_delay: Duration,
}

impl AssistantEngine {
    pub fn new(responder: Responder, typing_delay: Duration) -> Self {
        Self {
            responder,
            typing_delay,
        }
    }

    /// Start the answer loop.
    ///
    /// Returns:
    /// - An `mpsc::Sender<String>` for submitting questions.
    /// - An `mpsc::Receiver<AssistantReply>` for the caller to poll.
    /// - An [`AssistantHandle`] that can be used to abort the loop.
    pub fn start(self) -> (
        mpsc::Sender<String>,
        mpsc::Receiver<AssistantReply>,
        AssistantHandle,
    ) {
        // A small buffer covers questions typed faster than they are answered.
        let (question_tx, question_rx) = mpsc::channel(16);
        let (reply_tx, reply_rx) = mpsc::channel(16);

        let handle = tokio::spawn(async move {
            self.answer_loop(question_rx, reply_tx).await;
        });

        (question_tx, reply_rx, AssistantHandle { handle })
    }

    // ── Private implementation ────────────────────────────────────────────

    /// The main answer loop. Exits when the question sender is dropped or
    /// the reply receiver is closed.
    async fn answer_loop(
        self,
        mut question_rx: mpsc::Receiver<String>,
        reply_tx: mpsc::Sender<AssistantReply>,
    ) {
        while let Some(question) = question_rx.recv().await {
            // Compute before sleeping: the delay is presentation pacing, not
            // thinking time.
            let answer = self.responder.answer(&question);

            if !self.typing_delay.is_zero() {
                time::sleep(self.typing_delay).await;
            }

            let reply = AssistantReply { question, answer };
            if let Err(e) = reply_tx.send(reply).await {
                tracing::warn!(error = %e, "failed to send assistant reply; receiver dropped");
                break;
            }
        }
        tracing::debug!("assistant question channel closed; exiting loop");
    }
}

// ── AssistantHandle ───────────────────────────────────────────────────────────

/// A handle to the background answer task.
///
/// Drop or call [`AssistantHandle::abort`] to stop the loop.
pub struct AssistantHandle {
    handle: tokio::task::JoinHandle<()>,
}

impl AssistantHandle {
    /// Immediately abort the answer loop.
    pub fn abort(&self) {
        self.handle.abort();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use energy_core::models::EnergyRecord;

    fn sample_responder() -> Responder {
        Responder::new(
            "112".to_string(),
            vec![EnergyRecord {
                home_id: "112".to_string(),
                appliance: "Dishwasher".to_string(),
                energy_kwh: 4.06,
                time: "16:10".to_string(),
                date: "2023-04-28".to_string(),
                outdoor_temp_c: 21.6,
                season: "Summer".to_string(),
                household_size: 1,
            }],
            1,
            0.15,
        )
    }

    #[tokio::test]
    async fn test_engine_answers_question() {
        let engine = AssistantEngine::new(sample_responder(), Duration::ZERO);
        let (question_tx, mut reply_rx, handle) = engine.start();

        question_tx
            .send("What's my total energy consumption?".to_string())
            .await
            .expect("send question");

        let reply = tokio::time::timeout(Duration::from_secs(5), reply_rx.recv())
            .await
            .expect("timed out waiting for reply")
            .expect("channel closed before reply");

        assert!(reply.answer.contains("4.06 kWh"));
        assert_eq!(reply.question, "What's my total energy consumption?");

        handle.abort();
    }

    #[tokio::test]
    async fn test_engine_answers_in_order() {
        let engine = AssistantEngine::new(sample_responder(), Duration::ZERO);
        let (question_tx, mut reply_rx, handle) = engine.start();

        question_tx.send("total?".to_string()).await.unwrap();
        question_tx.send("when is peak?".to_string()).await.unwrap();

        let first = tokio::time::timeout(Duration::from_secs(5), reply_rx.recv())
            .await
            .unwrap()
            .unwrap();
        let second = tokio::time::timeout(Duration::from_secs(5), reply_rx.recv())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first.question, "total?");
        assert_eq!(second.question, "when is peak?");

        handle.abort();
    }

    #[tokio::test]
    async fn test_engine_exits_when_questions_dropped() {
        let engine = AssistantEngine::new(sample_responder(), Duration::ZERO);
        let (question_tx, mut reply_rx, _handle) = engine.start();

        drop(question_tx);

        // The loop exits and the reply channel closes.
        let result = tokio::time::timeout(Duration::from_secs(5), reply_rx.recv())
            .await
            .expect("timed out waiting for channel close");
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_engine_start_and_abort() {
        let engine = AssistantEngine::new(sample_responder(), TYPING_DELAY);
        let (_question_tx, _reply_rx, handle) = engine.start();

        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.abort();
    }
}
