//! End-to-end conversation scenarios

use async_trait::async_trait;
use chorus::{
    ChatMessage, ChorusError, ChorusResult, Conversation, ConversationAgent, ConversationConfig,
    ConversationMode, RoundContext, SequentialIdGenerator, SessionRegistry, SpeakerSelector,
    TerminationReason,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

struct EchoAgent {
    id: String,
    reply: String,
}

fn echo(id: &str, reply: &str) -> Arc<dyn ConversationAgent> {
    Arc::new(EchoAgent {
        id: id.to_string(),
        reply: reply.to_string(),
    })
}

#[async_trait]
impl ConversationAgent for EchoAgent {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    fn system_prompt(&self) -> &str {
        "echoes"
    }

    async fn reply(&self, _ctx: &RoundContext, _messages: &[ChatMessage]) -> ChorusResult<ChatMessage> {
        Ok(ChatMessage::assistant(self.reply.clone()))
    }
}

struct AlwaysFailingSelector;

#[async_trait]
impl SpeakerSelector for AlwaysFailingSelector {
    async fn select_next(
        &self,
        _ctx: &RoundContext,
        _agents: &[Arc<dyn ConversationAgent>],
        _messages: &[ChatMessage],
    ) -> ChorusResult<Arc<dyn ConversationAgent>> {
        Err(ChorusError::completion("no speaker"))
    }
}

/// Counts calls and always fails
struct BrokenAgent {
    calls: AtomicUsize,
}

#[async_trait]
impl ConversationAgent for BrokenAgent {
    fn id(&self) -> &str {
        "broken"
    }

    fn name(&self) -> &str {
        "broken"
    }

    fn system_prompt(&self) -> &str {
        ""
    }

    async fn reply(&self, _ctx: &RoundContext, _messages: &[ChatMessage]) -> ChorusResult<ChatMessage> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(100)).await;
        Err(ChorusError::agent("broken", "model unavailable"))
    }
}

#[tokio::test]
async fn two_agents_round_robin_until_max_rounds() {
    let conversation = Conversation::new(
        ConversationMode::RoundRobin,
        vec![echo("alice", "sure"), echo("bob", "agreed")],
        ConversationConfig::new().with_max_rounds(3),
    );

    let result = conversation
        .start(&CancellationToken::new(), "Let's plan")
        .await
        .unwrap();

    assert_eq!(result.total_rounds, 3);
    assert_eq!(result.messages.len(), 4);
    assert_eq!(result.termination_reason, TerminationReason::MaxRounds);
    assert_eq!(result.conversation_id, conversation.id());
    assert_eq!(conversation.get_messages(), result.messages);
}

#[tokio::test]
async fn termination_word_on_first_round() {
    let conversation = Conversation::new(
        ConversationMode::RoundRobin,
        vec![echo("solo", "TERMINATE")],
        ConversationConfig::default(),
    );

    let result = conversation
        .start(&CancellationToken::new(), "Finish up")
        .await
        .unwrap();

    assert_eq!(result.total_rounds, 1);
    assert_eq!(result.termination_reason, TerminationReason::AgentTerminated);
}

#[tokio::test]
async fn failing_selector_returns_partial_result_without_error() {
    let conversation = Conversation::new(
        ConversationMode::RoundRobin,
        vec![echo("alice", "hello")],
        ConversationConfig::default(),
    )
    .with_selector(Arc::new(AlwaysFailingSelector));

    let result = conversation
        .start(&CancellationToken::new(), "Anyone?")
        .await
        .unwrap();

    assert_eq!(result.messages.len(), 1);
    assert_eq!(result.messages[0].content, "Anyone?");
    assert_eq!(result.termination_reason, TerminationReason::AgentTerminated);
}

#[tokio::test(start_paused = true)]
async fn persistently_failing_agent_stalls_until_deadline() {
    let broken = Arc::new(BrokenAgent {
        calls: AtomicUsize::new(0),
    });
    let conversation = Conversation::new(
        ConversationMode::RoundRobin,
        vec![broken.clone() as Arc<dyn ConversationAgent>],
        ConversationConfig::new()
            .with_max_rounds(2)
            .with_timeout(Duration::from_secs(2)),
    );

    let err = conversation
        .start(&CancellationToken::new(), "Try")
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "CHORUS_DEADLINE_EXCEEDED");
    let partial = err.partial_result().unwrap();
    assert_eq!(partial.termination_reason, TerminationReason::Timeout);
    assert_eq!(partial.total_rounds, 0);
    assert_eq!(partial.messages.len(), 1);
    assert!(broken.calls.load(Ordering::Relaxed) > 2);
}

#[tokio::test]
async fn delegated_mode_without_capability_rotates_by_log_length() {
    let conversation = Conversation::new(
        ConversationMode::Selector,
        vec![echo("a", "from a"), echo("b", "from b"), echo("c", "from c")],
        ConversationConfig::new().with_max_rounds(3),
    );

    let result = conversation
        .start(&CancellationToken::new(), "Go")
        .await
        .unwrap();

    let senders: Vec<_> = result.messages[1..]
        .iter()
        .filter_map(|m| m.sender_id.as_deref())
        .collect();
    assert_eq!(senders, vec!["b", "c", "a"]);
}

#[tokio::test]
async fn registry_runs_independent_sessions_concurrently() {
    let registry = Arc::new(SessionRegistry::with_id_generator(Arc::new(
        SequentialIdGenerator::new(),
    )));
    let first = registry.create_session(
        vec![echo("a", "one"), echo("b", "two")],
        ConversationConfig::new().with_max_rounds(4),
    );
    let second = registry.create_session(
        vec![echo("c", "three"), echo("d", "four")],
        ConversationConfig::new().with_max_rounds(2),
    );

    let cancel = CancellationToken::new();
    let (r1, r2) = tokio::join!(first.start(&cancel, "first"), second.start(&cancel, "second"));
    let (r1, r2) = (r1.unwrap(), r2.unwrap());

    assert_eq!(r1.total_rounds, 4);
    assert_eq!(r2.total_rounds, 2);
    let senders: Vec<_> = r1.messages[1..]
        .iter()
        .filter_map(|m| m.sender_id.as_deref())
        .collect();
    assert_eq!(senders, vec!["a", "b", "a", "b"]);

    assert_eq!(registry.session_count(), 2);
    let stored = registry.get_session(first.id()).unwrap();
    assert_eq!(stored.message_count(), 5);
}
