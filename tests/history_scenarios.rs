//! End-to-end history tree scenarios

use async_trait::async_trait;
use chorus::storage::{LocalTreeStorage, TreeStorage};
use chorus::{
    ChatMessage, ChorusError, ChorusResult, Conversation, ConversationAgent, ConversationConfig,
    ConversationMode, HistoryTree, MAIN_BRANCH, RoundContext, TreeMessage,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

struct Counter {
    id: String,
}

#[async_trait]
impl ConversationAgent for Counter {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.id
    }

    fn system_prompt(&self) -> &str {
        "counts messages"
    }

    async fn reply(&self, _ctx: &RoundContext, messages: &[ChatMessage]) -> ChorusResult<ChatMessage> {
        Ok(ChatMessage::assistant(format!("seen {}", messages.len())))
    }
}

async fn record(tree: &HistoryTree, messages: &[ChatMessage]) {
    for message in messages {
        tree.append(TreeMessage::from(message)).await.unwrap();
    }
}

#[tokio::test]
async fn record_conversation_explore_alternative_and_merge_back() {
    let conversation = Conversation::new(
        ConversationMode::RoundRobin,
        vec![Arc::new(Counter { id: "counter".into() }) as Arc<dyn ConversationAgent>],
        ConversationConfig::new().with_max_rounds(2),
    );
    let result = conversation
        .start(&CancellationToken::new(), "count")
        .await
        .unwrap();

    let tree = HistoryTree::new(result.conversation_id.clone());
    record(&tree, &result.messages).await;
    tree.snapshot("after-run").await.unwrap();

    tree.fork("what-if").await.unwrap();
    tree.switch_branch("what-if").await.unwrap();
    tree.append(TreeMessage::user("try another angle")).await.unwrap();
    tree.append(TreeMessage::assistant("another angle")).await.unwrap();

    tree.switch_branch(MAIN_BRANCH).await.unwrap();
    assert_eq!(tree.messages().await.len(), 3);

    tree.merge_branch("what-if").await.unwrap();
    let merged = tree.messages().await;
    assert_eq!(merged.len(), 5);
    assert_eq!(merged[4].content, "another angle");

    let restored = tree.restore_snapshot("after-run").await.unwrap();
    assert_eq!(restored.messages.len(), 3);
    assert_eq!(tree.active_branch_name().await, MAIN_BRANCH);
    assert_eq!(tree.messages().await.len(), 3);
}

#[tokio::test]
async fn persisted_tree_survives_reload() {
    let temp = TempDir::new().unwrap();
    let storage = LocalTreeStorage::with_path(temp.path().to_path_buf());

    let tree = HistoryTree::new("persisted");
    tree.append(TreeMessage::system("be brief")).await.unwrap();
    tree.append(TreeMessage::user("hello")).await.unwrap();
    tree.fork("draft").await.unwrap();
    tree.rollback_n(1).await.unwrap();
    storage.save(&tree).await.unwrap();

    let loaded = storage.load("persisted").await.unwrap();

    assert_eq!(loaded.history().await, tree.history().await);
    assert_eq!(loaded.get_branch("draft").await, tree.get_branch("draft").await);
    let next = loaded.append(TreeMessage::user("again")).await.unwrap();
    assert_eq!(next.id, "state_4");

    let summaries = storage.list().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].state_counter, 3);
}

#[tokio::test]
async fn protected_branches_survive_every_delete_attempt() {
    let tree = HistoryTree::new("guarded");
    tree.fork("side").await.unwrap();
    tree.switch_branch("side").await.unwrap();

    for name in [MAIN_BRANCH, "side"] {
        let err = tree.delete_branch(name).await.unwrap_err();
        assert!(matches!(err, ChorusError::ProtectedBranch { .. }));
    }
    assert_eq!(tree.branch_count().await, 2);
}
