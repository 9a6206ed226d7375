//! In-memory repository for the four entity kinds.
//!
//! One `MemStore` is constructed at process start and shared through the
//! server state; entities live for the process lifetime (no eviction, no
//! TTL). All writes are append-only: a create assigns a fresh id and inserts
//! once, nothing is ever mutated afterwards. The maps sit behind async
//! `RwLock`s because the runtime is multi-threaded.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::RwLock;

use lexplain_core::model::{
    new_id, Analysis, ChatMessage, Clause, Document, Recommendation, RiskItem, RiskLevel, User,
};

// ── Insert shapes ─────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct NewDocument {
    pub user_id: Option<String>,
    pub filename: Option<String>,
    pub content: String,
    pub document_type: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub document_id: String,
    pub summary: String,
    pub risk_level: RiskLevel,
    pub key_terms: HashMap<String, String>,
    pub risk_items: Vec<RiskItem>,
    pub clauses: Vec<Clause>,
    pub recommendations: Vec<Recommendation>,
    pub word_count: u32,
    pub processing_time: String,
}

#[derive(Debug, Clone)]
pub struct NewChatMessage {
    pub analysis_id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

// ── Store ─────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemStore {
    users: RwLock<HashMap<String, User>>,
    documents: RwLock<HashMap<String, Document>>,
    analyses: RwLock<HashMap<String, Analysis>>,
    chat_messages: RwLock<HashMap<String, ChatMessage>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Documents ─────────────────────────────────────────────

    pub async fn create_document(&self, new: NewDocument) -> Document {
        let document = Document {
            id: new_id(),
            user_id: new.user_id,
            filename: new.filename,
            content: new.content,
            document_type: new.document_type,
            uploaded_at: Utc::now(),
        };
        self.documents
            .write()
            .await
            .insert(document.id.clone(), document.clone());
        document
    }

    pub async fn get_document(&self, id: &str) -> Option<Document> {
        self.documents.read().await.get(id).cloned()
    }

    pub async fn get_user_documents(&self, user_id: &str) -> Vec<Document> {
        self.documents
            .read()
            .await
            .values()
            .filter(|doc| doc.user_id.as_deref() == Some(user_id))
            .cloned()
            .collect()
    }

    // ── Analyses ──────────────────────────────────────────────

    pub async fn create_analysis(&self, new: NewAnalysis) -> Analysis {
        let analysis = Analysis {
            id: new_id(),
            document_id: new.document_id,
            summary: new.summary,
            risk_level: new.risk_level,
            key_terms: new.key_terms,
            risk_items: new.risk_items,
            clauses: new.clauses,
            recommendations: new.recommendations,
            word_count: new.word_count,
            processing_time: new.processing_time,
            created_at: Utc::now(),
        };
        self.analyses
            .write()
            .await
            .insert(analysis.id.clone(), analysis.clone());
        analysis
    }

    pub async fn get_analysis(&self, id: &str) -> Option<Analysis> {
        self.analyses.read().await.get(id).cloned()
    }

    /// First analysis referencing the given document, if any.
    pub async fn get_analysis_by_document(&self, document_id: &str) -> Option<Analysis> {
        self.analyses
            .read()
            .await
            .values()
            .find(|a| a.document_id == document_id)
            .cloned()
    }

    // ── Chat messages ─────────────────────────────────────────

    pub async fn create_chat_message(&self, new: NewChatMessage) -> ChatMessage {
        let message = ChatMessage {
            id: new_id(),
            analysis_id: new.analysis_id,
            question: new.question,
            answer: new.answer,
            created_at: Utc::now(),
        };
        self.chat_messages
            .write()
            .await
            .insert(message.id.clone(), message.clone());
        message
    }

    /// All messages for an analysis, sorted by ascending stored creation
    /// time (not by arrival order of concurrent writes).
    pub async fn get_chat_messages(&self, analysis_id: &str) -> Vec<ChatMessage> {
        let mut messages: Vec<ChatMessage> = self
            .chat_messages
            .read()
            .await
            .values()
            .filter(|msg| msg.analysis_id == analysis_id)
            .cloned()
            .collect();
        messages.sort_by_key(|msg| msg.created_at);
        messages
    }

    // ── Users ─────────────────────────────────────────────────

    pub async fn create_user(&self, new: NewUser) -> User {
        let user = User {
            id: new_id(),
            username: new.username,
            password: new.password,
        };
        self.users.write().await.insert(user.id.clone(), user.clone());
        user
    }

    pub async fn get_user(&self, id: &str) -> Option<User> {
        self.users.read().await.get(id).cloned()
    }

    pub async fn get_user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .read()
            .await
            .values()
            .find(|user| user.username == username)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_doc(content: &str) -> NewDocument {
        NewDocument {
            user_id: None,
            filename: None,
            content: content.to_string(),
            document_type: Some("lease".to_string()),
        }
    }

    fn new_analysis(document_id: &str) -> NewAnalysis {
        NewAnalysis {
            document_id: document_id.to_string(),
            summary: "A short lease.".to_string(),
            risk_level: RiskLevel::Low,
            key_terms: HashMap::new(),
            risk_items: Vec::new(),
            clauses: Vec::new(),
            recommendations: Vec::new(),
            word_count: 42,
            processing_time: "1.2 seconds".to_string(),
        }
    }

    #[tokio::test]
    async fn created_document_is_readable_by_id() {
        let store = MemStore::new();
        let doc = store.create_document(new_doc("lease text")).await;
        let fetched = store.get_document(&doc.id).await.unwrap();
        assert_eq!(fetched.content, "lease text");
        assert_eq!(fetched.document_type.as_deref(), Some("lease"));
    }

    #[tokio::test]
    async fn unknown_ids_return_none_not_panic() {
        let store = MemStore::new();
        assert!(store.get_document("nope").await.is_none());
        assert!(store.get_analysis("nope").await.is_none());
        assert!(store.get_user("nope").await.is_none());
        assert!(store.get_chat_messages("nope").await.is_empty());
    }

    #[tokio::test]
    async fn user_documents_filter_by_owner() {
        let store = MemStore::new();
        store
            .create_document(NewDocument {
                user_id: Some("u1".into()),
                ..new_doc("mine")
            })
            .await;
        store.create_document(new_doc("anonymous")).await;

        let docs = store.get_user_documents("u1").await;
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "mine");
    }

    #[tokio::test]
    async fn analysis_lookup_by_document_finds_first_match() {
        let store = MemStore::new();
        let doc = store.create_document(new_doc("text")).await;
        let analysis = store.create_analysis(new_analysis(&doc.id)).await;

        let found = store.get_analysis_by_document(&doc.id).await.unwrap();
        assert_eq!(found.id, analysis.id);
        assert!(store.get_analysis_by_document("other").await.is_none());
    }

    #[tokio::test]
    async fn chat_messages_sort_by_stored_timestamp_not_insert_order() {
        let store = MemStore::new();

        // Insert directly with explicit out-of-order timestamps to decouple
        // read ordering from write ordering.
        let base = Utc::now();
        for (id, offset_secs) in [("m-late", 30), ("m-early", 10), ("m-middle", 20)] {
            let msg = ChatMessage {
                id: id.to_string(),
                analysis_id: "a1".to_string(),
                question: format!("q-{id}"),
                answer: format!("a-{id}"),
                created_at: base + Duration::seconds(offset_secs),
            };
            store
                .chat_messages
                .write()
                .await
                .insert(msg.id.clone(), msg);
        }

        let ordered = store.get_chat_messages("a1").await;
        let ids: Vec<&str> = ordered.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m-early", "m-middle", "m-late"]);
    }

    #[tokio::test]
    async fn chat_messages_are_scoped_to_their_analysis() {
        let store = MemStore::new();
        store
            .create_chat_message(NewChatMessage {
                analysis_id: "a1".into(),
                question: "q1".into(),
                answer: "ans1".into(),
            })
            .await;
        store
            .create_chat_message(NewChatMessage {
                analysis_id: "a2".into(),
                question: "q2".into(),
                answer: "ans2".into(),
            })
            .await;

        let messages = store.get_chat_messages("a1").await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].question, "q1");
    }

    #[tokio::test]
    async fn users_are_found_by_username() {
        let store = MemStore::new();
        let user = store
            .create_user(NewUser {
                username: "advocate".into(),
                password: "opaque".into(),
            })
            .await;

        let by_name = store.get_user_by_username("advocate").await.unwrap();
        assert_eq!(by_name.id, user.id);
        assert!(store.get_user_by_username("other").await.is_none());
    }

    #[tokio::test]
    async fn concurrent_creates_do_not_collide() {
        let store = std::sync::Arc::new(MemStore::new());
        let mut handles = Vec::new();
        for i in 0..32 {
            let store = std::sync::Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.create_document(new_doc(&format!("doc-{i}"))).await.id
            }));
        }

        let mut ids = std::collections::HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), 32);
    }
}
