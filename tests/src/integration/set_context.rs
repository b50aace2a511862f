//! # SET_CONTEXT Scenarios
//!
//! Writes from a client's point of view: what commits, what is refused and
//! how, and what the store looks like afterwards.

#[cfg(test)]
mod tests {
    use super::super::support::*;
    use cl_02_document_store::DocumentStore;
    use cl_03_request_handler::RequestHandlerApi;
    use serde_json::json;
    use shared_types::{DocType, DocumentKey, NodeMessage};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_write_commits_and_echoes_document() {
        let node = start_node();

        let reply = expect_reply(send(&node, &set_context(TRUSTEE, 1, "TestContext", "1.0")).await);

        assert_eq!(reply.txn_type, "200");
        assert_eq!(reply.identifier, TRUSTEE);
        assert_eq!(reply.req_id, 1);
        assert_eq!(reply.dest, TRUSTEE);
        assert_eq!(reply.seq_no, Some(1));
        let metadata = reply.txn_metadata.expect("write replies carry txnMetadata");
        assert_eq!(metadata.seq_no, 1);
        assert_eq!(reply.txn_time, Some(metadata.txn_time));

        let data = reply.data.expect("committed document");
        assert_eq!(data.data, context_data());
        assert_eq!(data.meta.doc_type, DocType::Context);
        assert_eq!(data.meta.name, "TestContext");
        assert_eq!(data.meta.version, "1.0");

        let stored = node
            .store()
            .get(&DocumentKey::new(TRUSTEE, "TestContext", "1.0"), DocType::Context)
            .expect("stored");
        assert_eq!(stored.payload, context_data());
    }

    #[tokio::test]
    async fn test_seq_nos_increase_across_writes() {
        let node = start_node();

        let mut seq_nos = Vec::new();
        for (req_id, version) in [(1, "1.0"), (2, "1.1"), (3, "2.0")] {
            let reply = expect_reply(send(&node, &set_context(TRUSTEE, req_id, "Ctx", version)).await);
            seq_nos.push(reply.seq_no.expect("committed"));
        }
        let reply = expect_reply(send(&node, &set_context(STEWARD, 4, "Ctx", "1.0")).await);
        seq_nos.push(reply.seq_no.expect("committed"));

        assert_eq!(seq_nos, vec![1, 2, 3, 4]);
        assert_eq!(node.store().last_seq_no(), Some(4));
        assert_eq!(node.store().len(), 4);
    }

    #[tokio::test]
    async fn test_rich_schema_and_context_do_not_collide() {
        let node = start_node();

        expect_reply(send(&node, &set_context(TRUSTEE, 1, "Shared", "1.0")).await);

        let mut schema = set_context(TRUSTEE, 2, "Shared", "1.0");
        schema["operation"]["meta"]["type"] = json!("sch");
        // Same (author, name, version) is one key regardless of type.
        let nack = expect_reject(send(&node, &schema).await);
        assert!(nack.reason.contains("already exists"), "{}", nack.reason);
    }

    #[tokio::test]
    async fn test_client_without_role_cannot_write() {
        let node = start_node();

        let nack = expect_reject(send(&node, &set_context(CLIENT, 1, "TestContext", "1.0")).await);

        assert_eq!(nack.identifier.as_deref(), Some(CLIENT));
        assert_eq!(nack.req_id, Some(1));
        assert_eq!(
            nack.reason,
            format!(
                "validation error [SetContext]: {CLIENT} has no role permitted to write (role=none)"
            )
        );
        assert!(node.store().is_empty());
        assert_eq!(node.store().last_seq_no(), None);
    }

    #[tokio::test]
    async fn test_write_into_foreign_namespace_rejected() {
        let node = start_node();

        let mut request = set_context(STEWARD, 1, "TestContext", "1.0");
        request["operation"]["dest"] = json!(TRUSTEE);
        let nack = expect_reject(send(&node, &request).await);

        assert!(nack
            .reason
            .ends_with(&format!("{STEWARD} is not allowed to write to namespace {TRUSTEE}")));
        assert!(node.store().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_write_rejected_and_original_kept() {
        let node = start_node();

        expect_reply(send(&node, &set_context(TRUSTEE, 1, "TestContext", "1.0")).await);

        let mut again = set_context(TRUSTEE, 2, "TestContext", "1.0");
        again["operation"]["data"] = json!({"@context": {"other": "http://example.org/"}});
        let nack = expect_reject(send(&node, &again).await);

        assert_eq!(
            nack.reason,
            format!(
                "validation error [SetContext]: ctx with name 'TestContext' and version '1.0' already exists for {TRUSTEE}"
            )
        );

        let stored = node
            .store()
            .get(&DocumentKey::new(TRUSTEE, "TestContext", "1.0"), DocType::Context)
            .expect("original");
        assert_eq!(stored.seq_no, 1);
        assert_eq!(stored.payload, context_data());
        assert_eq!(node.store().len(), 1);
    }

    #[tokio::test]
    async fn test_racing_writes_commit_exactly_once() {
        let node = start_node();
        let handler = node.handler();

        let mut tasks = Vec::new();
        for req_id in 1..=8u64 {
            let handler = Arc::clone(&handler);
            tasks.push(tokio::spawn(async move {
                handler
                    .respond(&set_context(TRUSTEE, req_id, "Raced", "1.0"))
                    .await
            }));
        }

        let conflict = format!(
            "validation error [SetContext]: ctx with name 'Raced' and version '1.0' already exists for {TRUSTEE}"
        );
        let mut committed = 0;
        for task in tasks {
            match task.await.unwrap() {
                NodeMessage::Reply { result } => {
                    assert_eq!(result.seq_no, Some(1));
                    committed += 1;
                }
                NodeMessage::Reject(nack) => assert_eq!(nack.reason, conflict),
                other => panic!("unexpected message {other:?}"),
            }
        }

        assert_eq!(committed, 1);
        assert_eq!(node.store().len(), 1);
        assert_eq!(node.store().last_seq_no(), Some(1));
    }

    #[tokio::test]
    async fn test_four_component_version_commits_and_reads_back() {
        let node = start_node();

        let written = expect_reply(send(&node, &set_context(TRUSTEE, 1, "Deep", "1.0.0.0")).await);
        assert_eq!(written.seq_no, Some(1));

        let read = expect_reply(
            send(&node, &get_context(CLIENT, 2, TRUSTEE, "Deep", "1.0.0.0")).await,
        );
        assert_eq!(read.seq_no, Some(1));
        assert_eq!(read.data.expect("found").meta.version, "1.0.0.0");

        let miss = expect_reply(send(&node, &get_context(CLIENT, 3, TRUSTEE, "Deep", "1.0.0")).await);
        assert_eq!(miss.seq_no, None);
    }

    #[tokio::test]
    async fn test_schema_rejections_are_reqnack() {
        let node = start_node();

        let mut numeric = set_context(TRUSTEE, 1, "TestContext", "1.0");
        numeric["operation"]["meta"]["version"] = json!(2.0);
        let nack = expect_reqnack(send(&node, &numeric).await);
        assert!(nack
            .reason
            .contains("expected type 'string', got 'number' (version=2.0)"));

        let mut no_data = set_context(TRUSTEE, 2, "TestContext", "1.0");
        no_data["operation"]
            .as_object_mut()
            .unwrap()
            .remove("data");
        let nack = expect_reqnack(send(&node, &no_data).await);
        assert!(nack.reason.ends_with("[SetContext]: missed fields - data"));

        let mut text_data = set_context(TRUSTEE, 3, "TestContext", "1.0");
        text_data["operation"]["data"] = json!("not a document");
        let nack = expect_reqnack(send(&node, &text_data).await);
        assert!(nack.reason.contains("expected type 'object', got 'string'"));

        assert!(node.store().is_empty());
    }

    #[tokio::test]
    async fn test_semantic_rejections_are_reqnack() {
        let node = start_node();

        let nack = expect_reqnack(send(&node, &set_context(TRUSTEE, 1, "TestContext", "1.x")).await);
        assert_eq!(nack.reason, "validation error [SetContext]: Invalid version: '1.x'");

        let nack = expect_reqnack(send(&node, &set_context(TRUSTEE, 2, "  ", "1.0")).await);
        assert!(nack
            .reason
            .contains("empty or whitespace-only value is not allowed (name='  ')"));

        let mut unknown_type = set_context(TRUSTEE, 3, "TestContext", "1.0");
        unknown_type["operation"]["meta"]["type"] = json!("context");
        let nack = expect_reqnack(send(&node, &unknown_type).await);
        assert!(nack
            .reason
            .ends_with("expected one of ['ctx', 'sch'], got 'context' (type=context)"));

        let mut old_protocol = set_context(TRUSTEE, 4, "TestContext", "1.0");
        old_protocol["protocolVersion"] = json!(1);
        let nack = expect_reqnack(send(&node, &old_protocol).await);
        assert!(nack.reason.ends_with("Unsupported protocol version 1, expected 2"));

        assert!(node.store().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_writes_consume_no_seq_no() {
        let node = start_node();

        expect_reject(send(&node, &set_context(CLIENT, 1, "TestContext", "1.0")).await);
        expect_reqnack(send(&node, &set_context(TRUSTEE, 2, "TestContext", "asd")).await);

        let reply = expect_reply(send(&node, &set_context(TRUSTEE, 3, "TestContext", "1.0")).await);
        assert_eq!(reply.seq_no, Some(1));
    }
}
