//! # GET_CONTEXT Scenarios
//!
//! Reads are exact-match lookups: any difference in author, name, version
//! or type yields an absent result, never an error.

#[cfg(test)]
mod tests {
    use super::super::support::*;
    use cl_02_document_store::DocumentStore;
    use serde_json::json;
    use shared_types::DocType;

    #[tokio::test]
    async fn test_send_then_get() {
        let node = start_node();
        let written =
            expect_reply(send(&node, &set_context(TRUSTEE, 1, "TestContext", "1.0")).await);

        let reply = expect_reply(
            send(&node, &get_context(TRUSTEE, 2, TRUSTEE, "TestContext", "1.0")).await,
        );

        assert_eq!(reply.txn_type, "300");
        assert_eq!(reply.req_id, 2);
        assert_eq!(reply.seq_no, written.seq_no);
        assert_eq!(reply.txn_time, written.txn_time);
        assert_eq!(reply.txn_metadata, None);
        let data = reply.data.expect("found");
        assert_eq!(data.data, context_data());
        assert_eq!(data.meta.doc_type, DocType::Context);
        assert_eq!(data.meta.name, "TestContext");
        assert_eq!(data.meta.version, "1.0");
    }

    #[tokio::test]
    async fn test_client_without_role_can_read() {
        let node = start_node();
        expect_reply(send(&node, &set_context(TRUSTEE, 1, "TestContext", "1.0")).await);

        let reply = expect_reply(
            send(&node, &get_context(CLIENT, 1, TRUSTEE, "TestContext", "1.0")).await,
        );

        assert_eq!(reply.identifier, CLIENT);
        assert_eq!(reply.dest, TRUSTEE);
        assert_eq!(reply.seq_no, Some(1));
    }

    #[tokio::test]
    async fn test_near_misses_are_absent() {
        let node = start_node();
        expect_reply(send(&node, &set_context(TRUSTEE, 1, "TestContext", "1.0")).await);

        let misses = [
            get_context(TRUSTEE, 2, TRUSTEE, "testcontext", "1.0"),
            get_context(TRUSTEE, 3, TRUSTEE, "TestContext", "1.1"),
            get_context(TRUSTEE, 4, TRUSTEE, "TestContext", "1.00"),
            get_context(TRUSTEE, 5, STEWARD, "TestContext", "1.0"),
        ];
        for request in misses {
            let reply = expect_reply(send(&node, &request).await);
            assert_eq!(reply.seq_no, None, "{request}");
            assert_eq!(reply.txn_time, None);
            assert_eq!(reply.data, None);
        }

        let mut wrong_type = get_context(TRUSTEE, 6, TRUSTEE, "TestContext", "1.0");
        wrong_type["operation"]["meta"]["type"] = json!("sch");
        let reply = expect_reply(send(&node, &wrong_type).await);
        assert_eq!(reply.seq_no, None);
        assert_eq!(reply.meta.doc_type, DocType::RichSchema);
    }

    #[tokio::test]
    async fn test_absent_reply_echoes_request_meta() {
        let node = start_node();

        let reply = expect_reply(
            send(&node, &get_context(CLIENT, 9, TRUSTEE, "Missing", "3.2.1")).await,
        );

        assert_eq!(reply.dest, TRUSTEE);
        assert_eq!(reply.meta.name, "Missing");
        assert_eq!(reply.meta.version, "3.2.1");
        assert_eq!(reply.seq_no, None);
        assert_eq!(reply.data, None);

        let wire = serde_json::to_value(&reply).unwrap();
        assert_eq!(wire["seqNo"], json!(null));
        assert_eq!(wire["data"], json!(null));
    }

    #[tokio::test]
    async fn test_reads_do_not_mutate_store() {
        let node = start_node();
        expect_reply(send(&node, &set_context(TRUSTEE, 1, "TestContext", "1.0")).await);

        for req_id in 2..6 {
            send(&node, &get_context(CLIENT, req_id, TRUSTEE, "TestContext", "1.0")).await;
            send(&node, &get_context(CLIENT, req_id + 10, TRUSTEE, "Other", "1.0")).await;
        }

        assert_eq!(node.store().len(), 1);
        assert_eq!(node.store().last_seq_no(), Some(1));
    }

    #[tokio::test]
    async fn test_numeric_version_is_type_error() {
        let node = start_node();

        let mut request = get_context(TRUSTEE, 1, TRUSTEE, "TestContext", "1.0");
        request["operation"]["meta"]["version"] = json!(2.0);
        let nack = expect_reqnack(send(&node, &request).await);

        assert_eq!(nack.identifier.as_deref(), Some(TRUSTEE));
        assert_eq!(nack.req_id, Some(1));
        assert!(nack.reason.starts_with("validation error [GetContext]"));
        assert!(nack
            .reason
            .contains("expected type 'string', got 'number' (version=2.0)"));
    }

    #[tokio::test]
    async fn test_invalid_version_rejected() {
        let node = start_node();

        let nack = expect_reqnack(
            send(&node, &get_context(TRUSTEE, 1, TRUSTEE, "TestContext", "asd")).await,
        );

        assert_eq!(nack.reason, "validation error [GetContext]: Invalid version: 'asd'");
    }

    #[tokio::test]
    async fn test_missed_fields_reported_in_order() {
        let node = start_node();

        let mut request = get_context(TRUSTEE, 1, TRUSTEE, "TestContext", "1.0");
        let operation = request["operation"].as_object_mut().unwrap();
        operation.remove("dest");
        operation["meta"].as_object_mut().unwrap().remove("version");
        let nack = expect_reqnack(send(&node, &request).await);
        assert!(nack.reason.ends_with("missed fields - dest, version"), "{}", nack.reason);

        let mut no_meta = get_context(TRUSTEE, 2, TRUSTEE, "TestContext", "1.0");
        no_meta["operation"].as_object_mut().unwrap().remove("meta");
        let nack = expect_reqnack(send(&node, &no_meta).await);
        assert!(nack.reason.ends_with("missed fields - meta"), "{}", nack.reason);
    }

    #[tokio::test]
    async fn test_forbidden_identifier_chars_listed() {
        let node = start_node();

        let nack = expect_reqnack(
            send(&node, &get_context("0OIl", 1, TRUSTEE, "TestContext", "1.0")).await,
        );

        assert!(nack.reason.contains("['0', 'I', 'O', 'l'] (identifier=0OIl)"), "{}", nack.reason);
    }

    #[tokio::test]
    async fn test_malformed_dest_rejected_not_absent() {
        let node = start_node();

        let nack = expect_reqnack(
            send(&node, &get_context(TRUSTEE, 1, "wrong_did", "TestContext", "1.0")).await,
        );

        assert!(nack
            .reason
            .ends_with("should not contain the following chars ['_'] (dest=wrong_did)"));
    }

    #[tokio::test]
    async fn test_unknown_operation_type() {
        let node = start_node();

        let mut request = get_context(TRUSTEE, 1, TRUSTEE, "TestContext", "1.0");
        request["operation"]["type"] = json!("999");
        let nack = expect_reqnack(send(&node, &request).await);

        assert_eq!(
            nack.reason,
            "validation error [ClientOperation]: unknown transaction type '999'"
        );
    }
}
