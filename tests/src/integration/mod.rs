//! # Integration Tests
//!
//! End-to-end client scenarios against a node wired exactly as the runtime
//! wires it: real validator, in-memory store, in-process ordering, commit
//! loop and cleanup task.

pub mod get_context;
pub mod properties;
pub mod set_context;

#[cfg(test)]
pub(crate) mod support {
    use cl_03_request_handler::RequestHandlerApi;
    use node_runtime::{NodeConfig, NodeContainer};
    use serde_json::{json, Value};
    use shared_types::{Nack, NodeMessage, ReplyResult, Role};

    pub const TRUSTEE: &str = "V4SGRU86Z58d6TV7PBUe6f";
    pub const STEWARD: &str = "8QhFxKxyaFsJy4CyxeYX34";
    pub const CLIENT: &str = "Th7MpTaRZVRYnPiabds81Y";

    /// Node with a trustee and a steward; `CLIENT` has no role.
    pub fn start_node() -> NodeContainer {
        let mut config = NodeConfig::default();
        config.roles.insert(TRUSTEE.into(), Role::Trustee);
        config.roles.insert(STEWARD.into(), Role::Steward);
        NodeContainer::start(config).expect("default config is valid")
    }

    pub fn context_data() -> Value {
        json!({
            "@context": [
                {"@version": 1.1},
                "https://www.w3.org/ns/odrl.jsonld",
                {"ex": "https://example.org/examples#", "schema": "http://schema.org/"}
            ]
        })
    }

    pub fn set_context(identifier: &str, req_id: u64, name: &str, version: &str) -> Value {
        json!({
            "identifier": identifier,
            "reqId": req_id,
            "protocolVersion": 2,
            "operation": {
                "type": "200",
                "dest": identifier,
                "meta": {"type": "ctx", "name": name, "version": version},
                "data": context_data()
            }
        })
    }

    pub fn get_context(
        identifier: &str,
        req_id: u64,
        dest: &str,
        name: &str,
        version: &str,
    ) -> Value {
        json!({
            "identifier": identifier,
            "reqId": req_id,
            "protocolVersion": 2,
            "operation": {
                "type": "300",
                "dest": dest,
                "meta": {"type": "ctx", "name": name, "version": version}
            }
        })
    }

    pub async fn send(node: &NodeContainer, request: &Value) -> NodeMessage {
        node.handler().respond(request).await
    }

    pub fn expect_reply(message: NodeMessage) -> ReplyResult {
        match message {
            NodeMessage::Reply { result } => result,
            other => panic!("expected REPLY, got {other:?}"),
        }
    }

    pub fn expect_reqnack(message: NodeMessage) -> Nack {
        match message {
            NodeMessage::ReqNack(nack) => nack,
            other => panic!("expected REQNACK, got {other:?}"),
        }
    }

    pub fn expect_reject(message: NodeMessage) -> Nack {
        match message {
            NodeMessage::Reject(nack) => nack,
            other => panic!("expected REJECT, got {other:?}"),
        }
    }
}
