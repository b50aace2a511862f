//! # Client-Level Properties
//!
//! - A committed document reads back identically under its exact key.
//! - Any other version of the same name reads back absent.
//! - Rejected requests leave the store untouched.

#[cfg(test)]
mod tests {
    use super::super::support::*;
    use cl_02_document_store::DocumentStore;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap()
    }

    fn name_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9_-]{0,24}"
    }

    fn version_strategy() -> impl Strategy<Value = String> {
        "[0-9]{1,3}(\\.[0-9]{1,3}){0,5}"
    }

    fn payload_strategy() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-z]{1,8}", "[a-zA-Z0-9:/.#]{0,32}", 0..6).prop_map(
            |terms| {
                let context: serde_json::Map<String, Value> = terms
                    .into_iter()
                    .map(|(term, iri)| (term, Value::String(iri)))
                    .collect();
                json!({ "@context": context })
            },
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_written_document_reads_back(
            name in name_strategy(),
            version in version_strategy(),
            other_version in version_strategy(),
            payload in payload_strategy(),
        ) {
            runtime().block_on(async {
                let node = start_node();

                let mut write = set_context(TRUSTEE, 1, &name, &version);
                write["operation"]["data"] = payload.clone();
                let written = expect_reply(send(&node, &write).await);
                assert_eq!(written.seq_no, Some(1));

                let read = expect_reply(
                    send(&node, &get_context(CLIENT, 2, TRUSTEE, &name, &version)).await,
                );
                let data = read.data.expect("exact key is found");
                assert_eq!(data.data, payload);
                assert_eq!(data.meta.name, name);
                assert_eq!(data.meta.version, version);

                if other_version != version {
                    let miss = expect_reply(
                        send(&node, &get_context(CLIENT, 3, TRUSTEE, &name, &other_version)).await,
                    );
                    assert_eq!(miss.seq_no, None);
                    assert_eq!(miss.data, None);
                }
            });
        }

        #[test]
        fn prop_bad_versions_never_reach_the_store(
            name in name_strategy(),
            version in "[0-9]{0,2}[a-z ][a-z. ]{0,3}[0-9]{0,2}",
        ) {
            runtime().block_on(async {
                let node = start_node();

                let message = send(&node, &set_context(TRUSTEE, 1, &name, &version)).await;
                let nack = expect_reqnack(message);
                assert!(nack.reason.starts_with("validation error [SetContext]"));
                assert!(node.store().is_empty());
                assert_eq!(node.store().last_seq_no(), None);
            });
        }
    }
}
