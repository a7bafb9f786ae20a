//! Composite rules for RPC-shaped objects

use crate::rules::{address, block_number, data, hex64, quantity};
use lumen_schema::Schema;
use serde_json::Value;

fn optional(rule: Schema) -> Schema {
    rule.or(&Schema::absent())
}

fn nullable(rule: Schema) -> Schema {
    rule.or(&Schema::literal(Value::Null))
}

/// Rule for an outbound call/estimate request.
///
/// Pick-mode: only the declared fields survive, so stray client-side
/// fields never reach the wire. Every field is optional.
pub fn call_request() -> Schema {
    Schema::object_pick([
        ("from", optional(address())),
        ("to", optional(address())),
        ("gas", optional(quantity())),
        ("gasPrice", optional(quantity())),
        ("value", optional(quantity())),
        ("data", optional(data())),
        ("nonce", optional(quantity())),
        ("chainId", optional(quantity())),
    ])
}

/// Rule for a transaction object as returned by a node.
///
/// Pending transactions carry null block coordinates; unknown fields pass
/// through untouched.
pub fn rpc_transaction() -> Schema {
    Schema::object([
        ("hash", hex64()),
        ("nonce", quantity()),
        ("blockHash", nullable(hex64())),
        ("blockNumber", nullable(quantity())),
        ("transactionIndex", nullable(quantity())),
        ("from", address()),
        ("to", nullable(address())),
        ("value", quantity()),
        ("gasPrice", quantity()),
        ("gas", quantity()),
        ("data", optional(data())),
        ("v", optional(quantity())),
        ("r", optional(data())),
        ("s", optional(data())),
    ])
}

/// Rule for a log filter request.
///
/// `address` accepts one address or a list; each topic slot is a hash, a
/// list of alternative hashes, or null (wildcard).
pub fn log_filter() -> Schema {
    let address_or_list = address().or(&Schema::array(address()));
    let topic_slot = nullable(hex64().or(&Schema::array(hex64())));

    Schema::object_pick([
        ("fromBlock", optional(block_number())),
        ("toBlock", optional(block_number())),
        ("address", optional(address_or_list)),
        ("topics", optional(Schema::array(topic_slot))),
        ("blockHashes", optional(hex64().or(&Schema::array(hex64())))),
        ("limit", optional(quantity())),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ADDR: &str = "0x1123456789012345678901234567890123456789";

    fn hash(byte: &str) -> String {
        format!("0x{}", byte.repeat(32))
    }

    // ==================== call request ====================

    #[test]
    fn test_call_request_normalizes_and_picks() {
        let input = json!({
            "from": ADDR,
            "value": 1000,
            "gas": "21000",
            "data": "0xAB",
            "clientOnly": "should vanish"
        });
        let output = call_request().apply(&input).unwrap();
        assert_eq!(
            output,
            json!({
                "from": ADDR,
                "value": "0x3e8",
                "gas": "0x5208",
                "data": "0xab",
            })
        );
    }

    #[test]
    fn test_call_request_empty_is_valid() {
        assert_eq!(call_request().apply(&json!({})).unwrap(), json!({}));
    }

    #[test]
    fn test_call_request_bad_field_path() {
        let err = call_request().apply(&json!({"to": "0x1234"})).unwrap_err();
        assert_eq!(err.path.to_string(), "$.to");
    }

    // ==================== rpc transaction ====================

    #[test]
    fn test_rpc_transaction_pending_nulls() {
        let input = json!({
            "hash": hash("aa"),
            "nonce": "0x0",
            "blockHash": null,
            "blockNumber": null,
            "transactionIndex": null,
            "from": ADDR,
            "to": null,
            "value": "0x0",
            "gasPrice": "0x1",
            "gas": "0x5208",
        });
        let output = rpc_transaction().apply(&input).unwrap();
        assert_eq!(output["blockNumber"], json!(null));
        assert_eq!(output["to"], json!(null));
    }

    #[test]
    fn test_rpc_transaction_missing_required() {
        let err = rpc_transaction().apply(&json!({"nonce": "0x0"})).unwrap_err();
        assert_eq!(err.path.to_string(), "$.hash");
    }

    // ==================== log filter ====================

    #[test]
    fn test_log_filter_address_forms() {
        let single = log_filter().apply(&json!({"address": ADDR})).unwrap();
        assert_eq!(single["address"], json!(ADDR));

        let list = log_filter()
            .apply(&json!({"address": [ADDR, ADDR]}))
            .unwrap();
        assert_eq!(list["address"], json!([ADDR, ADDR]));
    }

    #[test]
    fn test_log_filter_topic_slots() {
        let input = json!({
            "fromBlock": "latest",
            "topics": [hash("aa"), null, [hash("bb"), hash("cc")]],
        });
        let output = log_filter().apply(&input).unwrap();
        assert_eq!(output["topics"][1], json!(null));
        assert_eq!(output["topics"][2], json!([hash("bb"), hash("cc")]));
    }

    #[test]
    fn test_log_filter_bad_topic_path() {
        let err = log_filter()
            .apply(&json!({"topics": [hash("aa"), "0xzz"]}))
            .unwrap_err();
        assert_eq!(err.path.to_string(), "$.topics[1]");
    }
}
