//! Contract interface definitions and the call registry

use bytes::Bytes;
use lumen_primitives::{Address, H256};
use serde_json::{json, Value};

use crate::abi::{
    decode, encode_function_call, event_topic, function_selector, ParamType, Token,
};
use crate::overload::{EventOverride, MethodOverride};
use crate::SdkError;

/// Function definition
#[derive(Debug, Clone)]
pub struct FunctionDef {
    /// Function name
    pub name: String,
    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub signature: String,
    /// 4-byte selector
    pub selector: [u8; 4],
    /// Input parameter types
    pub inputs: Vec<ParamType>,
    /// Output parameter types
    pub outputs: Vec<ParamType>,
}

impl FunctionDef {
    /// Create a function definition; the canonical signature and selector
    /// are derived from the name and input types.
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>, outputs: Vec<ParamType>) -> Self {
        let name = name.into();
        let signature = render_signature(&name, &inputs);
        let selector = function_selector(&signature);
        Self {
            name,
            signature,
            selector,
            inputs,
            outputs,
        }
    }

    /// Encode a call to this function: selector plus arguments.
    ///
    /// Strict: an argument list that does not fit the input types fails.
    pub fn encode_call(&self, args: &[Token]) -> Result<Vec<u8>, SdkError> {
        encode_function_call(self.selector, &self.inputs, args)
    }

    /// Decode the argument part of calldata (after the selector).
    pub fn decode_args(&self, data: &[u8]) -> Result<Vec<Token>, SdkError> {
        decode(&self.inputs, data)
    }

    /// Decode a return value.
    pub fn decode_output(&self, data: &[u8]) -> Result<Vec<Token>, SdkError> {
        decode(&self.outputs, data)
    }
}

/// Event definition
#[derive(Debug, Clone)]
pub struct EventDef {
    /// Event name
    pub name: String,
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`
    pub signature: String,
    /// Discriminating first topic: keccak256 of the signature
    pub topic: H256,
    /// Non-indexed parameter types carried in the log data
    pub inputs: Vec<ParamType>,
}

impl EventDef {
    /// Create an event definition; the topic is derived from the name and
    /// input types.
    pub fn new(name: impl Into<String>, inputs: Vec<ParamType>) -> Self {
        let name = name.into();
        let signature = render_signature(&name, &inputs);
        let topic = event_topic(&signature);
        Self {
            name,
            signature,
            topic,
            inputs,
        }
    }

    /// Decode the data payload of a log entry.
    pub fn decode_data(&self, data: &[u8]) -> Result<Vec<Token>, SdkError> {
        decode(&self.inputs, data)
    }
}

fn render_signature(name: &str, inputs: &[ParamType]) -> String {
    let params = inputs
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(",");
    format!("{name}({params})")
}

/// A deployed contract's interface: functions and events, grouped by name
/// for overload resolution.
#[derive(Debug, Clone)]
pub struct Contract {
    address: Address,
    functions: Vec<FunctionDef>,
    events: Vec<EventDef>,
}

impl Contract {
    /// Create an interface for the contract at `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            functions: Vec::new(),
            events: Vec::new(),
        }
    }

    /// The contract address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Add a function (builder style). Same-name functions form an
    /// overload group.
    pub fn with_function(mut self, function: FunctionDef) -> Self {
        self.functions.push(function);
        self
    }

    /// Add an event (builder style).
    pub fn with_event(mut self, event: EventDef) -> Self {
        self.events.push(event);
        self
    }

    /// The overload group for a function name, in declaration order.
    pub fn method(&self, name: &str) -> Option<MethodOverride> {
        let candidates: Vec<FunctionDef> = self
            .functions
            .iter()
            .filter(|f| f.name == name)
            .cloned()
            .collect();
        MethodOverride::new(candidates)
    }

    /// The overload group for an event name.
    pub fn event(&self, name: &str) -> Option<EventOverride> {
        let candidates: Vec<EventDef> = self
            .events
            .iter()
            .filter(|e| e.name == name)
            .cloned()
            .collect();
        EventOverride::new(candidates)
    }

    /// Encode a call, resolving overloads by trial encoding.
    pub fn encode_call(&self, name: &str, args: &[Token]) -> Result<Bytes, SdkError> {
        let method = self
            .method(name)
            .ok_or_else(|| SdkError::AbiEncode(format!("unknown function: {name}")))?;
        method.encode(args)
    }

    /// Decode calldata against any function of the interface, dispatching
    /// by selector.
    pub fn decode_call(&self, data: &[u8]) -> Result<(&FunctionDef, Vec<Token>), SdkError> {
        let selector: [u8; 4] = data
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| SdkError::AbiDecode("calldata shorter than a selector".to_string()))?;

        let function = self
            .functions
            .iter()
            .find(|f| f.selector == selector)
            .ok_or_else(|| {
                SdkError::AbiDecode(format!("no function with selector 0x{}", hex::encode(selector)))
            })?;

        let tokens = function.decode_args(&data[4..])?;
        Ok((function, tokens))
    }

    /// Build a call request object for this contract, normalized by the
    /// canonical request rule.
    pub fn call_request(&self, name: &str, args: &[Token]) -> Result<Value, SdkError> {
        let data = self.encode_call(name, args)?;
        let request = json!({
            "to": self.address.to_hex(),
            "data": format!("0x{}", hex::encode(&data)),
        });
        Ok(lumen_format::call_request().apply(&request)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer() -> FunctionDef {
        FunctionDef::new(
            "transfer",
            vec![ParamType::Address, ParamType::Uint(256)],
            vec![ParamType::Bool],
        )
    }

    fn contract_address() -> Address {
        Address::from_hex("0x8123456789012345678901234567890123456789").unwrap()
    }

    #[test]
    fn test_signature_and_selector_derived() {
        let f = transfer();
        assert_eq!(f.signature, "transfer(address,uint256)");
        assert_eq!(f.selector, [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn test_function_encode_decode_roundtrip() {
        let f = transfer();
        let to = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();
        let args = vec![Token::Address(to), Token::uint(1000u64)];

        let calldata = f.encode_call(&args).unwrap();
        assert_eq!(&calldata[..4], &f.selector);

        let decoded = f.decode_args(&calldata[4..]).unwrap();
        assert_eq!(decoded, args);
    }

    #[test]
    fn test_event_topic_derived() {
        let e = EventDef::new(
            "Transfer",
            vec![ParamType::Address, ParamType::Address, ParamType::Uint(256)],
        );
        assert_eq!(e.signature, "Transfer(address,address,uint256)");
        assert_eq!(
            e.topic.to_hex(),
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"
        );
    }

    #[test]
    fn test_contract_encode_and_dispatch() {
        let contract = Contract::new(contract_address()).with_function(transfer());
        let to = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();

        let calldata = contract
            .encode_call("transfer", &[Token::Address(to), Token::uint(5u64)])
            .unwrap();

        let (function, tokens) = contract.decode_call(&calldata).unwrap();
        assert_eq!(function.name, "transfer");
        assert_eq!(tokens[1], Token::uint(5u64));
    }

    #[test]
    fn test_contract_unknown_function() {
        let contract = Contract::new(contract_address());
        assert!(contract.encode_call("mint", &[]).is_err());
        assert!(contract.decode_call(&[0xde, 0xad, 0xbe, 0xef]).is_err());
        assert!(contract.decode_call(&[0x01]).is_err());
    }

    #[test]
    fn test_call_request_shape() {
        let contract = Contract::new(contract_address()).with_function(transfer());
        let to = Address::from_hex("0x1123456789012345678901234567890123456789").unwrap();

        let request = contract
            .call_request("transfer", &[Token::Address(to), Token::uint(1u64)])
            .unwrap();

        assert_eq!(request["to"], json!(contract_address().to_hex()));
        let data = request["data"].as_str().unwrap();
        assert!(data.starts_with("0xa9059cbb"));
        assert_eq!(data.len() % 2, 0);
    }
}
