//! Wallet and account management

use k256::ecdsa::SigningKey;
use lumen_crypto::{keccak256, public_key_to_address, sign, PrivateKey, PublicKey, Signature};
use lumen_primitives::{Address, ChecksumAddress, PrimitiveError, H256};
use lumen_types::Transaction;
use rand::rngs::OsRng;
use zeroize::Zeroize;

use crate::SdkError;

/// Wallet for managing a private key and signing
///
/// Note: Clone is intentionally not implemented to prevent accidental key
/// duplication. Use `from_private_key` to create a new wallet with the same
/// key if needed.
pub struct Wallet {
    private_key: PrivateKey,
    address: Address,
}

impl Wallet {
    /// Create a new random wallet
    pub fn new_random() -> Self {
        let private_key = SigningKey::random(&mut OsRng);
        let address = public_key_to_address(private_key.verifying_key());

        Self {
            private_key,
            address,
        }
    }

    /// Create a wallet from a 32-byte private key
    pub fn from_private_key(key: &[u8; 32]) -> Result<Self, SdkError> {
        let private_key = SigningKey::from_slice(key)
            .map_err(|e| SdkError::InvalidPrivateKey(e.to_string()))?;
        let address = public_key_to_address(private_key.verifying_key());

        Ok(Self {
            private_key,
            address,
        })
    }

    /// Create a wallet from a hex-encoded private key
    ///
    /// Accepts both with and without "0x" prefix.
    pub fn from_private_key_hex(hex: &str) -> Result<Self, SdkError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let mut bytes = hex::decode(hex)?;
        if bytes.len() != 32 {
            bytes.zeroize(); // clear sensitive data before returning
            return Err(SdkError::InvalidPrivateKey(format!(
                "expected 32 bytes, got {}",
                bytes.len()
            )));
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&bytes);
        bytes.zeroize();

        let result = Self::from_private_key(&key);
        key.zeroize();
        result
    }

    /// The wallet's address (always a user-type account)
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// The wallet's address in checksum text form for `net_name`
    /// (`MAIN`, `TEST`, or `NET<id>`, case-insensitive).
    pub fn checksum_address(&self, net_name: &str) -> Result<ChecksumAddress, SdkError> {
        Ok(ChecksumAddress::from_address(&self.address, net_name)
            .map_err(PrimitiveError::from)?)
    }

    /// The wallet's public key
    pub fn public_key(&self) -> &PublicKey {
        self.private_key.verifying_key()
    }

    /// Sign a 32-byte message hash
    pub fn sign_hash(&self, hash: &H256) -> Result<Signature, SdkError> {
        sign(hash, &self.private_key).map_err(|e| SdkError::SigningFailed(e.to_string()))
    }

    /// Sign a message with the personal-sign prefix
    /// `\x19Ethereum Signed Message:\n{len}`
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature, SdkError> {
        let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
        let mut data = prefix.into_bytes();
        data.extend_from_slice(message);
        let hash = keccak256(&data);
        self.sign_hash(&hash)
    }

    /// Sign a transaction, consuming and returning it.
    ///
    /// Fails if the transaction already declares a different sender.
    pub fn sign_transaction(&self, mut transaction: Transaction) -> Result<Transaction, SdkError> {
        transaction.sign(&self.private_key)?;
        Ok(transaction)
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_primitives::{AddressType, U256};

    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_wallet_random() {
        let wallet = Wallet::new_random();
        assert_ne!(wallet.address(), &Address::ZERO);
        assert_eq!(
            wallet.address().address_type().unwrap(),
            AddressType::User
        );
    }

    #[test]
    fn test_wallet_from_hex_known_key() {
        let wallet = Wallet::from_private_key_hex(DEV_KEY).unwrap();
        assert_eq!(
            wallet.address().to_hex(),
            "0x139fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );

        // without the prefix too
        let wallet = Wallet::from_private_key_hex(&DEV_KEY[2..]).unwrap();
        assert_eq!(
            wallet.address().to_hex(),
            "0x139fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_wallet_checksum_address() {
        let wallet = Wallet::from_private_key_hex(DEV_KEY).unwrap();
        let checksummed = wallet.checksum_address("main").unwrap();

        assert!(checksummed.is_valid());
        assert_eq!(checksummed.net_name(), "MAIN");
        assert_eq!(checksummed.to_address().unwrap(), *wallet.address());

        assert!(matches!(
            wallet.checksum_address("bogus"),
            Err(SdkError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_wallet_invalid_keys() {
        assert!(Wallet::from_private_key_hex("0x1234").is_err());
        assert!(Wallet::from_private_key_hex("0xzz").is_err());
        assert!(Wallet::from_private_key(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_wallet_sign_hash() {
        let wallet = Wallet::new_random();
        let hash = H256::from_bytes([0x42; 32]);
        let signature = wallet.sign_hash(&hash).unwrap();

        assert_ne!(signature.r, [0u8; 32]);
        assert_ne!(signature.s, [0u8; 32]);
        assert!(signature.v == 27 || signature.v == 28);
    }

    #[test]
    fn test_wallet_sign_message() {
        let wallet = Wallet::new_random();
        let signature = wallet.sign_message(b"hello lumen").unwrap();
        assert!(signature.is_low_s());
    }

    #[test]
    fn test_wallet_determinism() {
        let key = [0x42u8; 32];
        let wallet1 = Wallet::from_private_key(&key).unwrap();
        let wallet2 = Wallet::from_private_key(&key).unwrap();
        assert_eq!(wallet1.address(), wallet2.address());
    }

    #[test]
    fn test_wallet_sign_transaction() {
        let wallet = Wallet::from_private_key_hex(DEV_KEY).unwrap();
        let tx = Transaction {
            gas_price: U256::one(),
            gas: U256::from(21000u64),
            to: Some(Address::from_hex("0x0123456789012345678901234567890123456789").unwrap()),
            chain_id: 1,
            ..Default::default()
        };

        let signed = wallet.sign_transaction(tx).unwrap();
        assert!(signed.is_signed());
        assert_eq!(signed.from.as_ref(), Some(wallet.address()));
        assert_eq!(signed.sender().unwrap(), *wallet.address());
    }

    #[test]
    fn test_wallet_rejects_foreign_sender() {
        let wallet = Wallet::from_private_key_hex(DEV_KEY).unwrap();
        let tx = Transaction {
            from: Some(Address::from_hex("0x1000000000000000000000000000000000000001").unwrap()),
            chain_id: 1,
            ..Default::default()
        };

        assert!(wallet.sign_transaction(tx).is_err());
    }

    #[test]
    fn test_wallet_debug_hides_key() {
        let wallet = Wallet::new_random();
        let debug = format!("{:?}", wallet);
        assert!(debug.contains("address"));
        assert!(!debug.contains("private_key"));
    }
}
