//! The wire transaction and its RLP forms

use crate::TransactionError;
use bytes::Bytes;
use lumen_crypto::{
    keccak256, public_key_to_address, recover_public_key, sign, PrivateKey, PublicKey, Signature,
};
use lumen_primitives::{Address, H256, U256};
use lumen_rlp::{utils, Rlp, RlpStream};

/// A transaction in its wire form.
///
/// Unsigned until [`sign`](Transaction::sign) fills `v`/`r`/`s`. The RLP
/// list is always nine items; the seventh carries the chain id before
/// signing and the replay-protected v afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transaction {
    /// Expected sender; set on signing, checked if already present
    pub from: Option<Address>,
    /// Sender account nonce
    pub nonce: U256,
    /// Price per gas unit
    pub gas_price: U256,
    /// Gas limit
    pub gas: U256,
    /// Recipient; `None` creates a contract
    pub to: Option<Address>,
    /// Transferred amount
    pub value: U256,
    /// Call data or contract init code
    pub data: Bytes,
    /// Chain id for replay protection; 0 selects the legacy v encoding
    pub chain_id: u64,
    /// Replay-protected v (`recovery_id + 35 + 2*chain_id`, or
    /// `recovery_id + 27` when `chain_id` is 0)
    pub v: Option<u64>,
    /// Signature r scalar
    pub r: Option<[u8; 32]>,
    /// Signature s scalar
    pub s: Option<[u8; 32]>,
}

impl Transaction {
    /// Whether `v`, `r`, and `s` are all present.
    pub fn is_signed(&self) -> bool {
        self.v.is_some() && self.r.is_some() && self.s.is_some()
    }

    /// RLP-encode the nine-item list.
    ///
    /// With `include_signature`, the tail is `[v, r, s]` and the transaction
    /// must be signed (debug builds assert this); without, the tail is
    /// `[chain_id, "", ""]`, the preimage that gets signed. Zero integers
    /// and the missing recipient encode as the empty byte string.
    pub fn encode(&self, include_signature: bool) -> Vec<u8> {
        let mut stream = RlpStream::new_list(9);
        stream.append(&self.nonce);
        stream.append(&self.gas_price);
        stream.append(&self.gas);
        utils::append_optional_address(&mut stream, self.to.as_ref());
        stream.append(&self.value);
        utils::append_bytes(&mut stream, &self.data);

        if include_signature {
            debug_assert!(
                self.is_signed(),
                "signed encoding requested for an unsigned transaction"
            );
            stream.append(&self.v.unwrap_or(0));
            utils::append_scalar(&mut stream, &self.r.unwrap_or([0u8; 32]));
            utils::append_scalar(&mut stream, &self.s.unwrap_or([0u8; 32]));
        } else {
            stream.append(&self.chain_id);
            stream.append_empty_data();
            stream.append_empty_data();
        }

        stream.out().to_vec()
    }

    /// Hash of the signing preimage.
    pub fn unsigned_hash(&self) -> H256 {
        keccak256(&self.encode(false))
    }

    /// Hash of the signed form; `None` until signed.
    pub fn hash(&self) -> Option<H256> {
        if self.is_signed() {
            Some(keccak256(&self.encode(true)))
        } else {
            None
        }
    }

    /// Sign the transaction in place.
    ///
    /// Derives the sender from the key first: if `from` is already set to a
    /// different address the transaction is left untouched and signing
    /// fails. Never silently changes an identity.
    pub fn sign(&mut self, private_key: &PrivateKey) -> Result<&mut Self, TransactionError> {
        let derived = public_key_to_address(private_key.verifying_key());
        if let Some(declared) = self.from {
            if declared != derived {
                return Err(TransactionError::SenderMismatch { declared, derived });
            }
        }

        let signature = sign(&self.unsigned_hash(), private_key)?;
        let recovery_id = signature.recovery_id() as u64;

        self.from = Some(derived);
        self.r = Some(signature.r);
        self.s = Some(signature.s);
        self.v = Some(if self.chain_id > 0 {
            recovery_id + 35 + 2 * self.chain_id
        } else {
            recovery_id + 27
        });
        Ok(self)
    }

    fn recovery_id(&self) -> Result<u8, TransactionError> {
        let v = self.v.ok_or(TransactionError::Unsigned)?;
        let base = if self.chain_id > 0 {
            35 + 2 * self.chain_id
        } else {
            27
        };
        match v.checked_sub(base) {
            Some(id @ 0..=1) => Ok(id as u8),
            _ => Err(TransactionError::InvalidV {
                v,
                chain_id: self.chain_id,
            }),
        }
    }

    /// Recover the signer's public key from the signature.
    pub fn recover(&self) -> Result<PublicKey, TransactionError> {
        let r = self.r.ok_or(TransactionError::Unsigned)?;
        let s = self.s.ok_or(TransactionError::Unsigned)?;
        let signature = Signature::new(r, s, self.recovery_id()? + 27);
        Ok(recover_public_key(&self.unsigned_hash(), &signature)?)
    }

    /// The sender address: the declared `from` if present, otherwise
    /// derived by recovering the signer's key.
    pub fn sender(&self) -> Result<Address, TransactionError> {
        if let Some(from) = self.from {
            return Ok(from);
        }
        Ok(public_key_to_address(&self.recover()?))
    }

    /// Signed raw bytes as canonical data hex.
    pub fn serialize(&self) -> Result<String, TransactionError> {
        if !self.is_signed() {
            return Err(TransactionError::Unsigned);
        }
        Ok(format!("0x{}", hex::encode(self.encode(true))))
    }

    /// Decode a raw transaction.
    ///
    /// Empty `r` and `s` mark an unsigned transaction whose seventh item is
    /// the chain id; otherwise the seventh item is v and the chain id is
    /// read back out of it.
    pub fn decode(raw: &[u8]) -> Result<Self, TransactionError> {
        let rlp = Rlp::new(raw);
        if rlp.item_count()? != 9 {
            return Err(lumen_rlp::DecoderError::RlpIncorrectListLen.into());
        }

        let mut tx = Transaction {
            from: None,
            nonce: rlp.val_at(0)?,
            gas_price: rlp.val_at(1)?,
            gas: rlp.val_at(2)?,
            to: utils::optional_address_at(&rlp, 3)?,
            value: rlp.val_at(4)?,
            data: utils::bytes_at(&rlp, 5)?,
            chain_id: 0,
            v: None,
            r: None,
            s: None,
        };

        let r = utils::scalar_at(&rlp, 7)?;
        let s = utils::scalar_at(&rlp, 8)?;
        let seventh: u64 = rlp.val_at(6)?;

        if r == [0u8; 32] && s == [0u8; 32] {
            tx.chain_id = seventh;
        } else {
            tx.chain_id = if seventh >= 35 { (seventh - 35) / 2 } else { 0 };
            tx.v = Some(seventh);
            tx.r = Some(r);
            tx.s = Some(s);
        }

        Ok(tx)
    }
}
