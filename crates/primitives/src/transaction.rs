use alloy_primitives::{keccak256, Address, Bytes, Signature, SignatureError, B256, U256};
use alloy_rlp::{BufMut, Encodable, Header};

/// The origin of an L2 transaction.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum QueueOrigin {
    /// A transaction submitted directly to the L2 sequencer.
    #[default]
    Sequencer = 0,
    /// A transaction enqueued on L1 and replayed on L2.
    L1ToL2 = 1,
}

/// The scheme used to compute the hash that is signed for an L2 transaction.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum SignatureHashType {
    /// EIP-155 replay protected signing hash.
    #[default]
    Eip155 = 0,
}

/// A transaction enqueued on L1 through the canonical transaction chain.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct RollupTransaction {
    /// The position of the transaction in the L1 queue.
    pub queue_index: u64,
    /// The unix timestamp, in seconds, at which the transaction was enqueued.
    pub timestamp: u64,
    /// The sender of the transaction on L1.
    pub l1_origin: Address,
    /// The recipient of the transaction on L2.
    pub target: Address,
    /// The gas limit of the transaction on L2.
    pub gas_limit: u64,
    /// The calldata of the transaction.
    pub data: Bytes,
    /// The L1 block in which the transaction was enqueued.
    pub l1_block_number: u64,
}

impl RollupTransaction {
    /// Builds the unsigned L2 transaction for the enqueued message, using the provided nonce and
    /// chain id.
    pub fn to_transaction(&self, nonce: u64, chain_id: u64) -> L2Transaction {
        L2Transaction {
            chain_id,
            nonce,
            gas_price: 0,
            gas_limit: self.gas_limit,
            to: self.target,
            value: U256::ZERO,
            input: self.data.clone(),
            queue_origin: QueueOrigin::L1ToL2,
            signature_hash_type: SignatureHashType::Eip155,
            l1_message_sender: Some(self.l1_origin),
            l1_timestamp: Some(self.timestamp),
            l1_queue_index: Some(self.queue_index),
        }
    }
}

/// An unsigned L2 transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct L2Transaction {
    /// The chain id of the L2.
    pub chain_id: u64,
    /// The nonce of the sender.
    pub nonce: u64,
    /// The gas price.
    pub gas_price: u128,
    /// The gas limit.
    pub gas_limit: u64,
    /// The recipient.
    pub to: Address,
    /// The transferred value.
    pub value: U256,
    /// The calldata.
    pub input: Bytes,
    /// The origin of the transaction.
    pub queue_origin: QueueOrigin,
    /// The signing hash scheme.
    pub signature_hash_type: SignatureHashType,
    /// The L1 sender for L1 to L2 transactions.
    pub l1_message_sender: Option<Address>,
    /// The L1 enqueue timestamp for L1 to L2 transactions.
    pub l1_timestamp: Option<u64>,
    /// The L1 queue index for L1 to L2 transactions.
    pub l1_queue_index: Option<u64>,
}

impl L2Transaction {
    /// Returns the EIP-155 hash that is signed by the sender.
    pub fn signature_hash(&self) -> B256 {
        let mut buf = Vec::new();
        self.encode_list(&mut buf, |fields| {
            fields.push(&self.chain_id);
            fields.push(&0u8);
            fields.push(&0u8);
        });
        keccak256(buf)
    }

    /// Returns the hash of the transaction.
    ///
    /// The hash commits to the origin and signing scheme tags but not to the signature or the L1
    /// metadata, which makes it reproducible from the message fields and nonce alone.
    pub fn tx_hash(&self) -> B256 {
        let queue_origin = self.queue_origin as u8;
        let signature_hash_type = self.signature_hash_type as u8;
        let mut buf = Vec::new();
        self.encode_list(&mut buf, |fields| {
            fields.push(&queue_origin);
            fields.push(&signature_hash_type);
        });
        keccak256(buf)
    }

    /// Attaches the signature to the transaction.
    pub fn into_signed(self, signature: Signature) -> SignedL2Transaction {
        let hash = self.tx_hash();
        SignedL2Transaction { tx: self, signature, hash }
    }

    /// Encodes the common fields followed by the trailing fields as an RLP list.
    fn encode_list<'a>(
        &'a self,
        out: &mut dyn BufMut,
        trailing: impl FnOnce(&mut Vec<&'a dyn Encodable>),
    ) {
        let mut fields: Vec<&dyn Encodable> = vec![
            &self.nonce,
            &self.gas_price,
            &self.gas_limit,
            &self.to,
            &self.value,
            &self.input,
        ];
        trailing(&mut fields);

        let payload_length = fields.iter().map(|f| f.length()).sum();
        Header { list: true, payload_length }.encode(out);
        for field in fields {
            field.encode(out);
        }
    }
}

/// A signed L2 transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedL2Transaction {
    /// The unsigned transaction.
    pub tx: L2Transaction,
    /// The signature over [`L2Transaction::signature_hash`].
    pub signature: Signature,
    /// The transaction hash.
    pub hash: B256,
}

impl SignedL2Transaction {
    /// Returns the hash of the transaction.
    pub const fn hash(&self) -> B256 {
        self.hash
    }

    /// Returns the nonce of the transaction.
    pub const fn nonce(&self) -> u64 {
        self.tx.nonce
    }

    /// Recovers the signer of the transaction.
    pub fn recover_signer(&self) -> Result<Address, SignatureError> {
        self.signature.recover_address_from_prehash(&self.tx.signature_hash())
    }
}
