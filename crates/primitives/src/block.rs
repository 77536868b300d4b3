use alloy_primitives::B256;
use alloy_rpc_types_eth::Header;

/// Information about a block.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, derive_more::Display)]
#[display("#{number} ({hash})")]
pub struct BlockInfo {
    /// The block number.
    pub number: u64,
    /// The block hash.
    pub hash: B256,
}

impl BlockInfo {
    /// Returns a new instance of [`BlockInfo`].
    pub const fn new(number: u64, hash: B256) -> Self {
        Self { number, hash }
    }
}

impl From<&Header> for BlockInfo {
    fn from(value: &Header) -> Self {
        Self { number: value.number, hash: value.hash }
    }
}

impl From<Header> for BlockInfo {
    fn from(value: Header) -> Self {
        (&value).into()
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for BlockInfo {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let number = u.int_in_range(0..=u32::MAX)?;
        let hash = B256::arbitrary(u)?;
        Ok(Self { number: number as u64, hash })
    }
}

/// The highest L1 block whose canonical transaction chain events have been fully applied.
///
/// The block height of the checkpoint never decreases over the lifetime of the process. It is
/// overwritten after every processed L1 header and never deleted.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Eth1Checkpoint {{ block_height: {block_height}, block_hash: {block_hash} }}")]
pub struct Eth1Checkpoint {
    /// The L1 block height.
    pub block_height: u64,
    /// The L1 block hash.
    pub block_hash: B256,
}

impl Eth1Checkpoint {
    /// Returns a new [`Eth1Checkpoint`].
    pub const fn new(block_height: u64, block_hash: B256) -> Self {
        Self { block_height, block_hash }
    }

    /// Returns the first L1 block height that has not been applied yet.
    pub const fn next_height(&self) -> u64 {
        self.block_height.saturating_add(1)
    }
}

impl From<BlockInfo> for Eth1Checkpoint {
    fn from(value: BlockInfo) -> Self {
        Self { block_height: value.number, block_hash: value.hash }
    }
}

impl From<Eth1Checkpoint> for BlockInfo {
    fn from(value: Eth1Checkpoint) -> Self {
        Self { number: value.block_height, hash: value.block_hash }
    }
}
