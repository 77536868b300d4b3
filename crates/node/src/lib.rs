//! The rollup node, which wires the L1 sync service to an L1 RPC provider, a sqlite checkpoint
//! store and the ingestion key.

mod args;
pub use args::{CtcArgs, DatabaseArgs, L1ProviderArgs, L2Args, RollupNodeArgs, SignerArgs};

mod constants;

mod node;
pub use node::RollupNode;
