//! # Trainer Implementation Utilities

mod pair_position_index;
#[doc(inline)]
pub use pair_position_index::{PairPositionIndex, PairPositionMap};

mod token_chain;
#[doc(inline)]
pub use token_chain::TokenChain;
