//! Subcommands of the shim binary.

mod prices;
pub use prices::PricesCommand;

mod call;
pub use call::CallCommand;

mod alias;
pub use alias::AliasCommand;

mod deposit;
pub use deposit::DecodeDepositCommand;
