//! The gas price model backing the gas-info precompile.

mod model;
pub use model::{
    DEFAULT_L1_BASE_FEE, GasPriceComponents, GasPriceModel, L1_COMPRESSION_DISCOUNT,
    ZERO_BYTE_COST,
};

mod prices;
pub use prices::{PriceField, PriceTuple};
