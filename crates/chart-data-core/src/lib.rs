pub mod candle;
pub mod error;
pub mod normalize;
pub mod record;
