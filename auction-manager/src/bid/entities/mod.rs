mod bid;

pub use bid::*;
