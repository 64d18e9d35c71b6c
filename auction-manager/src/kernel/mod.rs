pub mod db;
pub mod entities;
#[cfg(test)]
pub mod test_utils;
