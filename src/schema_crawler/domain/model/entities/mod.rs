pub mod column;
pub mod foreign_key;
pub mod index;
pub mod table;
