pub mod db;
pub mod itunes;
pub mod memory;
pub mod security;
