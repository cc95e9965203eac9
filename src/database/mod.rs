pub mod db;

pub use db::PersistError;
