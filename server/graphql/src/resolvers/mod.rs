mod query_root;

pub mod context;

pub use self::query_root::QueryRoot;
