pub mod http;
pub mod mock;

pub use http::HttpJournalApi;
pub use mock::MockJournalApi;
