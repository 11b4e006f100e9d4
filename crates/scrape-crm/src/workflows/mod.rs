pub mod dispatch;
pub mod ingest;
pub mod variations;
