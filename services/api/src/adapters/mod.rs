pub mod db;
pub mod folder_client;

pub use db::DbAdapter;
pub use folder_client::HttpFolderClient;
