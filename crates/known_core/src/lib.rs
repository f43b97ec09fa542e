pub mod domain;
pub mod folders;
pub mod ports;
pub mod route;
pub mod view;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use domain::{Doc, Folder, FolderSummary, User, UserCredentials, UserSession};
pub use folders::{FolderList, NewFolderState};
pub use ports::{DatabaseService, FolderApi, PortError, PortResult};
pub use route::{resolve_app_props, AppProps, RouteSelection, Selection};
pub use view::{AppView, SessionExpiredDialog};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockDatabase;
