//! Operation wrappers over the remote workspace client.
//!
//! Every wrapper follows the same result contract: it never returns an error
//! to the transport. Remote failures and locally detectable precondition
//! failures are both converted into a response whose `success` flag is false
//! and whose `error` string names the failed action, echoing the primary
//! input key (app name or path) so callers can correlate.

pub mod apps;
pub mod files;

pub use apps::{
    list_apps, redeploy_app, start_app, stop_app, AppEntry, RedeployAppRequest,
    RedeployAppResponse, StartAppRequest, StartAppResponse, StopAppRequest, StopAppResponse,
};
pub use files::{
    download_file, upload_file, DownloadFileRequest, DownloadFileResponse, UploadFileRequest,
    UploadFileResponse,
};
