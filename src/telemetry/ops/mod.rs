pub mod import;
pub mod init;
pub mod jobs;
pub mod source;
