pub mod batch;
pub mod describe;
pub mod init;
pub mod list;
pub mod run;
pub mod validate;
