pub mod init;
pub mod list;
pub mod skills;
pub mod validate;
