pub mod accounts;
pub mod amounts;
pub mod cheques;
pub mod cli;
mod cors;
pub mod database;
pub mod http_err;
pub mod reports;
pub mod server;
pub mod transactions;
