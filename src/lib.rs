//! Teacher workload viewer: loads the payroll CSV export, cleans it and
//! summarizes assigned hours per teacher.

pub mod config;
pub mod data;
