//! Presentation components shared by front ends.

pub mod data_table;

pub use data_table::{DataTable, TableColumn, results_tables};
