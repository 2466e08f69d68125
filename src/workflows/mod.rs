pub mod csv_import;
pub mod tasklist;
