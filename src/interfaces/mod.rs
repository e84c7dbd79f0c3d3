pub mod csv;
pub mod trip_file;
