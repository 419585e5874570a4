// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Dataset loading from delimited files

mod csv_parser;

pub use csv_parser::CsvParser;
