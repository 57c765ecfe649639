pub mod char_class;
pub mod csv_reader;
pub mod field_name;
pub mod tokenizer;
