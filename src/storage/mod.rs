pub mod csv_file;
pub mod task_list;
