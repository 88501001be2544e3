pub mod impressions;
pub mod uploaded_data;
pub mod uploaded_file;
