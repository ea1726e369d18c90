mod health_check;
mod static_files;
