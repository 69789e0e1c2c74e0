pub mod scan_config;
