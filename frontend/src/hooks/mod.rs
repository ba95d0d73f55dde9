pub mod use_mounted;
