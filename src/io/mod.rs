pub mod body_bin;
