pub mod client_id;
