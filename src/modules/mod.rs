pub mod newsroom;
