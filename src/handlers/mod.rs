pub mod quiz_handler;
