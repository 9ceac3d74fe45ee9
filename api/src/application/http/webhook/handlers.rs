pub mod receive_update;
