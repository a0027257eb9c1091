pub mod gate_model;
