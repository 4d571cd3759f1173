pub mod assembler;
pub mod batch;
pub mod charge;
pub mod composition;
pub mod geometry;
