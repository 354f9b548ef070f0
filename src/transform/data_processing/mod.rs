pub mod columns;
pub mod frames;
